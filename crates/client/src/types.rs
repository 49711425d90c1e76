// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Wire types for the PayU Latam API
//!
//! Field names follow the processor's camelCase JSON protocol. Payloads
//! that accept arbitrary extra keys carry a flattened extension map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default transaction type when the caller does not override it
pub const DEFAULT_TRANSACTION_TYPE: &str = "AUTHORIZATION_AND_CAPTURE";

/// API command carried in the request envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
	CreateToken,
	SubmitTransaction,
	OrderDetailByReferenceCode,
}

/// Merchant credentials block of the request envelope
///
/// Unset credentials serialize as `null`, matching the processor protocol.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
	pub api_login: Value,
	pub api_key: Value,
}

/// Payload of an ORDER_DETAIL_BY_REFERENCE_CODE query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDetails {
	pub reference_code: String,
}

/// Top-level request envelope
///
/// One command-specific payload slot is filled per request; the rest are
/// omitted from the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
	pub test: bool,
	pub language: String,
	pub command: Command,
	pub merchant: Merchant,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub credit_card_token: Option<CreditCardData>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transaction: Option<Transaction>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<QueryDetails>,
}

/// An order as the caller supplies it and as it goes on the wire
///
/// Callers fill `reference_code`, `value`, `currency` and optionally
/// `description`; building the order populates the remaining fields and
/// repackages `value`/`currency` under `additionalValues.TX_VALUE`.
/// `value` is kept as a raw JSON value so that numeric and string amounts
/// round-trip unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reference_code: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub currency: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub account_id: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub signature: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub language: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub additional_values: Option<Map<String, Value>>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Raw credit card data, used for tokenization and direct submission
///
/// All fields are optional at the type level; the validator enforces the
/// required set before anything reaches the network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardData {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub payer_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub payment_method: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub number: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub expiration_date: Option<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// A payment transaction referencing a built order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
	pub payment_method: String,
	pub payment_country: String,
	#[serde(rename = "type")]
	pub transaction_type: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub credit_card: Option<CreditCardData>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub credit_card_token_id: Option<String>,
	pub order: Order,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Transaction {
	/// Shallow-merge one extension entry into the transaction top level
	///
	/// A key naming a typed field overwrites that field; anything else
	/// lands in the extension map. Later entries win on conflict.
	pub fn merge_extension(&mut self, key: String, value: Value) {
		if let Value::String(s) = &value {
			match key.as_str() {
				"type" => {
					self.transaction_type = s.clone();
					return;
				}
				"paymentMethod" => {
					self.payment_method = s.clone();
					return;
				}
				"paymentCountry" => {
					self.payment_country = s.clone();
					return;
				}
				"creditCardTokenId" => {
					self.credit_card_token_id = Some(s.clone());
					return;
				}
				_ => {}
			}
		}
		self.extra.insert(key, value);
	}
}

/// Options for building a transaction
///
/// Supply exactly one of `credit_card` (validated, embedded under
/// `creditCard`) or `credit_card_token` (referenced under
/// `creditCardTokenId`). `additional_data` is the explicit extension map
/// shallow-merged into the transaction top level; it defaults to empty.
#[derive(Debug, Clone, Default)]
pub struct TransactionOptions {
	pub credit_card: Option<CreditCardData>,
	pub credit_card_token: Option<String>,
	pub transaction_type: Option<String>,
	pub additional_data: Map<String, Value>,
}
