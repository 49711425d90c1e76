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

//! Required-field validation
//!
//! Presence-only checks: a field counts as present when it is set, even if
//! empty. Every check runs before any network call so that incomplete
//! payloads fail fast with the full list of missing attributes.

use serde_json::Value;

use crate::types::{CreditCardData, Order};

/// Fields a credit card must carry for tokenization or direct submission
pub const CREDIT_CARD_FIELDS: [&str; 5] =
	["payerId", "name", "paymentMethod", "number", "expirationDate"];

/// Fields an order must carry before a signature can be computed
pub const SIGNATURE_FIELDS: [&str; 3] = ["referenceCode", "value", "currency"];

/// Raised when required fields are absent from a payload or configuration
///
/// The message lists the missing wire-level field names in the order they
/// were declared as required.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing attributes: {}", .missing.join(", "))]
pub struct ConfigurationError {
	pub missing: Vec<String>,
}

impl ConfigurationError {
	pub fn missing(fields: &[&str]) -> Self {
		Self {
			missing: fields.iter().map(|f| f.to_string()).collect(),
		}
	}
}

fn check(names: &[&str], present: &[bool]) -> Result<(), ConfigurationError> {
	let missing: Vec<String> = names
		.iter()
		.zip(present)
		.filter(|(_, present)| !**present)
		.map(|(name, _)| name.to_string())
		.collect();

	if missing.is_empty() {
		Ok(())
	} else {
		Err(ConfigurationError { missing })
	}
}

/// Validate a credit card against [`CREDIT_CARD_FIELDS`]
pub fn validate_credit_card(card: &CreditCardData) -> Result<(), ConfigurationError> {
	check(
		&CREDIT_CARD_FIELDS,
		&[
			card.payer_id.is_some(),
			card.name.is_some(),
			card.payment_method.is_some(),
			card.number.is_some(),
			card.expiration_date.is_some(),
		],
	)
}

/// Validate an order against [`SIGNATURE_FIELDS`]
pub fn validate_order_for_signature(order: &Order) -> Result<(), ConfigurationError> {
	signature_fields(order).map(|_| ())
}

/// Validate and extract the signature inputs from an order
pub(crate) fn signature_fields(
	order: &Order,
) -> Result<(&str, &Value, &str), ConfigurationError> {
	check(
		&SIGNATURE_FIELDS,
		&[
			order.reference_code.is_some(),
			order.value.is_some(),
			order.currency.is_some(),
		],
	)?;

	match (&order.reference_code, &order.value, &order.currency) {
		(Some(reference), Some(value), Some(currency)) => {
			Ok((reference.as_str(), value, currency.as_str()))
		}
		_ => Err(ConfigurationError::missing(&SIGNATURE_FIELDS)),
	}
}
