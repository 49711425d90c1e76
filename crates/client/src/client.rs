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

//! PayU Latam API client
//!
//! Builds command envelopes, orders and transactions, and dispatches them
//! to the payment and reporting endpoints. Responses come back as raw
//! JSON; remote error codes are passed through to the caller verbatim.

use reqwest::Client as ReqwestClient;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::card;
use crate::config::Config;
use crate::signing;
use crate::types::{
	Command, CreditCardData, DEFAULT_TRANSACTION_TYPE, Merchant, Order, QueryDetails,
	RequestEnvelope, Transaction, TransactionOptions,
};
use crate::validate::{self, ConfigurationError};

/// Error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("Network error: {0}")]
	Network(String),
	#[error("Serialization error: {0}")]
	Serialization(String),
	#[error("Server error: {0}")]
	Server(String),
	#[error("Configuration error: {0}")]
	Configuration(#[from] ConfigurationError),
	#[error("Runtime error: {0}")]
	Runtime(String),
}

/// Client for the PayU Latam payments and reporting APIs
///
/// This is an async client interface using reqwest for HTTP communication.
/// Build steps are pure transformations; only `tokenize`,
/// `submit_transaction` and `query_transaction` reach the network.
pub struct PayuClient {
	config: Config,
	http: ReqwestClient,
}

impl PayuClient {
	/// Create a new client with the given configuration
	pub fn new(config: Config) -> Result<Self, ClientError> {
		let http = Self::build_http(&config)?;
		Ok(Self { config, http })
	}

	fn build_http(config: &Config) -> Result<ReqwestClient, ClientError> {
		let mut builder = ReqwestClient::builder();
		if !config.verify_ssl() {
			// Sandbox hosts may present untrusted certificates.
			builder = builder.danger_accept_invalid_certs(true);
		}
		builder
			.build()
			.map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))
	}

	/// The active configuration
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Replace the configuration
	///
	/// Resets to defaults overridden by the supplied options and rebuilds
	/// the HTTP client so a changed `VERIFY_SSL` takes effect.
	pub fn configure<I, K>(&mut self, options: I) -> Result<(), ClientError>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		self.config.configure(options);
		self.http = Self::build_http(&self.config)?;
		Ok(())
	}

	/// Build the request envelope for a command from the configuration
	pub fn build_request_base(&self, command: Command) -> RequestEnvelope {
		RequestEnvelope {
			test: self.config.test(),
			language: self.config.lang().to_string(),
			command,
			merchant: Merchant {
				api_login: self.config.wire_value("API_LOGIN"),
				api_key: self.config.wire_value("API_KEY"),
			},
			credit_card_token: None,
			transaction: None,
			details: None,
		}
	}

	/// Compute the integrity signature for an order
	pub fn build_signature(&self, order: &Order) -> Result<String, ConfigurationError> {
		signing::build_signature(&self.config, order)
	}

	/// Prepare an order for submission
	///
	/// Signs the order, attaches the configured account id, repackages
	/// `value`/`currency` under `additionalValues.TX_VALUE` and defaults
	/// `language` from the configuration. Caller-supplied `language` and
	/// `additionalValues` are left untouched.
	pub fn build_order(&self, mut order: Order) -> Result<Order, ConfigurationError> {
		order.signature = Some(signing::build_signature(&self.config, &order)?);
		order.account_id = Some(self.config.wire_value("ACCOUNT_ID"));

		let value = order.value.take();
		let currency = order.currency.take();

		if order.language.is_none() {
			order.language = Some(self.config.lang().to_string());
		}
		if order.additional_values.is_none() {
			let mut tx_value = Map::new();
			tx_value.insert("value".to_string(), value.unwrap_or(Value::Null));
			tx_value.insert(
				"currency".to_string(),
				currency.map(Value::from).unwrap_or(Value::Null),
			);

			let mut additional_values = Map::new();
			additional_values.insert("TX_VALUE".to_string(), Value::Object(tx_value));
			order.additional_values = Some(additional_values);
		}

		Ok(order)
	}

	/// Assemble a transaction around a built order
	///
	/// A raw card in `options` is validated and embedded; a token id is
	/// referenced without validation. `type` defaults to
	/// AUTHORIZATION_AND_CAPTURE. `additional_data` entries are
	/// shallow-merged into the transaction top level, later keys winning.
	pub fn build_transaction(
		&self,
		order: Order,
		payment_method: &str,
		payment_country: &str,
		options: TransactionOptions,
	) -> Result<Transaction, ConfigurationError> {
		let TransactionOptions {
			credit_card,
			credit_card_token,
			transaction_type,
			additional_data,
		} = options;

		let (credit_card, credit_card_token_id) = match (credit_card, credit_card_token) {
			(Some(credit_card), _) => {
				validate::validate_credit_card(&credit_card)?;
				(Some(credit_card), None)
			}
			(None, token) => (None, token),
		};

		let mut transaction = Transaction {
			payment_method: payment_method.to_string(),
			payment_country: payment_country.to_string(),
			transaction_type: transaction_type
				.unwrap_or_else(|| DEFAULT_TRANSACTION_TYPE.to_string()),
			credit_card,
			credit_card_token_id,
			order,
			extra: Map::new(),
		};

		for (key, value) in additional_data {
			transaction.merge_extension(key, value);
		}

		Ok(transaction)
	}

	/// Tokenize a credit card
	///
	/// Validates the card fields, strips embedded spaces from the number
	/// and submits a CREATE_TOKEN request to the payment endpoint.
	pub async fn tokenize(&self, mut cc_data: CreditCardData) -> Result<Value, ClientError> {
		validate::validate_credit_card(&cc_data)?;
		cc_data.number = cc_data.number.map(|n| card::clean_number(&n));

		let mut request = self.build_request_base(Command::CreateToken);
		request.credit_card_token = Some(cc_data);
		self.post(&request, self.config.payment_url()).await
	}

	/// Submit a built transaction to the payment endpoint
	pub async fn submit_transaction(
		&self,
		transaction: Transaction,
	) -> Result<Value, ClientError> {
		let mut request = self.build_request_base(Command::SubmitTransaction);
		request.transaction = Some(transaction);
		self.post(&request, self.config.payment_url()).await
	}

	/// Query a transaction by reference code on the reporting endpoint
	pub async fn query_transaction(&self, reference_code: &str) -> Result<Value, ClientError> {
		let mut request = self.build_request_base(Command::OrderDetailByReferenceCode);
		request.details = Some(QueryDetails {
			reference_code: reference_code.to_string(),
		});
		self.post(&request, self.config.query_url()).await
	}

	async fn post(&self, request: &RequestEnvelope, url: &str) -> Result<Value, ClientError> {
		debug!(command = ?request.command, url, "dispatching request");

		let response = self
			.http
			.post(url)
			.header(reqwest::header::ACCEPT, "application/json")
			.json(request)
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		if !response.status().is_success() {
			let status = response.status();
			let error_text = response
				.text()
				.await
				.unwrap_or_else(|_| format!("HTTP {}", status));
			return Err(ClientError::Server(format!("{}: {}", status, error_text)));
		}

		response
			.json()
			.await
			.map_err(|e| ClientError::Serialization(format!("Failed to parse response: {}", e)))
	}
}

/// Synchronous client wrapper (for compatibility)
///
/// This wraps the async client and runs it in a tokio runtime. Every call
/// blocks until the HTTP response is available. For new code, prefer using
/// the async PayuClient directly.
pub struct SyncPayuClient {
	client: PayuClient,
	runtime: tokio::runtime::Runtime,
}

impl SyncPayuClient {
	/// Create a new synchronous client
	pub fn new(config: Config) -> Result<Self, ClientError> {
		let runtime = tokio::runtime::Runtime::new()
			.map_err(|e| ClientError::Runtime(format!("Failed to create tokio runtime: {}", e)))?;
		Ok(Self {
			client: PayuClient::new(config)?,
			runtime,
		})
	}

	/// The wrapped async client, for the pure build steps
	pub fn client(&self) -> &PayuClient {
		&self.client
	}

	/// Tokenize a credit card (synchronous)
	pub fn tokenize(&self, cc_data: CreditCardData) -> Result<Value, ClientError> {
		self.runtime.block_on(self.client.tokenize(cc_data))
	}

	/// Submit a transaction (synchronous)
	pub fn submit_transaction(&self, transaction: Transaction) -> Result<Value, ClientError> {
		self.runtime
			.block_on(self.client.submit_transaction(transaction))
	}

	/// Query a transaction by reference code (synchronous)
	pub fn query_transaction(&self, reference_code: &str) -> Result<Value, ClientError> {
		self.runtime
			.block_on(self.client.query_transaction(reference_code))
	}
}
