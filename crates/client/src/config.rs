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

//! Client configuration
//!
//! Holds the merchant credentials and endpoint URLs used for every request.
//! Option names are case-insensitive on input and stored under a canonical
//! uppercase key. Unset options fall back to documented defaults; nothing is
//! validated here — missing credentials only surface when a signature is
//! computed or a card is submitted.

use std::collections::HashMap;

use serde_json::Value;

use crate::validate::ConfigurationError;

/// Default payment endpoint (PayU Latam sandbox)
pub const DEFAULT_PAYMENT_URL: &str =
	"https://stg.api.payulatam.com/payments-api/4.0/service.cgi";

/// Default reporting endpoint (PayU Latam sandbox)
pub const DEFAULT_QUERY_URL: &str =
	"https://stg.api.payulatam.com/reports-api/4.0/service.cgi";

/// Default request language
pub const DEFAULT_LANG: &str = "es";

/// Environment variable prefix recognized by [`Config::from_env`]
pub const ENV_PREFIX: &str = "PAYU";

/// Configuration for a PayU client instance
///
/// Each client instance owns one configuration value; there is no
/// process-wide singleton. Reconfiguring replaces the previous state
/// entirely rather than merging into it.
#[derive(Debug, Clone)]
pub struct Config {
	options: HashMap<String, Value>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			options: Self::defaults(),
		}
	}
}

impl Config {
	fn defaults() -> HashMap<String, Value> {
		let mut map = HashMap::new();
		map.insert("PAYMENT_URL".to_string(), Value::from(DEFAULT_PAYMENT_URL));
		map.insert("QUERY_URL".to_string(), Value::from(DEFAULT_QUERY_URL));
		map.insert("API_KEY".to_string(), Value::Null);
		map.insert("API_LOGIN".to_string(), Value::Null);
		map.insert("ACCOUNT_ID".to_string(), Value::Null);
		map.insert("MERCHANT_ID".to_string(), Value::Null);
		map.insert("TEST".to_string(), Value::from(false));
		map.insert("LANG".to_string(), Value::from(DEFAULT_LANG));
		map.insert("VERIFY_SSL".to_string(), Value::from(true));
		map
	}

	/// Create a configuration from the given option pairs
	pub fn new<I, K>(options: I) -> Self
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let mut config = Self::default();
		config.configure(options);
		config
	}

	/// Replace the active configuration
	///
	/// Resets every option to its default, then applies the supplied pairs.
	/// Keys are matched case-insensitively and stored uppercase.
	pub fn configure<I, K>(&mut self, options: I)
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		self.options = Self::defaults();
		for (key, value) in options {
			self.options.insert(key.into().to_uppercase(), value);
		}
	}

	/// Load configuration from `PAYU_`-prefixed environment variables
	///
	/// Reads `.env` if present, then collects `PAYU_API_KEY`,
	/// `PAYU_MERCHANT_ID`, etc. Values that spell a boolean (`true`/`false`)
	/// are stored as booleans so that `TEST` and `VERIFY_SSL` behave.
	pub fn from_env() -> Result<Self, config::ConfigError> {
		dotenv::dotenv().ok();

		let cfg = config::Config::builder()
			.add_source(config::Environment::with_prefix(ENV_PREFIX))
			.build()?;

		let raw: HashMap<String, String> = cfg.try_deserialize()?;
		let options = raw.into_iter().map(|(key, value)| {
			let value = match value.as_str() {
				"true" => Value::from(true),
				"false" => Value::from(false),
				_ => Value::from(value),
			};
			(key, value)
		});

		Ok(Self::new(options))
	}

	/// Look up an option under its canonical key
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.options.get(&name.to_uppercase())
	}

	/// Look up a string option
	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.get(name).and_then(Value::as_str)
	}

	/// Look up a boolean option
	pub fn get_bool(&self, name: &str) -> Option<bool> {
		self.get(name).and_then(Value::as_bool)
	}

	/// Option value as it will appear on the wire (`null` when unset)
	pub(crate) fn wire_value(&self, name: &str) -> Value {
		self.get(name).cloned().unwrap_or(Value::Null)
	}

	/// Credential coerced to its string form, or a configuration error
	/// naming the missing option
	pub(crate) fn credential(&self, name: &str) -> Result<String, ConfigurationError> {
		match self.get(name) {
			Some(Value::String(s)) => Ok(s.clone()),
			Some(Value::Null) | None => Err(ConfigurationError::missing(&[name])),
			Some(other) => Ok(other.to_string()),
		}
	}

	pub fn payment_url(&self) -> &str {
		self.get_str("PAYMENT_URL").unwrap_or(DEFAULT_PAYMENT_URL)
	}

	pub fn query_url(&self) -> &str {
		self.get_str("QUERY_URL").unwrap_or(DEFAULT_QUERY_URL)
	}

	pub fn test(&self) -> bool {
		self.get_bool("TEST").unwrap_or(false)
	}

	pub fn lang(&self) -> &str {
		self.get_str("LANG").unwrap_or(DEFAULT_LANG)
	}

	pub fn verify_ssl(&self) -> bool {
		self.get_bool("VERIFY_SSL").unwrap_or(true)
	}
}
