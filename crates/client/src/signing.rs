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

//! Order signature computation
//!
//! The processor requires an md5 digest over the api key, merchant id and
//! the order's reference code, value and currency, joined by a separator.
//! This is an integrity check dictated by the remote protocol, not
//! secret-strength cryptography; the digest must match md5 bit-for-bit
//! because the remote side recomputes and compares it.

use serde_json::Value;

use crate::config::Config;
use crate::types::Order;
use crate::validate::{self, ConfigurationError};

/// Separator used between signature fields unless overridden
pub const DEFAULT_SEPARATOR: &str = "~";

/// Compute the raw signature digest as lowercase hex
pub fn compute_signature(
	api_key: &str,
	merchant_id: &str,
	reference_code: &str,
	value: &str,
	currency: &str,
	sep: &str,
) -> String {
	let message = [api_key, merchant_id, reference_code, value, currency].join(sep);
	hex::encode(md5::compute(message.as_bytes()).0)
}

/// Build the signature for an order using the configured credentials
///
/// Validates the order's signature fields first, then coerces `value` to
/// its string form so numeric and string amounts sign identically.
pub fn build_signature(config: &Config, order: &Order) -> Result<String, ConfigurationError> {
	build_signature_with(config, order, DEFAULT_SEPARATOR)
}

/// [`build_signature`] with an explicit field separator
pub fn build_signature_with(
	config: &Config,
	order: &Order,
	sep: &str,
) -> Result<String, ConfigurationError> {
	let (reference_code, value, currency) = validate::signature_fields(order)?;
	let api_key = config.credential("API_KEY")?;
	let merchant_id = config.credential("MERCHANT_ID")?;

	Ok(compute_signature(
		&api_key,
		&merchant_id,
		reference_code,
		&value_as_string(value),
		currency,
		sep,
	))
}

fn value_as_string(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}
