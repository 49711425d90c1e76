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

//! Credit-card utilities
//!
//! Number normalization, brand detection by IIN prefix and length,
//! masking for logs and display, and reference-code generation.

use std::fmt;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Default prefix for generated reference codes
pub const DEFAULT_REFERENCE_PREFIX: &str = "payment_test_";

/// Card brands recognized by the processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardType {
	Visa,
	Mastercard,
	Amex,
	Diners,
	Discover,
}

impl fmt::Display for CardType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			CardType::Visa => "VISA",
			CardType::Mastercard => "MASTERCARD",
			CardType::Amex => "AMEX",
			CardType::Diners => "DINERS",
			CardType::Discover => "DISCOVER",
		};
		write!(f, "{}", name)
	}
}

/// Remove embedded spaces from a card number
pub fn clean_number(number: &str) -> String {
	number.replace(' ', "")
}

/// Classify a card number by its IIN prefix and length
///
/// Returns `None` for empty input, non-digit input, or numbers matching
/// no known brand pattern.
pub fn card_type_from_number(number: &str) -> Option<CardType> {
	let digits = clean_number(number);
	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}

	let len = digits.len();
	let starts = |prefixes: &[&str]| prefixes.iter().any(|p| digits.starts_with(p));

	if digits.starts_with('4') && (len == 13 || len == 16) {
		Some(CardType::Visa)
	} else if starts(&["51", "52", "53", "54", "55"]) && len == 16 {
		Some(CardType::Mastercard)
	} else if starts(&["34", "37"]) && len == 15 {
		Some(CardType::Amex)
	} else if starts(&["300", "301", "302", "303", "304", "305", "36", "38"]) && len == 14 {
		Some(CardType::Diners)
	} else if starts(&["6011", "65"]) && len == 16 {
		Some(CardType::Discover)
	} else {
		None
	}
}

/// Mask a card number, keeping the first 6 (IIN) and last 4 digits visible
///
/// Inputs of 10 characters or fewer cannot keep both ends without
/// repeating digits, so they are masked entirely.
pub fn mask_number(number: &str) -> String {
	let chars: Vec<char> = number.chars().collect();
	if chars.len() <= 10 {
		return "X".repeat(chars.len());
	}

	let first: String = chars[..6].iter().collect();
	let last: String = chars[chars.len() - 4..].iter().collect();
	format!("{}XXXXXX{}", first, last)
}

/// Build a reference code from an id, or generate a random one
///
/// The generated id is 10 characters sampled without replacement from the
/// lowercase-alphanumeric set.
pub fn generate_reference_code(id: Option<&str>, prefix: Option<&str>) -> String {
	let prefix = prefix.unwrap_or(DEFAULT_REFERENCE_PREFIX);
	match id {
		Some(id) => format!("{}{}", prefix, id),
		None => {
			let mut alphabet: Vec<char> = ('a'..='z').chain('0'..='9').collect();
			alphabet.shuffle(&mut rand::thread_rng());
			let id: String = alphabet.into_iter().take(10).collect();
			format!("{}{}", prefix, id)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_clean_number() {
		assert_eq!(clean_number("4111 1111 1111 1111"), "4111111111111111");
		assert_eq!(clean_number("4111111111111111"), "4111111111111111");
	}

	#[test]
	fn test_card_type_detection() {
		assert_eq!(card_type_from_number("4111111111111111"), Some(CardType::Visa));
		assert_eq!(card_type_from_number("4222222222222"), Some(CardType::Visa));
		assert_eq!(
			card_type_from_number("5500005555555559"),
			Some(CardType::Mastercard)
		);
		assert_eq!(card_type_from_number("378282246310005"), Some(CardType::Amex));
		assert_eq!(card_type_from_number("30569309025904"), Some(CardType::Diners));
		assert_eq!(card_type_from_number("36148900647913"), Some(CardType::Diners));
		assert_eq!(
			card_type_from_number("6011111111111117"),
			Some(CardType::Discover)
		);
		assert_eq!(
			card_type_from_number("6500000000000002"),
			Some(CardType::Discover)
		);
	}

	#[test]
	fn test_card_type_handles_spaces() {
		assert_eq!(
			card_type_from_number("4111 1111 1111 1111"),
			Some(CardType::Visa)
		);
	}

	#[test]
	fn test_card_type_rejects_unknown_input() {
		assert_eq!(card_type_from_number(""), None);
		assert_eq!(card_type_from_number("not-a-number"), None);
		// Right prefix, wrong length.
		assert_eq!(card_type_from_number("41111111"), None);
		// No brand starts with 9.
		assert_eq!(card_type_from_number("9999999999999999"), None);
	}

	#[test]
	fn test_card_type_display() {
		assert_eq!(CardType::Visa.to_string(), "VISA");
		assert_eq!(CardType::Mastercard.to_string(), "MASTERCARD");
	}

	#[test]
	fn test_mask_number() {
		assert_eq!(mask_number("4111111111111111"), "411111XXXXXX1111");
		assert_eq!(mask_number("378282246310005"), "378282XXXXXX0005");
	}

	#[test]
	fn test_mask_short_number_saturates() {
		assert_eq!(mask_number("4111"), "XXXX");
		assert_eq!(mask_number(""), "");
	}

	#[test]
	fn test_generate_reference_code_with_id() {
		assert_eq!(generate_reference_code(Some("abc"), None), "payment_test_abc");
		assert_eq!(generate_reference_code(Some("abc"), Some("order_")), "order_abc");
	}

	#[test]
	fn test_generate_reference_code_random() {
		let first = generate_reference_code(None, None);
		let second = generate_reference_code(None, None);

		assert_ne!(first, second);
		for code in [&first, &second] {
			let id = code.strip_prefix(DEFAULT_REFERENCE_PREFIX).unwrap();
			assert_eq!(id.len(), 10);
			assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
		}
	}
}
