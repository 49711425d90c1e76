//! Integration tests for the PayU client
//!
//! These tests verify:
//! - Order building (signature, account id, TX_VALUE repackaging)
//! - Transaction building (token vs raw card, extension-map merge)
//! - Request envelope shape
//! - Fail-fast validation before any network call

use payu_client::{
	ClientError, Command, Config, CreditCardData, Order, PayuClient, TransactionOptions,
};
use serde_json::{Value, json};

// Sandbox credentials published in the PayU Latam developer docs.
fn sandbox_client() -> PayuClient {
	let config = Config::new([
		("merchant_id", json!("500238")),
		("api_login", json!("11959c415b33d0c")),
		("api_key", json!("6u39nqhq8ftd0hlvnjfs66eh8c")),
		("account_id", json!("500538")),
		("verify_ssl", json!(false)),
	]);
	PayuClient::new(config).unwrap()
}

fn test_order() -> Order {
	Order {
		reference_code: Some("payment_test_80k9j1n7dg".to_string()),
		value: Some(json!("1000")),
		currency: Some("COP".to_string()),
		description: Some("payment test".to_string()),
		..Default::default()
	}
}

fn test_card() -> CreditCardData {
	CreditCardData {
		payer_id: Some("12".to_string()),
		name: Some("Doughnut Jimmy".to_string()),
		payment_method: Some("VISA".to_string()),
		number: Some("4111111111111111".to_string()),
		expiration_date: Some("2017/01".to_string()),
		..Default::default()
	}
}

fn extension_map(value: Value) -> serde_json::Map<String, Value> {
	value.as_object().cloned().unwrap()
}

#[test]
fn test_build_order() {
	let client = sandbox_client();
	let order = client.build_order(test_order()).unwrap();

	assert_eq!(
		serde_json::to_value(&order).unwrap(),
		json!({
			"accountId": "500538",
			"referenceCode": "payment_test_80k9j1n7dg",
			"description": "payment test",
			"language": "es",
			"signature": "1811d58e896b1c89a9332ac0951f10ea",
			"additionalValues": {
				"TX_VALUE": {
					"value": "1000",
					"currency": "COP",
				}
			},
		})
	);
}

#[test]
fn test_build_order_keeps_caller_language_and_additional_values() {
	let client = sandbox_client();

	let mut order = test_order();
	order.language = Some("en".to_string());
	order.additional_values = Some(extension_map(json!({
		"TX_TAX": { "value": "160", "currency": "COP" }
	})));

	let order = client.build_order(order).unwrap();
	assert_eq!(order.language.as_deref(), Some("en"));

	let additional_values = order.additional_values.unwrap();
	assert!(additional_values.contains_key("TX_TAX"));
	assert!(!additional_values.contains_key("TX_VALUE"));
}

#[test]
fn test_build_order_missing_fields() {
	let client = sandbox_client();
	let order = Order {
		reference_code: Some("ref_1".to_string()),
		..Default::default()
	};

	let err = client.build_order(order).unwrap_err();
	assert_eq!(err.to_string(), "Missing attributes: value, currency");
}

#[test]
fn test_build_transaction_with_token() {
	let client = sandbox_client();
	let order = client.build_order(test_order()).unwrap();

	let transaction = client
		.build_transaction(
			order,
			"VISA",
			"CO",
			TransactionOptions {
				credit_card_token: Some("ef2d19b7-18e4-4406-aaa1-acfb6a57967a".to_string()),
				additional_data: extension_map(json!({
					"deviceSessionId": "vghs6tvkcle931686k1900o6e1",
					"ipAddress": "127.0.0.1",
					"cookie": "pt1t38347bs6jc9ruv2ecpv7o2",
					"userAgent": "Mozilla/5.0 (Windows NT 5.1; rv:18.0) Gecko/20100101 Firefox/18.0",
				})),
				..Default::default()
			},
		)
		.unwrap();

	assert_eq!(
		serde_json::to_value(&transaction).unwrap(),
		json!({
			"order": {
				"accountId": "500538",
				"referenceCode": "payment_test_80k9j1n7dg",
				"description": "payment test",
				"language": "es",
				"signature": "1811d58e896b1c89a9332ac0951f10ea",
				"additionalValues": {
					"TX_VALUE": {
						"value": "1000",
						"currency": "COP",
					}
				},
			},
			"creditCardTokenId": "ef2d19b7-18e4-4406-aaa1-acfb6a57967a",
			"type": "AUTHORIZATION_AND_CAPTURE",
			"paymentMethod": "VISA",
			"paymentCountry": "CO",
			"deviceSessionId": "vghs6tvkcle931686k1900o6e1",
			"ipAddress": "127.0.0.1",
			"cookie": "pt1t38347bs6jc9ruv2ecpv7o2",
			"userAgent": "Mozilla/5.0 (Windows NT 5.1; rv:18.0) Gecko/20100101 Firefox/18.0",
		})
	);
}

#[test]
fn test_build_transaction_with_raw_card() {
	let client = sandbox_client();
	let order = client.build_order(test_order()).unwrap();

	let transaction = client
		.build_transaction(
			order,
			"VISA",
			"CO",
			TransactionOptions {
				credit_card: Some(test_card()),
				..Default::default()
			},
		)
		.unwrap();

	let card = transaction.credit_card.unwrap();
	assert_eq!(card.number.as_deref(), Some("4111111111111111"));
	assert!(transaction.credit_card_token_id.is_none());
}

#[test]
fn test_build_transaction_rejects_incomplete_card() {
	let client = sandbox_client();
	let order = client.build_order(test_order()).unwrap();

	let incomplete = CreditCardData {
		payment_method: Some("VISA".to_string()),
		number: Some("4111111111111111".to_string()),
		expiration_date: Some("2017/01".to_string()),
		..Default::default()
	};

	let err = client
		.build_transaction(
			order,
			"VISA",
			"CO",
			TransactionOptions {
				credit_card: Some(incomplete),
				..Default::default()
			},
		)
		.unwrap_err();
	assert_eq!(err.to_string(), "Missing attributes: payerId, name");
}

#[test]
fn test_build_transaction_token_skips_card_validation() {
	let client = sandbox_client();
	let order = client.build_order(test_order()).unwrap();

	// No card at all: a token reference must never trigger card validation.
	let transaction = client
		.build_transaction(
			order,
			"VISA",
			"CO",
			TransactionOptions {
				credit_card_token: Some("token_1".to_string()),
				transaction_type: Some("AUTHORIZATION".to_string()),
				..Default::default()
			},
		)
		.unwrap();

	assert_eq!(transaction.credit_card_token_id.as_deref(), Some("token_1"));
	assert_eq!(transaction.transaction_type, "AUTHORIZATION");
}

#[test]
fn test_submit_envelope_shape() {
	let client = sandbox_client();
	let order = client.build_order(test_order()).unwrap();
	let transaction = client
		.build_transaction(
			order,
			"VISA",
			"CO",
			TransactionOptions {
				credit_card_token: Some("token_1".to_string()),
				..Default::default()
			},
		)
		.unwrap();

	let mut envelope = client.build_request_base(Command::SubmitTransaction);
	envelope.transaction = Some(transaction);

	let body = serde_json::to_value(&envelope).unwrap();
	assert_eq!(body["command"], json!("SUBMIT_TRANSACTION"));
	assert_eq!(body["test"], json!(false));
	assert_eq!(body["language"], json!("es"));
	assert_eq!(body["merchant"]["apiLogin"], json!("11959c415b33d0c"));
	assert_eq!(body["merchant"]["apiKey"], json!("6u39nqhq8ftd0hlvnjfs66eh8c"));
	assert_eq!(body["transaction"]["paymentMethod"], json!("VISA"));
	// Unused payload slots stay off the wire.
	assert!(body.get("creditCardToken").is_none());
	assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_tokenize_incomplete_card_fails_before_network() {
	// Point the client at an unreachable endpoint: a validation failure
	// must surface before any connection attempt.
	let config = Config::new([
		("merchant_id", json!("500238")),
		("api_key", json!("6u39nqhq8ftd0hlvnjfs66eh8c")),
		("payment_url", json!("http://127.0.0.1:1/payments")),
	]);
	let client = PayuClient::new(config).unwrap();

	let incomplete = CreditCardData {
		payment_method: Some("VISA".to_string()),
		number: Some("4111111111111111".to_string()),
		expiration_date: Some("2017/01".to_string()),
		..Default::default()
	};

	match client.tokenize(incomplete).await {
		Err(ClientError::Configuration(err)) => {
			assert_eq!(err.to_string(), "Missing attributes: payerId, name");
		}
		other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
	}
}
