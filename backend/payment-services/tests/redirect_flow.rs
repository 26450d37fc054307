//! End-to-end redirect-model flow without a network: initiate the payment,
//! then feed the service a gateway-style signed callback body.

use common_utils::Secret;
use connector_integration::connectors::smartroute::{
    constants, secure_hash, secure_hash::SecureHashProfile,
};
use domain_types::{
    connector_types::{RedirectPaymentData, TamperIndication, TransactionOutcome},
    fields::FieldMap,
    types::GatewaySettings,
};
use payment_services::PaymentService;

const TEST_TOKEN: &str = "TESTTOKEN123";

fn service() -> PaymentService {
    let settings: GatewaySettings = serde_json::from_value(serde_json::json!({
        "direct_post_url": "https://gateway.example/SRPayMsgHandler",
        "payment_page_url": "https://gateway.example/SmartRoutePaymentWeb/SRPayMsgHandler",
        "inquiry_url": "https://gateway.example/SRPayMsgHandler",
        "refund_url": "https://gateway.example/SRPayMsgHandler",
        "merchant_id": "MERCHANT001",
        "authentication_token": TEST_TOKEN,
        "currency_iso_code": "682",
        "response_back_url": "https://merchant.example/api/payment/callback"
    }))
    .expect("test settings");
    PaymentService::new(settings).expect("validated service")
}

/// Build the callback body the way the gateway does: values percent-encoded
/// on the wire, descriptions hashed in their encoded form.
fn callback_body(pairs: &[(&str, &str)]) -> String {
    let token = Secret::new(TEST_TOKEN.to_string());
    let mut for_hash = FieldMap::new();
    for (name, value) in pairs {
        let hashed_value = if name.eq_ignore_ascii_case(constants::RESPONSE_STATUS_DESCRIPTION)
            || name.eq_ignore_ascii_case(constants::RESPONSE_GATEWAY_STATUS_DESCRIPTION)
        {
            secure_hash::form_url_encode(value)
        } else {
            (*value).to_string()
        };
        for_hash.insert(*name, hashed_value);
    }
    let hash =
        secure_hash::generate(&for_hash, &token, SecureHashProfile::RedirectB2b).expect("hash");

    let mut encoded: Vec<String> = pairs
        .iter()
        .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
        .collect();
    encoded.push(format!("{}={hash}", constants::RESPONSE_SECURE_HASH));
    encoded.join("&")
}

fn payment_intent(amount: &str) -> RedirectPaymentData {
    RedirectPaymentData {
        amount: amount.parse().expect("decimal literal"),
        payment_description: Some("Order 42".to_string()),
        ..Default::default()
    }
}

#[test]
fn initiation_produces_a_verifiable_signed_form() {
    let service = service();
    let form = service
        .initiate_redirect(&payment_intent("100.50"))
        .expect("signed form");

    assert_eq!(
        form.endpoint_url,
        "https://gateway.example/SmartRoutePaymentWeb/SRPayMsgHandler"
    );
    assert_eq!(form.fields.get(constants::AMOUNT), Some("10050"));
    assert_eq!(form.fields.get(constants::MESSAGE_ID), Some("1"));

    let token = Secret::new(TEST_TOKEN.to_string());
    let received = form
        .fields
        .get(constants::SECURE_HASH)
        .expect("hash appended")
        .to_string();
    assert!(
        secure_hash::verify(&form.fields, &received, &token, SecureHashProfile::RedirectB2b)
            .expect("verify")
    );
}

#[test]
fn a_signed_success_callback_is_approved() {
    let service = service();
    let body = callback_body(&[
        (constants::RESPONSE_STATUS_CODE, "00000"),
        (constants::RESPONSE_STATUS_DESCRIPTION, "Approved Successfully"),
        (constants::RESPONSE_AMOUNT, "10050"),
        (constants::RESPONSE_CURRENCY_ISO_CODE, "682"),
        (constants::RESPONSE_MERCHANT_ID, "MERCHANT001"),
        (constants::RESPONSE_TRANSACTION_ID, "17298765432101234567"),
        (constants::RESPONSE_CARD_NUMBER, "411111******1111"),
    ]);

    let outcome = service.handle_callback(&body).expect("classified");
    match outcome {
        TransactionOutcome::Approved(receipt) => {
            assert_eq!(receipt.amount.as_deref(), Some("10050"));
            assert_eq!(receipt.masked_card_number.as_deref(), Some("411111******1111"));
        }
        other => panic!("expected approval, got {other:?}"),
    }
}

#[test]
fn a_flipped_character_in_the_callback_is_tampering() {
    let service = service();
    let body = callback_body(&[
        (constants::RESPONSE_STATUS_CODE, "00000"),
        (constants::RESPONSE_AMOUNT, "10050"),
    ]);
    let tampered = body.replace("Response.Amount=10050", "Response.Amount=19050");

    let outcome = service.handle_callback(&tampered).expect("classified");
    assert_eq!(
        outcome,
        TransactionOutcome::Tampered {
            reason: TamperIndication::SecureHashMismatch
        }
    );
}

#[test]
fn a_callback_without_a_hash_is_tampering() {
    let service = service();
    let outcome = service
        .handle_callback("Response.StatusCode=00000&Response.Amount=10050")
        .expect("classified");
    assert_eq!(
        outcome,
        TransactionOutcome::Tampered {
            reason: TamperIndication::SecureHashMissing
        }
    );
}

#[test]
fn a_declined_callback_keeps_its_gateway_description() {
    let service = service();
    let body = callback_body(&[
        (constants::RESPONSE_STATUS_CODE, "00002"),
        (constants::RESPONSE_STATUS_DESCRIPTION, "Declined by issuer"),
        (constants::RESPONSE_GATEWAY_STATUS_DESCRIPTION, "DO NOT HONOR"),
    ]);

    let outcome = service.handle_callback(&body).expect("classified");
    match outcome {
        TransactionOutcome::Declined {
            status_code,
            status_description,
            receipt,
        } => {
            assert_eq!(status_code, "00002");
            assert_eq!(status_description, "Declined by issuer");
            assert_eq!(
                receipt.gateway_status_description.as_deref(),
                Some("DO NOT HONOR")
            );
        }
        other => panic!("expected decline, got {other:?}"),
    }
}
