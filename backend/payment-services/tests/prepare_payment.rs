//! Direct-post preparation: the signed field set handed to the browser must
//! verify, exclude card data, and reject invalid amounts up front.

use common_utils::Secret;
use connector_integration::connectors::smartroute::{
    constants, secure_hash, secure_hash::SecureHashProfile,
};
use domain_types::{
    connector_types::{DirectPostMessageType, PaymentMethod, PaymentPrepareData},
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
        "theme_id": "THEME01"
    }))
    .expect("test settings");
    PaymentService::new(settings).expect("validated service")
}

fn prepare_data(amount: &str) -> PaymentPrepareData {
    PaymentPrepareData {
        amount: amount.parse().expect("decimal literal"),
        message_type: DirectPostMessageType::Payment,
        payment_method: PaymentMethod::MadaCard,
        payment_description: None,
        item_id: Some("BOOK-7".to_string()),
    }
}

#[test]
fn prepared_form_contains_the_signed_configured_fields() {
    let service = service();
    let form = service
        .prepare_payment(&prepare_data("50.00"))
        .expect("prepared form");

    assert_eq!(form.endpoint_url, "https://gateway.example/SRPayMsgHandler");
    assert_eq!(form.fields.get(constants::AMOUNT), Some("5000"));
    assert_eq!(form.fields.get(constants::MESSAGE_ID), Some("1"));
    assert_eq!(form.fields.get(constants::THEME_ID), Some("THEME01"));
    assert_eq!(form.fields.get(constants::ITEM_ID), Some("BOOK-7"));
    assert_eq!(form.fields.get(constants::QUANTITY), Some("1"));
    assert_eq!(form.fields.get(constants::CHANNEL), Some("0"));

    // Card data never passes through preparation.
    for card_field in [
        constants::CARD_NUMBER,
        constants::EXPIRY_DATE_MONTH,
        constants::EXPIRY_DATE_YEAR,
        constants::SECURITY_CODE,
        constants::CARD_HOLDER_NAME,
    ] {
        assert!(!form.fields.contains_key(card_field));
    }

    let token = Secret::new(TEST_TOKEN.to_string());
    let received = form
        .fields
        .get(constants::SECURE_HASH)
        .expect("hash appended")
        .to_string();
    assert!(
        secure_hash::verify(&form.fields, &received, &token, SecureHashProfile::DirectPost)
            .expect("verify")
    );
}

#[test]
fn each_preparation_gets_a_fresh_transaction_id() {
    let service = service();
    let first = service.prepare_payment(&prepare_data("50.00")).expect("form");
    let second = service.prepare_payment(&prepare_data("50.00")).expect("form");
    assert_ne!(first.transaction_id, second.transaction_id);
}

#[test]
fn pre_authorization_and_verification_use_their_own_codes() {
    let service = service();
    let mut data = prepare_data("50.00");

    data.message_type = DirectPostMessageType::PreAuthorization;
    let form = service.prepare_payment(&data).expect("form");
    assert_eq!(form.fields.get(constants::MESSAGE_ID), Some("2"));

    data.message_type = DirectPostMessageType::Verification;
    let form = service.prepare_payment(&data).expect("form");
    assert_eq!(form.fields.get(constants::MESSAGE_ID), Some("3"));
}

#[test]
fn non_positive_amounts_never_reach_signing() {
    let service = service();
    assert!(service.prepare_payment(&prepare_data("0")).is_err());
    assert!(service.prepare_payment(&prepare_data("-12.50")).is_err());
}
