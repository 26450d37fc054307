//! Typed operation intents, gateway receipts and outcome classification.

use common_utils::Secret;
use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;

use crate::fields::FieldMap;

/// Direct-post message type selecting what the gateway does with the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectPostMessageType {
    Payment,
    PreAuthorization,
    Verification,
}

impl DirectPostMessageType {
    /// Wire code. A wrong code is rejected by the gateway with an
    /// authentication failure, so the mapping is fixed here once.
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Payment => "1",
            Self::PreAuthorization => "2",
            Self::Verification => "3",
        }
    }
}

/// Direct-post payment method codes. Mada rides the card rails with its own
/// code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    MadaCard,
    CreditCard,
    DebitCard,
}

impl PaymentMethod {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::MadaCard => "1",
            Self::CreditCard => "2",
            Self::DebitCard => "3",
        }
    }
}

/// Card data for the server-to-server direct-post call.
///
/// These fields never enter the secure-hash input and must never be logged;
/// every one of them is wrapped in [`Secret`].
#[derive(Clone, Debug)]
pub struct CardDetails {
    pub card_number: Secret<String>,
    pub expiry_month: Secret<String>,
    pub expiry_year: Secret<String>,
    pub security_code: Secret<String>,
    pub card_holder_name: Secret<String>,
}

/// Inputs for preparing the browser direct-post form (no card data; the
/// client appends that itself).
#[derive(Clone, Debug)]
pub struct PaymentPrepareData {
    /// Amount in major currency units.
    pub amount: Decimal,
    pub message_type: DirectPostMessageType,
    pub payment_method: PaymentMethod,
    pub payment_description: Option<String>,
    pub item_id: Option<String>,
}

/// Inputs for the server-to-server direct-post payment.
#[derive(Clone, Debug)]
pub struct DirectPostPaymentData {
    pub amount: Decimal,
    pub message_type: DirectPostMessageType,
    pub payment_method: PaymentMethod,
    pub card: CardDetails,
    pub payment_description: Option<String>,
    pub item_id: Option<String>,
}

/// Inputs for initiating a redirect-model payment.
#[derive(Clone, Debug, Default)]
pub struct RedirectPaymentData {
    pub amount: Decimal,
    /// Payment page language override; settings supply the default.
    pub language: Option<String>,
    pub payment_description: Option<String>,
    pub item_id: Option<String>,
    /// Callback override; settings supply the default.
    pub response_back_url: Option<String>,
    pub generate_token: Option<String>,
    pub token: Option<String>,
    pub agreement_id: Option<String>,
    pub agreement_type: Option<String>,
    pub preferred_payment_method: Option<String>,
}

/// Inputs for a B2B transaction inquiry.
#[derive(Clone, Debug)]
pub struct TransactionInquiryData {
    pub original_transaction_id: String,
    pub include_refund_ids: Option<String>,
}

/// Inputs for a B2B refund, full or partial.
#[derive(Clone, Debug)]
pub struct RefundData {
    pub original_transaction_id: String,
    pub amount: Decimal,
    pub sub_pun: Option<String>,
}

/// A signed, transport-ready form: destination URL plus the completed field
/// map with the secure hash appended.
#[derive(Clone, Debug, Serialize)]
pub struct SignedForm {
    pub endpoint_url: String,
    pub fields: FieldMap,
    pub transaction_id: String,
}

/// Classification of a gateway reply after authentication.
#[derive(Clone, Debug, PartialEq)]
pub enum TransactionOutcome<R> {
    /// Hash verified and the gateway reported the success status.
    Approved(R),
    /// Hash verified but the gateway reported a non-success status. Safe to
    /// surface to end users verbatim.
    Declined {
        status_code: String,
        status_description: String,
        receipt: R,
    },
    /// The gateway rejected the secure hash on the request we sent. This is
    /// a merchant configuration fault (wrong token, field set or ordering),
    /// not a transaction decline.
    RequestSignatureRejected { status_description: String },
    /// The reply failed authentication. Nothing in the payload may be
    /// trusted, including any stated amount or status.
    Tampered { reason: TamperIndication },
}

impl<R> TransactionOutcome<R> {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TamperIndication {
    /// The reply carried no secure hash at all.
    SecureHashMissing,
    /// The recomputed hash did not match the received one.
    SecureHashMismatch,
}

/// Parsed direct-post / redirect payment response fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaymentReceipt {
    pub transaction_id: Option<String>,
    pub merchant_id: Option<String>,
    pub message_id: Option<String>,
    pub amount: Option<String>,
    pub currency_iso_code: Option<String>,
    pub status_code: Option<String>,
    pub status_description: Option<String>,
    pub gateway_status_code: Option<String>,
    pub gateway_status_description: Option<String>,
    pub gateway_name: Option<String>,
    pub approval_code: Option<String>,
    pub rrn: Option<String>,
    /// Masked by the gateway before it reaches us.
    pub masked_card_number: Option<String>,
    pub card_expiry_date: Option<String>,
    pub card_holder_name: Option<String>,
    pub token: Option<String>,
    pub issuer_name: Option<String>,
    pub payment_method: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub processed_at: OffsetDateTime,
}

/// Parsed B2B inquiry response fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InquiryReceipt {
    /// Status of the inquiry message itself; `00000` means the inquiry was
    /// answered. The original transaction's status rides in `status_code`.
    pub message_status: Option<String>,
    pub status_code: Option<String>,
    pub transaction_id: Option<String>,
    pub merchant_id: Option<String>,
    pub message_id: Option<String>,
    pub amount: Option<String>,
    pub currency_iso_code: Option<String>,
    pub authorized_amount: Option<String>,
    pub authorized_currency_iso_code: Option<String>,
    pub reversal_status: Option<String>,
    pub refund_status: Option<String>,
    pub refund_ids: Option<String>,
    pub gateway_status_code: Option<String>,
    pub gateway_status_description: Option<String>,
    pub gateway_name: Option<String>,
    pub approval_code: Option<String>,
    pub rrn: Option<String>,
    pub masked_card_number: Option<String>,
    pub card_expiry_date: Option<String>,
    pub card_holder_name: Option<String>,
    pub issuer_name: Option<String>,
    pub payment_method: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub processed_at: OffsetDateTime,
}

/// Parsed B2B refund response fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RefundReceipt {
    pub refund_transaction_id: Option<String>,
    pub original_transaction_id: Option<String>,
    pub merchant_id: Option<String>,
    pub message_id: Option<String>,
    pub amount: Option<String>,
    pub currency_iso_code: Option<String>,
    pub status_code: Option<String>,
    pub status_description: Option<String>,
    pub sub_pun: Option<String>,
    pub rrn: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub processed_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_post_message_codes_match_the_wire_contract() {
        assert_eq!(DirectPostMessageType::Payment.as_code(), "1");
        assert_eq!(DirectPostMessageType::PreAuthorization.as_code(), "2");
        assert_eq!(DirectPostMessageType::Verification.as_code(), "3");
    }

    #[test]
    fn payment_method_codes_match_the_wire_contract() {
        assert_eq!(PaymentMethod::MadaCard.as_code(), "1");
        assert_eq!(PaymentMethod::CreditCard.as_code(), "2");
        assert_eq!(PaymentMethod::DebitCard.as_code(), "3");
        assert_eq!(PaymentMethod::default(), PaymentMethod::MadaCard);
    }

    #[test]
    fn card_details_debug_output_is_masked() {
        let card = CardDetails {
            card_number: Secret::new("4111111111111111".to_string()),
            expiry_month: Secret::new("07".to_string()),
            expiry_year: Secret::new("29".to_string()),
            security_code: Secret::new("123".to_string()),
            card_holder_name: Secret::new("A CARDHOLDER".to_string()),
        };
        let rendered = format!("{card:?}");
        assert!(!rendered.contains("4111111111111111"));
        assert!(!rendered.contains("123"));
        assert!(!rendered.contains("A CARDHOLDER"));
    }
}
