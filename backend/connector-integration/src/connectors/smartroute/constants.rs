//! SmartRoute wire constants.

// Request field names.
pub const MERCHANT_ID: &str = "MerchantID";
pub const TRANSACTION_ID: &str = "TransactionID";
pub const AMOUNT: &str = "Amount";
pub const CURRENCY_ISO_CODE: &str = "CurrencyISOCode";
pub const MESSAGE_ID: &str = "MessageID";
pub const QUANTITY: &str = "Quantity";
pub const CHANNEL: &str = "Channel";
pub const PAYMENT_METHOD: &str = "PaymentMethod";
pub const LANGUAGE: &str = "Language";
pub const THEME_ID: &str = "ThemeID";
pub const VERSION: &str = "Version";
pub const PAYMENT_DESCRIPTION: &str = "PaymentDescription";
pub const ITEM_ID: &str = "ItemID";
pub const RESPONSE_BACK_URL: &str = "ResponseBackURL";
pub const FAILED_PAYMENT_REPLY_URL: &str = "FailedPaymentReplyURL";
pub const ORIGINAL_TRANSACTION_ID: &str = "OriginalTransactionID";
pub const SUB_PUN: &str = "SubPUN";
pub const INCLUDE_REFUND_IDS: &str = "IncludeRefundIds";
pub const GENERATE_TOKEN: &str = "GenerateToken";
pub const TOKEN: &str = "Token";
pub const AGREEMENT_ID: &str = "AgreementID";
pub const AGREEMENT_TYPE: &str = "AgreementType";
pub const PREFERRED_PAYMENT_METHOD: &str = "PreferredPaymentMethod";
pub const SECURE_HASH: &str = "SecureHash";

// Card fields, carried on the direct-post form but never signed.
pub const CARD_NUMBER: &str = "CardNumber";
pub const EXPIRY_DATE_YEAR: &str = "ExpiryDateYear";
pub const EXPIRY_DATE_MONTH: &str = "ExpiryDateMonth";
pub const SECURITY_CODE: &str = "SecurityCode";
pub const CARD_HOLDER_NAME: &str = "CardHolderName";

// Response fields are namespaced under this prefix, distinguishing them from
// echoed request fields.
pub const RESPONSE_PREFIX: &str = "Response.";

pub const RESPONSE_SECURE_HASH: &str = "Response.SecureHash";
pub const RESPONSE_STATUS_CODE: &str = "Response.StatusCode";
pub const RESPONSE_STATUS_DESCRIPTION: &str = "Response.StatusDescription";
pub const RESPONSE_GATEWAY_STATUS_CODE: &str = "Response.GatewayStatusCode";
pub const RESPONSE_GATEWAY_STATUS_DESCRIPTION: &str = "Response.GatewayStatusDescription";
pub const RESPONSE_MESSAGE_STATUS: &str = "Response.MessageStatus";
pub const RESPONSE_AMOUNT: &str = "Response.Amount";
pub const RESPONSE_CURRENCY_ISO_CODE: &str = "Response.CurrencyISOCode";
pub const RESPONSE_MERCHANT_ID: &str = "Response.MerchantID";
pub const RESPONSE_TRANSACTION_ID: &str = "Response.TransactionID";
pub const RESPONSE_MESSAGE_ID: &str = "Response.MessageID";
pub const RESPONSE_APPROVAL_CODE: &str = "Response.ApprovalCode";
pub const RESPONSE_RRN: &str = "Response.RRN";
pub const RESPONSE_CARD_NUMBER: &str = "Response.CardNumber";
pub const RESPONSE_CARD_EXPIRY_DATE: &str = "Response.CardExpiryDate";
pub const RESPONSE_CARD_HOLDER_NAME: &str = "Response.CardHolderName";
pub const RESPONSE_GATEWAY_NAME: &str = "Response.GatewayName";
pub const RESPONSE_TOKEN: &str = "Response.Token";
pub const RESPONSE_ISSUER_NAME: &str = "Response.IssuerName";
pub const RESPONSE_PAYMENT_METHOD: &str = "Response.PaymentMethod";
pub const RESPONSE_REVERSAL_STATUS: &str = "Response.ReversalStatus";
pub const RESPONSE_REFUND_STATUS: &str = "Response.RefundStatus";
pub const RESPONSE_REFUND_IDS: &str = "Response.RefundIds";
pub const RESPONSE_AUTHORIZED_AMOUNT: &str = "Response.AuthorizedAmount";
pub const RESPONSE_AUTHORIZED_CURRENCY_ISO_CODE: &str = "Response.AuthorizedCurrencyISOCode";
pub const RESPONSE_SUB_PUN: &str = "Response.SubPUN";
pub const RESPONSE_ORIGINAL_TRANSACTION_ID: &str = "Response.OriginalTransactionID";

// Message type codes for the redirect and B2B models. Direct-post codes live
// on `DirectPostMessageType`.
pub const MESSAGE_ID_REDIRECT_PAYMENT: &str = "1";
pub const MESSAGE_ID_INQUIRY: &str = "2";
pub const MESSAGE_ID_REFUND: &str = "4";

/// Success status, on `Response.StatusCode` for payment and refund replies
/// and on `Response.MessageStatus` for inquiry replies.
pub const STATUS_SUCCESS: &str = "00000";

/// The gateway rejected the secure hash on the request it received from us.
pub const STATUS_REQUEST_HASH_REJECTED: &str = "00018";
