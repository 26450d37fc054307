
pub mod constants;
pub mod secure_hash;
pub mod transformers;

use common_utils::{
    generate_transaction_reference_id,
    request::{Request, RequestContent},
    CustomResult,
};
use domain_types::{
    connector_types::{
        DirectPostPaymentData, InquiryReceipt, PaymentPrepareData, PaymentReceipt,
        RedirectPaymentData, RefundData, RefundReceipt, SignedForm, TransactionInquiryData,
        TransactionOutcome,
    },
    errors::ConnectorError,
    fields::FieldMap,
    types::GatewaySettings,
};

use self::secure_hash::SecureHashProfile;

/// SmartRoute gateway connector.
///
/// Builds signed field maps for the direct-post, redirect and B2B message
/// shapes and authenticates the gateway's replies. Transport is the HTTP
/// layer's concern; everything here is pure computation over the settings
/// and the caller's intent.
#[derive(Clone, Copy, Debug, Default)]
pub struct Smartroute;

impl Smartroute {
    pub fn new() -> Self {
        Self
    }

    /// Signed non-sensitive field set for the browser direct-post form.
    pub fn prepare_payment(
        &self,
        settings: &GatewaySettings,
        data: &PaymentPrepareData,
    ) -> CustomResult<SignedForm, ConnectorError> {
        let transaction_id = generate_transaction_reference_id();
        let fields = transformers::build_prepare_payment_fields(settings, data, &transaction_id)?;
        Ok(SignedForm {
            endpoint_url: settings.direct_post_url.to_string(),
            fields,
            transaction_id,
        })
    }

    /// Transport-ready server-to-server direct-post request, together with
    /// the transaction id generated for it.
    pub fn build_direct_post_request(
        &self,
        settings: &GatewaySettings,
        data: &DirectPostPaymentData,
    ) -> CustomResult<(Request, String), ConnectorError> {
        let transaction_id = generate_transaction_reference_id();
        let fields = transformers::build_direct_post_fields(settings, data, &transaction_id)?;
        Ok((
            form_request(settings.direct_post_url.as_str(), fields),
            transaction_id,
        ))
    }

    /// Signed field set for the redirect-model payment page.
    pub fn build_redirect_form(
        &self,
        settings: &GatewaySettings,
        data: &RedirectPaymentData,
    ) -> CustomResult<SignedForm, ConnectorError> {
        let transaction_id = generate_transaction_reference_id();
        let fields = transformers::build_redirect_fields(settings, data, &transaction_id)?;
        Ok(SignedForm {
            endpoint_url: settings.payment_page_url.to_string(),
            fields,
            transaction_id,
        })
    }

    /// Transport-ready B2B inquiry request.
    pub fn build_inquiry_request(
        &self,
        settings: &GatewaySettings,
        data: &TransactionInquiryData,
    ) -> CustomResult<Request, ConnectorError> {
        let fields = transformers::build_inquiry_fields(settings, data)?;
        Ok(form_request(settings.inquiry_url.as_str(), fields))
    }

    /// Transport-ready B2B refund request, together with the refund
    /// transaction id generated for it.
    pub fn build_refund_request(
        &self,
        settings: &GatewaySettings,
        data: &RefundData,
    ) -> CustomResult<(Request, String), ConnectorError> {
        let refund_transaction_id = generate_transaction_reference_id();
        let fields = transformers::build_refund_fields(settings, data, &refund_transaction_id)?;
        Ok((
            form_request(settings.refund_url.as_str(), fields),
            refund_transaction_id,
        ))
    }

    /// Authenticate and classify a direct-post response body.
    pub fn handle_direct_post_response(
        &self,
        settings: &GatewaySettings,
        body: &str,
    ) -> CustomResult<TransactionOutcome<PaymentReceipt>, ConnectorError> {
        let fields = transformers::parse_response_fields(body);
        transformers::classify_response(
            &fields,
            settings,
            SecureHashProfile::DirectPost,
            constants::RESPONSE_STATUS_CODE,
            transformers::payment_receipt_from_fields,
        )
    }

    /// Authenticate and classify the redirect callback body.
    pub fn handle_redirect_callback(
        &self,
        settings: &GatewaySettings,
        body: &str,
    ) -> CustomResult<TransactionOutcome<PaymentReceipt>, ConnectorError> {
        let fields = transformers::parse_response_fields(body);
        transformers::classify_response(
            &fields,
            settings,
            SecureHashProfile::RedirectB2b,
            constants::RESPONSE_STATUS_CODE,
            transformers::payment_receipt_from_fields,
        )
    }

    /// Authenticate and classify a B2B inquiry response body. The success
    /// sentinel is the message status; the transaction's own status rides in
    /// the receipt.
    pub fn handle_inquiry_response(
        &self,
        settings: &GatewaySettings,
        body: &str,
    ) -> CustomResult<TransactionOutcome<InquiryReceipt>, ConnectorError> {
        let fields = transformers::parse_response_fields(body);
        transformers::classify_response(
            &fields,
            settings,
            SecureHashProfile::RedirectB2b,
            constants::RESPONSE_MESSAGE_STATUS,
            transformers::inquiry_receipt_from_fields,
        )
    }

    /// Authenticate and classify a B2B refund response body.
    pub fn handle_refund_response(
        &self,
        settings: &GatewaySettings,
        body: &str,
    ) -> CustomResult<TransactionOutcome<RefundReceipt>, ConnectorError> {
        let fields = transformers::parse_response_fields(body);
        transformers::classify_response(
            &fields,
            settings,
            SecureHashProfile::RedirectB2b,
            constants::RESPONSE_STATUS_CODE,
            transformers::refund_receipt_from_fields,
        )
    }
}

fn form_request(url: &str, fields: FieldMap) -> Request {
    Request::post(url).set_body(RequestContent::FormUrlEncoded(fields.into_pairs()))
}
