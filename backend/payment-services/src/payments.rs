//! High-level SmartRoute operations.
//!
//! Each operation is a single pass: validate the intent, build and sign the
//! field map, run at most one HTTP round trip, authenticate the reply and
//! classify it. Nothing is persisted and nothing is retried; replaying a
//! call with the same transaction id is the caller's responsibility to
//! avoid.

use std::time::Duration;

use common_utils::{request::Request, CustomResult};
use connector_integration::Smartroute;
use domain_types::{
    connector_types::{
        DirectPostPaymentData, InquiryReceipt, PaymentPrepareData, PaymentReceipt,
        RedirectPaymentData, RefundData, RefundReceipt, SignedForm, TransactionInquiryData,
        TransactionOutcome,
    },
    errors::{ConnectorError, TransportErrorKind},
    types::GatewaySettings,
};
use error_stack::{report, ResultExt};
use external_services::{call_gateway_api, ApiClientError};

/// The outcome of a server-to-server operation together with the merchant
/// transaction id generated for it. The id is returned even when the reply
/// could not be trusted, so the caller can reconcile later via inquiry.
#[derive(Clone, Debug)]
pub struct AttemptedOperation<R> {
    pub transaction_id: String,
    pub result: TransactionOutcome<R>,
}

/// Caller-facing SmartRoute operations over an immutable configuration.
#[derive(Clone, Debug)]
pub struct PaymentService {
    settings: GatewaySettings,
    connector: Smartroute,
}

impl PaymentService {
    /// Settings are validated once here; operations assume them complete.
    pub fn new(settings: GatewaySettings) -> Result<Self, ConnectorError> {
        settings.validate()?;
        Ok(Self {
            settings,
            connector: Smartroute::new(),
        })
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    /// Signed non-sensitive field set for the browser direct-post form. No
    /// network call; the client posts the form (plus card data) itself.
    pub fn prepare_payment(
        &self,
        data: &PaymentPrepareData,
    ) -> CustomResult<SignedForm, ConnectorError> {
        self.connector.prepare_payment(&self.settings, data)
    }

    /// Server-to-server direct-post payment: one round trip to the gateway.
    pub async fn process_direct_post(
        &self,
        data: &DirectPostPaymentData,
    ) -> CustomResult<AttemptedOperation<PaymentReceipt>, ConnectorError> {
        let (request, transaction_id) = self
            .connector
            .build_direct_post_request(&self.settings, data)?;
        tracing::info!(%transaction_id, "sending direct-post payment to the gateway");
        let body = self.send(request).await?;
        let result = self
            .connector
            .handle_direct_post_response(&self.settings, &body)?;
        Ok(AttemptedOperation {
            transaction_id,
            result,
        })
    }

    /// Signed field set and payment-page URL for the redirect model. The
    /// browser is sent there by the (excluded) web layer.
    pub fn initiate_redirect(
        &self,
        data: &RedirectPaymentData,
    ) -> CustomResult<SignedForm, ConnectorError> {
        self.connector.build_redirect_form(&self.settings, data)
    }

    /// Authenticate and classify the redirect callback body posted back by
    /// the gateway. No network call.
    pub fn handle_callback(
        &self,
        raw_body: &str,
    ) -> CustomResult<TransactionOutcome<PaymentReceipt>, ConnectorError> {
        self.connector
            .handle_redirect_callback(&self.settings, raw_body)
    }

    /// B2B status inquiry for a previous transaction.
    pub async fn inquire(
        &self,
        data: &TransactionInquiryData,
    ) -> CustomResult<TransactionOutcome<InquiryReceipt>, ConnectorError> {
        let request = self.connector.build_inquiry_request(&self.settings, data)?;
        tracing::info!(
            original_transaction_id = %data.original_transaction_id,
            "sending transaction inquiry to the gateway"
        );
        let body = self.send(request).await?;
        self.connector
            .handle_inquiry_response(&self.settings, &body)
    }

    /// B2B refund, full or partial, under a freshly generated refund
    /// transaction id.
    pub async fn refund(
        &self,
        data: &RefundData,
    ) -> CustomResult<AttemptedOperation<RefundReceipt>, ConnectorError> {
        let (request, refund_transaction_id) =
            self.connector.build_refund_request(&self.settings, data)?;
        tracing::info!(
            %refund_transaction_id,
            original_transaction_id = %data.original_transaction_id,
            "sending refund to the gateway"
        );
        let body = self.send(request).await?;
        let result = self
            .connector
            .handle_refund_response(&self.settings, &body)?;
        Ok(AttemptedOperation {
            transaction_id: refund_transaction_id,
            result,
        })
    }

    async fn send(&self, request: Request) -> CustomResult<String, ConnectorError> {
        let timeout = Duration::from_secs(self.settings.http_timeout_secs);
        let reply = call_gateway_api(request, timeout)
            .await
            .map_err(|error| {
                let kind = transport_kind(error.current_context());
                error.change_context(ConnectorError::TransportFailure { kind })
            })?;
        match reply {
            Ok(response) => decode_body(&response.response),
            Err(response) => Err(report!(ConnectorError::TransportFailure {
                kind: TransportErrorKind::HttpStatus(response.status_code),
            })),
        }
    }
}

fn transport_kind(error: &ApiClientError) -> TransportErrorKind {
    match error {
        ApiClientError::RequestTimeoutReceived => TransportErrorKind::Timeout,
        ApiClientError::ConnectionFailed => TransportErrorKind::ConnectionFailure,
        ApiClientError::UrlEncodingFailed
        | ApiClientError::ClientConstructionFailed
        | ApiClientError::RequestNotSent(_)
        | ApiClientError::ResponseDecodingFailed
        | ApiClientError::UnexpectedServerResponse => TransportErrorKind::RequestFailure,
    }
}

// Some gateway deployments prefix the body with a UTF-8 BOM; strip it before
// parsing.
fn decode_body(bytes: &[u8]) -> CustomResult<String, ConnectorError> {
    let body = std::str::from_utf8(bytes)
        .change_context(ConnectorError::ResponseDeserializationFailed)?;
    Ok(body.trim_start_matches('\u{feff}').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_kinds_fold_the_client_error_taxonomy() {
        assert_eq!(
            transport_kind(&ApiClientError::RequestTimeoutReceived),
            TransportErrorKind::Timeout
        );
        assert_eq!(
            transport_kind(&ApiClientError::ConnectionFailed),
            TransportErrorKind::ConnectionFailure
        );
        assert_eq!(
            transport_kind(&ApiClientError::RequestNotSent("tls".to_string())),
            TransportErrorKind::RequestFailure
        );
    }

    #[test]
    fn body_decoding_strips_a_leading_bom() {
        let body = decode_body("\u{feff}Response.StatusCode=00000".as_bytes())
            .expect("decoded body");
        assert_eq!(body, "Response.StatusCode=00000");
    }
}
