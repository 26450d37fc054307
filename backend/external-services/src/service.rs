//! Outbound HTTP calls to the gateway.

use std::time::Duration;

use bytes::Bytes;
use common_utils::{
    request::{Method, Request, RequestContent},
    CustomResult,
};
use error_stack::{report, ResultExt};
use once_cell::sync::OnceCell;
use reqwest::Client;

/// A raw gateway reply: status plus the undecoded body.
#[derive(Clone, Debug)]
pub struct Response {
    pub status_code: u16,
    pub response: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("URL encoding of the request failed")]
    UrlEncodingFailed,
    #[error("Failed to construct the HTTP client")]
    ClientConstructionFailed,
    #[error("Connection to the gateway failed")]
    ConnectionFailed,
    #[error("Request timed out")]
    RequestTimeoutReceived,
    #[error("Unable to send request to the gateway: {0}")]
    RequestNotSent(String),
    #[error("Failed to decode gateway response")]
    ResponseDecodingFailed,
    #[error("The gateway returned an unexpected response")]
    UnexpectedServerResponse,
}

static HTTP_CLIENT: OnceCell<Client> = OnceCell::new();

fn get_client() -> CustomResult<Client, ApiClientError> {
    Ok(HTTP_CLIENT
        .get_or_try_init(|| {
            Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .change_context(ApiClientError::ClientConstructionFailed)
        })?
        .clone())
}

/// POST the signed form to the gateway and return the raw reply.
///
/// Success statuses come back as `Ok(Ok)`; non-success HTTP statuses come
/// back as `Ok(Err)` so callers can classify them without losing the body.
/// No retries happen here; retry policy belongs to the caller.
pub async fn call_gateway_api(
    request: Request,
    timeout: Duration,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let url =
        reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;
    let client = get_client()?;

    let request_builder = match request.method {
        Method::Post => client.post(url),
        Method::Get => client.get(url),
    };
    let request_builder = match request.body {
        Some(RequestContent::FormUrlEncoded(ref pairs)) => request_builder.form(pairs),
        None => request_builder,
    };

    let start = std::time::Instant::now();
    let response = request_builder
        .timeout(timeout)
        .send()
        .await
        .map_err(|error| {
            let api_error = if error.is_timeout() {
                ApiClientError::RequestTimeoutReceived
            } else if error.is_connect() {
                ApiClientError::ConnectionFailed
            } else {
                ApiClientError::RequestNotSent(error.to_string())
            };
            tracing::error!(url = %request.url, "unable to send request to the gateway");
            report!(api_error)
        })?;

    let status_code = response.status().as_u16();
    tracing::info!(
        url = %request.url,
        status_code,
        latency_ms = start.elapsed().as_millis() as u64,
        "outgoing gateway request completed"
    );

    match status_code {
        200..=202 | 204 | 302 => {
            let body = response
                .bytes()
                .await
                .change_context(ApiClientError::ResponseDecodingFailed)?;
            Ok(Ok(Response {
                status_code,
                response: body,
            }))
        }
        400..=599 => {
            let body = response
                .bytes()
                .await
                .change_context(ApiClientError::ResponseDecodingFailed)?;
            Ok(Err(Response {
                status_code,
                response: body,
            }))
        }
        _ => Err(report!(ApiClientError::UnexpectedServerResponse)),
    }
}
