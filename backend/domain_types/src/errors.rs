//! Connector error taxonomy.

/// Failures surfaced to callers of the connector. Nothing here is fatal at
/// the process level; every operation returns one of these as a typed result.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("Failed to deserialize gateway response")]
    ResponseDeserializationFailed,
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Invalid data format for field: {field_name}")]
    InvalidDataFormat { field_name: &'static str },
    #[error("Merchant configuration is incomplete: {field_name}")]
    IncompleteMerchantConfiguration { field_name: &'static str },
    #[error("Failed to compute the request secure hash")]
    SecureHashGenerationFailed,
    #[error("Gateway transport failure: {kind}")]
    TransportFailure { kind: TransportErrorKind },
}

/// Transport failures folded into [`ConnectorError::TransportFailure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TransportErrorKind {
    /// The connection could not be established (includes DNS failures).
    ConnectionFailure,
    /// The request did not complete within the configured timeout.
    Timeout,
    /// The gateway answered with a non-success HTTP status.
    #[strum(to_string = "http_status_{0}")]
    HttpStatus(u16),
    /// The request could not be sent or its reply could not be read.
    RequestFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_kind_display_includes_http_status() {
        assert_eq!(TransportErrorKind::HttpStatus(503).to_string(), "http_status_503");
        assert_eq!(TransportErrorKind::Timeout.to_string(), "timeout");
    }
}
