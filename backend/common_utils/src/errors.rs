//! Error kinds shared across the workspace.

/// A `Result` whose error variant is wrapped in an [`error_stack::Report`],
/// allowing context to be attached as errors cross crate boundaries.
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Failure to interpret a value in an expected format.
#[derive(Debug, thiserror::Error)]
#[error("Parsing error")]
pub struct ParsingError;

/// Caller-input validation failures, rejected before any network call.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: String },
    #[error("Incorrect value provided for field: {field_name}")]
    IncorrectValueProvided { field_name: &'static str },
    #[error("{message}")]
    InvalidValue { message: String },
}

/// Cryptographic primitive failures.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Failed to encode given message")]
    EncodingFailed,
    #[error("Failed to sign message")]
    MessageSigningFailed,
    #[error("Failed to verify signature")]
    SignatureVerificationFailed,
}
