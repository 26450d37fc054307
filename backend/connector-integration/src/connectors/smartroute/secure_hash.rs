//! Canonical secure-hash generation and verification.
//!
//! The gateway signs `token ‖ v1 ‖ v2 ‖ … ‖ vN`: the signable field values
//! concatenated in byte-wise key order with NO separators, hashed with
//! SHA-256 and rendered as lowercase hex. The missing separators are part of
//! the gateway contract; adding any would break interoperability, so the
//! known key/value reshuffling collisions of this scheme are preserved
//! as-is.

use common_utils::{
    crypto::{GenerateDigest, Sha256},
    CustomResult, PeekInterface, Secret,
};
use domain_types::{errors::ConnectorError, fields::FieldMap};
use error_stack::{report, ResultExt};

use super::constants;

/// Which fields stay out of the signable subset.
///
/// The same profile must be used for signing a request and verifying the
/// matching response, or the round trip cannot be consistent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecureHashProfile {
    /// Browser direct-post messages: the hash field and the five raw card
    /// fields never enter the hash input.
    DirectPost,
    /// Redirect and B2B messages: only the hash field itself is excluded.
    RedirectB2b,
}

const DIRECT_POST_EXCLUDED_FIELDS: [&str; 5] = [
    constants::CARD_NUMBER,
    constants::EXPIRY_DATE_YEAR,
    constants::EXPIRY_DATE_MONTH,
    constants::SECURITY_CODE,
    constants::CARD_HOLDER_NAME,
];

impl SecureHashProfile {
    // Exclusion matching is ASCII case-insensitive, per the gateway contract.
    fn is_excluded(self, name: &str) -> bool {
        if name.eq_ignore_ascii_case(constants::SECURE_HASH)
            || name.eq_ignore_ascii_case(constants::RESPONSE_SECURE_HASH)
        {
            return true;
        }
        match self {
            Self::DirectPost => DIRECT_POST_EXCLUDED_FIELDS
                .iter()
                .any(|field| field.eq_ignore_ascii_case(name)),
            Self::RedirectB2b => false,
        }
    }
}

/// Compute the secure hash over the signable subset of `fields`.
pub fn generate(
    fields: &FieldMap,
    token: &Secret<String>,
    profile: SecureHashProfile,
) -> CustomResult<String, ConnectorError> {
    if fields.is_empty() {
        return Err(report!(ConnectorError::SecureHashGenerationFailed))
            .attach_printable("no fields available for hash generation");
    }
    let token = token.peek();
    if token.trim().is_empty() {
        return Err(report!(ConnectorError::IncompleteMerchantConfiguration {
            field_name: "authentication_token",
        }));
    }

    let mut input = String::from(token.as_str());
    for (name, value) in fields.iter() {
        if !profile.is_excluded(name) {
            input.push_str(value);
        }
    }

    let digest = Sha256
        .generate_digest(input.as_bytes())
        .change_context(ConnectorError::SecureHashGenerationFailed)?;
    Ok(hex::encode(digest))
}

/// Verify a received hash against the signable subset of `fields`.
///
/// Fails closed: an empty received hash never verifies. Comparison is ASCII
/// case-insensitive since the gateway has emitted both casings historically.
pub fn verify(
    fields: &FieldMap,
    received: &str,
    token: &Secret<String>,
    profile: SecureHashProfile,
) -> CustomResult<bool, ConnectorError> {
    if received.trim().is_empty() {
        return Ok(false);
    }
    let expected = generate(fields, token, profile)?;
    Ok(expected.eq_ignore_ascii_case(received))
}

/// Re-encode the two human-readable description fields before verification.
///
/// The gateway signs the percent-encoded form of `Response.StatusDescription`
/// and `Response.GatewayStatusDescription`, not the decoded text, so the
/// decoded values must be put back into encoded form for the hash input.
pub fn encode_descriptions_for_verification(fields: &FieldMap) -> FieldMap {
    fields
        .iter()
        .map(|(name, value)| {
            let value = if name.eq_ignore_ascii_case(constants::RESPONSE_STATUS_DESCRIPTION)
                || name.eq_ignore_ascii_case(constants::RESPONSE_GATEWAY_STATUS_DESCRIPTION)
            {
                form_url_encode(value)
            } else {
                value.to_string()
            };
            (name.to_string(), value)
        })
        .collect()
}

/// Percent-encode a value the way the gateway does before signing: UTF-8
/// bytes, space as `+`, lowercase hex escapes, with `a-z A-Z 0-9 - _ . ! * (
/// )` left literal.
pub fn form_url_encode(value: &str) -> String {
    use std::fmt::Write;

    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'!' | b'*' | b'('
            | b')' => encoded.push(char::from(byte)),
            b' ' => encoded.push('+'),
            _ => {
                let _ = write!(encoded, "%{byte:02x}");
            }
        }
    }
    encoded
}
