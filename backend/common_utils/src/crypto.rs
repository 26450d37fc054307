//! Digest primitives used by the connector's signing layer.

use crate::errors::{self, CustomResult};

/// Trait for generating a digest for a message.
pub trait GenerateDigest {
    /// Takes a message and creates a digest for it.
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, errors::CryptoError>;
}

/// Trait for verifying a message digest against a received signature.
pub trait VerifySignature {
    /// Takes the signature and the message and verifies the message against
    /// the signature.
    fn verify_signature(
        &self,
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, errors::CryptoError>;
}

/// Blanket type for SHA-256.
#[derive(Debug)]
pub struct Sha256;

impl GenerateDigest for Sha256 {
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, errors::CryptoError> {
        let digest = ring::digest::digest(&ring::digest::SHA256, message);
        Ok(digest.as_ref().to_vec())
    }
}

impl VerifySignature for Sha256 {
    fn verify_signature(
        &self,
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, errors::CryptoError> {
        use error_stack::ResultExt;

        let digest = self
            .generate_digest(msg)
            .change_context(errors::CryptoError::SignatureVerificationFailed)?;
        Ok(digest.as_slice() == signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_digest_of_empty_input_matches_known_vector() {
        let digest = Sha256.generate_digest(b"").expect("digest");
        assert_eq!(
            hex::encode(digest),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_verify_accepts_matching_digest() {
        let digest = Sha256.generate_digest(b"abc").expect("digest");
        assert!(Sha256.verify_signature(&digest, b"abc").expect("verify"));
        assert!(!Sha256.verify_signature(&digest, b"abd").expect("verify"));
    }
}
