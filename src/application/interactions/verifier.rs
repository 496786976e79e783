//! Request signature verification
//!
//! Interactions are signed with the application's Ed25519 key over
//! `timestamp || body`. Verification always runs on the bytes exactly as they
//! arrived; the body is never parsed and re-serialized first.

use ed25519_dalek::{Signature, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

use crate::application::errors::ConfigError;

/// Hex-encoded detached signature header
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
/// Signing timestamp header
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Inbound request exactly as received on the wire
#[derive(Debug, Clone)]
pub struct RawRequest {
    pub body: Vec<u8>,
    pub signature: Option<String>,
    pub timestamp: Option<String>,
}

impl RawRequest {
    pub fn new(body: impl Into<Vec<u8>>, signature: Option<String>, timestamp: Option<String>) -> Self {
        Self {
            body: body.into(),
            signature,
            timestamp,
        }
    }
}

/// Request body that passed signature verification.
///
/// Only [`SignatureVerifier::verify`] can construct one.
#[derive(Debug)]
pub struct VerifiedPayload {
    body: Vec<u8>,
}

impl VerifiedPayload {
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }
}

/// Verifies interaction signatures against the application public key
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    pub fn new(key: VerifyingKey) -> Self {
        Self { key }
    }

    /// Parse a hex-encoded public key
    pub fn from_hex(public_key: &str) -> Result<Self, ConfigError> {
        let raw = hex::decode(public_key.trim())
            .map_err(|e| ConfigError::InvalidValue(format!("public key is not valid hex: {}", e)))?;
        let bytes = <[u8; PUBLIC_KEY_LENGTH]>::try_from(raw.as_slice()).map_err(|_| {
            ConfigError::InvalidValue(format!(
                "public key must be {} bytes, got {}",
                PUBLIC_KEY_LENGTH,
                raw.len()
            ))
        })?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| ConfigError::InvalidValue(format!("invalid Ed25519 public key: {}", e)))?;
        Ok(Self { key })
    }

    /// Consume a raw request, yielding its body only if the signature holds.
    ///
    /// A missing header fails closed without any cryptographic work.
    pub fn verify(&self, request: RawRequest) -> Option<VerifiedPayload> {
        let (Some(signature), Some(timestamp)) = (request.signature.as_deref(), request.timestamp.as_deref()) else {
            return None;
        };
        if !self.is_valid(timestamp, &request.body, signature) {
            return None;
        }
        Some(VerifiedPayload { body: request.body })
    }

    /// Check a hex signature over `timestamp || body`
    pub fn is_valid(&self, timestamp: &str, body: &[u8], signature_hex: &str) -> bool {
        let Ok(raw) = hex::decode(signature_hex.trim()) else {
            return false;
        };
        let Ok(bytes) = <[u8; SIGNATURE_LENGTH]>::try_from(raw.as_slice()) else {
            return false;
        };
        let signature = Signature::from_bytes(&bytes);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key.verify_strict(&message, &signature).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    const TIMESTAMP: &str = "1700000000";
    const BODY: &[u8] = br#"{"type":1,"id":"123","application_id":"456"}"#;

    fn signing_key(seed: u8) -> SigningKey {
        SigningKey::from_bytes(&[seed; 32])
    }

    fn sign(key: &SigningKey, timestamp: &str, body: &[u8]) -> String {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        hex::encode(key.sign(&message).to_bytes())
    }

    fn verifier(key: &SigningKey) -> SignatureVerifier {
        SignatureVerifier::from_hex(&hex::encode(key.verifying_key().to_bytes())).expect("valid key")
    }

    #[test]
    fn test_valid_signature_verifies() {
        let key = signing_key(7);
        let signature = sign(&key, TIMESTAMP, BODY);

        assert!(verifier(&key).is_valid(TIMESTAMP, BODY, &signature));

        let request = RawRequest::new(BODY, Some(signature), Some(TIMESTAMP.to_string()));
        let payload = verifier(&key).verify(request).expect("verified");
        assert_eq!(payload.bytes(), BODY);
    }

    #[test]
    fn test_mutated_body_fails() {
        let key = signing_key(7);
        let signature = sign(&key, TIMESTAMP, BODY);

        let mutated = br#"{"type":2,"id":"123","application_id":"456"}"#;
        assert!(!verifier(&key).is_valid(TIMESTAMP, mutated, &signature));

        // Same JSON, different whitespace: still a different byte string
        let reformatted = br#"{"type": 1, "id": "123", "application_id": "456"}"#;
        assert!(!verifier(&key).is_valid(TIMESTAMP, reformatted, &signature));
    }

    #[test]
    fn test_mutated_timestamp_fails() {
        let key = signing_key(7);
        let signature = sign(&key, TIMESTAMP, BODY);

        assert!(!verifier(&key).is_valid("1700000001", BODY, &signature));
    }

    #[test]
    fn test_other_key_fails() {
        let key = signing_key(7);
        let other = signing_key(9);
        let signature = sign(&other, TIMESTAMP, BODY);

        assert!(!verifier(&key).is_valid(TIMESTAMP, BODY, &signature));
    }

    #[test]
    fn test_missing_headers_fail_closed() {
        let key = signing_key(7);
        let signature = sign(&key, TIMESTAMP, BODY);
        let verifier = verifier(&key);

        assert!(verifier.verify(RawRequest::new(BODY, None, Some(TIMESTAMP.to_string()))).is_none());
        assert!(verifier.verify(RawRequest::new(BODY, Some(signature), None)).is_none());
        assert!(verifier.verify(RawRequest::new(BODY, None, None)).is_none());
    }

    #[test]
    fn test_malformed_signature_fails() {
        let key = signing_key(7);
        let verifier = verifier(&key);

        assert!(!verifier.is_valid(TIMESTAMP, BODY, "not-hex"));
        assert!(!verifier.is_valid(TIMESTAMP, BODY, "abcd"));
        assert!(!verifier.is_valid(TIMESTAMP, BODY, ""));
        assert!(!verifier.is_valid(TIMESTAMP, BODY, &"00".repeat(SIGNATURE_LENGTH)));
    }

    #[test]
    fn test_public_key_parsing() {
        assert!(SignatureVerifier::from_hex("zz").is_err());
        assert!(SignatureVerifier::from_hex("abcd").is_err());
        assert!(SignatureVerifier::from_hex(&hex::encode(signing_key(1).verifying_key().to_bytes())).is_ok());
    }
}
