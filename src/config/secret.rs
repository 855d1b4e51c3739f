//! Secure credential handling
//!
//! API keys for the identifier service are held as `secrecy` secrets:
//! memory is zeroed on drop and `Debug` output is redacted, so a key can
//! never leak through logs or crash dumps. Call `expose_secret()` at the one
//! place the value is actually sent over the wire.

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// String newtype carrying the trait impls `Secret` requires
#[derive(Clone, Debug, Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
#[serde(transparent)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl From<&str> for SecretValue {
    fn from(s: &str) -> Self {
        SecretValue(s.to_string())
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Secret-wrapped string for configuration credentials
pub type SecretString = Secret<SecretValue>;

/// Convenience constructor used by tests and env-override code
pub fn secret_string(value: impl Into<String>) -> SecretString {
    Secret::new(SecretValue(value.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_debug_is_redacted() {
        let secret = secret_string("api-key-123");
        let debug = format!("{secret:?}");
        assert!(!debug.contains("api-key-123"));
    }

    #[test]
    fn test_expose_returns_value() {
        let secret = secret_string("api-key-123");
        assert_eq!(secret.expose_secret().as_ref(), "api-key-123");
    }

    #[test]
    fn test_deserializes_from_plain_string() {
        let secret: SecretString = serde_json::from_str("\"tok\"").unwrap();
        assert_eq!(secret.expose_secret().as_ref(), "tok");
    }
}
