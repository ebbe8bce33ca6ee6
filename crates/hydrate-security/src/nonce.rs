//! CSP nonce value

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SecurityError;

/// A nonce stamped on inline `<script>` elements.
///
/// Only base64 / base64url characters are accepted, which is what
/// `'nonce-...'` source expressions allow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CspNonce(String);

impl CspNonce {
    /// Validate and wrap a nonce value
    pub fn new(value: impl Into<String>) -> Result<Self, SecurityError> {
        let value = value.into();
        if value.is_empty() || !value.bytes().all(is_nonce_byte) {
            return Err(SecurityError::InvalidNonce(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Source expression for a `script-src` directive
    pub fn source_expression(&self) -> String {
        format!("'nonce-{}'", self.0)
    }
}

fn is_nonce_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'-' | b'_' | b'=')
}

impl TryFrom<String> for CspNonce {
    type Error = SecurityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CspNonce> for String {
    fn from(nonce: CspNonce) -> Self {
        nonce.0
    }
}

impl fmt::Display for CspNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_nonce() {
        let nonce = CspNonce::new("r4nd0m+/=").unwrap();
        assert_eq!(nonce.as_str(), "r4nd0m+/=");
        assert_eq!(nonce.source_expression(), "'nonce-r4nd0m+/='");
    }

    #[test]
    fn test_rejects_markup() {
        assert_eq!(
            CspNonce::new("a\"><script>"),
            Err(SecurityError::InvalidNonce("a\"><script>".to_string()))
        );
        assert!(CspNonce::new("").is_err());
    }
}
