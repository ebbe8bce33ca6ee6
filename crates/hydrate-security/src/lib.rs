//! Hydrate Security
//!
//! Content Security Policy helpers for inline hydration scripts.
//!
//! Features:
//! - Validated CSP nonces
//! - `script-src` nonce lookup from a policy header

pub mod csp;
pub mod nonce;

pub use csp::ContentSecurityPolicy;
pub use nonce::CspNonce;

/// Security error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecurityError {
    #[error("Invalid CSP nonce: {0:?}")]
    InvalidNonce(String),

    #[error("CSP header has no script nonce")]
    MissingNonce,
}
