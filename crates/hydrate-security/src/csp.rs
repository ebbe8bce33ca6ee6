//! Content Security Policy
//!
//! Just enough CSP parsing to find the nonce inline scripts must carry.

use std::collections::HashMap;

use crate::{CspNonce, SecurityError};

/// Parsed CSP header
#[derive(Debug, Clone, Default)]
pub struct ContentSecurityPolicy {
    pub directives: HashMap<String, Vec<String>>,
}

/// CSP directive names
pub const DEFAULT_SRC: &str = "default-src";
pub const SCRIPT_SRC: &str = "script-src";
pub const SCRIPT_SRC_ELEM: &str = "script-src-elem";

/// CSP source keywords
pub const UNSAFE_INLINE: &str = "'unsafe-inline'";

const NONCE_PREFIX: &str = "'nonce-";

impl ContentSecurityPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse CSP header
    pub fn parse(header: &str) -> Self {
        let mut policy = Self::new();

        for directive_str in header.split(';') {
            let mut parts = directive_str.split_whitespace();
            let Some(name) = parts.next() else {
                continue;
            };

            // First occurrence of a directive wins
            policy.directives
                .entry(name.to_ascii_lowercase())
                .or_insert_with(|| parts.map(str::to_string).collect());
        }

        policy
    }

    /// Get directive values, falling back to `default-src`
    pub fn get(&self, directive: &str) -> Option<&Vec<String>> {
        self.directives.get(directive)
            .or_else(|| self.directives.get(DEFAULT_SRC))
    }

    /// Directive that governs `<script>` elements
    fn script_sources(&self) -> Option<&Vec<String>> {
        self.directives.get(SCRIPT_SRC_ELEM)
            .or_else(|| self.get(SCRIPT_SRC))
    }

    /// Check if inline scripts are allowed without a nonce
    pub fn allows_inline_script(&self) -> bool {
        self.script_sources()
            .map(|v| v.iter().any(|s| s == UNSAFE_INLINE))
            .unwrap_or(true)
    }

    /// First `'nonce-...'` source of the script directive
    pub fn script_nonce(&self) -> Result<CspNonce, SecurityError> {
        let value = self.script_sources()
            .into_iter()
            .flatten()
            .find_map(|source| source.strip_prefix(NONCE_PREFIX)?.strip_suffix('\''))
            .ok_or(SecurityError::MissingNonce)?;

        tracing::debug!("Found script nonce in CSP header");
        CspNonce::new(value)
    }
}
