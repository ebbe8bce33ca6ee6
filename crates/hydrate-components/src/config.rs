//! Hydration Configuration

use hydrate_security::{ContentSecurityPolicy, CspNonce, SecurityError};

/// Client-side global the inline script appends envelopes to
pub const DEFAULT_REGISTRY_GLOBAL: &str = "$components";

/// Options applied to every render of a response
#[derive(Debug, Clone)]
pub struct HydrateConfig {
    /// Nonce stamped on the inline hydration script
    pub csp_nonce: Option<CspNonce>,
    /// Name of the `window` property holding the envelope list.
    /// Written into the script verbatim, so it must be a JS identifier.
    pub registry_global: &'static str,
}

impl Default for HydrateConfig {
    fn default() -> Self {
        Self {
            csp_nonce: None,
            registry_global: DEFAULT_REGISTRY_GLOBAL,
        }
    }
}

impl HydrateConfig {
    /// Use the script nonce declared by a `Content-Security-Policy` header
    pub fn from_csp_header(header: &str) -> Result<Self, SecurityError> {
        let nonce = ContentSecurityPolicy::parse(header).script_nonce()?;
        Ok(Self {
            csp_nonce: Some(nonce),
            ..Self::default()
        })
    }

    pub fn with_nonce(mut self, nonce: &str) -> Result<Self, SecurityError> {
        self.csp_nonce = Some(CspNonce::new(nonce)?);
        Ok(self)
    }

    pub fn with_registry_global(mut self, name: &'static str) -> Self {
        self.registry_global = name;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csp_header() {
        let config =
            HydrateConfig::from_csp_header("script-src 'nonce-abc' 'strict-dynamic'").unwrap();
        assert_eq!(config.csp_nonce.unwrap().as_str(), "abc");
        assert_eq!(config.registry_global, DEFAULT_REGISTRY_GLOBAL);
    }

    #[test]
    fn test_invalid_nonce() {
        assert!(HydrateConfig::default().with_nonce("a b").is_err());
    }
}
