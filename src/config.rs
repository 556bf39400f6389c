//! Provider credentials and settings.

use std::collections::HashMap;

use crate::error::{DispatchResult, NotificationError};

/// Immutable bag of provider credentials and settings.
///
/// ```rust
/// use dispatchify::ProviderConfig;
///
/// let config = ProviderConfig::new()
///     .with_api_key("SG.xxxx")
///     .with_property("fromEmail", "noreply@example.com");
///
/// assert_eq!(config.property("fromEmail"), Some("noreply@example.com"));
/// ```
///
/// Sensitive fields (`api_key`, `api_secret`) are redacted from the `Debug`
/// representation to prevent accidental logging of secrets.
#[derive(Clone, Default)]
pub struct ProviderConfig {
    api_key: Option<String>,
    api_secret: Option<String>,
    properties: HashMap<String, String>,
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary API key or account identifier.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the secondary secret (auth token, secret key, …).
    pub fn with_api_secret(mut self, api_secret: impl Into<String>) -> Self {
        self.api_secret = Some(api_secret.into());
        self
    }

    /// Add a provider-specific key/value setting.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn api_secret(&self) -> Option<&str> {
        self.api_secret.as_deref()
    }

    /// The API key, or a configuration error naming the provider that
    /// requires it.
    pub fn required_api_key(&self, provider: &str) -> DispatchResult<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
            NotificationError::Configuration(format!("{provider} API key is required"))
        })
    }

    /// The API secret, or a configuration error naming the provider that
    /// requires it.
    pub fn required_api_secret(&self, provider: &str) -> DispatchResult<&str> {
        self.api_secret.as_deref().filter(|s| !s.is_empty()).ok_or_else(|| {
            NotificationError::Configuration(format!("{provider} API secret is required"))
        })
    }

    /// A property value, or `None` if not present.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// A property value, or a configuration error if absent or blank.
    pub fn required_property(&self, key: &str) -> DispatchResult<&str> {
        self.property(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                NotificationError::Configuration(format!(
                    "required provider property missing: {key}"
                ))
            })
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("properties", &self.properties)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_lookup() {
        let config = ProviderConfig::new().with_property("domain", "mg.example.com");
        assert_eq!(config.property("domain"), Some("mg.example.com"));
        assert_eq!(config.property("missing"), None);
    }

    #[test]
    fn test_required_property_errors_when_missing() {
        let config = ProviderConfig::new().with_property("blank", "  ");
        assert!(config.required_property("fromEmail").is_err());
        assert!(config.required_property("blank").is_err());
    }

    #[test]
    fn test_required_api_key() {
        let config = ProviderConfig::new().with_api_key("SG.key");
        assert_eq!(config.required_api_key("SendGrid").unwrap(), "SG.key");
        assert!(ProviderConfig::new().required_api_key("SendGrid").is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ProviderConfig::new()
            .with_api_key("SG.super-secret")
            .with_api_secret("token");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(!printed.contains("token"));
        assert!(printed.contains("<redacted>"));
    }
}
