//! # Envelope configuration
//!
//! An [`EnvelopeConfig`] holds the tag prefix used for `Envelope`, `Header`
//! and `Body`, and optionally a set of namespace attributes replacing the
//! default declarations on the `Envelope` element.
//!
//! The driver ([`crate::EnvelopeEncoder`]) receives its configuration at
//! construction. A process-wide default is kept for convenience:
//!
//! ```
//! use std::collections::BTreeMap;
//! use pmosoap::{configure_envelope, global_envelope_config, reset_envelope_config};
//!
//! let mut attrs = BTreeMap::new();
//! attrs.insert("xmlns:env".to_string(), "urn:x".to_string());
//! configure_envelope("env", Some(attrs));
//!
//! assert_eq!(global_envelope_config().prefix, "env");
//! reset_envelope_config();
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{Result, SoapError};

pub const DEFAULT_PREFIX: &str = "soap";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
pub const SOAP_ENVELOPE_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";

lazy_static! {
    static ref GLOBAL_ENVELOPE: RwLock<EnvelopeConfig> = RwLock::new(EnvelopeConfig::default());
}

/// Prefix and namespace declarations of the SOAP envelope
///
/// Loaded from YAML as:
///
/// ```yaml
/// prefix: env
/// attributes:
///   xmlns:env: "http://schemas.xmlsoap.org/soap/envelope/"
///   xmlns:ns1: "urn:example"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    pub prefix: String,
    /// When set, emitted instead of the default declarations (no merge).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            attributes: None,
        }
    }
}

impl EnvelopeConfig {
    pub fn new(prefix: impl Into<String>, attributes: Option<BTreeMap<String, String>>) -> Self {
        Self {
            prefix: prefix.into(),
            attributes,
        }
    }

    /// Parses a configuration from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EnvelopeConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Loads a configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SoapError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_yaml_str(&content)?;
        info!(path = %path.display(), prefix = %config.prefix, "Envelope configuration loaded");
        Ok(config)
    }

    /// Qualified tag name, e.g. `soap:Body`
    pub fn tag(&self, local: &str) -> String {
        if self.prefix.is_empty() {
            local.to_string()
        } else {
            format!("{}:{}", self.prefix, local)
        }
    }

    /// Attributes of the `Envelope` start tag.
    ///
    /// Without override: `xmlns:xsi`, `xmlns:xsd`, and the envelope
    /// namespace bound to the configured prefix, or to `soap` when the
    /// prefix is empty.
    pub fn envelope_attributes(&self) -> Vec<(String, String)> {
        match &self.attributes {
            Some(attributes) => attributes
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            None => {
                let prefix = if self.prefix.is_empty() {
                    DEFAULT_PREFIX
                } else {
                    self.prefix.as_str()
                };
                vec![
                    ("xmlns:xsi".to_string(), XSI_NAMESPACE.to_string()),
                    ("xmlns:xsd".to_string(), XSD_NAMESPACE.to_string()),
                    (format!("xmlns:{}", prefix), SOAP_ENVELOPE_NAMESPACE.to_string()),
                ]
            }
        }
    }
}

/// Sets the process-wide envelope configuration. Last call wins.
///
/// `attributes == None` keeps the attribute set currently configured.
/// Encoders built before this call keep the configuration they captured.
pub fn configure_envelope(prefix: impl Into<String>, attributes: Option<BTreeMap<String, String>>) {
    let mut config = GLOBAL_ENVELOPE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    config.prefix = prefix.into();
    if attributes.is_some() {
        config.attributes = attributes;
    }
    debug!(prefix = %config.prefix, custom_attributes = config.attributes.is_some(), "Envelope configured");
}

/// Snapshot of the process-wide envelope configuration
pub fn global_envelope_config() -> EnvelopeConfig {
    GLOBAL_ENVELOPE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Restores the default prefix and attributes
pub fn reset_envelope_config() {
    *GLOBAL_ENVELOPE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = EnvelopeConfig::default();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_attributes() {
        let attributes = EnvelopeConfig::default().envelope_attributes();
        assert_eq!(
            attributes,
            vec![
                ("xmlns:xsi".to_string(), XSI_NAMESPACE.to_string()),
                ("xmlns:xsd".to_string(), XSD_NAMESPACE.to_string()),
                ("xmlns:soap".to_string(), SOAP_ENVELOPE_NAMESPACE.to_string()),
            ]
        );
    }

    #[test]
    fn test_override_replaces_defaults() {
        let mut attrs = BTreeMap::new();
        attrs.insert("xmlns:env".to_string(), "urn:x".to_string());
        let config = EnvelopeConfig::new("env", Some(attrs));

        assert_eq!(config.tag("Envelope"), "env:Envelope");
        assert_eq!(
            config.envelope_attributes(),
            vec![("xmlns:env".to_string(), "urn:x".to_string())]
        );
    }

    #[test]
    fn test_empty_prefix_gives_unqualified_tags() {
        let config = EnvelopeConfig::new("", None);
        assert_eq!(config.tag("Body"), "Body");
        let attributes = config.envelope_attributes();
        assert_eq!(attributes.len(), 3);
        assert_eq!(
            attributes[2],
            ("xmlns:soap".to_string(), SOAP_ENVELOPE_NAMESPACE.to_string())
        );
    }

    #[test]
    fn test_from_yaml_str() {
        let config = EnvelopeConfig::from_yaml_str(
            "prefix: env\nattributes:\n  xmlns:env: \"urn:x\"\n",
        )
        .unwrap();
        assert_eq!(config.prefix, "env");
        assert_eq!(
            config.attributes.unwrap().get("xmlns:env").map(String::as_str),
            Some("urn:x")
        );
    }

    #[test]
    fn test_from_yaml_defaults_missing_fields() {
        let config = EnvelopeConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, EnvelopeConfig::default());
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = EnvelopeConfig::from_yaml_str("prefix: [unclosed").unwrap_err();
        assert!(matches!(err, SoapError::Config(_)));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prefix: s").unwrap();

        let config = EnvelopeConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.prefix, "s");
        assert!(config.attributes.is_none());
    }

    #[test]
    fn test_from_missing_file() {
        let err = EnvelopeConfig::from_yaml_file("/nonexistent/pmosoap.yaml").unwrap_err();
        assert!(matches!(err, SoapError::Config(_)));
    }
}
