use serde::{Deserialize, Serialize};

/// Service definitions, as far as envelope encoding is concerned
///
/// Only the target namespace of the first declared schema is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definitions {
    #[serde(default)]
    pub types: Option<Vec<WsdlTypes>>,
}

/// A `types` block of the definitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WsdlTypes {
    #[serde(default)]
    pub schemas: Vec<XsdSchema>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdSchema {
    pub target_namespace: String,
}

impl Definitions {
    /// Definitions declaring a single schema
    pub fn with_target_namespace(namespace: impl Into<String>) -> Self {
        Self {
            types: Some(vec![WsdlTypes {
                schemas: vec![XsdSchema {
                    target_namespace: namespace.into(),
                }],
            }]),
        }
    }

    /// Target namespace of the first schema, empty when none is declared
    pub fn target_namespace(&self) -> &str {
        self.types
            .as_deref()
            .and_then(|types| types.first())
            .and_then(|types| types.schemas.first())
            .map(|schema| schema.target_namespace.as_str())
            .unwrap_or("")
    }
}
