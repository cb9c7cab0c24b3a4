//! Template references for ClickHouseInstallation
//!
//! A `ClickHouseInstallation` may be composed from one or more
//! `ClickHouseInstallationTemplate` objects. Each applied template is recorded
//! in the status as a `TemplateRef` so the provenance of the normalized
//! configuration can be audited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference to a ClickHouseInstallationTemplate
///
/// `namespace` defaults to the namespace of the referencing installation.
/// `useType` selects how the template is combined with the installation
/// (only "merge" is understood today).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRef {
    /// Name of the referenced template
    pub name: String,

    /// Namespace of the referenced template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// How the template is applied (e.g. "merge")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_type: Option<String>,
}

impl TemplateRef {
    /// Create a reference to a template in the same namespace
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            use_type: None,
        }
    }

    /// Create a reference to a template in an explicit namespace
    pub fn with_namespace(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            use_type: None,
        }
    }

    /// `namespace/name` of the template, resolving the namespace against `default_namespace`
    pub fn qualified_name(&self, default_namespace: &str) -> String {
        format!(
            "{}/{}",
            self.namespace.as_deref().unwrap_or(default_namespace),
            self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_falls_back_to_default_namespace() {
        assert_eq!(TemplateRef::new("base").qualified_name("prod"), "prod/base");
        assert_eq!(
            TemplateRef::with_namespace("base", "shared").qualified_name("prod"),
            "shared/base"
        );
    }

    #[test]
    fn test_use_type_serializes_camel_case() {
        let template = TemplateRef {
            use_type: Some("merge".to_string()),
            ..TemplateRef::new("base")
        };
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json, serde_json::json!({"name": "base", "useType": "merge"}));
    }
}
