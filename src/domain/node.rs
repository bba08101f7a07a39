//! Domain entities: hierarchy nodes and their wire shape

use serde::{Deserialize, Serialize};

/// Role of a node, resolved at build time.
///
/// The wire shape carries optional `children` and an optional filter pair;
/// the builder collapses that into an explicit variant so the drill-vs-filter
/// decision is a checked match instead of shape inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Has children; selecting it descends one level.
    Internal,
    /// Terminal node; selecting it toggles an external filter condition.
    Leaf {
        filter_key: String,
        filter_value: String,
    },
    /// Neither children nor a filter pair. Valid but inert.
    Inert,
}

impl NodeKind {
    pub fn is_internal(&self) -> bool {
        matches!(self, NodeKind::Internal)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeKind::Leaf { .. })
    }
}

/// Wire shape of one hierarchy node as delivered by the upstream
/// aggregation service. Ordered `children` nest arbitrarily deep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    pub name: String,
    pub value: f64,
    /// Display hint only, no semantic weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_value: Option<String>,
}

/// Derive a filter value from a display name: lower-cased, spaces to hyphens.
///
/// This transform is lossy and not collision-free ("Cloud Ops" and
/// "cloud-ops" slug identically). Leaves should carry an explicit
/// `filter_value` when stability matters; the builder warns on collisions
/// but does not resolve them.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("AI", "ai")]
    #[case("Cloud Ops", "cloud-ops")]
    #[case("cloud-ops", "cloud-ops")]
    #[case("Mixed CASE Name", "mixed-case-name")]
    #[case("", "")]
    fn test_slugify(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(slugify(name), expected);
    }

    #[test]
    fn given_node_spec_json_when_deserializing_then_maps_all_fields() {
        let json = r##"{
            "name": "Security",
            "value": 30,
            "color": "#f28e2b",
            "filter_key": "track",
            "filter_value": "security"
        }"##;
        let spec: NodeSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.name, "Security");
        assert_eq!(spec.value, 30.0);
        assert_eq!(spec.color.as_deref(), Some("#f28e2b"));
        assert!(spec.children.is_none());
        assert_eq!(spec.filter_key.as_deref(), Some("track"));
        assert_eq!(spec.filter_value.as_deref(), Some("security"));
    }

    #[test]
    fn given_unknown_field_when_deserializing_then_rejects() {
        let json = r#"{"name": "X", "value": 1, "total": 5}"#;
        assert!(serde_json::from_str::<NodeSpec>(json).is_err());
    }
}
