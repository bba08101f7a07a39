//! Model builder: validates hierarchy documents and builds the arena.

use std::collections::{HashMap, HashSet};

use generational_arena::Index;
use tracing::{instrument, warn};

use crate::domain::arena::{HierarchyModel, NodeData};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{slugify, NodeKind, NodeSpec};

/// Builds a [`HierarchyModel`] from upstream hierarchy documents.
///
/// The builder owns all shape validation so navigation never has to deal
/// with ill-formed nodes:
/// - duplicate names within a sibling set are rejected
/// - values must be finite and >= 0
/// - a `filter_value` without a `filter_key` is rejected
/// - a node with both children and a filter pair resolves to `Internal`;
///   the filter pair is dropped with a warning (children wins)
pub struct ModelBuilder;

impl ModelBuilder {
    /// Parse a JSON document (ordered array of root nodes) and build the model.
    #[instrument(level = "debug", skip(content))]
    pub fn from_json(content: &str) -> DomainResult<HierarchyModel> {
        let specs: Vec<NodeSpec> =
            serde_json::from_str(content).map_err(|e| DomainError::InvalidDocument {
                message: e.to_string(),
            })?;
        Self::from_specs(specs)
    }

    /// Build the model from already-deserialized node specs.
    #[instrument(level = "debug", skip(specs))]
    pub fn from_specs(specs: Vec<NodeSpec>) -> DomainResult<HierarchyModel> {
        if specs.is_empty() {
            return Err(DomainError::EmptyDocument);
        }

        let mut model = HierarchyModel::new();
        check_sibling_names("<root>", &specs)?;

        // Iterative build, children pushed in reverse to keep document order
        let mut stack: Vec<(NodeSpec, Option<Index>)> =
            specs.into_iter().rev().map(|spec| (spec, None)).collect();

        while let Some((spec, parent)) = stack.pop() {
            if !spec.value.is_finite() || spec.value < 0.0 {
                return Err(DomainError::InvalidValue {
                    name: spec.name,
                    value: spec.value,
                });
            }

            let kind = resolve_kind(&spec)?;
            let data = NodeData {
                name: spec.name.clone(),
                value: spec.value,
                color: spec.color,
                kind,
            };
            let idx = model.insert_node(data, parent);

            if let Some(children) = spec.children {
                if !children.is_empty() {
                    check_sibling_names(&spec.name, &children)?;
                    for child in children.into_iter().rev() {
                        stack.push((child, Some(idx)));
                    }
                }
            }
        }

        warn_on_slug_collisions(&model);
        Ok(model)
    }
}

/// Resolve the wire shape into an explicit node role.
fn resolve_kind(spec: &NodeSpec) -> DomainResult<NodeKind> {
    let has_children = spec.children.as_ref().map(|c| !c.is_empty()).unwrap_or(false);

    if has_children {
        if spec.filter_key.is_some() || spec.filter_value.is_some() {
            warn!(
                node = %spec.name,
                "node has both children and a filter pair; children wins, filter pair dropped"
            );
        }
        return Ok(NodeKind::Internal);
    }

    match (&spec.filter_key, &spec.filter_value) {
        (Some(key), Some(value)) => Ok(NodeKind::Leaf {
            filter_key: key.clone(),
            filter_value: value.clone(),
        }),
        // Derived value: lossy name slug, see `slugify`
        (Some(key), None) => Ok(NodeKind::Leaf {
            filter_key: key.clone(),
            filter_value: slugify(&spec.name),
        }),
        (None, Some(_)) => Err(DomainError::DanglingFilterValue {
            name: spec.name.clone(),
        }),
        (None, None) => Ok(NodeKind::Inert),
    }
}

fn check_sibling_names(parent: &str, siblings: &[NodeSpec]) -> DomainResult<()> {
    let mut seen = HashSet::new();
    for spec in siblings {
        if !seen.insert(spec.name.as_str()) {
            return Err(DomainError::DuplicateSiblingName {
                parent: parent.to_string(),
                name: spec.name.clone(),
            });
        }
    }
    Ok(())
}

/// Differently-named leaves can slug to the same filter value. That is a
/// known lossy spot in the upstream design; we surface it, we do not fix it.
fn warn_on_slug_collisions(model: &HierarchyModel) {
    let mut by_pair: HashMap<(String, String), String> = HashMap::new();
    for (_, node) in model.iter() {
        if let NodeKind::Leaf {
            filter_key,
            filter_value,
        } = &node.data.kind
        {
            let pair = (filter_key.clone(), filter_value.clone());
            if let Some(other) = by_pair.get(&pair) {
                if other != &node.data.name {
                    warn!(
                        filter_key = %filter_key,
                        filter_value = %filter_value,
                        first = %other,
                        second = %node.data.name,
                        "leaf filter value collision: two differently-named leaves map to the same filter"
                    );
                }
            } else {
                by_pair.insert(pair, node.data.name.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, value: f64, key: &str) -> NodeSpec {
        NodeSpec {
            name: name.to_string(),
            value,
            color: None,
            children: None,
            filter_key: Some(key.to_string()),
            filter_value: None,
        }
    }

    #[test]
    fn given_empty_document_when_building_then_errors() {
        assert_eq!(
            ModelBuilder::from_specs(vec![]).unwrap_err(),
            DomainError::EmptyDocument
        );
    }

    #[test]
    fn given_duplicate_sibling_names_when_building_then_errors() {
        let specs = vec![leaf("AI", 1.0, "track"), leaf("AI", 2.0, "track")];
        let err = ModelBuilder::from_specs(specs).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateSiblingName { .. }));
    }

    #[test]
    fn given_duplicate_names_in_different_sibling_sets_when_building_then_succeeds() {
        let specs = vec![
            NodeSpec {
                name: "A".to_string(),
                value: 1.0,
                color: None,
                children: Some(vec![leaf("Shared", 1.0, "track")]),
                filter_key: None,
                filter_value: None,
            },
            NodeSpec {
                name: "B".to_string(),
                value: 1.0,
                color: None,
                children: Some(vec![leaf("Shared", 1.0, "track")]),
                filter_key: None,
                filter_value: None,
            },
        ];
        assert!(ModelBuilder::from_specs(specs).is_ok());
    }

    #[test]
    fn given_negative_value_when_building_then_errors() {
        let specs = vec![leaf("AI", -1.0, "track")];
        let err = ModelBuilder::from_specs(specs).unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue { .. }));
    }

    #[test]
    fn given_nan_value_when_building_then_errors() {
        let specs = vec![leaf("AI", f64::NAN, "track")];
        assert!(ModelBuilder::from_specs(specs).is_err());
    }

    #[test]
    fn given_filter_value_without_key_when_building_then_errors() {
        let specs = vec![NodeSpec {
            name: "Odd".to_string(),
            value: 1.0,
            color: None,
            children: None,
            filter_key: None,
            filter_value: Some("odd".to_string()),
        }];
        let err = ModelBuilder::from_specs(specs).unwrap_err();
        assert_eq!(
            err,
            DomainError::DanglingFilterValue {
                name: "Odd".to_string()
            }
        );
    }

    #[test]
    fn given_node_with_children_and_filter_pair_when_building_then_children_wins() {
        let specs = vec![NodeSpec {
            name: "Both".to_string(),
            value: 10.0,
            color: None,
            children: Some(vec![leaf("Child", 10.0, "track")]),
            filter_key: Some("track".to_string()),
            filter_value: Some("both".to_string()),
        }];
        let model = ModelBuilder::from_specs(specs).unwrap();
        let root = model.get_node(model.roots()[0]).unwrap();
        assert_eq!(root.data.kind, NodeKind::Internal);
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn given_leaf_without_filter_value_when_building_then_derives_slug() {
        let specs = vec![leaf("Cloud Ops", 5.0, "track")];
        let model = ModelBuilder::from_specs(specs).unwrap();
        let node = model.get_node(model.roots()[0]).unwrap();
        assert_eq!(
            node.data.kind,
            NodeKind::Leaf {
                filter_key: "track".to_string(),
                filter_value: "cloud-ops".to_string(),
            }
        );
    }

    #[test]
    fn given_plain_node_when_building_then_inert() {
        let specs = vec![NodeSpec {
            name: "Solo".to_string(),
            value: 1.0,
            color: None,
            children: None,
            filter_key: None,
            filter_value: None,
        }];
        let model = ModelBuilder::from_specs(specs).unwrap();
        let node = model.get_node(model.roots()[0]).unwrap();
        assert_eq!(node.data.kind, NodeKind::Inert);
    }

    #[test]
    fn given_nested_document_when_building_then_preserves_order() {
        let json = r#"[
            {"name": "AI", "value": 80, "children": [
                {"name": "Copilot", "value": 50, "filter_key": "track"},
                {"name": "Security", "value": 30, "filter_key": "track"}
            ]},
            {"name": "Git", "value": 20, "filter_key": "track"}
        ]"#;
        let model = ModelBuilder::from_json(json).unwrap();
        assert_eq!(model.roots().len(), 2);
        assert_eq!(model.node_count(), 4);
        assert_eq!(model.depth(), 2);

        let names: Vec<String> = model
            .children_of(model.roots()[0])
            .iter()
            .map(|&idx| model.get_node(idx).unwrap().data.name.clone())
            .collect();
        assert_eq!(names, vec!["Copilot", "Security"]);
    }

    #[test]
    fn given_malformed_json_when_building_then_invalid_document() {
        let err = ModelBuilder::from_json("{not json").unwrap_err();
        assert!(matches!(err, DomainError::InvalidDocument { .. }));
    }
}
