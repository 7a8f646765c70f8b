//! Per-resource configuration graph construction.
//!
//! The walk follows declared structure: a scalar hangs a property edge off
//! its parent, a sequence flattens into the parent label, a mapping nests,
//! and a `Ref` intrinsic inlines the referenced resource's own properties
//! at the point of use.

use serde_json::Value;

use crate::graph::{EdgeKind, NodeId, NodeKind, PropertyGraph};

use super::{CfnTemplate, TemplateError};

impl CfnTemplate {
    /// Builds the configuration graph for one declared resource.
    ///
    /// The root node carries the resource type verbatim and kind
    /// [`NodeKind::Resource`]; every descendant is a [`NodeKind::Property`]
    /// whose label chains `-{property}` onto its parent's. All nodes are
    /// tagged as the resource's own.
    pub fn resource_graph(&self, logical_name: &str) -> Result<PropertyGraph, TemplateError> {
        let entry = self
            .resources
            .get(logical_name)
            .ok_or_else(|| TemplateError::UnknownResource(logical_name.to_string()))?;

        let mut graph = PropertyGraph::new();
        let root = NodeId::own(&entry.resource_type);
        graph.add_node(root.clone(), NodeKind::Resource);

        let mut inlining = vec![logical_name.to_string()];
        for (name, value) in &entry.properties {
            self.add_property(&mut graph, &root, name, value, &mut inlining)?;
        }
        Ok(graph)
    }

    fn add_property(
        &self,
        graph: &mut PropertyGraph,
        parent: &NodeId,
        name: &str,
        value: &Value,
        inlining: &mut Vec<String>,
    ) -> Result<(), TemplateError> {
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                graph.add_edge(parent.clone(), parent.child(name), EdgeKind::HasSubproperty);
                Ok(())
            }
            Value::Array(items) => {
                // Elements share the parent label and property name, so
                // positional identity is not preserved.
                for item in items {
                    self.add_property(graph, parent, name, item, inlining)?;
                }
                Ok(())
            }
            Value::Object(map) => {
                let child = parent.child(name);
                graph.add_edge(parent.clone(), child.clone(), EdgeKind::HasSubproperty);

                if let Some(target) = ref_target(map) {
                    let target = target.as_str().ok_or_else(|| {
                        TemplateError::UnsupportedPropertyType {
                            property: child.label.clone(),
                            found: value_type_name(target),
                        }
                    })?;
                    return self.inline_reference(graph, &child, target, inlining);
                }

                for (sub_name, sub_value) in map {
                    self.add_property(graph, &child, sub_name, sub_value, inlining)?;
                }
                Ok(())
            }
            Value::Null => Err(TemplateError::UnsupportedPropertyType {
                property: parent.child(name).label,
                found: "null",
            }),
        }
    }

    /// Inlines the referenced resource's properties beneath `at`, so a
    /// `Ref` yields exactly the edges of declaring them at the point of
    /// use. The referenced resource never becomes a node of its own.
    fn inline_reference(
        &self,
        graph: &mut PropertyGraph,
        at: &NodeId,
        target: &str,
        inlining: &mut Vec<String>,
    ) -> Result<(), TemplateError> {
        let referenced =
            self.resources
                .get(target)
                .ok_or_else(|| TemplateError::DanglingReference {
                    property: at.label.clone(),
                    target: target.to_string(),
                })?;

        if inlining.iter().any(|name| name == target) {
            return Err(TemplateError::CircularReference(target.to_string()));
        }

        inlining.push(target.to_string());
        for (name, value) in &referenced.properties {
            self.add_property(graph, at, name, value, inlining)?;
        }
        inlining.pop();
        Ok(())
    }
}

/// Returns the `Ref` payload when a mapping is a reference intrinsic: a
/// single entry whose key is "ref" in any ASCII case.
fn ref_target(map: &serde_json::Map<String, Value>) -> Option<&Value> {
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.iter().next()?;
    if key.eq_ignore_ascii_case("ref") {
        Some(value)
    } else {
        None
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
