//! Decoded metadata document tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::TypedValue;

/// Children of a group node, keyed by tag name.
pub type MetadataGroup = BTreeMap<String, MetadataNode>;

/// A node of a decoded metadata document: either a typed leaf or a group
/// of named children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataNode {
    Leaf(TypedValue),
    Group(MetadataGroup),
}

impl Default for MetadataNode {
    fn default() -> Self {
        Self::Group(MetadataGroup::new())
    }
}

impl From<TypedValue> for MetadataNode {
    fn from(value: TypedValue) -> Self {
        Self::Leaf(value)
    }
}

impl From<MetadataGroup> for MetadataNode {
    fn from(group: MetadataGroup) -> Self {
        Self::Group(group)
    }
}

impl MetadataNode {
    /// Builds a group from `(name, node)` pairs; later pairs replace earlier
    /// ones with the same name.
    pub fn group<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, MetadataNode)>,
        K: Into<String>,
    {
        Self::Group(
            entries
                .into_iter()
                .map(|(key, node)| (key.into(), node))
                .collect(),
        )
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Leaf(TypedValue::text(value))
    }

    pub fn as_leaf(&self) -> Option<&TypedValue> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&MetadataGroup> {
        match self {
            Self::Group(group) => Some(group),
            Self::Leaf(_) => None,
        }
    }

    /// Text of a leaf holding a [`TypedValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        self.as_leaf().and_then(TypedValue::as_text)
    }

    /// Child of a group by name. Leaves have no children.
    pub fn get(&self, key: &str) -> Option<&MetadataNode> {
        self.as_group().and_then(|group| group.get(key))
    }

    /// Follows `path` one child name at a time.
    ///
    /// An empty path returns the node itself.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&MetadataNode> {
        path.iter()
            .try_fold(self, |node, key| node.get(key.as_ref()))
    }

    /// Number of nodes in the tree, this one included.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Group(group) => 1 + group.values().map(Self::node_count).sum::<usize>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MetadataNode {
        MetadataNode::group([
            (
                "PatientInfo",
                MetadataNode::group([
                    ("ID", MetadataNode::text("P-001")),
                    ("Height", MetadataNode::Leaf(TypedValue::Float(181.5))),
                ]),
            ),
            ("Version", MetadataNode::text("3")),
        ])
    }

    #[test]
    fn lookup_walks_nested_groups() {
        let root = sample();
        assert_eq!(
            root.lookup(&["PatientInfo", "ID"]).and_then(MetadataNode::as_text),
            Some("P-001")
        );
        assert!(root.lookup(&["PatientInfo", "ID", "deeper"]).is_none());
        assert!(root.lookup(&["Device"]).is_none());
        assert_eq!(root.lookup::<&str>(&[]), Some(&root));
    }

    #[test]
    fn node_count_includes_groups() {
        assert_eq!(sample().node_count(), 5);
    }

    #[test]
    fn serializes_as_plain_mapping() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(json["PatientInfo"]["ID"]["type"], "text");
        assert_eq!(json["PatientInfo"]["ID"]["value"], "P-001");
        assert_eq!(json["Version"]["value"], "3");
    }
}
