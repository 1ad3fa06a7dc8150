//! Serializable tree snapshots
//!
//! A plain owned copy of a [SyntacticTree], shaped for serde. JSON and YAML output are both
//! produced from it, so the two formats can never disagree on structure.

use crate::quire::tree::{Location, NodeKind, SyntacticTree};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeSnapshot>,
}

impl TreeSnapshot {
    pub fn from_tree(tree: &SyntacticTree, with_locations: bool) -> Self {
        TreeSnapshot {
            kind: tree.kind(),
            text: tree.text().map(str::to_string),
            location: if with_locations {
                tree.location().cloned()
            } else {
                None
            },
            children: tree
                .children()
                .iter()
                .map(|child| TreeSnapshot::from_tree(child, with_locations))
                .collect(),
        }
    }

    /// Rebuild a tree, locations included when present.
    pub fn to_tree(&self) -> SyntacticTree {
        SyntacticTree::build(
            self.kind,
            self.text.clone(),
            self.location.clone(),
            self.children.iter().map(TreeSnapshot::to_tree).collect(),
        )
    }
}
