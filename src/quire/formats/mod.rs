//! Output formats for compiled trees
//!
//! - [treeviz]: a line-per-node drawing for humans
//! - [snapshot]: serde snapshots, written as JSON or YAML
//!
//! [render] picks one by [OutputFormat]. [designator_listing] prints the identifier table
//! next to the tree.

pub mod snapshot;
pub mod treeviz;

pub use snapshot::TreeSnapshot;
pub use treeviz::to_treeviz_str;

use crate::quire::designator::DesignatorInterpreter;
use crate::quire::tree::location::describe;
use crate::quire::tree::SyntacticTree;
use quire_config::OutputFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn render(
    tree: &SyntacticTree,
    format: OutputFormat,
    show_locations: bool,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Treeviz => Ok(to_treeviz_str(tree, show_locations)),
        OutputFormat::Json => {
            let snapshot = TreeSnapshot::from_tree(tree, show_locations);
            let mut json = serde_json::to_string_pretty(&snapshot)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&TreeSnapshot::from_tree(
            tree,
            show_locations,
        ))?),
    }
}

/// One line per identifier: the identifier, `explicit` or `implicit`, the node kind and
/// its location. Explicit identifiers come first, each group in identifier order.
pub fn designator_listing(designators: &DesignatorInterpreter, tree: &SyntacticTree) -> String {
    let explicit = designators
        .pure_identifiers()
        .iter()
        .map(|entry| (entry, "explicit"));
    let implicit = designators
        .derived_identifiers()
        .iter()
        .map(|entry| (entry, "implicit"));

    let mut output = String::new();
    for ((identifier, path), origin) in explicit.chain(implicit) {
        match path.resolve(tree) {
            Ok(resolved) => {
                let node = resolved.end();
                output.push_str(&format!(
                    "{}\t{}\t{}\t{}\n",
                    identifier,
                    origin,
                    node.kind(),
                    describe(node.location())
                ));
            }
            Err(error) => {
                output.push_str(&format!("{}\t{}\t{}\n", identifier, origin, error));
            }
        }
    }
    output
}
