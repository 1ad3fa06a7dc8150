//! Standard transform definitions
//!
//! Prebuilt transforms as lazy statics, plus the [Pipeline] the command line runs:
//!
//! ```text
//! source ─ PARSE ─> flat tree ─ MANGLE ─> nested tree ─ filter ─ separators ─ designators
//!                                 lists, embedded lists,         (optional)   enrich, problems
//!                                 urls, levels, tags
//! ```

use crate::quire::designator::DesignatorInterpreter;
use crate::quire::problem::Problem;
use crate::quire::transforms::stages::{
    EmbeddedListStage, LevelStage, ListStage, ParseStage, SeparatorsStage, Source,
    TagFilterStage, TagStage, UrlStage,
};
use crate::quire::transforms::{Runnable, Transform, TransformError};
use crate::quire::tree::SyntacticTree;
use crate::quire::treepath::Treepath;
use once_cell::sync::Lazy;
use quire_config::QuireConfig;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Type alias for transforms from tree to tree
pub type TreeTransform = Transform<SyntacticTree, SyntacticTree>;

/// Source text → flat `Novella`.
pub static PARSE: Lazy<Transform<String, SyntacticTree>> =
    Lazy::new(|| Transform::from_fn(Ok).then(ParseStage::new()));

/// Flat tree → nested tree with canonical tags.
///
/// 1. Triple-hyphen lists
/// 2. Embedded lists
/// 3. Named URLs
/// 4. Levels
/// 5. Tags
pub static MANGLE: Lazy<TreeTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(ListStage::new())
        .then(EmbeddedListStage::new())
        .then(UrlStage::new())
        .then(LevelStage::new())
        .then(TagStage::new())
});

/// Source text → nested tree, no filtering, separators kept.
pub static STRING_TO_TREE: Lazy<Transform<String, SyntacticTree>> =
    Lazy::new(|| Transform::from_fn(Ok).then_transform(&PARSE).then_transform(&MANGLE));

/// Outcome of a pipeline run. Problems never abort a run; the caller decides.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub tree: SyntacticTree,
    pub designators: DesignatorInterpreter,
    pub problems: Vec<Problem>,
}

/// Parse, mangle, then optionally filter, compact and enrich.
#[derive(Debug, Clone)]
pub struct Pipeline {
    tags: BTreeSet<String>,
    remove_separators: bool,
    enrich_designators: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline {
            tags: BTreeSet::new(),
            remove_separators: false,
            enrich_designators: true,
        }
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &QuireConfig) -> Self {
        Pipeline {
            tags: config.filter.tags.iter().cloned().collect(),
            remove_separators: config.mangling.remove_separators,
            enrich_designators: config.mangling.enrich_designators,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn remove_separators(mut self, remove: bool) -> Self {
        self.remove_separators = remove;
        self
    }

    pub fn enrich_designators(mut self, enrich: bool) -> Self {
        self.enrich_designators = enrich;
        self
    }

    pub fn compile_str(&self, source: &str) -> Result<Compiled, TransformError> {
        self.compile(vec![Source::new(source)])
    }

    pub fn compile(&self, sources: Vec<Source>) -> Result<Compiled, TransformError> {
        let flat: SyntacticTree = ParseStage::new().run(sources)?;
        self.compile_tree(flat)
    }

    /// Run everything after parsing on an already produced flat tree.
    pub fn compile_tree(&self, flat: SyntacticTree) -> Result<Compiled, TransformError> {
        let mut tree = MANGLE.run(flat)?;
        if !self.tags.is_empty() {
            tree = TagFilterStage::new(self.tags.iter().cloned()).run(tree)?;
        }
        if self.remove_separators {
            tree = SeparatorsStage::new().run(tree)?;
        }

        let designators = DesignatorInterpreter::new(&Treepath::root(tree.clone()));
        let (tree, designators) = if self.enrich_designators {
            designators
                .enrich(&tree)
                .map_err(|error| TransformError::stage("Designators", error))?
        } else {
            (tree, designators)
        };

        let problems = designators.problems().to_vec();
        if problems.is_empty() {
            debug!(nodes = tree.size(), "compiled");
        } else {
            info!(count = problems.len(), "compiled with problems");
        }
        Ok(Compiled {
            tree,
            designators,
            problems,
        })
    }
}
