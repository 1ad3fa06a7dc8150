//! Mangling stages
//!
//! Thin wrappers running one pass over a whole tree. A fatal pass error comes back as
//! `StageFailed` carrying the stage name.

use crate::quire::mangling::{
    EmbeddedListMangler, LevelMangler, ListMangler, SeparatorsMangler, TagFilter, TagMangler,
    UrlMangler,
};
use crate::quire::transforms::{Runnable, TransformError};
use crate::quire::tree::SyntacticTree;
use crate::quire::treepath::Treepath;

#[derive(Debug, Default, Clone, Copy)]
pub struct ListStage;

impl ListStage {
    pub fn new() -> Self {
        ListStage
    }
}

impl Runnable<SyntacticTree, SyntacticTree> for ListStage {
    fn run(&self, input: SyntacticTree) -> Result<SyntacticTree, TransformError> {
        ListMangler::new()
            .mangle(&Treepath::root(input))
            .map_err(|error| TransformError::stage("ListStage", error))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedListStage;

impl EmbeddedListStage {
    pub fn new() -> Self {
        EmbeddedListStage
    }
}

impl Runnable<SyntacticTree, SyntacticTree> for EmbeddedListStage {
    fn run(&self, input: SyntacticTree) -> Result<SyntacticTree, TransformError> {
        EmbeddedListMangler::new()
            .mangle(&Treepath::root(input))
            .map_err(|error| TransformError::stage("EmbeddedListStage", error))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UrlStage;

impl UrlStage {
    pub fn new() -> Self {
        UrlStage
    }
}

impl Runnable<SyntacticTree, SyntacticTree> for UrlStage {
    fn run(&self, input: SyntacticTree) -> Result<SyntacticTree, TransformError> {
        UrlMangler::new()
            .mangle(&Treepath::root(input))
            .map_err(|error| TransformError::stage("UrlStage", error))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LevelStage;

impl LevelStage {
    pub fn new() -> Self {
        LevelStage
    }
}

impl Runnable<SyntacticTree, SyntacticTree> for LevelStage {
    fn run(&self, input: SyntacticTree) -> Result<SyntacticTree, TransformError> {
        LevelMangler::new()
            .mangle(&Treepath::root(input))
            .map_err(|error| TransformError::stage("LevelStage", error))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TagStage;

impl TagStage {
    pub fn new() -> Self {
        TagStage
    }
}

impl Runnable<SyntacticTree, SyntacticTree> for TagStage {
    fn run(&self, input: SyntacticTree) -> Result<SyntacticTree, TransformError> {
        TagMangler::new()
            .mangle(&Treepath::root(input))
            .map_err(|error| TransformError::stage("TagStage", error))
    }
}

/// Keeps what carries one of the given tags. Never fails.
#[derive(Debug, Default, Clone)]
pub struct TagFilterStage {
    filter: TagFilter,
}

impl TagFilterStage {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TagFilterStage {
            filter: TagFilter::new(tags),
        }
    }
}

impl Runnable<SyntacticTree, SyntacticTree> for TagFilterStage {
    fn run(&self, input: SyntacticTree) -> Result<SyntacticTree, TransformError> {
        Ok(self.filter.filter(&Treepath::root(input)))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SeparatorsStage;

impl SeparatorsStage {
    pub fn new() -> Self {
        SeparatorsStage
    }
}

impl Runnable<SyntacticTree, SyntacticTree> for SeparatorsStage {
    fn run(&self, input: SyntacticTree) -> Result<SyntacticTree, TransformError> {
        SeparatorsMangler::new()
            .mangle(&Treepath::root(input))
            .map_err(|error| TransformError::stage("SeparatorsStage", error))
    }
}
