//! Individual transformation stages
//!
//! One stage per step. Each implements [Runnable](super::Runnable) and reports failures
//! with its own name.

pub mod mangling;
pub mod parsing;

pub use mangling::{
    EmbeddedListStage, LevelStage, ListStage, SeparatorsStage, TagFilterStage, TagStage,
    UrlStage,
};
pub use parsing::{ParseStage, Source};
