//! Fragment identifiers and their resolution
//!
//!     Levels and paragraphs can be named. An absolute identifier `\\intro` names its owner
//!     directly; a relative one `\part` is appended to the nearest absolute identifier above
//!     it (`\intro\part`). A level with neither gets an implicit identifier derived from its
//!     title.
//!
//!     The [DesignatorInterpreter] collects these names into two maps that point at nodes
//!     through [RobustPath](crate::quire::robust_path::RobustPath)s: explicit names (pure)
//!     and title-derived names (derived).

pub mod fragment_identifier;
pub mod implicit;
pub mod interpreter;

pub use fragment_identifier::{FragmentIdentifier, IdentifierError};
pub use interpreter::DesignatorInterpreter;

use crate::quire::tree::SyntacticTree;

/// Stability filter of every robust path built by designator resolution.
pub fn is_identifier_bearing(tree: &SyntacticTree) -> bool {
    tree.kind().is_identifier_bearing()
}
