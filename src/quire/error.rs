//! Fatal conditions raised by path navigation and mangling passes
//!
//!     These abort the pass that raised them: a half-rebuilt tree means nothing to the passes
//!     downstream. Recoverable conditions are [Problem](crate::quire::problem::Problem) values
//!     instead, collected next to a still valid tree.

use crate::quire::tree::location::describe;
use crate::quire::tree::Location;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManglingError {
    #[error("child index {index} out of range for a node with {child_count} children")]
    IndexOutOfRange { index: usize, child_count: usize },

    #[error(
        "{}: inconsistent indent, width {width} matches no open list level (open: {open:?})",
        describe(.location.as_ref())
    )]
    InconsistentIndent {
        width: usize,
        open: Vec<usize>,
        location: Option<Location>,
    },

    #[error(
        "{}: bad depth order, level of depth {depth} cannot follow depth {previous}",
        describe(.location.as_ref())
    )]
    BadDepthOrder {
        depth: usize,
        previous: usize,
        location: Option<Location>,
    },

    #[error("path not resolvable: {reason}")]
    PathNotResolvable { reason: String },
}

impl ManglingError {
    pub(crate) fn not_resolvable(reason: impl Into<String>) -> Self {
        ManglingError::PathNotResolvable {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_location() {
        let error = ManglingError::BadDepthOrder {
            depth: 3,
            previous: 1,
            location: Some(Location::in_file("doc.quire", 4, 1)),
        };
        assert_eq!(
            error.to_string(),
            "doc.quire:4:1: bad depth order, level of depth 3 cannot follow depth 1"
        );

        let error = ManglingError::InconsistentIndent {
            width: 1,
            open: vec![2],
            location: None,
        };
        assert!(error.to_string().starts_with("<unknown file>:-1:-1: inconsistent indent"));
    }
}
