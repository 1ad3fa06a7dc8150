//! Recoverable diagnostics
//!
//!     A [Problem] is recorded, never thrown: the pass that finds one keeps going and still
//!     returns a valid tree. Whether problems should stop a run is the caller's decision
//!     (the command line has a switch for it).

use crate::quire::tree::location::describe;
use crate::quire::tree::Location;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemKind {
    /// An explicit identifier was registered twice; the first registration wins.
    AlreadyDefined,
    /// A relative identifier has no absolute identifier above it.
    MissingAbsoluteParent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub kind: ProblemKind,
    pub message: String,
    pub location: Option<Location>,
}

impl Problem {
    pub fn new(kind: ProblemKind, message: impl Into<String>, location: Option<Location>) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
        }
    }
}

/// Problems without a location sort first, then by location, then by message.
impl Ord for Problem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.location
            .cmp(&other.location)
            .then_with(|| self.message.cmp(&other.message))
            .then_with(|| self.kind.cmp(&other.kind))
    }
}

impl PartialOrd for Problem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", describe(self.location.as_ref()), self.message)
    }
}
