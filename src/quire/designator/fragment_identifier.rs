//! Fragment identifiers
//!
//! A non-empty list of segments written `\\a\b` in source and `\a\b` once absolute.
//! Relative identifiers compose under their absolute parent.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier has no segment")]
    Empty,
    #[error("identifier '{0}' has a blank segment")]
    BlankSegment(String),
}

/// Name of a document fragment: one or more non-blank segments, written `\a\b` in absolute
/// form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FragmentIdentifier {
    segments: Vec<String>,
}

impl FragmentIdentifier {
    pub fn new<I, S>(segments: I) -> Result<Self, IdentifierError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if segments.iter().any(|segment| segment.trim().is_empty()) {
            return Err(IdentifierError::BlankSegment(segments.join("\\")));
        }
        Ok(FragmentIdentifier { segments })
    }

    /// Parse the `\`-separated source form. Leading backslashes are ignored, so `\\a\b`,
    /// `\a\b` and `a\b` name the same fragment.
    pub fn parse(source: &str) -> Result<Self, IdentifierError> {
        let trimmed = source.trim_start_matches('\\');
        if trimmed.is_empty() {
            return Err(IdentifierError::Empty);
        }
        Self::new(trimmed.split('\\'))
    }

    /// `relative` appended under `parent`.
    pub fn compose(parent: &FragmentIdentifier, relative: &FragmentIdentifier) -> Self {
        let mut segments = parent.segments.clone();
        segments.extend(relative.segments.iter().cloned());
        FragmentIdentifier { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segment_at(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// True when `other` starts with every segment of `self`. An identifier is its own parent.
    pub fn is_parent_of(&self, other: &FragmentIdentifier) -> bool {
        other.segments.starts_with(&self.segments)
    }

    /// Same segments minus the last one, if any remain.
    pub fn parent(&self) -> Option<FragmentIdentifier> {
        match self.segments.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(FragmentIdentifier {
                segments: rest.to_vec(),
            }),
            _ => None,
        }
    }

    pub fn absolute_representation(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FragmentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "\\{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for FragmentIdentifier {
    type Err = IdentifierError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        FragmentIdentifier::parse(source)
    }
}

impl Serialize for FragmentIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
