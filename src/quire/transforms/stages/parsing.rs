//! Parse stage
//!
//! Source text in, flat tree out. One source gives a `Novella`; several give an `Opus`.

use crate::quire::lexing::{parse_document, parse_opus};
use crate::quire::transforms::{Runnable, TransformError};
use crate::quire::tree::SyntacticTree;

/// Text of one document and the file it came from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub text: String,
    pub file: Option<String>,
}

impl Source {
    pub fn new(text: impl Into<String>) -> Self {
        Source {
            text: text.into(),
            file: None,
        }
    }

    pub fn named(file: impl Into<String>, text: impl Into<String>) -> Self {
        Source {
            text: text.into(),
            file: Some(file.into()),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ParseStage;

impl ParseStage {
    pub fn new() -> Self {
        ParseStage
    }
}

impl Runnable<String, SyntacticTree> for ParseStage {
    fn run(&self, input: String) -> Result<SyntacticTree, TransformError> {
        Ok(parse_document(&input, None))
    }
}

impl Runnable<Vec<Source>, SyntacticTree> for ParseStage {
    fn run(&self, input: Vec<Source>) -> Result<SyntacticTree, TransformError> {
        match input.as_slice() {
            [] => Err(TransformError::stage("ParseStage", "no source to parse")),
            [single] => Ok(parse_document(&single.text, single.file.as_deref())),
            several => Ok(parse_opus(
                several
                    .iter()
                    .map(|source| (source.text.as_str(), source.file.as_deref())),
            )),
        }
    }
}
