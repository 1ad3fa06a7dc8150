//! Transform pipeline infrastructure
//!
//! Every step from source text to a compiled tree is a stage implementing [Runnable]. A
//! [Transform] wraps stages so they chain with `.then()`, the compiler checking that each
//! stage accepts what the previous one produced:
//!
//! ```rust,ignore
//! let mangle = Transform::from_fn(Ok)
//!     .then(ListStage::new())      // SyntacticTree -> SyntacticTree
//!     .then(LevelStage::new());    // SyntacticTree -> SyntacticTree
//! ```
//!
//! The usual chains are prebuilt as lazy statics in [standard], next to the [Pipeline]
//! that also runs filtering and designator resolution.
//!
//! [Pipeline]: standard::Pipeline

pub mod stages;
pub mod standard;

use crate::quire::error::ManglingError;
use std::fmt;

/// Error that can occur during transformation
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Generic error with message
    Error(String),
    /// Stage failed with specific error
    StageFailed { stage: String, message: String },
}

impl TransformError {
    pub fn stage(stage: &str, error: impl fmt::Display) -> Self {
        TransformError::StageFailed {
            stage: stage.to_string(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::Error(msg) => write!(f, "{}", msg),
            TransformError::StageFailed { stage, message } => {
                write!(f, "Stage '{}' failed: {}", stage, message)
            }
        }
    }
}

impl std::error::Error for TransformError {}

impl From<String> for TransformError {
    fn from(s: String) -> Self {
        TransformError::Error(s)
    }
}

impl From<&str> for TransformError {
    fn from(s: &str) -> Self {
        TransformError::Error(s.to_string())
    }
}

impl From<ManglingError> for TransformError {
    fn from(error: ManglingError) -> Self {
        TransformError::Error(error.to_string())
    }
}

/// Anything that turns an `I` into an `O`; implemented by each stage.
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation from `I` to `O`.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain `stage` after this transform.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Chain a prebuilt static transform after this one.
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                next.run(intermediate)
            }),
        }
    }

    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}
