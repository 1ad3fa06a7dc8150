//! Main module for quire library functionality

pub mod designator;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod mangling;
pub mod problem;
pub mod robust_path;
pub mod testing;
pub mod transforms;
pub mod traversal;
pub mod tree;
pub mod treepath;
