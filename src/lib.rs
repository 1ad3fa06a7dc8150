//! # quire
//!
//! Front end for the quire document markup.
//!
//! File Layout
//!
//! The grammar only produces a flat, lightly structured tree: paragraphs, level introducers
//! and embedded list items all sit side by side. The real document structure is imposed
//! afterwards by a chain of tree-mangling passes, each a pure function from one immutable
//! tree to the next:
//!
//! src/quire
//!   ├── tree          Node kinds, locations, the immutable SyntacticTree
//!   ├── treepath      Paths into one tree snapshot, copy-on-write edits
//!   ├── traversal     Filtered pre-order and mirrored post-order stepping
//!   ├── robust_path   Paths that survive edits between passes
//!   ├── lexing        logos tokenizer and the flat tree producer
//!   ├── mangling      List, embedded list, level, tag and separator passes
//!   ├── designator    Fragment identifiers and their resolution
//!   ├── transforms    Stage composition and the standard pipelines
//!   └── formats       Treeviz and serde snapshots
//!
//! For testing conventions, see the [testing module](quire::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod quire;
