//! Tree-mangling passes
//!
//!     Each pass is a pure function from one immutable tree to the next. Passes that rebuild
//!     structure walk the tree with [MirroredPostorder], rewriting one node at a time from
//!     the path the traversal hands them: children are settled before their parent, and the
//!     nodes still to visit keep their indices when the current node changes.
//!
//!     Passes run in this order in the standard pipeline:
//!
//!         1. [list]: group triple-hyphen paragraphs.
//!         2. [embedded_list]: nest embedded list items by indentation.
//!         3. [url]: attach quoted or bracketed names to the URLs they precede.
//!         4. [level]: nest level introducers by marker depth.
//!         5. [tag]: canonical tags, implicit tags, promotion.
//!         6. [tag_filter]: optional, keep scopes carrying requested tags.
//!         7. [separators]: optional, drop remaining whitespace and line breaks.

pub mod embedded_list;
pub mod level;
pub mod list;
pub mod separators;
pub mod tag;
pub mod tag_filter;
pub mod url;

pub use embedded_list::EmbeddedListMangler;
pub use level::LevelMangler;
pub use list::ListMangler;
pub use separators::SeparatorsMangler;
pub use tag::TagMangler;
pub use tag_filter::TagFilter;
pub use url::UrlMangler;

use crate::quire::error::ManglingError;
use crate::quire::traversal::{MirroredPostorder, Preorder};
use crate::quire::tree::{is_traversable, NodeKind, SyntacticTree};
use crate::quire::treepath::Treepath;

/// Walk the whole snapshot `root` points into, bottom-up and right to left, replacing each
/// node for which `rewrite` returns a new tree. Opaque nodes are visited but not entered.
pub(crate) fn rewrite_postorder<F>(root: &Treepath, mut rewrite: F) -> Result<SyntacticTree, ManglingError>
where
    F: FnMut(&Treepath) -> Result<Option<SyntacticTree>, ManglingError>,
{
    let traversal = MirroredPostorder::new(is_traversable);
    let start = Treepath::root(root.start().clone());
    let mut current = traversal.first(&start);
    let mut last = start;
    while let Some(path) = current {
        let path = match rewrite(&path)? {
            Some(replacement) => path.replace_end(replacement),
            None => path,
        };
        current = traversal.next(&path);
        last = path;
    }
    Ok(last.start().clone())
}

/// Paths to every reachable node of one of `kinds`, in document order. Used to check that a
/// pass left nothing behind.
pub fn find_kinds(tree: &SyntacticTree, kinds: &[NodeKind]) -> Vec<Treepath> {
    let traversal = Preorder::new(is_traversable);
    let mut found = Vec::new();
    let mut current = traversal.first(&Treepath::root(tree.clone()));
    while let Some(path) = current {
        if path.end().is_one_of(kinds) {
            found.push(path.clone());
        }
        current = traversal.next(&path);
    }
    found
}
