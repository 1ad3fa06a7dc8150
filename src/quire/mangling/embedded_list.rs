//! Embedded list nesting by indentation
//!
//!     The producer leaves embedded list items flat, interleaved with the whitespace and line
//!     breaks that carry their indentation:
//!
//!     ```text
//!     - w                 (hyphen-item w) (line-break)
//!       - y               (whitespace "  ") (hyphen-item y) (line-break)
//!     - x                 (hyphen-item x)
//!     ```
//!
//!     This pass turns each maximal run into nested wrappers:
//!
//!     ```text
//!     (embedded-list-with-hyphen (item w) (embedded-list-with-hyphen (item y)) (item x))
//!     ```
//!
//!     A stack of open levels, keyed by the indentation width of the item that opened each,
//!     decides where every item goes. An item wider than the top opens a deeper level; a
//!     narrower one closes levels until a width matches exactly, and fails with
//!     [ManglingError::InconsistentIndent] when none does. Column 0 always matches: a run that
//!     started indented ends there, and the item opens a new sibling run. Separators inside and
//!     after a run are consumed; content around the run is left alone.

use super::{find_kinds, rewrite_postorder};
use crate::quire::error::ManglingError;
use crate::quire::tree::{Location, NodeKind, SyntacticTree};
use crate::quire::treepath::Treepath;
use tracing::{debug, trace};

const FLAT_ITEMS: [NodeKind; 2] = [
    NodeKind::EmbeddedListItemWithHyphen,
    NodeKind::EmbeddedListItemNumbered,
];

#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedListMangler;

impl EmbeddedListMangler {
    pub fn new() -> Self {
        EmbeddedListMangler
    }

    pub fn mangle(&self, root: &Treepath) -> Result<SyntacticTree, ManglingError> {
        debug!("rehierarchizing embedded lists");
        rewrite_postorder(root, |path| {
            let children = path.end().children();
            if !children.iter().any(|child| child.is_one_of(&FLAT_ITEMS)) {
                return Ok(None);
            }
            let rebuilt = rebuild_children(children, inherited_indent(path))?;
            Ok(Some(path.end().with_children(rebuilt)))
        })
    }

    /// True when no flat embedded list item is left anywhere reachable.
    pub fn is_settled(tree: &SyntacticTree) -> bool {
        find_kinds(tree, &FLAT_ITEMS).is_empty()
    }
}

fn wrapper_kind(item_kind: NodeKind) -> NodeKind {
    match item_kind {
        NodeKind::EmbeddedListItemNumbered => NodeKind::EmbeddedListWithNumberSign,
        _ => NodeKind::EmbeddedListWithHyphen,
    }
}

fn whitespace_width(tree: &SyntacticTree) -> usize {
    tree.text().map_or(0, |text| text.chars().count())
}

/// Indentation of whatever comes right before the node at the end of `path`: its left
/// sibling when that is whitespace, otherwise the indentation inherited by its parent when
/// it is a first child.
fn inherited_indent(path: &Treepath) -> usize {
    match path.previous_sibling() {
        Some(sibling) if sibling.end().is(NodeKind::Whitespace) => whitespace_width(sibling.end()),
        Some(_) => 0,
        None => path.previous().map_or(0, inherited_indent),
    }
}

fn rebuild_children(
    children: &[SyntacticTree],
    inherited: usize,
) -> Result<Vec<SyntacticTree>, ManglingError> {
    let mut rebuilt = Vec::with_capacity(children.len());
    let mut index = 0;
    while index < children.len() {
        let child = &children[index];
        if child.is_one_of(&FLAT_ITEMS) {
            let first_width = match index.checked_sub(1).map(|previous| &children[previous]) {
                Some(previous) if previous.is(NodeKind::Whitespace) => whitespace_width(previous),
                Some(_) => 0,
                None => inherited,
            };
            let (list, next) = rehierarchize_run(children, index, first_width)?;
            rebuilt.push(list);
            index = next;
        } else {
            rebuilt.push(child.clone());
            index += 1;
        }
    }
    Ok(rebuilt)
}

/// Consume the run starting at `start`; returns the wrapper and the index after the run.
fn rehierarchize_run(
    children: &[SyntacticTree],
    start: usize,
    first_width: usize,
) -> Result<(SyntacticTree, usize), ManglingError> {
    let item_kind = children[start].kind();
    let mut stack = ListStack::open(first_width, &children[start]);
    let mut width = 0;
    let mut index = start + 1;

    while let Some(child) = children.get(index) {
        match child.kind() {
            kind if kind == item_kind => {
                trace!(width, "embedded list item");
                if stack.accept(width, child)? == Placement::NextRun {
                    break;
                }
                width = 0;
            }
            NodeKind::LineBreak => width = 0,
            NodeKind::Whitespace => width = whitespace_width(child),
            _ => break,
        }
        index += 1;
    }

    Ok((stack.finish(), index))
}

#[derive(Debug, PartialEq, Eq)]
enum Placement {
    InRun,
    /// Back at column 0 under a run that started indented: the item opens a sibling run.
    NextRun,
}

struct OpenList {
    width: usize,
    kind: NodeKind,
    location: Option<Location>,
    children: Vec<SyntacticTree>,
}

impl OpenList {
    fn new(width: usize, item: &SyntacticTree) -> Self {
        OpenList {
            width,
            kind: wrapper_kind(item.kind()),
            location: item.location().cloned(),
            children: vec![nested_item(item)],
        }
    }

    fn into_tree(self) -> SyntacticTree {
        SyntacticTree::build(self.kind, None, self.location, self.children)
    }
}

fn nested_item(item: &SyntacticTree) -> SyntacticTree {
    item.with_kind(NodeKind::EmbeddedListItem)
}

/// Open levels of one run. The outermost level always exists, so a run never ends empty.
struct ListStack {
    outermost: OpenList,
    inner: Vec<OpenList>,
}

impl ListStack {
    fn open(width: usize, item: &SyntacticTree) -> Self {
        ListStack {
            outermost: OpenList::new(width, item),
            inner: Vec::new(),
        }
    }

    fn top(&self) -> &OpenList {
        self.inner.last().unwrap_or(&self.outermost)
    }

    fn top_mut(&mut self) -> &mut OpenList {
        self.inner.last_mut().unwrap_or(&mut self.outermost)
    }

    fn widths(&self) -> Vec<usize> {
        std::iter::once(&self.outermost)
            .chain(&self.inner)
            .map(|level| level.width)
            .collect()
    }

    fn accept(&mut self, width: usize, item: &SyntacticTree) -> Result<Placement, ManglingError> {
        if width > self.top().width {
            self.inner.push(OpenList::new(width, item));
            return Ok(Placement::InRun);
        }
        let open = self.widths();
        if !open.contains(&width) {
            // column 0 is the implicit root, always open
            if width == 0 {
                return Ok(Placement::NextRun);
            }
            return Err(ManglingError::InconsistentIndent {
                width,
                open,
                location: item.location().cloned(),
            });
        }
        while self.top().width > width {
            self.close_top();
        }
        self.top_mut().children.push(nested_item(item));
        Ok(Placement::InRun)
    }

    /// Close the innermost level, attaching it to the level below.
    fn close_top(&mut self) {
        if let Some(top) = self.inner.pop() {
            let tree = top.into_tree();
            self.top_mut().children.push(tree);
        }
    }

    fn finish(mut self) -> SyntacticTree {
        while !self.inner.is_empty() {
            self.close_top();
        }
        self.outermost.into_tree()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quire::testing::fixtures::*;

    fn mangle(tree: SyntacticTree) -> Result<SyntacticTree, ManglingError> {
        EmbeddedListMangler::new().mangle(&Treepath::root(tree))
    }

    fn item(name: &str) -> SyntacticTree {
        hyphen_item(vec![word(name)])
    }

    fn nested(name: &str) -> SyntacticTree {
        list_item(vec![word(name)])
    }

    #[test]
    fn test_single_item() {
        let tree = novella(vec![paragraph(vec![item("w")])]);
        assert_eq!(
            mangle(tree).unwrap(),
            novella(vec![paragraph(vec![hyphen_list(vec![nested("w")])])])
        );
    }

    #[test]
    fn test_depth_1_then_2_then_1() {
        let tree = novella(vec![paragraph(vec![
            item("w"),
            line_break(),
            whitespace("  "),
            item("y"),
            line_break(),
            item("x"),
        ])]);
        assert_eq!(
            mangle(tree).unwrap(),
            novella(vec![paragraph(vec![hyphen_list(vec![
                nested("w"),
                hyphen_list(vec![nested("y")]),
                nested("x"),
            ])])])
        );
    }

    #[test]
    fn test_depth_1_then_2_then_3_then_1() {
        let tree = novella(vec![paragraph(vec![
            item("a"),
            line_break(),
            whitespace(" "),
            item("b"),
            line_break(),
            whitespace("   "),
            item("c"),
            line_break(),
            item("d"),
        ])]);
        assert_eq!(
            mangle(tree).unwrap(),
            novella(vec![paragraph(vec![hyphen_list(vec![
                nested("a"),
                hyphen_list(vec![nested("b"), hyphen_list(vec![nested("c")])]),
                nested("d"),
            ])])])
        );
    }

    #[test]
    fn test_detect_inconsistent_indent() {
        let tree = novella(vec![paragraph(vec![
            whitespace("  "),
            item("x"),
            line_break(),
            whitespace("  "),
            item("y"),
            line_break(),
            whitespace(" "),
            item("z"),
        ])]);
        match mangle(tree) {
            Err(ManglingError::InconsistentIndent { width, open, .. }) => {
                assert_eq!(width, 1);
                assert_eq!(open, vec![2]);
            }
            other => panic!("expected inconsistent indent, got {:?}", other),
        }
    }

    #[test]
    fn test_surrounding_content_is_untouched() {
        let tree = novella(vec![paragraph(vec![
            word("before"),
            line_break(),
            item("w"),
            line_break(),
            item("x"),
        ])]);
        assert_eq!(
            mangle(tree).unwrap(),
            novella(vec![paragraph(vec![
                word("before"),
                line_break(),
                hyphen_list(vec![nested("w"), nested("x")]),
            ])])
        );
    }

    #[test]
    fn test_two_runs_in_two_paragraphs() {
        let tree = novella(vec![
            paragraph(vec![item("a")]),
            paragraph(vec![item("b")]),
        ]);
        assert_eq!(
            mangle(tree).unwrap(),
            novella(vec![
                paragraph(vec![hyphen_list(vec![nested("a")])]),
                paragraph(vec![hyphen_list(vec![nested("b")])]),
            ])
        );
    }

    #[test]
    fn test_runs_split_by_content_do_not_merge() {
        let tree = novella(vec![paragraph(vec![
            item("a"),
            line_break(),
            word("middle"),
            line_break(),
            item("b"),
        ])]);
        assert_eq!(
            mangle(tree).unwrap(),
            novella(vec![paragraph(vec![
                hyphen_list(vec![nested("a")]),
                word("middle"),
                line_break(),
                hyphen_list(vec![nested("b")]),
            ])])
        );
    }

    #[test]
    fn test_numbered_items_get_their_own_wrapper() {
        let tree = novella(vec![paragraph(vec![
            numbered_item(vec![word("one")]),
            line_break(),
            item("dash"),
        ])]);
        assert_eq!(
            mangle(tree).unwrap(),
            novella(vec![paragraph(vec![
                number_sign_list(vec![nested("one")]),
                hyphen_list(vec![nested("dash")]),
            ])])
        );
    }

    #[test]
    fn test_back_to_column_zero_starts_a_sibling_list() {
        let tree = novella(vec![paragraph(vec![
            whitespace("  "),
            item("a"),
            line_break(),
            item("b"),
            line_break(),
            whitespace("  "),
            item("c"),
        ])]);
        assert_eq!(
            mangle(tree).unwrap(),
            novella(vec![paragraph(vec![
                whitespace("  "),
                hyphen_list(vec![nested("a")]),
                hyphen_list(vec![nested("b"), hyphen_list(vec![nested("c")])]),
            ])])
        );
    }

    #[test]
    fn test_width_between_root_and_open_level_is_inconsistent() {
        let tree = novella(vec![paragraph(vec![
            item("a"),
            line_break(),
            whitespace("  "),
            item("b"),
            line_break(),
            whitespace(" "),
            item("c"),
        ])]);
        match mangle(tree) {
            Err(ManglingError::InconsistentIndent { width, open, .. }) => {
                assert_eq!(width, 1);
                assert_eq!(open, vec![0, 2]);
            }
            other => panic!("expected inconsistent indent, got {:?}", other),
        }
    }

    #[test]
    fn test_is_settled() {
        let flat = novella(vec![paragraph(vec![item("a")])]);
        assert!(!EmbeddedListMangler::is_settled(&flat));
        assert!(EmbeddedListMangler::is_settled(&mangle(flat).unwrap()));
    }

    #[test]
    fn test_wrapper_keeps_first_item_location() {
        let located = SyntacticTree::build(
            NodeKind::EmbeddedListItemWithHyphen,
            None,
            Some(Location::new(4, 2)),
            vec![word("a")],
        );
        let tree = novella(vec![paragraph(vec![located])]);
        let mangled = mangle(tree).unwrap();
        let list = mangled.child(0).unwrap().child(0).unwrap();
        assert_eq!(list.location(), Some(&Location::new(4, 2)));
        assert_eq!(list.child(0).unwrap().location(), Some(&Location::new(4, 2)));
    }
}
