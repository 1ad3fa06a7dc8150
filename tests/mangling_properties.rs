//! Property-based tests for the mangling passes and designator resolution
//!
//! Trees are generated directly with the fixtures so that each property controls exactly the
//! structure it talks about: indentation sequences for lists, marker sequences for levels,
//! tag placement for filtering, identifier placement for designators.

use proptest::prelude::*;
use quire::quire::designator::DesignatorInterpreter;
use quire::quire::mangling::{
    EmbeddedListMangler, LevelMangler, ListMangler, TagFilter, TagMangler,
};
use quire::quire::testing::fixtures::*;
use quire::quire::transforms::standard::MANGLE;
use quire::quire::tree::{NodeKind, SyntacticTree, TagBehavior};
use quire::quire::treepath::Treepath;

fn inline_strategy() -> impl Strategy<Value = SyntacticTree> {
    prop_oneof![
        "[a-z]{1,6}".prop_map(|w| word(&w)),
        " {1,3}".prop_map(|w| whitespace(&w)),
        Just(line_break()),
        Just(punctuation(",")),
    ]
}

/// Documents with no list item, introducer or tag anywhere.
fn plain_document_strategy() -> impl Strategy<Value = SyntacticTree> {
    let block = prop_oneof![
        prop::collection::vec(inline_strategy(), 0..8).prop_map(paragraph),
        "[a-z =+-]{0,20}".prop_map(|raw| literal_block(&raw)),
    ];
    prop::collection::vec(block, 0..6).prop_map(novella)
}

/// Item depths where each step goes at most one deeper than the previous item.
fn list_depths_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..4, 1..12).prop_map(|raw| {
        let mut depths: Vec<usize> = Vec::with_capacity(raw.len());
        for wanted in raw {
            let depth = depths.last().map_or(0, |previous| wanted.min(previous + 1));
            depths.push(depth);
        }
        depths
    })
}

/// Level depths starting at `base`, never below it, rising one step at a time.
fn level_depths_strategy() -> impl Strategy<Value = Vec<usize>> {
    (1usize..4, prop::collection::vec(0usize..6, 0..10)).prop_map(|(base, raw)| {
        let mut depths = vec![base];
        for wanted in raw {
            let previous = depths[depths.len() - 1];
            depths.push(base + wanted % (previous - base + 2));
        }
        depths
    })
}

fn tag_strategy() -> impl Strategy<Value = Option<&'static str>> {
    prop::option::of(prop_oneof![Just("a"), Just("b")])
}

fn tagged_paragraph_strategy() -> impl Strategy<Value = SyntacticTree> {
    tag_strategy().prop_map(|tag| {
        let mut children: Vec<SyntacticTree> = tag.into_iter().map(explicit_tag).collect();
        children.push(word("text"));
        paragraph(children)
    })
}

fn tagged_level(tag: Option<&str>, mut content: Vec<SyntacticTree>) -> SyntacticTree {
    let mut children: Vec<SyntacticTree> = tag.into_iter().map(explicit_tag).collect();
    children.push(titled("L"));
    children.append(&mut content);
    level(children)
}

/// Two levels deep, tags scattered over levels and paragraphs.
fn tagged_document_strategy() -> impl Strategy<Value = SyntacticTree> {
    let inner = (
        tag_strategy(),
        prop::collection::vec(tagged_paragraph_strategy(), 0..3),
    )
        .prop_map(|(tag, paragraphs)| tagged_level(tag, paragraphs));
    let outer = (
        tag_strategy(),
        prop::collection::vec(tagged_paragraph_strategy(), 0..3),
        prop::collection::vec(inner, 0..3),
    )
        .prop_map(|(tag, mut paragraphs, mut levels)| {
            paragraphs.append(&mut levels);
            tagged_level(tag, paragraphs)
        });
    prop::collection::vec(outer, 0..4).prop_map(novella)
}

/// Levels with titles from a small vocabulary, so implicit identifiers collide often.
fn identified_document_strategy() -> impl Strategy<Value = SyntacticTree> {
    let title = prop_oneof![Just("Intro"), Just("Other"), Just("Notes")];
    let inner = (
        prop::option::of(prop_oneof![Just("r"), Just("s")]),
        title.clone(),
    )
        .prop_map(|(relative, title)| {
            let mut children: Vec<SyntacticTree> =
                relative.into_iter().map(relative_identifier).collect();
            children.push(titled(title));
            level(children)
        });
    let outer = (
        prop::option::of(prop_oneof![Just("x"), Just("y")]),
        title,
        prop::collection::vec(inner, 0..3),
    )
        .prop_map(|(absolute, title, mut inner)| {
            let mut children: Vec<SyntacticTree> =
                absolute.into_iter().map(absolute_identifier).collect();
            children.push(titled(title));
            children.append(&mut inner);
            level(children)
        });
    prop::collection::vec(outer, 0..5).prop_map(novella)
}

fn embedded_list(depths: &[usize]) -> SyntacticTree {
    let mut children = Vec::new();
    for (index, depth) in depths.iter().enumerate() {
        if index > 0 {
            children.push(line_break());
        }
        if *depth > 0 {
            children.push(whitespace(&"  ".repeat(*depth)));
        }
        children.push(hyphen_item(vec![word(&format!("i{}", index))]));
    }
    novella(vec![paragraph(children)])
}

fn item_wrapper_counts(tree: &SyntacticTree, wrappers: usize, out: &mut Vec<(String, usize)>) {
    if tree.is(NodeKind::EmbeddedListItem) {
        let name = tree
            .child(0)
            .and_then(SyntacticTree::text)
            .unwrap_or_default()
            .to_string();
        out.push((name, wrappers));
        return;
    }
    let wrappers = wrappers + usize::from(tree.is(NodeKind::EmbeddedListWithHyphen));
    for child in tree.children() {
        item_wrapper_counts(child, wrappers, out);
    }
}

fn level_nesting(tree: &SyntacticTree, enclosing: usize, out: &mut Vec<(String, usize)>) {
    let enclosing = if tree.is(NodeKind::Level) {
        let name = tree
            .children()
            .iter()
            .find(|child| child.is(NodeKind::LevelTitle))
            .and_then(|title| title.child(0))
            .and_then(SyntacticTree::text)
            .unwrap_or_default()
            .to_string();
        out.push((name, enclosing + 1));
        enclosing + 1
    } else {
        enclosing
    };
    for child in tree.children() {
        level_nesting(child, enclosing, out);
    }
}

fn is_tag_owner(tree: &SyntacticTree) -> bool {
    matches!(
        tree.kind().tag_behavior(),
        TagBehavior::Scope | TagBehavior::Terminal
    )
}

fn has_tagged_descendant(filter: &TagFilter, tree: &SyntacticTree) -> bool {
    tree.children().iter().any(|child| {
        (is_tag_owner(child) && filter.has_tag(child)) || has_tagged_descendant(filter, child)
    })
}

/// Tagged owners with no tagged owner above them.
fn topmost_tagged(filter: &TagFilter, tree: &SyntacticTree) -> usize {
    if is_tag_owner(tree) && filter.has_tag(tree) {
        return 1;
    }
    tree.children()
        .iter()
        .map(|child| topmost_tagged(filter, child))
        .sum()
}

fn all_owners_justified(filter: &TagFilter, tree: &SyntacticTree) -> bool {
    tree.children().iter().all(|child| {
        if !is_tag_owner(child) {
            return true;
        }
        if filter.has_tag(child) {
            return true;
        }
        has_tagged_descendant(filter, child) && all_owners_justified(filter, child)
    })
}

proptest! {
    #[test]
    fn passes_leave_plain_documents_unchanged(tree in plain_document_strategy()) {
        let root = Treepath::root(tree.clone());
        prop_assert_eq!(&ListMangler::new().mangle(&root).unwrap(), &tree);
        prop_assert_eq!(&EmbeddedListMangler::new().mangle(&root).unwrap(), &tree);
        prop_assert_eq!(&LevelMangler::new().mangle(&root).unwrap(), &tree);
        prop_assert_eq!(&TagMangler::new().mangle(&root).unwrap(), &tree);
        prop_assert_eq!(&TagFilter::new(Vec::<String>::new()).filter(&root), &tree);
        prop_assert_eq!(&MANGLE.run(tree.clone()).unwrap(), &tree);
    }

    #[test]
    fn list_items_nest_one_wrapper_per_indent_step(depths in list_depths_strategy()) {
        let mangled = EmbeddedListMangler::new()
            .mangle(&Treepath::root(embedded_list(&depths)))
            .unwrap();
        prop_assert!(EmbeddedListMangler::is_settled(&mangled));

        let mut actual = Vec::new();
        item_wrapper_counts(&mangled, 0, &mut actual);
        let expected: Vec<(String, usize)> = depths
            .iter()
            .enumerate()
            .map(|(index, depth)| (format!("i{}", index), depth + 1))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn levels_nest_by_marker_length(depths in level_depths_strategy()) {
        let flat = novella(
            depths
                .iter()
                .enumerate()
                .map(|(index, depth)| {
                    introducer(&"=".repeat(depth + 1), vec![titled(&format!("t{}", index))])
                })
                .collect(),
        );
        let mangled = LevelMangler::new().mangle(&Treepath::root(flat)).unwrap();
        prop_assert!(LevelMangler::is_settled(&mangled));

        let base = depths[0];
        let mut actual = Vec::new();
        level_nesting(&mangled, 0, &mut actual);
        let expected: Vec<(String, usize)> = depths
            .iter()
            .enumerate()
            .map(|(index, depth)| (format!("t{}", index), depth - base + 1))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn tag_filter_keeps_only_what_leads_to_a_tag(tree in tagged_document_strategy()) {
        let filter = TagFilter::new(["a"]);
        let filtered = filter.filter(&Treepath::root(tree.clone()));

        prop_assert!(filtered.is(NodeKind::Novella));
        prop_assert!(all_owners_justified(&filter, &filtered));
        prop_assert_eq!(topmost_tagged(&filter, &filtered), topmost_tagged(&filter, &tree));
    }

    #[test]
    fn identifier_maps_are_disjoint_and_resolvable(tree in identified_document_strategy()) {
        let interpreter = DesignatorInterpreter::new(&Treepath::root(tree.clone()));
        let pure = interpreter.pure_identifiers();
        let derived = interpreter.derived_identifiers();

        for identifier in derived.keys() {
            prop_assert!(!pure.contains_key(identifier), "{} in both maps", identifier);
        }
        for path in pure.values().chain(derived.values()) {
            prop_assert!(path.resolve(&tree).is_ok());
        }

        let (enriched, remapped) = interpreter.enrich(&tree).unwrap();
        prop_assert_eq!(
            remapped.pure_identifiers().keys().collect::<Vec<_>>(),
            pure.keys().collect::<Vec<_>>()
        );
        for (identifier, path) in remapped.pure_identifiers() {
            let node = path.resolve(&enriched).unwrap();
            let first = node.end().child(0).unwrap();
            prop_assert!(first.is(NodeKind::ExplicitIdentifier));
            let absolute = identifier.absolute_representation();
            prop_assert_eq!(first.text(), Some(absolute.as_str()));
        }
        for path in remapped.derived_identifiers().values() {
            let node = path.resolve(&enriched).unwrap();
            prop_assert!(node.end().child(0).unwrap().is(NodeKind::ImplicitIdentifier));
        }
    }
}
