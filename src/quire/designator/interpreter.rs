//! Identifier collection and enrichment
//!
//!     One pre-order walk over the identifier-bearing nodes, carrying the nearest absolute
//!     identifier found so far:
//!
//!         - an absolute identifier goes to the pure map; a second registration of the same
//!           name is an `AlreadyDefined` problem and the first one stays;
//!         - a relative identifier is composed with the carried one and registered the same
//!           way, or is a `MissingAbsoluteParent` problem when nothing is carried;
//!         - a level with neither gets its implicit identifier registered in the derived map,
//!           both alone and composed with the carried one.
//!
//!     Derived names collide routinely (two sections titled "Examples"), so a derived name
//!     registered twice is not a problem: it is removed altogether once the walk is done. A
//!     name present in both maps is only kept in the pure one.

use super::implicit::implicit_identifier;
use super::{is_identifier_bearing, FragmentIdentifier};
use crate::quire::error::ManglingError;
use crate::quire::mangling::rewrite_postorder;
use crate::quire::problem::{Problem, ProblemKind};
use crate::quire::robust_path::RobustPath;
use crate::quire::tree::{NodeKind, SyntacticTree};
use crate::quire::treepath::Treepath;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, trace, warn};

pub type IdentifierMap = BTreeMap<FragmentIdentifier, RobustPath>;

const RAW_IDENTIFIERS: [NodeKind; 4] = [
    NodeKind::AbsoluteIdentifier,
    NodeKind::RelativeIdentifier,
    NodeKind::ExplicitIdentifier,
    NodeKind::ImplicitIdentifier,
];

#[derive(Debug, Clone)]
pub struct DesignatorInterpreter {
    pure: IdentifierMap,
    derived: IdentifierMap,
    problems: Vec<Problem>,
}

impl DesignatorInterpreter {
    pub fn new(root: &Treepath) -> Self {
        let mut collector = Collector::default();
        collect(&mut collector, root, None);
        collector.settle()
    }

    /// Explicitly authored identifiers.
    pub fn pure_identifiers(&self) -> &IdentifierMap {
        &self.pure
    }

    /// Identifiers derived from titles, minus collisions and names already in the pure map.
    pub fn derived_identifiers(&self) -> &IdentifierMap {
        &self.derived
    }

    /// Sorted by location.
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }

    /// Pure map first, then derived.
    pub fn get(&self, identifier: &FragmentIdentifier) -> Option<&RobustPath> {
        self.pure
            .get(identifier)
            .or_else(|| self.derived.get(identifier))
    }

    pub fn resolve(
        &self,
        tree: &SyntacticTree,
        identifier: &FragmentIdentifier,
    ) -> Result<Treepath, ManglingError> {
        self.get(identifier)
            .ok_or_else(|| ManglingError::not_resolvable(format!("no fragment named {}", identifier)))?
            .resolve(tree)
    }

    /// The subtree `identifier` designates in `tree`.
    pub fn extract_fragment(
        &self,
        tree: &SyntacticTree,
        identifier: &FragmentIdentifier,
    ) -> Result<SyntacticTree, ManglingError> {
        Ok(self.resolve(tree, identifier)?.end().clone())
    }

    /// Replace raw identifier nodes with canonical ones, then point both maps at the
    /// enriched tree.
    ///
    /// Every identified node loses its `AbsoluteIdentifier` and `RelativeIdentifier` children
    /// and gains an `ExplicitIdentifier` (pure) or `ImplicitIdentifier` (derived) first
    /// child holding the absolute representation. When several derived names designate the
    /// same node, the longest one is written.
    pub fn enrich(
        &self,
        tree: &SyntacticTree,
    ) -> Result<(SyntacticTree, DesignatorInterpreter), ManglingError> {
        debug!(
            pure = self.pure.len(),
            derived = self.derived.len(),
            "enriching identifiers"
        );
        let marks = self.marks(tree)?;

        let enriched = rewrite_postorder(&Treepath::root(tree.clone()), |path| {
            let node = path.end();
            if !is_identifier_bearing(node) {
                return Ok(None);
            }
            let mark = marks.get(&path.indices());
            let has_raw = node.children().iter().any(|child| child.is_one_of(&RAW_IDENTIFIERS));
            if mark.is_none() && !has_raw {
                return Ok(None);
            }
            Ok(Some(node.with_children(enriched_children(node, mark))))
        })?;

        let interpreter = DesignatorInterpreter {
            pure: remap(&self.pure, &enriched)?,
            derived: remap(&self.derived, &enriched)?,
            problems: self.problems.clone(),
        };
        Ok((enriched, interpreter))
    }

    /// Identifiers to write on each node, keyed by the node's indices in `tree`.
    fn marks(&self, tree: &SyntacticTree) -> Result<HashMap<Vec<usize>, Mark>, ManglingError> {
        let mut marks: HashMap<Vec<usize>, Mark> = HashMap::new();
        for (identifier, path) in &self.pure {
            let indices = path.resolve(tree)?.indices();
            marks.entry(indices).or_default().explicit = Some(identifier.clone());
        }
        for (identifier, path) in &self.derived {
            let indices = path.resolve(tree)?.indices();
            let slot = &mut marks.entry(indices).or_default().implicit;
            if slot
                .as_ref()
                .map_or(true, |current| identifier.segment_count() > current.segment_count())
            {
                *slot = Some(identifier.clone());
            }
        }
        Ok(marks)
    }
}

#[derive(Default)]
struct Mark {
    explicit: Option<FragmentIdentifier>,
    implicit: Option<FragmentIdentifier>,
}

fn enriched_children(node: &SyntacticTree, mark: Option<&Mark>) -> Vec<SyntacticTree> {
    let mut children = Vec::with_capacity(node.child_count() + 1);
    if let Some(mark) = mark {
        if let Some(identifier) = &mark.explicit {
            children.push(SyntacticTree::leaf(
                NodeKind::ExplicitIdentifier,
                identifier.absolute_representation(),
            ));
        }
        if let Some(identifier) = &mark.implicit {
            children.push(SyntacticTree::leaf(
                NodeKind::ImplicitIdentifier,
                identifier.absolute_representation(),
            ));
        }
    }
    children.extend(
        node.children()
            .iter()
            .filter(|child| !child.is_one_of(&RAW_IDENTIFIERS))
            .cloned(),
    );
    children
}

fn remap(map: &IdentifierMap, tree: &SyntacticTree) -> Result<IdentifierMap, ManglingError> {
    map.iter()
        .map(|(identifier, path)| {
            let resolved = path.resolve(tree)?;
            Ok((
                identifier.clone(),
                RobustPath::create(&resolved, is_identifier_bearing),
            ))
        })
        .collect()
}

enum Definition {
    Absolute(FragmentIdentifier),
    Relative(FragmentIdentifier),
    Implicit(FragmentIdentifier),
    Nothing,
}

fn definition_of(tree: &SyntacticTree) -> Definition {
    for child in tree.children() {
        let parsed = || child.text().and_then(|text| FragmentIdentifier::parse(text).ok());
        match child.kind() {
            NodeKind::AbsoluteIdentifier | NodeKind::ExplicitIdentifier => {
                if let Some(identifier) = parsed() {
                    return Definition::Absolute(identifier);
                }
            }
            NodeKind::RelativeIdentifier => {
                if let Some(identifier) = parsed() {
                    return Definition::Relative(identifier);
                }
            }
            _ => {}
        }
    }
    implicit_identifier(tree).map_or(Definition::Nothing, Definition::Implicit)
}

#[derive(Default)]
struct Collector {
    pure: IdentifierMap,
    derived: IdentifierMap,
    derived_collisions: BTreeSet<FragmentIdentifier>,
    problems: Vec<Problem>,
}

impl Collector {
    fn register_pure(&mut self, identifier: FragmentIdentifier, path: &Treepath) {
        if self.pure.contains_key(&identifier) {
            self.problems.push(Problem::new(
                ProblemKind::AlreadyDefined,
                format!("Already defined: {}", identifier),
                path.end().location().cloned(),
            ));
            return;
        }
        trace!(%identifier, "pure identifier");
        self.pure
            .insert(identifier, RobustPath::create(path, is_identifier_bearing));
    }

    fn register_derived(&mut self, identifier: FragmentIdentifier, path: &Treepath) {
        if self.derived.contains_key(&identifier) {
            self.derived_collisions.insert(identifier);
            return;
        }
        trace!(%identifier, "derived identifier");
        self.derived
            .insert(identifier, RobustPath::create(path, is_identifier_bearing));
    }

    fn settle(mut self) -> DesignatorInterpreter {
        for collision in &self.derived_collisions {
            debug!(identifier = %collision, "dropping colliding derived identifier");
            self.derived.remove(collision);
        }
        let pure = &self.pure;
        self.derived.retain(|identifier, _| !pure.contains_key(identifier));

        self.problems.sort();
        for problem in &self.problems {
            warn!("{}", problem);
        }
        DesignatorInterpreter {
            pure: self.pure,
            derived: self.derived,
            problems: self.problems,
        }
    }
}

fn collect(collector: &mut Collector, path: &Treepath, parent: Option<&FragmentIdentifier>) {
    let tree = path.end();
    if !is_identifier_bearing(tree) {
        return;
    }

    let context = match definition_of(tree) {
        Definition::Absolute(identifier) => {
            collector.register_pure(identifier.clone(), path);
            Some(identifier)
        }
        Definition::Relative(relative) => match parent {
            Some(parent) => {
                let identifier = FragmentIdentifier::compose(parent, &relative);
                collector.register_pure(identifier.clone(), path);
                Some(identifier)
            }
            None => {
                collector.problems.push(Problem::new(
                    ProblemKind::MissingAbsoluteParent,
                    format!("No absolute identifier above relative identifier {}", relative),
                    tree.location().cloned(),
                ));
                None
            }
        },
        Definition::Implicit(identifier) => {
            if let Some(parent) = parent {
                collector.register_derived(FragmentIdentifier::compose(parent, &identifier), path);
            }
            collector.register_derived(identifier, path);
            parent.cloned()
        }
        Definition::Nothing => parent.cloned(),
    };

    for index in 0..tree.child_count() {
        if let Ok(child) = path.child(index) {
            collect(collector, &child, context.as_ref());
        }
    }
}
