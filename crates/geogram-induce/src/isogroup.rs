use std::fmt;

use geogram_core::Result;
use geogram_graph::GeometricGraph;
use geogram_iso::Classifier;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::placed::PlacedGraph;

/// Subgraphs believed to be pairwise isomorphic, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Isogroup {
    members: Vec<PlacedGraph>,
}

impl Isogroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a member.
    pub fn add(&mut self, graph: PlacedGraph) {
        self.members.push(graph);
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[PlacedGraph] {
        &self.members
    }

    /// Member geometries in insertion order.
    pub fn graphs(&self) -> impl Iterator<Item = &GeometricGraph> + '_ {
        self.members.iter().map(PlacedGraph::graph)
    }

    /// The earliest member, which stands for the whole class.
    pub fn representative(&self) -> Option<&PlacedGraph> {
        self.members.first()
    }

    fn matches(&self, graph: &PlacedGraph, classifier: &dyn Classifier) -> bool {
        let prefilter = classifier.respects_invariants();
        self.members.iter().any(|member| {
            if prefilter && member.invariant_key() != graph.invariant_key() {
                return false;
            }
            classifier.is_isomorphic(member.graph(), graph.graph())
        })
    }
}

impl From<Vec<PlacedGraph>> for Isogroup {
    fn from(members: Vec<PlacedGraph>) -> Self {
        Self { members }
    }
}

impl fmt::Display for Isogroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(size: {}, value: [", self.len())?;
        for (idx, graph) in self.graphs().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{graph}")?;
        }
        write!(f, "])")
    }
}

/// Ordered partition of subgraphs into isomorphism groups.
///
/// Groups and members are only ever appended. Classification is first-match:
/// a graph joins the earliest group holding any member it is isomorphic to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Isogroups {
    groups: Vec<Isogroup>,
}

impl Isogroups {
    /// Creates an empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of groups (not graphs).
    pub fn size(&self) -> usize {
        self.groups.len()
    }

    /// Returns whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of graphs across every group.
    pub fn total_graphs(&self) -> usize {
        self.groups.iter().map(Isogroup::len).sum()
    }

    /// Groups in insertion order.
    pub fn groups(&self) -> &[Isogroup] {
        &self.groups
    }

    /// Iterates over the groups in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Isogroup> {
        self.groups.iter()
    }

    /// Appends a whole group.
    pub fn add_group(&mut self, group: Isogroup) {
        self.groups.push(group);
    }

    /// Appends every group of `other`, preserving its order.
    pub fn extend(&mut self, other: Isogroups) {
        self.groups.extend(other.groups);
    }

    /// Keeps only the groups for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&Isogroup) -> bool) {
        self.groups.retain(keep);
    }

    /// Places `graph` into the first matching group or a new singleton group.
    ///
    /// Returns the index of the group that received the graph.
    pub fn classify_and_insert(&mut self, graph: PlacedGraph, classifier: &dyn Classifier) -> usize {
        let found = self
            .groups
            .iter()
            .position(|group| group.matches(&graph, classifier));
        match found {
            Some(index) => {
                trace!("candidate joins group {index}");
                self.groups[index].add(graph);
                index
            }
            None => {
                trace!("candidate opens group {}", self.groups.len());
                self.groups.push(Isogroup::from(vec![graph]));
                self.groups.len() - 1
            }
        }
    }

    /// Classifies every graph in order; see [`Isogroups::classify_and_insert`].
    pub fn classify_all(
        graphs: impl IntoIterator<Item = PlacedGraph>,
        classifier: &dyn Classifier,
    ) -> Self {
        let mut groups = Self::new();
        for graph in graphs {
            groups.classify_and_insert(graph, classifier);
        }
        groups
    }

    /// Member counts of every group, in order.
    pub fn group_sizes(&self) -> Vec<usize> {
        self.groups.iter().map(Isogroup::len).collect()
    }

    /// Looks up the group index that holds a graph exactly equal to `graph`.
    pub fn position_of(&self, graph: &GeometricGraph) -> Option<usize> {
        self.groups
            .iter()
            .position(|group| group.graphs().any(|member| member == graph))
    }

    /// Consumes the partition and returns its groups.
    pub fn into_groups(self) -> Vec<Isogroup> {
        self.groups
    }
}

impl FromIterator<Isogroup> for Isogroups {
    fn from_iter<I: IntoIterator<Item = Isogroup>>(iter: I) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Isogroups {
    type Item = Isogroup;
    type IntoIter = std::vec::IntoIter<Isogroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a> IntoIterator for &'a Isogroups {
    type Item = &'a Isogroup;
    type IntoIter = std::slice::Iter<'a, Isogroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl fmt::Display for Isogroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, group) in self.groups.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{group}")?;
        }
        write!(f, "]")
    }
}

/// Builds an [`Isogroups`] of unplaced graphs, treating each graph as its own origin.
///
/// Convenient for classifying graphs that did not come out of an analysis run.
pub fn classify_graphs(
    graphs: impl IntoIterator<Item = GeometricGraph>,
    classifier: &dyn Classifier,
) -> Result<Isogroups> {
    let placed = graphs
        .into_iter()
        .map(|graph| {
            let origin = (0..graph.n_vertices()).collect();
            PlacedGraph::new(graph, origin)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Isogroups::classify_all(placed, classifier))
}
