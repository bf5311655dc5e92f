//! Clique value type.

use super::graph::Graph;
use super::node::NodeId;
use crate::{GraphError, Result};

/// A set of node indices, kept sorted ascending without duplicates.
///
/// A `Clique` is only a node set; whether it is a valid (pairwise adjacent)
/// or maximal clique depends on the graph it is checked against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Clique {
    nodes: Vec<u32>,
}

impl Clique {
    /// Empty node set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect nodes into a sorted, de-duplicated set.
    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<NodeId>,
    {
        let mut nodes: Vec<u32> = nodes.into_iter().map(|n| n.into().0).collect();
        nodes.sort_unstable();
        nodes.dedup();
        Self { nodes }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in ascending order.
    pub fn as_slice(&self) -> &[u32] {
        &self.nodes
    }

    /// Membership test.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.binary_search(&node.0).is_ok()
    }

    /// Iterate over members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|&n| NodeId(n))
    }

    /// Consume into the sorted node vector.
    pub fn into_vec(self) -> Vec<u32> {
        self.nodes
    }

    /// Every member is in range and every pair of members is adjacent.
    pub fn is_clique(&self, graph: &Graph) -> bool {
        self.validate(graph).is_ok()
    }

    /// No node outside the set is adjacent to every member.
    ///
    /// Only meaningful for a valid clique; the empty set is maximal only in
    /// the empty graph.
    pub fn is_maximal(&self, graph: &Graph) -> bool {
        graph
            .nodes()
            .filter(|&v| !self.contains(v))
            .all(|v| !self.iter().all(|member| graph.has_edge(v, member)))
    }

    /// Check the clique contract, reporting the first violation.
    pub fn validate(&self, graph: &Graph) -> Result<()> {
        let n = graph.num_nodes();
        if let Some(&bad) = self.nodes.iter().find(|&&v| v as usize >= n) {
            return Err(GraphError::InvalidNodeId(bad as u64));
        }
        for (i, &a) in self.nodes.iter().enumerate() {
            for &b in &self.nodes[i + 1..] {
                if !graph.has_edge(NodeId(a), NodeId(b)) {
                    return Err(GraphError::NotAClique(format!(
                        "nodes {} and {} are not adjacent",
                        a, b
                    )));
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<u32> for Clique {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Clique::from_nodes(iter)
    }
}

impl From<Clique> for Vec<u32> {
    fn from(clique: Clique) -> Self {
        clique.nodes
    }
}
