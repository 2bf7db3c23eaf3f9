use super::*;
use petgraph::graph::NodeIndex;
use petgraph::graph::UnGraph;
use petgraph::unionfind::UnionFind;
use std::collections::HashMap;

/// Undirected simple graph of within-strain relationships.
///
/// Nodes are sample names in insertion order; an edge means the classifier
/// called the pair within-strain. The graph stays simple through every
/// mutation: no self-loops, no duplicate edges. Isolated nodes persist so
/// unlinked samples still receive cluster identifiers.
///
/// A network is exclusively owned by the run that built it; independent
/// runs never share one.
#[derive(Debug, Default)]
pub struct Network {
    graph: UnGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sample node, once.
    pub fn insert(&mut self, name: &str) -> NodeIndex {
        match self.index.get(name) {
            Some(&node) => node,
            None => {
                let node = self.graph.add_node(name.to_string());
                self.index.insert(name.to_string(), node);
                node
            }
        }
    }

    /// Connect two samples, inserting them as needed. Self-loops and
    /// duplicate edges are dropped.
    pub fn connect(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        let i = self.insert(a);
        let j = self.insert(b);
        if self.graph.find_edge(i, j).is_none() {
            self.graph.add_edge(i, j, ());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Whether two samples share a within-strain edge.
    pub fn linked(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&i), Some(&j)) => self.graph.find_edge(i, j).is_some(),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Sample name at a node.
    pub fn name(&self, node: NodeIndex) -> &str {
        self.graph[node].as_str()
    }

    /// Sample names in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|node| self.graph[node].as_str())
    }

    pub(crate) fn graph(&self) -> &UnGraph<String, ()> {
        &self.graph
    }

    /// Connected components, largest first; ties and members follow node
    /// insertion order.
    pub fn components(&self) -> Vec<Vec<NodeIndex>> {
        let mut sets = UnionFind::<usize>::new(self.graph.node_count());
        for edge in self.graph.edge_indices() {
            let (a, b) = self.graph.edge_endpoints(edge).expect("endpoints");
            sets.union(a.index(), b.index());
        }
        let mut groups: HashMap<usize, Vec<NodeIndex>> = HashMap::new();
        for node in self.graph.node_indices() {
            groups.entry(sets.find(node.index())).or_default().push(node);
        }
        let mut components = groups.into_values().collect::<Vec<_>>();
        components.sort_by(|a, b| b.len().cmp(&a.len()).then(a[0].cmp(&b[0])));
        components
    }

    /// Log the structural summary the way a run reports it.
    pub fn summarise(&self) {
        let ref summary = Summary::from(self);
        log::info!("{:<16}{:>10}", "components", summary.components);
        log::info!("{:<16}{:>10.4}", "density", summary.density);
        log::info!("{:<16}{:>10.4}", "transitivity", summary.transitivity);
        log::info!("{:<16}{:>10.4}", "score", summary.score);
    }
}
