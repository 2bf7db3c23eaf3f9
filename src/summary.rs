use super::*;
use rayon::prelude::*;
use std::collections::HashSet;

/// Structural quality metrics of a within-strain network.
///
/// A well-fitted classifier produces tight, nearly-complete components in a
/// sparse graph: high transitivity at low density. `score` folds both into
/// `transitivity * (1 - density)`, the figure a run inspects when judging
/// the classification boundary. Computation never mutates the network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    /// Connected component count.
    pub components: usize,
    /// Realized fraction of possible edges.
    pub density: f64,
    /// Ratio of closed to total triplets.
    pub transitivity: f64,
    /// Network fit score.
    pub score: f64,
}

impl From<&Network> for Summary {
    fn from(network: &Network) -> Self {
        let graph = network.graph();
        let possible = self_pair_count(graph.node_count(), false);
        let density = match possible {
            0 => 0.0,
            possible => graph.edge_count() as f64 / possible as f64,
        };
        let neighbours = graph
            .node_indices()
            .map(|node| graph.neighbors(node).collect::<HashSet<_>>())
            .collect::<Vec<_>>();
        // total triplets: one per unordered neighbour pair at each centre
        let triplets = neighbours
            .iter()
            .map(|adjacent| self_pair_count(adjacent.len(), false))
            .sum::<usize>();
        // closed triplets: each triangle is seen once per edge
        let edges = graph
            .edge_indices()
            .map(|edge| graph.edge_endpoints(edge).expect("endpoints"))
            .collect::<Vec<_>>();
        let closed = edges
            .par_iter()
            .map(|(a, b)| neighbours[a.index()].intersection(&neighbours[b.index()]).count())
            .sum::<usize>();
        let transitivity = match triplets {
            0 => 0.0,
            triplets => closed as f64 / triplets as f64,
        };
        Self {
            components: petgraph::algo::connected_components(graph),
            density,
            transitivity,
            score: transitivity * (1.0 - density),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edgeless_network_has_zero_density() {
        let network = toy(&["a", "b", "c", "d"], &[]);
        let summary = Summary::from(&network);
        assert_eq!(summary.components, 4);
        assert_eq!(summary.density, 0.0);
        assert_eq!(summary.transitivity, 0.0);
        assert_eq!(summary.score, 0.0);
    }

    #[test]
    fn complete_network_scores_zero() {
        let network = toy(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("a", "d"), ("b", "c"), ("b", "d"), ("c", "d")],
        );
        let summary = Summary::from(&network);
        assert_eq!(summary.components, 1);
        assert_eq!(summary.density, 1.0);
        assert_eq!(summary.transitivity, 1.0);
        assert_eq!(summary.score, 0.0);
    }

    #[test]
    fn open_path_has_zero_transitivity() {
        let network = toy(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let summary = Summary::from(&network);
        assert_eq!(summary.components, 1);
        assert!((summary.density - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.transitivity, 0.0);
    }

    #[test]
    fn disjoint_triangles_are_fully_transitive() {
        let network = toy(
            &["a", "b", "c", "x", "y", "z"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("x", "y"), ("y", "z"), ("z", "x")],
        );
        let summary = Summary::from(&network);
        assert_eq!(summary.components, 2);
        assert_eq!(summary.transitivity, 1.0);
        assert!(summary.score > 0.0);
    }

    #[test]
    fn empty_network_summarises_cleanly() {
        let summary = Summary::from(&Network::new());
        assert_eq!(summary.components, 0);
        assert_eq!(summary.density, 0.0);
        assert_eq!(summary.score, 0.0);
    }
}
