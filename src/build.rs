use super::*;

impl Network {
    /// Build the within-strain network for a classified run.
    ///
    /// `assignments` holds one label per pair of the combined reference and
    /// query list, in canonical [`self_pairs`] order; streams with or
    /// without the diagonal are both accepted, and diagonal labels never
    /// produce self-loops. Every sample becomes a node even when the
    /// classifier linked it to nothing.
    ///
    /// An implausibly dense network warns (the classifier is probably
    /// miscalibrated) but construction still completes.
    pub fn build(
        refs: &[String],
        queries: &[String],
        assignments: &[Label],
        within: Label,
    ) -> Result<Self> {
        let names = refs.iter().chain(queries.iter()).collect::<Vec<_>>();
        let diagonal = includes_diagonal(names.len(), assignments.len())?;
        let links = assignments
            .iter()
            .zip(self_pairs(names.len(), diagonal))
            .filter(|(label, _)| **label == within)
            .map(|(_, pair)| pair)
            .filter(|(i, j)| i != j)
            .collect::<Vec<_>>();
        let possible = self_pair_count(names.len(), true) as f64;
        if links.len() as f64 / possible > DENSITY_WARNING || links.len() > EDGE_WARNING {
            log::warn!(
                "building a very large network: {} within-strain pairs across {} samples",
                links.len(),
                names.len(),
            );
        }
        let mut network = Network::new();
        for name in &names {
            network.insert(name.as_str());
        }
        for (i, j) in links {
            network.connect(names[i].as_str(), names[j].as_str());
        }
        Ok(network)
    }
}
