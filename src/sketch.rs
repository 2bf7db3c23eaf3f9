use super::*;
use std::path::Path;

/// Sketching resolution for the batch distance round.
///
/// Mirrors the parameters the reference database was sketched with; a batch
/// sketched differently would shift distances off the classifier's fitted
/// decision boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SketchParams {
    /// K-mer lengths to sketch at.
    pub kmers: Vec<usize>,
    /// Hashes retained per k-mer length.
    pub sketch_size: usize,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            kmers: (13..=29).step_by(4).collect(),
            sketch_size: 10_000,
        }
    }
}

/// External sketch-based distance backend.
///
/// `names` lists the samples one per line; `workdir` is scratch space the
/// backend may fill with intermediate sketch databases. Rows come back in
/// canonical [`self_pairs`] order over the listed samples.
pub trait Sketcher {
    fn distances(&self, names: &Path, workdir: &Path, params: &SketchParams) -> Result<DistMatrix>;
}
