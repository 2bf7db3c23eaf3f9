use super::*;
use petgraph::algo::maximal_cliques::maximal_cliques;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Representative samples covering every maximal clique.
///
/// Clique cover is NP-hard; this is the greedy approximation: enumerate
/// maximal cliques, largest first, and keep the first member of every
/// clique no chosen sample already touches. Every maximal clique ends up
/// holding at least one representative, so distances against the chosen
/// subset are enough to place any future query. There is no promise the
/// subset is minimal.
///
/// # Determinism
///
/// Cliques and their members are ordered by node insertion order before
/// the greedy pass, so the same network always yields the same subset.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct References {
    names: Vec<String>,
}

impl From<&Network> for References {
    fn from(network: &Network) -> Self {
        let mut cliques = maximal_cliques(network.graph())
            .into_iter()
            .map(|clique| {
                let mut members = clique.into_iter().collect::<Vec<_>>();
                members.sort();
                members
            })
            .collect::<Vec<_>>();
        cliques.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let mut chosen = Vec::new();
        let mut represented = HashSet::new();
        'cover: for clique in cliques {
            if clique.iter().any(|node| represented.contains(node)) {
                continue 'cover;
            }
            represented.insert(clique[0]);
            chosen.push(clique[0]);
        }
        Self {
            names: chosen.into_iter().map(|node| network.name(node).to_string()).collect(),
        }
    }
}

impl References {
    /// Chosen representatives, in selection order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Persist one name per line to `<prefix>.refs`.
    pub fn write(&self, prefix: &Path) -> Result<PathBuf> {
        let path = PathBuf::from(format!("{}.refs", prefix.display()));
        persist(&path, |file| {
            for name in &self.names {
                writeln!(file, "{}", name)?;
            }
            Ok(())
        })?;
        Ok(path)
    }
}
