use super::*;
use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::Path;

/// A previous run's clustering, loaded once and never mutated.
///
/// Clusters keep the order their ids first appear in the file: merge
/// identifiers join contributor ids in this scan order, so the order is
/// part of the output contract, not an implementation detail.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Previous {
    clusters: Vec<(String, BTreeSet<String>)>,
}

impl FromIterator<(String, String)> for Previous {
    /// Collect `(sample, cluster)` rows, preserving first-appearance order.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(rows: I) -> Self {
        let mut clusters: Vec<(String, BTreeSet<String>)> = Vec::new();
        for (sample, cluster) in rows {
            match clusters.iter().position(|(id, _)| *id == cluster) {
                Some(found) => {
                    clusters[found].1.insert(sample);
                }
                None => clusters.push((cluster, BTreeSet::from([sample]))),
            }
        }
        Self { clusters }
    }
}

impl Previous {
    /// Read a `Taxon,Cluster` CSV written by an earlier run.
    ///
    /// The header line is skipped; every following row must hold exactly
    /// two comma-separated fields.
    pub fn read(path: &Path) -> Result<Self> {
        let file = std::io::BufReader::new(std::fs::File::open(path)?);
        let mut rows = Vec::new();
        for (index, line) in file.lines().enumerate() {
            let line = line?;
            if index == 0 {
                continue;
            }
            let row = line.trim_end();
            let fields = row.split(',').collect::<Vec<_>>();
            match fields.as_slice() {
                [sample, cluster] => rows.push((sample.to_string(), cluster.to_string())),
                _ => {
                    return Err(Error::Malformed {
                        line: index + 1,
                        row: row.to_string(),
                    });
                }
            }
        }
        Ok(rows.into_iter().collect())
    }

    /// Number of distinct previous clusters; fresh ids start here.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Clusters in file scan order.
    pub fn scan(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.clusters.iter().map(|(id, members)| (id, members))
    }

    /// Every sample any previous cluster contained.
    pub fn universe(&self) -> BTreeSet<&str> {
        self.clusters
            .iter()
            .flat_map(|(_, members)| members.iter().map(String::as_str))
            .collect()
    }
}
