use super::*;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// How one component's identity continues from the previous run.
///
/// Built by a scan over the previous clusters in file order: partial
/// overlaps accumulate as merge contributors without stopping the scan, an
/// exact overlap stops it. Constructing the variant up front, rather than
/// growing a nullable id across the scan, makes "a component cannot both
/// merge and exactly match" hold by construction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Continuity {
    /// No member was seen in the previous run.
    Novel,
    /// The previously known members are exactly one previous cluster.
    Exact(String),
    /// The previously known members span several previous clusters.
    Merge(Vec<String>),
}

impl Continuity {
    /// Classify a component from its previously known members.
    ///
    /// An exact overlap found after merge contributors were already
    /// recorded means the previous clustering put some sample in two
    /// clusters at once; that input is rejected, never repaired.
    pub fn of(known: &BTreeSet<&str>, previous: &Previous) -> Result<Self> {
        if known.is_empty() {
            return Ok(Self::Novel);
        }
        let mut merged: Vec<String> = Vec::new();
        'scan: for (id, members) in previous.scan() {
            let join = known.iter().filter(|&&sample| members.contains(sample)).count();
            if join == 0 {
                continue 'scan;
            }
            if join < known.len() {
                merged.push(id.clone());
                continue 'scan;
            }
            if merged.is_empty() {
                return Ok(Self::Exact(id.clone()));
            }
            return Err(Error::Invariant { id: id.clone(), merged });
        }
        Ok(Self::Merge(merged))
    }
}

/// Cluster assignments for every node of a network.
///
/// Identifiers are stable across runs: a component continuing a previous
/// cluster inherits its id, a merged component joins the contributing ids
/// with underscores, and an entirely novel component mints a fresh id
/// starting at the previous cluster count. No two disjoint components of
/// one run share an identifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Clustering {
    assignments: BTreeMap<String, String>,
    fresh: Vec<String>,
    known: Option<BTreeSet<String>>,
}

impl Clustering {
    /// Name every component of `network`.
    ///
    /// Requires a previous clustering or `include_refs`: with neither, the
    /// output would hold no rows at all. Each novel component records one
    /// member as a candidate for promotion to the reference database.
    pub fn derive(
        network: &Network,
        previous: Option<&Previous>,
        include_refs: bool,
    ) -> Result<Self> {
        if previous.is_none() && !include_refs {
            return Err(Error::InvalidUsage);
        }
        let mut assignments = BTreeMap::new();
        let mut fresh = Vec::new();
        let components = network.components();
        match previous {
            None => {
                for (rank, component) in components.iter().enumerate() {
                    for node in component {
                        assignments.insert(network.name(*node).to_string(), rank.to_string());
                    }
                }
            }
            Some(previous) => {
                let universe = previous.universe();
                let mut next = previous.len();
                for component in &components {
                    let members =
                        component.iter().map(|node| network.name(*node)).collect::<Vec<_>>();
                    let known = members
                        .iter()
                        .copied()
                        .filter(|member| universe.contains(member))
                        .collect::<BTreeSet<_>>();
                    let id = match Continuity::of(&known, previous)? {
                        Continuity::Exact(id) => id,
                        Continuity::Merge(ids) => ids.join("_"),
                        Continuity::Novel => {
                            let id = next.to_string();
                            next += 1;
                            fresh.push(members[0].to_string());
                            id
                        }
                    };
                    for member in members {
                        assignments.insert(member.to_string(), id.clone());
                    }
                }
            }
        }
        let known = match (previous, include_refs) {
            (Some(previous), false) => {
                Some(previous.universe().into_iter().map(str::to_string).collect())
            }
            _ => None,
        };
        Ok(Self { assignments, fresh, known })
    }

    /// Cluster id for every sample.
    pub fn assignments(&self) -> &BTreeMap<String, String> {
        &self.assignments
    }

    /// One member per freshly minted cluster, candidates for promotion to
    /// the reference database.
    pub fn fresh(&self) -> &[String] {
        &self.fresh
    }

    /// Persist `<prefix>_clusters.csv`, rows sorted by sample name.
    ///
    /// With reference printing off, rows are restricted to samples already
    /// known from the previous clustering.
    pub fn write(&self, prefix: &Path) -> Result<PathBuf> {
        let path = PathBuf::from(format!("{}_clusters.csv", prefix.display()));
        persist(&path, |file| {
            writeln!(file, "Taxon,Cluster")?;
            for (sample, cluster) in &self.assignments {
                if self.known.as_ref().is_none_or(|known| known.contains(sample)) {
                    writeln!(file, "{},{}", sample, cluster)?;
                }
            }
            Ok(())
        })?;
        Ok(path)
    }
}
