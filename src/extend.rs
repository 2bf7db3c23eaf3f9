use super::*;
use std::collections::BTreeSet;

/// Incremental query extension of a finalized reference network.
///
/// Holds the collaborators injected for one run: the fitted classifier,
/// the distance backend, the scratch workspace provider, and the sketching
/// parameters the batch round reuses. Construct with
/// `Extender::from((&model, &sketcher, &workspace))`; `params` and
/// `interrupt` are plain fields for callers that need them.
pub struct Extender<'a, M, S, W> {
    model: &'a M,
    sketcher: &'a S,
    workspace: &'a W,
    /// Sketching resolution for the batch round.
    pub params: SketchParams,
    /// Cancellation flag checked before the blocking batch call.
    pub interrupt: Interrupt,
}

impl<'a, M, S, W> From<(&'a M, &'a S, &'a W)> for Extender<'a, M, S, W>
where
    M: Classifier,
    S: Sketcher,
    W: Workspace,
{
    fn from((model, sketcher, workspace): (&'a M, &'a S, &'a W)) -> Self {
        Self {
            model,
            sketcher,
            workspace,
            params: SketchParams::default(),
            interrupt: Interrupt::default(),
        }
    }
}

/// Edge counts committed by one extension.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Extension {
    /// Edges between references and directly assigned queries.
    pub assigned: usize,
    /// Edges found among unassigned queries by the batch round.
    pub novel: usize,
}

impl<M, S, W> Extender<'_, M, S, W>
where
    M: Classifier,
    S: Sketcher,
    W: Workspace,
{
    /// Fold newly classified queries into `network`.
    ///
    /// `assignments` holds one label per (reference, query) pair in
    /// canonical [`cross_pairs`] order. Queries linked to no reference are
    /// sketched as a batch of their own and classified once more, so an
    /// entirely novel sub-cluster still comes out connected; exactly one
    /// such round runs, never deeper.
    ///
    /// When the batch round fails, the query nodes and the direct
    /// reference-query edges are already committed before the error
    /// surfaces: the extension is partial, not rolled back.
    pub fn extend(
        &self,
        network: &mut Network,
        refs: &[String],
        queries: &[String],
        assignments: &[Label],
    ) -> Result<Extension> {
        let pairs = cross_pair_count(refs.len(), queries.len());
        if assignments.len() != pairs {
            return Err(Error::Assignments { pairs, found: assignments.len() });
        }
        let within = self.model.within_label();
        let mut links = Vec::new();
        let mut assigned = BTreeSet::new();
        for (label, (r, q)) in assignments.iter().zip(cross_pairs(refs.len(), queries.len())) {
            if *label == within {
                links.push((refs[r].as_str(), queries[q].as_str()));
                assigned.insert(queries[q].as_str());
            }
        }
        let unassigned = queries
            .iter()
            .map(String::as_str)
            .filter(|query| !assigned.contains(query))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        let batch = match unassigned.len() {
            0 | 1 => Ok(Vec::new()),
            _ => self.resolve(&unassigned),
        };
        for query in queries {
            network.insert(query);
        }
        let direct = links.len();
        for (a, b) in links {
            network.connect(a, b);
        }
        // direct edges stay committed even when the batch round failed
        let batch = batch?;
        let novel = batch.len();
        for (a, b) in &batch {
            network.connect(a, b);
        }
        Ok(Extension { assigned: direct, novel })
    }

    /// One batch distance round over the queries linked to nothing.
    fn resolve<'q>(&self, unassigned: &[&'q str]) -> Result<Vec<(&'q str, &'q str)>> {
        if self.interrupt.cancelled() {
            return Err(Error::Interrupted);
        }
        log::info!(
            "found {} unlinked queries, computing distances between them",
            unassigned.len(),
        );
        let scratch = self.workspace.acquire()?;
        let names = scratch.names_file(unassigned)?;
        let distances = self.sketcher.distances(&names, scratch.path(), &self.params)?;
        let labels = self.model.assign(&distances)?;
        let diagonal = includes_diagonal(unassigned.len(), labels.len())?;
        Ok(labels
            .iter()
            .zip(self_pairs(unassigned.len(), diagonal))
            .filter(|(label, _)| **label == self.model.within_label())
            .filter(|(_, (i, j))| i != j)
            .map(|(_, (i, j))| (unassigned[i], unassigned[j]))
            .collect())
        // scratch drops here: the directory is gone on every exit path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITHIN: Label = 1;
    const BETWEEN: Label = 0;

    fn model() -> Threshold {
        Threshold { cutoff: 0.05, within: WITHIN }
    }

    #[test]
    fn queries_link_to_references_and_each_other() {
        let root = tempfile::tempdir().expect("root");
        let workspace = Probe::under(root.path());
        let model = model();
        // batch over the sorted unassigned pair (q2, q3) falls under the cutoff
        let sketcher = Scripted { rows: vec![vec![0.01, 0.02]], fail: false };
        let extender = Extender::from((&model, &sketcher, &workspace));
        let mut network = toy(&["r1", "r2"], &[]);
        let refs = names(&["r1", "r2"]);
        let queries = names(&["q1", "q2", "q3"]);
        let assignments = [WITHIN, BETWEEN, BETWEEN, BETWEEN, BETWEEN, BETWEEN];
        let extension = extender
            .extend(&mut network, &refs, &queries, &assignments)
            .expect("extend");
        assert_eq!(extension, Extension { assigned: 1, novel: 1 });
        assert!(network.linked("r1", "q1"));
        assert!(network.linked("q2", "q3"));
        assert!(network.contains("q2"));
        assert!(network.contains("q3"));
        assert!(!network.linked("r1", "q2"));
    }

    #[test]
    fn batch_failure_keeps_direct_edges() {
        let root = tempfile::tempdir().expect("root");
        let workspace = Probe::under(root.path());
        let model = model();
        let sketcher = Scripted { rows: Vec::new(), fail: true };
        let extender = Extender::from((&model, &sketcher, &workspace));
        let mut network = toy(&["r1"], &[]);
        let refs = names(&["r1"]);
        let queries = names(&["q1", "q2", "q3"]);
        let assignments = [WITHIN, BETWEEN, BETWEEN];
        let outcome = extender.extend(&mut network, &refs, &queries, &assignments);
        assert!(matches!(outcome, Err(Error::External(_))));
        assert!(network.linked("r1", "q1"));
        assert!(network.contains("q2"));
        assert!(network.contains("q3"));
        assert!(!network.linked("q2", "q3"));
    }

    #[test]
    fn scratch_is_released_on_success_and_failure() {
        let root = tempfile::tempdir().expect("root");
        let workspace = Probe::under(root.path());
        let model = model();
        let refs = names(&["r1"]);
        let queries = names(&["q1", "q2"]);
        for fail in [false, true] {
            let sketcher = Scripted { rows: vec![vec![0.01, 0.02]], fail };
            let extender = Extender::from((&model, &sketcher, &workspace));
            let mut network = toy(&["r1"], &[]);
            let _ = extender.extend(&mut network, &refs, &queries, &[BETWEEN, BETWEEN]);
        }
        let acquired = workspace.acquired.borrow();
        assert_eq!(acquired.len(), 2);
        for path in acquired.iter() {
            assert!(!path.exists());
        }
    }

    #[test]
    fn single_unlinked_query_skips_the_batch() {
        let root = tempfile::tempdir().expect("root");
        let workspace = Probe::under(root.path());
        let model = model();
        // a batch round would fail loudly; it must never run
        let sketcher = Scripted { rows: Vec::new(), fail: true };
        let extender = Extender::from((&model, &sketcher, &workspace));
        let mut network = toy(&["r1"], &[]);
        let refs = names(&["r1"]);
        let queries = names(&["q1", "q2"]);
        let extension = extender
            .extend(&mut network, &refs, &queries, &[WITHIN, BETWEEN])
            .expect("extend");
        assert_eq!(extension, Extension { assigned: 1, novel: 0 });
        assert!(workspace.acquired.borrow().is_empty());
        assert!(network.contains("q2"));
    }

    #[test]
    fn interrupt_cancels_before_the_batch() {
        let root = tempfile::tempdir().expect("root");
        let workspace = Probe::under(root.path());
        let model = model();
        let sketcher = Scripted { rows: vec![vec![0.01, 0.02]], fail: false };
        let extender = Extender::from((&model, &sketcher, &workspace));
        extender.interrupt.cancel();
        let mut network = toy(&["r1"], &[]);
        let refs = names(&["r1"]);
        let queries = names(&["q1", "q2", "q3"]);
        let assignments = [WITHIN, BETWEEN, BETWEEN];
        let outcome = extender.extend(&mut network, &refs, &queries, &assignments);
        assert!(matches!(outcome, Err(Error::Interrupted)));
        assert!(network.linked("r1", "q1"));
        assert!(workspace.acquired.borrow().is_empty());
    }

    #[test]
    fn mismatched_stream_is_rejected() {
        let root = tempfile::tempdir().expect("root");
        let workspace = Probe::under(root.path());
        let model = model();
        let sketcher = Scripted { rows: Vec::new(), fail: false };
        let extender = Extender::from((&model, &sketcher, &workspace));
        let mut network = toy(&["r1"], &[]);
        let outcome = extender.extend(&mut network, &names(&["r1"]), &names(&["q1"]), &[]);
        assert!(matches!(outcome, Err(Error::Assignments { pairs: 1, found: 0 })));
    }
}
