/// Failure taxonomy for a clustering run.
///
/// Collaborator failures wrap the backend's own error so a caller can tell
/// a partial extension apart from malformed input or a violated labeling
/// invariant.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cluster output was requested with nothing to print.
    #[error("cluster printing requires a previous clustering or reference printing enabled")]
    InvalidUsage,
    /// An assignment stream does not match the canonical pair enumeration.
    #[error("{found} assignments do not match {pairs} enumerated pairs")]
    Assignments { pairs: usize, found: usize },
    /// The external distance backend or classifier failed.
    #[error("distance backend failed")]
    External(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Cancellation was requested before the batch distance round.
    #[error("interrupted before resolving novel query clusters")]
    Interrupted,
    /// A component exactly matched one previous cluster after already
    /// collecting merge contributors. The previous clustering assigns some
    /// sample to more than one cluster; reject it rather than repair it.
    #[error("component exactly matches cluster {id} after merging {merged:?}")]
    Invariant { id: String, merged: Vec<String> },
    /// A previous-clustering row did not hold exactly two fields.
    #[error("malformed cluster assignment on line {line}: {row:?}")]
    Malformed { line: usize, row: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
