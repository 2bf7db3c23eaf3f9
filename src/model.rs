use super::*;

/// Fitted pairwise classification model.
///
/// The model was fitted against the reference database elsewhere; here it
/// only replays its decision boundary over new distance rows. The same
/// model instance classifies both the direct reference-query pass and the
/// batch round over novel queries.
pub trait Classifier {
    /// Label each distance row, in input order.
    fn assign(&self, distances: &DistMatrix) -> Result<Vec<Label>>;
    /// The label meaning "same strain".
    fn within_label(&self) -> Label;
}
