use std::collections::BTreeSet;

use nalgebra::DMatrix;

use crate::data::dataset::CategoryCode;
use crate::error::{Id3Error, Result};

type ConfusionMatrix = DMatrix<usize>;

/// Evaluation of predictions that may abstain (`None`) when the tree has no
/// branch for a sample.
pub trait ClassificationMetrics<T: CategoryCode> {
    /// Class codes appearing in the labels or the classified predictions, ascending.
    ///
    /// # Arguments
    ///
    /// * `y_true` - The true class codes.
    /// * `y_pred` - The predictions, `None` where the tree gave no class.
    fn classes(&self, y_true: &[T], y_pred: &[Option<T>]) -> Vec<T> {
        y_true
            .iter()
            .copied()
            .chain(y_pred.iter().flatten().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Computes the confusion matrix based on the true labels and predicted labels.
    ///
    /// Rows are true classes and columns predicted classes, both ordered as in
    /// [`Self::classes`]. Unclassified rows are left out.
    ///
    /// # Arguments
    ///
    /// * `y_true` - The true class codes.
    /// * `y_pred` - The predictions, `None` where the tree gave no class.
    ///
    /// # Returns
    ///
    /// A square matrix of counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the label and prediction lengths differ.
    fn confusion_matrix(&self, y_true: &[T], y_pred: &[Option<T>]) -> Result<ConfusionMatrix> {
        check_lengths(y_true, y_pred)?;

        let classes = self.classes(y_true, y_pred);
        let mut matrix = DMatrix::zeros(classes.len(), classes.len());

        for (y_t, y_p) in y_true.iter().zip(y_pred.iter()) {
            if let Some(y_p) = y_p {
                // both codes were collected into `classes` above
                if let (Ok(row), Ok(col)) = (classes.binary_search(y_t), classes.binary_search(y_p))
                {
                    matrix[(row, col)] += 1;
                }
            }
        }

        Ok(matrix)
    }

    /// Fraction of rows classified correctly; unclassified rows count as wrong.
    ///
    /// # Arguments
    ///
    /// * `y_true` - The true class codes.
    /// * `y_pred` - The predictions, `None` where the tree gave no class.
    ///
    /// # Returns
    ///
    /// The accuracy in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lengths differ or there are no rows.
    fn accuracy(&self, y_true: &[T], y_pred: &[Option<T>]) -> Result<f64> {
        check_lengths(y_true, y_pred)?;

        let correct = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(y_t, y_p)| **y_p == Some(**y_t))
            .count();

        Ok(correct as f64 / y_true.len() as f64)
    }

    /// Fraction of rows that received any classification.
    ///
    /// # Returns
    ///
    /// The coverage in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lengths differ or there are no rows.
    fn coverage(&self, y_true: &[T], y_pred: &[Option<T>]) -> Result<f64> {
        check_lengths(y_true, y_pred)?;

        let classified = y_pred.iter().filter(|y_p| y_p.is_some()).count();
        Ok(classified as f64 / y_true.len() as f64)
    }
}

fn check_lengths<T>(y_true: &[T], y_pred: &[Option<T>]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(Id3Error::invalid(
            "Predictions and labels are of different sizes.",
        ));
    }
    if y_true.is_empty() {
        return Err(Id3Error::invalid("Cannot evaluate zero predictions."));
    }
    Ok(())
}
