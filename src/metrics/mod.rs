/// Confusion matrix, accuracy and coverage of tree predictions
pub mod confusion;
