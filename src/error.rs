//! Error types shared by the dataset, encoder and tree modules.

use thiserror::Error;

/// Errors returned while preparing data, building a tree or classifying with it.
#[derive(Error, Debug)]
pub enum Id3Error {
    /// Input rejected before any tree construction took place
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The sample has no value for an attribute the tree splits on
    #[error("Sample is missing a value for attribute '{attribute}'")]
    MissingAttribute { attribute: String },

    /// A string that was not seen while fitting the encoder
    #[error("Unknown category '{value}' in column {column}")]
    UnknownCategory { column: usize, value: String },

    /// A code outside the range the encoder produced
    #[error("Unknown code {code} in column {column}")]
    UnknownCode { column: usize, code: usize },

    /// The classifier was used before `fit`
    #[error("Tree wasn't built yet.")]
    NotFitted,

    /// CSV reading error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Id3Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Ragged records are bad input rather than a reader failure.
    pub(crate) fn from_csv(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::UnequalLengths {
                pos,
                expected_len,
                len,
            } => Self::InvalidInput(format!(
                "Record {} has {} fields, expected {}.",
                pos.as_ref().map_or(0, csv::Position::record),
                len,
                expected_len
            )),
            _ => Self::Csv(err),
        }
    }
}

/// Result type for this crate
pub type Result<T> = std::result::Result<T, Id3Error>;
