//! Label encoding of raw string cells.
//!
//! Every column is encoded independently: its distinct strings are sorted and
//! each string is replaced by its rank, so codes are dense and the mapping is
//! a bijection that [`LabelEncoder::decode`] can invert for display.

use crate::data::dataset::{CategoricalDataset, CategoryCode};
use crate::error::{Id3Error, Result};
use nalgebra::DMatrix;
use std::collections::BTreeSet;
use std::io;

/// Reads every record of a CSV reader as trimmed strings.
pub fn read_records<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(Id3Error::from_csv)?;
        records.push(record.iter().map(|cell| cell.trim().to_string()).collect());
    }
    Ok(records)
}

/// Per-column mapping between category strings and their codes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelEncoder {
    categories: Vec<Vec<String>>,
}

impl LabelEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learns the sorted categories of every column.
    ///
    /// # Errors
    ///
    /// Returns an error if the records are empty or rows differ in length.
    pub fn fit(records: &[Vec<String>]) -> Result<Self> {
        let ncols = match records.first() {
            Some(row) => row.len(),
            None => return Err(Id3Error::invalid("Cannot fit an encoder on zero records.")),
        };

        let mut columns = vec![BTreeSet::new(); ncols];
        for (index, row) in records.iter().enumerate() {
            if row.len() != ncols {
                return Err(Id3Error::invalid(format!(
                    "Record {} has {} fields, expected {}.",
                    index,
                    row.len(),
                    ncols
                )));
            }
            for (column, cell) in row.iter().enumerate() {
                columns[column].insert(cell.trim());
            }
        }

        let categories = columns
            .into_iter()
            .map(|set| set.into_iter().map(str::to_string).collect())
            .collect();
        Ok(Self { categories })
    }

    /// Encodes every cell, producing a dataset of the same shape.
    ///
    /// # Arguments
    ///
    /// * `records` - Rows of raw strings with as many fields as the fitted columns.
    ///
    /// # Errors
    ///
    /// Returns an error for a row of the wrong length, a category that wasn't
    /// fitted, or a code that doesn't fit in `T`.
    pub fn transform<T: CategoryCode>(&self, records: &[Vec<String>]) -> Result<CategoricalDataset<T>> {
        let mut codes = Vec::with_capacity(records.len() * self.ncols());
        for (index, row) in records.iter().enumerate() {
            if row.len() != self.ncols() {
                return Err(Id3Error::invalid(format!(
                    "Record {} has {} fields, expected {}.",
                    index,
                    row.len(),
                    self.ncols()
                )));
            }
            for (column, cell) in row.iter().enumerate() {
                codes.push(self.encode(column, cell)?);
            }
        }
        Ok(CategoricalDataset::new(DMatrix::from_row_slice(
            records.len(),
            self.ncols(),
            &codes,
        )))
    }

    /// Fits the encoder on `records` and encodes them in one go.
    pub fn fit_transform<T: CategoryCode>(
        records: &[Vec<String>],
    ) -> Result<(Self, CategoricalDataset<T>)> {
        let encoder = Self::fit(records)?;
        let dataset = encoder.transform(records)?;
        Ok((encoder, dataset))
    }

    /// Code of `value` in `column`.
    ///
    /// # Arguments
    ///
    /// * `column` - The column index.
    /// * `value` - A category string; surrounding whitespace is ignored.
    ///
    /// # Returns
    ///
    /// The rank of `value` among the column's sorted categories.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::UnknownCategory`] if `value` wasn't seen while fitting.
    pub fn encode<T: CategoryCode>(&self, column: usize, value: &str) -> Result<T> {
        let value = value.trim();
        let index = self
            .column(column)?
            .binary_search_by(|category| category.as_str().cmp(value))
            .map_err(|_| Id3Error::UnknownCategory {
                column,
                value: value.to_string(),
            })?;
        T::from_usize(index).ok_or_else(|| {
            Id3Error::invalid(format!(
                "Code {} of column {} does not fit the code type.",
                index, column
            ))
        })
    }

    /// The category string for `code` in `column`.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::UnknownCode`] if the column has no such code.
    pub fn decode<T: CategoryCode>(&self, column: usize, code: T) -> Result<&str> {
        let categories = self.column(column)?;
        code.to_usize()
            .and_then(|index| categories.get(index))
            .map(String::as_str)
            .ok_or_else(|| Id3Error::UnknownCode {
                column,
                code: code.to_usize().unwrap_or(usize::MAX),
            })
    }

    /// Sorted categories of a column, `None` if it is out of range.
    pub fn categories(&self, column: usize) -> Option<&[String]> {
        self.categories.get(column).map(Vec::as_slice)
    }

    pub fn ncols(&self) -> usize {
        self.categories.len()
    }

    fn column(&self, column: usize) -> Result<&[String]> {
        self.categories(column).ok_or_else(|| {
            Id3Error::invalid(format!(
                "Column {} is out of range for an encoder with {} columns.",
                column,
                self.ncols()
            ))
        })
    }
}
