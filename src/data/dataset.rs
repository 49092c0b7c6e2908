use crate::error::{Id3Error, Result};
use nalgebra::DMatrix;
use num_traits::{FromPrimitive, Num, ToPrimitive, Unsigned};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::cmp::PartialOrd;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::{self, Display};
use std::fmt::{Debug, Formatter};
use std::hash::Hash;
use std::io;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

pub trait DataValue:
    Debug
    + Clone
    + Copy
    + Num
    + FromPrimitive
    + ToPrimitive
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + Display
    + 'static
{
}

impl<T> DataValue for T where
    T: Debug
        + Clone
        + Copy
        + Num
        + FromPrimitive
        + ToPrimitive
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + Send
        + Sync
        + Display
        + 'static
{
}

pub trait Number: DataValue + PartialOrd {}
impl<T> Number for T where T: DataValue + PartialOrd {}

pub trait WholeNumber: Number + Eq + Hash {}
impl<T> WholeNumber for T where T: Number + Eq + Hash {}

/// A label-encoded category: a non-negative whole number with a total order.
pub trait CategoryCode: WholeNumber + Ord + Unsigned {}
impl<T> CategoryCode for T where T: WholeNumber + Ord + Unsigned {}

/// Attribute values of a single sample, keyed by attribute name.
pub type Sample<T> = HashMap<String, T>;

/// A named, splittable column of a dataset.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub name: String,
    pub column: usize,
}

impl Attribute {
    pub fn new(name: impl Into<String>, column: usize) -> Self {
        Self {
            name: name.into(),
            column,
        }
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Label-encoded table; the class column is one of its columns.
#[derive(Clone, PartialEq)]
pub struct CategoricalDataset<T: CategoryCode> {
    pub data: DMatrix<T>,
}

impl<T: CategoryCode> Debug for CategoricalDataset<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "CategoricalDataset {{\n    data: [\n")?;

        for i in 0..self.data.nrows() {
            write!(f, "        [")?;
            for j in 0..self.data.ncols() {
                write!(f, "{:?}, ", self.data[(i, j)])?;
            }
            writeln!(f, "],")?;
        }

        write!(f, "    ]\n}}")
    }
}

impl<T: CategoryCode> CategoricalDataset<T> {
    pub fn new(data: DMatrix<T>) -> Self {
        Self { data }
    }

    /// Builds a dataset from row vectors, rejecting ragged input.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some(index) = rows.iter().position(|row| row.len() != ncols) {
            return Err(Id3Error::invalid(format!(
                "Row {} has {} values, expected {}.",
                index,
                rows[index].len(),
                ncols
            )));
        }
        Ok(Self::new(DMatrix::from_row_slice(
            rows.len(),
            ncols,
            &rows.concat(),
        )))
    }

    /// Reads a CSV file whose cells are already integer codes.
    pub fn from_csv_codes<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut rows = Vec::new();
        for (row_index, result) in reader.records().enumerate() {
            let record = result.map_err(Id3Error::from_csv)?;
            let row = record
                .iter()
                .enumerate()
                .map(|(column, cell)| {
                    T::from_str_radix(cell.trim(), 10).map_err(|_| {
                        Id3Error::invalid(format!(
                            "Cell '{}' at row {}, column {} is not a non-negative integer.",
                            cell, row_index, column
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    pub fn column_values(&self, column: usize) -> Vec<T> {
        self.data.column(column).iter().copied().collect()
    }

    /// Distinct values of a column in ascending order.
    pub fn distinct_values(&self, column: usize) -> Vec<T> {
        self.data
            .column(column)
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn value_counts(&self, column: usize) -> BTreeMap<T, usize> {
        self.data
            .column(column)
            .iter()
            .fold(BTreeMap::new(), |mut acc, &value| {
                *acc.entry(value).or_insert(0) += 1;
                acc
            })
    }

    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self::new(self.data.select_rows(indices))
    }

    /// Groups rows by their value in `column`, one sub-dataset per observed value.
    pub fn partition_by(&self, column: usize) -> BTreeMap<T, Self> {
        let groups = self
            .data
            .column(column)
            .iter()
            .enumerate()
            .fold(BTreeMap::new(), |mut acc, (index, &value)| {
                acc.entry(value).or_insert_with(Vec::new).push(index);
                acc
            });

        groups
            .into_iter()
            .map(|(value, indices)| (value, self.select_rows(&indices)))
            .collect()
    }

    /// The attribute values of one row, keyed by attribute name.
    pub fn row_sample(&self, row: usize, attributes: &[Attribute]) -> Sample<T> {
        attributes
            .iter()
            .map(|attribute| (attribute.name.clone(), self.data[(row, attribute.column)]))
            .collect()
    }

    pub fn train_test_split(&self, train_size: f64, seed: Option<u64>) -> Result<(Self, Self)> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(Id3Error::invalid("Train size should be between 0.0 and 1.0"));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.nrows()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.nrows() as f64 * train_size).floor() as usize;

        let train_dataset = self.select_rows(&indices[..train_size]);
        let test_dataset = self.select_rows(&indices[train_size..]);

        Ok((train_dataset, test_dataset))
    }
}
