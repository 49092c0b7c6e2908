//! ID3 Decision Tree Classifier
use super::builder::build_tree;
use super::node::Node;
use super::params::Id3Params;
pub use crate::data::dataset::Sample;
use crate::data::dataset::{CategoricalDataset, CategoryCode};
use crate::data::encoder::LabelEncoder;
use crate::error::{Id3Error, Result};
use crate::metrics::confusion::ClassificationMetrics;
use tracing::{info, warn};

/// Walks `tree` using the values of `sample`.
///
/// Returns `Ok(None)` when a decision node has no child for the sample's
/// value: the tree offers no classification for it.
///
/// # Errors
///
/// Returns [`Id3Error::MissingAttribute`] if the sample has no value for an
/// attribute on the path.
pub fn classify<T: CategoryCode>(tree: &Node<T>, sample: &Sample<T>) -> Result<Option<T>> {
    classify_with_unknown(tree, sample, &[])
}

/// Like [`classify`], for samples where the attributes in `unknown` hold a
/// category the encoder never saw. Reaching a split on one of them gives
/// `Ok(None)`; they are not looked up in `sample`.
pub fn classify_with_unknown<T: CategoryCode>(
    tree: &Node<T>,
    sample: &Sample<T>,
    unknown: &[String],
) -> Result<Option<T>> {
    let mut node = tree;
    loop {
        match node {
            Node::Leaf { result } => return Ok(Some(*result)),
            Node::Decision {
                attribute,
                children,
            } => {
                if unknown.contains(&attribute.name) {
                    warn!(attribute = %attribute, "category not present in the data");
                    return Ok(None);
                }
                let value = sample
                    .get(&attribute.name)
                    .ok_or_else(|| Id3Error::MissingAttribute {
                        attribute: attribute.name.clone(),
                    })?;
                match children.get(value) {
                    Some(child) => node = child,
                    None => {
                        warn!(attribute = %attribute, value = %value, "value not seen while building the tree");
                        return Ok(None);
                    }
                }
            }
        }
    }
}

/// A built tree together with the column schema it was built for.
#[derive(Clone, Debug)]
pub struct Id3Classifier<T: CategoryCode> {
    root: Option<Node<T>>,
    params: Id3Params,
}

impl<T: CategoryCode> ClassificationMetrics<T> for Id3Classifier<T> {}

impl<T: CategoryCode> Id3Classifier<T> {
    /// Creates a new, unfitted classifier.
    ///
    /// # Arguments
    ///
    /// * `params` - Column names and the class label of the datasets it will see.
    ///
    /// # Returns
    ///
    /// A classifier with no tree; call [`Self::fit`] before classifying.
    pub fn new(params: Id3Params) -> Self {
        Self { root: None, params }
    }

    pub fn params(&self) -> &Id3Params {
        &self.params
    }

    /// The built tree, or `None` before [`Self::fit`] succeeded.
    pub fn tree(&self) -> Option<&Node<T>> {
        self.root.as_ref()
    }

    /// Builds the decision tree from a dataset, replacing any previous tree.
    ///
    /// # Arguments
    ///
    /// * `dataset` - Label-encoded rows laid out as the params' column names.
    ///
    /// # Returns
    ///
    /// A string indicating that the tree was built successfully.
    ///
    /// # Errors
    ///
    /// This method will return an error if the dataset doesn't match the
    /// schema or the tree couldn't be built.
    pub fn fit(&mut self, dataset: &CategoricalDataset<T>) -> Result<String> {
        self.params.validate_for(dataset.ncols())?;
        let tree = build_tree(
            dataset,
            &self.params.attributes(),
            self.params.class_index(),
        )?;
        info!(
            rows = dataset.nrows(),
            nodes = tree.node_count(),
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "built decision tree"
        );
        self.root = Some(tree);
        Ok("Finished building the tree.".into())
    }

    /// Classifies a single sample.
    ///
    /// # Arguments
    ///
    /// * `sample` - Attribute codes keyed by attribute name. Attributes the
    ///   path never splits on may be left out.
    ///
    /// # Returns
    ///
    /// The class code of the reached leaf, or `None` if the sample holds a
    /// value the tree has no branch for.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::NotFitted`] before [`Self::fit`], and
    /// [`Id3Error::MissingAttribute`] if an attribute on the path is absent.
    pub fn classify(&self, sample: &Sample<T>) -> Result<Option<T>> {
        self.classify_with_unknown(sample, &[])
    }

    /// Classifies a sample parsed by [`Self::parse_encoded_sample`].
    ///
    /// # Arguments
    ///
    /// * `sample` - Attribute codes keyed by attribute name.
    /// * `unknown` - Attributes whose category the encoder never saw.
    ///
    /// # Returns
    ///
    /// As [`Self::classify`]; reaching a split on an `unknown` attribute gives `None`.
    ///
    /// # Errors
    ///
    /// The same as [`Self::classify`].
    pub fn classify_with_unknown(
        &self,
        sample: &Sample<T>,
        unknown: &[String],
    ) -> Result<Option<T>> {
        let root = self.root.as_ref().ok_or(Id3Error::NotFitted)?;
        classify_with_unknown(root, sample, unknown)
    }

    /// Classifies every row of `dataset` from its own attribute values.
    ///
    /// # Returns
    ///
    /// One prediction per row, in row order.
    ///
    /// # Errors
    ///
    /// Returns an error before [`Self::fit`] or if the dataset doesn't match the schema.
    pub fn predict(&self, dataset: &CategoricalDataset<T>) -> Result<Vec<Option<T>>> {
        let root = self.root.as_ref().ok_or(Id3Error::NotFitted)?;
        self.params.validate_for(dataset.ncols())?;
        let attributes = self.params.attributes();
        (0..dataset.nrows())
            .map(|row| classify(root, &dataset.row_sample(row, &attributes)))
            .collect()
    }

    /// Parses `name=value` pairs into a sample. Attributes may be left out.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::InvalidInput`] for a malformed pair, a name that is
    /// not an attribute, or a value that is not a non-negative integer code.
    pub fn parse_sample<S: AsRef<str>>(&self, pairs: &[S]) -> Result<Sample<T>> {
        self.parse_sample_with(pairs, |_, value| {
            T::from_str_radix(value, 10).map_err(|_| {
                Id3Error::invalid(format!("'{}' is not a non-negative integer code.", value))
            })
        })
    }

    /// Parses `name=value` pairs of raw categories through `encoder`.
    ///
    /// # Returns
    ///
    /// The encoded sample and the names of attributes whose category the
    /// encoder never saw. Those are left out of the sample; pass them to
    /// [`Self::classify_with_unknown`].
    ///
    /// # Errors
    ///
    /// As [`Self::parse_sample_with`], except for unknown categories.
    pub fn parse_encoded_sample<S: AsRef<str>>(
        &self,
        pairs: &[S],
        encoder: &LabelEncoder,
    ) -> Result<(Sample<T>, Vec<String>)> {
        let mut unknown_columns = Vec::new();
        let mut sample = self.parse_sample_with(pairs, |column, value| {
            match encoder.encode(column, value) {
                Err(Id3Error::UnknownCategory { .. }) => {
                    unknown_columns.push(column);
                    Ok(T::zero())
                }
                other => other,
            }
        })?;

        let names = self.params.names();
        let unknown = unknown_columns
            .into_iter()
            .map(|column| names[column].clone())
            .collect::<Vec<_>>();
        for name in &unknown {
            sample.remove(name);
        }
        Ok((sample, unknown))
    }

    /// Like [`Self::parse_sample`], converting each value with `parse`, which
    /// receives the attribute's column index.
    pub fn parse_sample_with<S, F>(&self, pairs: &[S], mut parse: F) -> Result<Sample<T>>
    where
        S: AsRef<str>,
        F: FnMut(usize, &str) -> Result<T>,
    {
        let mut sample = Sample::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                Id3Error::invalid(format!("Expected 'name=value', got '{}'.", pair))
            })?;
            let (name, value) = (name.trim(), value.trim());
            let attribute = self.params.attribute(name).ok_or_else(|| {
                Id3Error::invalid(format!("'{}' is not an attribute of this tree.", name))
            })?;
            if value.is_empty() {
                continue;
            }
            sample.insert(attribute.name, parse(attribute.column, value)?);
        }
        Ok(sample)
    }
}
