//! ID3 tree induction.
//!
//! Each level splits on the attribute with the highest information gain and
//! hands every child the attribute list without that attribute. Recursion
//! depth is therefore bounded by the number of attributes.
use super::entropy::{information_gain, majority_class};
use super::node::Node;
use crate::data::dataset::{Attribute, CategoricalDataset, CategoryCode};
use crate::error::{Id3Error, Result};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

/// Upper bound on the attribute list, and so on the recursion depth of a build.
pub const MAX_ATTRIBUTES: usize = 1024;

/// Gains closer than this are equal; summation order alone can move a gain by a few ulps.
const GAIN_TOLERANCE: f64 = 1e-12;

/// Builds an ID3 tree over `data`, splitting on `attributes` and predicting
/// the column at `class_index`.
///
/// # Errors
///
/// Returns [`Id3Error::InvalidInput`] if the dataset has no rows, the class
/// index is out of range, or an attribute is out of range, refers to the class
/// column or is listed twice.
pub fn build_tree<T: CategoryCode>(
    data: &CategoricalDataset<T>,
    attributes: &[Attribute],
    class_index: usize,
) -> Result<Node<T>> {
    validate(data, attributes, class_index)?;
    grow(data, attributes, class_index)
}

fn validate<T: CategoryCode>(
    data: &CategoricalDataset<T>,
    attributes: &[Attribute],
    class_index: usize,
) -> Result<()> {
    if data.is_empty() {
        return Err(Id3Error::invalid("Cannot build a tree from an empty dataset."));
    }
    if class_index >= data.ncols() {
        return Err(Id3Error::invalid(format!(
            "Class index {} is out of range for a dataset with {} columns.",
            class_index,
            data.ncols()
        )));
    }
    if attributes.len() > MAX_ATTRIBUTES {
        return Err(Id3Error::invalid(format!(
            "At most {} attributes are supported, got {}.",
            MAX_ATTRIBUTES,
            attributes.len()
        )));
    }

    let mut columns = HashSet::new();
    let mut names = HashSet::new();
    for attribute in attributes {
        if attribute.column >= data.ncols() {
            return Err(Id3Error::invalid(format!(
                "Attribute '{}' refers to column {}, but the dataset has {} columns.",
                attribute.name,
                attribute.column,
                data.ncols()
            )));
        }
        if attribute.column == class_index {
            return Err(Id3Error::invalid(format!(
                "Attribute '{}' is the class column.",
                attribute.name
            )));
        }
        if !columns.insert(attribute.column) || !names.insert(attribute.name.as_str()) {
            return Err(Id3Error::invalid(format!(
                "Attribute '{}' is listed more than once.",
                attribute.name
            )));
        }
    }
    Ok(())
}

fn grow<T: CategoryCode>(
    data: &CategoricalDataset<T>,
    attributes: &[Attribute],
    class_index: usize,
) -> Result<Node<T>> {
    let classes = data.distinct_values(class_index);
    if let [class] = classes.as_slice() {
        trace!(class = %class, rows = data.nrows(), "pure partition");
        return Ok(Node::leaf(*class));
    }

    let majority = majority_class(data, class_index)
        .ok_or_else(|| Id3Error::invalid("Cannot grow a node from an empty partition."))?;
    if attributes.is_empty() {
        debug!(class = %majority, rows = data.nrows(), "no attributes left, majority leaf");
        return Ok(Node::leaf(majority));
    }

    let (best_index, best_gain) = best_attribute(data, attributes, class_index);
    let attribute = attributes[best_index].clone();
    debug!(
        attribute = %attribute,
        gain = best_gain,
        rows = data.nrows(),
        "splitting"
    );

    let remaining = attributes
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != best_index)
        .map(|(_, attribute)| attribute.clone())
        .collect::<Vec<_>>();

    let mut children = BTreeMap::new();
    for (value, subset) in data.partition_by(attribute.column) {
        let child = if subset.is_empty() {
            Node::leaf(majority)
        } else {
            grow(&subset, &remaining, class_index)?
        };
        children.insert(value, child);
    }

    Ok(Node::Decision {
        attribute,
        children,
    })
}

/// Index and gain of the attribute with the highest gain; the earliest one wins a tie.
fn best_attribute<T: CategoryCode>(
    data: &CategoricalDataset<T>,
    attributes: &[Attribute],
    class_index: usize,
) -> (usize, f64) {
    let mut best_index = 0;
    let mut best_gain = f64::NEG_INFINITY;
    for (index, attribute) in attributes.iter().enumerate() {
        let gain = information_gain(data, attribute.column, class_index);
        trace!(attribute = %attribute, gain, "candidate");
        if gain > best_gain + GAIN_TOLERANCE {
            best_index = index;
            best_gain = gain;
        }
    }
    (best_index, best_gain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    // Weather (Rainy=0, Sunny=1), Temp (Cool=0, Hot=1), Play (No=0, Yes=1)
    fn weather() -> CategoricalDataset<u32> {
        CategoricalDataset::new(DMatrix::from_row_slice(
            4,
            3,
            &[1, 1, 0, 1, 0, 1, 0, 1, 0, 0, 0, 0],
        ))
    }

    fn weather_attributes() -> Vec<Attribute> {
        vec![Attribute::new("Weather", 0), Attribute::new("Temp", 1)]
    }

    #[test]
    fn test_weather_scenario() {
        let tree = build_tree(&weather(), &weather_attributes(), 2).unwrap();

        assert_eq!(tree.attribute().unwrap().name, "Weather");
        let children = tree.children().unwrap();
        assert_eq!(children[&0], Node::leaf(0));

        let sunny = &children[&1];
        assert_eq!(sunny.attribute().unwrap().name, "Temp");
        assert_eq!(sunny.children().unwrap()[&0], Node::leaf(1));
        assert_eq!(sunny.children().unwrap()[&1], Node::leaf(0));
    }

    #[test]
    fn test_tied_gain_picks_first_attribute() {
        let attributes = vec![Attribute::new("Temp", 1), Attribute::new("Weather", 0)];
        let tree = build_tree(&weather(), &attributes, 2).unwrap();
        assert_eq!(tree.attribute().unwrap().name, "Temp");
        assert_eq!(tree.children().unwrap()[&1], Node::leaf(0));
    }

    #[test]
    fn test_tied_gain_with_relabeled_copy_picks_first_attribute() {
        // B is A with its codes reversed, so both split the rows identically
        let mut rows = vec![
            vec![0, 2, 1],
            vec![0, 2, 0],
            vec![1, 1, 1],
            vec![1, 1, 0],
            vec![2, 0, 1],
        ];
        rows.extend(std::iter::repeat(vec![2, 0, 0]).take(4));
        let data = CategoricalDataset::<u32>::from_rows(&rows).unwrap();

        let forward = vec![Attribute::new("A", 0), Attribute::new("B", 1)];
        let tree = build_tree(&data, &forward, 2).unwrap();
        assert_eq!(tree.attribute().unwrap().name, "A");

        let backward = vec![Attribute::new("B", 1), Attribute::new("A", 0)];
        let tree = build_tree(&data, &backward, 2).unwrap();
        assert_eq!(tree.attribute().unwrap().name, "B");
    }

    #[test]
    fn test_constant_class_is_single_leaf() {
        let data = CategoricalDataset::<u32>::from_rows(&[
            vec![0, 1, 2, 4],
            vec![1, 0, 2, 4],
            vec![2, 1, 0, 4],
        ])
        .unwrap();
        for count in 0..=3 {
            let attributes = (0..count)
                .map(|column| Attribute::new(format!("A{}", column), column))
                .collect::<Vec<_>>();
            assert_eq!(build_tree(&data, &attributes, 3).unwrap(), Node::leaf(4));
        }
    }

    #[test]
    fn test_no_attributes_gives_majority_leaf() {
        let data =
            CategoricalDataset::<u32>::from_rows(&[vec![0, 2], vec![1, 1], vec![0, 2], vec![1, 1]])
                .unwrap();
        assert_eq!(build_tree(&data, &[], 1).unwrap(), Node::leaf(1));

        let data =
            CategoricalDataset::<u32>::from_rows(&[vec![0, 2], vec![1, 1], vec![0, 2]]).unwrap();
        assert_eq!(build_tree(&data, &[], 1).unwrap(), Node::leaf(2));
    }

    #[test]
    fn test_contradicting_rows_end_in_majority_leaf() {
        let data =
            CategoricalDataset::<u32>::from_rows(&[vec![0, 0], vec![0, 1], vec![0, 1]]).unwrap();
        let tree = build_tree(&data, &[Attribute::new("A", 0)], 1).unwrap();
        assert_eq!(tree.attribute().unwrap().name, "A");
        assert_eq!(tree.children().unwrap().len(), 1);
        assert_eq!(tree.children().unwrap()[&0], Node::leaf(1));
    }

    #[test]
    fn test_children_only_for_observed_values() {
        let data = CategoricalDataset::<u32>::from_rows(&[
            vec![0, 5, 0],
            vec![3, 5, 1],
            vec![7, 2, 1],
        ])
        .unwrap();
        let attributes = vec![Attribute::new("A", 0), Attribute::new("B", 1)];
        let tree = build_tree(&data, &attributes, 2).unwrap();
        let keys = tree.children().unwrap().keys().copied().collect::<Vec<_>>();
        assert_eq!(keys, vec![0, 3, 7]);
    }

    #[test]
    fn test_attribute_used_once_per_path() {
        let data = CategoricalDataset::<u32>::from_rows(&[
            vec![0, 0, 0],
            vec![0, 1, 1],
            vec![1, 0, 1],
            vec![1, 1, 0],
        ])
        .unwrap();
        let attributes = vec![Attribute::new("A", 0), Attribute::new("B", 1)];
        let tree = build_tree(&data, &attributes, 2).unwrap();
        assert_eq!(tree.depth(), 2);
        for child in tree.children().unwrap().values() {
            assert_eq!(child.attribute().unwrap().name, "B");
            assert!(child.children().unwrap().values().all(Node::is_leaf));
        }
    }

    #[test]
    fn test_class_column_not_last() {
        let data = CategoricalDataset::<u32>::from_rows(&[
            vec![0, 0, 1],
            vec![1, 0, 0],
            vec![0, 1, 1],
            vec![1, 1, 0],
        ])
        .unwrap();
        let attributes = vec![Attribute::new("A", 1), Attribute::new("B", 2)];
        let tree = build_tree(&data, &attributes, 0).unwrap();
        assert_eq!(tree.attribute().unwrap().name, "B");
        assert_eq!(tree.children().unwrap()[&1], Node::leaf(0));
        assert_eq!(tree.children().unwrap()[&0], Node::leaf(1));
    }

    #[test]
    fn test_invalid_input() {
        let empty = CategoricalDataset::<u32>::new(DMatrix::zeros(0, 3));
        assert!(matches!(
            build_tree(&empty, &weather_attributes(), 2),
            Err(Id3Error::InvalidInput(_))
        ));

        let data = weather();
        let invalid = [
            (weather_attributes(), 3),
            (vec![Attribute::new("Weather", 5)], 2),
            (vec![Attribute::new("Play", 2)], 2),
            (vec![Attribute::new("Weather", 0), Attribute::new("Again", 0)], 2),
            (vec![Attribute::new("Weather", 0), Attribute::new("Weather", 1)], 2),
        ];
        for (attributes, class_index) in invalid {
            assert!(matches!(
                build_tree(&data, &attributes, class_index),
                Err(Id3Error::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_too_many_attributes() {
        let data = CategoricalDataset::<u32>::new(DMatrix::zeros(1, MAX_ATTRIBUTES + 2));
        let attributes = (0..=MAX_ATTRIBUTES)
            .map(|column| Attribute::new(format!("A{}", column), column))
            .collect::<Vec<_>>();
        assert_eq!(attributes.len(), MAX_ATTRIBUTES + 1);
        assert!(matches!(
            build_tree(&data, &attributes, MAX_ATTRIBUTES + 1),
            Err(Id3Error::InvalidInput(_))
        ));

        let within = &attributes[..MAX_ATTRIBUTES];
        assert_eq!(
            build_tree(&data, within, MAX_ATTRIBUTES + 1).unwrap(),
            Node::leaf(0)
        );
    }
}
