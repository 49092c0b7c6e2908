//! Entropy and information gain over label-encoded partitions.
use crate::data::dataset::{CategoricalDataset, CategoryCode};

/// Shannon entropy, in bits, of a discrete probability distribution.
///
/// Zero probabilities contribute nothing to the sum.
pub fn entropy(probabilities: &[f64]) -> f64 {
    probabilities
        .iter()
        .filter(|&&p| p > 0.0)
        .fold(0.0, |acc, &p| acc - p * p.log2())
}

/// Relative frequency of every class value in `column`, ordered by class code.
pub fn class_probabilities<T: CategoryCode>(dataset: &CategoricalDataset<T>, column: usize) -> Vec<f64> {
    let total = dataset.nrows() as f64;
    dataset
        .value_counts(column)
        .values()
        .map(|&count| count as f64 / total)
        .collect()
}

/// Most frequent value of `class_index`; the lowest code wins a tie.
pub fn majority_class<T: CategoryCode>(dataset: &CategoricalDataset<T>, class_index: usize) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    for (value, count) in dataset.value_counts(class_index) {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Entropy of the class column minus the size-weighted entropy of each group
/// formed by the distinct values of `attribute_column`.
pub fn information_gain<T: CategoryCode>(
    dataset: &CategoricalDataset<T>,
    attribute_column: usize,
    class_index: usize,
) -> f64 {
    if dataset.is_empty() {
        return 0.0;
    }
    let num_samples = dataset.nrows() as f64;
    let total_entropy = entropy(&class_probabilities(dataset, class_index));

    let weighted_entropy = dataset
        .partition_by(attribute_column)
        .values()
        .map(|group| {
            let weight = group.nrows() as f64 / num_samples;
            weight * entropy(&class_probabilities(group, class_index))
        })
        .sum::<f64>();

    total_entropy - weighted_entropy
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    fn weather() -> CategoricalDataset<u32> {
        // Weather, Temp, Play
        CategoricalDataset::new(DMatrix::from_row_slice(
            4,
            3,
            &[1, 1, 0, 1, 0, 1, 0, 1, 0, 0, 0, 0],
        ))
    }

    #[test]
    fn test_entropy_single_class() {
        assert_eq!(entropy(&[1.0]), 0.0);
    }

    #[test]
    fn test_entropy_uniform_two_classes() {
        assert_relative_eq!(entropy(&[0.5, 0.5]), 1.0);
    }

    #[test]
    fn test_entropy_ignores_zero_probabilities() {
        assert_relative_eq!(entropy(&[0.5, 0.0, 0.5]), 1.0);
        assert_eq!(entropy(&[]), 0.0);
    }

    #[test]
    fn test_entropy_uniform_four_classes() {
        assert_relative_eq!(entropy(&[0.25; 4]), 2.0);
    }

    #[test]
    fn test_class_probabilities() {
        let probabilities = class_probabilities(&weather(), 2);
        assert_eq!(probabilities, vec![0.75, 0.25]);
    }

    #[test]
    fn test_majority_class_tie_breaks_on_lowest_code() {
        let dataset = CategoricalDataset::<u8>::from_rows(&[
            vec![0, 3],
            vec![1, 1],
            vec![0, 3],
            vec![1, 1],
            vec![0, 2],
        ])
        .unwrap();
        assert_eq!(majority_class(&dataset, 1), Some(1));
        assert_eq!(majority_class(&dataset, 0), Some(0));
    }

    #[test]
    fn test_majority_class_empty() {
        let dataset = CategoricalDataset::<u8>::new(DMatrix::zeros(0, 2));
        assert_eq!(majority_class(&dataset, 1), None);
    }

    #[test]
    fn test_information_gain_weather() {
        let dataset = weather();
        let expected = entropy(&[0.75, 0.25]) - 0.5;
        assert_relative_eq!(information_gain(&dataset, 0, 2), expected, epsilon = 1e-12);
        assert_relative_eq!(information_gain(&dataset, 1, 2), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_information_gain_perfect_split() {
        let dataset =
            CategoricalDataset::<u32>::from_rows(&[vec![0, 0], vec![0, 0], vec![1, 1], vec![1, 1]])
                .unwrap();
        assert_relative_eq!(information_gain(&dataset, 0, 1), 1.0);
    }

    #[test]
    fn test_information_gain_uncorrelated_attribute() {
        // every attribute value sees the same class distribution
        let dataset = CategoricalDataset::<u32>::from_rows(&[
            vec![0, 0],
            vec![0, 1],
            vec![1, 0],
            vec![1, 1],
            vec![2, 0],
            vec![2, 1],
        ])
        .unwrap();
        assert_relative_eq!(information_gain(&dataset, 0, 1), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_information_gain_is_non_negative() {
        let dataset = CategoricalDataset::<u32>::from_rows(&[
            vec![0, 2, 1],
            vec![1, 0, 0],
            vec![2, 2, 1],
            vec![0, 1, 0],
            vec![1, 1, 2],
            vec![2, 0, 1],
            vec![0, 0, 2],
        ])
        .unwrap();
        for column in 0..2 {
            assert!(information_gain(&dataset, column, 2) >= -1e-12);
        }
    }
}
