/// Recursive ID3 induction
pub mod builder;
/// Tree traversal and the classifier facade
pub mod classifier;
/// Entropy and information gain
pub mod entropy;
/// Tree nodes
pub mod node;
/// Column schema
pub mod params;

pub use builder::build_tree;
pub use classifier::{classify, classify_with_unknown, Id3Classifier, Sample};
pub use node::Node;
