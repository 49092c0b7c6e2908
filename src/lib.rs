//! # Rusty-id3
//!
//! `rusty-id3` builds ID3 decision trees from categorical data and classifies
//! samples with them. Attributes are chosen greedily by information gain and
//! every attribute is used at most once along a path.
//!
//! ## Getting Started
//!
//! To use `rusty-id3`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! rusty-id3 = "*"
//! ```
//!
//! ## Example Usage
//!
//! Raw string records are label-encoded per column, the tree is built for the
//! chosen class column, and samples are classified by attribute name:
//!
//! ```rust
//! use rusty_id3::data::encoder::LabelEncoder;
//! use rusty_id3::trees::params::Id3Params;
//! use rusty_id3::trees::Id3Classifier;
//!
//! let records: Vec<Vec<String>> = [
//!     ["Sunny", "Hot", "No"],
//!     ["Sunny", "Cool", "Yes"],
//!     ["Rainy", "Hot", "No"],
//!     ["Rainy", "Cool", "No"],
//! ]
//! .iter()
//! .map(|row| row.iter().map(|cell| cell.to_string()).collect())
//! .collect();
//!
//! let (encoder, dataset) = LabelEncoder::fit_transform::<u32>(&records).unwrap();
//! let params = Id3Params::with_names(Id3Params::parse_names("Weather,Temp,Play"), "Play").unwrap();
//!
//! let mut model = Id3Classifier::new(params);
//! model.fit(&dataset).unwrap();
//!
//! let sample = model
//!     .parse_sample_with(&["Weather=Sunny", "Temp=Cool"], |column, value| {
//!         encoder.encode(column, value)
//!     })
//!     .unwrap();
//! let class = model.classify(&sample).unwrap().unwrap();
//! assert_eq!(encoder.decode(2, class).unwrap(), "Yes");
//! ```

/// Dataset and label encoding utilities
pub mod data;
/// Error types
pub mod error;
/// Functions for evaluating model performance
pub mod metrics;
/// ID3 decision trees
pub mod trees;

pub use error::{Id3Error, Result};
