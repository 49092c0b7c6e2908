use crate::data::dataset::Attribute;
use crate::error::{Id3Error, Result};
use std::collections::HashSet;

/// Column schema of a tree: the name of every column and which one is the class.
#[derive(Clone, Debug, Default)]
pub struct Id3Params {
    names: Vec<String>,
    class_index: usize,
}

impl Id3Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the schema from column names (in column order) and the name of
    /// the class column.
    ///
    /// # Errors
    ///
    /// This method will return an error if the names are empty or repeated, or
    /// if the class label isn't one of them.
    pub fn with_names(names: Vec<String>, class_label: &str) -> Result<Self> {
        let mut params = Self::new();
        params.set_attribute_names(names)?;
        params.set_class_label(class_label)?;
        Ok(params)
    }

    /// Splits a comma-separated list of names, trimming each one.
    pub fn parse_names(list: &str) -> Vec<String> {
        list.split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }

    pub fn set_attribute_names(&mut self, names: Vec<String>) -> Result<()> {
        if names.is_empty() {
            return Err(Id3Error::invalid("At least one column name is required."));
        }
        let names = names
            .into_iter()
            .map(|name| name.trim().to_string())
            .collect::<Vec<_>>();
        if names.iter().any(String::is_empty) {
            return Err(Id3Error::invalid("Column names must not be empty."));
        }
        let duplicate = {
            let mut seen = HashSet::new();
            names.iter().find(|name| !seen.insert(name.as_str())).cloned()
        };
        if let Some(duplicate) = duplicate {
            return Err(Id3Error::invalid(format!(
                "Column name '{}' is used more than once.",
                duplicate
            )));
        }
        self.names = names;
        self.class_index = self.class_index.min(self.names.len() - 1);
        Ok(())
    }

    pub fn set_class_label(&mut self, class_label: &str) -> Result<()> {
        let class_label = class_label.trim();
        self.class_index = self
            .names
            .iter()
            .position(|name| name == class_label)
            .ok_or_else(|| {
                Id3Error::invalid(format!(
                    "Class label '{}' is not one of the columns {:?}.",
                    class_label, self.names
                ))
            })?;
        Ok(())
    }

    /// Fails unless the schema names exactly `ncols` columns.
    pub fn validate_for(&self, ncols: usize) -> Result<()> {
        if self.names.len() != ncols {
            return Err(Id3Error::invalid(format!(
                "{} column names were given for a dataset with {} columns.",
                self.names.len(),
                ncols
            )));
        }
        Ok(())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn class_label(&self) -> Option<&str> {
        self.names.get(self.class_index).map(String::as_str)
    }

    /// Every column except the class one, keeping its original column index.
    pub fn attributes(&self) -> Vec<Attribute> {
        self.names
            .iter()
            .enumerate()
            .filter(|&(column, _)| column != self.class_index)
            .map(|(column, name)| Attribute::new(name.clone(), column))
            .collect()
    }

    pub fn attribute(&self, name: &str) -> Option<Attribute> {
        self.attributes()
            .into_iter()
            .find(|attribute| attribute.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &str) -> Vec<String> {
        Id3Params::parse_names(list)
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(names(" Weather, Temp ,Play,"), vec!["Weather", "Temp", "Play"]);
    }

    #[test]
    fn test_with_names_class_in_the_middle() {
        let params = Id3Params::with_names(names("Weather,Play,Temp"), "Play").unwrap();
        assert_eq!(params.class_index(), 1);
        assert_eq!(params.class_label(), Some("Play"));
        assert_eq!(
            params.attributes(),
            vec![Attribute::new("Weather", 0), Attribute::new("Temp", 2)]
        );
        assert_eq!(params.attribute("Temp"), Some(Attribute::new("Temp", 2)));
        assert_eq!(params.attribute("Play"), None);
    }

    #[test]
    fn test_unknown_class_label() {
        let result = Id3Params::with_names(names("Weather,Temp"), "Play");
        assert!(matches!(result, Err(Id3Error::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_names() {
        let mut params = Id3Params::new();
        assert!(params.set_attribute_names(vec![]).is_err());
        assert!(params
            .set_attribute_names(vec!["A".to_string(), " ".to_string()])
            .is_err());
        assert!(params
            .set_attribute_names(vec!["A".to_string(), "A ".to_string()])
            .is_err());
    }

    #[test]
    fn test_validate_for() {
        let params = Id3Params::with_names(names("Weather,Temp,Play"), "Play").unwrap();
        assert!(params.validate_for(3).is_ok());
        assert!(params.validate_for(4).is_err());
    }
}
