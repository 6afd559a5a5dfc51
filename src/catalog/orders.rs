//! Orders

use std::{fs, path::Path};

use serde::Deserialize;

use crate::catalog::CatalogError;

/// Products and quantities to put on one invoice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Order {
    /// Order lines, in the order they are added to the invoice
    pub lines: Vec<OrderLine>,
}

/// Order Line
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLine {
    /// Catalog key of the product
    pub product: String,

    /// Units ordered; one when omitted
    #[serde(default = "one")]
    pub quantity: i64,
}

fn one() -> i64 {
    1
}

impl Order {
    /// Load an order from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse an order from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        Ok(serde_norway::from_str(yaml)?)
    }
}
