//! Catalog
//!
//! Products loaded from YAML, addressed by string key, and orders that
//! turn into invoices.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::{SecondaryMap, SlotMap};
use thiserror::Error;
use tracing::info;

use crate::{
    catalog::{orders::Order, products::CatalogFile},
    clock::Clock,
    invoice::{Invoice, LineItemError},
    numbering::InvoiceSequence,
    products::{Product, ProductError, ProductKey},
};

pub mod orders;
pub mod products;

/// Catalog and order loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading catalog files
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// A discount day that does not exist in the calendar
    #[error("Invalid discount day: month {month}, day {day}")]
    InvalidDiscountDay {
        /// Month given
        month: i8,
        /// Day given
        day: i8,
    },

    /// A tax rate was given for a kind whose rate is fixed
    #[error("Product {0} has a fixed tax rate")]
    FixedTaxRate(String),

    /// Product key used twice
    #[error("Duplicate product: {0}")]
    DuplicateProduct(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product data rejected by the product constructor
    #[error("Invalid product {key}: {source}")]
    Product {
        /// Catalog key of the product
        key: String,
        /// Underlying error
        source: ProductError,
    },

    /// Order line rejected by the invoice
    #[error("Invalid order line for {product}: {source}")]
    LineItem {
        /// Catalog key of the product
        product: String,
        /// Underlying error
        source: LineItemError,
    },
}

/// Catalog
///
/// Products are kept in insertion order. Catalogs loaded from YAML insert
/// products sorted by key.
#[derive(Debug, Default)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
    names: SecondaryMap<ProductKey, String>,
    keys: FxHashMap<String, ProductKey>,
    currency: Option<&'static Currency>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a YAML file.
    ///
    /// Fuel products check their discount schedule against `clock` as they are built.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a product is
    /// invalid, or products are priced in different currencies.
    pub fn load(path: impl AsRef<Path>, clock: &impl Clock) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_yaml(&contents, clock)?;

        info!(path = %path.display(), products = catalog.len(), "loaded catalog");

        Ok(catalog)
    }

    /// Parse a catalog from YAML.
    ///
    /// Products are checked in key order, so the first error is the same on
    /// every run.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a product is invalid, or
    /// products are priced in different currencies.
    pub fn from_yaml(yaml: &str, clock: &impl Clock) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_norway::from_str(yaml)?;
        let schedule = file.schedule()?;

        let mut catalog = Self::new();

        for (key, record) in file.products {
            let (product, currency) = record.into_product(&key, &schedule, clock)?;

            // Validate currency consistency
            if let Some(existing_currency) = catalog.currency {
                if existing_currency != currency {
                    return Err(CatalogError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                catalog.currency = Some(currency);
            }

            catalog.insert(key, product)?;
        }

        Ok(catalog)
    }

    /// Add a product under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if `key` is already taken.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        product: Product,
    ) -> Result<ProductKey, CatalogError> {
        let key = key.into();

        if self.keys.contains_key(&key) {
            return Err(CatalogError::DuplicateProduct(key));
        }

        let product_key = self.products.insert(product);
        self.names.insert(product_key, key.clone());
        self.keys.insert(key, product_key);

        Ok(product_key)
    }

    /// Look up a product by catalog key.
    pub fn get(&self, key: &str) -> Option<&Product> {
        self.keys
            .get(key)
            .and_then(|product_key| self.products.get(*product_key))
    }

    /// Look up a product by slot key.
    pub fn product(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(key)
    }

    /// Iterate over catalog keys and their products, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Product)> {
        self.products.iter().filter_map(|(product_key, product)| {
            self.names
                .get(product_key)
                .map(|key| (key.as_str(), product))
        })
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency of catalog prices, once any priced product has been loaded.
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    /// Issue an invoice holding every line of `order`.
    ///
    /// Lines for equivalent products merge as they would when added by hand.
    ///
    /// # Errors
    ///
    /// Returns an error if a line names an unknown product or has an invalid
    /// quantity; no invoice is returned in that case.
    pub fn invoice(
        &self,
        order: &Order,
        clock: &impl Clock,
        sequence: &InvoiceSequence,
    ) -> Result<Invoice<'_>, CatalogError> {
        let mut invoice = Invoice::issue(clock, sequence);

        for line in &order.lines {
            let product = self
                .get(&line.product)
                .ok_or_else(|| CatalogError::ProductNotFound(line.product.clone()))?;

            invoice
                .add_line_item(product, line.quantity)
                .map_err(|source| CatalogError::LineItem {
                    product: line.product.clone(),
                    source,
                })?;
        }

        Ok(invoice)
    }
}
