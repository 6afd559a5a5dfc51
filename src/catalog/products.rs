//! Product records

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, GBP, PLN, USD};
use serde::Deserialize;

use crate::{
    catalog::CatalogError,
    clock::Clock,
    products::{
        Product,
        excise::{DiscountDay, DiscountSchedule},
    },
};

/// Catalog file layout
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    /// Days on which fuel excise is waived; the built-in schedule when omitted.
    #[serde(default)]
    pub discount_days: Option<Vec<DiscountDayRecord>>,

    /// Map of product key -> product record, in key order
    pub products: BTreeMap<String, ProductRecord>,
}

impl CatalogFile {
    /// Discount schedule described by the file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidDiscountDay`] for a day that does not exist.
    pub fn schedule(&self) -> Result<DiscountSchedule, CatalogError> {
        let Some(records) = &self.discount_days else {
            return Ok(DiscountSchedule::default());
        };

        let days = records
            .iter()
            .map(|record| {
                DiscountDay::new(record.month, record.day).ok_or(CatalogError::InvalidDiscountDay {
                    month: record.month,
                    day: record.day,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DiscountSchedule::from_days(days))
    }
}

/// A (month, day) entry in the discount schedule
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DiscountDayRecord {
    /// Month, 1-12
    pub month: i8,

    /// Day of month
    pub day: i8,
}

/// Product kinds as written in catalog files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KindRecord {
    /// Standard rate, or `tax_rate` when given
    Standard,

    /// VAT exempt
    TaxFree,

    /// Reduced dairy rate
    Dairy,

    /// Wine with excise
    Wine,

    /// Fuel with seasonal excise
    Fuel,
}

/// Product Record
#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    /// Product name
    pub name: String,

    /// Product kind
    pub kind: KindRecord,

    /// Net unit price (e.g., "10.00 PLN")
    pub price: String,

    /// Custom tax rate for standard products (e.g., "5%" or "0.05")
    #[serde(default)]
    pub tax_rate: Option<String>,
}

impl ProductRecord {
    /// Build the product, returning it with the currency of its price.
    ///
    /// # Errors
    ///
    /// Returns an error if the price or tax rate cannot be parsed, a tax rate
    /// is given for a kind with a fixed rate, or the product is invalid.
    pub fn into_product(
        self,
        key: &str,
        schedule: &DiscountSchedule,
        clock: &impl Clock,
    ) -> Result<(Product, &'static Currency), CatalogError> {
        let (price, currency) = parse_price(&self.price)?;

        let tax_rate = self.tax_rate.as_deref().map(parse_percentage).transpose()?;

        let product = match (self.kind, tax_rate) {
            (KindRecord::Standard, Some(rate)) => Product::with_tax_rate(self.name, price, rate),
            (KindRecord::Standard, None) => Product::standard(self.name, price),
            (KindRecord::TaxFree, None) => Product::tax_free(self.name, price),
            (KindRecord::Dairy, None) => Product::dairy(self.name, price),
            (KindRecord::Wine, None) => Product::wine(self.name, price),
            (KindRecord::Fuel, None) => {
                Product::fuel_with_schedule(self.name, price, schedule.clone(), clock)
            }
            (_, Some(_)) => return Err(CatalogError::FixedTaxRate(key.to_string())),
        }
        .map_err(|source| CatalogError::Product {
            key: key.to_string(),
            source,
        })?;

        Ok((product, currency))
    }
}

/// Parse price string (e.g., "10.00 PLN") into an amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code is not
/// recognised.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), CatalogError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    let currency = match code {
        "PLN" => PLN,
        "EUR" => EUR,
        "GBP" => GBP,
        "USD" => USD,
        other => return Err(CatalogError::UnknownCurrency(other.to_string())),
    };

    Ok((amount, currency))
}

/// Parse a rate string (e.g., "23%" or "0.23") into a fraction
///
/// # Errors
///
/// Returns an error if the string is not a decimal number, with or without a
/// trailing `%`.
pub fn parse_percentage(s: &str) -> Result<Decimal, CatalogError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        let value = percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| CatalogError::InvalidPercentage(s.to_string()))?;

        Ok(value / Decimal::ONE_HUNDRED)
    } else {
        trimmed
            .parse::<Decimal>()
            .map_err(|_err| CatalogError::InvalidPercentage(s.to_string()))
    }
}
