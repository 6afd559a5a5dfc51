//! Products

use std::mem;

use rust_decimal::Decimal;
use slotmap::new_key_type;
use thiserror::Error;

use crate::{
    clock::Clock,
    products::excise::{DiscountSchedule, Excise},
};

pub mod excise;

/// VAT rate for standard-rated goods (23%).
pub const STANDARD_TAX_RATE: Decimal = Decimal::from_parts(23, 0, 0, false, 2);

/// VAT rate for dairy goods (8%).
pub const DAIRY_TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Invalid arguments to a product constructor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// The product name was empty.
    #[error("product name must not be empty")]
    EmptyName,

    /// The net unit price was below zero.
    #[error("product price must not be negative, got {0}")]
    NegativePrice(Decimal),

    /// The tax rate was below zero.
    #[error("tax rate must not be negative, got {0}")]
    NegativeTaxRate(Decimal),

    /// The gross unit price does not fit in a decimal.
    #[error("gross price of a product priced at {0} is out of range")]
    PriceOutOfRange(Decimal),

    /// The tax rate cannot be shown as a percentage.
    #[error("tax rate {0} is out of range")]
    TaxRateOutOfRange(Decimal),
}

/// The kind of product, which decides its tax rate and any surcharge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductKind {
    /// Standard-rated goods.
    Standard,

    /// Goods exempt from VAT.
    TaxFree,

    /// Dairy, taxed at the reduced rate.
    Dairy,

    /// Wine: standard rate plus the full excise surcharge.
    Wine(Excise),

    /// Fuel: standard rate plus a seasonally discounted excise surcharge.
    Fuel(Excise),
}

impl ProductKind {
    /// Short lowercase label for the kind.
    pub fn label(&self) -> &'static str {
        match self {
            ProductKind::Standard => "standard",
            ProductKind::TaxFree => "tax-free",
            ProductKind::Dairy => "dairy",
            ProductKind::Wine(_) => "wine",
            ProductKind::Fuel(_) => "fuel",
        }
    }
}

/// Product
///
/// Immutable once built. Products are compared for invoice merging with
/// [`Product::is_equivalent`], never by identity. The tax amount and gross
/// price are computed once, with overflow checked, when the product is built.
#[derive(Debug, Clone)]
pub struct Product {
    name: String,
    price: Decimal,
    tax_rate: Decimal,
    kind: ProductKind,
    tax_amount: Decimal,
    price_with_tax: Decimal,
}

impl Product {
    /// Standard-rated product (23% VAT).
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the name is empty, the price is negative,
    /// or the gross price is out of range.
    pub fn standard(name: impl Into<String>, price: Decimal) -> Result<Self, ProductError> {
        Self::build(name.into(), price, STANDARD_TAX_RATE, ProductKind::Standard)
    }

    /// Standard product with a custom tax rate, expressed as a fraction (`0.05` is 5%).
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the name is empty, the price or tax rate
    /// is negative, or either is out of range.
    pub fn with_tax_rate(
        name: impl Into<String>,
        price: Decimal,
        tax_rate: Decimal,
    ) -> Result<Self, ProductError> {
        Self::build(name.into(), price, tax_rate, ProductKind::Standard)
    }

    /// VAT-exempt product.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the name is empty, the price is negative,
    /// or the gross price is out of range.
    pub fn tax_free(name: impl Into<String>, price: Decimal) -> Result<Self, ProductError> {
        Self::build(name.into(), price, Decimal::ZERO, ProductKind::TaxFree)
    }

    /// Dairy product (8% VAT).
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the name is empty, the price is negative,
    /// or the gross price is out of range.
    pub fn dairy(name: impl Into<String>, price: Decimal) -> Result<Self, ProductError> {
        Self::build(name.into(), price, DAIRY_TAX_RATE, ProductKind::Dairy)
    }

    /// Bottle of wine: 23% VAT plus the excise surcharge.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the name is empty, the price is negative,
    /// or the gross price is out of range.
    pub fn wine(name: impl Into<String>, price: Decimal) -> Result<Self, ProductError> {
        Self::build(
            name.into(),
            price,
            STANDARD_TAX_RATE,
            ProductKind::Wine(Excise::fixed()),
        )
    }

    /// Fuel canister using the default discount schedule.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the name is empty, the price is negative,
    /// or the gross price is out of range.
    pub fn fuel(
        name: impl Into<String>,
        price: Decimal,
        clock: &impl Clock,
    ) -> Result<Self, ProductError> {
        Self::fuel_with_schedule(name, price, DiscountSchedule::default(), clock)
    }

    /// Fuel canister: 23% VAT plus excise, waived on the schedule's days.
    ///
    /// The schedule is checked against `clock` now; the surcharge does not
    /// change afterwards.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the name is empty, the price is negative,
    /// or the gross price is out of range.
    pub fn fuel_with_schedule(
        name: impl Into<String>,
        price: Decimal,
        schedule: DiscountSchedule,
        clock: &impl Clock,
    ) -> Result<Self, ProductError> {
        let excise = Excise::seasonal(schedule, clock.today());

        Self::build(
            name.into(),
            price,
            STANDARD_TAX_RATE,
            ProductKind::Fuel(excise),
        )
    }

    fn build(
        name: String,
        price: Decimal,
        tax_rate: Decimal,
        kind: ProductKind,
    ) -> Result<Self, ProductError> {
        validate(&name, price, tax_rate)?;

        let surcharge = match &kind {
            ProductKind::Wine(excise) | ProductKind::Fuel(excise) => excise.surcharge(),
            ProductKind::Standard | ProductKind::TaxFree | ProductKind::Dairy => Decimal::ZERO,
        };

        let tax_amount = price
            .checked_mul(tax_rate)
            .ok_or(ProductError::PriceOutOfRange(price))?;

        let price_with_tax = price
            .checked_add(tax_amount)
            .and_then(|taxed| taxed.checked_add(surcharge))
            .ok_or(ProductError::PriceOutOfRange(price))?;

        Ok(Self {
            name,
            price,
            tax_rate,
            kind,
            tax_amount,
            price_with_tax,
        })
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Net unit price
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Tax rate as a fraction
    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Product kind
    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    /// Excise details, for wine and fuel.
    pub fn excise(&self) -> Option<&Excise> {
        match &self.kind {
            ProductKind::Wine(excise) | ProductKind::Fuel(excise) => Some(excise),
            ProductKind::Standard | ProductKind::TaxFree | ProductKind::Dairy => None,
        }
    }

    /// VAT on one unit.
    pub fn tax_amount(&self) -> Decimal {
        self.tax_amount
    }

    /// Gross unit price: net price, VAT and any excise surcharge.
    pub fn price_with_tax(&self) -> Decimal {
        self.price_with_tax
    }

    /// Whether `other` counts as the same product on an invoice.
    ///
    /// Name, price, tax rate and kind must all match. Prices and rates
    /// match only with the same scale, so `10` and `10.00` differ. Two
    /// separately built products with the same values are equivalent.
    pub fn is_equivalent(&self, other: &Product) -> bool {
        self.name == other.name
            && same_decimal(self.price, other.price)
            && same_decimal(self.tax_rate, other.tax_rate)
            && mem::discriminant(&self.kind) == mem::discriminant(&other.kind)
    }
}

fn same_decimal(a: Decimal, b: Decimal) -> bool {
    a == b && a.scale() == b.scale()
}

fn validate(name: &str, price: Decimal, tax_rate: Decimal) -> Result<(), ProductError> {
    if name.is_empty() {
        return Err(ProductError::EmptyName);
    }

    if price < Decimal::ZERO {
        return Err(ProductError::NegativePrice(price));
    }

    if tax_rate < Decimal::ZERO {
        return Err(ProductError::NegativeTaxRate(tax_rate));
    }

    // Receipts print the rate in percent
    if tax_rate.checked_mul(Decimal::ONE_HUNDRED).is_none() {
        return Err(ProductError::TaxRateOutOfRange(tax_rate));
    }

    Ok(())
}
