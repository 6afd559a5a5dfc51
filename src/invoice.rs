//! Invoice

use jiff::civil::Date;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    clock::{Clock, SystemClock},
    numbering::{InvoiceNumber, InvoiceSequence},
    pricing,
    products::Product,
};

/// Invalid arguments when adding a line item.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineItemError {
    /// Quantity was zero or negative.
    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),

    /// The line quantity or a resulting value or total would overflow.
    #[error("quantity for {0} would overflow")]
    QuantityOverflow(String),
}

/// One product and how many units of it were sold.
#[derive(Debug, Clone, Copy)]
pub struct LineItem<'a> {
    product: &'a Product,
    quantity: u64,
    net_value: Decimal,
    gross_value: Decimal,
}

impl<'a> LineItem<'a> {
    /// `None` when a line value does not fit in a decimal.
    pub(crate) fn new(product: &'a Product, quantity: u64) -> Option<Self> {
        let units = Decimal::from(quantity);

        Some(Self {
            product,
            quantity,
            net_value: product.price().checked_mul(units)?,
            gross_value: product.price_with_tax().checked_mul(units)?,
        })
    }

    /// The product on this line.
    pub fn product(&self) -> &'a Product {
        self.product
    }

    /// Units sold.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Net unit price times quantity.
    pub fn net_value(&self) -> Decimal {
        self.net_value
    }

    /// Gross unit price times quantity.
    pub fn gross_value(&self) -> Decimal {
        self.gross_value
    }
}

/// Invoice
///
/// Borrows the products it lists. Adding a product equivalent to one
/// already present (see [`Product::is_equivalent`]) increases that line's
/// quantity instead of adding a line. Totals are kept up to date as lines
/// are added, so reading them never fails.
#[derive(Debug)]
pub struct Invoice<'a> {
    number: InvoiceNumber,
    creation_date: Date,
    line_items: Vec<LineItem<'a>>,
    net_total: Decimal,
    gross_total: Decimal,
}

impl<'a> Invoice<'a> {
    /// Issue an invoice dated today, numbered from the process-wide sequence.
    pub fn new() -> Self {
        Self::issue(&SystemClock, InvoiceSequence::global())
    }

    /// Issue an invoice dated by `clock` and numbered from `sequence`.
    pub fn issue(clock: &impl Clock, sequence: &InvoiceSequence) -> Self {
        let creation_date = clock.today();
        let number = InvoiceNumber::compose(sequence.advance(), creation_date);

        info!(%number, %creation_date, "issued invoice");

        Self {
            number,
            creation_date,
            line_items: Vec::new(),
            net_total: Decimal::ZERO,
            gross_total: Decimal::ZERO,
        }
    }

    /// Add a single unit of `product`.
    ///
    /// # Errors
    ///
    /// Returns a [`LineItemError`] if the merged quantity or a total would overflow.
    pub fn add_product(&mut self, product: &'a Product) -> Result<(), LineItemError> {
        self.add_line_item(product, 1)
    }

    /// Add `quantity` units of `product`, merging with an equivalent line if present.
    ///
    /// The invoice is left unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns a [`LineItemError`] if the quantity is not positive, or the
    /// merged quantity, a line value or an invoice total would overflow.
    pub fn add_line_item(
        &mut self,
        product: &'a Product,
        quantity: i64,
    ) -> Result<(), LineItemError> {
        let quantity = u64::try_from(quantity)
            .ok()
            .filter(|quantity| *quantity > 0)
            .ok_or(LineItemError::NonPositiveQuantity(quantity))?;

        let overflow = || LineItemError::QuantityOverflow(product.name().to_string());

        let mut line_items = self.line_items.clone();

        let (merged, line_quantity) = if let Some(line) = line_items
            .iter_mut()
            .find(|line| line.product.is_equivalent(product))
        {
            let merged_quantity = line.quantity.checked_add(quantity).ok_or_else(overflow)?;

            *line = LineItem::new(line.product, merged_quantity).ok_or_else(overflow)?;

            (true, merged_quantity)
        } else {
            line_items.push(LineItem::new(product, quantity).ok_or_else(overflow)?);

            (false, quantity)
        };

        let net_total = pricing::net_total(&line_items).ok_or_else(overflow)?;
        let gross_total = pricing::gross_total(&line_items).ok_or_else(overflow)?;

        self.line_items = line_items;
        self.net_total = net_total;
        self.gross_total = gross_total;

        debug!(
            invoice = %self.number,
            product = product.name(),
            quantity = line_quantity,
            merged,
            "added line item"
        );

        Ok(())
    }

    /// Invoice number
    pub fn number(&self) -> InvoiceNumber {
        self.number
    }

    /// Date the invoice was issued.
    pub fn creation_date(&self) -> Date {
        self.creation_date
    }

    /// Line items in the order they were first added.
    pub fn line_items(&self) -> &[LineItem<'a>] {
        &self.line_items
    }

    /// Quantity on the line holding a product equivalent to `product`.
    pub fn quantity_of(&self, product: &Product) -> Option<u64> {
        self.line_items
            .iter()
            .find(|line| line.product.is_equivalent(product))
            .map(LineItem::quantity)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.line_items.len()
    }

    /// Whether the invoice has no lines.
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Total before tax.
    pub fn net_total(&self) -> Decimal {
        self.net_total
    }

    /// VAT and excise owed.
    pub fn tax_total(&self) -> Decimal {
        // Both totals are non-negative, so the difference cannot overflow
        self.gross_total - self.net_total
    }

    /// Total including tax and excise.
    pub fn gross_total(&self) -> Decimal {
        self.gross_total
    }
}

impl Default for Invoice<'_> {
    fn default() -> Self {
        Self::new()
    }
}
