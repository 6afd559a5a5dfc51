//! Receipt

use std::io;

use rusty_money::iso::{self, Currency};
use tabled::settings::{Alignment, Style, object::Columns};
use thiserror::Error;

use crate::invoice::{Invoice, LineItem};

pub mod format;

pub use format::NumberFormat;

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Writing to the output failed.
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Printable view of an invoice.
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'i, 'a> {
    invoice: &'i Invoice<'a>,
    currency: &'static Currency,
    format: NumberFormat,
}

impl<'i, 'a> Receipt<'i, 'a> {
    /// Receipt for `invoice`, priced in złoty with comma decimals.
    pub fn new(invoice: &'i Invoice<'a>) -> Self {
        Self {
            invoice,
            currency: iso::PLN,
            format: NumberFormat::default(),
        }
    }

    /// Label amounts with `currency`.
    #[must_use]
    pub fn with_currency(mut self, currency: &'static Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Render numbers with `format`.
    #[must_use]
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Currency used for labels.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Write the receipt: header, one row per line sorted by product name, then totals.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        writeln!(
            out,
            "Invoice {}, issued {}",
            self.invoice.number(),
            self.invoice.creation_date()
        )?;

        writeln!(out, "\n{}", self.table())?;

        writeln!(out, "Lines: {}", self.invoice.len())?;

        self.write_summary(&mut out)?;

        Ok(())
    }

    fn table(&self) -> tabled::Table {
        let code = self.currency.iso_alpha_code;
        let mut builder = tabled::builder::Builder::default();

        builder.push_record([
            "Item".to_string(),
            "Kind".to_string(),
            format!("Net unit [{code}]"),
            "VAT".to_string(),
            format!("Excise [{code}]"),
            format!("Gross unit [{code}]"),
            "Qty".to_string(),
            format!("Gross value [{code}]"),
        ]);

        for line in sorted_by_name(self.invoice.line_items()) {
            let product = line.product();

            let excise = product
                .excise()
                .map(|excise| self.format.amount(excise.surcharge()))
                .unwrap_or_default();

            builder.push_record([
                product.name().to_string(),
                product.kind().label().to_string(),
                self.format.amount(product.price()),
                format!("{}%", self.format.percent(product.tax_rate())),
                excise,
                self.format.amount(product.price_with_tax()),
                line.quantity().to_string(),
                self.format.amount(line.gross_value()),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..), Alignment::right());

        table
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let code = self.currency.iso_alpha_code;

        let rows = [
            (format!("Net total [{code}]:"), self.invoice.net_total()),
            (format!("VAT + excise [{code}]:"), self.invoice.tax_total()),
            (format!("Gross total [{code}]:"), self.invoice.gross_total()),
        ]
        .map(|(label, value)| (label, self.format.amount(value)));

        let label_width = rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or_default();

        let value_width = rows
            .iter()
            .map(|(_, value)| value.chars().count())
            .max()
            .unwrap_or_default();

        for (label, value) in rows {
            writeln!(out, "{label:>label_width$}  {value:>value_width$}")?;
        }

        Ok(())
    }
}

/// Line items ordered by product name; equal names keep insertion order.
fn sorted_by_name<'l, 'a>(line_items: &'l [LineItem<'a>]) -> Vec<&'l LineItem<'a>> {
    let mut sorted: Vec<_> = line_items.iter().collect();

    sorted.sort_by(|a, b| a.product().name().cmp(b.product().name()));

    sorted
}
