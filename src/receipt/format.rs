//! Number formatting for receipts.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::products::Product;

/// Smallest and largest number of fractional digits printed for amounts.
const AMOUNT_DIGITS: (u32, u32) = (2, 4);

/// Fractional digits printed for tax rate percentages.
const PERCENT_DIGITS: (u32, u32) = (0, 1);

/// Locale-dependent rendering of decimal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    decimal_separator: char,
}

impl NumberFormat {
    /// Format using `decimal_separator` between whole and fractional digits.
    pub fn new(decimal_separator: char) -> Self {
        Self { decimal_separator }
    }

    /// Separator between whole and fractional digits.
    pub fn decimal_separator(self) -> char {
        self.decimal_separator
    }

    /// Render a money amount with two to four fractional digits.
    pub fn amount(self, value: Decimal) -> String {
        self.render(value, AMOUNT_DIGITS)
    }

    /// Render a fractional rate as percent points, e.g. `0.23` as `23`.
    ///
    /// Rates too large to scale saturate at [`Decimal::MAX`]; product tax
    /// rates are checked against this when the product is built.
    pub fn percent(self, rate: Decimal) -> String {
        self.render(rate.saturating_mul(Decimal::ONE_HUNDRED), PERCENT_DIGITS)
    }

    /// One-line description of a product's unit pricing.
    pub fn describe(self, product: &Product) -> String {
        let excise = product
            .excise()
            .map(|excise| format!("excise {}; ", self.amount(excise.surcharge())))
            .unwrap_or_default();

        format!(
            "{}; net {}; VAT {}%; {excise}gross {}",
            product.name(),
            self.amount(product.price()),
            self.percent(product.tax_rate()),
            self.amount(product.price_with_tax()),
        )
    }

    fn render(self, value: Decimal, (min_digits, max_digits): (u32, u32)) -> String {
        let mut value = value
            .round_dp_with_strategy(max_digits, RoundingStrategy::MidpointNearestEven)
            .normalize();

        if value.scale() < min_digits {
            value.rescale(min_digits);
        }

        let text = value.to_string();

        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new(',')
    }
}
