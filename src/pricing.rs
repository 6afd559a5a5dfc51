//! Pricing
//!
//! Exact decimal totals over invoice line items. Each total is `None` when
//! the sum does not fit in a decimal.

use rust_decimal::Decimal;

use crate::invoice::LineItem;

/// Sum of net unit price times quantity.
pub fn net_total(line_items: &[LineItem<'_>]) -> Option<Decimal> {
    line_items
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.net_value()))
}

/// Sum of gross unit price times quantity.
pub fn gross_total(line_items: &[LineItem<'_>]) -> Option<Decimal> {
    line_items
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.gross_value()))
}

/// VAT and excise, taken as the difference between gross and net totals.
pub fn tax_total(line_items: &[LineItem<'_>]) -> Option<Decimal> {
    gross_total(line_items)?.checked_sub(net_total(line_items)?)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    fn line<'a>(product: &'a Product, quantity: u64) -> Result<LineItem<'a>, String> {
        LineItem::new(product, quantity).ok_or_else(|| format!("{} overflowed", product.name()))
    }

    #[test]
    fn empty_totals_are_zero() {
        let lines: [LineItem<'static>; 0] = [];

        assert_eq!(net_total(&lines), Some(Decimal::ZERO));
        assert_eq!(gross_total(&lines), Some(Decimal::ZERO));
        assert_eq!(tax_total(&lines), Some(Decimal::ZERO));
    }

    #[test]
    fn totals_multiply_by_quantity() -> TestResult {
        let onions = Product::tax_free("Warzywa", Decimal::new(10, 0))?;
        let kefir = Product::dairy("Kefir", Decimal::new(100, 0))?;
        let lines = [line(&onions, 100)?, line(&kefir, 1)?];

        assert_eq!(net_total(&lines), Some(Decimal::new(1100, 0)));
        assert_eq!(gross_total(&lines), Some(Decimal::new(1108, 0)));
        assert_eq!(tax_total(&lines), Some(Decimal::new(8, 0)));

        Ok(())
    }

    #[test]
    fn many_small_amounts_do_not_drift() -> TestResult {
        let pin = Product::standard("Pinezka", Decimal::new(1, 2))?;
        let lines = [line(&pin, 1000)?];

        assert_eq!(net_total(&lines), Some(Decimal::new(10, 0)));
        assert_eq!(gross_total(&lines), Some(Decimal::new(1230, 2)));

        Ok(())
    }

    #[test]
    fn line_value_past_decimal_range_is_none() -> TestResult {
        let costly = Product::tax_free("Drogie", Decimal::MAX)?;

        assert!(LineItem::new(&costly, 2).is_none(), "line value overflowed silently");

        Ok(())
    }

    #[test]
    fn total_past_decimal_range_is_none() -> TestResult {
        let costly = Product::tax_free("Drogie", Decimal::MAX)?;
        let lines = [line(&costly, 1)?, line(&costly, 1)?];

        assert_eq!(net_total(&lines), None);
        assert_eq!(gross_total(&lines), None);
        assert_eq!(tax_total(&lines), None);

        Ok(())
    }
}
