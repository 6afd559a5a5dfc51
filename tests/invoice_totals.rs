//! Integration test for invoice totals across every product kind.
//!
//! Basket, net unit prices in PLN:
//!
//! - Kubek, tax free: 5.00 x 2 -> 10.00 gross
//! - Kozi Serek, dairy 8%: 10.00 x 3 -> 32.40 gross
//! - Pinezka, standard 23%: 0.01 x 1000 -> 12.30 gross
//! - Wino, 23% plus 5.56 excise: 10.00 x 10 -> 178.60 gross
//! - Benzyna, 23% plus 5.56 excise: 6.00 x 15 -> 194.10 gross
//!
//! Net total is 240.00 and gross total 427.40. On a discount day the fuel
//! excise is waived, Benzyna drops to 7.38 a unit and the gross total to 344.

use jiff::civil::{Date, date};
use rust_decimal::Decimal;
use testresult::TestResult;

use tally::prelude::*;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap_or_default()
}

struct Shelf {
    mug: Product,
    cheese: Product,
    pin: Product,
    wine: Product,
    petrol: Product,
}

impl Shelf {
    fn stocked_on(day: Date) -> Result<Self, ProductError> {
        Ok(Self {
            mug: Product::tax_free("Kubek", dec("5"))?,
            cheese: Product::dairy("Kozi Serek", dec("10"))?,
            pin: Product::standard("Pinezka", dec("0.01"))?,
            wine: Product::wine("Wino", dec("10"))?,
            petrol: Product::fuel("Benzyna", dec("6"), &FixedClock::new(day))?,
        })
    }

    fn invoice(&self, clock: &impl Clock, untaxed_only: bool) -> Result<Invoice<'_>, LineItemError> {
        let mut invoice = Invoice::issue(clock, &InvoiceSequence::new());

        invoice.add_line_item(&self.mug, 2)?;
        invoice.add_line_item(&self.cheese, 3)?;
        invoice.add_line_item(&self.pin, 1000)?;

        if !untaxed_only {
            invoice.add_line_item(&self.wine, 10)?;
            invoice.add_line_item(&self.petrol, 15)?;
        }

        Ok(invoice)
    }
}

#[test]
fn totals_without_excise() -> TestResult {
    let clock = FixedClock::new(date(2024, 4, 4));
    let shelf = Shelf::stocked_on(clock.today())?;

    let invoice = shelf.invoice(&clock, true)?;

    assert_eq!(invoice.net_total(), dec("50"));
    assert_eq!(invoice.gross_total(), dec("54.70"));
    assert_eq!(invoice.tax_total(), dec("4.70"));

    Ok(())
}

#[test]
fn totals_with_excise() -> TestResult {
    let clock = FixedClock::new(date(2024, 4, 4));
    let shelf = Shelf::stocked_on(clock.today())?;

    let invoice = shelf.invoice(&clock, false)?;

    assert_eq!(invoice.len(), 5);
    assert_eq!(invoice.net_total(), dec("240"));
    assert_eq!(invoice.gross_total(), dec("427.4"));

    Ok(())
}

#[test]
fn totals_on_discount_day() -> TestResult {
    let clock = FixedClock::new(date(2024, 3, 5));
    let shelf = Shelf::stocked_on(clock.today())?;

    let invoice = shelf.invoice(&clock, false)?;

    assert_eq!(invoice.net_total(), dec("240"));
    assert_eq!(invoice.gross_total(), dec("344"));

    Ok(())
}

#[test]
fn fuel_keeps_excise_from_construction_day() -> TestResult {
    // Stocked on the discount day, invoiced the day after
    let shelf = Shelf::stocked_on(date(2024, 3, 5))?;
    let clock = FixedClock::new(date(2024, 3, 6));

    let invoice = shelf.invoice(&clock, false)?;

    assert_eq!(invoice.creation_date(), date(2024, 3, 6));
    assert_eq!(invoice.gross_total(), dec("344"));

    Ok(())
}

#[test]
fn repeated_products_merge_into_one_line() -> TestResult {
    let clock = FixedClock::new(date(2024, 4, 4));
    let wine = Product::wine("Wino", dec("10"))?;
    let same_wine = Product::wine("Wino", dec("10"))?;

    let mut invoice = Invoice::issue(&clock, &InvoiceSequence::new());

    invoice.add_line_item(&wine, 4)?;
    invoice.add_product(&same_wine)?;
    invoice.add_line_item(&wine, 5)?;

    assert_eq!(invoice.len(), 1);
    assert_eq!(invoice.quantity_of(&wine), Some(10));
    assert_eq!(invoice.gross_total(), dec("178.6"));

    Ok(())
}

#[test]
fn prices_differing_only_in_scale_stay_on_separate_lines() -> TestResult {
    let clock = FixedClock::new(date(2024, 4, 4));
    let whole = Product::wine("Wino", dec("10"))?;
    let cents = Product::wine("Wino", dec("10.00"))?;

    let mut invoice = Invoice::issue(&clock, &InvoiceSequence::new());

    invoice.add_line_item(&whole, 4)?;
    invoice.add_line_item(&cents, 6)?;

    assert_eq!(invoice.len(), 2);
    assert_eq!(invoice.quantity_of(&whole), Some(4));
    assert_eq!(invoice.quantity_of(&cents), Some(6));
    assert_eq!(invoice.gross_total(), dec("178.6"));

    Ok(())
}

#[test]
fn overflowing_lines_leave_totals_readable() -> TestResult {
    let clock = FixedClock::new(date(2024, 4, 4));
    let costly = Product::standard("Drogie", dec("10000000000"))?;
    let wine = Product::wine("Wino", dec("10"))?;

    let mut invoice = Invoice::issue(&clock, &InvoiceSequence::new());

    invoice.add_line_item(&wine, 10)?;

    let result = invoice.add_line_item(&costly, i64::MAX);

    assert!(
        matches!(result, Err(LineItemError::QuantityOverflow(name)) if name == "Drogie"),
        "overflow not reported"
    );
    assert_eq!(invoice.len(), 1);
    assert_eq!(invoice.net_total(), dec("100"));
    assert_eq!(invoice.gross_total(), dec("178.6"));
    assert_eq!(invoice.tax_total(), dec("78.6"));

    Ok(())
}

#[test]
fn invoices_from_one_sequence_are_numbered_in_order() {
    let clock = FixedClock::new(date(2024, 4, 4));
    let sequence = InvoiceSequence::new();

    let first = Invoice::issue(&clock, &sequence);
    let second = Invoice::issue(&clock, &sequence);

    assert_eq!(first.number().sequence() + 1, second.number().sequence());
    assert!(first.number().value() < second.number().value(), "numbers not increasing");
}
