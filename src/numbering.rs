//! Invoice numbering

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use jiff::civil::Date;

/// Room reserved below the sequence value for a `YYYYMMDD` date.
const DATE_SPAN: u64 = 100_000_000;

/// Largest `YYYYMMDD` code, for 9999-12-31.
const MAX_DATE_CODE: u64 = 99_991_231;

/// Largest sequence value with a distinct [`InvoiceNumber`] for every date.
///
/// Larger sequence values saturate at `u64::MAX`, so numbers stop increasing.
pub const MAX_SEQUENCE: u64 = (u64::MAX - MAX_DATE_CODE) / DATE_SPAN;

/// Sequence shared by every invoice issued through [`InvoiceSequence::global`].
static GLOBAL: InvoiceSequence = InvoiceSequence::new();

/// Monotonic counter of issued invoices.
///
/// Starts at zero; every call to [`InvoiceSequence::advance`] is an atomic
/// increment, so numbers stay strictly increasing even when invoices are
/// created from several threads.
#[derive(Debug, Default)]
pub struct InvoiceSequence {
    issued: AtomicU64,
}

impl InvoiceSequence {
    /// A fresh sequence; the first call to `advance` returns 1.
    pub const fn new() -> Self {
        Self::starting_after(0)
    }

    /// A sequence that has already issued `issued` numbers.
    pub const fn starting_after(issued: u64) -> Self {
        Self {
            issued: AtomicU64::new(issued),
        }
    }

    /// The process-wide sequence.
    pub fn global() -> &'static InvoiceSequence {
        &GLOBAL
    }

    /// Advance the counter and return the new value.
    pub fn advance(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// How many numbers have been issued so far.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }
}

/// Invoice number: the sequence value followed by the issue date as `YYYYMMDD`.
///
/// Sequence 7 issued on 2024-03-05 is `720240305`. Numbers are strictly
/// increasing in the sequence value up to [`MAX_SEQUENCE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvoiceNumber(u64);

impl InvoiceNumber {
    /// Compose a number from a sequence value and an issue date.
    ///
    /// Dates outside years 0-9999 contribute zero to the date part. Past
    /// [`MAX_SEQUENCE`] the result saturates at `u64::MAX`.
    pub fn compose(sequence: u64, date: Date) -> Self {
        Self(sequence.saturating_mul(DATE_SPAN).saturating_add(date_code(date)))
    }

    /// Numeric value
    pub fn value(self) -> u64 {
        self.0
    }

    /// Sequence part of the number.
    pub fn sequence(self) -> u64 {
        self.0 / DATE_SPAN
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn date_code(date: Date) -> u64 {
    let code =
        i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day());

    u64::try_from(code).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use jiff::civil::date;

    use super::*;

    #[test]
    fn sequence_starts_at_one() {
        let sequence = InvoiceSequence::new();

        assert_eq!(sequence.advance(), 1);
        assert_eq!(sequence.advance(), 2);
        assert_eq!(sequence.issued(), 2);
    }

    #[test]
    fn sequence_can_resume() {
        let sequence = InvoiceSequence::starting_after(41);

        assert_eq!(sequence.advance(), 42);
    }

    #[test]
    fn concurrent_increments_are_unique() {
        let sequence = Arc::new(InvoiceSequence::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sequence = Arc::clone(&sequence);
                thread::spawn(move || (0..250).map(|_| sequence.advance()).collect::<Vec<_>>())
            })
            .collect();

        let mut values: Vec<u64> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap_or_default())
            .collect();

        values.sort_unstable();
        values.dedup();

        assert_eq!(values.len(), 1000);
        assert_eq!(sequence.issued(), 1000);
    }

    #[test]
    fn number_layout() {
        let number = InvoiceNumber::compose(7, date(2024, 3, 5));

        assert_eq!(number.value(), 720_240_305);
        assert_eq!(number.sequence(), 7);
        assert_eq!(number.to_string(), "720240305");
    }

    #[test]
    fn later_sequence_is_larger_whatever_the_date() {
        let earlier = InvoiceNumber::compose(9, date(2024, 12, 31));
        let later = InvoiceNumber::compose(10, date(2024, 1, 1));

        assert!(later > earlier, "{later} not after {earlier}");
    }

    #[test]
    fn numbers_saturate_past_max_sequence() {
        let last_day = date(9999, 12, 31);

        let largest = InvoiceNumber::compose(MAX_SEQUENCE, last_day);
        let saturated = InvoiceNumber::compose(MAX_SEQUENCE + 1, date(2024, 3, 5));

        assert_eq!(largest.value(), 18_446_744_073_699_991_231);
        assert_eq!(largest.sequence(), MAX_SEQUENCE);
        assert!(saturated > largest, "{saturated} not after {largest}");
        assert_eq!(saturated.value(), u64::MAX);
        assert_eq!(
            InvoiceNumber::compose(MAX_SEQUENCE + 2, date(2024, 3, 5)),
            saturated
        );
    }

    #[test]
    fn negative_years_contribute_nothing() {
        let number = InvoiceNumber::compose(3, date(-5, 1, 1));

        assert_eq!(number.value(), 300_000_000);
    }
}
