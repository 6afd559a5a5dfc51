//! Excise

use jiff::civil::Date;
use rust_decimal::Decimal;
use smallvec::{SmallVec, smallvec};

/// Excise surcharge added to the gross unit price of regulated goods.
pub const EXCISE_SURCHARGE: Decimal = Decimal::from_parts(556, 0, 0, false, 2);

/// The day each year on which the seasonal excise discount applies (5 March).
const DEFAULT_DISCOUNT_DAY: DiscountDay = DiscountDay { month: 3, day: 5 };

/// A recurring (month, day) pair, independent of year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiscountDay {
    month: i8,
    day: i8,
}

impl DiscountDay {
    /// Create a discount day, or `None` when the pair names no calendar day.
    ///
    /// 29 February is accepted; it only matches in leap years.
    pub fn new(month: i8, day: i8) -> Option<Self> {
        // 2000 is a leap year, so every real (month, day) pair validates.
        Date::new(2000, month, day)
            .ok()
            .map(|_| Self { month, day })
    }

    /// Month, 1-12.
    pub fn month(self) -> i8 {
        self.month
    }

    /// Day of month, 1-31.
    pub fn day(self) -> i8 {
        self.day
    }

    /// Whether `date` falls on this day, in any year.
    pub fn matches(self, date: Date) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}

/// Dates on which the seasonal excise surcharge is waived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountSchedule {
    days: SmallVec<[DiscountDay; 2]>,
}

impl DiscountSchedule {
    /// Build a schedule from the given days.
    pub fn from_days(days: impl IntoIterator<Item = DiscountDay>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    /// Days in the schedule.
    pub fn days(&self) -> &[DiscountDay] {
        &self.days
    }

    /// Whether any scheduled day falls on `date`.
    pub fn applies_on(&self, date: Date) -> bool {
        self.days.iter().any(|day| day.matches(date))
    }

    /// Multiplier for the excise surcharge on `date`: zero on a discount day, one otherwise.
    pub fn discount_factor(&self, date: Date) -> Decimal {
        if self.applies_on(date) {
            Decimal::ZERO
        } else {
            Decimal::ONE
        }
    }
}

impl Default for DiscountSchedule {
    fn default() -> Self {
        Self {
            days: smallvec![DEFAULT_DISCOUNT_DAY],
        }
    }
}

/// Excise surcharge carried by wine and fuel products.
///
/// A seasonal excise evaluates its schedule once, against the date the
/// product was built, and keeps the resulting factor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excise {
    base: Decimal,
    factor: Decimal,
    schedule: Option<DiscountSchedule>,
}

impl Excise {
    /// Excise charged in full regardless of date.
    pub fn fixed() -> Self {
        Self {
            base: EXCISE_SURCHARGE,
            factor: Decimal::ONE,
            schedule: None,
        }
    }

    /// Excise discounted according to `schedule`, evaluated on `built_on`.
    pub fn seasonal(schedule: DiscountSchedule, built_on: Date) -> Self {
        Self {
            base: EXCISE_SURCHARGE,
            factor: schedule.discount_factor(built_on),
            schedule: Some(schedule),
        }
    }

    /// Surcharge before any discount.
    pub fn base(&self) -> Decimal {
        self.base
    }

    /// Discount factor frozen at construction (always one for fixed excise).
    pub fn factor(&self) -> Decimal {
        self.factor
    }

    /// Effective surcharge added to the gross unit price.
    pub fn surcharge(&self) -> Decimal {
        self.base * self.factor
    }

    /// Discount schedule, for seasonal excise only.
    pub fn schedule(&self) -> Option<&DiscountSchedule> {
        self.schedule.as_ref()
    }
}
