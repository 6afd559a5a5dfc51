//! Command line arguments

use std::path::PathBuf;

use clap::Parser;
use jiff::civil::Date;

use crate::{
    clock::{Clock, FixedClock, SystemClock},
    receipt::NumberFormat,
};

/// Arguments for the invoice demo
#[derive(Debug, Parser)]
pub struct InvoiceArgs {
    /// Product catalog to load
    #[clap(short, long, default_value = "fixtures/catalogs/grocery.yml")]
    pub catalog: PathBuf,

    /// Order to invoice
    #[clap(short, long, default_value = "fixtures/orders/mixed.yml")]
    pub order: PathBuf,

    /// Issue date (YYYY-MM-DD); today when omitted
    #[clap(short, long)]
    pub date: Option<Date>,

    /// Decimal separator used on the receipt
    #[clap(short, long, default_value_t = ',')]
    pub separator: char,
}

impl InvoiceArgs {
    /// Clock pinned to `--date`, or the system clock.
    pub fn clock(&self) -> ArgsClock {
        match self.date {
            Some(date) => ArgsClock::Fixed(FixedClock::new(date)),
            None => ArgsClock::System(SystemClock),
        }
    }

    /// Receipt number format for `--separator`.
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::new(self.separator)
    }
}

/// Clock chosen from the command line
#[derive(Debug, Clone, Copy)]
pub enum ArgsClock {
    /// Today's date
    System(SystemClock),

    /// Date given with `--date`
    Fixed(FixedClock),
}

impl Clock for ArgsClock {
    fn today(&self) -> Date {
        match self {
            ArgsClock::System(clock) => clock.today(),
            ArgsClock::Fixed(clock) => clock.today(),
        }
    }
}
