//! Invoice Example
//!
//! This example loads a product catalog and an order from YAML, issues an
//! invoice for the order and prints its receipt. Fuel excise is waived when
//! the issue date falls on a discount day, so try `--date 2024-03-05`.
//!
//! Run with: `cargo run --example invoice -- --date 2024-04-04`

use anyhow::Result;
use clap::Parser;
use rusty_money::iso;
use tracing_subscriber::EnvFilter;

use tally::{
    catalog::{Catalog, orders::Order},
    cli::InvoiceArgs,
    numbering::InvoiceSequence,
    receipt::Receipt,
};

/// Invoice Example
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = InvoiceArgs::parse();
    let clock = args.clock();

    let catalog = Catalog::load(&args.catalog, &clock)?;
    let order = Order::load(&args.order)?;

    let invoice = catalog.invoice(&order, &clock, InvoiceSequence::global())?;

    Receipt::new(&invoice)
        .with_currency(catalog.currency().unwrap_or(iso::PLN))
        .with_format(args.number_format())
        .write_to(std::io::stdout().lock())?;

    Ok(())
}
