//! Tally
//!
//! Tally builds sales invoices with exact decimal arithmetic: products carry
//! VAT and excise rules, invoices merge equivalent lines and total them, and
//! receipts render the result as a table.

pub mod catalog;
pub mod cli;
pub mod clock;
pub mod invoice;
pub mod numbering;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
