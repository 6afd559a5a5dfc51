//! Tally prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{
        Catalog, CatalogError,
        orders::{Order, OrderLine},
    },
    clock::{Clock, FixedClock, SystemClock},
    invoice::{Invoice, LineItem, LineItemError},
    numbering::{InvoiceNumber, InvoiceSequence},
    products::{
        Product, ProductError, ProductKey, ProductKind,
        excise::{DiscountDay, DiscountSchedule, Excise},
    },
    receipt::{NumberFormat, Receipt, ReceiptError},
};
