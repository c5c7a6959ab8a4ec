//! Receipt
//!
//! Plain-text rendering of a [`CartSummary`] for terminal consumers. This sits outside the
//! core data flow; the demo drives it, the library never prints on its own.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::summary::CartSummary;

/// Errors raised while writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The output sink rejected a write.
    #[error("failed to write receipt")]
    Io(#[source] io::Error),
}

/// Text receipt for an aggregated cart.
#[derive(Debug)]
pub struct Receipt<'a> {
    summary: &'a CartSummary<'a>,
}

impl<'a> Receipt<'a> {
    /// Create a receipt over the given summary.
    #[must_use]
    pub fn new(summary: &'a CartSummary<'a>) -> Self {
        Self { summary }
    }

    /// Write the receipt: a line-item table followed by the item count and grand total.
    ///
    /// An empty summary renders as an explicit "cart is empty" line rather than an empty
    /// table.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the sink rejects a write.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if self.summary.is_empty() {
            writeln!(out, "Your cart is empty.").map_err(ReceiptError::Io)?;
            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["Item", "Category", "Unit Price", "Qty", "Subtotal"]);

        for line in self.summary.lines() {
            builder.push_record([
                line.product.name.clone(),
                line.product.category.clone(),
                line.unit_price().to_string(),
                line.quantity.to_string(),
                line.subtotal().to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "{table}").map_err(ReceiptError::Io)?;
        writeln!(out, " Items: {}", self.summary.item_count()).map_err(ReceiptError::Io)?;
        writeln!(out, " Total: {}", self.summary.grand_total()).map_err(ReceiptError::Io)?;

        Ok(())
    }
}
