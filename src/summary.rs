//! Cart Aggregation
//!
//! Pure function from a cart and a catalog snapshot to line items with computed subtotals and
//! a grand total. All arithmetic happens in integer minor units; lines referencing a product
//! absent from the catalog snapshot are silently skipped, not errors.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::Catalog,
    products::{Product, ProductId},
};

/// Errors raised while aggregating a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    /// A line subtotal or the grand total exceeded minor-unit arithmetic range.
    #[error("subtotal for product {id} overflows minor-unit arithmetic")]
    AmountOverflow {
        /// Product whose line triggered the overflow.
        id: ProductId,
    },
}

/// One cart entry expanded with its product's display data and computed subtotal.
#[derive(Debug, Clone)]
pub struct LineItem<'a> {
    /// The product this line refers to.
    pub product: &'a Product,

    /// Units in the cart.
    pub quantity: u32,

    unit_price: Money<'static, Currency>,
    subtotal: Money<'static, Currency>,
}

impl LineItem<'_> {
    /// Price of a single unit.
    pub fn unit_price(&self) -> Money<'static, Currency> {
        self.unit_price
    }

    /// `unit_price × quantity`, exact.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }
}

/// Aggregated view of a cart against a catalog snapshot.
#[derive(Debug, Clone)]
pub struct CartSummary<'a> {
    lines: Vec<LineItem<'a>>,
    grand_total: Money<'static, Currency>,
    item_count: u64,
    currency: &'static Currency,
}

impl<'a> CartSummary<'a> {
    /// Line items in the cart's stored order. Stale lines are absent.
    pub fn lines(&self) -> &[LineItem<'a>] {
        &self.lines
    }

    /// Sum of all line subtotals.
    pub fn grand_total(&self) -> Money<'static, Currency> {
        self.grand_total
    }

    /// Total unit count across the cart, including lines hidden as stale.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Currency all monetary values are denominated in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Check if no line items survived aggregation.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Aggregate a cart against a catalog snapshot.
///
/// Lines whose product id is missing from the snapshot are excluded from both the line list
/// and the grand total; they stay in the cart untouched. Output order follows the cart's
/// stored order.
///
/// # Errors
///
/// Returns [`SummaryError::AmountOverflow`] when a subtotal or the grand total exceeds `i64`
/// minor units.
pub fn summarize<'a>(
    cart: &Cart,
    catalog: &'a Catalog,
    currency: &'static Currency,
) -> Result<CartSummary<'a>, SummaryError> {
    let mut lines = Vec::with_capacity(cart.len());
    let mut total_minor: i64 = 0;

    for line in cart.lines() {
        let Some(product) = catalog.get(line.id) else {
            // Stale reference: hidden from the summary, kept in the cart.
            continue;
        };

        let overflow = || SummaryError::AmountOverflow { id: line.id };

        let unit_minor = i64::try_from(product.price).map_err(|_err| overflow())?;
        let subtotal_minor = unit_minor
            .checked_mul(i64::from(line.qty))
            .ok_or_else(overflow)?;
        total_minor = total_minor.checked_add(subtotal_minor).ok_or_else(overflow)?;

        lines.push(LineItem {
            product,
            quantity: line.qty,
            unit_price: Money::from_minor(unit_minor, currency),
            subtotal: Money::from_minor(subtotal_minor, currency),
        });
    }

    Ok(CartSummary {
        lines,
        grand_total: Money::from_minor(total_minor, currency),
        item_count: cart.item_count(),
        currency,
    })
}
