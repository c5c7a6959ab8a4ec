//! Cart
//!
//! The user's selected product-quantity pairs. [`Cart`] holds the pure line collection;
//! [`CartStore`] wraps it with synchronous persistence (the whole cart is written as one JSON
//! value on every mutation) and a change-notification hook for the presentation layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    products::ProductId,
    storage::{KeyValueStore, StorageError},
};

/// Storage key the cart is persisted under.
pub const CART_KEY: &str = "cartData";

/// One cart entry, serialized exactly as `{"id": n, "qty": n}`.
///
/// Invariant: `qty >= 1`. A line whose quantity would drop to 0 or below is removed, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id the line refers to. Not required to exist in the current catalog.
    pub id: ProductId,

    /// Quantity, always at least 1.
    pub qty: u32,
}

/// Ordered collection of cart lines, at most one per product id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Build a cart from stored lines, sanitizing structural violations: duplicate ids merge
    /// by summing quantities (the first occurrence keeps its position) and non-positive
    /// quantities are dropped.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::default();

        for line in lines {
            if line.qty == 0 {
                continue;
            }

            match cart.line_mut(line.id) {
                Some(existing) => existing.qty = existing.qty.saturating_add(line.qty),
                None => cart.lines.push(line),
            }
        }

        cart
    }

    /// Add one unit of a product: increment its line if present, else append a qty-1 line.
    pub fn add(&mut self, id: ProductId) {
        match self.line_mut(id) {
            Some(line) => line.qty = line.qty.saturating_add(1),
            None => self.lines.push(CartLine { id, qty: 1 }),
        }
    }

    /// Apply a signed quantity delta to an existing line.
    ///
    /// Returns `false` (and changes nothing) when no line exists for `id`. A resulting
    /// quantity of 0 or below removes the line entirely.
    pub fn change_quantity(&mut self, id: ProductId, delta: i64) -> bool {
        let Some(position) = self.lines.iter().position(|line| line.id == id) else {
            return false;
        };

        let current = self.lines.get(position).map_or(0, |line| i64::from(line.qty));
        let updated = current.saturating_add(delta);

        if updated <= 0 {
            self.lines.remove(position);
        } else if let Some(line) = self.lines.get_mut(position) {
            line.qty = u32::try_from(updated).unwrap_or(u32::MAX);
        }

        true
    }

    /// Remove the line for a product. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        self.lines.len() != before
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in stored order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for a product.
    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total unit count across all lines, including lines whose product is no longer in the
    /// catalog.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.qty)).sum()
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }
}

/// Errors raised while writing the cart to its key-value store.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The line collection could not be serialized.
    #[error("failed to encode cart for persistence: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backing key-value store rejected the write.
    #[error("failed to write cart to the key-value store: {0}")]
    Storage(#[from] StorageError),
}

/// Errors encountered while reading the persisted cart.
///
/// Never surfaced as failures: restore is fail-soft and folds these into
/// [`CartRestore::Discarded`].
#[derive(Debug, Error)]
pub enum RestoreError {
    /// The backing key-value store could not be read.
    #[error("failed to read stored cart: {0}")]
    Storage(#[from] StorageError),

    /// The stored payload was not a valid line array.
    #[error("stored cart payload is malformed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Typed outcome of restoring the persisted cart, distinguishing "nothing was saved" from
/// "saved data was corrupt".
#[derive(Debug)]
pub enum CartRestore {
    /// A stored cart was decoded; `lines` lines survived sanitization.
    Restored {
        /// Number of lines after sanitization.
        lines: usize,
    },

    /// Nothing was stored under the cart key.
    Empty,

    /// Stored data was unreadable or malformed and has been discarded.
    Discarded(RestoreError),
}

impl CartRestore {
    /// Whether a stored cart was decoded.
    pub fn is_restored(&self) -> bool {
        matches!(self, Self::Restored { .. })
    }
}

/// Change notification hook for cart mutations.
///
/// Fired after every effective mutation, once the in-memory state is updated and the
/// persistence write has been attempted. Presentation layers refresh from the snapshot handed
/// to them here.
pub trait CartObserver: fmt::Debug {
    /// Called with the cart's new state.
    fn cart_changed(&mut self, cart: &Cart);
}

/// No-op observer for unobserved carts.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {
    fn cart_changed(&mut self, _: &Cart) {}
}

/// Cart with synchronous write-through persistence.
///
/// Every mutating operation is an atomic read-modify-write over the in-memory cart followed by
/// one whole-cart write to the key-value store. When that write fails the in-memory state is
/// kept and the error is returned, so the caller can surface a durability warning without the
/// session losing the mutation.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    key: String,
    observer: Option<Box<dyn CartObserver>>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store persisting under [`CART_KEY`]. The cart starts empty; call
    /// [`CartStore::restore`] to pick up a previous session.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_KEY)
    }

    /// Create a store persisting under a custom key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            cart: Cart::default(),
            storage,
            key: key.into(),
            observer: None,
        }
    }

    /// Install the change-notification observer.
    pub fn set_observer(&mut self, observer: Box<dyn CartObserver>) {
        self.observer = Some(observer);
    }

    /// The current cart state.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Read the persisted cart, replacing the in-memory state.
    ///
    /// Fail-soft: a missing key or an unreadable/malformed payload yields an empty cart and a
    /// typed outcome, never an error.
    pub fn restore(&mut self) -> CartRestore {
        match self.read_stored() {
            Ok(Some(lines)) => {
                self.cart = Cart::from_lines(lines);
                tracing::debug!(lines = self.cart.len(), "cart restored");
                CartRestore::Restored {
                    lines: self.cart.len(),
                }
            }
            Ok(None) => {
                self.cart = Cart::default();
                CartRestore::Empty
            }
            Err(error) => {
                tracing::warn!(%error, "discarding stored cart");
                self.cart = Cart::default();
                CartRestore::Discarded(error)
            }
        }
    }

    /// Add one unit of a product. Always persists and notifies.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] when the write-through fails; the in-memory mutation is
    /// kept.
    pub fn add_item(&mut self, id: ProductId) -> Result<(), PersistError> {
        self.cart.add(id);
        self.commit()
    }

    /// Apply a signed quantity delta; silent no-op when no line exists for `id`.
    ///
    /// A resulting quantity of 0 or below removes the line. Persists and notifies whenever the
    /// cart changed.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] when the write-through fails; the in-memory mutation is
    /// kept.
    pub fn change_quantity(&mut self, id: ProductId, delta: i64) -> Result<(), PersistError> {
        if !self.cart.change_quantity(id, delta) {
            return Ok(());
        }

        self.commit()
    }

    /// Remove a product's line if present; true no-op otherwise.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] when the write-through fails; the in-memory mutation is
    /// kept.
    pub fn remove_item(&mut self, id: ProductId) -> Result<(), PersistError> {
        if !self.cart.remove(id) {
            return Ok(());
        }

        self.commit()
    }

    /// Empty the cart. Always persists and notifies.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] when the write-through fails; the in-memory mutation is
    /// kept.
    pub fn clear(&mut self) -> Result<(), PersistError> {
        self.cart.clear();
        self.commit()
    }

    fn commit(&mut self) -> Result<(), PersistError> {
        let result = self.persist();

        if let Err(error) = &result {
            tracing::error!(%error, "cart persistence failed; in-memory state retained");
        }

        if let Some(observer) = self.observer.as_mut() {
            observer.cart_changed(&self.cart);
        }

        result
    }

    fn persist(&mut self) -> Result<(), PersistError> {
        let payload = serde_json::to_string(self.cart.lines())?;
        self.storage.set(&self.key, &payload)?;
        Ok(())
    }

    fn read_stored(&self) -> Result<Option<Vec<CartLine>>, RestoreError> {
        let Some(payload) = self.storage.get(&self.key)? else {
            return Ok(None);
        };

        Ok(Some(serde_json::from_str(&payload)?))
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io, rc::Rc};

    use testresult::TestResult;

    use crate::storage::MemoryStore;

    use super::*;

    fn line(id: u64, qty: u32) -> CartLine {
        CartLine {
            id: ProductId(id),
            qty,
        }
    }

    #[test]
    fn add_creates_a_single_line_with_quantity_one() {
        let mut cart = Cart::default();

        cart.add(ProductId(1));

        assert_eq!(cart.lines(), [line(1, 1)]);
    }

    #[test]
    fn add_twice_merges_into_one_line_with_quantity_two() {
        let mut cart = Cart::default();

        cart.add(ProductId(1));
        cart.add(ProductId(1));

        assert_eq!(cart.lines(), [line(1, 2)]);
    }

    #[test]
    fn change_quantity_to_zero_removes_the_line() {
        let mut cart = Cart::from_lines([line(1, 2), line(2, 1)]);

        assert!(cart.change_quantity(ProductId(1), -2));

        assert_eq!(cart.lines(), [line(2, 1)]);
    }

    #[test]
    fn change_quantity_below_zero_removes_the_line() {
        let mut cart = Cart::from_lines([line(2, 1)]);

        assert!(cart.change_quantity(ProductId(2), -1));
        // Second decrement targets a line that no longer exists.
        assert!(!cart.change_quantity(ProductId(2), -1));

        assert!(cart.is_empty());
    }

    #[test]
    fn change_quantity_is_a_no_op_for_unknown_ids() {
        let mut cart = Cart::from_lines([line(1, 2)]);

        assert!(!cart.change_quantity(ProductId(9), 1));

        assert_eq!(cart.lines(), [line(1, 2)]);
    }

    #[test]
    fn remove_reports_whether_a_line_existed() {
        let mut cart = Cart::from_lines([line(1, 2)]);

        assert!(cart.remove(ProductId(1)));
        assert!(!cart.remove(ProductId(1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn from_lines_merges_duplicates_and_drops_zero_quantities() {
        let cart = Cart::from_lines([line(1, 2), line(2, 0), line(1, 3), line(3, 1)]);

        assert_eq!(cart.lines(), [line(1, 5), line(3, 1)]);
    }

    #[test]
    fn item_count_sums_quantities_across_all_lines() {
        let cart = Cart::from_lines([line(1, 2), line(2, 1)]);

        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn store_persists_on_every_mutation() -> TestResult {
        let mut store = CartStore::new(MemoryStore::new());

        store.add_item(ProductId(1))?;
        store.add_item(ProductId(1))?;
        store.add_item(ProductId(2))?;

        let payload = store.storage.get(CART_KEY)?;

        assert_eq!(payload.as_deref(), Some(r#"[{"id":1,"qty":2},{"id":2,"qty":1}]"#));

        Ok(())
    }

    #[test]
    fn store_restore_round_trips_lines_in_order() -> TestResult {
        let mut first = CartStore::new(MemoryStore::new());
        first.add_item(ProductId(3))?;
        first.add_item(ProductId(1))?;
        first.change_quantity(ProductId(3), 4)?;

        let mut second = CartStore::new(first.storage.clone());
        let restore = second.restore();

        assert!(restore.is_restored());
        assert_eq!(second.cart().lines(), first.cart().lines());

        Ok(())
    }

    #[test]
    fn restore_distinguishes_absent_from_corrupt_state() -> TestResult {
        let mut store = CartStore::new(MemoryStore::new());

        assert!(matches!(store.restore(), CartRestore::Empty));

        store.storage.set(CART_KEY, "not json at all")?;

        assert!(matches!(
            store.restore(),
            CartRestore::Discarded(RestoreError::Decode(_))
        ));
        assert!(store.cart().is_empty());

        Ok(())
    }

    #[test]
    fn change_quantity_skips_persistence_for_unknown_ids() -> TestResult {
        let mut store = CartStore::new(MemoryStore::new());

        store.change_quantity(ProductId(9), 1)?;

        assert!(store.storage.get(CART_KEY)?.is_none());

        Ok(())
    }

    #[test]
    fn clear_persists_an_empty_line_array() -> TestResult {
        let mut store = CartStore::new(MemoryStore::new());

        store.add_item(ProductId(1))?;
        store.clear()?;

        assert_eq!(store.storage.get(CART_KEY)?.as_deref(), Some("[]"));
        assert!(store.cart().is_empty());

        Ok(())
    }

    #[derive(Debug)]
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(io::Error::other("disk full")))
        }
    }

    #[test]
    fn failed_write_keeps_the_in_memory_mutation() {
        let mut store = CartStore::new(FailingStore);

        let result = store.add_item(ProductId(1));

        assert!(matches!(result, Err(PersistError::Storage(_))));
        assert_eq!(store.cart().lines(), [line(1, 1)]);
    }

    #[derive(Debug, Default)]
    struct RecordingObserver {
        item_counts: Rc<RefCell<Vec<u64>>>,
    }

    impl CartObserver for RecordingObserver {
        fn cart_changed(&mut self, cart: &Cart) {
            self.item_counts.borrow_mut().push(cart.item_count());
        }
    }

    #[test]
    fn observer_fires_after_every_effective_mutation() -> TestResult {
        let item_counts = Rc::new(RefCell::new(Vec::new()));

        let mut store = CartStore::new(MemoryStore::new());
        store.set_observer(Box::new(RecordingObserver {
            item_counts: Rc::clone(&item_counts),
        }));

        store.add_item(ProductId(1))?;
        store.add_item(ProductId(1))?;
        store.change_quantity(ProductId(9), 1)?; // no line: no notification
        store.remove_item(ProductId(1))?;

        assert_eq!(*item_counts.borrow(), [1, 2, 0]);

        Ok(())
    }

    #[test]
    fn cart_lines_serialize_in_the_wire_shape() -> TestResult {
        let payload = serde_json::to_string(&[line(1, 2)])?;

        assert_eq!(payload, r#"[{"id":1,"qty":2}]"#);

        Ok(())
    }
}
