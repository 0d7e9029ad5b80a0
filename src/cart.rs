//! Client-local cart: the lines a customer has picked before the order is placed.
//!
//! The cart is never persisted. Its total is derived from the lines on every read.

use crate::model::{items_total, MenuItem, NewOrder, OrderItem, OrderType};
use crate::order_actor::OrderError;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Outcome of [`Cart::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line is still there with this quantity.
    Updated(u32),
    /// The line reached zero and was removed; other lines remain.
    Removed,
    /// The last line was removed. Any open cart view should close.
    Emptied,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<OrderItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[OrderItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of drinks, counting quantities.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn total(&self) -> u64 {
        items_total(&self.lines)
    }

    /// Adds one of `item`.
    ///
    /// Only a line for the same item *without* a note absorbs the new unit; lines with notes
    /// are customised drinks and never grow implicitly.
    pub fn add(&mut self, item: &MenuItem) {
        match self
            .lines
            .iter_mut()
            .find(|line| line.item.id == item.id && !line.has_note())
        {
            Some(line) => line.quantity += 1,
            None => self.lines.push(OrderItem::new(item.clone(), 1, "")),
        }
        debug!(item = %item.id, lines = self.lines.len(), "Cart add");
    }

    /// Changes the quantity of line `index` by `delta`, clamping at zero.
    /// A line that reaches zero is removed.
    pub fn update_quantity(&mut self, index: usize, delta: i32) -> Result<QuantityChange, OrderError> {
        let line = self.line_mut(index)?;
        let quantity = (i64::from(line.quantity) + i64::from(delta)).max(0);
        if quantity > 0 {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            return Ok(QuantityChange::Updated(line.quantity));
        }
        self.lines.remove(index);
        Ok(if self.lines.is_empty() {
            QuantityChange::Emptied
        } else {
            QuantityChange::Removed
        })
    }

    /// Replaces the note on line `index` only. Lines are not merged afterwards, even if two
    /// now carry the same item and note.
    pub fn update_note(&mut self, index: usize, note: impl Into<String>) -> Result<(), OrderError> {
        self.line_mut(index)?.note = note.into();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Builds the order payload for these lines. The cart itself is left as it is; the
    /// caller clears it once the store has accepted the order.
    pub fn checkout(
        &self,
        customer_name: &str,
        order_type: OrderType,
        now: DateTime<Utc>,
    ) -> Result<NewOrder, OrderError> {
        if self.is_empty() {
            return Err(OrderError::validation("cart is empty"));
        }
        Ok(NewOrder::new(self.lines.clone(), customer_name, order_type, now))
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut OrderItem, OrderError> {
        self.lines
            .get_mut(index)
            .ok_or_else(|| OrderError::validation(format!("no cart line at position {index}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, WALK_IN_CUSTOMER};

    fn espresso() -> MenuItem {
        MenuItem::new(1, "Cà Phê Đen", 18_000, Category::Coffee)
    }

    fn bac_xiu() -> MenuItem {
        MenuItem::new(3, "Bạc Xỉu", 25_000, Category::Coffee)
    }

    #[test]
    fn test_same_item_without_note_merges() {
        let mut cart = Cart::new();
        cart.add(&espresso());
        cart.add(&espresso());

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total(), 36_000);
    }

    #[test]
    fn test_noted_line_stays_separate() {
        let mut cart = Cart::new();
        cart.add(&espresso());
        cart.update_note(0, "ít đường").unwrap();
        cart.add(&espresso());

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.lines()[0].note, "ít đường");
        assert_eq!(cart.lines()[1].quantity, 1);
        assert_eq!(cart.lines()[1].note, "");
    }

    #[test]
    fn test_note_edit_does_not_merge_lines() {
        let mut cart = Cart::new();
        cart.add(&espresso());
        cart.update_note(0, "ít đá").unwrap();
        cart.add(&espresso());
        cart.update_note(1, "ít đá").unwrap();

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&espresso());
        cart.add(&bac_xiu());

        assert_eq!(cart.update_quantity(1, 2).unwrap(), QuantityChange::Updated(3));
        assert_eq!(cart.update_quantity(0, -5).unwrap(), QuantityChange::Removed);
        assert_eq!(cart.lines()[0].item.id, bac_xiu().id);
        assert_eq!(cart.update_quantity(0, -3).unwrap(), QuantityChange::Emptied);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn test_bad_index_is_rejected() {
        let mut cart = Cart::new();
        assert!(matches!(cart.update_quantity(0, 1), Err(OrderError::Validation(_))));
        assert!(cart.update_note(3, "x").is_err());
    }

    #[test]
    fn test_checkout_rejects_empty_cart() {
        let cart = Cart::new();
        let err = cart.checkout("", OrderType::Takeaway, Utc::now()).unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[test]
    fn test_checkout_keeps_lines_and_defaults_name() {
        let mut cart = Cart::new();
        cart.add(&bac_xiu());
        let order = cart.checkout("", OrderType::DineIn, Utc::now()).unwrap();

        assert_eq!(order.customer_name, WALK_IN_CUSTOMER);
        assert_eq!(order.total(), 25_000);
        assert_eq!(cart.lines().len(), 1);
    }
}
