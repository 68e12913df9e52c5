//! Caller-side container for the two sorted order sequences.
//!
//! The clearing engine borrows slices and trusts their ordering. For callers
//! that assemble a book incrementally, [`AuctionBook`] keeps bids
//! non-increasing and asks non-decreasing under insertion, FIFO among equal
//! prices, and hosts the defensive validation of the clearing precondition.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use openclear_types::{OpenclearError, Order, OrderSide, Result};

use crate::clearing::{self, ClearingResult};
use crate::curve::{self, CurvePoint};

/// Validate one side's sequence against the clearing precondition:
/// quantities strictly positive, prices ordered (bids non-increasing,
/// asks non-decreasing).
pub fn check_side(side: OrderSide, orders: &[Order]) -> Result<()> {
    for (i, order) in orders.iter().enumerate() {
        if order.quantity <= Decimal::ZERO {
            return Err(OpenclearError::InvalidOrderSequence {
                side,
                reason: format!("non-positive quantity {} at index {i}", order.quantity),
            });
        }
    }
    for (i, pair) in orders.windows(2).enumerate() {
        let out_of_order = match side {
            OrderSide::Bid => pair[0].price < pair[1].price,
            OrderSide::Ask => pair[0].price > pair[1].price,
        };
        if out_of_order {
            return Err(OpenclearError::InvalidOrderSequence {
                side,
                reason: format!(
                    "price {} at index {} breaks {side} ordering",
                    pair[1].price,
                    i + 1
                ),
            });
        }
    }
    Ok(())
}

/// A two-sided auction book with sort invariants maintained on insert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuctionBook {
    /// Buy side: highest price first.
    bids: Vec<Order>,
    /// Sell side: lowest price first.
    asks: Vec<Order>,
}

impl AuctionBook {
    /// Create a new empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =================================================================
    // Insertion / removal
    // =================================================================

    /// Insert an order keeping its side sorted. Orders at an existing price
    /// go behind the ones already there (arrival order).
    pub fn insert(&mut self, side: OrderSide, order: Order) {
        match side {
            OrderSide::Bid => {
                let at = self.bids.partition_point(|o| o.price >= order.price);
                self.bids.insert(at, order);
            }
            OrderSide::Ask => {
                let at = self.asks.partition_point(|o| o.price <= order.price);
                self.asks.insert(at, order);
            }
        }
    }

    /// Remove the order at `index` within its side. Returns the removed
    /// order, or `None` if the index is out of range.
    pub fn remove(&mut self, side: OrderSide, index: usize) -> Option<Order> {
        let orders = match side {
            OrderSide::Bid => &mut self.bids,
            OrderSide::Ask => &mut self.asks,
        };
        if index < orders.len() {
            Some(orders.remove(index))
        } else {
            None
        }
    }

    /// Drop all orders on both sides.
    pub fn reset(&mut self) {
        self.bids.clear();
        self.asks.clear();
    }

    // =================================================================
    // Queries
    // =================================================================

    /// The bid sequence, highest price first.
    #[must_use]
    pub fn bids(&self) -> &[Order] {
        &self.bids
    }

    /// The ask sequence, lowest price first.
    #[must_use]
    pub fn asks(&self) -> &[Order] {
        &self.asks
    }

    /// Best (highest) bid price, or `None` if no bids.
    #[must_use]
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|o| o.price)
    }

    /// Best (lowest) ask price, or `None` if no asks.
    #[must_use]
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|o| o.price)
    }

    /// Total number of orders on both sides.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    /// Returns `true` if the book has no orders on either side.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Sum of all bid quantities.
    #[must_use]
    pub fn total_bid_quantity(&self) -> Decimal {
        self.bids.iter().map(|o| o.quantity).sum()
    }

    /// Sum of all ask quantities.
    #[must_use]
    pub fn total_ask_quantity(&self) -> Decimal {
        self.asks.iter().map(|o| o.quantity).sum()
    }

    // =================================================================
    // Clearing
    // =================================================================

    /// Validate both sides against the clearing precondition.
    pub fn validate(&self) -> Result<()> {
        check_side(OrderSide::Bid, &self.bids)?;
        check_side(OrderSide::Ask, &self.asks)
    }

    /// Clear the book as a single batch.
    #[must_use]
    pub fn clear(&self) -> ClearingResult {
        clearing::clear(&self.bids, &self.asks)
    }

    /// Curve samples for the given clearing result.
    #[must_use]
    pub fn curve(&self, result: &ClearingResult) -> Vec<CurvePoint> {
        curve::build_curve(&self.bids, &self.asks, result)
    }
}

#[cfg(test)]
mod tests {
    use crate::clearing::PriceRange;

    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    fn ord(price: i64, qty: i64) -> Order {
        Order::new(dec(price), dec(qty))
    }

    #[test]
    fn insert_keeps_bids_highest_first() {
        let mut book = AuctionBook::new();
        book.insert(OrderSide::Bid, ord(90, 1));
        book.insert(OrderSide::Bid, ord(100, 1));
        book.insert(OrderSide::Bid, ord(95, 1));

        let prices: Vec<Decimal> = book.bids().iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![dec(100), dec(95), dec(90)]);
        assert_eq!(book.best_bid(), Some(dec(100)));
    }

    #[test]
    fn insert_keeps_asks_lowest_first() {
        let mut book = AuctionBook::new();
        book.insert(OrderSide::Ask, ord(110, 1));
        book.insert(OrderSide::Ask, ord(101, 1));
        book.insert(OrderSide::Ask, ord(105, 1));

        let prices: Vec<Decimal> = book.asks().iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![dec(101), dec(105), dec(110)]);
        assert_eq!(book.best_ask(), Some(dec(101)));
    }

    #[test]
    fn equal_prices_keep_arrival_order() {
        let mut book = AuctionBook::new();
        book.insert(OrderSide::Bid, ord(100, 1));
        book.insert(OrderSide::Bid, ord(100, 2));
        book.insert(OrderSide::Bid, ord(100, 3));

        let quantities: Vec<Decimal> = book.bids().iter().map(|o| o.quantity).collect();
        assert_eq!(quantities, vec![dec(1), dec(2), dec(3)]);
    }

    #[test]
    fn remove_by_index() {
        let mut book = AuctionBook::new();
        book.insert(OrderSide::Ask, ord(101, 1));
        book.insert(OrderSide::Ask, ord(105, 2));

        let removed = book.remove(OrderSide::Ask, 0).unwrap();
        assert_eq!(removed.price, dec(101));
        assert_eq!(book.order_count(), 1);

        assert!(book.remove(OrderSide::Ask, 5).is_none());
    }

    #[test]
    fn reset_empties_both_sides() {
        let mut book = AuctionBook::new();
        book.insert(OrderSide::Bid, ord(100, 1));
        book.insert(OrderSide::Ask, ord(101, 1));
        assert!(!book.is_empty());

        book.reset();
        assert!(book.is_empty());
        assert_eq!(book.order_count(), 0);
    }

    #[test]
    fn quantity_totals() {
        let mut book = AuctionBook::new();
        book.insert(OrderSide::Bid, ord(100, 5));
        book.insert(OrderSide::Bid, ord(95, 3));
        book.insert(OrderSide::Ask, ord(101, 7));

        assert_eq!(book.total_bid_quantity(), dec(8));
        assert_eq!(book.total_ask_quantity(), dec(7));
    }

    #[test]
    fn maintained_book_always_validates() {
        let mut book = AuctionBook::new();
        for (price, qty) in [(100, 5), (90, 3), (110, 2)] {
            book.insert(OrderSide::Bid, ord(price, qty));
        }
        for (price, qty) in [(105, 4), (95, 6)] {
            book.insert(OrderSide::Ask, ord(price, qty));
        }
        assert!(book.validate().is_ok());
    }

    #[test]
    fn check_side_rejects_out_of_order_prices() {
        let asks = [ord(105, 1), ord(101, 1)];
        let err = check_side(OrderSide::Ask, &asks).unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("OC_ERR_100"), "Got: {msg}");
        assert!(msg.contains("ASK"));
    }

    #[test]
    fn check_side_rejects_non_positive_quantity() {
        let bids = [ord(100, 0)];
        assert!(check_side(OrderSide::Bid, &bids).is_err());

        let bids = [Order::new(dec(100), dec(-1))];
        assert!(check_side(OrderSide::Bid, &bids).is_err());
    }

    #[test]
    fn check_side_accepts_empty_and_flat_sequences() {
        assert!(check_side(OrderSide::Bid, &[]).is_ok());
        assert!(check_side(OrderSide::Ask, &[ord(100, 1), ord(100, 2)]).is_ok());
    }

    #[test]
    fn clear_and_curve_through_the_book() {
        let mut book = AuctionBook::new();
        book.insert(OrderSide::Bid, ord(190, 3));
        book.insert(OrderSide::Bid, ord(200, 5));
        book.insert(OrderSide::Ask, ord(195, 6));
        book.insert(OrderSide::Ask, ord(180, 4));

        let result = book.clear();
        assert_eq!(result.price_range, PriceRange::new(dec(195), dec(200)));
        assert_eq!(result.clearing_volume, dec(5));

        let curve = book.curve(&result);
        assert_eq!(curve.len(), 4);
        assert_eq!(curve[0].price, dec(180));
        assert_eq!(curve[3].price, dec(200));
    }
}
