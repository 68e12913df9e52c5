//! Order model for the openclear call auction.
//!
//! An [`Order`] is the entire unit of intent: a limit price and a quantity.
//! Orders carry no identity -- row ids, timestamps, and ownership are
//! caller-side bookkeeping that never reaches the clearing computation.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of the auction an order belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderSide {
    /// Willing to buy at or below the stated price.
    Bid,
    /// Willing to sell at or above the stated price.
    Ask,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bid => write!(f, "BID"),
            Self::Ask => write!(f, "ASK"),
        }
    }
}

/// A single auction order: a price and a strictly positive quantity.
///
/// Two orders with equal fields are interchangeable for clearing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Limit price in quote units.
    pub price: Decimal,
    /// Quantity in base units. Assumed strictly positive.
    pub quantity: Decimal,
}

impl Order {
    #[must_use]
    pub fn new(price: Decimal, quantity: Decimal) -> Self {
        Self { price, quantity }
    }

    /// Quote value of the full order (price x quantity).
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.price * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_side_display() {
        assert_eq!(format!("{}", OrderSide::Bid), "BID");
        assert_eq!(format!("{}", OrderSide::Ask), "ASK");
    }

    #[test]
    fn notional_is_price_times_quantity() {
        let order = Order::new(Decimal::new(200, 0), Decimal::new(5, 0));
        assert_eq!(order.notional(), Decimal::new(1000, 0));
    }

    #[test]
    fn serializes_decimals_as_strings() {
        let order = Order::new(Decimal::new(195, 0), Decimal::new(6, 0));
        let json = serde_json::to_string(&order).unwrap();
        assert_eq!(json, r#"{"price":"195","quantity":"6"}"#);
    }

    #[test]
    fn round_trips_through_json() {
        let order = Order::new(Decimal::new(1005, 1), Decimal::new(3, 0));
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
