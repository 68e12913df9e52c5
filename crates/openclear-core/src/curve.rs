//! Cumulative supply/demand curve samples for rendering.
//!
//! The builder samples both cumulative step functions at every distinct
//! order price and annotates what a renderer needs: which prices carry real
//! orders and which lie inside the clearing plateau.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use openclear_types::Order;

use crate::clearing::ClearingResult;

/// One sample of the cumulative demand and supply curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// The sampled price: a distinct price from either side of the book.
    pub price: Decimal,
    /// Cumulative quantity of all bids priced at or above `price`.
    /// Monotone non-increasing as `price` rises.
    pub bid_volume: Decimal,
    /// Cumulative quantity of all asks priced at or below `price`.
    /// Monotone non-decreasing as `price` rises.
    pub ask_volume: Decimal,
    /// True iff some bid is priced exactly at `price`.
    pub real_bid: bool,
    /// True iff some ask is priced exactly at `price`.
    pub real_ask: bool,
    /// The clearing volume, present only for prices inside the clearing
    /// interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plateau_volume: Option<Decimal>,
}

/// Build the curve samples for one cleared auction, ascending by price.
///
/// `bids` must be sorted non-increasing and `asks` non-decreasing by price,
/// exactly as for [`clear`](crate::clearing::clear). Duplicate prices across
/// orders collapse to one point. Empty books produce an empty curve --
/// "nothing to plot", not an error.
///
/// Runs in O(n + m + k) for k distinct prices: one pointer walk per side
/// over the sorted price axis, no per-point rescans.
#[must_use]
pub fn build_curve(bids: &[Order], asks: &[Order], result: &ClearingResult) -> Vec<CurvePoint> {
    let bid_prices: BTreeSet<Decimal> = bids.iter().map(|o| o.price).collect();
    let ask_prices: BTreeSet<Decimal> = asks.iter().map(|o| o.price).collect();
    let prices: Vec<Decimal> = bid_prices.union(&ask_prices).copied().collect();

    // Demand accumulates from the high end: walk the price axis downward
    // alongside the highest-first bid sequence, then flip.
    let mut bid_volumes = Vec::with_capacity(prices.len());
    let mut bid_at = 0;
    let mut cum_bid = Decimal::ZERO;
    for &price in prices.iter().rev() {
        while bid_at < bids.len() && bids[bid_at].price >= price {
            cum_bid += bids[bid_at].quantity;
            bid_at += 1;
        }
        bid_volumes.push(cum_bid);
    }
    bid_volumes.reverse();

    // Supply accumulates upward, in step with the lowest-first ask sequence.
    let mut points = Vec::with_capacity(prices.len());
    let mut ask_at = 0;
    let mut cum_ask = Decimal::ZERO;
    for (i, &price) in prices.iter().enumerate() {
        while ask_at < asks.len() && asks[ask_at].price <= price {
            cum_ask += asks[ask_at].quantity;
            ask_at += 1;
        }
        points.push(CurvePoint {
            price,
            bid_volume: bid_volumes[i],
            ask_volume: cum_ask,
            real_bid: bid_prices.contains(&price),
            real_ask: ask_prices.contains(&price),
            plateau_volume: result
                .price_range
                .contains(price)
                .then_some(result.clearing_volume),
        });
    }

    points
}
