//! Uniform clearing price computation for a two-sided call auction.
//!
//! Given bids sorted highest-first and asks sorted lowest-first, the engine
//! walks both sequences once with a cursor per side, always pulling more
//! volume from whichever side is behind. That balancing walk finds the
//! crossing point of the two cumulative step functions without ever
//! materializing them.
//!
//! The computation is deterministic: same inputs -> same result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use openclear_types::{Order, OrderSide, Result};

use crate::book::check_side;
use crate::cursor::SideCursor;

/// The price interval over which the clearing volume applies.
///
/// When the last matched bid/ask pair differ in price, any uniform price in
/// `[low, high]` clears the batch (the double-auction indeterminacy band).
/// The interval collapses to a single price when `low == high`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lowest valid uniform clearing price (the crossing ask's price).
    pub low: Decimal,
    /// Highest valid uniform clearing price (the crossing bid's price).
    pub high: Decimal,
}

impl PriceRange {
    #[must_use]
    pub fn new(low: Decimal, high: Decimal) -> Self {
        Self { low, high }
    }

    /// True iff `price` lies inside the interval (inclusive on both ends).
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        self.low <= price && price <= self.high
    }

    /// True iff the interval has collapsed to a single price.
    #[must_use]
    pub fn is_pinpoint(&self) -> bool {
        self.low == self.high
    }

    /// Derived single-price convenience: the low end of the interval.
    ///
    /// The interval is the canonical contract; callers that need one number
    /// (a label, a marker line) take this accessor.
    #[must_use]
    pub fn clearing_price(&self) -> Decimal {
        self.low
    }
}

/// Result of clearing one auction batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearingResult {
    /// Valid uniform clearing prices, or `(0, 0)` when nothing crosses.
    pub price_range: PriceRange,
    /// Volume matched at any price inside `price_range`. Never exceeds the
    /// total quantity of either side.
    pub clearing_volume: Decimal,
}

/// One iteration of the clearing walk, as recorded by [`clear_traced`].
///
/// Indices and cumulative volumes are captured after the quantity
/// accumulation of that iteration; the `*_advanced` flags are the advance
/// decisions taken at its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    /// Bid under the cursor this iteration.
    pub bid_index: usize,
    /// Ask under the cursor this iteration.
    pub ask_index: usize,
    /// Cumulative bid volume counted so far.
    pub cum_bid: Decimal,
    /// Cumulative ask volume counted so far.
    pub cum_ask: Decimal,
    /// Candidate interval low end (the examined ask's price).
    pub low: Decimal,
    /// Candidate interval high end (the examined bid's price).
    pub high: Decimal,
    /// Whether the bid cursor advanced at the end of this iteration.
    pub bid_advanced: bool,
    /// Whether the ask cursor advanced at the end of this iteration.
    pub ask_advanced: bool,
}

/// Compute the uniform clearing interval and volume for one auction batch.
///
/// # Preconditions
///
/// `bids` sorted non-increasing by price, `asks` non-decreasing, all
/// quantities strictly positive. The fast path does not validate; an
/// out-of-contract sequence yields an unspecified (but non-panicking)
/// result. Use [`clear_checked`] to fail fast instead.
///
/// # Algorithm
///
/// Single forward pass, one cursor per side, O(n + m):
///
/// 1. Stop when either side is exhausted or the current bid prices below
///    the current ask (the sole termination conditions).
/// 2. Each crossing pair updates the candidate interval to
///    `[ask.price, bid.price]`.
/// 3. An order's quantity is counted exactly once, the first time its
///    cursor lands on it.
/// 4. A cursor advances iff its side's cumulative volume does not exceed
///    the other's; ties advance both. Neither advancing is impossible.
///
/// The clearing volume is `min(cum_bid, cum_ask)` at loop exit.
#[must_use]
pub fn clear(bids: &[Order], asks: &[Order]) -> ClearingResult {
    clear_loop(bids, asks, |_| {})
}

/// Same walk as [`clear`], recording one [`TraceStep`] per iteration.
#[must_use]
pub fn clear_traced(bids: &[Order], asks: &[Order]) -> (ClearingResult, Vec<TraceStep>) {
    let mut steps = Vec::new();
    let result = clear_loop(bids, asks, |step| steps.push(step));
    (result, steps)
}

/// Validating wrapper around [`clear`].
///
/// Checks both sequences against the sort/positivity contract and fails
/// fast with `OC_ERR_100` instead of producing an unspecified result.
pub fn clear_checked(bids: &[Order], asks: &[Order]) -> Result<ClearingResult> {
    check_side(OrderSide::Bid, bids)?;
    check_side(OrderSide::Ask, asks)?;
    Ok(clear(bids, asks))
}

/// The single shared clearing loop. `on_step` observes each iteration.
fn clear_loop(
    bids: &[Order],
    asks: &[Order],
    mut on_step: impl FnMut(TraceStep),
) -> ClearingResult {
    let mut range = PriceRange::default();
    let mut cum_bid = Decimal::ZERO;
    let mut cum_ask = Decimal::ZERO;
    let mut bid_cursor = SideCursor::new();
    let mut ask_cursor = SideCursor::new();
    let mut iterations: usize = 0;

    while bid_cursor.index < bids.len() && ask_cursor.index < asks.len() {
        let bid = bids[bid_cursor.index];
        let ask = asks[ask_cursor.index];

        // The best remaining bid no longer reaches the best remaining ask:
        // nothing further can cross.
        if bid.price < ask.price {
            break;
        }

        range = PriceRange::new(ask.price, bid.price);

        if bid_cursor.just_advanced {
            cum_bid += bid.quantity;
        }
        if ask_cursor.just_advanced {
            cum_ask += ask.quantity;
        }

        // Pull more volume from whichever side is behind; both move on a tie.
        let step_bid = cum_bid <= cum_ask;
        let step_ask = cum_ask <= cum_bid;

        on_step(TraceStep {
            bid_index: bid_cursor.index,
            ask_index: ask_cursor.index,
            cum_bid,
            cum_ask,
            low: range.low,
            high: range.high,
            bid_advanced: step_bid,
            ask_advanced: step_ask,
        });

        bid_cursor.advance(step_bid);
        ask_cursor.advance(step_ask);
        iterations += 1;
    }

    let result = ClearingResult {
        price_range: range,
        clearing_volume: cum_bid.min(cum_ask),
    };

    tracing::debug!(
        bids = bids.len(),
        asks = asks.len(),
        iterations,
        low = %result.price_range.low,
        high = %result.price_range.high,
        volume = %result.clearing_volume,
        "Auction cleared"
    );

    result
}
