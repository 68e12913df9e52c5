//! # openclear-core
//!
//! **Pure deterministic clearing plane for openclear.**
//!
//! Takes two sorted order sequences (bids highest-first, asks lowest-first)
//! and produces the uniform clearing interval, the volume that clears inside
//! it, and the cumulative supply/demand curve a renderer draws. It has:
//!
//! - **Zero side effects**: no I/O, no shared state, inputs only borrowed
//! - **Deterministic output**: same book -> same result, same outcome root
//! - **One algorithm**: the traced and untraced clearing walks share a
//!   single loop -- there are no near-duplicate variants

pub mod book;
pub mod clearing;
pub mod cursor;
pub mod curve;
pub mod fingerprint;

pub use book::{AuctionBook, check_side};
pub use clearing::{ClearingResult, PriceRange, TraceStep, clear, clear_checked, clear_traced};
pub use cursor::SideCursor;
pub use curve::{CurvePoint, build_curve};
pub use fingerprint::{outcome_root, verify_outcome_root};
