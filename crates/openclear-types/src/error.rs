//! Error types for the openclear auction library.
//!
//! All errors use the `OC_ERR_` prefix convention for easy grepping in logs.
//! The clearing core is total over well-formed input, so the taxonomy is a
//! single input-contract kind raised by the defensive validators.

use thiserror::Error;

use crate::OrderSide;

/// Central error enum for all openclear operations.
#[derive(Debug, Error)]
pub enum OpenclearError {
    /// An order sequence violated the clearing precondition: bids must be
    /// non-increasing by price, asks non-decreasing, and every quantity
    /// strictly positive.
    #[error("OC_ERR_100: Invalid {side} sequence: {reason}")]
    InvalidOrderSequence { side: OrderSide, reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpenclearError>;
