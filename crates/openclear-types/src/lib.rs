//! # openclear-types
//!
//! Shared types and errors for the **openclear** call-auction library.
//!
//! This crate is the leaf dependency of the workspace -- the compute crate
//! depends on it. It defines:
//!
//! - **Order model**: [`Order`], [`OrderSide`]
//! - **Errors**: [`OpenclearError`] with `OC_ERR_` prefix codes

pub mod error;
pub mod order;

// Re-export all primary types at crate root for ergonomic imports:
//   use openclear_types::{Order, OrderSide, OpenclearError};

pub use error::*;
pub use order::*;
