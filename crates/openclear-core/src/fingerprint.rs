//! Outcome fingerprinting for cross-run consistency checks.
//!
//! Clearing is pure, so two evaluations of the same book must agree exactly.
//! The outcome root is a SHA-256 digest over a clearing result and its curve
//! that reduces the comparison to a single hash equality.

use sha2::{Digest, Sha256};

use crate::clearing::ClearingResult;
use crate::curve::CurvePoint;

/// Compute the outcome root over a clearing result and its curve.
///
/// The digest covers the price range, the clearing volume, and every curve
/// point's fields in sequence order. Decimals enter the hash via their
/// canonical string form, so the root is stable across hosts and runs.
#[must_use]
pub fn outcome_root(result: &ClearingResult, curve: &[CurvePoint]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"openclear:outcome_root:v1:");
    hasher.update(result.price_range.low.to_string().as_bytes());
    hasher.update(result.price_range.high.to_string().as_bytes());
    hasher.update(result.clearing_volume.to_string().as_bytes());
    hasher.update((curve.len() as u64).to_le_bytes());

    for point in curve {
        hasher.update(point.price.to_string().as_bytes());
        hasher.update(point.bid_volume.to_string().as_bytes());
        hasher.update(point.ask_volume.to_string().as_bytes());
        hasher.update([u8::from(point.real_bid), u8::from(point.real_ask)]);
        match point.plateau_volume {
            Some(volume) => {
                hasher.update([1u8]);
                hasher.update(volume.to_string().as_bytes());
            }
            None => hasher.update([0u8]),
        }
    }

    let digest = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&digest);
    root
}

/// Verify that a given outcome root matches the expected hash.
///
/// Recomputes the root from the result and curve and compares.
#[must_use]
pub fn verify_outcome_root(
    result: &ClearingResult,
    curve: &[CurvePoint],
    expected_root: &[u8; 32],
) -> bool {
    outcome_root(result, curve) == *expected_root
}
