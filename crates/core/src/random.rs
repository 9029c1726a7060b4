//! Cryptographically secure random integers for `r` and `rn`
//!
//! The operators draw from the operating system (`OsRng`). Failures of the
//! source are returned as errors rather than panicking, so a broken entropy
//! source aborts the operation but not the session.

use crate::error::CalcError;
use rand::RngCore;

/// Exclusive upper bound for `r`
pub const DEFAULT_MAX_RAND: u64 = i16::MAX as u64;

/// Uniform integer in `[0, bound)` by rejection sampling
pub fn uniform_below<R: RngCore>(rng: &mut R, bound: u64) -> Result<u64, CalcError> {
    if bound == 0 {
        return Err(CalcError::InvalidOperand(
            "random bound must be positive".to_string(),
        ));
    }
    // Largest multiple of `bound` that fits; draws at or above it are biased
    let zone = u64::MAX - u64::MAX % bound;
    loop {
        let mut buf = [0u8; 8];
        rng.try_fill_bytes(&mut buf)?;
        let draw = u64::from_le_bytes(buf);
        if draw < zone {
            return Ok(draw % bound);
        }
    }
}
