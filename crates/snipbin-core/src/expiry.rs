//! Snippet visibility over time.

use jiff::{SignedDuration, Timestamp};

use crate::error::CoreError;

/// Whether a snippet with the given expiry is visible at `now`.
///
/// No expiry means the snippet never expires. An expiry equal to `now`
/// already counts as expired.
pub fn is_live(expires_at: Option<Timestamp>, now: Timestamp) -> bool {
    expires_at.is_none_or(|at| at > now)
}

/// Compute the expiry timestamp `seconds` after `now`.
///
/// Zero and negative values are accepted and yield a timestamp that is
/// already expired.
pub fn expires_after(now: Timestamp, seconds: f64) -> Result<Timestamp, CoreError> {
    let out_of_range = || CoreError::ExpiryOutOfRange { seconds };
    let duration = SignedDuration::try_from_secs_f64(seconds).map_err(|_| out_of_range())?;
    now.checked_add(duration).map_err(|_| out_of_range())
}
