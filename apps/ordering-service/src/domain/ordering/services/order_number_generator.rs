//! Order number generation.

use rand::Rng;

use crate::domain::ordering::value_objects::OrderNumber;
use crate::domain::shared::Timestamp;

/// Builds `RD-######` codes from the clock plus a random suffix.
///
/// The high three digits come from the placement second (cycling every
/// ~17 minutes) and the low three are random, so two orders only collide
/// when placed in the same second and drawing the same suffix.
pub struct OrderNumberGenerator;

impl OrderNumberGenerator {
    /// Generate a number for an order placed at `now`.
    #[must_use]
    pub fn generate(now: Timestamp) -> OrderNumber {
        let suffix = rand::rng().random_range(0..1000);
        Self::compose(now, suffix)
    }

    fn compose(now: Timestamp, suffix: u32) -> OrderNumber {
        let prefix = now.unix_seconds().rem_euclid(1000) as u32;
        OrderNumber::from_digits(prefix * 1000 + suffix % 1000)
    }
}
