//! Fixed-point rounding for wire values.
//!
//! `round_dp` alone leaves the scale untouched when it is already at or
//! below the target, so `20.0` would serialize as `"20.0"` instead of
//! `"20.00"`. The wire contract is a fixed number of fractional digits, so
//! rounded values are rescaled to exactly the target scale.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round half-away-from-zero to `scale` fractional digits, padding the
/// scale so the value serializes with exactly that many digits.
pub(crate) fn round_fixed(value: Decimal, scale: u32) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn pads_short_scales() {
        assert_eq!(round_fixed(dec!(20.0), 2).to_string(), "20.00");
        assert_eq!(round_fixed(dec!(2), 2).to_string(), "2.00");
        assert_eq!(round_fixed(dec!(93.5), 2).to_string(), "93.50");
        assert_eq!(round_fixed(dec!(0.005), 4).to_string(), "0.0050");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_fixed(dec!(0.0050), 2).to_string(), "0.01");
        assert_eq!(round_fixed(dec!(29.925), 0).to_string(), "30");
        assert_eq!(round_fixed(dec!(-2.5), 0).to_string(), "-3");
    }

    #[test]
    fn truncating_rounds_keep_the_target_scale() {
        assert_eq!(round_fixed(dec!(28.505), 2).to_string(), "28.51");
        assert_eq!(round_fixed(dec!(28.504999), 2).to_string(), "28.50");
    }
}
