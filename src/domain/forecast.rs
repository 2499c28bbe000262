//! Price forecast generation.
//!
//! This is an explicitly labeled deterministic-formula-plus-randomness
//! generator, not a predictive model: a sinusoidal seasonal term, a small
//! monotonic trend and per-day uniform jitter around a reference base price.
//! The randomness source is threaded in as a parameter so tests can seed it.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::byproduct::ByproductType;
use super::prediction::{NewPricePrediction, PredictionFactors, Seasonality, SupplyLevel};
use super::rounding::round_fixed;
use super::tables::{DemandLevel, ReferenceTables};

/// Number of future days covered by one generation call.
pub const FORECAST_HORIZON_DAYS: i64 = 14;

/// Generate one prediction per day for the next [`FORECAST_HORIZON_DAYS`]
/// days, ordered by date ascending.
///
/// For day offset `i` from `now`:
/// - seasonal factor: `sin(i/365 * 2π) * 0.1`
/// - volatility: uniform in [-0.075, 0.075], drawn fresh per day
/// - trend: `i * 0.002`, a slight upward drift
/// - predicted price: base price scaled by the three factors, 2 dp
/// - confidence: `max(75, 95 - i * 1.5)`, strictly decreasing with horizon
pub fn generate_price_predictions<R: Rng + ?Sized>(
    byproduct: &ByproductType,
    tables: &ReferenceTables,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<NewPricePrediction> {
    let base_price = tables.base_price(byproduct);

    (1..=FORECAST_HORIZON_DAYS)
        .map(|i| {
            let seasonal_factor = ((i as f64) / 365.0 * std::f64::consts::TAU).sin() * 0.1;
            let random_volatility: f64 = rng.gen_range(-0.075..=0.075);
            let trend_factor = i as f64 * 0.002;

            let multiplier = 1.0 + seasonal_factor + random_volatility + trend_factor;
            // The multiplier is bounded and finite, so the conversion cannot fail.
            let multiplier = Decimal::from_f64(multiplier).unwrap_or(Decimal::ONE);
            let predicted_price = round_fixed(base_price * multiplier, 2);

            let confidence = round_fixed(
                (dec!(95) - dec!(1.5) * Decimal::from(i)).max(dec!(75)),
                2,
            );

            NewPricePrediction {
                byproduct_type: byproduct.clone(),
                current_price: round_fixed(base_price, 2),
                predicted_price,
                prediction_date: now + Duration::days(i),
                confidence,
                factors: PredictionFactors {
                    demand: match i % 3 {
                        0 => DemandLevel::High,
                        1 => DemandLevel::Medium,
                        _ => DemandLevel::Low,
                    },
                    supply: match i % 4 {
                        0 => SupplyLevel::Low,
                        1 => SupplyLevel::Medium,
                        _ => SupplyLevel::High,
                    },
                    seasonality: if seasonal_factor > 0.05 {
                        Seasonality::Peak
                    } else {
                        Seasonality::OffPeak
                    },
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generate(byproduct: &ByproductType, seed: u64) -> Vec<NewPricePrediction> {
        let tables = ReferenceTables::default();
        let mut rng = StdRng::seed_from_u64(seed);
        generate_price_predictions(byproduct, &tables, &mut rng, Utc::now())
    }

    #[test]
    fn produces_fourteen_predictions_in_date_order() {
        let predictions = generate(&ByproductType::Soymeal, 1);

        assert_eq!(predictions.len(), 14);
        for pair in predictions.windows(2) {
            assert!(pair[0].prediction_date < pair[1].prediction_date);
        }
    }

    #[test]
    fn confidence_decreases_and_never_drops_below_75() {
        let predictions = generate(&ByproductType::MustardCake, 2);

        for pair in predictions.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        for p in &predictions {
            assert!(p.confidence >= dec!(75));
            assert!(p.confidence <= dec!(95));
        }
        // Day 1: 95 - 1.5 = 93.50; day 14 hits the floor.
        assert_eq!(predictions[0].confidence, dec!(93.50));
        assert_eq!(predictions[13].confidence, dec!(75));
    }

    #[test]
    fn current_price_is_the_reference_base_price() {
        let predictions = generate(&ByproductType::GroundnutCake, 3);
        for p in &predictions {
            assert_eq!(p.current_price, dec!(31.50));
        }
    }

    #[test]
    fn unknown_types_use_the_default_base_price() {
        let predictions = generate(&ByproductType::from("rice_bran"), 4);
        for p in &predictions {
            assert_eq!(p.current_price, dec!(20.00));
        }
    }

    #[test]
    fn prices_and_confidence_carry_two_fractional_digits() {
        // The default base price has scale 1; the wire format still pads to
        // two digits ("20.00", not "20.0"). Same for the 93.5 confidence.
        let predictions = generate(&ByproductType::from("rice_bran"), 9);

        assert_eq!(predictions[0].current_price.to_string(), "20.00");
        assert_eq!(predictions[0].confidence.to_string(), "93.50");
        for p in &predictions {
            assert_eq!(p.current_price.scale(), 2);
            assert_eq!(p.confidence.scale(), 2);
        }
    }

    #[test]
    fn predicted_prices_stay_within_formula_bounds() {
        // Worst case over 14 days: seasonal <= 0.024, |volatility| <= 0.075,
        // trend <= 0.028, so the multiplier is within [0.925, 1.127].
        let predictions = generate(&ByproductType::Husk, 5);
        for p in &predictions {
            assert!(p.predicted_price >= dec!(8.50) * dec!(0.92));
            assert!(p.predicted_price <= dec!(8.50) * dec!(1.13));
            assert_eq!(p.predicted_price.scale(), 2);
        }
    }

    #[test]
    fn factor_cycles_follow_day_offsets() {
        let predictions = generate(&ByproductType::Soymeal, 6);

        // i = 1
        assert_eq!(predictions[0].factors.demand, DemandLevel::Medium);
        assert_eq!(predictions[0].factors.supply, SupplyLevel::Medium);
        // i = 3
        assert_eq!(predictions[2].factors.demand, DemandLevel::High);
        assert_eq!(predictions[2].factors.supply, SupplyLevel::High);
        // i = 4
        assert_eq!(predictions[3].factors.supply, SupplyLevel::Low);
        // Within a 14-day horizon the seasonal factor never exceeds 0.05.
        for p in &predictions {
            assert_eq!(p.factors.seasonality, Seasonality::OffPeak);
        }
    }

    #[test]
    fn same_seed_reproduces_the_batch() {
        let tables = ReferenceTables::default();
        let now = Utc::now();

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = generate_price_predictions(&ByproductType::Soymeal, &tables, &mut rng_a, now);
        let b = generate_price_predictions(&ByproductType::Soymeal, &tables, &mut rng_b, now);

        let prices_a: Vec<_> = a.iter().map(|p| p.predicted_price).collect();
        let prices_b: Vec<_> = b.iter().map(|p| p.predicted_price).collect();
        assert_eq!(prices_a, prices_b);
    }

    #[test]
    fn fresh_entropy_changes_the_batch() {
        // The volatility term makes repeat calls diverge. That is expected
        // behavior, not a bug.
        let tables = ReferenceTables::default();
        let now = Utc::now();
        let mut rng = rand::thread_rng();

        let a = generate_price_predictions(&ByproductType::Soymeal, &tables, &mut rng, now);
        let b = generate_price_predictions(&ByproductType::Soymeal, &tables, &mut rng, now);

        let prices_a: Vec<_> = a.iter().map(|p| p.predicted_price).collect();
        let prices_b: Vec<_> = b.iter().map(|p| p.predicted_price).collect();
        assert_ne!(prices_a, prices_b);
    }

    #[test]
    fn injected_tables_change_the_base_price() {
        let mut tables = ReferenceTables::default();
        tables.base_prices.insert("soymeal".to_string(), dec!(100));
        let mut rng = StdRng::seed_from_u64(8);

        let predictions =
            generate_price_predictions(&ByproductType::Soymeal, &tables, &mut rng, Utc::now());
        assert_eq!(predictions[0].current_price, dec!(100.00));
    }
}
