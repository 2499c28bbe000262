//! Carbon credit and environmental impact calculations.
//!
//! Pure, deterministic arithmetic over per-byproduct constants. One carbon
//! credit equals one ton of CO2-equivalent emissions prevented.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::byproduct::ByproductType;
use super::rounding::round_fixed;
use super::tables::ReferenceTables;

/// Average truck emission in kg CO2 per km.
const TRUCK_EMISSION_FACTOR: Decimal = dec!(0.1);

/// Carbon credits earned from reusing `quantity_kg` of a byproduct, in tons
/// of CO2 equivalent, rounded to 4 decimal places.
#[must_use]
pub fn calculate_carbon_credits(
    quantity_kg: Decimal,
    byproduct: &ByproductType,
    tables: &ReferenceTables,
) -> Decimal {
    let factor = tables.carbon_factor(byproduct);
    let co2_prevented_kg = quantity_kg * factor;
    round_fixed(co2_prevented_kg / dec!(1000), 4)
}

/// Total waste reduction across transaction quantities, in tons.
#[must_use]
pub fn calculate_waste_reduction(quantities_kg: &[Decimal]) -> Decimal {
    let total_kg: Decimal = quantities_kg.iter().copied().sum();
    total_kg / dec!(1000)
}

/// Transport emissions saved through route optimization, in kg CO2.
#[must_use]
pub fn calculate_transport_savings(distance_km: Decimal) -> Decimal {
    distance_km * TRUCK_EMISSION_FACTOR
}

/// Resource savings estimated from a reused quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesSaved {
    /// Liters.
    pub water: i64,
    /// kWh.
    pub energy: i64,
    /// Kg.
    pub raw_materials: i64,
}

/// Environmental impact derived from the reused portion of a byproduct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalImpact {
    /// Tons.
    pub waste_reduced: Decimal,
    /// Tons.
    pub landfill_avoided: Decimal,
    pub resources_saved: ResourcesSaved,
}

/// Circular economy impact of reusing a byproduct quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircularEconomyImpact {
    pub byproduct_type: ByproductType,
    /// Kg.
    pub total_quantity: Decimal,
    /// Percent.
    pub reuse_rate: Decimal,
    /// Kg actually reused, always <= `total_quantity`.
    pub quantity_reused: Decimal,
    pub carbon_credits: Decimal,
    pub environmental_impact: EnvironmentalImpact,
}

/// Apply the typical reuse rate for a byproduct type to a quantity and derive
/// credits and resource-savings estimates from the reused portion.
#[must_use]
pub fn circular_economy_impact(
    byproduct: &ByproductType,
    quantity_kg: Decimal,
    tables: &ReferenceTables,
) -> CircularEconomyImpact {
    let reuse_rate = tables.reuse_rate(byproduct);
    let quantity_reused = quantity_kg * reuse_rate / dec!(100);

    CircularEconomyImpact {
        byproduct_type: byproduct.clone(),
        total_quantity: quantity_kg,
        reuse_rate,
        quantity_reused,
        carbon_credits: calculate_carbon_credits(quantity_reused, byproduct, tables),
        environmental_impact: EnvironmentalImpact {
            waste_reduced: quantity_reused / dec!(1000),
            landfill_avoided: quantity_reused / dec!(1000),
            resources_saved: ResourcesSaved {
                water: scale_to_whole(quantity_reused, dec!(0.5)),
                energy: scale_to_whole(quantity_reused, dec!(0.3)),
                raw_materials: scale_to_whole(quantity_reused, dec!(0.8)),
            },
        },
    }
}

fn scale_to_whole(quantity: Decimal, factor: Decimal) -> i64 {
    (quantity * factor)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}
