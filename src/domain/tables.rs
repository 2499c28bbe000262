//! Immutable reference tables for the derived-metrics components.
//!
//! The original data lives in market research spreadsheets; here it is a
//! plain configuration struct injected into each component so tests can
//! substitute alternate tables. Every lookup falls back to a documented
//! default for unrecognized byproduct types or countries.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::byproduct::ByproductType;

/// Demand level of a target market or a forecast factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

impl DemandLevel {
    /// The wire label for this demand level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parse a wire label.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// A fixed export target market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetMarket {
    pub country: String,
    pub demand_level: DemandLevel,
    /// Starting match score before quality and availability adjustments.
    pub base_match_score: i64,
}

impl TargetMarket {
    fn new(country: &str, demand_level: DemandLevel, base_match_score: i64) -> Self {
        Self {
            country: country.to_string(),
            demand_level,
            base_match_score,
        }
    }
}

/// Reference tables backing price forecasts, export matching and
/// carbon accounting.
///
/// All maps are keyed by the byproduct wire key (or country name for
/// minimum quantities). Defaults apply when a key is absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferenceTables {
    /// Reference base price per kg, in rupees.
    pub base_prices: HashMap<String, Decimal>,
    pub default_base_price: Decimal,

    /// CO2 prevented per kg of byproduct reused, in kg.
    pub carbon_factors: HashMap<String, Decimal>,
    pub default_carbon_factor: Decimal,

    /// Typical reuse rate per byproduct type, in percent.
    pub reuse_rates: HashMap<String, Decimal>,
    pub default_reuse_rate: Decimal,

    /// Quality constraints importers ask for, per byproduct type.
    pub market_requirements: HashMap<String, BTreeMap<String, String>>,

    /// Fixed target markets, in matching order.
    pub target_markets: Vec<TargetMarket>,

    /// Minimum order quantity per country, in kg.
    pub minimum_quantities: HashMap<String, i64>,
    pub default_minimum_quantity: i64,
}

impl ReferenceTables {
    /// Reference base price for a byproduct type.
    #[must_use]
    pub fn base_price(&self, byproduct: &ByproductType) -> Decimal {
        self.base_prices
            .get(byproduct.as_str())
            .copied()
            .unwrap_or(self.default_base_price)
    }

    /// CO2-per-kg factor for a byproduct type.
    #[must_use]
    pub fn carbon_factor(&self, byproduct: &ByproductType) -> Decimal {
        self.carbon_factors
            .get(byproduct.as_str())
            .copied()
            .unwrap_or(self.default_carbon_factor)
    }

    /// Typical reuse rate for a byproduct type, in percent.
    #[must_use]
    pub fn reuse_rate(&self, byproduct: &ByproductType) -> Decimal {
        self.reuse_rates
            .get(byproduct.as_str())
            .copied()
            .unwrap_or(self.default_reuse_rate)
    }

    /// Import quality requirements for a byproduct type.
    #[must_use]
    pub fn requirements(&self, byproduct: &ByproductType) -> BTreeMap<String, String> {
        self.market_requirements
            .get(byproduct.as_str())
            .cloned()
            .unwrap_or_else(|| {
                BTreeMap::from([("quality".to_string(), "standard".to_string())])
            })
    }

    /// Minimum order quantity for a target country, in kg.
    #[must_use]
    pub fn minimum_quantity(&self, country: &str) -> i64 {
        self.minimum_quantities
            .get(country)
            .copied()
            .unwrap_or(self.default_minimum_quantity)
    }
}

fn requirements_entry(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self {
            base_prices: HashMap::from([
                ("soymeal".to_string(), dec!(28.50)),
                ("sunflower_cake".to_string(), dec!(22.00)),
                ("cottonseed_cake".to_string(), dec!(19.75)),
                ("mustard_cake".to_string(), dec!(24.20)),
                ("groundnut_cake".to_string(), dec!(31.50)),
                ("husk".to_string(), dec!(8.50)),
            ]),
            default_base_price: dec!(20.0),

            carbon_factors: HashMap::from([
                ("soymeal".to_string(), dec!(0.0025)),
                ("sunflower_cake".to_string(), dec!(0.0022)),
                ("cottonseed_cake".to_string(), dec!(0.0020)),
                ("mustard_cake".to_string(), dec!(0.0023)),
                ("groundnut_cake".to_string(), dec!(0.0028)),
                ("husk".to_string(), dec!(0.0015)),
            ]),
            default_carbon_factor: dec!(0.002),

            reuse_rates: HashMap::from([
                ("soymeal".to_string(), dec!(85)),
                ("sunflower_cake".to_string(), dec!(72)),
                ("cottonseed_cake".to_string(), dec!(68)),
                ("mustard_cake".to_string(), dec!(75)),
                ("groundnut_cake".to_string(), dec!(80)),
                ("husk".to_string(), dec!(60)),
            ]),
            default_reuse_rate: dec!(70),

            market_requirements: HashMap::from([
                (
                    "soymeal".to_string(),
                    requirements_entry(&[("protein", "min 45%"), ("moisture", "max 12%")]),
                ),
                (
                    "sunflower_cake".to_string(),
                    requirements_entry(&[("organic", "preferred"), ("purity", "min 95%")]),
                ),
                (
                    "cottonseed_cake".to_string(),
                    requirements_entry(&[("protein", "min 30%"), ("aflatoxin", "max 20ppb")]),
                ),
                (
                    "mustard_cake".to_string(),
                    requirements_entry(&[("protein", "min 35%"), ("moisture", "max 10%")]),
                ),
                (
                    "groundnut_cake".to_string(),
                    requirements_entry(&[("protein", "min 40%"), ("purity", "min 97%")]),
                ),
                (
                    "husk".to_string(),
                    requirements_entry(&[("moisture", "max 15%"), ("fiber", "min 30%")]),
                ),
            ]),

            target_markets: vec![
                TargetMarket::new("Bangladesh", DemandLevel::High, 90),
                TargetMarket::new("UAE", DemandLevel::High, 85),
                TargetMarket::new("Vietnam", DemandLevel::Medium, 75),
                TargetMarket::new("Malaysia", DemandLevel::Medium, 72),
                TargetMarket::new("Thailand", DemandLevel::Medium, 70),
                TargetMarket::new("Sri Lanka", DemandLevel::Low, 65),
            ],

            minimum_quantities: HashMap::from([
                ("Bangladesh".to_string(), 2000),
                ("UAE".to_string(), 5000),
                ("Vietnam".to_string(), 3000),
                ("Malaysia".to_string(), 4000),
                ("Thailand".to_string(), 3500),
                ("Sri Lanka".to_string(), 1500),
            ]),
            default_minimum_quantity: 2500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_resolve_from_tables() {
        let tables = ReferenceTables::default();

        assert_eq!(tables.base_price(&ByproductType::Soymeal), dec!(28.50));
        assert_eq!(tables.carbon_factor(&ByproductType::Husk), dec!(0.0015));
        assert_eq!(
            tables.reuse_rate(&ByproductType::GroundnutCake),
            dec!(80)
        );
    }

    #[test]
    fn unknown_types_fall_back_to_defaults() {
        let tables = ReferenceTables::default();
        let unknown = ByproductType::from("rice_bran");

        assert_eq!(tables.base_price(&unknown), dec!(20.0));
        assert_eq!(tables.carbon_factor(&unknown), dec!(0.002));
        assert_eq!(tables.reuse_rate(&unknown), dec!(70));
        assert_eq!(
            tables.requirements(&unknown),
            BTreeMap::from([("quality".to_string(), "standard".to_string())])
        );
    }

    #[test]
    fn unknown_country_falls_back_to_default_quantity() {
        let tables = ReferenceTables::default();
        assert_eq!(tables.minimum_quantity("Bangladesh"), 2000);
        assert_eq!(tables.minimum_quantity("Atlantis"), 2500);
    }

    #[test]
    fn markets_are_listed_in_matching_order() {
        let tables = ReferenceTables::default();
        let countries: Vec<&str> = tables
            .target_markets
            .iter()
            .map(|m| m.country.as_str())
            .collect();

        assert_eq!(
            countries,
            ["Bangladesh", "UAE", "Vietnam", "Malaysia", "Thailand", "Sri Lanka"]
        );
    }

    #[test]
    fn alternate_tables_can_be_injected() {
        let mut tables = ReferenceTables::default();
        tables
            .base_prices
            .insert("soymeal".to_string(), dec!(99.99));

        assert_eq!(tables.base_price(&ByproductType::Soymeal), dec!(99.99));
    }
}
