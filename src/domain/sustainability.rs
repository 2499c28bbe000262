//! Sustainability reporting.
//!
//! Rolls a transaction history up into credit totals and a ranking tier.
//! The report is derived on demand and never persisted.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::rounding::round_fixed;
use super::transaction::Transaction;

/// Ranking tier earned from accumulated carbon credits.
///
/// Thresholds are inclusive and evaluated highest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributorTier {
    #[serde(rename = "Platinum Contributor")]
    Platinum,
    #[serde(rename = "Gold Contributor")]
    Gold,
    #[serde(rename = "Silver Contributor")]
    Silver,
    #[serde(rename = "Bronze Contributor")]
    Bronze,
    #[serde(rename = "Green Participant")]
    GreenParticipant,
}

impl ContributorTier {
    /// The tier for a carbon-credit total.
    #[must_use]
    pub fn from_credits(credits: Decimal) -> Self {
        if credits >= dec!(5000) {
            Self::Platinum
        } else if credits >= dec!(1000) {
            Self::Gold
        } else if credits >= dec!(500) {
            Self::Silver
        } else if credits >= dec!(100) {
            Self::Bronze
        } else {
            Self::GreenParticipant
        }
    }
}

/// Aggregated sustainability metrics over a transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainabilityReport {
    /// Tons CO2 equivalent, 2 dp.
    pub total_carbon_credits: Decimal,
    /// Kg across all transactions.
    pub total_byproducts_traded: i64,
    /// Tons, 2 dp.
    pub waste_reduction: Decimal,
    /// Kg, 2 dp.
    pub co2_prevented: Decimal,
    /// Rough estimate: 50 trees per credit.
    pub equivalent_trees: i64,
    pub ranking: ContributorTier,
}

/// Aggregate a transaction collection into a sustainability report.
///
/// Transactions without recorded credits count as zero.
#[must_use]
pub fn generate_sustainability_report(transactions: &[Transaction]) -> SustainabilityReport {
    let total_credits: Decimal = transactions
        .iter()
        .map(|t| t.carbon_credits.unwrap_or(Decimal::ZERO))
        .sum();
    let total_quantity: i64 = transactions.iter().map(|t| t.quantity).sum();

    SustainabilityReport {
        total_carbon_credits: round_fixed(total_credits, 2),
        total_byproducts_traded: total_quantity,
        waste_reduction: round_fixed(Decimal::from(total_quantity) / dec!(1000), 2),
        co2_prevented: round_fixed(total_credits * dec!(1000), 2),
        equivalent_trees: (total_credits * dec!(50))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(i64::MAX),
        ranking: ContributorTier::from_credits(total_credits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::byproduct::ByproductType;
    use crate::domain::id::{ProductId, TransactionId};
    use chrono::Utc;

    fn transaction(quantity: i64, credits: Option<Decimal>) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            product_id: ProductId::from("prod-1"),
            buyer_id: "buyer-1".to_string(),
            seller_id: "seller-1".to_string(),
            quantity,
            total_price: dec!(100.00),
            status: "completed".to_string(),
            smart_contract_hash: None,
            delivery_terms: None,
            payment_terms: None,
            carbon_credits: credits,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    // Mirrors the worked example from the product brief: 150 total credits
    // lands in Bronze (>= 100, < 500).
    #[test]
    fn aggregates_totals_and_ranks_bronze() {
        let report = generate_sustainability_report(&[
            transaction(1000, Some(dec!(100))),
            transaction(2000, Some(dec!(50))),
        ]);

        assert_eq!(report.total_carbon_credits, dec!(150.00));
        assert_eq!(report.total_byproducts_traded, 3000);
        assert_eq!(report.waste_reduction, dec!(3.00));
        assert_eq!(report.co2_prevented, dec!(150000.00));
        assert_eq!(report.equivalent_trees, 7500);
        assert_eq!(report.ranking, ContributorTier::Bronze);
    }

    #[test]
    fn missing_credits_count_as_zero() {
        let report = generate_sustainability_report(&[
            transaction(500, None),
            transaction(500, Some(dec!(2.5))),
        ]);

        assert_eq!(report.total_carbon_credits, dec!(2.50));
        assert_eq!(report.total_byproducts_traded, 1000);
        assert_eq!(report.ranking, ContributorTier::GreenParticipant);
    }

    #[test]
    fn report_totals_carry_two_fractional_digits() {
        // Whole-number totals still serialize as fixed-point strings:
        // 2000 kg is "2.00" tons, not "2".
        let report = generate_sustainability_report(&[
            transaction(1000, Some(dec!(0.0025))),
            transaction(1000, Some(dec!(0.0025))),
        ]);

        assert_eq!(report.total_carbon_credits.to_string(), "0.01");
        assert_eq!(report.waste_reduction.to_string(), "2.00");
        assert_eq!(report.co2_prevented.to_string(), "5.00");
    }

    #[test]
    fn empty_history_is_a_green_participant() {
        let report = generate_sustainability_report(&[]);

        assert_eq!(report.total_carbon_credits, Decimal::ZERO);
        assert_eq!(report.total_byproducts_traded, 0);
        assert_eq!(report.equivalent_trees, 0);
        assert_eq!(report.ranking, ContributorTier::GreenParticipant);
    }

    #[test]
    fn tier_thresholds_are_inclusive_highest_first() {
        assert_eq!(
            ContributorTier::from_credits(dec!(5000)),
            ContributorTier::Platinum
        );
        assert_eq!(
            ContributorTier::from_credits(dec!(4999.99)),
            ContributorTier::Gold
        );
        assert_eq!(
            ContributorTier::from_credits(dec!(1000)),
            ContributorTier::Gold
        );
        assert_eq!(
            ContributorTier::from_credits(dec!(999.99)),
            ContributorTier::Silver
        );
        assert_eq!(
            ContributorTier::from_credits(dec!(500)),
            ContributorTier::Silver
        );
        assert_eq!(
            ContributorTier::from_credits(dec!(100)),
            ContributorTier::Bronze
        );
        assert_eq!(
            ContributorTier::from_credits(dec!(99.99)),
            ContributorTier::GreenParticipant
        );
    }

    #[test]
    fn tier_serializes_to_display_labels() {
        let json = serde_json::to_string(&ContributorTier::Platinum).unwrap();
        assert_eq!(json, "\"Platinum Contributor\"");
    }
}
