//! Marketplace transactions.
//!
//! Carbon credits are computed once at creation time and never recomputed.
//! The "smart contract hash" is an opaque base64 token attached for display,
//! not a cryptographic or executable contract.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::byproduct::ByproductType;
use super::id::{ProductId, TransactionId};
use crate::error::{Error, Result};

/// A recorded trade between a buyer and a seller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub product_id: ProductId,
    pub buyer_id: String,
    pub seller_id: String,
    /// Traded quantity in kg.
    pub quantity: i64,
    pub total_price: Decimal,
    /// `pending`, `verified`, `completed` or `disputed`.
    pub status: String,
    pub smart_contract_hash: Option<String>,
    pub delivery_terms: Option<String>,
    pub payment_terms: Option<String>,
    /// Tons of CO2-equivalent prevented, fixed at creation time.
    pub carbon_credits: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Input for creating a transaction.
///
/// `byproduct_type` is taken from the request body and used only for the
/// carbon-credit computation. It is not cross-checked against the referenced
/// product's own type; callers that disagree with the product get whatever
/// they sent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub product_id: ProductId,
    pub buyer_id: String,
    pub seller_id: String,
    pub quantity: i64,
    pub total_price: Decimal,
    pub byproduct_type: ByproductType,
    pub delivery_terms: Option<String>,
    pub payment_terms: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.quantity < 1 {
            return Err(Error::validation("quantity must be at least 1 kg"));
        }
        if self.total_price <= Decimal::ZERO {
            return Err(Error::validation("totalPrice must be positive"));
        }
        Ok(())
    }
}

impl Transaction {
    /// Build a new transaction with its carbon credits and contract token.
    /// New transactions start `pending`.
    #[must_use]
    pub fn create<R: Rng + ?Sized>(
        new: NewTransaction,
        carbon_credits: Decimal,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let hash = contract_hash(&new.product_id, now, rng);
        Self {
            id: TransactionId::new(),
            product_id: new.product_id,
            buyer_id: new.buyer_id,
            seller_id: new.seller_id,
            quantity: new.quantity,
            total_price: new.total_price,
            status: "pending".to_string(),
            smart_contract_hash: Some(hash),
            delivery_terms: new.delivery_terms,
            payment_terms: new.payment_terms,
            carbon_credits: Some(carbon_credits),
            created_at: now,
            completed_at: None,
        }
    }
}

/// Synthesize the opaque contract token: `0x` followed by at most 64
/// characters of base64 over a product-timestamp-nonce string.
pub fn contract_hash<R: Rng + ?Sized>(
    product_id: &ProductId,
    now: DateTime<Utc>,
    rng: &mut R,
) -> String {
    let seed = format!(
        "{}-{}-{}",
        product_id,
        now.timestamp_millis(),
        rng.gen::<f64>()
    );
    let encoded = BASE64.encode(seed.as_bytes());
    let truncated = &encoded[..encoded.len().min(64)];
    format!("0x{truncated}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    fn sample_new_transaction() -> NewTransaction {
        NewTransaction {
            product_id: ProductId::from("prod-1"),
            buyer_id: "buyer-1".to_string(),
            seller_id: "seller-1".to_string(),
            quantity: 1000,
            total_price: dec!(28500.00),
            byproduct_type: ByproductType::Soymeal,
            delivery_terms: Some("FOB".to_string()),
            payment_terms: None,
        }
    }

    #[test]
    fn create_sets_pending_status_and_credits() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();
        let txn = Transaction::create(sample_new_transaction(), dec!(0.0025), now, &mut rng);

        assert_eq!(txn.status, "pending");
        assert_eq!(txn.carbon_credits, Some(dec!(0.0025)));
        assert!(txn.completed_at.is_none());
    }

    #[test]
    fn contract_hash_has_prefix_and_bounded_length() {
        let mut rng = StdRng::seed_from_u64(7);
        let hash = contract_hash(&ProductId::from("prod-1"), Utc::now(), &mut rng);

        assert!(hash.starts_with("0x"));
        assert!(hash.len() <= 2 + 64);
        // base64 alphabet only after the prefix
        assert!(hash[2..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='));
    }

    #[test]
    fn contract_hashes_differ_between_calls() {
        let mut rng = rand::thread_rng();
        let now = Utc::now();
        let id = ProductId::from("prod-1");

        assert_ne!(
            contract_hash(&id, now, &mut rng),
            contract_hash(&id, now, &mut rng)
        );
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut new = sample_new_transaction();
        new.quantity = 0;
        assert!(new.validate().is_err());
    }
}
