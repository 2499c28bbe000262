//! Product listings.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::byproduct::ByproductType;
use super::id::ProductId;
use crate::error::{Error, Result};

/// Quality grade of a listing. Unknown grades are carried verbatim and
/// simply earn no score boost during export matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QualityGrade {
    APlus,
    A,
    B,
    C,
    Other(String),
}

impl QualityGrade {
    pub fn parse(grade: &str) -> Self {
        match grade {
            "A+" => Self::APlus,
            "A" => Self::A,
            "B" => Self::B,
            "C" => Self::C,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::Other(grade) => grade,
        }
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for QualityGrade {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<QualityGrade> for String {
    fn from(g: QualityGrade) -> Self {
        g.as_str().to_string()
    }
}

/// A marketplace product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    /// Opaque seller identifier. There are no user accounts in this system.
    pub seller_id: String,
    pub title: String,
    pub byproduct_type: ByproductType,
    /// Available quantity in kg.
    pub quantity: i64,
    pub price_per_kg: Decimal,
    pub quality_grade: QualityGrade,
    /// Measured quality metrics, e.g. `{"moisture": 12, "protein": 45}`.
    pub quality_metrics: BTreeMap<String, f64>,
    pub location: String,
    pub description: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub available_for_export: bool,
    /// Listing lifecycle: `active`, `sold` or `reserved`. A plain string,
    /// there is no state machine behind it.
    pub status: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a product listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub seller_id: String,
    pub title: String,
    pub byproduct_type: ByproductType,
    pub quantity: i64,
    pub price_per_kg: Decimal,
    pub quality_grade: QualityGrade,
    #[serde(default)]
    pub quality_metrics: BTreeMap<String, f64>,
    pub location: String,
    pub description: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub available_for_export: bool,
    pub image_url: Option<String>,
}

impl NewProduct {
    /// Check required fields and numeric ranges.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::validation("title must not be empty"));
        }
        if self.quantity < 1 {
            return Err(Error::validation("quantity must be at least 1 kg"));
        }
        if self.price_per_kg <= Decimal::ZERO {
            return Err(Error::validation("pricePerKg must be positive"));
        }
        if self.price_per_kg.scale() > 2 {
            return Err(Error::validation(
                "pricePerKg must have at most 2 decimal places",
            ));
        }
        if self.location.trim().is_empty() {
            return Err(Error::validation("location must not be empty"));
        }
        Ok(())
    }
}

/// Partial update for a product listing. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub quantity: Option<i64>,
    pub price_per_kg: Option<Decimal>,
    pub quality_grade: Option<QualityGrade>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub certifications: Option<Vec<String>>,
    pub available_for_export: Option<bool>,
    pub status: Option<String>,
    pub image_url: Option<String>,
}

impl Product {
    /// Build a new listing from validated input. New listings start `active`.
    #[must_use]
    pub fn create(new: NewProduct, quality_metrics: BTreeMap<String, f64>, now: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::new(),
            seller_id: new.seller_id,
            title: new.title,
            byproduct_type: new.byproduct_type,
            quantity: new.quantity,
            price_per_kg: new.price_per_kg,
            quality_grade: new.quality_grade,
            quality_metrics,
            location: new.location,
            description: new.description,
            certifications: new.certifications,
            available_for_export: new.available_for_export,
            status: "active".to_string(),
            image_url: new.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place, bumping `updated_at`.
    pub fn apply_update(&mut self, update: ProductUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = update.price_per_kg {
            self.price_per_kg = price;
        }
        if let Some(grade) = update.quality_grade {
            self.quality_grade = grade;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(certifications) = update.certifications {
            self.certifications = certifications;
        }
        if let Some(available) = update.available_for_export {
            self.available_for_export = available;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = Some(image_url);
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_new_product() -> NewProduct {
        NewProduct {
            seller_id: "seller-1".to_string(),
            title: "Premium Soymeal".to_string(),
            byproduct_type: ByproductType::Soymeal,
            quantity: 5000,
            price_per_kg: dec!(28.50),
            quality_grade: QualityGrade::APlus,
            quality_metrics: BTreeMap::from([("protein".to_string(), 48.0)]),
            location: "Ludhiana, Punjab".to_string(),
            description: None,
            certifications: vec!["ISO 9001".to_string()],
            available_for_export: true,
            image_url: None,
        }
    }

    #[test]
    fn valid_product_passes_validation() {
        assert!(sample_new_product().validate().is_ok());
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut new = sample_new_product();
        new.quantity = 0;
        assert!(new.validate().is_err());
    }

    #[test]
    fn over_precise_price_is_rejected() {
        let mut new = sample_new_product();
        new.price_per_kg = dec!(28.505);
        assert!(new.validate().is_err());
    }

    #[test]
    fn create_starts_active_with_matching_timestamps() {
        let now = Utc::now();
        let new = sample_new_product();
        let metrics = new.quality_metrics.clone();
        let product = Product::create(new, metrics, now);

        assert_eq!(product.status, "active");
        assert_eq!(product.created_at, now);
        assert_eq!(product.updated_at, now);
    }

    #[test]
    fn apply_update_changes_only_given_fields() {
        let now = Utc::now();
        let new = sample_new_product();
        let metrics = new.quality_metrics.clone();
        let mut product = Product::create(new, metrics, now);

        let later = now + chrono::Duration::minutes(5);
        product.apply_update(
            ProductUpdate {
                status: Some("sold".to_string()),
                quantity: Some(0),
                ..Default::default()
            },
            later,
        );

        assert_eq!(product.status, "sold");
        assert_eq!(product.quantity, 0);
        assert_eq!(product.title, "Premium Soymeal");
        assert_eq!(product.updated_at, later);
    }

    #[test]
    fn quality_grade_parses_and_preserves_unknown() {
        assert_eq!(QualityGrade::parse("A+"), QualityGrade::APlus);
        assert_eq!(
            QualityGrade::parse("premium"),
            QualityGrade::Other("premium".to_string())
        );
        assert_eq!(QualityGrade::parse("premium").as_str(), "premium");
    }
}
