//! Byproduct type keys.
//!
//! A byproduct type is the lookup key into every static reference table
//! (base prices, carbon factors, reuse rates, market requirements).
//! Unrecognized keys are preserved verbatim and fall back to documented
//! defaults in each table lookup; they never fail.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category key for an oilseed processing residue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ByproductType {
    Soymeal,
    SunflowerCake,
    CottonseedCake,
    MustardCake,
    GroundnutCake,
    Husk,
    /// An unrecognized key, carried as-is so it survives a roundtrip.
    Other(String),
}

impl ByproductType {
    /// Parse a wire key into a byproduct type. Unknown keys become
    /// [`ByproductType::Other`] rather than an error.
    pub fn parse(key: &str) -> Self {
        match key {
            "soymeal" => Self::Soymeal,
            "sunflower_cake" => Self::SunflowerCake,
            "cottonseed_cake" => Self::CottonseedCake,
            "mustard_cake" => Self::MustardCake,
            "groundnut_cake" => Self::GroundnutCake,
            "husk" => Self::Husk,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire key for this byproduct type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Soymeal => "soymeal",
            Self::SunflowerCake => "sunflower_cake",
            Self::CottonseedCake => "cottonseed_cake",
            Self::MustardCake => "mustard_cake",
            Self::GroundnutCake => "groundnut_cake",
            Self::Husk => "husk",
            Self::Other(key) => key,
        }
    }

}

impl fmt::Display for ByproductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for ByproductType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&str> for ByproductType {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<ByproductType> for String {
    fn from(b: ByproductType) -> Self {
        b.as_str().to_string()
    }
}
