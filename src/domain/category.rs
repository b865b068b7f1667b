//! PII category vocabulary
//!
//! The set of categories is closed. Anything the classifier produces outside
//! of it is represented by [`Classification::Unrecognized`] rather than being
//! squeezed into one of the known tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Government-issued identifier categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiCategory {
    /// Aadhaar number (12 digits, optionally grouped 4-4-4)
    Aadhaar,
    /// Permanent Account Number (AAAAA9999A)
    Pan,
    /// Passport number (A9999999)
    Passport,
}

impl PiiCategory {
    /// Every category, in report order
    pub const ALL: [PiiCategory; 3] = [Self::Aadhaar, Self::Pan, Self::Passport];

    /// Internal tag used by pattern libraries and model artifacts
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Aadhaar => "AADHAAR",
            Self::Pan => "PAN",
            Self::Passport => "PASSPORT",
        }
    }

    /// Key of this category's counter in the report summary
    pub fn count_key(&self) -> &'static str {
        match self {
            Self::Aadhaar => "aadhaar_count",
            Self::Pan => "pan_count",
            Self::Passport => "passport_count",
        }
    }

    /// Parse an exact internal tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.tag() == tag)
    }
}

impl fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PiiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(&s.to_uppercase()).ok_or_else(|| format!("Unknown PII category: {s}"))
    }
}

/// Outcome of classifying one candidate line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The classifier confirmed one of the known categories
    Known(PiiCategory),
    /// The classifier declined to confirm any known category
    Unrecognized,
}

impl Classification {
    /// Map a raw model class label onto the closed vocabulary
    pub fn from_label(label: &str) -> Self {
        PiiCategory::from_tag(label).map_or(Self::Unrecognized, Self::Known)
    }

    /// The confirmed category, if any
    pub fn category(&self) -> Option<PiiCategory> {
        match self {
            Self::Known(category) => Some(*category),
            Self::Unrecognized => None,
        }
    }
}

impl From<PiiCategory> for Classification {
    fn from(category: PiiCategory) -> Self {
        Self::Known(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for category in PiiCategory::ALL {
            assert_eq!(PiiCategory::from_tag(category.tag()), Some(category));
        }
    }

    #[test]
    fn test_from_tag_is_exact() {
        assert_eq!(PiiCategory::from_tag("pan"), None);
        assert_eq!(PiiCategory::from_tag("NONE"), None);
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("passport".parse::<PiiCategory>(), Ok(PiiCategory::Passport));
        assert!("driving_licence".parse::<PiiCategory>().is_err());
    }

    #[test]
    fn test_classification_from_label() {
        assert_eq!(
            Classification::from_label("AADHAAR"),
            Classification::Known(PiiCategory::Aadhaar)
        );
        assert_eq!(Classification::from_label("OTHER"), Classification::Unrecognized);
        assert_eq!(Classification::from_label(""), Classification::Unrecognized);
    }

    #[test]
    fn test_serde_tag() {
        let json = serde_json::to_string(&PiiCategory::Passport).unwrap();
        assert_eq!(json, "\"PASSPORT\"");
    }
}
