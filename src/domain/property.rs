use serde::{Deserialize, Serialize};
use validator::Validate;

/// Broad usage class of the asset being valued.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetCategory {
    Residential,
    Commercial,
    Industrial,
    MixedUse,
    LandOnly,
    Agricultural,
}

/// Legal certification state of the property title.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnershipStatus {
    Certified,
    UnderProcess,
    Uncertified,
    Disputed,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyCondition {
    Excellent,
    Good,
    Fair,
    Poor,
    NeedsRenovation,
}

/// Property attributes as submitted by the caller. Land area is the only
/// field that enters the fallback price computation; the remaining optional
/// fields feed the confidence score and narrative rules.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    #[validate(length(min = 1, max = 512))]
    pub address: String,
    #[validate(length(min = 1, max = 128))]
    pub district: String,
    #[validate(length(min = 1, max = 128))]
    pub city: String,
    #[validate(length(min = 1, max = 128))]
    pub province: String,
    /// Land area in square meters. Must be positive and finite.
    #[validate(range(min = 0.000001))]
    pub land_area: f64,
    pub building_area: Option<f64>,
    pub asset_category: AssetCategory,
    pub zoning: Option<String>,
    pub land_use: Option<String>,
    pub ownership_status: OwnershipStatus,
    pub certificate_number: Option<String>,
    pub year_built: Option<i32>,
    pub condition: Option<PropertyCondition>,
    pub description: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
}

impl PropertyRecord {
    /// Condition used by the pricing and narrative rules when the caller
    /// leaves the field unset. Fair carries a neutral 1.0 multiplier.
    pub fn condition_or_default(&self) -> PropertyCondition {
        self.condition.unwrap_or(PropertyCondition::Fair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn record() -> PropertyRecord {
        PropertyRecord {
            address: "Jl. Teuku Umar No. 1".to_string(),
            district: "Menteng".to_string(),
            city: "Jakarta".to_string(),
            province: "DKI Jakarta".to_string(),
            land_area: 500.0,
            building_area: None,
            asset_category: AssetCategory::Residential,
            zoning: None,
            land_use: None,
            ownership_status: OwnershipStatus::Certified,
            certificate_number: None,
            year_built: None,
            condition: None,
            description: None,
            features: None,
        }
    }

    #[test]
    fn missing_condition_defaults_to_fair() {
        assert_eq!(record().condition_or_default(), PropertyCondition::Fair);
    }

    #[test]
    fn zero_land_area_fails_validation() {
        let mut property = record();
        property.land_area = 0.0;
        assert!(property.validate().is_err());
    }

    #[test]
    fn negative_land_area_fails_validation() {
        let mut property = record();
        property.land_area = -10.0;
        assert!(property.validate().is_err());
    }

    #[test]
    fn deserializes_screaming_snake_enums() {
        let json = r#"{
            "address": "Jl. Darmo No. 5",
            "district": "Darmo",
            "city": "Surabaya",
            "province": "Jawa Timur",
            "landArea": 250.0,
            "assetCategory": "MIXED_USE",
            "ownershipStatus": "UNDER_PROCESS",
            "condition": "NEEDS_RENOVATION"
        }"#;
        let property: PropertyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(property.asset_category, AssetCategory::MixedUse);
        assert_eq!(property.ownership_status, OwnershipStatus::UnderProcess);
        assert_eq!(property.condition, Some(PropertyCondition::NeedsRenovation));
    }
}
