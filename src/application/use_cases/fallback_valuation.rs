//! Deterministic Fallback Valuation Engine
//!
//! Used when the AI-assisted path fails or returns unparsable output:
//! - Base unit price from a fixed {asset category} x {city} table
//! - District / condition / ownership multipliers
//! - Data-completeness confidence score
//! - Two synthetic comparables derived by perturbing the computed price
//! - Rule-driven risk and strategic narratives
//!
//! Every function here is a pure mapping from input fields to output
//! fields: no I/O, no clock, no randomness. Identical input yields
//! bitwise-identical output.

use crate::domain::error::{AppError, Result};
use crate::domain::property::{
    AssetCategory, OwnershipStatus, PropertyCondition, PropertyRecord,
};
use crate::domain::valuation::{
    Comparable, DataSource, MarketTrend, RiskAssessment, RiskLevel, StrategicValue,
    TrendDirection, ValuationMethod, ValuationRecord,
};

/// Base unit prices in IDR per square meter, keyed by city per category.
/// Cities missing from a category's list degrade to that category's default.
const RESIDENTIAL_PRICES: &[(&str, f64)] = &[
    ("Jakarta", 15_000_000.0),
    ("Surabaya", 8_000_000.0),
    ("Bandung", 7_000_000.0),
    ("Medan", 5_000_000.0),
    ("Semarang", 4_500_000.0),
];
const RESIDENTIAL_DEFAULT: f64 = 3_000_000.0;

const COMMERCIAL_PRICES: &[(&str, f64)] = &[
    ("Jakarta", 25_000_000.0),
    ("Surabaya", 12_000_000.0),
    ("Bandung", 10_000_000.0),
    ("Medan", 8_000_000.0),
    ("Semarang", 7_000_000.0),
];
const COMMERCIAL_DEFAULT: f64 = 5_000_000.0;

const INDUSTRIAL_PRICES: &[(&str, f64)] = &[
    ("Jakarta", 8_000_000.0),
    ("Surabaya", 5_000_000.0),
    ("Bandung", 4_000_000.0),
    ("Medan", 3_500_000.0),
    ("Semarang", 3_000_000.0),
];
const INDUSTRIAL_DEFAULT: f64 = 2_000_000.0;

const MIXED_USE_PRICES: &[(&str, f64)] = &[
    ("Jakarta", 18_000_000.0),
    ("Surabaya", 9_000_000.0),
    ("Bandung", 8_000_000.0),
    ("Medan", 6_000_000.0),
    ("Semarang", 5_500_000.0),
];
const MIXED_USE_DEFAULT: f64 = 4_000_000.0;

const LAND_ONLY_PRICES: &[(&str, f64)] = &[
    ("Jakarta", 12_000_000.0),
    ("Surabaya", 6_000_000.0),
    ("Bandung", 5_000_000.0),
    ("Medan", 4_000_000.0),
    ("Semarang", 3_500_000.0),
];
const LAND_ONLY_DEFAULT: f64 = 2_500_000.0;

const AGRICULTURAL_PRICES: &[(&str, f64)] = &[
    ("Jakarta", 3_000_000.0),
    ("Surabaya", 1_500_000.0),
    ("Bandung", 1_200_000.0),
    ("Medan", 1_000_000.0),
    ("Semarang", 900_000.0),
];
const AGRICULTURAL_DEFAULT: f64 = 500_000.0;

/// Districts carrying a location premium, keyed by city.
const PREMIUM_DISTRICTS: &[(&str, &[&str])] = &[
    (
        "Jakarta",
        &["Menteng", "Kebayoran Baru", "Pondok Indah", "Kemang", "Senayan"],
    ),
    ("Surabaya", &["Darmo", "Gubeng", "Citraland"]),
    ("Bandung", &["Dago", "Setiabudi"]),
];

const STANDARD_DISTRICTS: &[(&str, &[&str])] = &[
    (
        "Jakarta",
        &["Tebet", "Cilandak", "Kelapa Gading", "Pantai Indah Kapuk"],
    ),
    ("Surabaya", &["Rungkut", "Wiyung"]),
    ("Bandung", &["Buah Batu", "Antapani"]),
];

/// Resolves the base unit price for a category in a city. Total: an
/// unrecognized city degrades to the category default, never an error.
pub(crate) fn resolve_base_price(category: AssetCategory, city: &str) -> f64 {
    let (prices, default) = match category {
        AssetCategory::Residential => (RESIDENTIAL_PRICES, RESIDENTIAL_DEFAULT),
        AssetCategory::Commercial => (COMMERCIAL_PRICES, COMMERCIAL_DEFAULT),
        AssetCategory::Industrial => (INDUSTRIAL_PRICES, INDUSTRIAL_DEFAULT),
        AssetCategory::MixedUse => (MIXED_USE_PRICES, MIXED_USE_DEFAULT),
        AssetCategory::LandOnly => (LAND_ONLY_PRICES, LAND_ONLY_DEFAULT),
        AssetCategory::Agricultural => (AGRICULTURAL_PRICES, AGRICULTURAL_DEFAULT),
    };
    prices
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(city))
        .map(|(_, price)| *price)
        .unwrap_or(default)
}

/// 1.5 for premium districts, 1.2 for standard, 1.0 otherwise.
pub(crate) fn district_multiplier(district: &str, city: &str) -> f64 {
    let in_list = |lists: &[(&str, &[&str])]| {
        lists
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(city))
            .map(|(_, districts)| {
                districts.iter().any(|d| d.eq_ignore_ascii_case(district))
            })
            .unwrap_or(false)
    };

    if in_list(PREMIUM_DISTRICTS) {
        1.5
    } else if in_list(STANDARD_DISTRICTS) {
        1.2
    } else {
        1.0
    }
}

pub(crate) fn condition_multiplier(condition: PropertyCondition) -> f64 {
    match condition {
        PropertyCondition::Excellent => 1.3,
        PropertyCondition::Good => 1.1,
        PropertyCondition::Fair => 1.0,
        PropertyCondition::Poor => 0.8,
        PropertyCondition::NeedsRenovation => 0.7,
    }
}

pub(crate) fn ownership_multiplier(status: OwnershipStatus) -> f64 {
    match status {
        OwnershipStatus::Certified => 1.2,
        OwnershipStatus::UnderProcess => 1.0,
        OwnershipStatus::Uncertified => 0.8,
        OwnershipStatus::Disputed => 0.5,
    }
}

/// Confidence starts at 0.5 and accrues fixed increments per piece of
/// information the caller supplied. Clamped to [0, 1].
pub(crate) fn calculate_confidence(property: &PropertyRecord) -> f64 {
    let mut score: f64 = 0.5;

    match property.ownership_status {
        OwnershipStatus::Certified => score += 0.2,
        OwnershipStatus::UnderProcess => score += 0.1,
        _ => {}
    }
    if property.certificate_number.is_some() {
        score += 0.1;
    }
    if property.zoning.is_some() {
        score += 0.05;
    }
    if property.description.is_some() {
        score += 0.05;
    }
    if property.building_area.is_some() {
        score += 0.05;
    }
    if property.year_built.is_some() {
        score += 0.05;
    }

    score.clamp(0.0, 1.0)
}

/// Exactly two synthetic comparables perturbed around the computed price:
/// 95% at similarity 0.85, 105% at similarity 0.80. No external comparable
/// database is consulted in the fallback path.
pub(crate) fn generate_comparables(property: &PropertyRecord, unit_price: f64) -> Vec<Comparable> {
    let total_value = unit_price * property.land_area;

    let perturbed = |label: &str, factor: f64, similarity: f64, distance_km: f64| Comparable {
        address: format!("Comparable property {}, {} area", label, property.district),
        district: property.district.clone(),
        city: property.city.clone(),
        land_area: property.land_area * factor,
        building_area: property.building_area.map(|area| area * factor),
        asset_category: property.asset_category,
        transaction_price: Some(total_value * factor),
        unit_price: Some(unit_price * factor),
        distance_km: Some(distance_km),
        similarity_score: similarity.clamp(0.0, 1.0),
        data_source: DataSource::MarketEstimate,
    };

    vec![
        perturbed("A", 0.95, 0.85, 0.5),
        perturbed("B", 1.05, 0.80, 1.2),
    ]
}

/// Overall risk is a pure function of ownership status and condition.
pub(crate) fn assess_risk(property: &PropertyRecord) -> RiskAssessment {
    let condition = property.condition_or_default();
    let poor_condition = matches!(
        condition,
        PropertyCondition::Poor | PropertyCondition::NeedsRenovation
    );

    let overall_level = if property.ownership_status == OwnershipStatus::Disputed {
        RiskLevel::High
    } else if property.ownership_status == OwnershipStatus::Uncertified || poor_condition {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let mut factors = Vec::new();
    let mut mitigations = Vec::new();

    if property.ownership_status != OwnershipStatus::Certified {
        factors.push("Ownership title is not fully certified".to_string());
        mitigations
            .push("Complete title certification with the national land agency (BPN)".to_string());
    }
    if property.certificate_number.is_none() {
        factors.push("No certificate number is on record".to_string());
        mitigations
            .push("Verify title documents with a licensed land deed official (PPAT)".to_string());
    }
    if poor_condition {
        factors.push("Building condition requires significant repair".to_string());
        mitigations.push("Budget renovation works before resale or lease".to_string());
    }
    if property.zoning.is_none() {
        factors.push("Zoning designation is not documented".to_string());
        mitigations
            .push("Confirm the zoning designation with the local planning office".to_string());
    }

    mitigations.push("Commission an independent appraisal before transacting".to_string());
    mitigations.push("Review encumbrances and outstanding land taxes on the title".to_string());

    RiskAssessment {
        overall_level,
        factors,
        mitigations,
    }
}

fn highest_and_best_use(category: AssetCategory) -> &'static str {
    match category {
        AssetCategory::Residential => {
            "Owner-occupied or rental housing in line with the surrounding residential fabric"
        }
        AssetCategory::Commercial => {
            "Retail or office use capturing street frontage and local footfall"
        }
        AssetCategory::Industrial => {
            "Light manufacturing or warehousing subject to utility capacity"
        }
        AssetCategory::MixedUse => "Ground-floor commercial with residential upper floors",
        AssetCategory::LandOnly => {
            "Land banking or staged development following zoning confirmation"
        }
        AssetCategory::Agricultural => {
            "Continued agricultural production pending conversion approvals"
        }
    }
}

fn upside_potential(property: &PropertyRecord) -> &'static str {
    let certified = property.ownership_status == OwnershipStatus::Certified;
    if certified && property.condition_or_default() == PropertyCondition::Excellent {
        "High upside: certified title and excellent condition support near-term repositioning or resale"
    } else if certified {
        "Moderate upside: certified title lowers transaction friction; value growth tracks the district market"
    } else {
        "Limited upside until title certification is resolved"
    }
}

pub(crate) fn strategic_value(property: &PropertyRecord) -> StrategicValue {
    let mut recommendations =
        vec!["Monitor district-level transaction prices quarterly".to_string()];

    if property.ownership_status != OwnershipStatus::Certified {
        recommendations.push(
            "Prioritize completing title certification to unlock financing and resale value"
                .to_string(),
        );
    }
    if matches!(
        property.condition_or_default(),
        PropertyCondition::Poor | PropertyCondition::NeedsRenovation
    ) {
        recommendations.push("Schedule renovation to lift the achievable unit price".to_string());
    }

    recommendations.push("Review zoning and land-use plans for upcoming changes".to_string());
    recommendations.push("Keep tax, permit, and title documentation current".to_string());

    StrategicValue {
        highest_and_best_use: highest_and_best_use(property.asset_category).to_string(),
        upside_potential: upside_potential(property).to_string(),
        recommendations,
    }
}

fn market_trend(property: &PropertyRecord) -> MarketTrend {
    MarketTrend {
        direction: TrendDirection::Stable,
        summary: format!(
            "Estimated from regional price tables for {}; live market signals were not consulted",
            property.city
        ),
        factors: vec![
            "Regional base price table".to_string(),
            "District classification".to_string(),
            "Title and condition adjustments".to_string(),
        ],
    }
}

pub struct FallbackValuationEngine;

impl FallbackValuationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Computes a deterministic valuation. The only rejected input is a
    /// non-positive or non-finite land area; every other missing or odd
    /// field degrades to a documented default.
    pub fn valuate(&self, property: &PropertyRecord) -> Result<ValuationRecord> {
        if !property.land_area.is_finite() || property.land_area <= 0.0 {
            return Err(AppError::ValidationError(format!(
                "land area must be a positive number, got {}",
                property.land_area
            )));
        }

        let base_price = resolve_base_price(property.asset_category, &property.city);
        let unit_price = base_price
            * district_multiplier(&property.district, &property.city)
            * condition_multiplier(property.condition_or_default())
            * ownership_multiplier(property.ownership_status);
        let estimated_value = unit_price * property.land_area;

        Ok(ValuationRecord {
            estimated_value,
            unit_price,
            confidence_score: calculate_confidence(property),
            valuation_method: ValuationMethod::FallbackHeuristic,
            market_trend: market_trend(property),
            comparables: generate_comparables(property, unit_price),
            risk_assessment: assess_risk(property),
            strategic_value: strategic_value(property),
            notes: Some(
                "Deterministic estimate from regional price tables; no market listings were consulted"
                    .to_string(),
            ),
            valuated_at: None,
        })
    }
}

impl Default for FallbackValuationEngine {
    fn default() -> Self {
        Self::new()
    }
}
