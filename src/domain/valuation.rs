use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::property::AssetCategory;

/// How the valuation was produced.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValuationMethod {
    AiAssisted,
    FallbackHeuristic,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    Rising,
    Stable,
    Declining,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketTrend {
    pub direction: TrendDirection,
    pub summary: String,
    pub factors: Vec<String>,
}

/// Where a comparable listing came from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
    MarketEstimate,
    Listing,
    Transaction,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comparable {
    pub address: String,
    pub district: String,
    pub city: String,
    pub land_area: f64,
    pub building_area: Option<f64>,
    pub asset_category: AssetCategory,
    pub transaction_price: Option<f64>,
    pub unit_price: Option<f64>,
    /// Distance from the subject property in kilometers.
    pub distance_km: Option<f64>,
    /// Similarity to the subject property, clamped to [0, 1].
    pub similarity_score: f64,
    pub data_source: DataSource,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub overall_level: RiskLevel,
    pub factors: Vec<String>,
    pub mitigations: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrategicValue {
    pub highest_and_best_use: String,
    pub upside_potential: String,
    pub recommendations: Vec<String>,
}

/// Valuation output. A fresh record is produced per call; it has no identity
/// and is never mutated after construction. `valuated_at` is stamped by the
/// orchestration layer, never by the deterministic engine.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRecord {
    /// Total estimated market value in IDR, no subdivision.
    pub estimated_value: f64,
    /// Value per square meter of land, in IDR.
    pub unit_price: f64,
    /// Data-completeness-driven trust in the valuation, in [0, 1].
    pub confidence_score: f64,
    pub valuation_method: ValuationMethod,
    pub market_trend: MarketTrend,
    pub comparables: Vec<Comparable>,
    pub risk_assessment: RiskAssessment,
    pub strategic_value: StrategicValue,
    pub notes: Option<String>,
    pub valuated_at: Option<DateTime<Utc>>,
}
