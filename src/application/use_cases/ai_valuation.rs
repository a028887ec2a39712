//! AI-assisted valuation path.
//!
//! Builds the appraisal prompt, calls the injected LLM client, and parses
//! the JSON reply into a [`ValuationRecord`]. Any reply missing a usable
//! estimated value is a `ParseError`, which the orchestrator treats as a
//! signal to run the deterministic fallback engine instead.

use crate::application::use_cases::fallback_valuation;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::domain::property::PropertyRecord;
use crate::domain::valuation::{
    Comparable, MarketTrend, RiskAssessment, StrategicValue, ValuationMethod, ValuationRecord,
};
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::response::{clean_llm_response, extract_json_payload};
use serde::Deserialize;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a licensed property appraiser working the Indonesian market. \
Estimate the market value of the property described by the user in IDR without subdivision. \
Respond with a single JSON object and nothing else, using these camelCase keys: \
estimatedValue (number, required), confidenceScore (number in [0,1]), \
marketTrend {direction: RISING|STABLE|DECLINING, summary, factors[]}, \
comparables [{address, district, city, landArea, buildingArea, assetCategory, transactionPrice, unitPrice, distanceKm, similarityScore, dataSource: MARKET_ESTIMATE|LISTING|TRANSACTION}], \
riskAssessment {overallLevel: LOW|MEDIUM|HIGH, factors[], mitigations[]}, \
strategicValue {highestAndBestUse, upsidePotential, recommendations[]}, \
notes.";

/// Reply shape accepted from the model. Only the estimated value is
/// mandatory; every other section degrades to the rule-derived equivalent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AiValuationReply {
    estimated_value: f64,
    confidence_score: Option<f64>,
    market_trend: Option<MarketTrend>,
    comparables: Option<Vec<Comparable>>,
    risk_assessment: Option<RiskAssessment>,
    strategic_value: Option<StrategicValue>,
    notes: Option<String>,
}

pub struct AiValuationUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
}

impl AiValuationUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    pub async fn estimate(
        &self,
        config: &LLMConfig,
        property: &PropertyRecord,
    ) -> Result<ValuationRecord> {
        let user_prompt = build_user_prompt(property)?;
        let raw = self
            .llm_client
            .generate(config, SYSTEM_PROMPT, &user_prompt)
            .await?;
        parse_reply(&raw, property)
    }
}

fn build_user_prompt(property: &PropertyRecord) -> Result<String> {
    let body = serde_json::to_string_pretty(property)
        .map_err(|e| AppError::Internal(format!("Failed to serialize property: {}", e)))?;
    Ok(format!(
        "Appraise the following property and reply with the JSON object only:\n{}",
        body
    ))
}

/// Parses a raw LLM reply. The estimated value anchors the record: the unit
/// price is always recomputed from it so that unit price x land area equals
/// the total, whatever the model claimed.
fn parse_reply(raw: &str, property: &PropertyRecord) -> Result<ValuationRecord> {
    let payload = extract_json_payload(&clean_llm_response(raw));
    let reply: AiValuationReply = serde_json::from_str(&payload)
        .map_err(|e| AppError::ParseError(format!("Unparsable valuation reply: {}", e)))?;

    if !reply.estimated_value.is_finite() || reply.estimated_value < 0.0 {
        return Err(AppError::ParseError(format!(
            "Estimated value out of range: {}",
            reply.estimated_value
        )));
    }

    let unit_price = reply.estimated_value / property.land_area;

    let mut comparables = reply
        .comparables
        .unwrap_or_else(|| fallback_valuation::generate_comparables(property, unit_price));
    for comparable in &mut comparables {
        comparable.similarity_score = comparable.similarity_score.clamp(0.0, 1.0);
    }

    Ok(ValuationRecord {
        estimated_value: reply.estimated_value,
        unit_price,
        confidence_score: reply
            .confidence_score
            .unwrap_or_else(|| fallback_valuation::calculate_confidence(property))
            .clamp(0.0, 1.0),
        valuation_method: ValuationMethod::AiAssisted,
        market_trend: reply
            .market_trend
            .unwrap_or_else(|| fallback_market_trend(property)),
        comparables,
        risk_assessment: reply
            .risk_assessment
            .unwrap_or_else(|| fallback_valuation::assess_risk(property)),
        strategic_value: reply
            .strategic_value
            .unwrap_or_else(|| fallback_valuation::strategic_value(property)),
        notes: reply.notes,
        valuated_at: None,
    })
}

fn fallback_market_trend(property: &PropertyRecord) -> MarketTrend {
    use crate::domain::valuation::TrendDirection;
    MarketTrend {
        direction: TrendDirection::Stable,
        summary: format!(
            "Model reply omitted a market trend for {}; assuming a stable district market",
            property.city
        ),
        factors: vec!["No trend data in model reply".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::property::{AssetCategory, OwnershipStatus, PropertyCondition};
    use crate::domain::valuation::RiskLevel;

    fn property() -> PropertyRecord {
        PropertyRecord {
            address: "Jl. Diponegoro No. 7".to_string(),
            district: "Dago".to_string(),
            city: "Bandung".to_string(),
            province: "Jawa Barat".to_string(),
            land_area: 400.0,
            building_area: Some(250.0),
            asset_category: AssetCategory::Residential,
            zoning: Some("R-1".to_string()),
            land_use: None,
            ownership_status: OwnershipStatus::Certified,
            certificate_number: Some("SHM 42/Dago".to_string()),
            year_built: Some(2010),
            condition: Some(PropertyCondition::Good),
            description: None,
            features: None,
        }
    }

    #[test]
    fn parses_minimal_reply_and_recomputes_unit_price() {
        let raw = r#"{"estimatedValue": 4000000000.0}"#;
        let record = parse_reply(raw, &property()).unwrap();
        assert_eq!(record.valuation_method, ValuationMethod::AiAssisted);
        assert!((record.unit_price - 10_000_000.0).abs() < 1e-3);
        assert!((record.unit_price * 400.0 - record.estimated_value).abs() < 1e-3);
        // Omitted sections come from the rule tables.
        assert_eq!(record.comparables.len(), 2);
        assert_eq!(record.risk_assessment.overall_level, RiskLevel::Low);
    }

    #[test]
    fn parses_fenced_reply() {
        let raw = "```json\n{\"estimatedValue\": 1000000.0, \"confidenceScore\": 0.9}\n```";
        let record = parse_reply(raw, &property()).unwrap();
        assert!((record.confidence_score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn clamps_out_of_range_scores() {
        let raw = r#"{
            "estimatedValue": 1000000.0,
            "confidenceScore": 1.7,
            "comparables": [{
                "address": "Jl. Merdeka 1",
                "district": "Dago",
                "city": "Bandung",
                "landArea": 380.0,
                "buildingArea": null,
                "assetCategory": "RESIDENTIAL",
                "transactionPrice": 950000.0,
                "unitPrice": 2500.0,
                "distanceKm": 0.8,
                "similarityScore": 1.4,
                "dataSource": "LISTING"
            }]
        }"#;
        let record = parse_reply(raw, &property()).unwrap();
        assert_eq!(record.confidence_score, 1.0);
        assert_eq!(record.comparables[0].similarity_score, 1.0);
    }

    #[test]
    fn rejects_prose_without_json() {
        let raw = "I am sorry, I cannot value this property.";
        assert!(matches!(
            parse_reply(raw, &property()),
            Err(AppError::ParseError(_))
        ));
    }

    #[test]
    fn rejects_negative_estimate() {
        let raw = r#"{"estimatedValue": -5.0}"#;
        assert!(matches!(
            parse_reply(raw, &property()),
            Err(AppError::ParseError(_))
        ));
    }
}
