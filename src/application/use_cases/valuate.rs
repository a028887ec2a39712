//! Valuation orchestrator: AI path first, deterministic fallback second.

use crate::application::use_cases::ai_valuation::AiValuationUseCase;
use crate::application::use_cases::fallback_valuation::FallbackValuationEngine;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::domain::property::PropertyRecord;
use crate::domain::valuation::ValuationRecord;
use crate::infrastructure::db::ValuationRepository;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

pub struct ValuateUseCase {
    ai_valuation: AiValuationUseCase,
    engine: FallbackValuationEngine,
    repository: Arc<ValuationRepository>,
}

impl ValuateUseCase {
    pub fn new(ai_valuation: AiValuationUseCase, repository: Arc<ValuationRepository>) -> Self {
        Self {
            ai_valuation,
            engine: FallbackValuationEngine::new(),
            repository,
        }
    }

    /// Attempts the AI-assisted valuation and falls back to the
    /// deterministic engine on any failure, including unparsable replies.
    pub async fn execute(
        &self,
        config: &LLMConfig,
        property: PropertyRecord,
    ) -> Result<ValuationRecord> {
        validate_input(&property)?;

        let mut record = match self.ai_valuation.estimate(config, &property).await {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "AI valuation failed, using fallback engine");
                self.engine.valuate(&property)?
            }
        };
        record.valuated_at = Some(chrono::Utc::now());

        let id = self.repository.save(&property, &record).await?;
        info!(
            valuation_id = %id,
            method = ?record.valuation_method,
            estimated_value = record.estimated_value,
            "Valuation completed"
        );
        Ok(record)
    }

    /// Deterministic path only, for callers that want a reproducible figure
    /// without any external call.
    pub async fn execute_fallback(&self, property: PropertyRecord) -> Result<ValuationRecord> {
        validate_input(&property)?;

        let mut record = self.engine.valuate(&property)?;
        record.valuated_at = Some(chrono::Utc::now());

        let id = self.repository.save(&property, &record).await?;
        info!(valuation_id = %id, "Fallback valuation completed");
        Ok(record)
    }
}

fn validate_input(property: &PropertyRecord) -> Result<()> {
    property
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::property::{AssetCategory, OwnershipStatus};
    use crate::domain::valuation::ValuationMethod;
    use crate::infrastructure::llm_clients::LLMClient;
    use async_trait::async_trait;

    struct CannedClient {
        reply: std::result::Result<String, String>,
    }

    #[async_trait]
    impl LLMClient for CannedClient {
        async fn generate(&self, _: &LLMConfig, _: &str, _: &str) -> Result<String> {
            self.reply
                .clone()
                .map_err(AppError::LLMError)
        }
    }

    fn use_case(reply: std::result::Result<String, String>) -> ValuateUseCase {
        let client = Arc::new(CannedClient { reply });
        ValuateUseCase::new(
            AiValuationUseCase::new(client),
            Arc::new(ValuationRepository::new()),
        )
    }

    fn property() -> PropertyRecord {
        PropertyRecord {
            address: "Jl. Pemuda No. 12".to_string(),
            district: "Rungkut".to_string(),
            city: "Surabaya".to_string(),
            province: "Jawa Timur".to_string(),
            land_area: 300.0,
            building_area: None,
            asset_category: AssetCategory::Commercial,
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

    #[tokio::test]
    async fn uses_ai_reply_when_parsable() {
        let uc = use_case(Ok(r#"{"estimatedValue": 5000000000.0}"#.to_string()));
        let record = uc.execute(&LLMConfig::default(), property()).await.unwrap();
        assert_eq!(record.valuation_method, ValuationMethod::AiAssisted);
        assert!(record.valuated_at.is_some());
    }

    #[tokio::test]
    async fn falls_back_when_llm_call_fails() {
        let uc = use_case(Err("provider down".to_string()));
        let record = uc.execute(&LLMConfig::default(), property()).await.unwrap();
        assert_eq!(record.valuation_method, ValuationMethod::FallbackHeuristic);
        // Commercial Surabaya standard district, no condition, certified:
        // 12_000_000 * 1.2 * 1.0 * 1.2
        assert!((record.unit_price - 17_280_000.0).abs() < 1.0);
    }

    #[tokio::test]
    async fn falls_back_when_reply_is_unparsable() {
        let uc = use_case(Ok("no json here, sorry".to_string()));
        let record = uc.execute(&LLMConfig::default(), property()).await.unwrap();
        assert_eq!(record.valuation_method, ValuationMethod::FallbackHeuristic);
    }

    #[tokio::test]
    async fn rejects_invalid_input_before_any_path() {
        let uc = use_case(Ok(r#"{"estimatedValue": 1.0}"#.to_string()));
        let mut subject = property();
        subject.land_area = -4.0;
        assert!(matches!(
            uc.execute(&LLMConfig::default(), subject).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn fallback_route_never_touches_the_client() {
        let uc = use_case(Err("would explode if called".to_string()));
        let record = uc.execute_fallback(property()).await.unwrap();
        assert_eq!(record.valuation_method, ValuationMethod::FallbackHeuristic);
    }
}
