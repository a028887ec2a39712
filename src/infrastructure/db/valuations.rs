use crate::domain::error::Result;
use crate::domain::property::PropertyRecord;
use crate::domain::valuation::ValuationRecord;
use tracing::debug;
use uuid::Uuid;

/// Placeholder valuation store. Mints an id and logs the save; nothing is
/// written anywhere yet. The interface is async so callers do not change
/// when a real database lands behind it.
pub struct ValuationRepository;

impl ValuationRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn save(
        &self,
        property: &PropertyRecord,
        valuation: &ValuationRecord,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        debug!(
            valuation_id = %id,
            city = %property.city,
            district = %property.district,
            estimated_value = valuation.estimated_value,
            method = ?valuation.valuation_method,
            "Valuation save skipped (placeholder store)"
        );
        Ok(id)
    }
}

impl Default for ValuationRepository {
    fn default() -> Self {
        Self::new()
    }
}
