pub mod ai_valuation;
pub mod fallback_valuation;
pub mod valuate;
