pub mod use_cases;

pub use use_cases::ai_valuation::AiValuationUseCase;
pub use use_cases::fallback_valuation::FallbackValuationEngine;
pub use use_cases::valuate::ValuateUseCase;
