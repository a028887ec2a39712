pub mod error;
pub mod llm_config;
pub mod property;
pub mod valuation;
