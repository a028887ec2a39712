use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Service settings, merged from defaults, an optional `taksir.toml`, and
/// `TAKSIR_`-prefixed environment variables (e.g. `TAKSIR_LLM__API_KEY`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub llm: LLMConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            llm: LLMConfig::default(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("taksir.toml"))
            .merge(Env::prefixed("TAKSIR_").split("__"))
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm_config::LLMProvider;

    #[test]
    fn defaults_bind_loopback() {
        let settings = Settings::default();
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.llm.provider, LLMProvider::Gemini);
        assert!(settings.llm.api_key.is_none());
    }
}
