use std::sync::Arc;

use actix_web::web;
use tracing::info;

use crate::application::{AiValuationUseCase, ValuateUseCase};
use crate::infrastructure::config::Settings;
use crate::infrastructure::db::ValuationRepository;
use crate::infrastructure::llm_clients::RouterClient;
use crate::interfaces::http::{start_server, HttpState};

pub async fn run() -> std::io::Result<()> {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let settings = Settings::load().map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let llm_client = Arc::new(RouterClient::new());
    let repository = Arc::new(ValuationRepository::new());
    let valuate_use_case = Arc::new(ValuateUseCase::new(
        AiValuationUseCase::new(llm_client),
        repository,
    ));

    let state = web::Data::new(HttpState {
        valuate_use_case,
        default_llm: settings.llm.clone(),
    });

    info!(host = %settings.host, port = settings.port, "Starting valuation server");
    start_server(state, &settings.host, settings.port)?.await
}
