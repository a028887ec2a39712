use crate::application::ValuateUseCase;
use crate::domain::error::AppError;
use crate::domain::llm_config::LLMConfig;
use crate::domain::property::PropertyRecord;
use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

pub struct HttpState {
    pub valuate_use_case: Arc<ValuateUseCase>,
    /// Server-side LLM settings used when a request carries no override.
    pub default_llm: LLMConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRequest {
    pub property: PropertyRecord,
    #[serde(default)]
    pub config: Option<LLMConfig>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

fn error_response(err: AppError) -> HttpResponse {
    match err {
        AppError::ValidationError(_) => HttpResponse::BadRequest().body(err.to_string()),
        _ => HttpResponse::InternalServerError().body(err.to_string()),
    }
}

#[post("/valuations")]
async fn valuate(data: web::Data<HttpState>, req: web::Json<ValuationRequest>) -> impl Responder {
    let ValuationRequest { property, config } = req.into_inner();
    let config = config.unwrap_or_else(|| data.default_llm.clone());

    info!(
        city = %property.city,
        district = %property.district,
        category = ?property.asset_category,
        "Valuation requested"
    );

    match data.valuate_use_case.execute(&config, property).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => error_response(e),
    }
}

#[post("/valuations/fallback")]
async fn valuate_fallback(
    data: web::Data<HttpState>,
    req: web::Json<ValuationRequest>,
) -> impl Responder {
    let property = req.into_inner().property;

    info!(
        city = %property.city,
        district = %property.district,
        "Fallback valuation requested"
    );

    match data.valuate_use_case.execute_fallback(property).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => error_response(e),
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

pub fn start_server(state: web::Data<HttpState>, host: &str, port: u16) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Frontend runs on a separate dev origin

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(health)
            .service(
                web::scope("/api")
                    .service(valuate)
                    .service(valuate_fallback),
            )
    })
    .bind((host, port))?
    .run();

    Ok(server)
}
