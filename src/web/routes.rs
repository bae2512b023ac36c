use actix_cors::Cors;
use actix_web::{error, web};
use log::warn;

use crate::config::Config;
use crate::web::error::ChatError;
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(handlers::index))
        .route("/health", web::get().to(handlers::health_check))
        .route("/chat", web::post().to(handlers::chat));
}

/// CORS policy for every route. `*` in `ALLOWED_ORIGINS` allows any origin.
pub fn cors(config: &Config) -> Cors {
    if config.allows_any_origin() {
        return Cors::permissive();
    }

    config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

// Malformed bodies get the same `{ "detail" }` shape as other client errors.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected chat body: {}", err);
        let detail = match &err {
            error::JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
            other => other.to_string(),
        };
        ChatError::Validation(detail).into()
    })
}
