mod config;
mod formatter;
mod model;
mod web;

use std::sync::Arc;

use actix_web::{web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info, warn};

use config::Config;
use formatter::Formatter;
use model::{CompletionModel, GeminiModel};
use web::routes;

// App state structure
pub struct AppState {
    pub config: Config,
    pub model: Arc<dyn CompletionModel>,
    pub formatter: Formatter,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting chat formatter API");

    let config = Config::from_env();
    if config.api_key.is_none() {
        warn!("GEMINI_API_KEY not found in environment variables; /chat will fail until it is set");
    }

    let model = match GeminiModel::new(&config) {
        Ok(model) => model,
        Err(e) => {
            error!("Failed to initialize Gemini client: {}", e);
            std::process::exit(1);
        }
    };

    let formatter = match Formatter::new() {
        Ok(formatter) => formatter,
        Err(e) => {
            error!("Failed to compile formatting rules: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Formatting pipeline: {}",
        formatter.rule_names().collect::<Vec<_>>().join(" -> ")
    );

    if config.allows_any_origin() {
        info!("CORS: allowing any origin");
    } else {
        info!("CORS: allowing {}", config.allowed_origins.join(", "));
    }

    let bind = (config.host.clone(), config.port);
    let app_state = Data::new(AppState {
        config,
        model: Arc::new(model),
        formatter,
    });

    info!("Listening on {}:{}", bind.0, bind.1);

    // Start web server
    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors(&app_state.config))
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await
}
