use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use chat_core::LlmSettings;
use log::{error, info};

use crate::config::ServerConfig;
use crate::controllers::{message_recap, system_controller, topic_title};
use crate::middleware::TracingMiddleware;
use crate::storage::MessageStore;

pub struct AppState {
    pub llm_settings: LlmSettings,
    pub message_store: Arc<dyn MessageStore>,
}

impl AppState {
    pub fn new(llm_settings: LlmSettings, message_store: Arc<dyn MessageStore>) -> Self {
        Self {
            llm_settings,
            message_store,
        }
    }
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(system_controller::config).service(
        web::scope("/json/ai")
            .configure(message_recap::config)
            .configure(topic_title::config),
    );
}

pub async fn run(config: ServerConfig, app_state: AppState) -> Result<(), String> {
    if app_state.llm_settings.api_key().is_none() {
        info!("LLM API key not configured; AI endpoints will use fallbacks");
    } else {
        info!(
            "LLM provider={} recap_model={} topic_model={}",
            app_state.llm_settings.provider,
            app_state.llm_settings.recap_model,
            app_state.llm_settings.topic_model
        );
    }

    let app_state = web::Data::new(app_state);
    let bind_address = config.bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(TracingMiddleware)
            .wrap(Cors::permissive())
            .configure(app_config)
    })
    .workers(config.workers)
    .bind(&bind_address)
    .map_err(|e| format!("Failed to bind server: {e}"))?
    .run();

    info!("Starting web service on http://{bind_address}");

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
        return Err(format!("Web server error: {e}"));
    }

    Ok(())
}
