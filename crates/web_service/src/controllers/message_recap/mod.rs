//! Message recap domain
//!
//! `POST /json/ai/message_recap` summarizes a batch of messages into HTML and
//! returns a link plus snippet for each message it used.

pub mod types;

pub use types::*;

use actix_web::{
    post,
    web::{self, Bytes, Data},
    HttpRequest, HttpResponse,
};
use log::{error, info};

use crate::dto::{FormFields, MessageRefDTO};
use crate::error::{AppError, Result};
use crate::middleware::extract_trace_id;
use crate::server::AppState;
use crate::services::message_lookup::fetch_in_request_order;
use crate::services::recap_service::{generate_message_recap, DEFAULT_RECAP_MAX_TOKENS};

#[post("/message_recap")]
pub async fn message_recap(
    app_state: Data<AppState>,
    http_req: HttpRequest,
    body: Bytes,
) -> Result<HttpResponse> {
    let trace_id = extract_trace_id(&http_req);
    let form = FormFields::from_request(&http_req, &body);
    let raw_ids = types::collect_raw_ids(&form, &body);
    let message_ids = types::parse_message_ids(&raw_ids)?;

    let messages = fetch_in_request_order(app_state.message_store.as_ref(), &message_ids)
        .await
        .map_err(|err| {
            error!("message_recap: message lookup failed: {}", err);
            AppError::RecapFailed
        })?;
    info!(
        "message_recap: requested={} found={} trace_id={:?}",
        message_ids.len(),
        messages.len(),
        trace_id
    );

    let texts: Vec<String> = messages.iter().map(|m| m.text.clone()).collect();
    let ordered_ids: Vec<i64> = messages.iter().map(|m| m.id).collect();
    let settings = app_state.llm_settings.clone();

    let recap_html = actix_web::rt::spawn(async move {
        generate_message_recap(&settings, &texts, &ordered_ids, DEFAULT_RECAP_MAX_TOKENS).await
    })
    .await
    .map_err(|err| {
        error!("generate_message_recap failed: {}", err);
        AppError::RecapFailed
    })?;

    let message_refs = messages.iter().map(MessageRefDTO::from).collect();

    Ok(HttpResponse::Ok().json(MessageRecapResponse {
        recap_html,
        message_refs,
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(message_recap);
}
