//! Topic title domain
//!
//! `POST /json/ai/suggest_topic_title` proposes a new topic title for the
//! latest batch of messages, or an empty string when the current one still
//! fits or the batch is too thin to judge.

mod resolver;
pub mod types;

pub use types::*;

use actix_web::{
    post,
    web::{self, Bytes, Data},
    HttpRequest, HttpResponse,
};
use log::{debug, error, info};

use crate::dto::FormFields;
use crate::error::Result;
use crate::middleware::extract_trace_id;
use crate::server::AppState;
use crate::services::topic_gate;
use crate::services::topic_title_service::suggest_topic_title;

const SUGGESTION_MAX_TOKENS: u32 = 40;
const LOGGED_IDS: usize = 5;

#[post("/suggest_topic_title")]
pub async fn suggest_title(
    app_state: Data<AppState>,
    http_req: HttpRequest,
    body: Bytes,
) -> Result<HttpResponse> {
    let trace_id = extract_trace_id(&http_req);
    let form = FormFields::from_request(&http_req, &body);
    let request = TopicTitleRequest::from_form(&form)?;

    let recent_ids = &request.message_ids[request.message_ids.len().saturating_sub(LOGGED_IDS)..];
    info!(
        "topic_title: message_id={:?} message_ids={:?} current_title={:?} keys={:?} trace_id={:?}",
        request.message_id,
        recent_ids,
        request.current_title,
        form.keys(),
        trace_id
    );

    let anchor_id = request.anchor_id;
    let texts = resolver::resolve_texts(app_state.message_store.as_ref(), &request).await?;

    let decision = topic_gate::evaluate(&texts, &request.current_title);
    if !decision.should_suggest() {
        debug!("topic_title: skipped ({:?}) anchor_id={}", decision, anchor_id);
        return Ok(HttpResponse::Ok().json(TopicTitleResponse {
            suggested_title: String::new(),
            anchor_id,
        }));
    }

    let settings = app_state.llm_settings.clone();
    let current_title = request.current_title;
    let suggested = actix_web::rt::spawn(async move {
        suggest_topic_title(
            &settings,
            &texts,
            Some(current_title.as_str()),
            SUGGESTION_MAX_TOKENS,
        )
        .await
    })
    .await
    .unwrap_or_else(|err| {
        error!("suggest_topic_title failed: {}", err);
        String::new()
    });

    Ok(HttpResponse::Ok().json(TopicTitleResponse {
        suggested_title: suggested.trim().to_string(),
        anchor_id,
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(suggest_title);
}
