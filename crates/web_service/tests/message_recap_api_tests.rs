//! HTTP tests for POST /json/ai/message_recap

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use chat_core::{LlmSettings, MessageRef};
use serde_json::{json, Value};
use web_service::{app_config, storage::InMemoryMessageStore, AppState};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn seeded_store() -> Arc<InMemoryMessageStore> {
    Arc::new(InMemoryMessageStore::from_messages(vec![
        MessageRef::new(1, "We agreed to ship the beta on Friday."),
        MessageRef::new(2, "QA needs the build by Wednesday\nat the latest."),
        MessageRef::new(3, "<b>Reminder</b>: update the changelog & docs."),
    ]))
}

fn app_state(settings: LlmSettings) -> web::Data<AppState> {
    web::Data::new(AppState::new(settings, seeded_store()))
}

fn llm_settings(base: &str) -> LlmSettings {
    LlmSettings::default()
        .with_api_key("sk-test")
        .with_api_base(base)
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

#[actix_web::test]
async fn test_recap_without_api_key_returns_escaped_fallback() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(LlmSettings::default()))
            .configure(app_config),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/json/ai/message_recap")
        .set_form([("message_ids", "3"), ("message_ids", "1")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let html = body["recap_html"].as_str().unwrap();
    assert!(html.starts_with("<p><strong>Recap (fallback):</strong></p><pre>"));
    assert!(html.contains("&lt;b&gt;Reminder&lt;/b&gt;: update the changelog &amp; docs."));
    assert!(html.contains("\n\n---\n\nWe agreed to ship"));

    let refs = body["message_refs"].as_array().unwrap();
    assert_eq!(refs.len(), 2);
    assert_eq!(refs[0]["message_id"], 3);
    assert_eq!(refs[0]["anchor"], "/#narrow/near/3");
    assert_eq!(refs[1]["message_id"], 1);
}

#[actix_web::test]
async fn test_recap_calls_llm_and_sanitizes_output() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 800,
            "temperature": 0.2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "```html\n<p>Beta ships <strong>Friday</strong>.</p><script>alert(1)</script>\n```",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(app_state(llm_settings(&mock_server.uri())))
            .configure(app_config),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/json/ai/message_recap")
        .set_json(json!({"message_ids": [1, "2"]}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let html = body["recap_html"].as_str().unwrap();
    assert_eq!(
        html,
        "<div class=\"ai-recap\"><p>Beta ships <strong>Friday</strong>.</p></div>"
    );

    let refs = body["message_refs"].as_array().unwrap();
    assert_eq!(refs.len(), 2);
    assert_eq!(
        refs[1]["snippet"],
        "QA needs the build by Wednesday at the latest."
    );
}

#[actix_web::test]
async fn test_recap_upstream_error_falls_back() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(app_state(llm_settings(&mock_server.uri())))
            .configure(app_config),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/json/ai/message_recap")
        .set_form([("message_ids", "1")])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let html = body["recap_html"].as_str().unwrap();
    assert!(html.contains("Recap (fallback)"));
    assert!(html.contains("We agreed to ship the beta on Friday."));
}

#[actix_web::test]
async fn test_recap_empty_completion() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("")))
        .mount(&mock_server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(app_state(llm_settings(&mock_server.uri())))
            .configure(app_config),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/json/ai/message_recap")
        .set_form([("message_ids", "2")])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["recap_html"], "<p>(empty recap)</p>");
}

#[actix_web::test]
async fn test_recap_unsupported_provider_never_calls_upstream() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("<p>x</p>")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let settings = llm_settings(&mock_server.uri()).with_provider("anthropic");
    let app = test::init_service(
        App::new()
            .app_data(app_state(settings))
            .configure(app_config),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/json/ai/message_recap")
        .set_form([("message_ids", "1")])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["recap_html"]
        .as_str()
        .unwrap()
        .contains("Recap (fallback)"));
}

#[actix_web::test]
async fn test_recap_unknown_ids_give_no_messages() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(LlmSettings::default()))
            .configure(app_config),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/json/ai/message_recap")
        .set_form([("message_ids", "404"), ("message_ids", "405")])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["recap_html"], "<p>(no messages)</p>");
    assert_eq!(body["message_refs"], json!([]));
}

#[actix_web::test]
async fn test_recap_validation_errors() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(LlmSettings::default()))
            .configure(app_config),
    )
    .await;

    let too_many: Vec<i64> = (1..=201).collect();
    let cases = vec![
        (
            test::TestRequest::post()
                .uri("/json/ai/message_recap")
                .to_request(),
            "message_ids is required",
        ),
        (
            test::TestRequest::post()
                .uri("/json/ai/message_recap")
                .set_form([("message_ids", "1"), ("message_ids", "two")])
                .to_request(),
            "message_ids must be integers",
        ),
        (
            test::TestRequest::post()
                .uri("/json/ai/message_recap")
                .set_json(json!({ "message_ids": too_many }))
                .to_request(),
            "Too many messages requested (max 200)",
        ),
        (
            test::TestRequest::post()
                .uri("/json/ai/message_recap")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json")
                .to_request(),
            "message_ids is required",
        ),
    ];

    for (req, expected) in cases {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["message"], expected);
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }
}
