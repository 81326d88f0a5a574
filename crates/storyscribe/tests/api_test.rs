//! Tests for the HTTP API router.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use storyscribe::{
    GenerationDriver, GenerationError, GenerationErrorKind, GenerationResult, InMemoryStore,
    Message, ModelId, SharedWorkshop, StoryscribeConfig, Temperature, VersionStore, Workshop,
    api::{ApiState, create_router},
};
use tower::ServiceExt;

#[derive(Default)]
struct ScriptedDriver {
    replies: Mutex<VecDeque<GenerationResult<String>>>,
    calls: Mutex<usize>,
}

impl ScriptedDriver {
    fn replying(replies: Vec<GenerationResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(0),
        })
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl GenerationDriver for ScriptedDriver {
    async fn generate(
        &self,
        _messages: &[Message],
        _model: ModelId,
        _temperature: Temperature,
    ) -> GenerationResult<String> {
        *self.calls.lock().unwrap() += 1;
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("FADE IN: a rainy platform.".to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

async fn app_with(config: &StoryscribeConfig, driver: Arc<ScriptedDriver>) -> Router {
    let store: Arc<dyn VersionStore> = Arc::new(InMemoryStore::new());
    let driver: Arc<dyn GenerationDriver> = driver;
    let workshop: SharedWorkshop = Workshop::new(config, store, driver).unwrap();
    create_router(ApiState::start(workshop).await.unwrap())
}

async fn app(driver: Arc<ScriptedDriver>) -> Router {
    let config = StoryscribeConfig::from_toml_str("").unwrap();
    app_with(&config, driver).await
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn create(app: &Router, title: &str, brief: &str) -> String {
    let (status, script) = send(
        app,
        "POST",
        "/scripts",
        Some(json!({"title": title, "brief": brief})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    script["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app(ScriptedDriver::replying(vec![])).await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_create_and_list_scripts() {
    let app = app(ScriptedDriver::replying(vec![])).await;
    let first = create(&app, "Night Train", "A conductor vanishes.").await;
    let second = create(&app, "", "").await;
    assert_ne!(first, second);

    let (status, scripts) = send(&app, "GET", "/scripts", None).await;
    assert_eq!(status, StatusCode::OK);
    let scripts = scripts.as_array().unwrap();
    assert_eq!(scripts.len(), 2);
    assert_eq!(scripts[0]["title"], "Night Train");
    assert_eq!(scripts[1]["title"], "New script");
}

#[tokio::test]
async fn test_update_script_reports_change() {
    let app = app(ScriptedDriver::replying(vec![])).await;
    let id = create(&app, "Night Train", "A conductor vanishes.").await;

    let uri = format!("/scripts/{}", id);
    let (status, body) = send(&app, "PUT", &uri, Some(json!({"title": "Last Stop"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], true);
    assert_eq!(body["script"]["title"], "Last Stop");
    assert_eq!(body["script"]["brief"], "A conductor vanishes.");

    let (_, body) = send(&app, "PUT", &uri, Some(json!({"title": "Last Stop"}))).await;
    assert_eq!(body["changed"], false);
}

#[tokio::test]
async fn test_generate_numbers_versions() {
    let driver = ScriptedDriver::replying(vec![Ok("Draft one".into()), Ok("Draft two".into())]);
    let app = app(driver.clone()).await;
    let id = create(&app, "Night Train", "A conductor vanishes.").await;

    let uri = format!("/scripts/{}/generate", id);
    let (status, first) = send(&app, "POST", &uri, Some(json!({"prompt": "Opening"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["version_number"], 1);
    assert_eq!(first["content"], "Draft one");

    let (status, second) = send(
        &app,
        "POST",
        &uri,
        Some(json!({"prompt": "Make it darker", "selected": [1]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["version_number"], 2);
    assert_eq!(
        second["context"],
        json!(["Brief Summary", "Previous Version 1", "Current Request"])
    );

    let (status, versions) = send(&app, "GET", &format!("/scripts/{}/versions", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(versions.as_array().unwrap().len(), 2);
    assert_eq!(driver.calls(), 2);
}

#[tokio::test]
async fn test_preview_reports_parts_and_cost() {
    let app = app(ScriptedDriver::replying(vec![])).await;
    let id = create(&app, "Night Train", "A conductor vanishes.").await;

    let (status, preview) = send(
        &app,
        "POST",
        &format!("/scripts/{}/preview", id),
        Some(json!({"prompt": "Opening", "model": "gpt-4o"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["model"], "gpt-4o");
    assert_eq!(preview["estimated_output_tokens"], 1000);
    assert_eq!(preview["context_window"], 128000);
    assert_eq!(preview["exceeds_context"], false);
    let labels: Vec<&str> = preview["parts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|part| part["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Brief Summary", "Current Request"]);
    assert!(preview["estimated_cost"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_empty_prompt_is_bad_request() {
    let driver = ScriptedDriver::replying(vec![]);
    let app = app(driver.clone()).await;
    let id = create(&app, "Night Train", "").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/scripts/{}/generate", id),
        Some(json!({"prompt": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "input");
    assert_eq!(driver.calls(), 0);
}

#[tokio::test]
async fn test_unknown_selection_is_bad_request() {
    let app = app(ScriptedDriver::replying(vec![])).await;
    let id = create(&app, "Night Train", "").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/scripts/{}/preview", id),
        Some(json!({"prompt": "Opening", "selected": [7]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "input");
    assert!(body["message"].as_str().unwrap().contains("Version 7"));
}

#[tokio::test]
async fn test_unknown_script_is_bad_request() {
    let app = app(ScriptedDriver::replying(vec![])).await;
    let (status, body) = send(&app, "GET", "/scripts/19990101000000/versions", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "input");
}

#[tokio::test]
async fn test_generation_failure_is_bad_gateway_and_not_saved() {
    let driver = ScriptedDriver::replying(vec![Err(GenerationError::new(
        GenerationErrorKind::RateLimit("quota exceeded".into()),
    ))]);
    let app = app(driver.clone()).await;
    let id = create(&app, "Night Train", "A conductor vanishes.").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/scripts/{}/generate", id),
        Some(json!({"prompt": "Opening"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "generation");
    assert!(body["message"].as_str().unwrap().contains("quota exceeded"));

    let (_, versions) = send(&app, "GET", &format!("/scripts/{}/versions", id), None).await;
    assert!(versions.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_request_is_rejected_before_sending() {
    let config = StoryscribeConfig::from_toml_str(
        r#"
[models."gpt-4o-mini"]
context_window = 10
"#,
    )
    .unwrap();
    let driver = ScriptedDriver::replying(vec![]);
    let app = app_with(&config, driver.clone()).await;
    let id = create(&app, "Night Train", "A conductor vanishes on the last train home.").await;

    let (status, preview) = send(
        &app,
        "POST",
        &format!("/scripts/{}/preview", id),
        Some(json!({"prompt": "Opening"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["exceeds_context"], true);
    assert!(preview["remaining_tokens"].as_i64().unwrap() < 0);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/scripts/{}/generate", id),
        Some(json!({"prompt": "Opening"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "capacity");
    assert_eq!(driver.calls(), 0);
}

#[tokio::test]
async fn test_settings_round_trip() {
    let app = app(ScriptedDriver::replying(vec![])).await;

    let (status, settings) = send(&app, "GET", "/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["model"], "gpt-4o-mini");

    let (status, settings) = send(
        &app,
        "PUT",
        "/settings",
        Some(json!({"model": "gpt-4o", "system_prompt": "Be brief."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["model"], "gpt-4o");
    assert_eq!(settings["system_prompt"], "Be brief.");

    let (status, body) = send(&app, "PUT", "/settings", Some(json!({"temperature": 1.5}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "input");
}

#[tokio::test]
async fn test_invalid_body_is_json_input_error() {
    let app = app(ScriptedDriver::replying(vec![])).await;
    let id = create(&app, "Night Train", "").await;
    let uri = format!("/scripts/{}/preview", id);

    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(json!({"prompt": "x", "temperature": 1.5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "input");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Temperature must be between 0 and 1"));
    assert!(!message.contains("temperature.rs"));

    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(json!({"prompt": "x", "model": "gpt-2"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "input");

    let request = Request::builder()
        .method("POST")
        .uri(&uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"prompt\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "input");
}

#[tokio::test]
async fn test_error_message_has_no_source_location() {
    let app = app(ScriptedDriver::replying(vec![])).await;
    let (status, body) = send(&app, "GET", "/scripts/19990101000000/versions", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert_eq!(message, "Script 19990101000000 does not exist");
}

#[tokio::test]
async fn test_models_include_rate_limits() {
    let app = app(ScriptedDriver::replying(vec![])).await;
    let (status, models) = send(&app, "GET", "/models", None).await;
    assert_eq!(status, StatusCode::OK);

    let models = models.as_array().unwrap();
    assert_eq!(models.len(), 3);
    let mini = models
        .iter()
        .find(|m| m["spec"]["model"] == "gpt-4o-mini")
        .unwrap();
    let names: Vec<&str> = mini["rate_limits"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["TPM", "RPM", "TPD", "RPD"]);
}

#[tokio::test]
async fn test_export_returns_text_attachment() {
    let app = app(ScriptedDriver::replying(vec![Ok("FADE IN.".into())])).await;
    let id = create(&app, "Night Train", "A conductor vanishes.").await;
    send(
        &app,
        "POST",
        &format!("/scripts/{}/generate", id),
        Some(json!({"prompt": "Opening"})),
    )
    .await;

    let request = Request::builder()
        .uri(format!("/scripts/{}/versions/1/export", id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"Night_Train_"));
    assert!(disposition.ends_with(".txt\""));
    assert!(!disposition.contains(':'));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"FADE IN.");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/scripts/{}/versions/9/export", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "input");
}

#[tokio::test]
async fn test_export_header_with_unsafe_title() {
    let app = app(ScriptedDriver::replying(vec![Ok("FADE IN.".into())])).await;
    let id = create(&app, "Act 1/2: \"Dawn\"", "").await;
    send(
        &app,
        "POST",
        &format!("/scripts/{}/generate", id),
        Some(json!({"prompt": "Opening"})),
    )
    .await;

    let request = Request::builder()
        .uri(format!("/scripts/{}/versions/1/export", id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"Act_1_2___Dawn__"));
    assert_eq!(disposition.matches('"').count(), 2);
    assert!(!disposition.contains('/'));
}
