//! JSON HTTP API over a single shared session.
//!
//! Every handler locks the session for its whole duration, so user actions are
//! processed one at a time.

use crate::SharedWorkshop;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use storyscribe_core::{ModelId, ScriptId, Temperature};
use storyscribe_error::{InputError, StoryscribeError, StoryscribeErrorKind, StoryscribeResult};
use storyscribe_session::{GenerationRequest, Session, SettingsUpdate};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    workshop: Arc<SharedWorkshop>,
    session: Arc<Mutex<Session>>,
}

impl ApiState {
    /// Serve `session` through `workshop`.
    pub fn new(workshop: SharedWorkshop, session: Session) -> Self {
        Self {
            workshop: Arc::new(workshop),
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Start a fresh session and serve it.
    ///
    /// # Errors
    ///
    /// Returns a storage or JSON error if the script list cannot be read.
    pub async fn start(workshop: SharedWorkshop) -> StoryscribeResult<Self> {
        let session = workshop.start().await?;
        Ok(Self::new(workshop, session))
    }
}

/// Create the API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/models", get(list_models))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/scripts", get(list_scripts).post(create_script))
        .route("/scripts/:id", put(update_script))
        .route("/scripts/:id/versions", get(list_versions))
        .route("/scripts/:id/preview", post(preview))
        .route("/scripts/:id/generate", post(generate))
        .route("/scripts/:id/versions/:number/export", get(export))
        .with_state(state)
}

/// Error response carrying a Storyscribe error.
#[derive(Debug)]
pub struct ApiError(StoryscribeError);

impl From<StoryscribeError> for ApiError {
    fn from(err: StoryscribeError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(InputError::new(rejection.body_text()).into())
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: &StoryscribeErrorKind) -> StatusCode {
    match kind {
        StoryscribeErrorKind::Input(_) => StatusCode::BAD_REQUEST,
        StoryscribeErrorKind::Config(_) | StoryscribeErrorKind::Capacity(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        StoryscribeErrorKind::Generation(_) => StatusCode::BAD_GATEWAY,
        StoryscribeErrorKind::Storage(_) | StoryscribeErrorKind::Json(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let status = status_for(kind);
        if status.is_server_error() {
            warn!(error = %self.0, status = %status, "Request failed");
        } else {
            debug!(error = %self.0, status = %status, "Request rejected");
        }
        let body = json!({
            "error": kind.label(),
            "message": kind.message(),
        });
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Request body, with malformed or invalid JSON reported as an input error.
type JsonBody<T> = Result<Json<T>, JsonRejection>;

/// Title and brief for creating or editing a script.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptFields {
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New brief
    #[serde(default)]
    pub brief: Option<String>,
}

/// Body of preview and generate requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftBody {
    /// Instruction for the new version
    #[serde(default)]
    pub prompt: String,
    /// Model override
    #[serde(default)]
    pub model: Option<ModelId>,
    /// Temperature override
    #[serde(default)]
    pub temperature: Option<Temperature>,
    /// Versions to include as context; keeps the current selection when absent
    #[serde(default)]
    pub selected: Option<Vec<u32>>,
}

impl DraftBody {
    fn request(&self) -> GenerationRequest {
        GenerationRequest {
            prompt: self.prompt.clone(),
            model: self.model,
            temperature: self.temperature,
        }
    }
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

async fn list_models(State(state): State<ApiState>) -> ApiResult<impl IntoResponse> {
    let catalog = state.workshop.catalog();
    let overviews = catalog
        .specs()
        .map(|spec| state.workshop.model_overview(*spec.model()))
        .collect::<StoryscribeResult<Vec<_>>>()?;
    Ok(Json(overviews))
}

async fn get_settings(State(state): State<ApiState>) -> impl IntoResponse {
    let session = state.session.lock().await;
    Json(session.settings().clone())
}

async fn update_settings(
    State(state): State<ApiState>,
    update: JsonBody<SettingsUpdate>,
) -> ApiResult<impl IntoResponse> {
    let Json(update) = update?;
    let mut session = state.session.lock().await;
    state.workshop.update_settings(&mut session, update)?;
    Ok(Json(session.settings().clone()))
}

async fn list_scripts(State(state): State<ApiState>) -> impl IntoResponse {
    let session = state.session.lock().await;
    Json(session.scripts().clone())
}

async fn create_script(
    State(state): State<ApiState>,
    fields: JsonBody<ScriptFields>,
) -> ApiResult<impl IntoResponse> {
    let Json(fields) = fields?;
    let mut session = state.session.lock().await;
    state
        .workshop
        .create_script(&mut session, fields.title, fields.brief)
        .await?;
    let script = session.require_script().map_err(StoryscribeError::from)?;
    Ok((StatusCode::CREATED, Json(script.clone())))
}

/// Open `id` unless it is already the current script.
async fn ensure_open(
    workshop: &SharedWorkshop,
    session: &mut Session,
    id: &ScriptId,
) -> StoryscribeResult<()> {
    if session.current().as_ref() != Some(id) {
        workshop.open_script(session, id).await?;
    }
    Ok(())
}

async fn update_script(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    fields: JsonBody<ScriptFields>,
) -> ApiResult<impl IntoResponse> {
    let Json(fields) = fields?;
    let id = ScriptId::new(id);
    let mut session = state.session.lock().await;
    ensure_open(&state.workshop, &mut session, &id).await?;
    let changed = state
        .workshop
        .update_script(&mut session, fields.title, fields.brief)
        .await?;
    let script = session.require_script().map_err(StoryscribeError::from)?;
    Ok(Json(json!({"changed": changed, "script": script})))
}

async fn list_versions(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = ScriptId::new(id);
    let mut session = state.session.lock().await;
    ensure_open(&state.workshop, &mut session, &id).await?;
    Ok(Json(session.versions().clone()))
}

/// Open the script and apply the body's selection.
async fn prepare_draft(
    workshop: &SharedWorkshop,
    session: &mut Session,
    id: &ScriptId,
    body: &DraftBody,
) -> StoryscribeResult<()> {
    ensure_open(workshop, session, id).await?;
    if let Some(selected) = &body.selected {
        session.select_versions(selected.iter().copied())?;
    }
    Ok(())
}

async fn preview(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    body: JsonBody<DraftBody>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let id = ScriptId::new(id);
    let mut session = state.session.lock().await;
    prepare_draft(&state.workshop, &mut session, &id, &body).await?;
    let preview = state.workshop.preview(&session, &body.request())?;
    Ok(Json(preview))
}

async fn generate(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    body: JsonBody<DraftBody>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let id = ScriptId::new(id);
    let mut session = state.session.lock().await;
    prepare_draft(&state.workshop, &mut session, &id, &body).await?;
    let version = state
        .workshop
        .generate(&mut session, &body.request())
        .await?;
    Ok((StatusCode::CREATED, Json(version)))
}

async fn export(
    State(state): State<ApiState>,
    Path((id, number)): Path<(String, u32)>,
) -> ApiResult<impl IntoResponse> {
    let id = ScriptId::new(id);
    let mut session = state.session.lock().await;
    ensure_open(&state.workshop, &mut session, &id).await?;
    let export = state.workshop.export(&session, number)?;
    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename()),
        ),
    ];
    Ok((headers, export.content().clone()))
}
