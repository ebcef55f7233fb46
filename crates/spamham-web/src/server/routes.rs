use crate::pages::{IndexPage, Outcome, EMPTY_MESSAGE_WARNING};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use spamham_core::{Error, Label, ModelName};
use tracing::{error, warn};

// ============================================================================
// Health and metrics
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics_handle {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics exporter not installed").into_response(),
    }
}

// ============================================================================
// HTML form
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub model: String,
}

pub async fn index(State(state): State<AppState>) -> Response {
    let models = state.handler.available_models();
    render(&state, StatusCode::OK, &IndexPage::empty(&models))
}

pub async fn submit(State(state): State<AppState>, Form(form): Form<PredictForm>) -> Response {
    let models = state.handler.available_models();
    let page = IndexPage::submitted(&models, &form.message, &form.model);

    match state.handler.predict(&form.message, &form.model) {
        Ok(label) => render(&state, StatusCode::OK, &page.with_outcome(Outcome::label(label))),
        Err(Error::EmptyInput) => render(
            &state,
            StatusCode::OK,
            &page.with_outcome(Outcome::Warning {
                text: EMPTY_MESSAGE_WARNING.to_string(),
            }),
        ),
        Err(e) => {
            let status = status_for(&e);
            render(
                &state,
                status,
                &page.with_outcome(Outcome::Error {
                    text: e.to_string(),
                }),
            )
        }
    }
}

fn render(state: &AppState, status: StatusCode, page: &IndexPage<'_>) -> Response {
    match state.pages.render_index(page) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

// ============================================================================
// JSON API
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub label: Label,
    pub model: ModelName,
}

pub async fn api_predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let label = state.handler.predict(&req.text, &req.model)?;
    // predict only succeeds for a valid, loaded model name
    let model = req.model.parse()?;
    Ok(Json(PredictResponse { label, model }))
}

pub async fn api_models(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "models": state.handler.available_models() }))
}

/// Error response for the JSON API
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// User mistakes are 422, everything else is a server fault
fn status_for(err: &Error) -> StatusCode {
    if err.is_user_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        warn!("Prediction failed: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
