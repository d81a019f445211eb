//! Local HTTP/JSON API over the aggregation services.
//!
//! Read-only GET endpoints mirroring the CLI queries, for home-automation
//! dashboards and scripts that want JSON without shelling out. Binds to
//! localhost only; the Canvas token never leaves the process.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;

use canvas_lens::api::users::{effective_student, UserRef};
use canvas_lens::services::due::{due_assignments, DueOptions};
use canvas_lens::services::missing::{
    missing_counts_by_course, missing_work, MissingOptions,
};
use canvas_lens::services::stats::{course_stats, StatsOptions};
use canvas_lens::services::status::{
    comprehensive_status, multi_student_status, StatusOptions,
};
use canvas_lens::services::todo::{todo_items, TodoOptions};
use canvas_lens::services::unsubmitted::{unsubmitted_assignments, UnsubmittedOptions};
use canvas_lens::services::courses::course_grades;
use canvas_lens::{CanvasClient, Config};

use crate::error::{CliError, CliResult};

struct ApiState {
    client: CanvasClient,
    config: Config,
}

type SharedState = Arc<ApiState>;

/// Errors rendered as `{"error": message}` with a 400 for bad requests
/// and a 500 for upstream failures.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<canvas_lens::Error> for ApiError {
    fn from(error: canvas_lens::Error) -> Self {
        let status = match &error {
            canvas_lens::Error::Config(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

type ApiResult = Result<Json<serde_json::Value>, ApiError>;

fn json_ok<T: serde::Serialize>(value: &T) -> ApiResult {
    serde_json::to_value(value)
        .map(Json)
        .map_err(|e| ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: e.to_string(),
        })
}

fn student(state: &ApiState, student_id: Option<&str>) -> Result<UserRef, ApiError> {
    effective_student(student_id, state.config.default_student_id.as_deref())
        .map_err(|e| ApiError::bad_request(e.to_string()))
}

pub fn app(client: CanvasClient, config: Config) -> Router {
    let state: SharedState = Arc::new(ApiState { client, config });
    Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi))
        .route("/api/courses", get(api_courses))
        .route("/api/todo", get(api_todo))
        .route("/api/missing", get(api_missing))
        .route("/api/due", get(api_due))
        .route("/api/unsubmitted", get(api_unsubmitted))
        .route("/api/stats", get(api_stats))
        .route("/api/status", get(api_status))
        .with_state(state)
}

/// Run the API server until the process is stopped.
pub async fn run(config: Config, port: u16) -> CliResult<()> {
    let client = CanvasClient::new(&config)?;
    let router = app(client, config);

    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .map_err(CliError::general)?;
    tracing::info!(port, "HTTP API listening on 127.0.0.1");

    axum::serve(listener, router)
        .await
        .map_err(CliError::general)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": canvas_lens::VERSION,
    }))
}

async fn openapi() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "openapi": "3.0.3",
        "info": {
            "title": "canvas-lens",
            "description": "Read-only Canvas LMS aggregation API",
            "version": canvas_lens::VERSION,
        },
        "paths": {
            "/health": { "get": { "summary": "Liveness check" } },
            "/api/courses": { "get": {
                "summary": "Active courses with current-grading-period grades",
                "parameters": [
                    { "name": "student_id", "in": "query", "schema": { "type": "string" } }
                ]
            } },
            "/api/todo": { "get": {
                "summary": "Planner items for the coming days",
                "parameters": [
                    { "name": "student_id", "in": "query", "schema": { "type": "string" } },
                    { "name": "days", "in": "query", "schema": { "type": "integer", "default": 7 } },
                    { "name": "hide_submitted", "in": "query", "schema": { "type": "boolean" } }
                ]
            } },
            "/api/missing": { "get": {
                "summary": "Missing work, reconciled with unsubmitted past-due",
                "parameters": [
                    { "name": "student_id", "in": "query", "schema": { "type": "string" } },
                    { "name": "course_id", "in": "query", "schema": { "type": "integer" } },
                    { "name": "all_grading_periods", "in": "query", "schema": { "type": "boolean" } },
                    { "name": "include_unsubmitted", "in": "query", "schema": { "type": "boolean" } },
                    { "name": "summary", "in": "query", "schema": { "type": "boolean" } }
                ]
            } },
            "/api/due": { "get": {
                "summary": "Assignments due in the coming days",
                "parameters": [
                    { "name": "student_id", "in": "query", "schema": { "type": "string" } },
                    { "name": "days", "in": "query", "schema": { "type": "integer", "default": 7 } },
                    { "name": "hide_graded", "in": "query", "schema": { "type": "boolean" } }
                ]
            } },
            "/api/unsubmitted": { "get": {
                "summary": "Past-due assignments with nothing submitted",
                "parameters": [
                    { "name": "student_id", "in": "query", "schema": { "type": "string" } },
                    { "name": "course_id", "in": "query", "schema": { "type": "integer" } },
                    { "name": "all_grading_periods", "in": "query", "schema": { "type": "boolean" } }
                ]
            } },
            "/api/stats": { "get": {
                "summary": "Late/missing statistics per course",
                "parameters": [
                    { "name": "student_id", "in": "query", "schema": { "type": "string" } },
                    { "name": "hide_empty", "in": "query", "schema": { "type": "boolean", "default": true } }
                ]
            } },
            "/api/status": { "get": {
                "summary": "Full academic status overview",
                "parameters": [
                    { "name": "student_id", "in": "query", "schema": { "type": "string" } },
                    { "name": "all_students", "in": "query", "schema": { "type": "boolean" } }
                ]
            } }
        }
    }))
}

#[derive(Debug, Default, Deserialize)]
struct StudentParams {
    student_id: Option<String>,
}

async fn api_courses(
    State(state): State<SharedState>,
    Query(params): Query<StudentParams>,
) -> ApiResult {
    let student = student(&state, params.student_id.as_deref())?;
    let courses = course_grades(&state.client, &student).await?;
    json_ok(&courses)
}

#[derive(Debug, Default, Deserialize)]
struct TodoParams {
    student_id: Option<String>,
    days: Option<i64>,
    #[serde(default)]
    hide_submitted: bool,
}

async fn api_todo(
    State(state): State<SharedState>,
    Query(params): Query<TodoParams>,
) -> ApiResult {
    let student = student(&state, params.student_id.as_deref())?;
    let items = todo_items(
        &state.client,
        &student,
        &TodoOptions {
            days: params.days.unwrap_or(7),
            hide_submitted: params.hide_submitted,
        },
    )
    .await?;
    json_ok(&items)
}

#[derive(Debug, Default, Deserialize)]
struct MissingParams {
    student_id: Option<String>,
    course_id: Option<u64>,
    #[serde(default)]
    all_grading_periods: bool,
    #[serde(default)]
    include_unsubmitted: bool,
    #[serde(default)]
    summary: bool,
}

async fn api_missing(
    State(state): State<SharedState>,
    Query(params): Query<MissingParams>,
) -> ApiResult {
    let student = student(&state, params.student_id.as_deref())?;
    let options = MissingOptions {
        course_id: params.course_id,
        all_grading_periods: params.all_grading_periods,
    };

    if params.summary {
        let counts = missing_counts_by_course(&state.client, &student, &options).await?;
        return json_ok(&counts);
    }

    let items = missing_work(
        &state.client,
        &student,
        &options,
        params.include_unsubmitted,
    )
    .await?;
    json_ok(&items)
}

#[derive(Debug, Default, Deserialize)]
struct DueParams {
    student_id: Option<String>,
    days: Option<i64>,
    #[serde(default)]
    hide_graded: bool,
}

async fn api_due(State(state): State<SharedState>, Query(params): Query<DueParams>) -> ApiResult {
    let student = student(&state, params.student_id.as_deref())?;
    let items = due_assignments(
        &state.client,
        &student,
        &DueOptions {
            days: params.days.unwrap_or(7),
            hide_graded: params.hide_graded,
        },
    )
    .await?;
    json_ok(&items)
}

#[derive(Debug, Default, Deserialize)]
struct UnsubmittedParams {
    student_id: Option<String>,
    course_id: Option<u64>,
    #[serde(default)]
    all_grading_periods: bool,
}

async fn api_unsubmitted(
    State(state): State<SharedState>,
    Query(params): Query<UnsubmittedParams>,
) -> ApiResult {
    let student = student(&state, params.student_id.as_deref())?;
    let items = unsubmitted_assignments(
        &state.client,
        &student,
        &UnsubmittedOptions {
            course_id: params.course_id,
            all_grading_periods: params.all_grading_periods,
        },
    )
    .await?;
    json_ok(&items)
}

#[derive(Debug, Deserialize)]
struct StatsParams {
    student_id: Option<String>,
    #[serde(default = "default_hide_empty")]
    hide_empty: bool,
}

fn default_hide_empty() -> bool {
    true
}

async fn api_stats(
    State(state): State<SharedState>,
    Query(params): Query<StatsParams>,
) -> ApiResult {
    let student = student(&state, params.student_id.as_deref())?;
    let stats = course_stats(
        &state.client,
        &student,
        &StatsOptions {
            hide_empty: params.hide_empty,
        },
    )
    .await?;
    json_ok(&stats)
}

#[derive(Debug, Default, Deserialize)]
struct StatusParams {
    student_id: Option<String>,
    #[serde(default)]
    all_students: bool,
}

async fn api_status(
    State(state): State<SharedState>,
    Query(params): Query<StatusParams>,
) -> ApiResult {
    if params.all_students {
        let statuses = multi_student_status(&state.client, &StatusOptions::default()).await?;
        return json_ok(&statuses);
    }

    let student = student(&state, params.student_id.as_deref())?;
    let status =
        comprehensive_status(&state.client, &student, &StatusOptions::default()).await?;
    json_ok(&status)
}
