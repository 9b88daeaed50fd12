// SPDX-License-Identifier: MIT

//! API routes for authenticated users: jog CRUD and the weekly report.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{CreateJogRequest, Jog, UpdateJogRequest, WeeklyReport};
use crate::services::JogService;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/jogs", get(list_jogs).post(create_jog))
        .route(
            "/api/jogs/{id}",
            get(get_jog).put(update_jog).delete(delete_jog),
        )
        .route("/api/reports/weekly", get(weekly_report))
}

// ─── Jog CRUD ────────────────────────────────────────────────

#[derive(Deserialize)]
struct ListQuery {
    /// Pagination: page number (1-indexed). Kept as a raw string so that
    /// absent or malformed values fall back to page 1 instead of erroring.
    page: Option<String>,
}

/// List jogs, two per page, in the store's natural order.
async fn list_jogs(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<Jog>>> {
    let page = JogService::resolve_page(params.page.as_deref());

    tracing::debug!(user_id = %user.user_id, page, "Listing jogs");

    let jogs = state.jogs.find_all(page).await?;
    Ok(Json(jogs))
}

/// Record a new jog for the current user.
async fn create_jog(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateJogRequest>,
) -> Result<(StatusCode, Json<Jog>)> {
    let jog = state.jogs.create(payload, &user.user_id).await?;
    Ok((StatusCode::CREATED, Json(jog)))
}

/// Get a single jog owned by the current user.
async fn get_jog(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Jog>> {
    let jog = state.jogs.find_by_id(&id, &user.user_id).await?;
    Ok(Json(jog))
}

/// Update fields of an existing jog and return the updated record.
async fn update_jog(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateJogRequest>,
) -> Result<Json<Jog>> {
    let jog = state.jogs.update_by_id(&id, payload, &user.user_id).await?;
    Ok(Json(jog))
}

/// Delete a jog and return it as it existed before deletion.
async fn delete_jog(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Jog>> {
    let jog = state.jogs.delete_by_id(&id, &user.user_id).await?;
    Ok(Json(jog))
}

// ─── Weekly Report ───────────────────────────────────────────

#[derive(Deserialize)]
struct ReportQuery {
    /// Inclusive range start (RFC 3339)
    from: String,
    /// Inclusive range end (RFC 3339)
    to: String,
}

fn parse_bound(name: &str, raw: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|_| {
            AppError::Validation(format!(
                "Invalid '{}' parameter: must be RFC3339 datetime",
                name
            ))
        })
}

/// Weekly aggregate report for the current user over `[from, to]`.
async fn weekly_report(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ReportQuery>,
) -> Result<Json<WeeklyReport>> {
    let from = parse_bound("from", &params.from)?;
    let to = parse_bound("to", &params.to)?;

    tracing::debug!(user_id = %user.user_id, %from, %to, "Generating weekly report");

    let report = state
        .reports
        .generate_weekly_report(&user.user_id, from, to)
        .await?;

    Ok(Json(report))
}
