// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise append and log retrieval routes.

use crate::error::{AppError, Result};
use crate::models::Exercise;
use crate::time_utils::{format_date_iso, format_date_long, parse_calendar_date};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/{id}/exercises", post(add_exercise))
        .route("/api/users/{id}/logs", get(get_log))
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

// ─── Exercise Append ─────────────────────────────────────────

/// Form body for appending an exercise.
///
/// `duration` and `date` arrive as raw form strings and are parsed in the
/// handler so malformed values produce a JSON 400 rather than an extractor
/// rejection.
#[derive(Deserialize)]
struct ExerciseForm {
    description: String,
    duration: String,
    date: Option<String>,
}

/// Flattened append response: the owning user's id/username mixed with the
/// new exercise's fields.
#[derive(Serialize)]
pub struct ExerciseResponse {
    pub username: String,
    pub description: String,
    pub duration: u32,
    pub date: String,
    #[serde(rename = "_id")]
    pub id: String,
}

fn parse_duration(raw: &str) -> Result<u32> {
    raw.trim().parse::<u32>().map_err(|_| {
        AppError::BadRequest(format!(
            "Invalid duration: '{}' is not a non-negative integer",
            raw
        ))
    })
}

/// Resolve the exercise date: absent or empty defaults to today (UTC).
fn resolve_date(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        None => Ok(Utc::now().date_naive()),
        Some("") => Ok(Utc::now().date_naive()),
        Some(s) => parse_calendar_date(s).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid date: '{}' is not a YYYY-MM-DD date", s))
        }),
    }
}

/// Append an exercise to a user's log.
async fn add_exercise(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Form(form): Form<ExerciseForm>,
) -> Result<Json<ExerciseResponse>> {
    let duration_minutes = parse_duration(&form.duration)?;
    let date = resolve_date(form.date.as_deref())?;

    let exercise = Exercise {
        description: form.description,
        duration_minutes,
        date,
    };

    let user = state
        .db
        .append_exercise(&user_id, exercise.clone())
        .await?
        .ok_or_else(user_not_found)?;

    Ok(Json(ExerciseResponse {
        username: user.username,
        description: exercise.description,
        duration: exercise.duration_minutes,
        date: format_date_iso(exercise.date),
        id: user.id,
    }))
}

// ─── Log Retrieval ───────────────────────────────────────────

#[derive(Deserialize)]
struct LogQuery {
    /// Inclusive lower date bound (YYYY-MM-DD)
    from: Option<String>,
    /// Inclusive upper date bound (YYYY-MM-DD)
    to: Option<String>,
    /// Truncate the filtered log to its first `limit` entries
    limit: Option<String>,
}

#[derive(Serialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: u32,
    pub date: String,
}

/// Log response; `count` is the size of the filtered/truncated log, not
/// the full log.
#[derive(Serialize)]
pub struct LogResponse {
    pub username: String,
    pub count: usize,
    #[serde(rename = "_id")]
    pub id: String,
    pub log: Vec<LogEntry>,
}

fn parse_date_bound(raw: Option<&str>, name: &str) -> Result<Option<NaiveDate>> {
    raw.map(|s| {
        parse_calendar_date(s).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid '{}' parameter: must be a YYYY-MM-DD date",
                name
            ))
        })
    })
    .transpose()
}

fn parse_limit(raw: Option<&str>) -> Result<Option<usize>> {
    raw.map(|s| {
        s.parse::<usize>().map_err(|_| {
            AppError::BadRequest(
                "Invalid 'limit' parameter: must be a non-negative integer".to_string(),
            )
        })
    })
    .transpose()
}

/// Filter a log to the inclusive `[from, to]` date range, then truncate to
/// the first `limit` entries. Order of application is fixed: from, to, limit.
fn filter_log(
    exercises: &[Exercise],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    limit: Option<usize>,
) -> Vec<Exercise> {
    let mut filtered: Vec<Exercise> = exercises
        .iter()
        .filter(|e| from.map_or(true, |f| e.date >= f))
        .filter(|e| to.map_or(true, |t| e.date <= t))
        .cloned()
        .collect();

    if let Some(limit) = limit {
        filtered.truncate(limit);
    }

    filtered
}

/// Get a user's exercise log, optionally filtered by date range and limit.
async fn get_log(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<LogQuery>,
) -> Result<Json<LogResponse>> {
    let from = parse_date_bound(params.from.as_deref(), "from")?;
    let to = parse_date_bound(params.to.as_deref(), "to")?;
    let limit = parse_limit(params.limit.as_deref())?;

    let user = state
        .db
        .get_user(&user_id)
        .await?
        .ok_or_else(user_not_found)?;

    tracing::debug!(
        user_id = %user.id,
        from = ?from,
        to = ?to,
        limit = ?limit,
        total = user.exercises.len(),
        "Fetching exercise log"
    );

    let log: Vec<LogEntry> = filter_log(&user.exercises, from, to, limit)
        .into_iter()
        .map(|e| LogEntry {
            description: e.description,
            duration: e.duration_minutes,
            date: format_date_long(e.date),
        })
        .collect();

    Ok(Json(LogResponse {
        username: user.username,
        count: log.len(),
        id: user.id,
        log,
    }))
}
