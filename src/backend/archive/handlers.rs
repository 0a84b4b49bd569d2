/**
 * Archive Handlers
 *
 * - GET  /workspaces/{workspace_id}/logs?from=&to= - Archived days in range
 * - POST /admin/archive?date=                      - Run archival for a day
 * - POST /admin/reclaim                            - Run one orphan sweep
 *
 * Dates are `YYYY-MM-DD`. Without `to`, the range ends yesterday (UTC+9);
 * without `from`, it starts 30 days before `to`. Without `date`, archival
 * targets yesterday (UTC+9).
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Days, NaiveDate, Utc};
use serde::Deserialize;

use crate::backend::archive::job::ArchiveReport;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::room_key::{is_key_date, reference_yesterday, DATE_FORMAT};
use crate::shared::{ArchiveRecord, LogRange};

const DEFAULT_RANGE_DAYS: u64 = 30;

#[derive(Debug, Deserialize)]
pub struct LogRangeParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ArchiveParams {
    pub date: Option<String>,
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, BackendError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        BackendError::handler(
            StatusCode::BAD_REQUEST,
            format!("{} must be YYYY-MM-DD, got {:?}", field, value),
        )
    })
}

/// Archival target must encode into a room key that decodes back
fn check_target(target: NaiveDate) -> Result<NaiveDate, BackendError> {
    if is_key_date(target) {
        Ok(target)
    } else {
        Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            format!("date {} is outside years 0000 to 9999", target),
        ))
    }
}

impl LogRangeParams {
    fn resolve(&self, yesterday: NaiveDate) -> Result<LogRange, BackendError> {
        let to = match &self.to {
            Some(to) => parse_date("to", to)?,
            None => yesterday,
        };
        let from = match &self.from {
            Some(from) => parse_date("from", from)?,
            None => to.checked_sub_days(Days::new(DEFAULT_RANGE_DAYS)).unwrap_or(to),
        };
        if from > to {
            return Err(BackendError::handler(
                StatusCode::BAD_REQUEST,
                format!("from ({}) is after to ({})", from, to),
            ));
        }
        Ok(LogRange { from, to })
    }
}

fn report_json(report: &ArchiveReport, consecutive_failures: u32) -> serde_json::Value {
    serde_json::json!({
        "target": report.target.format(DATE_FORMAT).to_string(),
        "archived": report.archived,
        "blank": report.blank,
        "missing": report.missing,
        "failures": report.failures.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
        "consecutive_failures": consecutive_failures,
    })
}

/// Archived logs of one workspace (GET /workspaces/{workspace_id}/logs)
pub async fn handle_log_range(
    State(app_state): State<AppState>,
    Path(workspace_id): Path<String>,
    Query(params): Query<LogRangeParams>,
) -> Result<Json<Vec<ArchiveRecord>>, BackendError> {
    let range = params.resolve(reference_yesterday(&Utc::now()))?;
    let records = app_state
        .log_store
        .range(&workspace_id, range.from, range.to)
        .await?;
    Ok(Json(records))
}

/// Run archival now (POST /admin/archive)
pub async fn handle_archive_now(
    State(app_state): State<AppState>,
    Query(params): Query<ArchiveParams>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let target = match &params.date {
        Some(date) => check_target(parse_date("date", date)?)?,
        None => reference_yesterday(&Utc::now()),
    };
    tracing::info!("[Archive] Manual archival requested for {}", target);

    let report = app_state.scheduler.trigger(target).await?;
    let failures = app_state.scheduler.job().consecutive_failures();
    Ok(Json(report_json(&report, failures)))
}

/// Run one orphan sweep now (POST /admin/reclaim)
pub async fn handle_reclaim_now(
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let destroyed = app_state.reclaimer.sweep().await?;
    Ok(Json(serde_json::json!({ "destroyed": destroyed })))
}
