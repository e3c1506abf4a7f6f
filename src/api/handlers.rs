//! HTTP request handlers for the capacity engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    analyze_warnings, calculate_capacity, member_period_load, project_allocation,
};
use crate::config::ConfigLoader;
use crate::error::EngineError;
use crate::models::{
    CapacityBreakdown, MemberPeriodLoad, PlanningSnapshot, ProjectedAllocation, WarningReport,
};
use crate::period::{Period, PeriodInfo, generate_period_headers, parse_period, parse_quarter};

use super::request::{
    AllocationRequest, CapacityRequest, MemberLoadRequest, PeriodsRequest, WarningsRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Largest number of headers one `/periods` request may generate.
pub const MAX_PERIOD_HEADERS: usize = 520;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/capacity", post(capacity_handler))
        .route("/allocation", post(allocation_handler))
        .route("/member-load", post(member_load_handler))
        .route("/warnings", post(warnings_handler))
        .route("/periods", post(periods_handler))
        .with_state(state)
}

/// Handler for POST /capacity.
///
/// Returns the capacity breakdown of one member for one quarter.
async fn capacity_handler(
    State(state): State<AppState>,
    payload: Result<Json<CapacityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing capacity request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match compute_capacity(state.config(), request) {
        Ok(breakdown) => {
            info!(
                correlation_id = %correlation_id,
                member_id = %breakdown.member_id,
                quarter = %breakdown.quarter,
                used_percent = breakdown.used_percent,
                status = %breakdown.status,
                duration_us = start_time.elapsed().as_micros(),
                "Capacity calculated"
            );
            json_response(breakdown)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /allocation.
///
/// Returns a member's projected days in one project for any period.
async fn allocation_handler(
    State(state): State<AppState>,
    payload: Result<Json<AllocationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing allocation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match compute_allocation(state.config(), request) {
        Ok(allocation) => {
            info!(
                correlation_id = %correlation_id,
                days = %allocation.days,
                is_proportional = allocation.is_proportional,
                duration_us = start_time.elapsed().as_micros(),
                "Allocation projected"
            );
            json_response(allocation)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /member-load.
///
/// Returns a member's projected load across all active projects for any period.
async fn member_load_handler(
    State(state): State<AppState>,
    payload: Result<Json<MemberLoadRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing member load request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match compute_member_load(state.config(), request) {
        Ok(load) => {
            info!(
                correlation_id = %correlation_id,
                member_id = %load.member_id,
                period = %load.period,
                allocated_days = %load.allocated_days,
                is_overallocated = load.is_overallocated,
                duration_us = start_time.elapsed().as_micros(),
                "Member load calculated"
            );
            json_response(load)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /warnings.
///
/// Returns every planning warning for the submitted state.
async fn warnings_handler(
    State(state): State<AppState>,
    payload: Result<Json<WarningsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing warnings request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match compute_warnings(state.config(), request) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                quarter = ?report.quarter,
                warnings_count = report.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Warnings analyzed"
            );
            json_response(report)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /periods.
///
/// Returns header metadata for a timeline view.
async fn periods_handler(
    State(state): State<AppState>,
    payload: Result<Json<PeriodsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing periods request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match compute_periods(state.config(), request) {
        Ok(headers) => {
            info!(
                correlation_id = %correlation_id,
                count = headers.len(),
                "Period headers generated"
            );
            json_response(headers)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn compute_capacity(
    config: &ConfigLoader,
    request: CapacityRequest,
) -> Result<CapacityBreakdown, ApiErrorResponse> {
    if parse_quarter(&request.quarter).is_none() {
        return Err(EngineError::InvalidPeriod {
            label: request.quarter,
        }
        .into());
    }

    let today = request.today.unwrap_or_else(current_date);
    let (snapshot, timeline) = request.snapshot.into_snapshot(config, today)?;
    require_member(&snapshot, &request.member_id)?;

    Ok(calculate_capacity(
        &request.member_id,
        &request.quarter,
        &snapshot,
        &timeline,
    ))
}

fn compute_allocation(
    config: &ConfigLoader,
    request: AllocationRequest,
) -> Result<ProjectedAllocation, ApiErrorResponse> {
    let today = request.today.unwrap_or_else(current_date);
    let (snapshot, _) = request.snapshot.into_snapshot(config, today)?;

    let period = resolve_period(&snapshot, &request.period)?;
    require_member(&snapshot, &request.member_id)?;
    let project = snapshot
        .project(&request.project_id)
        .ok_or_else(|| EngineError::ProjectNotFound {
            id: request.project_id.clone(),
        })?;

    Ok(project_allocation(
        project,
        &request.member_id,
        &period,
        &snapshot,
    ))
}

fn compute_member_load(
    config: &ConfigLoader,
    request: MemberLoadRequest,
) -> Result<MemberPeriodLoad, ApiErrorResponse> {
    let today = request.today.unwrap_or_else(current_date);
    let (snapshot, timeline) = request.snapshot.into_snapshot(config, today)?;

    let period = resolve_period(&snapshot, &request.period)?;
    require_member(&snapshot, &request.member_id)?;

    Ok(member_period_load(
        &request.member_id,
        &period,
        &snapshot,
        &timeline,
    ))
}

fn compute_warnings(
    config: &ConfigLoader,
    request: WarningsRequest,
) -> Result<WarningReport, ApiErrorResponse> {
    let today = request.today.unwrap_or_else(current_date);
    let (snapshot, timeline) = request.snapshot.into_snapshot(config, today)?;
    Ok(analyze_warnings(&snapshot, &timeline, today))
}

fn compute_periods(
    config: &ConfigLoader,
    request: PeriodsRequest,
) -> Result<Vec<PeriodInfo>, ApiErrorResponse> {
    if request.count.is_some_and(|count| count > MAX_PERIOD_HEADERS) {
        return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
            format!("count must be at most {}", MAX_PERIOD_HEADERS),
        )));
    }

    let settings = match request.settings {
        Some(settings) => {
            settings.validate()?;
            settings
        }
        None => config.settings().clone(),
    };
    let country_id = request
        .country_id
        .unwrap_or_else(|| settings.default_country_id.clone());
    let holidays = config.holidays().for_country(&country_id);
    let anchor = request.anchor.unwrap_or_else(current_date);
    let count = request.count.unwrap_or_else(|| {
        settings
            .default_header_count(request.view)
            .min(MAX_PERIOD_HEADERS)
    });

    Ok(generate_period_headers(
        request.view,
        count,
        anchor,
        &settings.sprint_config(),
        &holidays,
    ))
}

fn resolve_period(snapshot: &PlanningSnapshot, label: &str) -> Result<Period, EngineError> {
    parse_period(label, &snapshot.settings.sprint_config()).ok_or_else(|| {
        EngineError::InvalidPeriod {
            label: label.to_string(),
        }
    })
}

fn require_member(snapshot: &PlanningSnapshot, member_id: &str) -> Result<(), EngineError> {
    match snapshot.member(member_id) {
        Some(_) => Ok(()),
        None => Err(EngineError::MemberNotFound {
            id: member_id.to_string(),
        }),
    }
}

fn current_date() -> NaiveDate {
    Utc::now().date_naive()
}

fn json_response<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, error: ApiErrorResponse) -> Response {
    warn!(
        correlation_id = %correlation_id,
        code = %error.error.code,
        error = %error.error.message,
        "Request failed"
    );
    (
        error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error.error),
    )
        .into_response()
}

/// Maps a JSON extraction failure onto a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
