//! HTTP request handlers for the pay tracker API.
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
use chrono::Weekday;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{build_month, summarize_lines, window_lines};
use crate::error::ValidationResult;
use crate::models::NegativeBillable;

use super::request::{CalendarRequest, SummaryRequest, into_entries};
use super::response::{ApiError, ApiErrorResponse, CalendarResponse, SummaryResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/summary", post(summary_handler))
        .route("/calendar", post(calendar_handler))
        .with_state(state)
}

/// Handler for POST /summary.
///
/// Returns the billable time and income of every entry inside the window.
async fn summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };
    let policy = request
        .negative_billable
        .unwrap_or_else(|| state.config().negative_billable());

    let start_time = Instant::now();
    match summarize(request, policy) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                lines = response.lines.len(),
                income = response.totals.income,
                duration_us = start_time.elapsed().as_micros(),
                "Summary completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Summary rejected");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /calendar.
///
/// Lays out the month as weeks starting on the configured weekday.
async fn calendar_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalendarRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calendar request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };
    let config = state.config();
    let policy = request
        .negative_billable
        .unwrap_or_else(|| config.negative_billable());

    let start_time = Instant::now();
    match calendar(request, config.week_starts_on(), policy) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                year = response.year,
                month = response.month,
                weeks = response.weeks.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Calendar completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Calendar rejected");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn summarize(request: SummaryRequest, policy: NegativeBillable) -> ValidationResult<SummaryResponse> {
    let entries = into_entries(request.entries)?;
    let lines = window_lines(&entries, request.from, request.to, policy)?;
    let totals = summarize_lines(&lines);
    Ok(SummaryResponse { lines, totals })
}

fn calendar(
    request: CalendarRequest,
    week_start: Weekday,
    policy: NegativeBillable,
) -> ValidationResult<CalendarResponse> {
    let entries = into_entries(request.entries)?;
    let weeks = build_month(&entries, request.year, request.month, week_start, policy)?;
    Ok(CalendarResponse {
        year: request.year,
        month: request.month,
        weeks,
    })
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn parse_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // Well-formed JSON with missing or mistyped fields.
            ApiError::validation_error(body_text)
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
    Err(ApiErrorResponse::bad_request(error))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{Duration, EntryRecord};
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDateTime;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/settings.yaml").expect("Failed to load config");
        AppState::new(config)
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_record(id: u64, from: NaiveDateTime, to: NaiveDateTime) -> EntryRecord {
        EntryRecord {
            id,
            workplace: "Cafe".to_string(),
            pay_rate: 20.0,
            from,
            to,
            unpaid_breaks: Vec::new(),
        }
    }

    async fn post_json(router: Router, uri: &str, body: String) -> Response {
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn read_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    /// API-001: a valid summary request returns lines and totals
    #[tokio::test]
    async fn test_api_001_summary_returns_200() {
        let router = create_router(create_test_state());
        let request = SummaryRequest {
            entries: vec![make_record(
                1,
                make_datetime("2024-01-01", "09:00:00"),
                make_datetime("2024-01-01", "12:00:00"),
            )],
            from: make_datetime("2024-01-01", "00:00:00"),
            to: make_datetime("2024-01-02", "00:00:00"),
            negative_billable: None,
        };

        let response = post_json(router, "/summary", serde_json::to_string(&request).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );

        let result: SummaryResponse = read_body(response).await;
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.totals.income, 60.0);
        assert_eq!(result.totals.total_hours, Duration::new(3, 0).unwrap());
    }

    /// API-002: malformed JSON returns 400 MALFORMED_JSON
    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = post_json(router, "/summary", "{invalid json".to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    /// API-003: an invalid entry returns 400 VALIDATION_ERROR naming the field
    #[tokio::test]
    async fn test_api_003_invalid_entry_returns_validation_error() {
        let router = create_router(create_test_state());
        let request = SummaryRequest {
            entries: vec![make_record(
                1,
                make_datetime("2024-01-01", "12:00:00"),
                make_datetime("2024-01-01", "09:00:00"),
            )],
            from: make_datetime("2024-01-01", "00:00:00"),
            to: make_datetime("2024-01-02", "00:00:00"),
            negative_billable: None,
        };

        let response = post_json(router, "/summary", serde_json::to_string(&request).unwrap()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.details.as_deref(), Some("to"));
    }

    /// API-004: a missing field is a validation error, not malformed JSON
    #[tokio::test]
    async fn test_api_004_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let body = r#"{"entries": [], "from": "2024-01-01T00:00:00"}"#;
        let response = post_json(router, "/summary", body.to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_calendar_returns_weeks() {
        let router = create_router(create_test_state());
        let request = CalendarRequest {
            entries: vec![make_record(
                1,
                make_datetime("2024-02-05", "09:00:00"),
                make_datetime("2024-02-05", "11:00:00"),
            )],
            year: 2024,
            month: 2,
            negative_billable: None,
        };

        let response = post_json(router, "/calendar", serde_json::to_string(&request).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let result: CalendarResponse = read_body(response).await;
        assert_eq!(result.weeks.len(), 5);
        assert_eq!(result.weeks[1].summaries.income, 40.0);
        assert_eq!(result.weeks[0].summaries.income, 0.0);
    }

    #[tokio::test]
    async fn test_calendar_invalid_month_returns_400() {
        let router = create_router(create_test_state());
        let body = r#"{"entries": [], "year": 2024, "month": 13}"#;
        let response = post_json(router, "/calendar", body.to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.details.as_deref(), Some("month"));
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/summary")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }
}
