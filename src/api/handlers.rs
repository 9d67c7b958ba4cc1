//! HTTP request handlers for the Leave Balance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use chrono::Local;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_balance;
use crate::models::{Employee, LeaveKind};

use super::request::{
    CreateEmployeeRequest, CreateLeaveEntryRequest, UpdateEmployeeRequest, UpdateLeaveEntryRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, EmployeeBalanceResponse, LeaveEntryCreatedResponse,
    LeaveEntryResponse, LeaveOverviewResponse, MessageResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/employees",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route(
            "/api/employees/:id",
            put(update_employee_handler).delete(delete_employee_handler),
        )
        .route(
            "/api/annual-leave",
            get(list_annual_leave_handler).post(create_annual_leave_handler),
        )
        .route(
            "/api/annual-leave/:seq",
            put(update_annual_leave_handler).delete(delete_annual_leave_handler),
        )
        .route(
            "/api/sick-leave",
            get(list_sick_leave_handler).post(create_sick_leave_handler),
        )
        .route(
            "/api/sick-leave/:seq",
            put(update_sick_leave_handler).delete(delete_sick_leave_handler),
        )
        .route("/api/leave", get(leave_overview_handler))
        .with_state(state)
}

/// Query parameters accepted by the leave list endpoints.
#[derive(Debug, Default, Deserialize)]
struct LeaveListQuery {
    employee_id: Option<String>,
}

fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
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
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn require_json<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err((
            StatusCode::BAD_REQUEST,
            Json(rejection_error(correlation_id, rejection)),
        )
            .into_response()),
    }
}

/// Handler for GET /api/employees.
///
/// Serves every employee merged with its computed balances. Balances are
/// evaluated against one consistent storage snapshot and the process-local
/// date; a failure for one employee is isolated to that employee's row.
async fn list_employees_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Listing employees with balances");

    let snapshot = match state.db().leave_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Snapshot read failed");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let today = Local::now().date_naive();
    let mut employees = Vec::with_capacity(snapshot.employees.len());
    for employee in &snapshot.employees {
        match calculate_balance(
            employee,
            &snapshot.annual,
            &snapshot.sick,
            state.policy(),
            today,
        ) {
            Ok(balance) => employees.push(EmployeeBalanceResponse::from(balance)),
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    employee_id = %employee.id,
                    error = %err,
                    "Balance computation failed"
                );
                employees.push(EmployeeBalanceResponse::failed(
                    employee.clone(),
                    err.to_string(),
                ));
            }
        }
    }

    info!(
        correlation_id = %correlation_id,
        employees = employees.len(),
        "Employee list served"
    );
    (StatusCode::OK, Json(employees)).into_response()
}

/// Handler for POST /api/employees.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Creating employee");

    let request = match require_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if let Err(err) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %err, "Employee validation failed");
        return ApiErrorResponse::from(err).into_response();
    }

    let employee: Employee = request.into();
    match state.db().insert_employee(&employee).await {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                "Employee created"
            );
            (StatusCode::CREATED, Json(employee)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Employee creation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for PUT /api/employees/:id.
async fn update_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = Employee::normalize_id(&id);
    info!(correlation_id = %correlation_id, employee_id = %id, "Updating employee");

    let request = match require_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if let Err(err) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %err, "Employee validation failed");
        return ApiErrorResponse::from(err).into_response();
    }

    match state
        .db()
        .update_employee(
            &id,
            request.first_name.trim(),
            request.last_name.trim(),
            request.hire_date.trim(),
        )
        .await
    {
        Ok(()) => (StatusCode::OK, Json(MessageResponse::new("Employee updated"))).into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Employee update failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for DELETE /api/employees/:id.
async fn delete_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = Employee::normalize_id(&id);
    info!(correlation_id = %correlation_id, employee_id = %id, "Deleting employee");

    match state.db().delete_employee(&id).await {
        Ok(()) => (StatusCode::OK, Json(MessageResponse::new("Employee deleted"))).into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Employee deletion failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

async fn list_leave(state: AppState, kind: LeaveKind, query: LeaveListQuery) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee_id = query
        .employee_id
        .as_deref()
        .map(Employee::normalize_id)
        .filter(|id| !id.is_empty());

    match state.db().list_leave_entries(kind, employee_id).await {
        Ok(entries) => {
            let entries: Vec<LeaveEntryResponse> =
                entries.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(entries)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                kind = kind.as_str(),
                error = %err,
                "Leave list failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

async fn create_leave(
    state: AppState,
    kind: LeaveKind,
    payload: Result<Json<CreateLeaveEntryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, kind = kind.as_str(), "Recording leave entry");

    let request = match require_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if let Err(err) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %err, "Leave entry validation failed");
        return ApiErrorResponse::from(err).into_response();
    }

    match state.db().insert_leave_entry(kind, request.into()).await {
        Ok(seq) => {
            info!(correlation_id = %correlation_id, seq, "Leave entry recorded");
            (
                StatusCode::CREATED,
                Json(LeaveEntryCreatedResponse {
                    seq,
                    message: format!("{} leave recorded", kind.as_str()),
                }),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Leave entry creation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

async fn update_leave(
    state: AppState,
    kind: LeaveKind,
    seq: i64,
    payload: Result<Json<UpdateLeaveEntryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, kind = kind.as_str(), seq, "Updating leave entry");

    let request = match require_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if let Err(err) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %err, "Leave entry validation failed");
        return ApiErrorResponse::from(err).into_response();
    }

    match state.db().update_leave_entry(kind, seq, request.into()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse::new(format!("{} leave updated", kind.as_str()))),
        )
            .into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Leave entry update failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

async fn delete_leave(state: AppState, kind: LeaveKind, seq: i64) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, kind = kind.as_str(), seq, "Deleting leave entry");

    match state.db().delete_leave_entry(kind, seq).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse::new(format!("{} leave deleted", kind.as_str()))),
        )
            .into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Leave entry deletion failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

async fn list_annual_leave_handler(
    State(state): State<AppState>,
    Query(query): Query<LeaveListQuery>,
) -> Response {
    list_leave(state, LeaveKind::Annual, query).await
}

async fn create_annual_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLeaveEntryRequest>, JsonRejection>,
) -> Response {
    create_leave(state, LeaveKind::Annual, payload).await
}

async fn update_annual_leave_handler(
    State(state): State<AppState>,
    Path(seq): Path<i64>,
    payload: Result<Json<UpdateLeaveEntryRequest>, JsonRejection>,
) -> Response {
    update_leave(state, LeaveKind::Annual, seq, payload).await
}

async fn delete_annual_leave_handler(
    State(state): State<AppState>,
    Path(seq): Path<i64>,
) -> Response {
    delete_leave(state, LeaveKind::Annual, seq).await
}

async fn list_sick_leave_handler(
    State(state): State<AppState>,
    Query(query): Query<LeaveListQuery>,
) -> Response {
    list_leave(state, LeaveKind::Sick, query).await
}

async fn create_sick_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLeaveEntryRequest>, JsonRejection>,
) -> Response {
    create_leave(state, LeaveKind::Sick, payload).await
}

async fn update_sick_leave_handler(
    State(state): State<AppState>,
    Path(seq): Path<i64>,
    payload: Result<Json<UpdateLeaveEntryRequest>, JsonRejection>,
) -> Response {
    update_leave(state, LeaveKind::Sick, seq, payload).await
}

async fn delete_sick_leave_handler(
    State(state): State<AppState>,
    Path(seq): Path<i64>,
) -> Response {
    delete_leave(state, LeaveKind::Sick, seq).await
}

/// Handler for GET /api/leave: the combined feed of all recorded leave.
async fn leave_overview_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();

    let annual = match state.db().list_leave_entries(LeaveKind::Annual, None).await {
        Ok(entries) => entries,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Leave overview failed");
            return ApiErrorResponse::from(err).into_response();
        }
    };
    let sick = match state.db().list_leave_entries(LeaveKind::Sick, None).await {
        Ok(entries) => entries,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Leave overview failed");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let overview = LeaveOverviewResponse {
        annual: annual.into_iter().map(Into::into).collect(),
        sick: sick.into_iter().map(Into::into).collect(),
    };
    (StatusCode::OK, Json(overview)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::open_temp_database;
    use crate::policy::LeavePolicy;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(open_temp_database(), LeavePolicy::default())
    }

    async fn request_json(
        router: Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");
        let request = builder
            .body(match body {
                Some(value) => Body::from(value.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_create_employee_returns_201_with_normalized_id() {
        let router = create_router(create_test_state());
        let (status, json) = request_json(
            router,
            "POST",
            "/api/employees",
            Some(serde_json::json!({
                "id": "emp001",
                "first_name": "Thandi",
                "last_name": "Nkosi",
                "hire_date": "01/06/2024"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["id"], "EMP001");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/employees")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_delete_unknown_employee_returns_404() {
        let router = create_router(create_test_state());
        let (status, json) = request_json(router, "DELETE", "/api/employees/GHOST", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "EMPLOYEE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_leave_entry_for_unknown_employee_returns_404() {
        let router = create_router(create_test_state());
        let (status, _) = request_json(
            router,
            "POST",
            "/api/annual-leave",
            Some(serde_json::json!({
                "employee_id": "GHOST",
                "days_taken": "1.0"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
