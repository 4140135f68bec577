use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::middleware::session::SessionCtx;
use crate::models::api::{DashboardResponse, HealthResponse, LoginPageResponse, ResetResponse};
use crate::models::audit::AuditEvent;
use crate::utils::time::current_timestamp_millis;
use axum::{extract::State, response::Json, Extension};
use std::sync::Arc;
use tracing::{error, info};

/// Login page metadata for automation: page identifier plus the known
/// usernames, in data-file order.
///
/// GET /api/login
pub async fn login_info_handler(State(state): State<Arc<AppState>>) -> Json<LoginPageResponse> {
    Json(LoginPageResponse {
        page: "login".to_string(),
        users: state.user_store.usernames(),
    })
}

/// Current session status. Presence check only; expiry is enforced by the
/// dashboard page itself.
///
/// GET /api/dashboard
pub async fn dashboard_status_handler(
    Extension(SessionCtx(active)): Extension<SessionCtx>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let active = active.ok_or(ApiError::Unauthorized)?;

    Ok(Json(DashboardResponse {
        status: "logged_in".to_string(),
        user: active.session.user,
        role: active.session.role,
    }))
}

/// Full in-memory audit log.
///
/// GET /api/auditlog
pub async fn auditlog_handler(State(state): State<Arc<AppState>>) -> Json<Vec<AuditEvent>> {
    Json(state.audit.snapshot())
}

/// Health check handler
///
/// GET /api/health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: current_timestamp_millis(),
    })
}

/// Reload the user store from its backing file.
///
/// POST /api/testdata/reset
///
/// A read or parse failure is surfaced as a 500 with detail; the previous
/// user list stays in place and the process keeps running.
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ResetResponse>, ApiError> {
    let users = state.user_store.reload().map_err(|e| {
        error!(error = %e, "Test data reset failed");
        ApiError::ResetFailed(e.to_string())
    })?;

    info!(users = users.len(), "Test data reset");

    Ok(Json(ResetResponse {
        status: "reset".to_string(),
        users,
    }))
}
