use crate::core::state::AppState;
use crate::middleware::session::SessionCtx;
use crate::models::audit::AuditEvent;
use crate::utils::net::client_ip;
use crate::utils::template::render;
use crate::utils::time::current_timestamp;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use std::sync::Arc;
use tracing::{error, info};

/// Read a view file from the configured views directory and serve it
/// verbatim, no templating.
async fn serve_view(state: &AppState, file: &str) -> Response {
    let path = state.config.data.views_dir.join(file);

    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(view = %path.display(), error = %e, "Failed to read view file");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// GET /
pub async fn login_page(State(state): State<Arc<AppState>>) -> Response {
    serve_view(&state, "login.html").await
}

/// GET /help
pub async fn help_page(State(state): State<Arc<AppState>>) -> Response {
    serve_view(&state, "help.html").await
}

/// GET /signup
pub async fn signup_page(State(state): State<Arc<AppState>>) -> Response {
    serve_view(&state, "signup.html").await
}

/// GET /forgot-password
pub async fn forgot_password_page(State(state): State<Arc<AppState>>) -> Response {
    serve_view(&state, "forgot-password.html").await
}

/// Session-gated dashboard.
///
/// GET /dashboard
///
/// Anonymous clients are sent to the login page. A session inactive for
/// longer than the TTL is audited, destroyed, and redirected with an expiry
/// marker; otherwise its activity timestamp slides forward and the dashboard
/// template is rendered with the session's username and role.
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Extension(SessionCtx(active)): Extension<SessionCtx>,
    headers: HeaderMap,
) -> Response {
    let Some(active) = active else {
        return Redirect::to("/").into_response();
    };

    let now = current_timestamp();

    if active.session.is_expired(state.config.session.ttl_secs, now) {
        let ip = client_ip(&headers);
        state
            .audit
            .record(AuditEvent::session_expired(&active.session.user, &ip));
        state.sessions.remove(&active.token);

        info!(username = %active.session.user, ip = %ip, "Session expired");

        return Redirect::to("/?error=Session+expired").into_response();
    }

    state.sessions.touch(&active.token, now);

    let path = state.config.data.views_dir.join("dashboard.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(template) => {
            let html = render(
                &template,
                &[
                    ("username", active.session.user.as_str()),
                    ("role", active.session.role.as_str()),
                ],
            );
            Html(html).into_response()
        }
        Err(e) => {
            error!(view = %path.display(), error = %e, "Failed to read view file");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::middleware::session::ActiveSession;
    use crate::models::audit::AuditKind;
    use crate::models::user::Role;
    use axum::body::Body;
    use axum::http::header;
    use http_body_util::BodyExt;
    use tempfile::TempDir;

    fn create_test_state() -> (TempDir, Arc<AppState>) {
        let dir = TempDir::new().unwrap();
        let users_path = dir.path().join("testData.json");
        std::fs::write(&users_path, r#"[{"username":"admin","password":"pw"}]"#).unwrap();

        std::fs::write(
            dir.path().join("dashboard.html"),
            "<h1>Welcome {{username}}</h1><p>Role: {{role}}</p>",
        )
        .unwrap();
        std::fs::write(dir.path().join("login.html"), "<h1>Login</h1>").unwrap();
        std::fs::write(dir.path().join("help.html"), "<h1>Help</h1>").unwrap();

        let mut config = Config::default();
        config.data.users_file = users_path;
        config.data.views_dir = dir.path().to_path_buf();

        let state = Arc::new(AppState::new(config).unwrap());
        (dir, state)
    }

    fn active_session(state: &Arc<AppState>, user: &str, role: Role, at: i64) -> ActiveSession {
        let token = state.sessions.create(user.to_string(), role, at);
        let session = state.sessions.get(&token).unwrap();
        ActiveSession { token, session }
    }

    async fn body_string(response: Response) -> String {
        let body = Body::new(response.into_body());
        let bytes = body.collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_static_view_served_verbatim() {
        let (_dir, state) = create_test_state();

        let response = help_page(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "<h1>Help</h1>");
    }

    #[tokio::test]
    async fn test_missing_view_is_500() {
        let (_dir, state) = create_test_state();

        let response = signup_page(State(state)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_dashboard_without_session_redirects_to_login() {
        let (_dir, state) = create_test_state();

        let response = dashboard_handler(
            State(state),
            Extension(SessionCtx(None)),
            HeaderMap::new(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    }

    #[tokio::test]
    async fn test_dashboard_renders_placeholders() {
        let (_dir, state) = create_test_state();
        let active = active_session(&state, "admin", Role::Admin, current_timestamp());

        let response = dashboard_handler(
            State(state),
            Extension(SessionCtx(Some(active))),
            HeaderMap::new(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert_eq!(html, "<h1>Welcome admin</h1><p>Role: admin</p>");
    }

    #[tokio::test]
    async fn test_dashboard_refreshes_activity() {
        let (_dir, state) = create_test_state();
        let stale = current_timestamp() - 500; // inside the 600s window
        let active = active_session(&state, "admin", Role::Admin, stale);
        let token = active.token.clone();

        let response = dashboard_handler(
            State(state.clone()),
            Extension(SessionCtx(Some(active))),
            HeaderMap::new(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        // Sliding expiration: last_activity moved forward
        assert!(state.sessions.get(&token).unwrap().last_activity > stale);
    }

    #[tokio::test]
    async fn test_expired_session_destroyed_and_audited() {
        let (_dir, state) = create_test_state();
        let expired_at = current_timestamp() - 601;
        let active = active_session(&state, "admin", Role::Admin, expired_at);
        let token = active.token.clone();

        let response = dashboard_handler(
            State(state.clone()),
            Extension(SessionCtx(Some(active))),
            HeaderMap::new(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/?error=Session+expired"
        );

        assert!(state.sessions.get(&token).is_none());

        let events = state.audit.snapshot();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, AuditKind::SessionExpired);
        assert_eq!(events[0].username.as_deref(), Some("admin"));
    }
}
