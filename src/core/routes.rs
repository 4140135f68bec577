// HTTP routes configuration

use crate::core::state::AppState;
use crate::middleware::session::session_middleware;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // HTML surface
        .route("/", get(crate::handlers::pages::login_page))
        .route("/help", get(crate::handlers::pages::help_page))
        .route("/signup", get(crate::handlers::pages::signup_page))
        .route(
            "/forgot-password",
            get(crate::handlers::pages::forgot_password_page),
        )
        .route("/login", post(crate::handlers::auth::login_handler))
        .route("/dashboard", get(crate::handlers::pages::dashboard_handler))
        .route("/logout", get(crate::handlers::auth::logout_handler))
        // JSON API surface
        .route("/api/login", get(crate::handlers::api::login_info_handler))
        .route(
            "/api/dashboard",
            get(crate::handlers::api::dashboard_status_handler),
        )
        .route("/api/auditlog", get(crate::handlers::api::auditlog_handler))
        .route("/api/health", get(crate::handlers::api::health_handler))
        .route(
            "/api/testdata/reset",
            post(crate::handlers::api::reset_handler),
        )
        // Unmatched paths and wrong methods both fall through to the same
        // handler, which answers in JSON under /api and plain text elsewhere
        .fallback(crate::handlers::fallback::fallback_handler)
        .method_not_allowed_fallback(crate::handlers::fallback::fallback_handler)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            session_middleware,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::utils::time::current_timestamp;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn create_test_router() -> (TempDir, Arc<AppState>, Router) {
        let dir = TempDir::new().unwrap();
        let users_path = dir.path().join("testData.json");
        std::fs::write(&users_path, r#"[{"username":"admin","password":"pw"}]"#).unwrap();
        std::fs::write(dir.path().join("login.html"), "<h1>Login</h1>").unwrap();
        std::fs::write(
            dir.path().join("dashboard.html"),
            "Welcome {{username}} ({{role}})",
        )
        .unwrap();

        let mut config = Config::default();
        config.data.users_file = users_path;
        config.data.views_dir = dir.path().to_path_buf();

        let state = Arc::new(AppState::new(config).unwrap());
        let router = build_router(Arc::clone(&state));
        (dir, state, router)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn login_request(username: &str, password: &str) -> Request<Body> {
        let body = serde_urlencoded::to_string([
            ("username", username),
            ("password", password),
        ])
        .unwrap();

        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_unknown_api_route_is_json_404() {
        let (_dir, _state, router) = create_test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/no/such/route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "not_found" })
        );
    }

    #[tokio::test]
    async fn test_wrong_method_on_api_route_is_json_404() {
        let (_dir, _state, router) = create_test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "not_found" })
        );
    }

    #[tokio::test]
    async fn test_health_through_router() {
        let (_dir, _state, router) = create_test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_login_flow_end_to_end() {
        let (_dir, _state, router) = create_test_router();

        // /api/dashboard starts unauthenticated
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Log in and capture the session cookie
        let response = router
            .clone()
            .oneshot(login_request("admin", "pw"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/dashboard"
        );

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        let cookie_pair = set_cookie.split(';').next().unwrap().to_string();

        // Authenticated dashboard status
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/dashboard")
                    .header(header::COOKIE, &cookie_pair)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "status": "logged_in", "user": "admin", "role": "admin" })
        );

        // Rendered dashboard page
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/dashboard")
                    .header(header::COOKIE, &cookie_pair)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(String::from_utf8(html.to_vec()).unwrap(), "Welcome admin (admin)");
    }

    #[tokio::test]
    async fn test_failed_login_through_router() {
        let (_dir, state, router) = create_test_router();

        let response = router
            .oneshot(login_request("admin", "nope"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/?error=Invalid+username+or+password"
        );
        assert_eq!(state.sessions.len(), 0);
        assert_eq!(state.audit.len(), 1);
    }

    #[tokio::test]
    async fn test_expired_cookie_through_router() {
        let (_dir, state, router) = create_test_router();

        // Session last active just past the 10-minute window
        let token = state.sessions.create(
            "admin".to_string(),
            crate::models::user::Role::Admin,
            current_timestamp() - 601,
        );

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/dashboard")
                    .header(header::COOKIE, format!("portal_session={}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/?error=Session+expired"
        );
        assert!(state.sessions.get(&token).is_none());
    }

    #[tokio::test]
    async fn test_logout_through_router() {
        let (_dir, state, router) = create_test_router();

        let token = state.sessions.create(
            "admin".to_string(),
            crate::models::user::Role::Admin,
            current_timestamp(),
        );

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/logout")
                    .header(header::COOKIE, format!("portal_session={}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
        assert_eq!(state.sessions.len(), 0);

        let events = state.audit.snapshot();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].username.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn test_unknown_html_route_is_plain_404() {
        let (_dir, _state, router) = create_test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/nowhere")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
