use crate::core::state::AppState;
use crate::middleware::session::SessionCtx;
use crate::models::api::LoginForm;
use crate::models::audit::AuditEvent;
use crate::utils::net::client_ip;
use crate::utils::time::current_timestamp;
use axum::{
    extract::{Form, State},
    http::HeaderMap,
    response::Redirect,
    Extension,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::sync::Arc;
use tracing::{info, warn};

/// Process the login form.
///
/// POST /login
///
/// Every attempt is audited. A matching username/password pair establishes a
/// session and redirects to the dashboard; anything else bounces back to the
/// login page with an error marker in the query string.
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> (CookieJar, Redirect) {
    let ip = client_ip(&headers);
    let user = state.user_store.authenticate(&form.username, &form.password);

    state
        .audit
        .record(AuditEvent::login_attempt(&form.username, user.is_some(), &ip));

    match user {
        Some(user) => {
            let now = current_timestamp();
            let token = state.sessions.create(user.username.clone(), user.role, now);

            state
                .audit
                .record(AuditEvent::login_success(&user.username, user.role, &ip));

            info!(
                username = %user.username,
                role = %user.role,
                ip = %ip,
                "Login succeeded"
            );

            let cookie = Cookie::build((state.config.session.cookie_name.clone(), token))
                .path("/")
                .http_only(true)
                .build();

            (jar.add(cookie), Redirect::to("/dashboard"))
        }
        None => {
            warn!(username = %form.username, ip = %ip, "Login failed");

            (jar, Redirect::to("/?error=Invalid+username+or+password"))
        }
    }
}

/// Destroy the session and clear the cookie.
///
/// GET /logout
///
/// The username is captured before destruction so the audit event can name
/// it; logging out while anonymous is still recorded, without a username.
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    Extension(SessionCtx(active)): Extension<SessionCtx>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let ip = client_ip(&headers);
    let username = active.as_ref().map(|a| a.session.user.clone());

    if let Some(active) = &active {
        state.sessions.remove(&active.token);
    }

    state.audit.record(AuditEvent::logout(username.clone(), &ip));

    info!(username = ?username, ip = %ip, "Logged out");

    let removal = Cookie::build((state.config.session.cookie_name.clone(), ""))
        .path("/")
        .build();

    (jar.remove(removal), Redirect::to("/"))
}
