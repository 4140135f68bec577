// Session middleware: resolves the session cookie before route handlers run

use crate::core::state::AppState;
use crate::models::session::Session;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

/// A resolved session together with the cookie token that located it.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub token: String,
    pub session: Session,
}

/// Per-request session context inserted into request extensions. `None`
/// means the client is anonymous (no cookie, or a token no session matches).
#[derive(Debug, Clone, Default)]
pub struct SessionCtx(pub Option<ActiveSession>);

/// Loads the session referenced by the cookie (if any) into request
/// extensions. Expiry is not decided here; route handlers own that.
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let active = jar
        .get(&state.config.session.cookie_name)
        .and_then(|cookie| {
            let token = cookie.value().to_string();
            state
                .sessions
                .get(&token)
                .map(|session| ActiveSession { token, session })
        });

    req.extensions_mut().insert(SessionCtx(active));
    next.run(req).await
}
