use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Resolve the bearer token and attach its `Claims` to the request.
/// Every failure is the same 401 regardless of cause.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(ApiError::Unauthorized)?;

    let claims = state.sessions.resolve(bearer.token()).map_err(|e| {
        debug!("Session rejected: {}", e);
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
