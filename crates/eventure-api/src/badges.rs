use axum::{Extension, Json, extract::State, response::IntoResponse};

use eventure_core::badges;
use eventure_types::api::{BadgeListResponse, Claims, UserBadgeListResponse};

use crate::error::ApiError;
use crate::state::{AppState, blocking};

pub async fn list_badges(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let badges = blocking(&state, |s| badges::list_badges(&s.db)).await?;
    Ok(Json(BadgeListResponse { badges }))
}

pub async fn list_user_badges(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let badges = blocking(&state, move |s| badges::list_user_badges(&s.db, claims.sub)).await?;
    Ok(Json(UserBadgeListResponse { badges }))
}
