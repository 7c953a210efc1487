use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};

use eventure_core::ledger::{self, NewUser};
use eventure_types::api::{AuthResponse, Claims, LoginRequest, RegisterRequest};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::{AppState, blocking};

pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = blocking(&state, move |s| {
        ledger::register_user(
            &s.db,
            s.credentials.as_ref(),
            NewUser {
                username: req.username,
                email: req.email,
                password: req.password,
            },
        )
    })
    .await?;

    let token = state.sessions.issue(user.id, &user.username)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = blocking(&state, move |s| {
        ledger::authenticate(&s.db, s.credentials.as_ref(), &req.email, &req.password)
    })
    .await?;

    let token = state.sessions.issue(user.id, &user.username)?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user,
    }))
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let user = blocking(&state, move |s| ledger::get_user(&s.db, claims.sub)).await?;
    Ok(Json(user))
}
