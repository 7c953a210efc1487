use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};

use eventure_core::journal::{self, NewAdventure};
use eventure_types::api::{
    AdventureCreatedResponse, AdventureListResponse, Claims, CreateAdventureRequest,
};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::{AppState, blocking};

/// POST /api/adventures records the adventure and credits the caller's progression.
pub async fn create_adventure(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    JsonBody(req): JsonBody<CreateAdventureRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let adventure = blocking(&state, move |s| {
        journal::record_adventure(
            &s.db,
            claims.sub,
            NewAdventure {
                title: req.title,
                description: req.description,
                location: req.location,
                category: req.category,
                points_earned: req.points_earned,
            },
        )
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(AdventureCreatedResponse {
            message: "Adventure saved successfully".to_string(),
            adventure,
        }),
    ))
}

pub async fn list_adventures(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let adventures = blocking(&state, move |s| journal::list_adventures(&s.db, claims.sub)).await?;
    Ok(Json(AdventureListResponse { adventures }))
}
