use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};

use eventure_core::memories::{self, NewMemory};
use eventure_types::api::{Claims, CreateMemoryRequest, MemoryCreatedResponse, MemoryListResponse};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::{AppState, blocking};

pub async fn create_memory(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    JsonBody(req): JsonBody<CreateMemoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let memory = blocking(&state, move |s| {
        memories::record_memory(
            &s.db,
            claims.sub,
            NewMemory {
                title: req.title,
                description: req.description,
                adventure_id: req.adventure_id,
            },
        )
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MemoryCreatedResponse {
            message: "Memory saved successfully".to_string(),
            memory,
        }),
    ))
}

pub async fn list_memories(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let memories = blocking(&state, move |s| memories::list_memories(&s.db, claims.sub)).await?;
    Ok(Json(MemoryListResponse { memories }))
}
