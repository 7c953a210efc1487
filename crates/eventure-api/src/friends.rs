use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use eventure_core::CoreError;
use eventure_core::social;
use eventure_types::api::{
    Claims, FriendListResponse, FriendRequestCreatedResponse, FriendRequestListResponse,
    MessageResponse, RespondFriendRequest, SearchQuery, SearchResponse, SendFriendRequest,
};
use eventure_types::models::FriendAction;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::{AppState, blocking};

/// GET /api/friends/search?q=. An empty `q` returns no users.
pub async fn search(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let users = blocking(&state, move |s| {
        social::search_users(&s.db, &query.q, claims.sub)
    })
    .await?;
    Ok(Json(SearchResponse { users }))
}

pub async fn send_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    JsonBody(req): JsonBody<SendFriendRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let receiver_id = req.friend_id.ok_or(CoreError::MissingField("friend_id"))?;

    let request = blocking(&state, move |s| {
        social::send_request(&s.db, claims.sub, receiver_id, req.message)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(FriendRequestCreatedResponse {
            message: "Friend request sent successfully".to_string(),
            request_id: request.id,
        }),
    ))
}

/// GET /api/friends/requests: pending requests addressed to the caller.
pub async fn list_requests(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let requests = blocking(&state, move |s| {
        social::list_incoming_pending(&s.db, claims.sub)
    })
    .await?;
    Ok(Json(FriendRequestListResponse { requests }))
}

pub async fn respond(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(request_id): Path<String>,
    JsonBody(req): JsonBody<RespondFriendRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let action: FriendAction = req
        .action
        .parse()
        .map_err(|_| CoreError::invalid("action", "expected 'accept' or 'decline'"))?;
    // An id that cannot name any request is just another lookup miss.
    let request_id: Uuid = request_id.parse().map_err(|_| CoreError::RequestNotFound)?;

    let request = blocking(&state, move |s| {
        social::respond_to_request(&s.db, claims.sub, request_id, action)
    })
    .await?;

    Ok(Json(MessageResponse::new(format!(
        "Friend request {} successfully",
        request.status
    ))))
}

pub async fn list_friends(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let friends = blocking(&state, move |s| social::list_friends(&s.db, claims.sub)).await?;
    Ok(Json(FriendListResponse { friends }))
}
