use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    Adventure, Badge, FriendSummary, IncomingFriendRequest, Memory, User, UserBadge, UserSummary,
};

// -- JWT Claims --

/// Session token claims. The API layer issues and resolves these; the core
/// only ever sees the resolved `sub`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

// Request fields default to empty so that a missing field reaches the core's
// validation and is reported as such, rather than as a body rejection.

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: User,
}

// -- Adventures --

#[derive(Debug, Deserialize)]
pub struct CreateAdventureRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    pub points_earned: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdventureCreatedResponse {
    pub message: String,
    pub adventure: Adventure,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdventureListResponse {
    pub adventures: Vec<Adventure>,
}

// -- Memories --

#[derive(Debug, Deserialize)]
pub struct CreateMemoryRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub adventure_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemoryCreatedResponse {
    pub message: String,
    pub memory: Memory,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemoryListResponse {
    pub memories: Vec<Memory>,
}

// -- Friends --

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Deserialize)]
pub struct SendFriendRequest {
    pub friend_id: Option<Uuid>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FriendRequestCreatedResponse {
    pub message: String,
    pub request_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RespondFriendRequest {
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FriendRequestListResponse {
    pub requests: Vec<IncomingFriendRequest>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FriendListResponse {
    pub friends: Vec<FriendSummary>,
}

// -- Badges --

#[derive(Debug, Serialize, Deserialize)]
pub struct BadgeListResponse {
    pub badges: Vec<Badge>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserBadgeListResponse {
    pub badges: Vec<UserBadge>,
}

// -- Generic --

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
