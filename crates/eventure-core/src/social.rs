//! Friend requests and the friendship relation.
//!
//! A request starts `pending` and ends `accepted` or `declined`. Accepting
//! writes the status change and both directed friendship edges in one
//! transaction, so neither side can observe a half-made friendship.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use eventure_db::Database;
use eventure_db::models::{FriendRequestRow, format_timestamp};
use eventure_db::queries;
use eventure_types::models::{
    FriendAction, FriendRequest, FriendRequestStatus, FriendSummary, IncomingFriendRequest,
    UserSummary,
};

use crate::Result;
use crate::error::CoreError;

pub const MAX_MESSAGE_CHARS: usize = 500;

/// Upper bound on search results.
pub const SEARCH_LIMIT: u32 = 10;

/// Propose a friendship from `sender_id` to `receiver_id`.
///
/// Only an existing pending request in the same direction counts as a
/// duplicate; a pending request from the receiver back to the sender does not.
pub fn send_request(
    db: &Database,
    sender_id: Uuid,
    receiver_id: Uuid,
    message: Option<String>,
) -> Result<FriendRequest> {
    if sender_id == receiver_id {
        return Err(CoreError::SelfRequest);
    }
    if let Some(text) = &message {
        if text.chars().count() > MAX_MESSAGE_CHARS {
            return Err(CoreError::invalid(
                "message",
                format!("at most {} characters", MAX_MESSAGE_CHARS),
            ));
        }
    }

    let row = FriendRequestRow {
        id: Uuid::new_v4().to_string(),
        sender_id: sender_id.to_string(),
        receiver_id: receiver_id.to_string(),
        message: message.filter(|m| !m.is_empty()),
        status: FriendRequestStatus::Pending.as_str().to_string(),
        created_at: format_timestamp(Utc::now()),
    };

    db.with_tx(|conn| {
        if !queries::user_exists(conn, &row.receiver_id)? {
            return Err(CoreError::UserNotFound);
        }
        if queries::pending_request_exists(conn, &row.sender_id, &row.receiver_id)? {
            return Err(CoreError::DuplicatePending);
        }
        queries::insert_friend_request(conn, &row)?;
        Ok(())
    })?;

    debug!("Friend request {} sent {} -> {}", row.id, sender_id, receiver_id);
    Ok(row.into_request()?)
}

/// Accept or decline a request addressed to `receiver_id`.
///
/// A request that does not exist, belongs to someone else, or is no longer
/// pending is reported as `RequestNotFound` in every case.
pub fn respond_to_request(
    db: &Database,
    receiver_id: Uuid,
    request_id: Uuid,
    action: FriendAction,
) -> Result<FriendRequest> {
    let status = action.resulting_status();

    let row = db.with_tx(|conn| {
        let mut row = queries::pending_request_for_receiver(
            conn,
            &request_id.to_string(),
            &receiver_id.to_string(),
        )?
        .ok_or(CoreError::RequestNotFound)?;

        if queries::resolve_friend_request(conn, &row.id, status.as_str())? != 1 {
            return Err(CoreError::RequestNotFound);
        }
        row.status = status.as_str().to_string();

        if action == FriendAction::Accept {
            let now = format_timestamp(Utc::now());
            for (user, friend) in [
                (&row.sender_id, &row.receiver_id),
                (&row.receiver_id, &row.sender_id),
            ] {
                // Mutual requests can both be accepted; keep one edge per direction.
                if !queries::friendship_exists(conn, user, friend)? {
                    let edge_id = Uuid::new_v4().to_string();
                    queries::insert_friendship(conn, &edge_id, user, friend, &now)?;
                }
            }
        }

        Ok::<_, CoreError>(row)
    })?;

    if action == FriendAction::Accept {
        info!("Users {} and {} are now friends", row.sender_id, row.receiver_id);
    }
    Ok(row.into_request()?)
}

/// Pending requests addressed to `user_id`, oldest first, with sender summaries.
pub fn list_incoming_pending(db: &Database, user_id: Uuid) -> Result<Vec<IncomingFriendRequest>> {
    let rows = db.with_conn(|conn| {
        queries::incoming_pending_requests(conn, &user_id.to_string()).map_err(CoreError::from)
    })?;
    rows.into_iter()
        .map(|r| r.into_incoming().map_err(CoreError::from))
        .collect()
}

pub fn list_friends(db: &Database, user_id: Uuid) -> Result<Vec<FriendSummary>> {
    let rows = db.with_conn(|conn| {
        queries::friends_of(conn, &user_id.to_string()).map_err(CoreError::from)
    })?;
    rows.into_iter()
        .map(|r| r.into_friend_summary().map_err(CoreError::from))
        .collect()
}

/// Users whose username contains `query`, never including `exclude_id`.
/// An empty query matches nobody.
pub fn search_users(db: &Database, query: &str, exclude_id: Uuid) -> Result<Vec<UserSummary>> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let rows = db.with_conn(|conn| {
        queries::search_users(conn, query, &exclude_id.to_string(), SEARCH_LIMIT)
            .map_err(CoreError::from)
    })?;
    rows.into_iter()
        .map(|r| r.into_summary().map_err(CoreError::from))
        .collect()
}
