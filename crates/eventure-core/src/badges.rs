//! Read access to the badge catalog.
//!
//! Nothing here awards badges; `badges_earned` has no automatic incrementer.

use uuid::Uuid;

use eventure_db::Database;
use eventure_db::queries;
use eventure_types::models::{Badge, UserBadge};

use crate::Result;
use crate::error::CoreError;

pub fn list_badges(db: &Database) -> Result<Vec<Badge>> {
    let rows = db.with_conn(|conn| queries::all_badges(conn).map_err(CoreError::from))?;
    rows.into_iter()
        .map(|r| r.into_badge().map_err(CoreError::from))
        .collect()
}

pub fn list_user_badges(db: &Database, user_id: Uuid) -> Result<Vec<UserBadge>> {
    let rows = db.with_conn(|conn| {
        queries::badges_for_user(conn, &user_id.to_string()).map_err(CoreError::from)
    })?;
    rows.into_iter()
        .map(|r| r.into_user_badge().map_err(CoreError::from))
        .collect()
}
