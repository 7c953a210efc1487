//! Free-text memories. Recording one has no effect on progression.

use chrono::Utc;
use uuid::Uuid;

use eventure_db::Database;
use eventure_db::models::{MemoryRow, format_timestamp};
use eventure_db::queries;
use eventure_types::models::Memory;

use crate::Result;
use crate::error::{CoreError, require};

#[derive(Debug)]
pub struct NewMemory {
    pub title: String,
    pub description: String,
    /// Stored as given. Neither existence nor ownership is checked.
    pub adventure_id: Option<Uuid>,
}

pub fn record_memory(db: &Database, user_id: Uuid, new: NewMemory) -> Result<Memory> {
    require("title", &new.title)?;
    require("description", &new.description)?;

    let row = MemoryRow {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        adventure_id: new.adventure_id.map(|id| id.to_string()),
        title: new.title,
        description: new.description,
        created_at: format_timestamp(Utc::now()),
    };

    db.with_tx(|conn| {
        if !queries::user_exists(conn, &row.user_id)? {
            return Err(CoreError::UserNotFound);
        }
        queries::insert_memory(conn, &row)?;
        Ok(())
    })?;

    Ok(row.into_memory()?)
}

/// All memories of `user_id`, most recent first.
pub fn list_memories(db: &Database, user_id: Uuid) -> Result<Vec<Memory>> {
    let rows = db.with_conn(|conn| {
        queries::memories_for_user(conn, &user_id.to_string()).map_err(CoreError::from)
    })?;
    rows.into_iter()
        .map(|r| r.into_memory().map_err(CoreError::from))
        .collect()
}
