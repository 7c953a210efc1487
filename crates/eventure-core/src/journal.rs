//! Adventure journal. Recording an adventure is the only thing that moves a
//! user's progression counters.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use eventure_db::Database;
use eventure_db::models::{AdventureRow, format_timestamp};
use eventure_db::queries;
use eventure_types::models::Adventure;

use crate::Result;
use crate::error::{CoreError, require};
use crate::progression::{DEFAULT_ADVENTURE_POINTS, Progression};

#[derive(Debug)]
pub struct NewAdventure {
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    /// Defaults to [`DEFAULT_ADVENTURE_POINTS`].
    pub points_earned: Option<u32>,
}

/// Store a completed adventure and credit it to its owner.
///
/// The insert and the counter update share one transaction: the user row is
/// read, advanced and written back while the write lock is held, so two
/// submissions from the same user cannot lose each other's update.
pub fn record_adventure(db: &Database, user_id: Uuid, new: NewAdventure) -> Result<Adventure> {
    require("title", &new.title)?;
    require("description", &new.description)?;
    require("location", &new.location)?;
    require("category", &new.category)?;

    let points_earned = new.points_earned.unwrap_or(DEFAULT_ADVENTURE_POINTS);
    let row = AdventureRow {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        title: new.title,
        description: new.description,
        location: new.location,
        category: new.category,
        points_earned,
        completed_at: format_timestamp(Utc::now()),
    };

    let (progress, gained) = db.with_tx(|conn| {
        let mut user = queries::user_by_id(conn, &row.user_id)?.ok_or(CoreError::UserNotFound)?;

        let mut progress = Progression {
            level: user.level,
            points: user.points,
            streak: user.streak,
            adventures_completed: user.adventures_completed,
        };
        let gained = progress.record_adventure(points_earned);

        queries::insert_adventure(conn, &row)?;

        user.level = progress.level;
        user.points = progress.points;
        user.streak = progress.streak;
        user.adventures_completed = progress.adventures_completed;
        queries::update_progression(conn, &user)?;

        Ok::<_, CoreError>((progress, gained))
    })?;

    if gained > 0 {
        info!(
            "User {} reached level {} ({} points)",
            user_id, progress.level, progress.points
        );
    }

    Ok(row.into_adventure()?)
}

/// All adventures of `user_id`, most recent first.
pub fn list_adventures(db: &Database, user_id: Uuid) -> Result<Vec<Adventure>> {
    let rows = db.with_conn(|conn| {
        queries::adventures_for_user(conn, &user_id.to_string()).map_err(CoreError::from)
    })?;
    rows.into_iter()
        .map(|r| r.into_adventure().map_err(CoreError::from))
        .collect()
}
