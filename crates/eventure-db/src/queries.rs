//! SQL for every table. The free functions take a bare `&Connection` so the
//! core can compose several of them inside one `Database::with_tx` unit; the
//! `Database` methods at the bottom are single-statement reads.

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::Database;
use crate::models::{
    AdventureRow, BadgeRow, FriendRequestRow, IncomingRequestRow, MemoryRow, UserBadgeRow, UserRow,
};

const USER_COLUMNS: &str = "id, username, email, password_hash, level, points, streak, \
     adventures_completed, badges_earned, created_at";

fn map_user(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        level: row.get(4)?,
        points: row.get(5)?,
        streak: row.get(6)?,
        adventures_completed: row.get(7)?,
        badges_earned: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn map_adventure(row: &Row<'_>) -> rusqlite::Result<AdventureRow> {
    Ok(AdventureRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        location: row.get(4)?,
        category: row.get(5)?,
        points_earned: row.get(6)?,
        completed_at: row.get(7)?,
    })
}

fn map_memory(row: &Row<'_>) -> rusqlite::Result<MemoryRow> {
    Ok(MemoryRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        adventure_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn map_request(row: &Row<'_>) -> rusqlite::Result<FriendRequestRow> {
    Ok(FriendRequestRow {
        id: row.get(0)?,
        sender_id: row.get(1)?,
        receiver_id: row.get(2)?,
        message: row.get(3)?,
        status: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn map_badge(row: &Row<'_>) -> rusqlite::Result<BadgeRow> {
    Ok(BadgeRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        symbol: row.get(3)?,
        rarity: row.get(4)?,
        category: row.get(5)?,
    })
}

// -- Users --

pub fn insert_user(conn: &Connection, user: &UserRow) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO users (id, username, email, password_hash, level, points, streak,
                            adventures_completed, badges_earned, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            user.id,
            user.username,
            user.email,
            user.password_hash,
            user.level,
            user.points,
            user.streak,
            user.adventures_completed,
            user.badges_earned,
            user.created_at,
        ],
    )?;
    Ok(())
}

pub fn user_by_id(conn: &Connection, id: &str) -> rusqlite::Result<Option<UserRow>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        [id],
        map_user,
    )
    .optional()
}

pub fn user_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Option<UserRow>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
        [email],
        map_user,
    )
    .optional()
}

pub fn user_by_username(conn: &Connection, username: &str) -> rusqlite::Result<Option<UserRow>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
        [username],
        map_user,
    )
    .optional()
}

pub fn user_exists(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    conn.query_row("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)", [id], |r| {
        r.get(0)
    })
}

/// Overwrite the progression counters of one user. Returns rows affected.
pub fn update_progression(conn: &Connection, user: &UserRow) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE users
         SET level = ?2, points = ?3, streak = ?4, adventures_completed = ?5
         WHERE id = ?1",
        params![
            user.id,
            user.level,
            user.points,
            user.streak,
            user.adventures_completed
        ],
    )
}

/// Substring match on username (ASCII case-insensitive), in registration order.
/// `%`, `_` and `\` in the needle match literally.
pub fn search_users(
    conn: &Connection,
    needle: &str,
    exclude_id: &str,
    limit: u32,
) -> rusqlite::Result<Vec<UserRow>> {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    let pattern = format!("%{}%", escaped);

    let mut stmt = conn.prepare(&format!(
        "SELECT {USER_COLUMNS} FROM users
         WHERE username LIKE ?1 ESCAPE '\\' AND id != ?2
         ORDER BY rowid
         LIMIT ?3"
    ))?;
    let rows = stmt
        .query_map(params![pattern, exclude_id, limit], map_user)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn count_users(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
}

// -- Adventures --

pub fn insert_adventure(conn: &Connection, adventure: &AdventureRow) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO adventures (id, user_id, title, description, location, category,
                                 points_earned, completed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            adventure.id,
            adventure.user_id,
            adventure.title,
            adventure.description,
            adventure.location,
            adventure.category,
            adventure.points_earned,
            adventure.completed_at,
        ],
    )?;
    Ok(())
}

/// Newest first.
pub fn adventures_for_user(conn: &Connection, user_id: &str) -> rusqlite::Result<Vec<AdventureRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, title, description, location, category, points_earned, completed_at
         FROM adventures
         WHERE user_id = ?1
         ORDER BY completed_at DESC, rowid DESC",
    )?;
    let rows = stmt
        .query_map([user_id], map_adventure)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

// -- Memories --

pub fn insert_memory(conn: &Connection, memory: &MemoryRow) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO memories (id, user_id, adventure_id, title, description, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            memory.id,
            memory.user_id,
            memory.adventure_id,
            memory.title,
            memory.description,
            memory.created_at,
        ],
    )?;
    Ok(())
}

/// Newest first.
pub fn memories_for_user(conn: &Connection, user_id: &str) -> rusqlite::Result<Vec<MemoryRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, adventure_id, title, description, created_at
         FROM memories
         WHERE user_id = ?1
         ORDER BY created_at DESC, rowid DESC",
    )?;
    let rows = stmt
        .query_map([user_id], map_memory)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

// -- Friend requests --

pub fn insert_friend_request(conn: &Connection, request: &FriendRequestRow) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO friend_requests (id, sender_id, receiver_id, message, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            request.id,
            request.sender_id,
            request.receiver_id,
            request.message,
            request.status,
            request.created_at,
        ],
    )?;
    Ok(())
}

/// Whether `sender_id` already has a pending request out to `receiver_id`.
/// Only this direction is checked.
pub fn pending_request_exists(
    conn: &Connection,
    sender_id: &str,
    receiver_id: &str,
) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(
             SELECT 1 FROM friend_requests
             WHERE sender_id = ?1 AND receiver_id = ?2 AND status = 'pending')",
        [sender_id, receiver_id],
        |r| r.get(0),
    )
}

/// The request with this id, but only if it is addressed to `receiver_id`
/// and still pending.
pub fn pending_request_for_receiver(
    conn: &Connection,
    id: &str,
    receiver_id: &str,
) -> rusqlite::Result<Option<FriendRequestRow>> {
    conn.query_row(
        "SELECT id, sender_id, receiver_id, message, status, created_at
         FROM friend_requests
         WHERE id = ?1 AND receiver_id = ?2 AND status = 'pending'",
        [id, receiver_id],
        map_request,
    )
    .optional()
}

pub fn friend_request_by_id(conn: &Connection, id: &str) -> rusqlite::Result<Option<FriendRequestRow>> {
    conn.query_row(
        "SELECT id, sender_id, receiver_id, message, status, created_at
         FROM friend_requests
         WHERE id = ?1",
        [id],
        map_request,
    )
    .optional()
}

/// Move a pending request to `status`. Returns rows affected, which is 0 if
/// the request was already resolved.
pub fn resolve_friend_request(conn: &Connection, id: &str, status: &str) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE friend_requests SET status = ?2 WHERE id = ?1 AND status = 'pending'",
        [id, status],
    )
}

/// Pending requests addressed to `receiver_id`, in the order they were sent,
/// joined with the sender's public fields.
pub fn incoming_pending_requests(
    conn: &Connection,
    receiver_id: &str,
) -> rusqlite::Result<Vec<IncomingRequestRow>> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.message, r.created_at, u.id, u.username, u.level, u.adventures_completed
         FROM friend_requests r
         JOIN users u ON u.id = r.sender_id
         WHERE r.receiver_id = ?1 AND r.status = 'pending'
         ORDER BY r.rowid",
    )?;
    let rows = stmt
        .query_map([receiver_id], |row| {
            Ok(IncomingRequestRow {
                id: row.get(0)?,
                message: row.get(1)?,
                created_at: row.get(2)?,
                sender_id: row.get(3)?,
                sender_username: row.get(4)?,
                sender_level: row.get(5)?,
                sender_adventures_completed: row.get(6)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

// -- Friendships --

pub fn insert_friendship(
    conn: &Connection,
    id: &str,
    user_id: &str,
    friend_id: &str,
    created_at: &str,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO friendships (id, user_id, friend_id, created_at) VALUES (?1, ?2, ?3, ?4)",
        [id, user_id, friend_id, created_at],
    )?;
    Ok(())
}

/// Counterpart users of every friendship edge owned by `user_id`.
pub fn friends_of(conn: &Connection, user_id: &str) -> rusqlite::Result<Vec<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.username, u.email, u.password_hash, u.level, u.points, u.streak,
                u.adventures_completed, u.badges_earned, u.created_at
         FROM friendships f
         JOIN users u ON u.id = f.friend_id
         WHERE f.user_id = ?1
         ORDER BY f.rowid",
    )?;
    let rows = stmt
        .query_map([user_id], map_user)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn friendship_exists(conn: &Connection, user_id: &str, friend_id: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM friendships WHERE user_id = ?1 AND friend_id = ?2)",
        [user_id, friend_id],
        |r| r.get(0),
    )
}

// -- Badges --

pub fn all_badges(conn: &Connection) -> rusqlite::Result<Vec<BadgeRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, symbol, rarity, category FROM badges ORDER BY rowid",
    )?;
    let rows = stmt
        .query_map([], map_badge)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn badges_for_user(conn: &Connection, user_id: &str) -> rusqlite::Result<Vec<UserBadgeRow>> {
    let mut stmt = conn.prepare(
        "SELECT b.id, b.name, b.description, b.symbol, b.rarity, b.category,
                ub.user_id, ub.earned_at
         FROM user_badges ub
         JOIN badges b ON b.id = ub.badge_id
         WHERE ub.user_id = ?1
         ORDER BY ub.earned_at, ub.rowid",
    )?;
    let rows = stmt
        .query_map([user_id], |row| {
            Ok(UserBadgeRow {
                badge: map_badge(row)?,
                user_id: row.get(6)?,
                earned_at: row.get(7)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

impl Database {
    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| Ok(user_by_id(conn, id)?))
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| Ok(user_by_email(conn, email)?))
    }

    pub fn count_users(&self) -> Result<i64> {
        self.with_conn(|conn| Ok(count_users(conn)?))
    }

    pub fn get_friend_request(&self, id: &str) -> Result<Option<FriendRequestRow>> {
        self.with_conn(|conn| Ok(friend_request_by_id(conn, id)?))
    }

    pub fn are_friends(&self, user_id: &str, friend_id: &str) -> Result<bool> {
        self.with_conn(|conn| Ok(friendship_exists(conn, user_id, friend_id)?))
    }
}
