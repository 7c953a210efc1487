use anyhow::Result;
use rusqlite::{Connection, params};
use tracing::info;
use uuid::Uuid;

use eventure_types::models::Rarity;

/// Catalog rows inserted once, when the badges table is empty:
/// (name, description, symbol, rarity, category).
pub const DEFAULT_BADGES: &[(&str, &str, &str, Rarity, &str)] = &[
    ("First Steps", "Complete your first adventure", "👶", Rarity::Common, "milestone"),
    ("Explorer", "Complete 10 adventures", "🗺️", Rarity::Common, "milestone"),
    ("Social Star", "Share 25 adventures with friends", "⭐", Rarity::Rare, "social"),
    ("Night Owl", "Complete 5 adventures after 10 PM", "🦉", Rarity::Epic, "special"),
    ("Legendary Adventurer", "Complete 100 adventures", "👑", Rarity::Legendary, "milestone"),
];

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id                   TEXT PRIMARY KEY,
                username             TEXT NOT NULL UNIQUE,
                email                TEXT NOT NULL UNIQUE,
                password_hash        TEXT NOT NULL,
                level                INTEGER NOT NULL DEFAULT 1 CHECK (level >= 1),
                points               INTEGER NOT NULL DEFAULT 0 CHECK (points >= 0),
                streak               INTEGER NOT NULL DEFAULT 0 CHECK (streak >= 0),
                adventures_completed INTEGER NOT NULL DEFAULT 0 CHECK (adventures_completed >= 0),
                badges_earned        INTEGER NOT NULL DEFAULT 0 CHECK (badges_earned >= 0),
                created_at           TEXT NOT NULL
            );

            CREATE TABLE adventures (
                id            TEXT PRIMARY KEY,
                user_id       TEXT NOT NULL REFERENCES users(id),
                title         TEXT NOT NULL,
                description   TEXT NOT NULL,
                location      TEXT NOT NULL,
                category      TEXT NOT NULL,
                points_earned INTEGER NOT NULL DEFAULT 50,
                completed_at  TEXT NOT NULL
            );

            CREATE INDEX idx_adventures_user
                ON adventures(user_id, completed_at);

            -- adventure_id is advisory: no foreign key
            CREATE TABLE memories (
                id           TEXT PRIMARY KEY,
                user_id      TEXT NOT NULL REFERENCES users(id),
                adventure_id TEXT,
                title        TEXT NOT NULL,
                description  TEXT NOT NULL,
                created_at   TEXT NOT NULL
            );

            CREATE INDEX idx_memories_user
                ON memories(user_id, created_at);

            CREATE TABLE friend_requests (
                id          TEXT PRIMARY KEY,
                sender_id   TEXT NOT NULL REFERENCES users(id),
                receiver_id TEXT NOT NULL REFERENCES users(id),
                message     TEXT,
                status      TEXT NOT NULL DEFAULT 'pending'
                            CHECK (status IN ('pending', 'accepted', 'declined')),
                created_at  TEXT NOT NULL
            );

            CREATE INDEX idx_friend_requests_receiver
                ON friend_requests(receiver_id, status);

            CREATE TABLE friendships (
                id         TEXT PRIMARY KEY,
                user_id    TEXT NOT NULL REFERENCES users(id),
                friend_id  TEXT NOT NULL REFERENCES users(id),
                created_at TEXT NOT NULL
            );

            CREATE INDEX idx_friendships_user
                ON friendships(user_id);

            CREATE TABLE badges (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                description TEXT NOT NULL,
                symbol      TEXT NOT NULL,
                rarity      TEXT NOT NULL
                            CHECK (rarity IN ('common', 'rare', 'epic', 'legendary')),
                category    TEXT NOT NULL
            );

            CREATE TABLE user_badges (
                id        TEXT PRIMARY KEY,
                user_id   TEXT NOT NULL REFERENCES users(id),
                badge_id  TEXT NOT NULL REFERENCES badges(id),
                earned_at TEXT NOT NULL
            );

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    seed_badges(conn)?;

    info!("Database migrations complete");
    Ok(())
}

fn seed_badges(conn: &Connection) -> Result<()> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM badges", [], |r| r.get(0))?;
    if existing > 0 {
        return Ok(());
    }

    let mut stmt = conn.prepare(
        "INSERT INTO badges (id, name, description, symbol, rarity, category)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for (name, description, symbol, rarity, category) in DEFAULT_BADGES {
        stmt.execute(params![
            Uuid::new_v4().to_string(),
            name,
            description,
            symbol,
            rarity.as_str(),
            category
        ])?;
    }

    info!("Seeded {} badges", DEFAULT_BADGES.len());
    Ok(())
}
