//! Database row types. These map directly to SQLite rows.
//! Distinct from eventure-types models to keep the DB layer independent;
//! the `into_*` conversions parse ids, timestamps and enum columns.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use tracing::warn;
use uuid::Uuid;

use eventure_types::models::{
    Adventure, Badge, FriendRequest, FriendSummary, IncomingFriendRequest, Memory, User,
    UserBadge, UserSummary,
};

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub level: u32,
    pub points: i64,
    pub streak: u32,
    pub adventures_completed: u32,
    pub badges_earned: u32,
    pub created_at: String,
}

pub struct AdventureRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub points_earned: u32,
    pub completed_at: String,
}

pub struct MemoryRow {
    pub id: String,
    pub user_id: String,
    pub adventure_id: Option<String>,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

pub struct FriendRequestRow {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub message: Option<String>,
    pub status: String,
    pub created_at: String,
}

/// A pending request joined with its sender's public fields.
pub struct IncomingRequestRow {
    pub id: String,
    pub message: Option<String>,
    pub created_at: String,
    pub sender_id: String,
    pub sender_username: String,
    pub sender_level: u32,
    pub sender_adventures_completed: u32,
}

pub struct BadgeRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub symbol: String,
    pub rarity: String,
    pub category: String,
}

pub struct UserBadgeRow {
    pub user_id: String,
    pub badge: BadgeRow,
    pub earned_at: String,
}

/// Canonical timestamp encoding. Fixed-width UTC so text ordering matches time ordering.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite's datetime('now') has no timezone; treat it as UTC.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .inspect_err(|_| warn!("Corrupt timestamp in row: {}", raw))
        .with_context(|| format!("corrupt timestamp '{}'", raw))
}

pub fn parse_id(raw: &str) -> Result<Uuid> {
    raw.parse::<Uuid>()
        .inspect_err(|_| warn!("Corrupt id in row: {}", raw))
        .with_context(|| format!("corrupt id '{}'", raw))
}

impl UserRow {
    pub fn into_user(self) -> Result<User> {
        Ok(User {
            id: parse_id(&self.id)?,
            created_at: parse_timestamp(&self.created_at)?,
            username: self.username,
            email: self.email,
            level: self.level,
            points: self.points,
            streak: self.streak,
            adventures_completed: self.adventures_completed,
            badges_earned: self.badges_earned,
        })
    }

    pub fn into_summary(self) -> Result<UserSummary> {
        Ok(UserSummary {
            id: parse_id(&self.id)?,
            username: self.username,
            level: self.level,
            adventures_completed: self.adventures_completed,
        })
    }

    pub fn into_friend_summary(self) -> Result<FriendSummary> {
        Ok(FriendSummary {
            id: parse_id(&self.id)?,
            username: self.username,
            level: self.level,
            adventures_completed: self.adventures_completed,
            points: self.points,
        })
    }
}

impl AdventureRow {
    pub fn into_adventure(self) -> Result<Adventure> {
        Ok(Adventure {
            id: parse_id(&self.id)?,
            user_id: parse_id(&self.user_id)?,
            completed_at: parse_timestamp(&self.completed_at)?,
            title: self.title,
            description: self.description,
            location: self.location,
            category: self.category,
            points_earned: self.points_earned,
        })
    }
}

impl MemoryRow {
    pub fn into_memory(self) -> Result<Memory> {
        Ok(Memory {
            id: parse_id(&self.id)?,
            user_id: parse_id(&self.user_id)?,
            adventure_id: self.adventure_id.as_deref().map(parse_id).transpose()?,
            created_at: parse_timestamp(&self.created_at)?,
            title: self.title,
            description: self.description,
        })
    }
}

impl FriendRequestRow {
    pub fn into_request(self) -> Result<FriendRequest> {
        Ok(FriendRequest {
            id: parse_id(&self.id)?,
            sender_id: parse_id(&self.sender_id)?,
            receiver_id: parse_id(&self.receiver_id)?,
            status: self.status.parse()?,
            created_at: parse_timestamp(&self.created_at)?,
            message: self.message,
        })
    }
}

impl IncomingRequestRow {
    pub fn into_incoming(self) -> Result<IncomingFriendRequest> {
        Ok(IncomingFriendRequest {
            id: parse_id(&self.id)?,
            sender: UserSummary {
                id: parse_id(&self.sender_id)?,
                username: self.sender_username,
                level: self.sender_level,
                adventures_completed: self.sender_adventures_completed,
            },
            created_at: parse_timestamp(&self.created_at)?,
            message: self.message,
        })
    }
}

impl BadgeRow {
    pub fn into_badge(self) -> Result<Badge> {
        Ok(Badge {
            id: parse_id(&self.id)?,
            rarity: self.rarity.parse()?,
            name: self.name,
            description: self.description,
            symbol: self.symbol,
            category: self.category,
        })
    }
}

impl UserBadgeRow {
    pub fn into_user_badge(self) -> Result<UserBadge> {
        Ok(UserBadge {
            user_id: parse_id(&self.user_id)?,
            earned_at: parse_timestamp(&self.earned_at)?,
            badge: self.badge.into_badge()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_timestamp_encodings() {
        let ts = "2024-03-01T12:30:00.123456Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(parse_timestamp(&format_timestamp(ts)).unwrap(), ts);

        let legacy = parse_timestamp("2024-03-01 12:30:00").unwrap();
        assert_eq!(format_timestamp(legacy), "2024-03-01T12:30:00.000000Z");
    }

    #[test]
    fn corrupt_status_is_an_error() {
        let row = FriendRequestRow {
            id: Uuid::new_v4().to_string(),
            sender_id: Uuid::new_v4().to_string(),
            receiver_id: Uuid::new_v4().to_string(),
            message: None,
            status: "maybe".into(),
            created_at: format_timestamp(Utc::now()),
        };
        assert!(row.into_request().is_err());
    }
}
