//! Identity ledger: registration, login and profile lookup.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use eventure_db::Database;
use eventure_db::models::{UserRow, format_timestamp};
use eventure_db::queries;
use eventure_types::models::User;

use crate::Result;
use crate::credentials::CredentialStore;
use crate::error::{CoreError, require};
use crate::progression::Progression;

#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Create an account with fresh progression counters.
///
/// Email uniqueness is checked before username uniqueness; both checks and
/// the insert run in one transaction, so a rejected registration writes nothing.
pub fn register_user(
    db: &Database,
    credentials: &dyn CredentialStore,
    new: NewUser,
) -> Result<User> {
    require("username", &new.username)?;
    require("email", &new.email)?;
    require("password", &new.password)?;

    let password_hash = credentials.hash(&new.password)?;
    let start = Progression::default();
    let row = UserRow {
        id: Uuid::new_v4().to_string(),
        username: new.username,
        email: new.email,
        password_hash,
        level: start.level,
        points: start.points,
        streak: start.streak,
        adventures_completed: start.adventures_completed,
        badges_earned: 0,
        created_at: format_timestamp(Utc::now()),
    };

    db.with_tx(|conn| {
        if queries::user_by_email(conn, &row.email)?.is_some() {
            return Err(CoreError::DuplicateEmail);
        }
        if queries::user_by_username(conn, &row.username)?.is_some() {
            return Err(CoreError::DuplicateUsername);
        }
        queries::insert_user(conn, &row)?;
        Ok(())
    })?;

    info!("Registered user {} ({})", row.username, row.id);
    Ok(row.into_user()?)
}

/// Resolve an email/password pair to its user.
///
/// An unknown email and a wrong password fail identically.
pub fn authenticate(
    db: &Database,
    credentials: &dyn CredentialStore,
    email: &str,
    password: &str,
) -> Result<User> {
    require("email", email)?;
    require("password", password)?;

    let Some(row) = db.get_user_by_email(email)? else {
        // Hash anyway so an unknown email costs as much as a wrong password.
        let _ = credentials.hash(password);
        warn!("Login rejected: unknown email");
        return Err(CoreError::InvalidCredentials);
    };

    if !credentials.verify(&row.password_hash, password) {
        warn!("Login rejected for user {}", row.id);
        return Err(CoreError::InvalidCredentials);
    }

    Ok(row.into_user()?)
}

pub fn get_user(db: &Database, id: Uuid) -> Result<User> {
    db.get_user_by_id(&id.to_string())?
        .ok_or(CoreError::UserNotFound)?
        .into_user()
        .map_err(CoreError::from)
}
