use argon2::Params;
use uuid::Uuid;

use eventure_db::Database;
use eventure_types::models::User;

use crate::credentials::Argon2Credentials;
use crate::ledger::{self, NewUser};

/// Minimum-cost argon2 so tests don't spend seconds hashing.
pub fn fast_credentials() -> Argon2Credentials {
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap();
    Argon2Credentials::with_params(params)
}

pub fn db() -> Database {
    Database::open_in_memory().unwrap()
}

pub fn register(db: &Database, username: &str) -> User {
    ledger::register_user(
        db,
        &fast_credentials(),
        NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "hunter22".to_string(),
        },
    )
    .unwrap()
}

pub fn reload(db: &Database, id: Uuid) -> User {
    ledger::get_user(db, id).unwrap()
}

/// Install a trigger that aborts whenever `event` fires (for example
/// `BEFORE UPDATE ON users`), simulating a storage fault mid-transaction.
pub fn inject_failure(db: &Database, name: &str, event: &str) {
    db.with_conn(|conn| -> anyhow::Result<()> {
        conn.execute_batch(&format!(
            "CREATE TRIGGER {name} {event}
             BEGIN SELECT RAISE(ABORT, 'injected failure'); END;"
        ))?;
        Ok(())
    })
    .unwrap();
}
