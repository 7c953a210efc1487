pub mod migrations;
pub mod models;
pub mod queries;

use anyhow::{Result, anyhow};
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Handle to the SQLite store.
///
/// A single connection sits behind a mutex, so write units from concurrent
/// requests run one after another. `with_tx` additionally wraps each unit in
/// an IMMEDIATE transaction, which keeps read-modify-write sequences (the
/// progression update, request acceptance) atomic even if another process
/// opens the same file.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let db = Self::init(conn)?;
        info!("Database opened at {}", path.display());
        Ok(db)
    }

    /// Fresh private database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` against the connection outside of any explicit transaction.
    pub fn with_conn<F, T, E>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&Connection) -> std::result::Result<T, E>,
        E: From<anyhow::Error>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow!("DB lock poisoned: {}", e))?;
        f(&*conn)
    }

    /// Run `f` inside a transaction. Everything `f` wrote is committed when it
    /// returns `Ok`; on `Err` the transaction is dropped and rolled back.
    pub fn with_tx<F, T, E>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&Connection) -> std::result::Result<T, E>,
        E: From<anyhow::Error> + From<rusqlite::Error>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| anyhow!("DB lock poisoned: {}", e))?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = f(&*tx)?;
        tx.commit()?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_unit_rolls_back() {
        let db = Database::open_in_memory().unwrap();

        let result: Result<()> = db.with_tx(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, email, password_hash, created_at)
                 VALUES ('u1', 'ada', 'ada@example.com', 'x', '2024-01-01T00:00:00Z')",
                [],
            )?;
            Err(anyhow!("abort"))
        });
        assert!(result.is_err());

        let count: i64 = db
            .with_conn(|conn| {
                conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
                    .map_err(anyhow::Error::from)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn successful_unit_commits() {
        let db = Database::open_in_memory().unwrap();

        db.with_tx(|conn| -> Result<()> {
            conn.execute(
                "INSERT INTO users (id, username, email, password_hash, created_at)
                 VALUES ('u1', 'ada', 'ada@example.com', 'x', '2024-01-01T00:00:00Z')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        assert_eq!(db.count_users().unwrap(), 1);
    }
}
