//! SQLite persistence.
//!
//! A single connection is shared by every request behind an async mutex, so
//! store calls from concurrent requests never interleave. Operations that
//! touch several rows open a transaction on the locked connection.

pub mod activation;
pub mod sequence;
pub mod single_default;

use rusqlite::types::Type;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS banks (
    id             TEXT PRIMARY KEY,
    bank_name      TEXT NOT NULL,
    account_name   TEXT NOT NULL,
    account_number TEXT NOT NULL,
    branch_name    TEXT,
    swift_code     TEXT,
    is_active      INTEGER NOT NULL DEFAULT 1,
    is_default     INTEGER NOT NULL DEFAULT 0,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS settings (
    id              TEXT PRIMARY KEY CHECK (id = 'system'),
    hospital_name   TEXT NOT NULL,
    logo            TEXT,
    address         TEXT NOT NULL,
    phone           TEXT NOT NULL,
    email           TEXT NOT NULL,
    website         TEXT NOT NULL,
    system_version  TEXT NOT NULL,
    report_header   TEXT NOT NULL,
    report_footer   TEXT NOT NULL,
    currency_symbol TEXT NOT NULL,
    last_updated_by TEXT,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS charges (
    id         TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    category   TEXT NOT NULL,
    amount     REAL NOT NULL,
    is_active  INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS receipts (
    id             TEXT PRIMARY KEY,
    receipt_number TEXT NOT NULL UNIQUE,
    patient_id     TEXT NOT NULL,
    patient_name   TEXT NOT NULL,
    items          TEXT NOT NULL,
    total_amount   REAL NOT NULL,
    payment_method TEXT NOT NULL,
    bank_id        TEXT,
    received_by    TEXT,
    created_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS hmos (
    id             TEXT PRIMARY KEY,
    name           TEXT NOT NULL,
    code           TEXT NOT NULL UNIQUE,
    contact_person TEXT,
    phone          TEXT,
    email          TEXT,
    address        TEXT,
    is_active      INTEGER NOT NULL DEFAULT 1,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS hmo_transactions (
    id               TEXT PRIMARY KEY,
    hmo_id           TEXT NOT NULL REFERENCES hmos(id),
    kind             TEXT NOT NULL,
    amount           REAL NOT NULL,
    description      TEXT NOT NULL,
    patient_name     TEXT,
    reference        TEXT,
    transaction_date TEXT NOT NULL,
    created_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS claims (
    id                TEXT PRIMARY KEY,
    claim_number      TEXT NOT NULL UNIQUE,
    hmo_id            TEXT NOT NULL REFERENCES hmos(id),
    patient_id        TEXT NOT NULL,
    patient_name      TEXT NOT NULL,
    enrollee_id       TEXT,
    service_date      TEXT NOT NULL,
    items             TEXT NOT NULL,
    total_amount      REAL NOT NULL,
    approved_amount   REAL,
    status            TEXT NOT NULL,
    rejection_reason  TEXT,
    status_updated_by TEXT,
    status_updated_at TEXT,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS drugs (
    id         TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    store      TEXT NOT NULL,
    unit       TEXT NOT NULL,
    quantity   INTEGER NOT NULL CHECK (quantity >= 0),
    unit_price REAL NOT NULL,
    is_active  INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (name, store)
);

CREATE TABLE IF NOT EXISTS transfers (
    id               TEXT PRIMARY KEY,
    drug_id          TEXT NOT NULL REFERENCES drugs(id),
    drug_name        TEXT NOT NULL,
    from_store       TEXT NOT NULL,
    to_store         TEXT NOT NULL,
    quantity         INTEGER NOT NULL,
    status           TEXT NOT NULL,
    requested_by     TEXT,
    reviewed_by      TEXT,
    reviewed_at      TEXT,
    rejection_reason TEXT,
    created_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS disposals (
    id          TEXT PRIMARY KEY,
    drug_id     TEXT NOT NULL REFERENCES drugs(id),
    drug_name   TEXT NOT NULL,
    store       TEXT NOT NULL,
    quantity    INTEGER NOT NULL,
    reason      TEXT NOT NULL,
    disposed_by TEXT,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    id         TEXT PRIMARY KEY,
    username   TEXT NOT NULL UNIQUE,
    full_name  TEXT NOT NULL,
    role       TEXT NOT NULL,
    is_active  INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Shared handle to the record store, injected into handlers as `web::Data`.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (or creates) the store at `path`. `:memory:` yields an in-memory store.
    pub fn open(path: &str) -> rusqlite::Result<Self> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        Self::from_connection(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Self::from_connection(open_memory_connection()?)
    }

    fn from_connection(conn: Connection) -> rusqlite::Result<Self> {
        migrate(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub async fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().await
    }
}

/// Creates every table if missing.
pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(SCHEMA)
}

/// An in-memory connection with the schema applied.
#[cfg(test)]
pub fn open_memory_connection() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    migrate(&conn)?;
    Ok(conn)
}

/// Reads a text column into a type parsed with `FromStr`, such as a status enum.
pub fn parse_column<T>(idx: usize, raw: String) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    raw.parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

/// Reads a JSON-encoded text column, used for embedded line items.
pub fn json_column<T: DeserializeOwned>(idx: usize, raw: String) -> rusqlite::Result<T> {
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub fn to_json<T: Serialize>(value: &T) -> rusqlite::Result<String> {
    serde_json::to_string(value).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrate_is_idempotent() {
        let conn = open_memory_connection().unwrap();
        migrate(&conn).unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 11);
    }

    #[actix_web::test]
    async fn memory_path_opens_fresh_store() {
        let db = Database::open(":memory:").unwrap();
        let conn = db.conn().await;
        let banks: i64 = conn
            .query_row("SELECT COUNT(*) FROM banks", [], |row| row.get(0))
            .unwrap();
        assert_eq!(banks, 0);
    }
}
