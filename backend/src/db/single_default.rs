//! "Exactly one default" enforcement for tables with an `is_default` flag.
//!
//! Callers run these helpers inside a transaction on the locked connection,
//! so the unset-others and set-target writes commit together.

use rusqlite::{params, Connection};

/// Tables allowed to carry a collection-wide default flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultTable {
    Banks,
}

impl DefaultTable {
    fn name(&self) -> &'static str {
        match self {
            DefaultTable::Banks => "banks",
        }
    }
}

/// Clears the default flag on every row except `keep_id`.
pub fn clear_others(conn: &Connection, table: DefaultTable, keep_id: &str) -> rusqlite::Result<usize> {
    conn.execute(
        &format!(
            "UPDATE {} SET is_default = 0 WHERE id <> ?1 AND is_default = 1",
            table.name()
        ),
        params![keep_id],
    )
}

/// Makes `id` the only default row.
///
/// Returns `false`, touching nothing, when no row has that id.
pub fn promote_default(conn: &Connection, table: DefaultTable, id: &str) -> rusqlite::Result<bool> {
    let exists: bool = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", table.name()),
        params![id],
        |row| row.get(0),
    )?;
    if !exists {
        return Ok(false);
    }
    clear_others(conn, table, id)?;
    conn.execute(
        &format!("UPDATE {} SET is_default = 1 WHERE id = ?1", table.name()),
        params![id],
    )?;
    Ok(true)
}

/// Number of rows currently flagged default.
#[cfg(test)]
pub fn count_defaults(conn: &Connection, table: DefaultTable) -> rusqlite::Result<i64> {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {} WHERE is_default = 1", table.name()),
        [],
        |row| row.get(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_connection;

    fn seed(conn: &Connection, id: &str, is_default: bool) {
        conn.execute(
            "INSERT INTO banks (id, bank_name, account_name, account_number, is_default, created_at, updated_at)
             VALUES (?1, 'Bank', 'Hospital', '0001', ?2, '2026-01-01', '2026-01-01')",
            params![id, is_default],
        )
        .unwrap();
    }

    #[test]
    fn promote_leaves_single_default() {
        let conn = open_memory_connection().unwrap();
        seed(&conn, "a", true);
        seed(&conn, "b", false);
        seed(&conn, "c", true);

        assert!(promote_default(&conn, DefaultTable::Banks, "b").unwrap());
        assert_eq!(count_defaults(&conn, DefaultTable::Banks).unwrap(), 1);
        let current: String = conn
            .query_row("SELECT id FROM banks WHERE is_default = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(current, "b");
    }

    #[test]
    fn promote_unknown_id_keeps_existing_default() {
        let conn = open_memory_connection().unwrap();
        seed(&conn, "a", true);

        assert!(!promote_default(&conn, DefaultTable::Banks, "missing").unwrap());
        assert_eq!(count_defaults(&conn, DefaultTable::Banks).unwrap(), 1);
    }
}
