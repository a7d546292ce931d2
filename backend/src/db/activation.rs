//! Soft delete / reactivate for tables carrying an `is_active` flag.

use chrono::Utc;
use rusqlite::{params, Connection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTable {
    Charges,
    Hmos,
    Users,
}

impl ActiveTable {
    fn name(&self) -> &'static str {
        match self {
            ActiveTable::Charges => "charges",
            ActiveTable::Hmos => "hmos",
            ActiveTable::Users => "users",
        }
    }
}

/// Sets the active flag on one row. Returns `false` when the id is unknown.
pub fn set_active(conn: &Connection, table: ActiveTable, id: &str, active: bool) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        &format!(
            "UPDATE {} SET is_active = ?2, updated_at = ?3 WHERE id = ?1",
            table.name()
        ),
        params![id, active, Utc::now()],
    )?;
    Ok(changed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_connection;

    #[test]
    fn toggles_existing_rows_only() {
        let conn = open_memory_connection().unwrap();
        conn.execute(
            "INSERT INTO charges (id, name, category, amount, created_at, updated_at)
             VALUES ('c1', 'Consultation', 'OPD', 5000, '2026-01-01', '2026-01-01')",
            [],
        )
        .unwrap();

        assert!(set_active(&conn, ActiveTable::Charges, "c1", false).unwrap());
        let active: bool = conn
            .query_row("SELECT is_active FROM charges WHERE id = 'c1'", [], |row| row.get(0))
            .unwrap();
        assert!(!active);

        assert!(!set_active(&conn, ActiveTable::Charges, "missing", true).unwrap());
    }
}
