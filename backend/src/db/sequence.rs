use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

/// Tables whose rows carry a human-readable, per-day document number.
#[derive(Debug, Clone, Copy)]
pub enum NumberedDocument {
    Receipt,
    Claim,
}

impl NumberedDocument {
    fn prefix(&self) -> &'static str {
        match self {
            NumberedDocument::Receipt => "RCT",
            NumberedDocument::Claim => "CLM",
        }
    }

    fn table_and_column(&self) -> (&'static str, &'static str) {
        match self {
            NumberedDocument::Receipt => ("receipts", "receipt_number"),
            NumberedDocument::Claim => ("claims", "claim_number"),
        }
    }
}

/// Next number of the form `PFX-YYYYMMDD-NNNN` for the day of `at`.
///
/// Continues from the highest suffix issued that day, so deleted rows never
/// free a number for reuse. Must run on the locked connection so two requests
/// cannot draw the same number.
pub fn next_number(
    conn: &Connection,
    document: NumberedDocument,
    at: DateTime<Utc>,
) -> rusqlite::Result<String> {
    let day_prefix = format!("{}-{}-", document.prefix(), at.format("%Y%m%d"));
    let (table, column) = document.table_and_column();
    let last: i64 = conn.query_row(
        &format!(
            "SELECT COALESCE(MAX(CAST(substr({column}, length(?1) + 1) AS INTEGER)), 0)
             FROM {table} WHERE {column} LIKE ?1 || '%'"
        ),
        params![day_prefix],
        |row| row.get(0),
    )?;
    Ok(format!("{day_prefix}{:04}", last + 1))
}
