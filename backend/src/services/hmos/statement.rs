//! HMO statement: ledger lines in a window plus their totals.

use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use crate::services::hmos::get::require_hmo;
use crate::services::hmos::transactions::list_transactions;
use crate::services::DateRange;
use actix_web::{web, HttpResponse};
use common::model::hmo::{HmoStatement, HmoTransactionKind};
use rusqlite::Connection;

/// `GET /api/hmos/{id}/statement`
pub async fn process(
    db: web::Data<Database>,
    id: web::Path<String>,
    range: web::Query<DateRange>,
) -> Result<HttpResponse, ApiError> {
    let statement = build_statement(&*db.conn().await, &id, &range)?;
    Ok(HttpResponse::Ok().json(statement))
}

pub fn build_statement(conn: &Connection, hmo_id: &str, range: &DateRange) -> ApiResult<HmoStatement> {
    let hmo = require_hmo(conn, hmo_id)?;
    let transactions = list_transactions(conn, hmo_id, range)?;

    let total_of = |kind: HmoTransactionKind| -> f64 {
        transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    };
    let total_charges = total_of(HmoTransactionKind::Charge);
    let total_payments = total_of(HmoTransactionKind::Payment);

    Ok(HmoStatement {
        hmo,
        transactions,
        total_charges,
        total_payments,
        balance: total_charges - total_payments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_connection;
    use crate::services::hmos::save::create_hmo;
    use crate::services::hmos::transactions::record_transaction;
    use chrono::{NaiveDate, TimeZone, Utc};
    use common::requests::hmo::{NewHmo, NewHmoTransaction};

    fn entry(kind: HmoTransactionKind, amount: f64, day: u32) -> NewHmoTransaction {
        NewHmoTransaction {
            kind,
            amount,
            description: "Inpatient admission".into(),
            patient_name: Some("Chidi Eze".into()),
            reference: None,
            transaction_date: Some(Utc.with_ymd_and_hms(2026, 4, day, 10, 0, 0).unwrap()),
        }
    }

    #[test]
    fn window_limits_lines_and_totals() {
        let conn = open_memory_connection().unwrap();
        let hmo = create_hmo(
            &conn,
            NewHmo {
                name: "Total Health Trust".into(),
                code: "THT".into(),
                ..NewHmo::default()
            },
        )
        .unwrap();

        record_transaction(&conn, &hmo.id, entry(HmoTransactionKind::Charge, 25000.0, 2)).unwrap();
        record_transaction(&conn, &hmo.id, entry(HmoTransactionKind::Charge, 15000.0, 10)).unwrap();
        record_transaction(&conn, &hmo.id, entry(HmoTransactionKind::Payment, 20000.0, 12)).unwrap();
        record_transaction(&conn, &hmo.id, entry(HmoTransactionKind::Charge, 9000.0, 25)).unwrap();

        let range = DateRange {
            from: NaiveDate::from_ymd_opt(2026, 4, 10),
            to: NaiveDate::from_ymd_opt(2026, 4, 20),
        };
        let statement = build_statement(&conn, &hmo.id, &range).unwrap();
        assert_eq!(statement.transactions.len(), 2);
        assert_eq!(statement.total_charges, 15000.0);
        assert_eq!(statement.total_payments, 20000.0);
        assert_eq!(statement.balance, -5000.0);

        let full = build_statement(&conn, &hmo.id, &DateRange::default()).unwrap();
        assert_eq!(full.balance, 29000.0);
    }

    #[test]
    fn unknown_hmo_and_bad_amount_are_rejected() {
        let conn = open_memory_connection().unwrap();
        assert!(matches!(
            build_statement(&conn, "missing", &DateRange::default()),
            Err(ApiError::NotFound(_))
        ));

        let hmo = create_hmo(
            &conn,
            NewHmo {
                name: "Avon".into(),
                code: "AVN".into(),
                ..NewHmo::default()
            },
        )
        .unwrap();
        let err = record_transaction(&conn, &hmo.id, entry(HmoTransactionKind::Payment, 0.0, 1)).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
