use crate::db::sequence::{next_number, NumberedDocument};
use crate::db::{new_id, to_json, Database};
use crate::error::{required, ApiError, ApiResult};
use crate::services::hmos::get::require_hmo;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::claim::{Claim, ClaimItem, ClaimStatus};
use common::requests::claim::NewClaim;
use log::info;
use rusqlite::{params, Connection};

/// `POST /api/claims`
pub async fn process(db: web::Data<Database>, payload: web::Json<NewClaim>) -> Result<HttpResponse, ApiError> {
    let claim = create_claim(&*db.conn().await, payload.into_inner())?;
    Ok(HttpResponse::Created().json(claim))
}

fn checked_items(items: Vec<ClaimItem>) -> ApiResult<Vec<ClaimItem>> {
    if items.is_empty() {
        return Err(ApiError::validation("At least one item is required"));
    }
    items
        .into_iter()
        .map(|item| {
            let description = required(&item.description, "item description")?;
            if item.quantity == 0 {
                return Err(ApiError::validation(format!(
                    "Quantity for `{description}` must be at least 1"
                )));
            }
            if !item.unit_price.is_finite() || item.unit_price < 0.0 {
                return Err(ApiError::validation(format!(
                    "Unit price for `{description}` must be zero or more"
                )));
            }
            Ok(ClaimItem { description, ..item })
        })
        .collect()
}

pub fn create_claim(conn: &Connection, payload: NewClaim) -> ApiResult<Claim> {
    let hmo_id = required(&payload.hmo_id, "hmoId")?;
    let hmo = require_hmo(conn, &hmo_id)?;
    if !hmo.is_active {
        return Err(ApiError::validation(format!("HMO {} is inactive", hmo.name)));
    }
    let patient_id = required(&payload.patient_id, "patientId")?;
    let patient_name = required(&payload.patient_name, "patientName")?;
    let items = checked_items(payload.items)?;
    let now = Utc::now();

    let claim = Claim {
        id: new_id(),
        claim_number: next_number(conn, NumberedDocument::Claim, now)?,
        hmo_id: hmo.id,
        patient_id,
        patient_name,
        enrollee_id: payload.enrollee_id.filter(|e| !e.trim().is_empty()),
        service_date: payload.service_date,
        total_amount: items.iter().map(ClaimItem::line_total).sum(),
        items,
        approved_amount: None,
        status: ClaimStatus::Pending,
        rejection_reason: None,
        status_updated_by: None,
        status_updated_at: None,
        created_at: now,
        updated_at: now,
    };

    conn.execute(
        "INSERT INTO claims (id, claim_number, hmo_id, patient_id, patient_name, enrollee_id,
         service_date, items, total_amount, approved_amount, status, rejection_reason,
         status_updated_by, status_updated_at, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL, ?10, NULL, NULL, NULL, ?11, ?11)",
        params![
            claim.id,
            claim.claim_number,
            claim.hmo_id,
            claim.patient_id,
            claim.patient_name,
            claim.enrollee_id,
            claim.service_date,
            to_json(&claim.items)?,
            claim.total_amount,
            claim.status.as_str(),
            claim.created_at,
        ],
    )?;
    info!(
        "claim {} raised against HMO {} for {}",
        claim.claim_number, claim.hmo_id, claim.total_amount
    );
    Ok(claim)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::open_memory_connection;
    use crate::services::claims::get::{find_claim, list_claims, ClaimFilter};
    use crate::services::hmos::save::create_hmo;
    use crate::services::hmos::status::set_hmo_active;
    use chrono::NaiveDate;
    use common::requests::hmo::NewHmo;

    pub(crate) fn seed_hmo(conn: &Connection, code: &str) -> String {
        create_hmo(
            conn,
            NewHmo {
                name: format!("{code} Health"),
                code: code.into(),
                ..NewHmo::default()
            },
        )
        .unwrap()
        .id
    }

    pub(crate) fn new_claim(hmo_id: &str, day: u32) -> NewClaim {
        NewClaim {
            hmo_id: hmo_id.into(),
            patient_id: "PT-0100".into(),
            patient_name: "Ngozi Okafor".into(),
            enrollee_id: Some("ENR-77".into()),
            service_date: NaiveDate::from_ymd_opt(2026, 5, day).unwrap(),
            items: vec![
                ClaimItem {
                    description: "Consultation".into(),
                    quantity: 1,
                    unit_price: 5000.0,
                },
                ClaimItem {
                    description: "Paracetamol 500mg".into(),
                    quantity: 10,
                    unit_price: 50.0,
                },
            ],
        }
    }

    #[test]
    fn total_is_sum_of_line_items() {
        let conn = open_memory_connection().unwrap();
        let hmo_id = seed_hmo(&conn, "AXA");
        let claim = create_claim(&conn, new_claim(&hmo_id, 3)).unwrap();

        assert_eq!(claim.total_amount, 5500.0);
        assert!(claim.claim_number.starts_with("CLM-"));
        assert_eq!(find_claim(&conn, &claim.id).unwrap().unwrap(), claim);
    }

    #[test]
    fn inactive_or_unknown_hmo_is_refused() {
        let conn = open_memory_connection().unwrap();
        assert!(matches!(
            create_claim(&conn, new_claim("missing", 3)),
            Err(ApiError::NotFound(_))
        ));

        let hmo_id = seed_hmo(&conn, "AVN");
        set_hmo_active(&conn, &hmo_id, false).unwrap();
        assert!(matches!(
            create_claim(&conn, new_claim(&hmo_id, 3)),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn zero_quantity_is_refused() {
        let conn = open_memory_connection().unwrap();
        let hmo_id = seed_hmo(&conn, "RLH");
        let mut claim = new_claim(&hmo_id, 3);
        claim.items[1].quantity = 0;
        assert!(matches!(create_claim(&conn, claim), Err(ApiError::Validation(_))));
    }

    #[test]
    fn list_filters_by_hmo_and_service_window() {
        let conn = open_memory_connection().unwrap();
        let first = seed_hmo(&conn, "HYG");
        let second = seed_hmo(&conn, "LWH");
        create_claim(&conn, new_claim(&first, 2)).unwrap();
        create_claim(&conn, new_claim(&first, 20)).unwrap();
        create_claim(&conn, new_claim(&second, 20)).unwrap();

        let by_hmo = ClaimFilter {
            hmo_id: Some(first.clone()),
            ..ClaimFilter::default()
        };
        assert_eq!(list_claims(&conn, &by_hmo).unwrap().len(), 2);

        let windowed = ClaimFilter {
            hmo_id: Some(first),
            range: crate::services::DateRange {
                from: NaiveDate::from_ymd_opt(2026, 5, 10),
                to: None,
            },
            ..ClaimFilter::default()
        };
        assert_eq!(list_claims(&conn, &windowed).unwrap().len(), 1);

        let bad_status = ClaimFilter {
            status: Some("lost".into()),
            ..ClaimFilter::default()
        };
        assert!(matches!(list_claims(&conn, &bad_status), Err(ApiError::Validation(_))));
    }
}
