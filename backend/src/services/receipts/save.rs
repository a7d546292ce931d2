use crate::actor::Actor;
use crate::db::sequence::{next_number, NumberedDocument};
use crate::db::{new_id, to_json, Database};
use crate::error::{required, ApiError, ApiResult};
use crate::services::banks::get::{find_bank, find_default_bank};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::receipt::{PaymentMethod, Receipt, ReceiptItem};
use common::requests::receipt::NewReceipt;
use log::info;
use rusqlite::{params, Connection};

/// `POST /api/receipts`
pub async fn process(
    db: web::Data<Database>,
    actor: Actor,
    payload: web::Json<NewReceipt>,
) -> Result<HttpResponse, ApiError> {
    let receipt = create_receipt(&*db.conn().await, payload.into_inner(), actor.id())?;
    Ok(HttpResponse::Created().json(receipt))
}

fn checked_items(items: Vec<ReceiptItem>) -> ApiResult<Vec<ReceiptItem>> {
    if items.is_empty() {
        return Err(ApiError::validation("At least one item is required"));
    }
    items
        .into_iter()
        .map(|item| {
            let description = required(&item.description, "item description")?;
            if !item.amount.is_finite() || item.amount <= 0.0 {
                return Err(ApiError::validation(format!(
                    "Amount for `{description}` must be greater than zero"
                )));
            }
            Ok(ReceiptItem {
                description,
                amount: item.amount,
            })
        })
        .collect()
}

/// Resolves the bank a transfer was paid into. Other payment methods carry no bank.
fn resolve_bank(
    conn: &Connection,
    method: PaymentMethod,
    bank_id: Option<String>,
) -> ApiResult<Option<String>> {
    if method != PaymentMethod::Transfer {
        return Ok(None);
    }
    let bank = match bank_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => find_bank(conn, &id)?.ok_or_else(|| ApiError::not_found("Bank"))?,
        None => find_default_bank(conn)?
            .ok_or_else(|| ApiError::NotFound("No default bank configured".into()))?,
    };
    if !bank.is_active {
        return Err(ApiError::validation(format!(
            "Bank account {} is inactive",
            bank.account_number
        )));
    }
    Ok(Some(bank.id))
}

pub fn create_receipt(conn: &Connection, payload: NewReceipt, actor: Option<&str>) -> ApiResult<Receipt> {
    let patient_id = required(&payload.patient_id, "patientId")?;
    let patient_name = required(&payload.patient_name, "patientName")?;
    let items = checked_items(payload.items)?;
    let bank_id = resolve_bank(conn, payload.payment_method, payload.bank_id)?;
    let now = Utc::now();

    let receipt = Receipt {
        id: new_id(),
        receipt_number: next_number(conn, NumberedDocument::Receipt, now)?,
        patient_id,
        patient_name,
        total_amount: items.iter().map(|item| item.amount).sum(),
        items,
        payment_method: payload.payment_method,
        bank_id,
        received_by: actor.map(String::from),
        created_at: now,
    };

    conn.execute(
        "INSERT INTO receipts (id, receipt_number, patient_id, patient_name, items, total_amount,
         payment_method, bank_id, received_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            receipt.id,
            receipt.receipt_number,
            receipt.patient_id,
            receipt.patient_name,
            to_json(&receipt.items)?,
            receipt.total_amount,
            receipt.payment_method.as_str(),
            receipt.bank_id,
            receipt.received_by,
            receipt.created_at,
        ],
    )?;

    info!(
        "receipt {} issued for patient {} ({})",
        receipt.receipt_number, receipt.patient_id, receipt.total_amount
    );
    Ok(receipt)
}
