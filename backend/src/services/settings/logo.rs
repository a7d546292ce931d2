//! Logo upload for report headers.
//!
//! Accepts `multipart/form-data` with a single `logo` file field. The image
//! is stored inline on the settings record as a base64 `data:` URI so print
//! views can embed it without a second request.

use crate::actor::Actor;
use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use crate::services::settings::save::update_settings;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use common::requests::settings::UpdateSettings;
use futures_util::StreamExt;
use mime_guess::from_path;

/// Largest accepted logo, in bytes.
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

/// `POST /api/settings/logo`
pub async fn process(
    db: web::Data<Database>,
    actor: Actor,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let logo = read_logo(payload).await?;
    let settings = update_settings(
        &*db.conn().await,
        UpdateSettings {
            logo: Some(Some(logo)),
            ..UpdateSettings::default()
        },
        actor.id(),
    )?;
    Ok(HttpResponse::Ok().json(settings))
}

async fn read_logo(mut payload: Multipart) -> ApiResult<String> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ApiError::validation(format!("Invalid upload: {e}")))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if name.as_deref() != Some("logo") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ApiError::validation(format!("Invalid upload: {e}")))?;
            if bytes.len() + chunk.len() > MAX_LOGO_BYTES {
                return Err(ApiError::validation("Logo must not exceed 2 MB"));
            }
            bytes.extend_from_slice(&chunk);
        }
        return logo_data_uri(&filename, &bytes);
    }
    Err(ApiError::validation("Missing logo file"))
}

/// Encodes an uploaded image as a `data:` URI, checking its type from the file name.
pub fn logo_data_uri(filename: &str, bytes: &[u8]) -> ApiResult<String> {
    if bytes.is_empty() {
        return Err(ApiError::validation("Logo file is empty"));
    }
    let mime = from_path(filename).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(ApiError::validation("Logo must be an image file"));
    }
    Ok(format!("data:{};base64,{}", mime.essence_str(), STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_is_encoded_as_data_uri() {
        let uri = logo_data_uri("crest.png", &[0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn non_images_and_empty_files_are_rejected() {
        assert!(logo_data_uri("notes.txt", b"hello").is_err());
        assert!(logo_data_uri("logo.jpg", b"").is_err());
    }
}
