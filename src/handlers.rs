// src/handlers.rs
use actix_multipart::Multipart;
use actix_web::{Error, HttpResponse, web};
use futures_util::TryStreamExt;
use log::info;
use uuid::Uuid;

use pictoscope::errors::PictoscopeError;
use pictoscope::provider::ImageSource;

use crate::AppState;

pub async fn analyze_images(
    mut payload: Multipart,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let mut images = Vec::new();
    let mut received = 0usize;

    while let Some(mut field) = payload.try_next().await? {
        let filename = field
            .content_disposition()
            .get_filename()
            .ok_or_else(|| PictoscopeError::Validation("No filename provided".to_string()))?
            .to_string();

        let mut image_data = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            received += chunk.len();
            if received > data.max_upload_bytes {
                return Err(PictoscopeError::Validation(format!(
                    "Upload exceeds {} bytes",
                    data.max_upload_bytes
                ))
                .into());
            }
            image_data.extend_from_slice(&chunk);
        }

        if image_data.is_empty() {
            return Err(PictoscopeError::Validation(format!("{} is empty", filename)).into());
        }
        images.push(ImageSource::new(filename, image_data));
    }

    if images.is_empty() {
        return Err(PictoscopeError::Validation("No images uploaded".to_string()).into());
    }

    let entries = data.analyzer.analyze_batch(&images).await;
    for entry in &entries {
        data.redis_service.store_report(&entry.report).await?;
    }
    info!("Stored {} analysis reports", entries.len());

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "count": entries.len(),
        "results": entries
    })))
}

pub async fn get_analysis(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let analysis_id = path.into_inner();
    let report = data.redis_service.get_report(&analysis_id).await?;
    Ok(HttpResponse::Ok().json(&report))
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "pictoscope",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
