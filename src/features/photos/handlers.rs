use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    features::photos::{
        schemas::{Pagination, PhotoPayload, PhotoUpload},
        service::ListingPhotoService,
    },
    utilities::errors::AppError,
};

async fn collect_uploads(
    listing_id: Uuid,
    mut multipart: Multipart,
) -> Result<Vec<PhotoUpload>, AppError> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::InvalidFormData("Failed to read multipart stream".into()))?
    {
        debug!(
            "name: {:?}, file_name: {:?}",
            field.name(),
            field.file_name()
        );
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" | "files" => {
                let filename = field.file_name().unwrap_or("uploaded_photo").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::InvalidFormData("Failed to read photo field".into()))?;

                uploads.push(PhotoUpload {
                    listing_id,
                    filename,
                    content_type,
                    data,
                });
            }
            _ => {
                warn!("Unknown multipart field: {}", name);
            }
        }
    }

    Ok(uploads)
}

/// The single-upload endpoint takes exactly one file field; extra fields are
/// rejected rather than silently dropped.
pub fn take_single_upload(mut uploads: Vec<PhotoUpload>) -> Result<PhotoUpload, AppError> {
    if uploads.len() > 1 {
        return Err(AppError::InvalidFormData(
            "Expected exactly one 'file' field".into(),
        ));
    }

    uploads
        .pop()
        .ok_or_else(|| AppError::InvalidFormData("Expected a single 'file' field".into()))
}

pub async fn upload_photo_handler(
    State(service): State<ListingPhotoService>,
    Path(listing_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let uploads = collect_uploads(listing_id, multipart).await?;
    let upload = take_single_upload(uploads)?;

    let stored = service.store_photo(upload).await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn upload_photos_handler(
    State(service): State<ListingPhotoService>,
    Path(listing_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let uploads = collect_uploads(listing_id, multipart).await?;

    if uploads.is_empty() {
        return Err(AppError::InvalidFormData(
            "Expected at least one 'files' field".into(),
        ));
    }

    let stored = service.store_photos(uploads).await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn get_photo_metadata_handler(
    State(service): State<ListingPhotoService>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let metadata = service.list_photos_by_listing(&listing_id).await?;

    Ok(Json(metadata))
}

pub async fn list_photos_handler(
    State(service): State<ListingPhotoService>,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    pagination.validate()?;

    let photos = service
        .list_photos(pagination.limit, pagination.offset)
        .await?;

    Ok(Json(photos))
}

pub async fn download_listing_photos_handler(
    State(service): State<ListingPhotoService>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let photos = service.read_photos_by_listing(&listing_id).await?;

    let payload: Vec<PhotoPayload> = photos
        .into_iter()
        .map(|(metadata, data)| PhotoPayload {
            id: metadata.id,
            listing_id: metadata.listing_id,
            original_name: metadata.original_name,
            content_type: metadata.content_type,
            size_bytes: metadata.size_bytes,
            data: BASE64.encode(data),
        })
        .collect();

    Ok(Json(payload))
}

pub async fn download_photo_file_handler(
    State(service): State<ListingPhotoService>,
    Path(photo_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (metadata, data) = service.read_photo(&photo_id).await?;

    let content_type = metadata
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let disposition = format!("inline; filename=\"{}\"", metadata.original_name);

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    ))
}
