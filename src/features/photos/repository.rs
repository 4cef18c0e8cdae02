use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::features::photos::models::ListingPhoto;
use crate::features::photos::schemas::PhotoCreate;
use crate::utilities::errors::AppError;

const RETURNING_PHOTO: &str = " RETURNING id, listing_id, original_name, stored_name, \
     content_type, size_bytes, storage_path, created_at";

/// Persists a metadata row. Only called after the file write succeeded, so
/// the store never observes a photo without backing bytes.
pub async fn create_photo(pool: &SqlitePool, photo: PhotoCreate) -> Result<ListingPhoto, AppError> {
    let insert = format!(
        "INSERT INTO listing_photos (id, listing_id, original_name, stored_name, \
         content_type, size_bytes, storage_path, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?){RETURNING_PHOTO}"
    );

    let row = sqlx::query_as::<_, ListingPhoto>(&insert)
        .bind(Uuid::new_v4())
        .bind(photo.listing_id)
        .bind(&photo.original_name)
        .bind(&photo.stored_name)
        .bind(&photo.content_type)
        .bind(photo.size_bytes)
        .bind(&photo.storage_path)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

    Ok(row)
}

pub async fn get_photo(
    pool: &SqlitePool,
    photo_id: &Uuid,
) -> Result<Option<ListingPhoto>, AppError> {
    let photo = sqlx::query_as::<_, ListingPhoto>("SELECT * FROM listing_photos WHERE id = ?")
        .bind(photo_id)
        .fetch_optional(pool)
        .await?;

    Ok(photo)
}

pub async fn list_by_listing(
    pool: &SqlitePool,
    listing_id: &Uuid,
) -> Result<Vec<ListingPhoto>, AppError> {
    let photos = sqlx::query_as::<_, ListingPhoto>(
        "SELECT * FROM listing_photos WHERE listing_id = ? ORDER BY created_at ASC",
    )
    .bind(listing_id)
    .fetch_all(pool)
    .await?;

    Ok(photos)
}

pub async fn list_photos(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> Result<Vec<ListingPhoto>, AppError> {
    let photos = sqlx::query_as::<_, ListingPhoto>(
        "SELECT * FROM listing_photos ORDER BY created_at DESC LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(photos)
}
