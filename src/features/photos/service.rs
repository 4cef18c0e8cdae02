use std::path::Path;

use sqlx::SqlitePool;
use tracing::{error, warn};
use uuid::Uuid;

use crate::features::photos::models::ListingPhoto;
use crate::features::photos::repository;
use crate::features::photos::schemas::{PhotoCreate, PhotoUpload};
use crate::features::photos::storage::PhotoStorage;
use crate::features::photos::validation::PhotoValidator;
use crate::utilities::errors::AppError;

/// Orchestrates validator → storage → metadata store for uploads and the
/// reverse path for downloads. Constructed once at process start and shared
/// by reference through the router state.
#[derive(Clone)]
pub struct ListingPhotoService {
    pool: SqlitePool,
    storage: PhotoStorage,
    validator: PhotoValidator,
}

impl ListingPhotoService {
    pub fn new(pool: SqlitePool, storage: PhotoStorage, validator: PhotoValidator) -> Self {
        Self {
            pool,
            storage,
            validator,
        }
    }

    /// Sanitize, validate, write the file, then persist metadata — in that
    /// order, so nothing is written anywhere for an invalid upload and a
    /// metadata row never exists without its backing file. A metadata-store
    /// failure after the file write leaves an orphaned file; that is
    /// tolerated and logged rather than bridged with a two-phase commit.
    pub async fn store_photo(&self, upload: PhotoUpload) -> Result<ListingPhoto, AppError> {
        let sanitized_name = PhotoStorage::sanitize_filename(&upload.filename)?;

        self.validator
            .validate(upload.content_type.as_deref(), upload.data.len() as u64)?;

        let stored_name = PhotoStorage::build_stored_name(&sanitized_name);
        let storage_path = self.storage.write(&stored_name, &upload.data).await?;

        let metadata = PhotoCreate {
            listing_id: upload.listing_id,
            original_name: sanitized_name,
            stored_name,
            content_type: upload.content_type,
            size_bytes: upload.data.len() as i64,
            storage_path: storage_path.to_string_lossy().into_owned(),
        };

        match repository::create_photo(&self.pool, metadata).await {
            Ok(photo) => Ok(photo),
            Err(e) => {
                warn!(
                    "metadata insert failed, orphaned file left at {}: {e}",
                    storage_path.display()
                );
                Err(e)
            }
        }
    }

    /// Sequential batch upload. A failure at item k keeps items before it
    /// persisted and reports the failing index and filename.
    pub async fn store_photos(
        &self,
        uploads: Vec<PhotoUpload>,
    ) -> Result<Vec<ListingPhoto>, AppError> {
        let mut stored = Vec::with_capacity(uploads.len());

        for (index, upload) in uploads.into_iter().enumerate() {
            let filename = upload.filename.clone();
            match self.store_photo(upload).await {
                Ok(photo) => stored.push(photo),
                Err(source) => {
                    return Err(AppError::PhotoBatchError {
                        index,
                        filename,
                        source: Box::new(source),
                    });
                }
            }
        }

        Ok(stored)
    }

    pub async fn get_photo(&self, photo_id: &Uuid) -> Result<Option<ListingPhoto>, AppError> {
        repository::get_photo(&self.pool, photo_id).await
    }

    pub async fn list_photos_by_listing(
        &self,
        listing_id: &Uuid,
    ) -> Result<Vec<ListingPhoto>, AppError> {
        repository::list_by_listing(&self.pool, listing_id).await
    }

    pub async fn list_photos(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ListingPhoto>, AppError> {
        repository::list_photos(&self.pool, limit, offset).await
    }

    /// Metadata lookup first, then the file read. Both absences surface as
    /// the same error kind to the caller; the log line tells which layer was
    /// missing.
    pub async fn read_photo(&self, photo_id: &Uuid) -> Result<(ListingPhoto, Vec<u8>), AppError> {
        let metadata = repository::get_photo(&self.pool, photo_id)
            .await?
            .ok_or_else(|| {
                AppError::PhotoMissingError(format!("Photo with id {photo_id} was not found"))
            })?;

        let data = self.read_photo_bytes(&metadata).await?;
        Ok((metadata, data))
    }

    pub async fn read_photos_by_listing(
        &self,
        listing_id: &Uuid,
    ) -> Result<Vec<(ListingPhoto, Vec<u8>)>, AppError> {
        let metadata_list = repository::list_by_listing(&self.pool, listing_id).await?;

        let mut photos = Vec::with_capacity(metadata_list.len());
        for metadata in metadata_list {
            let data = self.read_photo_bytes(&metadata).await?;
            photos.push((metadata, data));
        }

        Ok(photos)
    }

    async fn read_photo_bytes(&self, metadata: &ListingPhoto) -> Result<Vec<u8>, AppError> {
        match self.storage.read(Path::new(&metadata.storage_path)).await {
            Err(AppError::PhotoMissingError(_)) => {
                // Metadata row exists but the file is gone: an integrity
                // fault on the storage side, not a plain miss.
                error!(
                    "storage consistency fault: metadata {} present but file missing at {}",
                    metadata.id, metadata.storage_path
                );
                Err(AppError::PhotoMissingError(format!(
                    "Stored photo for id {} not found on disk",
                    metadata.id
                )))
            }
            other => other,
        }
    }
}
