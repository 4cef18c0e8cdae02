use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata row for a stored photo. Every row is expected to have a readable
/// file at `storage_path`; a row without one is a storage-consistency fault.
#[derive(FromRow, Deserialize, Serialize, PartialEq, Clone, Debug)]
pub struct ListingPhoto {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub original_name: String,
    pub stored_name: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub storage_path: String,
    pub created_at: DateTime<Utc>,
}
