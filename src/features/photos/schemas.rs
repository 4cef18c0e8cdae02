use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utilities::errors::AppError;

// -- =====================
// -- IN
// -- =====================
/// One upload as it arrives from the transport: untrusted filename and
/// content type plus the raw payload.
#[derive(Clone, Debug)]
pub struct PhotoUpload {
    pub listing_id: Uuid,
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Metadata for a photo whose file write already succeeded.
#[derive(Clone, Debug)]
pub struct PhotoCreate {
    pub listing_id: Uuid,
    pub original_name: String,
    pub stored_name: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub storage_path: String,
}

// -- =====================
// -- OUT
// -- =====================
/// Download projection: metadata plus the base64-encoded file contents.
#[derive(Serialize, Debug)]
pub struct PhotoPayload {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub original_name: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub data: String,
}

// -- =====================
// -- QUERY
// -- =====================
#[derive(Deserialize, Serialize, Debug)]
pub struct Pagination {
    #[serde(default = "default_offset")]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_offset() -> i64 {
    0
}

fn default_limit() -> i64 {
    50
}

impl Pagination {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.offset < 0 {
            return Err(AppError::ValidationError(
                "Offset must be positive".to_string(),
            ));
        }

        if self.limit <= 0 {
            return Err(AppError::ValidationError(
                "Limit must be positive".to_string(),
            ));
        }

        if self.limit > 100 {
            return Err(AppError::ValidationError(
                "Limit cannot exceed 100".to_string(),
            ));
        }

        Ok(())
    }
}
