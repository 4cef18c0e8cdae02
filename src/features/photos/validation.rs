use crate::utilities::errors::AppError;

/// Pure upload gate: no filesystem or store interaction happens until these
/// checks pass. The check order is fixed so error precedence stays
/// deterministic: content type, then empty payload, then size ceiling.
#[derive(Clone, Copy, Debug)]
pub struct PhotoValidator {
    max_upload_size_bytes: u64,
}

impl PhotoValidator {
    pub fn new(max_upload_size_bytes: u64) -> Self {
        Self {
            max_upload_size_bytes,
        }
    }

    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_bytes
    }

    pub fn validate(&self, content_type: Option<&str>, size_bytes: u64) -> Result<(), AppError> {
        match content_type {
            Some(content_type) if content_type.starts_with("image/") => {}
            other => {
                return Err(AppError::InvalidImageTypeError(
                    other.unwrap_or("<missing>").to_string(),
                ));
            }
        }

        if size_bytes == 0 {
            return Err(AppError::EmptyUploadError);
        }

        if size_bytes > self.max_upload_size_bytes {
            return Err(AppError::PhotoTooLargeError {
                limit_bytes: self.max_upload_size_bytes,
            });
        }

        Ok(())
    }
}
