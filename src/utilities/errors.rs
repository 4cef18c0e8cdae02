use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Environment variable {0} not set")]
    EnvironmentVariableNotSetError(String),
    #[error("File read error, {0}")]
    FileReadError(String),
    #[error("Database url parsing error, {0}")]
    DatabaseParsingError(String),
    #[error("Sqlx error: {0}")]
    SqlxError(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
    #[error("IO error, {0}")]
    IoError(#[from] std::io::Error),
    #[error("Validation error, {0}")]
    ValidationError(String),
    #[error("Validation errors, {0}")]
    ValidatorValidationErrors(#[from] validator::ValidationErrors),
    #[error("Invalid form data, {0}")]
    InvalidFormData(String),
    #[error("Malformed filter expression {0:?}")]
    MalformedFilterError(String),
    #[error("Unknown filter operator {0:?}")]
    UnknownOperatorError(String),
    #[error("Unknown column {0:?}")]
    UnknownColumnError(String),
    #[error("Listing with title {0:?} already exists")]
    DuplicateTitleError(String),
    #[error("{0}")]
    NotFoundError(String),
    #[error("Only image uploads are supported, got {0:?}")]
    InvalidImageTypeError(String),
    #[error("Uploaded photo is empty")]
    EmptyUploadError,
    #[error("Photo exceeds upload limit of {limit_bytes} bytes")]
    PhotoTooLargeError { limit_bytes: u64 },
    #[error("Invalid filename {0:?}")]
    InvalidFilenameError(String),
    #[error("{0}")]
    PhotoMissingError(String),
    #[error("Photo {index} ({filename}) failed, {source}")]
    PhotoBatchError {
        index: usize,
        filename: String,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedFilterError(_)
            | Self::UnknownOperatorError(_)
            | Self::UnknownColumnError(_)
            | Self::EmptyUploadError
            | Self::InvalidFilenameError(_) => StatusCode::BAD_REQUEST,
            Self::ValidationError(_)
            | Self::ValidatorValidationErrors(_)
            | Self::InvalidFormData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::DuplicateTitleError(_) => StatusCode::CONFLICT,
            Self::NotFoundError(_) | Self::PhotoMissingError(_) => StatusCode::NOT_FOUND,
            Self::InvalidImageTypeError(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PhotoTooLargeError { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::PhotoBatchError { source, .. } => source.status_code(),
            Self::EnvironmentVariableNotSetError(_)
            | Self::FileReadError(_)
            | Self::DatabaseParsingError(_)
            | Self::SqlxError(_)
            | Self::MigrateError(_)
            | Self::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({"error": self.to_string()}));

        (status, body).into_response()
    }
}
