pub mod handlers;
pub mod models;
pub mod repository;
pub mod schemas;
pub mod service;
pub mod storage;
pub mod validation;

use axum::{
    Router,
    routing::{get, post},
};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/listings/{listing_id}/photos",
            post(handlers::upload_photo_handler),
        )
        .route(
            "/api/v1/listings/{listing_id}/photos/batch",
            post(handlers::upload_photos_handler),
        )
        .route(
            "/api/v1/listings/{listing_id}/photos",
            get(handlers::get_photo_metadata_handler),
        )
        .route(
            "/api/v1/listings/{listing_id}/photos/download",
            get(handlers::download_listing_photos_handler),
        )
        .route("/api/v1/photos", get(handlers::list_photos_handler))
        .route(
            "/api/v1/photos/{photo_id}/file",
            get(handlers::download_photo_file_handler),
        )
}
