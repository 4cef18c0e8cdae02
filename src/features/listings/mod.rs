pub mod handlers;
pub mod models;
pub mod query;
pub mod repository;
pub mod schemas;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/listings", post(handlers::add_listings_handler))
        .route("/api/v1/listings", get(handlers::get_listings_handler))
        .route(
            "/api/v1/listings/{listing_id}",
            get(handlers::get_single_listing_handler),
        )
        .route(
            "/api/v1/listings/{listing_id}",
            patch(handlers::patch_listing_handler),
        )
        .route(
            "/api/v1/listings/{listing_id}",
            delete(handlers::delete_listing_handler),
        )
}
