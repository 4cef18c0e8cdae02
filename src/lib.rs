pub mod features;
pub mod services;
pub mod utilities;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::utilities::app_state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(features::listings::routes())
        .merge(features::photos::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
