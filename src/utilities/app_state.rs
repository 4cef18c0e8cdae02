use axum::extract::FromRef;

use crate::{
    features::photos::service::ListingPhotoService, services::database::Database,
    utilities::config::Config,
};

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub config: Config,
    pub photo_service: ListingPhotoService,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.database.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for ListingPhotoService {
    fn from_ref(state: &AppState) -> Self {
        state.photo_service.clone()
    }
}
