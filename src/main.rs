use estate_service::{
    app,
    features::photos::{
        service::ListingPhotoService, storage::PhotoStorage, validation::PhotoValidator,
    },
    services::database::Database,
    utilities::{app_state::AppState, config::Config, errors::AppError},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let config = Config::init().await?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.tracing_level.to_string())),
        )
        .init();

    let database = Database::init(&config).await?;

    // Explicit construction at process start; everything downstream receives
    // these by reference through the router state.
    let storage = PhotoStorage::init(config.storage_dir.clone()).await?;
    let validator = PhotoValidator::new(config.max_upload_size_bytes());
    let photo_service = ListingPhotoService::new(database.pool.clone(), storage, validator);

    let state = AppState {
        database,
        config: config.clone(),
        photo_service,
    };

    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    info!("listening on {}", config.server_address);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
