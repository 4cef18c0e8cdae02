use std::{path::Path, path::PathBuf, str::FromStr};

use tokio::fs;
use tracing::Level;

use crate::utilities::errors::AppError;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_address: String,
    pub tracing_level: Level,

    // DATABASE
    pub database_url: String,

    // PHOTO STORAGE
    pub storage_dir: PathBuf,
    pub max_upload_size_mb: u64,
}

impl Config {
    pub async fn init() -> Result<Self, AppError> {
        let server_address = get_config_value(
            "SERVER_ADDRESS",
            Some("SERVER_ADDRESS"),
            Some("0.0.0.0:8001".to_string()),
        )
        .await?
        .ok_or_else(|| AppError::EnvironmentVariableNotSetError("SERVER_ADDRESS".to_string()))?;

        let tracing_level =
            get_config_value("TRACING_LEVEL", Some("TRACING_LEVEL"), Some(Level::DEBUG))
                .await?
                .ok_or_else(|| {
                    AppError::EnvironmentVariableNotSetError("TRACING_LEVEL".to_string())
                })?;

        let database_url = get_config_value(
            "DATABASE_URL",
            Some("DATABASE_URL"),
            Some("sqlite://estate.db?mode=rwc".to_string()),
        )
        .await?
        .ok_or_else(|| AppError::EnvironmentVariableNotSetError("DATABASE_URL".to_string()))?;

        let storage_dir = get_config_value(
            "STORAGE_DIR",
            Some("STORAGE_DIR"),
            Some(PathBuf::from("./photo_storage")),
        )
        .await?
        .ok_or_else(|| AppError::EnvironmentVariableNotSetError("STORAGE_DIR".to_string()))?;

        let max_upload_size_mb =
            get_config_value("MAX_UPLOAD_SIZE_MB", Some("MAX_UPLOAD_SIZE_MB"), Some(5))
                .await?
                .ok_or_else(|| {
                    AppError::EnvironmentVariableNotSetError("MAX_UPLOAD_SIZE_MB".to_string())
                })?;

        let config = Config {
            server_address,
            tracing_level,
            database_url,
            storage_dir,
            max_upload_size_mb,
        };

        Ok(config)
    }

    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_mb * 1024 * 1024
    }
}

/// Try to resolve a config value from Docker secrets, then an env var.
/// - `secret_name` → filename inside `/run/secrets/`
/// - `env_name` → optional environment variable key
///
/// Returns parsed `T` if found and successfully parsed.
pub async fn get_config_value<T>(
    secret_name: &str,
    env_name: Option<&str>,
    fallback: Option<T>,
) -> Result<Option<T>, AppError>
where
    T: FromStr,
{
    // 1. Docker secrets
    let docker_secret = Path::new("/run/secrets").join(secret_name);
    if docker_secret.exists() {
        match fs::read_to_string(&docker_secret).await {
            Ok(content) => {
                if let Ok(parsed) = T::from_str(content.trim()) {
                    return Ok(Some(parsed));
                }
            }
            Err(e) => {
                return Err(AppError::FileReadError(format!(
                    "Failed to read docker secret at {0}, {e}",
                    docker_secret.display()
                )));
            }
        }
    }

    // 2. Env var
    if let Some(env_key) = env_name
        && let Ok(val) = std::env::var(env_key)
        && let Ok(parsed) = T::from_str(val.trim())
    {
        return Ok(Some(parsed));
    }

    // 3. Final fallback
    Ok(fallback)
}
