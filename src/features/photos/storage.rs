use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::utilities::errors::AppError;

/// Filesystem tree for photo bytes. Stored names are freshly generated per
/// write, so files are never overwritten in place and concurrent uploads
/// cannot race on the same path.
#[derive(Clone, Debug)]
pub struct PhotoStorage {
    root: PathBuf,
}

impl PhotoStorage {
    pub async fn init(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Strips any directory components from a user-supplied filename. Both
    /// separator styles are handled so a traversal attempt cannot survive a
    /// platform mismatch.
    pub fn sanitize_filename(raw: &str) -> Result<String, AppError> {
        let name = raw
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();

        if name.is_empty() || name == "." || name == ".." {
            return Err(AppError::InvalidFilenameError(raw.to_string()));
        }

        Ok(name)
    }

    /// Fresh random token plus the original extension: collision-free and
    /// leaks nothing from the user-supplied name.
    pub fn build_stored_name(sanitized_name: &str) -> String {
        let token = Uuid::new_v4().simple();
        match Path::new(sanitized_name).extension() {
            Some(extension) => format!("{}.{}", token, extension.to_string_lossy()),
            None => token.to_string(),
        }
    }

    pub async fn write(&self, stored_name: &str, data: &[u8]) -> Result<PathBuf, AppError> {
        let target = self.root.join(stored_name);
        fs::write(&target, data).await?;
        Ok(target)
    }

    /// Reads photo bytes back. A missing file is reported distinctly from a
    /// missing metadata row so operators can tell corruption from absence.
    pub async fn read(&self, storage_path: &Path) -> Result<Vec<u8>, AppError> {
        if !fs::try_exists(storage_path).await? {
            return Err(AppError::PhotoMissingError(format!(
                "Stored photo not found on disk at {}",
                storage_path.display()
            )));
        }

        let data = fs::read(storage_path).await?;
        Ok(data)
    }
}
