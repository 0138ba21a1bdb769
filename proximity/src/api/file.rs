//! Entities read from a local JSON file.

use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use super::{ApiError, EntitySource};

/// [`EntitySource`] reading a JSON array of entities from disk.
///
/// The file is read again on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource<T> {
    path: PathBuf,
    _entity: PhantomData<fn() -> T>,
}

impl<T> JsonFileSource<T> {
    /// Source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource {
            path: path.into(),
            _entity: PhantomData,
        }
    }

    /// The file entities are read from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> EntitySource<T> for JsonFileSource<T>
where
    T: DeserializeOwned + Send,
{
    async fn fetch_all(&self) -> Result<Vec<T>, ApiError> {
        api_debug!("(fetch_all) reading entities from {}.", self.path.display());
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            api_error!(
                "(fetch_all) could not read {}: {}",
                self.path.display(),
                e
            );
            ApiError::ClientError(format!("{}: {}", self.path.display(), e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            api_error!(
                "(fetch_all) could not parse {}: {}",
                self.path.display(),
                e
            );
            ApiError::InvalidData(format!("{}: {}", self.path.display(), e))
        })
    }
}
