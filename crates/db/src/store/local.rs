//! Document store persisted as one JSON file.
//!
//! File layout:
//!
//! ```json
//! { "schemaVersion": 5, "collections": { "leads": [ ... ], ... } }
//! ```
//!
//! Every commit rewrites the whole file through a temporary sibling and a
//! rename, so a crash leaves either the old or the new contents.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use leadflow_core::model::{Collection, SCHEMA_VERSION};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info, warn};

use super::staging::{Collections, stage};
use super::{ChangeEvent, ChangeFeed, Document, DocumentStore, StoreError, WriteBatch};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataFile {
    schema_version: u32,
    #[serde(default)]
    collections: Collections,
}

/// Keeps every collection in memory and in a JSON file.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    data: RwLock<Collections>,
    feed: ChangeFeed,
}

impl LocalStore {
    /// Opens the file at `path`, starting empty if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read and
    /// `StoreError::Serialization` if it is not a valid data file.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let data = if tokio::fs::try_exists(&path).await? {
            let contents = tokio::fs::read_to_string(&path).await?;
            let file: DataFile = serde_json::from_str(&contents)?;
            if file.schema_version != SCHEMA_VERSION {
                warn!(
                    path = %path.display(),
                    found = file.schema_version,
                    expected = SCHEMA_VERSION,
                    "Data file schema version differs, reading with compatibility aliases"
                );
            }
            info!(
                path = %path.display(),
                collections = file.collections.len(),
                "Loaded data file"
            );
            file.collections
        } else {
            debug!(path = %path.display(), "Data file not found, starting empty");
            Collections::new()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
            feed: ChangeFeed::new(),
        })
    }

    /// Location of the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_file(&self, collections: &Collections) -> Result<(), StoreError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct DataFileRef<'a> {
            schema_version: u32,
            collections: &'a Collections,
        }

        let json = serde_json::to_string_pretty(&DataFileRef {
            schema_version: SCHEMA_VERSION,
            collections,
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &json).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for LocalStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .data
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.data.read().await.get(&collection).and_then(|docs| {
            docs.iter()
                .find(|d| d.get("id").and_then(Value::as_str) == Some(id))
                .cloned()
        }))
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let touched = {
            let mut data = self.data.write().await;
            let staged = stage(&data, &batch)?;
            let touched = staged.touched();

            let mut next = data.clone();
            staged.apply_to(&mut next);
            self.write_file(&next).await?;
            *data = next;
            touched
        };
        debug!(path = %self.path.display(), ops = batch.len(), ?touched, "Committed batch");
        self.feed.publish(touched);
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<ChangeEvent> {
        self.feed.subscribe()
    }
}
