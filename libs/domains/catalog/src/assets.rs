use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::AssetInfo;

/// Binary asset storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Persist `data` for `record_id` under a fresh asset id and return that id.
    async fn save(&self, record_id: String, asset_type: String, data: Vec<u8>) -> CatalogResult<String>;

    /// Descriptor of a stored asset.
    async fn get(&self, asset_id: String) -> CatalogResult<Option<AssetInfo>>;
}

/// Writes each asset to `<dir>/<asset id><type>` and keeps descriptors in memory.
#[derive(Debug)]
pub struct DiskAssetStore {
    dir: PathBuf,
    index: RwLock<HashMap<String, AssetInfo>>,
}

impl DiskAssetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            index: RwLock::new(HashMap::new()),
        }
    }
}

fn poisoned() -> CatalogError {
    CatalogError::AssetStore("asset index lock poisoned".to_string())
}

fn check_asset_type(asset_type: &str) -> CatalogResult<()> {
    let well_formed = asset_type.is_empty()
        || (asset_type.starts_with('.')
            && asset_type.len() > 1
            && asset_type[1..].chars().all(|c| c.is_ascii_alphanumeric()));
    if well_formed {
        Ok(())
    } else {
        Err(CatalogError::AssetStore(format!(
            "unsupported asset type '{asset_type}'"
        )))
    }
}

#[async_trait]
impl AssetStore for DiskAssetStore {
    #[instrument(skip(self, data), fields(record_id = %record_id, size = data.len()))]
    async fn save(&self, record_id: String, asset_type: String, data: Vec<u8>) -> CatalogResult<String> {
        check_asset_type(&asset_type)?;

        let id = Uuid::new_v4().to_string();
        let path = self.dir.join(format!("{id}{asset_type}"));

        tokio::fs::write(&path, &data).await.map_err(|e| {
            CatalogError::AssetStore(format!("cannot write {}: {e}", path.display()))
        })?;

        let info = AssetInfo {
            id: id.clone(),
            record_id,
            asset_type,
            path,
        };
        debug!(asset_id = %id, path = %info.path.display(), "asset written");
        self.index.write().map_err(|_| poisoned())?.insert(id.clone(), info);
        Ok(id)
    }

    async fn get(&self, asset_id: String) -> CatalogResult<Option<AssetInfo>> {
        Ok(self.index.read().map_err(|_| poisoned())?.get(&asset_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_file_and_indexes() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskAssetStore::new(dir.path());

        let id = store
            .save("record-1".into(), ".jpg".into(), vec![1, 2, 3])
            .await
            .unwrap();
        assert!(Uuid::parse_str(&id).is_ok());

        let info = store.get(id.clone()).await.unwrap().unwrap();
        assert_eq!(info.record_id, "record-1");
        assert_eq!(info.asset_type, ".jpg");
        assert_eq!(info.path, dir.path().join(format!("{id}.jpg")));
        assert_eq!(tokio::fs::read(&info.path).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskAssetStore::new(dir.path());
        assert!(store.get("nope".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_directory_is_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskAssetStore::new(dir.path().join("absent"));
        let err = store
            .save("r".into(), ".png".into(), vec![0])
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::AssetStore(_)));
    }

    #[tokio::test]
    async fn test_rejects_path_like_type() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskAssetStore::new(dir.path());
        for bad in ["../x", ".j/pg", "jpg", "."] {
            assert!(store.save("r".into(), bad.into(), vec![0]).await.is_err(), "{bad}");
        }
        assert!(store.save("r".into(), String::new(), vec![0]).await.is_ok());
    }
}
