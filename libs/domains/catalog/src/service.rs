use std::sync::Arc;
use tracing::{info, instrument, warn};

use grpc_client::conversions::{new_uuid_string, parse_uuid};

use crate::assets::AssetStore;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{AssetInfo, Rating, Record, ThresholdFilter};
use crate::ratings::RatingRepository;
use crate::repository::{Emit, RecordRepository};
use crate::signal::CallSignal;

/// Largest asset accepted by an upload, in bytes.
pub const MAX_ASSET_SIZE: usize = 1 << 20;

/// Catalog business logic over the record, asset and rating stores.
#[derive(Clone)]
pub struct CatalogService {
    records: Arc<dyn RecordRepository>,
    assets: Arc<dyn AssetStore>,
    ratings: Arc<dyn RatingRepository>,
}

impl CatalogService {
    pub fn new(
        records: Arc<dyn RecordRepository>,
        assets: Arc<dyn AssetStore>,
        ratings: Arc<dyn RatingRepository>,
    ) -> Self {
        Self {
            records,
            assets,
            ratings,
        }
    }

    /// Store `record`, assigning a fresh id when it has none, and return the id.
    #[instrument(skip(self, record, signal), fields(record_id = %record.id))]
    pub fn create_record(&self, mut record: Record, signal: &CallSignal) -> CatalogResult<String> {
        if record.id.is_empty() {
            record.id = new_uuid_string();
        } else {
            parse_uuid(&record.id).map_err(|reason| CatalogError::InvalidId {
                id: record.id.clone(),
                reason,
            })?;
        }

        signal.check()?;

        self.records.save(&record)?;
        info!(id = %record.id, "record created");
        Ok(record.id)
    }

    pub fn find_record(&self, id: &str) -> CatalogResult<Option<Record>> {
        self.records.find(id)
    }

    pub fn record_count(&self) -> CatalogResult<usize> {
        self.records.count()
    }

    /// Stream every matching record into `emit`. `emit` may block, so call
    /// it off the async executor.
    pub fn search_records(
        &self,
        signal: &CallSignal,
        filter: &ThresholdFilter,
        emit: &mut Emit<'_>,
    ) -> CatalogResult<()> {
        self.records.search(signal, filter, emit)
    }

    /// Start an upload for an existing record.
    #[instrument(skip(self))]
    pub fn begin_upload(&self, record_id: &str, asset_type: &str) -> CatalogResult<AssetUpload> {
        if self.records.find(record_id)?.is_none() {
            return Err(CatalogError::RecordMissing(record_id.to_string()));
        }
        Ok(AssetUpload {
            record_id: record_id.to_string(),
            asset_type: asset_type.to_string(),
            data: Vec::new(),
        })
    }

    /// Hand a completed upload to the asset store.
    #[instrument(skip(self, upload), fields(record_id = %upload.record_id, size = upload.size()))]
    pub async fn commit_upload(&self, upload: AssetUpload) -> CatalogResult<StoredAsset> {
        let size = upload.size();
        let id = self
            .assets
            .save(upload.record_id, upload.asset_type, upload.data)
            .await
            .map_err(|e| match e {
                CatalogError::AssetStore(_) => e,
                other => CatalogError::AssetStore(other.to_string()),
            })?;

        info!(asset_id = %id, size, "asset stored");
        Ok(StoredAsset { id, size })
    }

    pub async fn asset(&self, asset_id: &str) -> CatalogResult<Option<AssetInfo>> {
        self.assets.get(asset_id.to_string()).await
    }

    /// Add one score for `record_id` and return the running totals.
    pub fn rate(&self, record_id: &str, score: f64) -> CatalogResult<Rating> {
        let rating = self.ratings.add(record_id, score)?;
        if rating.count == u32::MAX {
            warn!(record_id, "rating count saturated");
        }
        Ok(rating)
    }

    pub fn rating(&self, record_id: &str) -> CatalogResult<Option<Rating>> {
        self.ratings.get(record_id)
    }
}

/// In-progress asset upload. Dropping it discards everything received so far.
#[derive(Debug)]
pub struct AssetUpload {
    record_id: String,
    asset_type: String,
    data: Vec<u8>,
}

impl AssetUpload {
    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Append a chunk, refusing to grow past [`MAX_ASSET_SIZE`].
    pub fn push(&mut self, chunk: &[u8]) -> CatalogResult<()> {
        let size = self.data.len() + chunk.len();
        if size > MAX_ASSET_SIZE {
            self.data = Vec::new();
            return Err(CatalogError::AssetTooLarge {
                size,
                max: MAX_ASSET_SIZE,
            });
        }
        self.data.extend_from_slice(chunk);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub id: String,
    pub size: usize,
}
