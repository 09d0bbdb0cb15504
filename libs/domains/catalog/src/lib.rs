//! Catalog Domain
//!
//! Records (laptop configurations), threshold search, binary assets and
//! per-record ratings.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  CatalogService  │  ← id assignment, upload bounds, signal checks
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────────────────────────────────────────┐
//! │ RecordRepository │ AssetStore │ RatingRepository     │  ← traits + in-memory/disk impls
//! └────────┬─────────────────────────────────────────────┘
//!          │
//! ┌────────▼─────────┐
//! │      Models      │  ← Record, ThresholdFilter, AssetInfo, Rating
//! └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_catalog::{
//!     CallSignal, CatalogService, DiskAssetStore, InMemoryRatingRepository,
//!     InMemoryRecordRepository,
//! };
//!
//! let service = CatalogService::new(
//!     Arc::new(InMemoryRecordRepository::new()),
//!     Arc::new(DiskAssetStore::new("img")),
//!     Arc::new(InMemoryRatingRepository::new()),
//! );
//! let id = service
//!     .create_record(domain_catalog::sample::record(), &CallSignal::never())
//!     .unwrap();
//! ```

pub mod assets;
pub mod conversions;
pub mod error;
pub mod filter;
pub mod models;
pub mod ratings;
pub mod repository;
pub mod sample;
pub mod serializer;
pub mod service;
pub mod signal;

pub use assets::{AssetStore, DiskAssetStore};
pub use error::{CatalogError, CatalogResult};
pub use models::{
    AssetInfo, Display, Gpu, Keyboard, KeyboardLayout, Memory, MemoryUnit, Panel, Processor,
    Rating, Record, Resolution, StorageDevice, StorageDriver, ThresholdFilter, Weight,
};
pub use ratings::{InMemoryRatingRepository, RatingRepository};
pub use repository::{InMemoryRecordRepository, RecordRepository};
pub use service::{AssetUpload, CatalogService, MAX_ASSET_SIZE, StoredAsset};
pub use signal::{CallGuard, CallSignal};
