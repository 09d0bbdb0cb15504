//! Catalog gRPC Service
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (gRPC, optional zstd)
//! CatalogServiceImpl (service.rs)
//!   ↓ (proto ↔ domain conversions, call signal from grpc-timeout / disconnect)
//! CatalogService (domain layer)
//!   ↓
//! InMemoryRecordRepository · DiskAssetStore · InMemoryRatingRepository
//! ```
//!
//! ## Modules
//!
//! - `server`: store construction, health reporting and the listener
//! - `service`: gRPC handlers (CatalogServiceImpl)

pub mod server;
pub mod service;

pub use server::{build_service, run, serve};
pub use service::CatalogServiceImpl;
