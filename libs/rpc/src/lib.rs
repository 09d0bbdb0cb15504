//! Wire contract for the catalog service.
//!
//! ```ignore
//! use rpc::catalog::catalog_service_client::CatalogServiceClient;
//!
//! let mut client = CatalogServiceClient::connect("http://[::1]:50051").await?;
//! ```

pub mod catalog;
