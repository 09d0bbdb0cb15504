//! gRPC server scaffolding: listener configuration and health reporting.
//!
//! ```ignore
//! use grpc_client::server::{GrpcServer, ServerConfig, create_health_service};
//!
//! let config = ServerConfig::from_env()?;
//! let (health_reporter, health_service) = create_health_service();
//! GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
//! GrpcServer::log_startup(&config, SERVICE_NAME);
//! ```

mod builder;
mod config;

pub use builder::{GrpcServer, create_health_service};
pub use config::ServerConfig;
