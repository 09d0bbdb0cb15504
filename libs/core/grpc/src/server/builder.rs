//! Startup logging and health registration shared by gRPC binaries.

use super::config::ServerConfig;
use tonic_health::ServingStatus;
use tonic_health::server::HealthReporter;
use tracing::info;

/// Helpers around `tonic::transport::Server` setup.
///
/// # Example
///
/// ```ignore
/// use grpc_client::server::{GrpcServer, ServerConfig, create_health_service};
/// use rpc::catalog::{SERVICE_NAME, catalog_service_server::CatalogServiceServer};
///
/// let config = ServerConfig::from_env()?;
/// let (health_reporter, health_service) = create_health_service();
/// GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
/// GrpcServer::log_startup(&config, SERVICE_NAME);
///
/// Server::builder()
///     .add_service(health_service)
///     .add_service(CatalogServiceServer::new(my_impl))
///     .serve(config.socket_addr()?)
///     .await?;
/// ```
pub struct GrpcServer;

impl GrpcServer {
    pub fn log_startup(config: &ServerConfig, service_name: &str) {
        info!(
            addr = %config.addr_string(),
            service = service_name,
            compression = config.enable_compression,
            max_message_size = config.max_decoding_message_size,
            "gRPC server starting"
        );
    }

    /// Mark `service_name` and the empty name as serving.
    ///
    /// The empty name is what generic health checkers query.
    pub async fn setup_health(health_reporter: &HealthReporter, service_name: &str) {
        health_reporter
            .set_service_status(service_name, ServingStatus::Serving)
            .await;
        health_reporter
            .set_service_status("", ServingStatus::Serving)
            .await;

        info!(service = service_name, "Service marked as serving");
    }

    /// Flip both names to not-serving ahead of shutdown.
    pub async fn mark_not_serving(health_reporter: &HealthReporter, service_name: &str) {
        health_reporter
            .set_service_status(service_name, ServingStatus::NotServing)
            .await;
        health_reporter
            .set_service_status("", ServingStatus::NotServing)
            .await;
    }
}

pub use tonic_health::server::health_reporter as create_health_service;
