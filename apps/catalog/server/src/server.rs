//! Server bootstrap
//!
//! - Tracing initialization
//! - Store construction and optional sample seeding
//! - Health check service (grpc.health.v1.Health)
//! - gRPC listener with message limits and zstd compression

use std::future::Future;
use std::sync::Arc;

use core_config::catalog::CatalogConfig;
use core_config::{Environment, FromEnv};
use domain_catalog::{
    CallSignal, CatalogService, DiskAssetStore, InMemoryRatingRepository,
    InMemoryRecordRepository, sample,
};
use eyre::{Result, WrapErr};
use grpc_client::server::{GrpcServer, ServerConfig, create_health_service};
use rpc::catalog::SERVICE_NAME;
use rpc::catalog::catalog_service_server::CatalogServiceServer;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::codec::CompressionEncoding;
use tonic::transport::Server;
use tracing::info;

use crate::service::CatalogServiceImpl;

/// Run the gRPC server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the asset directory cannot
/// be created, the address cannot be bound, or the server fails while running.
pub async fn run() -> Result<()> {
    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    let server_config = ServerConfig::from_env().wrap_err("Failed to load gRPC server configuration")?;
    let catalog_config = CatalogConfig::from_env().wrap_err("Failed to load catalog configuration")?;

    let service = build_service(&catalog_config).await?;

    let addr = server_config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {addr}"))?;

    serve(&server_config, service, listener, shutdown_signal()).await
}

/// Build the domain service over fresh stores.
pub async fn build_service(config: &CatalogConfig) -> Result<CatalogService> {
    tokio::fs::create_dir_all(&config.asset_dir)
        .await
        .wrap_err_with(|| format!("Failed to create asset directory {}", config.asset_dir.display()))?;

    let service = CatalogService::new(
        Arc::new(InMemoryRecordRepository::new()),
        Arc::new(DiskAssetStore::new(&config.asset_dir)),
        Arc::new(InMemoryRatingRepository::new()),
    );

    for _ in 0..config.seed_records {
        service
            .create_record(sample::record(), &CallSignal::never())
            .wrap_err("Failed to seed sample record")?;
    }

    info!(
        asset_dir = %config.asset_dir.display(),
        seeded = config.seed_records,
        "Catalog stores ready"
    );
    Ok(service)
}

/// Serve the catalog and health services on `listener` until `shutdown` resolves.
pub async fn serve(
    config: &ServerConfig,
    service: CatalogService,
    listener: TcpListener,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let (health_reporter, health_service) = create_health_service();
    GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;

    let mut catalog = CatalogServiceServer::new(CatalogServiceImpl::new(service))
        .max_decoding_message_size(config.max_decoding_message_size)
        .max_encoding_message_size(config.max_encoding_message_size);
    if config.enable_compression {
        catalog = catalog
            .accept_compressed(CompressionEncoding::Zstd)
            .send_compressed(CompressionEncoding::Zstd);
    }

    let local_addr = listener.local_addr().wrap_err("Listener has no local address")?;
    GrpcServer::log_startup(config, SERVICE_NAME);
    info!(%local_addr, "CatalogService listening");

    Server::builder()
        .add_service(health_service)
        .add_service(catalog)
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
        .wrap_err("gRPC server failed")?;

    GrpcServer::mark_not_serving(&health_reporter, SERVICE_NAME).await;
    info!("CatalogService stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_service_creates_dir_and_seeds() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("img");
        let config = CatalogConfig::new(&dir).with_seed_records(5);

        let service = build_service(&config).await.unwrap();

        assert!(dir.is_dir());
        assert_eq!(service.record_count().unwrap(), 5);
    }
}
