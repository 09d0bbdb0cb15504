//! Listener settings read from `GRPC_*` environment variables.

use crate::error::{GrpcError, GrpcResult};
use std::net::SocketAddr;

const DEFAULT_HOST: &str = "[::1]";
const DEFAULT_PORT: u16 = 50051;
const DEFAULT_MAX_MESSAGE_SIZE: usize = 4 * 1024 * 1024;

/// Configuration for the gRPC listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to (default: [::1])
    pub host: String,
    /// Port to listen on (default: 50051, 0 picks an ephemeral port)
    pub port: u16,
    /// Accept and send zstd-compressed messages (default: true)
    pub enable_compression: bool,
    /// Largest single message the server will decode (default: 4MB)
    pub max_decoding_message_size: usize,
    /// Largest single message the server will encode (default: 4MB)
    pub max_encoding_message_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            enable_compression: true,
            max_decoding_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_encoding_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Reads:
    /// - `GRPC_HOST` (default: [::1])
    /// - `GRPC_PORT` (default: 50051)
    /// - `GRPC_COMPRESSION` (default: true; `false` or `0` disables)
    /// - `GRPC_MAX_MESSAGE_SIZE` (default: 4194304)
    ///
    /// A port or size that is set but unparsable is rejected.
    pub fn from_env() -> GrpcResult<Self> {
        let host = std::env::var("GRPC_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = parse_var("GRPC_PORT", DEFAULT_PORT)?;
        let enable_compression = std::env::var("GRPC_COMPRESSION")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);
        let max_message_size = parse_var("GRPC_MAX_MESSAGE_SIZE", DEFAULT_MAX_MESSAGE_SIZE)?;

        Ok(Self {
            host,
            port,
            enable_compression,
            max_decoding_message_size: max_message_size,
            max_encoding_message_size: max_message_size,
        })
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_compression(mut self, enable: bool) -> Self {
        self.enable_compression = enable;
        self
    }

    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_decoding_message_size = size;
        self.max_encoding_message_size = size;
        self
    }

    /// Resolve the socket address to bind to.
    pub fn socket_addr(&self) -> GrpcResult<SocketAddr> {
        let addr = self.addr_string();
        addr.parse()
            .map_err(|source| GrpcError::InvalidAddress { addr, source })
    }

    /// Address string for logging.
    pub fn addr_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> GrpcResult<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| GrpcError::InvalidConfig(format!("{key}={raw} is not a valid value"))),
        Err(_) => Ok(default),
    }
}
