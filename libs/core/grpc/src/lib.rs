//! # gRPC plumbing shared by catalog services
//!
//! - [`server`]: listener configuration from `GRPC_*` variables and health reporting
//! - [`deadline`]: client deadlines from the `grpc-timeout` header
//! - [`conversions`]: UUID and timestamp helpers for wire/domain mapping
//! - [`error`]: `ToTonicResult` / `ToTonicOption` for turning conversion
//!   failures into `tonic::Status`
//!
//! ```ignore
//! use grpc_client::ToTonicResult;
//!
//! let record: Record = proto.try_into().to_tonic()?;
//! ```

pub mod conversions;
pub mod deadline;
pub mod error;
pub mod server;

pub use deadline::request_timeout;
pub use error::{GrpcError, GrpcResult, ToTonicOption, ToTonicResult};
