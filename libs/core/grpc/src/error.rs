use thiserror::Error;

pub type GrpcResult<T> = Result<T, GrpcError>;

/// Errors raised while configuring a gRPC listener
#[derive(Error, Debug)]
pub enum GrpcError {
  /// The configured host/port pair is not a socket address
  #[error("Invalid listen address '{addr}': {source}")]
  InvalidAddress {
    addr: String,
    #[source]
    source: std::net::AddrParseError,
  },

  /// A `GRPC_*` variable holds a value that does not parse
  #[error("Bad server setting: {0}")]
  InvalidConfig(String),
}

/// Turns `String` conversion failures into `INVALID_ARGUMENT` statuses.
///
/// ```ignore
/// let record: Record = proto.try_into().to_tonic()?;
/// ```
pub trait ToTonicResult<T> {
  fn to_tonic(self) -> Result<T, tonic::Status>;
}

impl<T> ToTonicResult<T> for Result<T, String> {
  fn to_tonic(self) -> Result<T, tonic::Status> {
    self.map_err(tonic::Status::invalid_argument)
  }
}

/// Rejects a missing required field with `INVALID_ARGUMENT`.
///
/// ```ignore
/// let record = request.record.ok_or_invalid("record is required")?;
/// ```
pub trait ToTonicOption<T> {
  fn ok_or_invalid(self, field_message: &str) -> Result<T, tonic::Status>;
}

impl<T> ToTonicOption<T> for Option<T> {
  fn ok_or_invalid(self, field_message: &str) -> Result<T, tonic::Status> {
    self.ok_or_else(|| tonic::Status::invalid_argument(field_message))
  }
}
