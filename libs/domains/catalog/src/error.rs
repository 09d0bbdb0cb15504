use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid record id '{id}': {reason}")]
    InvalidId { id: String, reason: String },

    #[error("Record {0} already exists")]
    AlreadyExists(String),

    #[error("Record {0} does not exist")]
    RecordMissing(String),

    #[error("Cannot copy record {id}: {reason}")]
    Copy { id: String, reason: String },

    #[error("Asset is too large: {size} > {max}")]
    AssetTooLarge { size: usize, max: usize },

    #[error("Unexpected upload frame: {0}")]
    InvalidFrame(String),

    #[error("Asset store error: {0}")]
    AssetStore(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Request is canceled")]
    Canceled,

    #[error("Deadline is exceeded")]
    DeadlineExceeded,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for tonic::Status {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::InvalidId { .. }
            | CatalogError::AssetTooLarge { .. }
            | CatalogError::InvalidFrame(_) => tonic::Status::invalid_argument(message),
            CatalogError::AlreadyExists(_) => tonic::Status::already_exists(message),
            CatalogError::RecordMissing(_)
            | CatalogError::Copy { .. }
            | CatalogError::AssetStore(_)
            | CatalogError::Io(_)
            | CatalogError::Internal(_) => tonic::Status::internal(message),
            CatalogError::Stream(_) => tonic::Status::unknown(message),
            CatalogError::Canceled => tonic::Status::cancelled(message),
            CatalogError::DeadlineExceeded => tonic::Status::deadline_exceeded(message),
        }
    }
}
