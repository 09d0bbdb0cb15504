//! Record snapshots on disk: protobuf binary and JSON.

use prost::Message;
use std::path::Path;
use thiserror::Error;

use rpc::catalog as pb;

use crate::models::Record;

#[derive(Debug, Error)]
pub enum SerializerError {
    #[error("Cannot access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot decode protobuf: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Cannot convert record: {0}")]
    Convert(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SerializerError + '_ {
    move |source| SerializerError::Io {
        path: path.display().to_string(),
        source,
    }
}

pub fn write_binary_file(record: &Record, path: impl AsRef<Path>) -> Result<(), SerializerError> {
    let path = path.as_ref();
    let proto: pb::Record = record.clone().into();
    std::fs::write(path, proto.encode_to_vec()).map_err(io_error(path))
}

pub fn read_binary_file(path: impl AsRef<Path>) -> Result<Record, SerializerError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(io_error(path))?;
    let proto = pb::Record::decode(bytes.as_slice())?;
    Record::try_from(proto).map_err(SerializerError::Convert)
}

pub fn to_json(record: &Record) -> Result<String, SerializerError> {
    Ok(serde_json::to_string_pretty(record)?)
}

pub fn from_json(data: &str) -> Result<Record, SerializerError> {
    Ok(serde_json::from_str(data)?)
}

pub fn write_json_file(record: &Record, path: impl AsRef<Path>) -> Result<(), SerializerError> {
    let path = path.as_ref();
    std::fs::write(path, to_json(record)?).map_err(io_error(path))
}

pub fn read_json_file(path: impl AsRef<Path>) -> Result<Record, SerializerError> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path).map_err(io_error(path))?;
    from_json(&data)
}
