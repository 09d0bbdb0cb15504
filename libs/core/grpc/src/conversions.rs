//! Generic protobuf ↔ domain conversions
//!
//! Domain-agnostic helpers for types that show up in every schema:
//! - UUIDs carried as their canonical text form
//! - Timestamps carried as Unix milliseconds (`int64`), with `0` meaning unset
//!
//! ## Usage
//!
//! ```ignore
//! use grpc_client::conversions::*;
//! use chrono::Utc;
//!
//! let id = parse_uuid("6f1c9a5e-0b8e-4a47-9d0e-1d6a1f0f3c2b")?;
//! let millis = datetime_to_millis(Utc::now());
//! let back = millis_to_datetime(millis);
//! ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

// ============================================================================
// UUID Conversions (protobuf string ↔ Uuid)
// ============================================================================

/// Parse the textual form of a UUID
///
/// The error message names the offending value so it can be returned to the
/// caller as-is.
pub fn parse_uuid(value: &str) -> Result<Uuid, String> {
  Uuid::parse_str(value).map_err(|e| format!("'{}' is not a valid UUID: {}", value, e))
}

/// Generate a fresh random (v4) UUID in its textual form
pub fn new_uuid_string() -> String {
  Uuid::new_v4().to_string()
}

// ============================================================================
// Timestamp Conversions (Unix milliseconds ↔ DateTime<Utc>)
// ============================================================================

/// Convert DateTime<Utc> to Unix milliseconds
pub fn datetime_to_millis(dt: DateTime<Utc>) -> i64 {
  dt.timestamp_millis()
}

/// Convert Unix milliseconds to DateTime<Utc>
///
/// Returns `None` when the value is outside the representable range.
pub fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
  DateTime::from_timestamp_millis(millis)
}

/// Convert an optional DateTime<Utc> to Unix milliseconds, `0` when unset
pub fn opt_datetime_to_millis(dt: Option<DateTime<Utc>>) -> i64 {
  dt.map(datetime_to_millis).unwrap_or_default()
}

/// Convert Unix milliseconds to an optional DateTime<Utc>, treating `0` as unset
pub fn millis_to_opt_datetime(millis: i64) -> Option<DateTime<Utc>> {
  if millis == 0 {
    None
  } else {
    millis_to_datetime(millis)
  }
}

/// Current time truncated to millisecond precision, so it survives a wire round-trip
pub fn now_millis_precision() -> DateTime<Utc> {
  let now = Utc::now();
  millis_to_datetime(now.timestamp_millis()).unwrap_or(now)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_uuid_roundtrip() {
    let id = new_uuid_string();
    let parsed = parse_uuid(&id).unwrap();
    assert_eq!(parsed.to_string(), id);
  }

  #[test]
  fn test_parse_uuid_rejects_garbage() {
    let err = parse_uuid("not-a-uuid").unwrap_err();
    assert!(err.contains("not-a-uuid"));
  }

  #[test]
  fn test_millis_roundtrip() {
    let now = now_millis_precision();
    let millis = datetime_to_millis(now);
    assert_eq!(millis_to_datetime(millis), Some(now));
  }

  #[test]
  fn test_zero_millis_is_unset() {
    assert_eq!(opt_datetime_to_millis(None), 0);
    assert!(millis_to_opt_datetime(0).is_none());
  }

  #[test]
  fn test_opt_millis_roundtrip() {
    let now = now_millis_precision();
    let millis = opt_datetime_to_millis(Some(now));
    assert_eq!(millis_to_opt_datetime(millis), Some(now));
  }
}
