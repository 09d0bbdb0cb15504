//! Client deadlines carried in the `grpc-timeout` request header.
//!
//! The header value is at most eight ASCII digits followed by a unit:
//! `H` hours, `M` minutes, `S` seconds, `m` millis, `u` micros, `n` nanos.

use std::time::Duration;
use tonic::metadata::MetadataMap;

pub const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

const MAX_TIMEOUT_DIGITS: usize = 8;

/// Timeout the client attached to this call, if any.
///
/// Malformed values are ignored and the call runs without a deadline.
pub fn request_timeout(metadata: &MetadataMap) -> Option<Duration> {
  let raw = metadata.get(GRPC_TIMEOUT_HEADER)?.to_str().ok()?;
  parse_timeout(raw)
}

pub fn parse_timeout(raw: &str) -> Option<Duration> {
  if raw.len() < 2 {
    return None;
  }
  let (digits, unit) = raw.split_at(raw.len() - 1);
  if digits.len() > MAX_TIMEOUT_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  let value: u64 = digits.parse().ok()?;

  let duration = match unit {
    "H" => Duration::from_secs(value.checked_mul(3600)?),
    "M" => Duration::from_secs(value.checked_mul(60)?),
    "S" => Duration::from_secs(value),
    "m" => Duration::from_millis(value),
    "u" => Duration::from_micros(value),
    "n" => Duration::from_nanos(value),
    _ => return None,
  };
  Some(duration)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_units() {
    assert_eq!(parse_timeout("2H"), Some(Duration::from_secs(7200)));
    assert_eq!(parse_timeout("3M"), Some(Duration::from_secs(180)));
    assert_eq!(parse_timeout("10S"), Some(Duration::from_secs(10)));
    assert_eq!(parse_timeout("250m"), Some(Duration::from_millis(250)));
    assert_eq!(parse_timeout("99u"), Some(Duration::from_micros(99)));
    assert_eq!(parse_timeout("5n"), Some(Duration::from_nanos(5)));
  }

  #[test]
  fn test_parse_rejects_malformed() {
    assert_eq!(parse_timeout(""), None);
    assert_eq!(parse_timeout("S"), None);
    assert_eq!(parse_timeout("10"), None);
    assert_eq!(parse_timeout("10x"), None);
    assert_eq!(parse_timeout("-1S"), None);
    assert_eq!(parse_timeout("123456789S"), None);
  }

  #[test]
  fn test_request_timeout_from_metadata() {
    let mut metadata = MetadataMap::new();
    assert_eq!(request_timeout(&metadata), None);

    metadata.insert(GRPC_TIMEOUT_HEADER, "1500m".parse().unwrap());
    assert_eq!(request_timeout(&metadata), Some(Duration::from_millis(1500)));
  }
}
