// Utility functions for encoders.

use chrono::{DateTime, Local, Utc};
use std::fmt::Write;

/// Writes an RFC 3339 timestamp with millisecond precision, e.g. `2023-10-26T14:30:05.123Z`.
pub fn write_timestamp(buf: &mut String, timestamp: &DateTime<Utc>) {
  let _ = write!(
    buf,
    "{}",
    timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
  );
}

/// Writes a timestamp using a `strftime`-style format string.
///
/// The timestamp is rendered in UTC unless the format is prefixed with `local:`.
pub fn write_timestamp_with_format(buf: &mut String, timestamp: &DateTime<Utc>, format: &str) {
  match format.strip_prefix("local:") {
    Some(local_format) => {
      let _ = write!(buf, "{}", timestamp.with_timezone(&Local).format(local_format));
    }
    None => {
      let _ = write!(buf, "{}", timestamp.format(format));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Timelike};

  #[test]
  fn test_write_timestamp() {
    let mut buf = String::new();
    let dt = Utc
      .with_ymd_and_hms(2023, 10, 26, 14, 30, 5)
      .unwrap()
      .with_nanosecond(123_456_000)
      .unwrap();
    write_timestamp(&mut buf, &dt);
    assert_eq!(buf, "2023-10-26T14:30:05.123Z");
  }

  #[test]
  fn test_write_timestamp_with_format() {
    let mut buf = String::new();
    let dt = Utc.with_ymd_and_hms(2023, 10, 26, 14, 30, 5).unwrap();
    write_timestamp_with_format(&mut buf, &dt, "%H:%M:%S");
    assert_eq!(buf, "14:30:05");
  }
}
