use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use tracing::Level;

/// Represents a loggable value, part of a `LogEvent`'s fields.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
  String(String),
  Int(i64),
  Float(f64),
  Bool(bool),
  Debug(String),
}

impl fmt::Display for LogValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LogValue::String(s) | LogValue::Debug(s) => f.write_str(s),
      LogValue::Int(i) => write!(f, "{}", i),
      LogValue::Float(v) => write!(f, "{}", v),
      LogValue::Bool(b) => write!(f, "{}", b),
    }
  }
}

/// The internal structured representation of a log event within `scaffold_logging`.
#[derive(Debug, Clone)]
pub struct LogEvent {
  /// Timestamp of when the event was observed.
  pub timestamp: DateTime<Utc>,
  /// The severity level of the event.
  pub level: Level,
  /// The target of the event (usually the module path).
  pub target: String,
  /// The named logger the event was emitted through, or the target when the
  /// event carried no `logger` field.
  pub logger: String,
  /// The primary message associated with the event, from its "message" field.
  pub message: Option<String>,
  /// Key-value pairs of structured data associated with the event.
  pub fields: HashMap<String, LogValue>,
  /// Thread name where the event originated.
  pub thread_name: Option<String>,
}

impl LogEvent {
  /// Creates a new `LogEvent` stamped with the current time. The logger name
  /// starts out equal to the target.
  pub fn new<S>(level: Level, target: S, message: Option<String>) -> Self
  where
    S: Into<String>,
  {
    let target = target.into();
    LogEvent {
      timestamp: Utc::now(),
      level,
      logger: target.clone(),
      target,
      message,
      fields: HashMap::new(),
      thread_name: None,
    }
  }
}
