// src/subscriber/visitor.rs
use crate::model::{LogEvent, LogValue};
use std::collections::HashMap;
use tracing::field::{Field, Visit};

/// Field name that routes an event to a named logger instead of its target.
pub(crate) const LOGGER_FIELD: &str = "logger";

pub(crate) struct LogEventFieldVisitor<'a> {
  fields: &'a mut HashMap<String, LogValue>,
  message: &'a mut Option<String>,
  logger: &'a mut String,
  // To handle duplicate "message" keys
  message_field_count: u32,
}

impl<'a> LogEventFieldVisitor<'a> {
  pub(crate) fn new(event: &'a mut LogEvent) -> Self {
    Self {
      fields: &mut event.fields,
      message: &mut event.message,
      logger: &mut event.logger,
      message_field_count: 0,
    }
  }

  fn record_text(&mut self, field_name: &str, value: String, wrap: fn(String) -> LogValue) {
    match field_name {
      "message" if self.message.is_none() => *self.message = Some(value),
      "message" => {
        self.message_field_count += 1;
        let disambiguated_key = format!("message.{}", self.message_field_count);
        self.fields.insert(disambiguated_key, wrap(value));
      }
      LOGGER_FIELD => *self.logger = value,
      _ => {
        self.fields.insert(field_name.to_string(), wrap(value));
      }
    }
  }
}

impl<'a> Visit for LogEventFieldVisitor<'a> {
  fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
    self.record_text(field.name(), format!("{:?}", value), LogValue::Debug);
  }

  fn record_str(&mut self, field: &Field, value: &str) {
    self.record_text(field.name(), value.to_string(), LogValue::String);
  }

  fn record_i64(&mut self, field: &Field, value: i64) {
    self.fields.insert(field.name().to_string(), LogValue::Int(value));
  }

  fn record_u64(&mut self, field: &Field, value: u64) {
    let value = match i64::try_from(value) {
      Ok(v) => LogValue::Int(v),
      Err(_) => LogValue::String(value.to_string()),
    };
    self.fields.insert(field.name().to_string(), value);
  }

  fn record_f64(&mut self, field: &Field, value: f64) {
    self.fields.insert(field.name().to_string(), LogValue::Float(value));
  }

  fn record_bool(&mut self, field: &Field, value: bool) {
    self.fields.insert(field.name().to_string(), LogValue::Bool(value));
  }
}
