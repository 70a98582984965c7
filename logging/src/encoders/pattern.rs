// src/encoders/pattern.rs
use super::{util, EventFormatter};
use crate::model::LogEvent;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;

// One capture group for a conversion specifier and an alternative for `%%`.
static PATTERN_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?P<specifier>%(?P<padding>-?\d+)?(?P<converter>[a-zA-Z])(?:\{(?P<options>[^}]+)\})?)|(?P<escaped>%%)")
    .expect("Pattern regex should be valid")
});

const HEADER_STYLE: &str = "\x1b[1;36m";
const WORKER_HEADER_STYLE: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

/// Represents a single piece of a parsed logging pattern.
#[derive(Debug)]
enum Segment {
  Literal(String),
  Specifier(PatternSpecifier),
}

/// The internal representation of a conversion specifier like `%-5p`.
#[derive(Debug)]
struct PatternSpecifier {
  converter: char,
  padding: Option<i32>,
  options: Option<String>,
}

/// Formats events according to a log4j-style pattern.
///
/// | specifier       | output                                   |
/// |-----------------|------------------------------------------|
/// | `%d`, `%d{fmt}` | timestamp, RFC 3339 or `strftime` format |
/// | `%p`, `%l`      | level                                    |
/// | `%t`            | target                                   |
/// | `%c`            | logger name                              |
/// | `%m`            | message                                  |
/// | `%T`            | thread name                              |
/// | `%X`, `%X{key}` | all fields, or one field                 |
/// | `%n`            | newline                                  |
/// | `%%`            | a literal `%`                            |
///
/// A number between `%` and the converter pads the value: positive right-aligns,
/// negative left-aligns.
///
/// With colors enabled, the header (everything before the first `%m`) is shown
/// in bold cyan, or in gray for loggers whose name ends in `worker`.
pub struct PatternFormatter {
  segments: Vec<Segment>,
  header_len: usize,
  color: bool,
}

impl PatternFormatter {
  pub fn new(pattern_string: &str) -> Self {
    let segments = Self::parse(pattern_string);
    let header_len = segments
      .iter()
      .position(|segment| matches!(segment, Segment::Specifier(spec) if spec.converter == 'm'))
      .unwrap_or(segments.len());
    Self {
      segments,
      header_len,
      color: false,
    }
  }

  pub fn with_color(mut self, color: bool) -> Self {
    self.color = color;
    self
  }

  /// Parses a pattern string into a sequence of `Segment`s.
  fn parse(pattern: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for caps in PATTERN_REGEX.captures_iter(pattern) {
      let Some(mat) = caps.get(0) else {
        continue;
      };

      // Add the literal text between the last match and this one.
      if mat.start() > last_end {
        segments.push(Segment::Literal(pattern[last_end..mat.start()].to_string()));
      }

      if caps.name("specifier").is_some() {
        let converter = caps
          .name("converter")
          .and_then(|m| m.as_str().chars().next());
        if let Some(converter) = converter {
          let padding = caps.name("padding").and_then(|m| m.as_str().parse().ok());
          let options = caps.name("options").map(|m| m.as_str().to_string());
          segments.push(Segment::Specifier(PatternSpecifier {
            converter,
            padding,
            options,
          }));
        }
      } else if caps.name("escaped").is_some() {
        segments.push(Segment::Literal("%".to_string()));
      }

      last_end = mat.end();
    }

    // Add any remaining literal text after the last match.
    if last_end < pattern.len() {
      segments.push(Segment::Literal(pattern[last_end..].to_string()));
    }

    segments
  }

  fn write_segments(&self, buf: &mut String, segments: &[Segment], event: &LogEvent) {
    for segment in segments {
      match segment {
        Segment::Literal(text) => buf.push_str(text),
        Segment::Specifier(spec) => self.format_specifier(buf, spec, event),
      }
    }
  }

  /// Handles formatting for a single specifier, including options and padding.
  fn format_specifier(&self, buf: &mut String, spec: &PatternSpecifier, event: &LogEvent) {
    let mut content = String::with_capacity(64);

    // Padding needs the final content, so write into a temporary buffer first.
    let needs_padding = spec.padding.is_some();
    let target_buf: &mut String = if needs_padding { &mut content } else { buf };

    match spec.converter {
      'd' => match &spec.options {
        Some(format_str) => util::write_timestamp_with_format(target_buf, &event.timestamp, format_str),
        None => util::write_timestamp(target_buf, &event.timestamp),
      },
      'p' | 'l' => {
        let _ = write!(target_buf, "{}", event.level);
      }
      't' => target_buf.push_str(&event.target),
      'c' => target_buf.push_str(&event.logger),
      'm' => {
        if let Some(msg) = &event.message {
          target_buf.push_str(msg);
        }
      }
      'T' => {
        if let Some(name) = &event.thread_name {
          target_buf.push_str(name);
        }
      }
      // Newline does not support padding.
      'n' => {
        buf.push('\n');
        return;
      }
      'X' => match &spec.options {
        Some(field_name) => {
          if let Some(log_value) = event.fields.get(field_name) {
            let _ = write!(target_buf, "{}", log_value);
          }
        }
        None => {
          let mut keys: Vec<_> = event.fields.keys().collect();
          keys.sort();
          if !keys.is_empty() {
            target_buf.push('{');
            for (i, key) in keys.iter().enumerate() {
              if i > 0 {
                target_buf.push_str(", ");
              }
              let _ = write!(target_buf, "{}={}", key, event.fields[*key]);
            }
            target_buf.push('}');
          }
        }
      },
      // Unknown specifiers are ignored.
      _ => {}
    }

    if let Some(padding) = spec.padding {
      apply_padding(buf, &content, padding);
    }
  }
}

/// Applies left or right padding to the given content.
fn apply_padding(buf: &mut String, content: &str, padding: i32) {
  let width = padding.unsigned_abs() as usize;
  if content.chars().count() >= width {
    buf.push_str(content);
    return;
  }

  if padding > 0 {
    let _ = write!(buf, "{:>width$}", content, width = width);
  } else {
    let _ = write!(buf, "{:<width$}", content, width = width);
  }
}

impl EventFormatter for PatternFormatter {
  fn format_event(&self, event: &LogEvent) -> Vec<u8> {
    let mut output = String::with_capacity(256);
    let (header, body) = self.segments.split_at(self.header_len);

    if self.color && !header.is_empty() {
      let mut rendered = String::with_capacity(64);
      self.write_segments(&mut rendered, header, event);
      let trimmed = rendered.trim_end();
      let style = if event.logger.ends_with("worker") {
        WORKER_HEADER_STYLE
      } else {
        HEADER_STYLE
      };
      output.push_str(style);
      output.push_str(trimmed);
      output.push_str(RESET);
      output.push_str(&rendered[trimmed.len()..]);
    } else {
      self.write_segments(&mut output, header, event);
    }
    self.write_segments(&mut output, body, event);

    if !output.ends_with('\n') {
      output.push('\n');
    }

    output.into_bytes()
  }
}
