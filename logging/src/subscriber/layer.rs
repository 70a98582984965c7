// src/subscriber/layer.rs
// The Layer that turns tracing events into formatted lines.

use crate::{
  encoders::EventFormatter,
  filter::TargetFilter,
  model::LogEvent,
  subscriber::visitor::LogEventFieldVisitor,
};
use std::io::Write;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::{
  fmt::MakeWriter,
  layer::{Context, Layer},
};

/// The primary Layer for scaffold_logging.
///
/// Receives events from `tracing`, converts them to `LogEvent`s, filters them by
/// logger name and target, formats them and writes one line per event to the
/// configured writer.
pub struct PatternLayer<W> {
  filter: TargetFilter,
  formatter: Box<dyn EventFormatter>,
  make_writer: W,
}

impl<W> PatternLayer<W>
where
  W: for<'w> MakeWriter<'w> + 'static,
{
  pub fn new(filter: TargetFilter, formatter: impl EventFormatter, make_writer: W) -> Self {
    Self {
      filter,
      formatter: Box::new(formatter),
      make_writer,
    }
  }

  /// Converts a `tracing::Event` into our internal `LogEvent` format.
  fn build_log_event(&self, event: &Event<'_>) -> LogEvent {
    let metadata = event.metadata();
    let mut log_event = LogEvent::new(*metadata.level(), metadata.target(), None);

    let mut visitor = LogEventFieldVisitor::new(&mut log_event);
    event.record(&mut visitor);

    log_event.thread_name = std::thread::current().name().map(str::to_string);
    log_event
  }
}

impl<S, W> Layer<S> for PatternLayer<W>
where
  S: Subscriber,
  W: for<'w> MakeWriter<'w> + 'static,
{
  // Fast path: skip events no rule could let through.
  fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
    *metadata.level() <= self.filter.max_level()
  }

  fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
    let log_event = self.build_log_event(event);
    if !self
      .filter
      .enabled(&log_event.logger, &log_event.target, &log_event.level)
    {
      return;
    }

    let bytes = self.formatter.format_event(&log_event);
    let mut writer = self.make_writer.make_writer_for(event.metadata());
    if let Err(e) = writer.write_all(&bytes) {
      eprintln!("[scaffold_logging:ERROR] Failed to write log event: {}", e);
    }
  }
}
