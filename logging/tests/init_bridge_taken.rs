// Takes the `log` logger slot before `init` runs, so it lives in its own test binary.

use scaffold_logging::{init, Error, LoggingConfig};

#[test]
fn failed_bridge_leaves_no_global_subscriber() {
  tracing_log::LogTracer::init().unwrap();

  let err = init(&LoggingConfig::default()).unwrap_err();

  assert!(matches!(err, Error::LogBridgeInit(_)));
  assert!(!tracing::dispatcher::has_been_set());
}
