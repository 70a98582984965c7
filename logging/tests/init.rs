// Installs the process-global subscriber, so it lives in its own test binary.

use scaffold_logging::{init, init_from_file, Error, LoggingConfig};
use std::fs;

#[test]
fn init_installs_once_and_caps_the_log_bridge() {
  let dir = tempfile::tempdir().unwrap();

  let missing = init_from_file(&dir.path().join("scaffold_logging.yaml")).unwrap_err();
  assert!(matches!(missing, Error::ConfigRead(_)));
  assert!(!tracing::dispatcher::has_been_set());

  let path = dir.path().join("scaffold_logging.testing.yaml");
  fs::write(
    &path,
    "level: warn\ncolor: false\ntargets:\n  app-main: info\n  sqlx: error\n",
  )
  .unwrap();
  init_from_file(&path).unwrap();

  assert!(tracing::dispatcher::has_been_set());
  assert_eq!(log::max_level(), log::LevelFilter::Info);
  log::info!(target: "legacy", "bridged through tracing");

  let again = init(&LoggingConfig::default()).unwrap_err();
  assert!(matches!(again, Error::GlobalSubscriberSet(_)));
  assert_eq!(log::max_level(), log::LevelFilter::Info);
}
