// Registration of the backend's services on a container.

use crate::database::DbHandle;
use crate::error::Result;
use crate::settings::Settings;
use crate::utility::UtilityService;
use scaffold_ioc::{Container, Scope, Service};
use scaffold_logging::Logger;
use std::sync::Arc;

/// Service id of the application logger (singleton).
pub const LOGGER: &str = "logger";
/// Service id of the utility service (scoped).
pub const UTILITY: &str = "utility";
/// Scope key under which the request's database handle is stored.
pub const DB: &str = "db";

/// Name of the application logger.
pub const APP_LOGGER_NAME: &str = "app-main";

/// Registers the backend services:
///
/// - `logger`: singleton [`Logger`] named `app-main`, at the configured log level.
/// - `utility`: scoped [`UtilityService`], built from the request's database
///   handle and the shared logger.
pub fn register_services(container: &Container, settings: &Settings) -> Result<()> {
  let level = settings.log_level()?;

  container
    .register(Service::new(LOGGER, move |_, _| {
      Ok(Logger::new(APP_LOGGER_NAME).with_level(level))
    }))?
    .register(
      Service::new(UTILITY, |c, scope| {
        let db = scope.require::<DbHandle>(DB)?;
        let logger = c.resolve_in::<Logger>(LOGGER, scope)?;
        Ok(UtilityService::new(DbHandle::clone(&*db), logger))
      })
      .scoped()
      .depends_on([LOGGER]),
    )?;

  tracing::debug!(services = ?container.service_ids(), "registered backend services");
  Ok(())
}

/// Creates a container with every backend service registered and validated.
pub fn build_container(settings: &Settings) -> Result<Container> {
  let container = Container::new();
  register_services(&container, settings)?;
  container.validate()?;
  Ok(container)
}

/// Opens a request scope bound to `db`.
pub fn request_scope(db: DbHandle) -> Scope {
  Scope::new().with(DB, db)
}

/// Resolves the utility service for the request represented by `scope`.
pub fn utility_service(container: &Container, scope: &mut Scope) -> Result<Arc<UtilityService>> {
  Ok(container.resolve_in::<UtilityService>(UTILITY, scope)?)
}
