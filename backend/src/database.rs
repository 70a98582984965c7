// The database boundary seen by the service layer.

use scaffold_ioc::BoxError;
use std::sync::Arc;

/// A request-bound database handle.
///
/// The service layer only needs to ask the server for its version; the driver,
/// pooling and sessions live behind this trait.
pub trait Database: Send + Sync {
  /// The server's version string, or `None` when the server returned no row.
  fn server_version(&self) -> Result<Option<String>, BoxError>;
}

/// The shared form in which a handle is placed into a request scope.
pub type DbHandle = Arc<dyn Database>;
