//! Service-layer wiring for scaffolded backends.
//!
//! Reads [`Settings`] from the environment, registers the application services
//! on a [`scaffold_ioc::Container`] and hands out request-scoped services bound
//! to a per-request database handle.
//!
//! ```
//! use scaffold_backend::{build_container, request_scope, utility_service, Database, Settings};
//! use scaffold_ioc::BoxError;
//! use std::sync::Arc;
//!
//! struct Fixed;
//! impl Database for Fixed {
//!   fn server_version(&self) -> Result<Option<String>, BoxError> {
//!     Ok(Some("8.0.36".to_string()))
//!   }
//! }
//!
//! # fn main() -> scaffold_backend::Result<()> {
//! let container = build_container(&Settings::new("mysql://localhost/app"))?;
//!
//! let mut scope = request_scope(Arc::new(Fixed));
//! let utility = utility_service(&container, &mut scope)?;
//! assert_eq!(utility.database_version()?, "8.0.36");
//! # Ok(())
//! # }
//! ```

mod database;
mod error;
pub mod services;
mod settings;
mod utility;

pub use database::{Database, DbHandle};
pub use error::{Error, Result};
pub use services::{build_container, register_services, request_scope, utility_service};
pub use settings::{Settings, TESTING_ENV};
pub use utility::UtilityService;
