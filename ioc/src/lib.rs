//! # Scaffold IoC
//!
//! A small, thread-safe service container.
//!
//! Services are registered under a string identifier together with a factory, a
//! lifetime and the list of services the factory will resolve. Factories receive
//! the container and the active scope and resolve their own dependencies through
//! them.
//!
//! ## Core Concepts
//!
//! - **Container**: the registration table plus the singleton cache. There is no
//!   global instance; create one and pass it to whatever needs it.
//! - **Lifetime**: `Singleton` services are built once per container, `Scoped`
//!   services once per [`Scope`].
//! - **Scope**: a caller-owned unit of work (typically one request) holding
//!   context values and the scoped-service cache.
//! - **Cycle detection**: every registration re-checks the declared dependency
//!   graph and is rejected if it would close a cycle.
//!
//! ## Quick Start
//!
//! ```
//! use scaffold_ioc::{Container, Scope, Service};
//! use std::sync::Arc;
//!
//! struct Logger {
//!   name: String,
//! }
//!
//! struct Connection(&'static str);
//!
//! struct Utility {
//!   db: Arc<Connection>,
//!   logger: Arc<Logger>,
//! }
//!
//! # fn main() -> scaffold_ioc::Result<()> {
//! let container = Container::new();
//! container
//!   .register(Service::new("logger", |_, _| Ok(Logger { name: "app-main".into() })))?
//!   .register(
//!     Service::new("utility", |c, scope| {
//!       let logger = c.resolve_in::<Logger>("logger", scope)?;
//!       let db = scope.require::<Connection>("db")?;
//!       Ok(Utility { db, logger })
//!     })
//!     .scoped()
//!     .depends_on(["logger"]),
//!   )?;
//!
//! let mut first = Scope::new().with("db", Connection("conn1"));
//! let mut second = Scope::new().with("db", Connection("conn2"));
//!
//! let a = container.resolve_in::<Utility>("utility", &mut first)?;
//! let b = container.resolve_in::<Utility>("utility", &mut second)?;
//!
//! assert!(!Arc::ptr_eq(&a, &b));
//! assert!(Arc::ptr_eq(&a.logger, &b.logger));
//! assert_eq!(a.db.0, "conn1");
//! assert_eq!(b.logger.name, "app-main");
//! # Ok(())
//! # }
//! ```

mod container;
mod core;
mod error;
mod graph;
mod macros;
mod scope;

pub use crate::core::{Factory, Instance, Lifetime};
pub use container::{Container, Service};
pub use error::{BoxError, Error, Result};
pub use scope::Scope;
