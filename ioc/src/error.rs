use thiserror::Error;

/// A boxed error raised by a factory or by a collaborator it calls.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while registering or resolving services.
#[derive(Debug, Error)]
pub enum Error {
  /// `register` was called with an empty identifier.
  #[error("Service id must not be empty")]
  EmptyServiceId,

  /// `register` was called with an identifier that is already present.
  /// The existing registration is left untouched.
  #[error("Service '{0}' is already registered")]
  DuplicateService(String),

  /// `resolve` was called with an identifier that was never registered.
  #[error("Unknown service '{0}'")]
  UnknownService(String),

  /// The declared dependency graph contains a cycle. The path starts and ends
  /// with the same service, e.g. `a -> b -> a`.
  #[error("Cyclic service dependency detected: {}", .0.join(" -> "))]
  CyclicDependency(Vec<String>),

  /// A factory resolved the service it is currently constructing, directly or
  /// through services it did not declare as dependencies.
  #[error("Circular resolution detected while constructing service '{0}'")]
  CircularResolution(String),

  /// The instance stored for `id` is not of the requested type.
  #[error("Service '{id}' is not of type {expected}")]
  TypeMismatch { id: String, expected: &'static str },

  /// `Scope::require` found no value under the given key.
  #[error("Scope has no value for '{0}'")]
  MissingScopeValue(String),

  /// Reported by `Container::validate` for a declared dependency that is not registered.
  #[error("Service '{service}' depends on unregistered service '{dependency}'")]
  MissingDependency { service: String, dependency: String },

  /// An error raised inside a factory.
  #[error(transparent)]
  Factory(BoxError),
}

impl Error {
  /// Wraps an arbitrary error raised while constructing a service.
  pub fn factory<E>(err: E) -> Self
  where
    E: Into<BoxError>,
  {
    Error::Factory(err.into())
  }
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
