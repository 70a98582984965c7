//! Caller-owned resolution scopes.

use crate::core::Instance;
use crate::error::{Error, Result};
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A single unit of work, such as one inbound request.
///
/// A scope carries two things: context values supplied by the caller (for example
/// the database handle bound to the request), and the cache of `Scoped` services
/// built while resolving within it. The container never owns a scope; dropping the
/// scope discards every scoped instance it holds.
///
/// Scopes are single-owner and are passed by `&mut` through a chain of resolutions.
#[derive(Default)]
pub struct Scope {
  values: HashMap<String, Instance>,
  services: HashMap<String, Instance>,
}

impl Scope {
  /// Creates an empty scope.
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder form of [`Scope::insert`].
  pub fn with<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
    self.insert(key, value);
    self
  }

  /// Stores a context value, returning the previous value under `key` if any.
  pub fn insert<T: Any + Send + Sync>(
    &mut self,
    key: impl Into<String>,
    value: T,
  ) -> Option<Instance> {
    self.values.insert(key.into(), Arc::new(value))
  }

  /// Returns the context value under `key` if it exists and has type `T`.
  pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
    self
      .values
      .get(key)
      .cloned()
      .and_then(|value| value.downcast::<T>().ok())
  }

  /// Like [`Scope::get`], but reports why the value is unavailable.
  pub fn require<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
    let value = self
      .values
      .get(key)
      .cloned()
      .ok_or_else(|| Error::MissingScopeValue(key.to_owned()))?;
    value.downcast::<T>().map_err(|_| Error::TypeMismatch {
      id: key.to_owned(),
      expected: type_name::<T>(),
    })
  }

  /// Whether a scoped instance of `id` has already been built in this scope.
  pub fn contains_service(&self, id: &str) -> bool {
    self.services.contains_key(id)
  }

  /// Number of scoped instances cached in this scope.
  pub fn service_count(&self) -> usize {
    self.services.len()
  }

  pub(crate) fn cached(&self, id: &str) -> Option<Instance> {
    self.services.get(id).cloned()
  }

  pub(crate) fn cache(&mut self, id: &str, instance: Instance) {
    self.services.insert(id.to_owned(), instance);
  }
}

impl fmt::Debug for Scope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut values: Vec<_> = self.values.keys().collect();
    values.sort();
    let mut services: Vec<_> = self.services.keys().collect();
    services.sort();
    f.debug_struct("Scope")
      .field("values", &values)
      .field("services", &services)
      .finish()
  }
}
