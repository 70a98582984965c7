//! Core data structures shared by the container, the registry and scopes.

use crate::container::Container;
use crate::error::Result;
use crate::scope::Scope;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A type-erased, shareable service instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// How long a constructed instance is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifetime {
  /// One instance per container, built on first resolution and shared by every caller
  /// until `clear_singletons` is called.
  #[default]
  Singleton,
  /// One instance per caller-supplied `Scope`.
  Scoped,
}

impl fmt::Display for Lifetime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Lifetime::Singleton => f.write_str("singleton"),
      Lifetime::Scoped => f.write_str("scoped"),
    }
  }
}

/// Builds a service instance.
///
/// The factory receives the container so it can resolve its own dependencies,
/// and the active scope so those nested resolutions share one scope cache.
pub trait Factory: Send + Sync + 'static {
  fn construct(&self, container: &Container, scope: &mut Scope) -> Result<Instance>;
}

impl<F> Factory for F
where
  F: Fn(&Container, &mut Scope) -> Result<Instance> + Send + Sync + 'static,
{
  fn construct(&self, container: &Container, scope: &mut Scope) -> Result<Instance> {
    self(container, scope)
  }
}

/// A stored registration: the recipe for one service identifier.
pub(crate) struct Registration {
  pub(crate) factory: Box<dyn Factory>,
  pub(crate) lifetime: Lifetime,
  pub(crate) depends_on: Vec<String>,
}

impl fmt::Debug for Registration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Registration")
      .field("lifetime", &self.lifetime)
      .field("depends_on", &self.depends_on)
      .finish_non_exhaustive()
  }
}

thread_local! {
  // Services currently under construction on this thread, keyed by container address.
  static RESOLVING_STACK: RefCell<HashSet<(usize, String)>> = RefCell::new(HashSet::new());
}

/// An RAII guard that detects a factory re-entering its own resolution.
///
/// Entering adds the service to the thread-local resolution set and fails if it
/// is already there. Dropping the guard removes it again.
pub(crate) struct ResolutionGuard {
  key: (usize, String),
}

impl ResolutionGuard {
  pub(crate) fn enter(container: &Container, id: &str) -> Option<Self> {
    let key = (container as *const Container as usize, id.to_owned());
    let inserted = RESOLVING_STACK.with(|stack| stack.borrow_mut().insert(key.clone()));
    inserted.then_some(Self { key })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.key);
    });
  }
}
