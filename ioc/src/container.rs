//! The main `Container` struct and its associated methods.

use crate::core::{Factory, Instance, Lifetime, Registration, ResolutionGuard};
use crate::error::{Error, Result};
use crate::graph::Registry;
use crate::scope::Scope;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A registration descriptor passed to [`Container::register`].
///
/// Defaults to a `Singleton` with no declared dependencies.
pub struct Service {
  id: String,
  factory: Box<dyn Factory>,
  lifetime: Lifetime,
  depends_on: Vec<String>,
}

impl Service {
  /// Describes a service whose factory returns a concrete value.
  pub fn new<T, F>(id: impl Into<String>, factory: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container, &mut Scope) -> Result<T> + Send + Sync + 'static,
  {
    Self::from_factory(id, move |container: &Container, scope: &mut Scope| {
      factory(container, scope).map(|value| Arc::new(value) as Instance)
    })
  }

  /// Describes a service built by an arbitrary [`Factory`].
  pub fn from_factory(id: impl Into<String>, factory: impl Factory) -> Self {
    Self {
      id: id.into(),
      factory: Box::new(factory),
      lifetime: Lifetime::default(),
      depends_on: Vec::new(),
    }
  }

  pub fn lifetime(mut self, lifetime: Lifetime) -> Self {
    self.lifetime = lifetime;
    self
  }

  pub fn scoped(self) -> Self {
    self.lifetime(Lifetime::Scoped)
  }

  /// Declares the services this factory resolves. The list is only used to
  /// reject cyclic registrations; it does not inject anything.
  pub fn depends_on<I, S>(mut self, ids: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.depends_on = ids.into_iter().map(Into::into).collect();
    self
  }
}

/// The service container.
///
/// Holds the registration table and the singleton cache. It is thread-safe and
/// is meant to be created once and handed explicitly to whatever needs it.
#[derive(Default)]
pub struct Container {
  registry: RwLock<Registry>,
  singletons: DashMap<String, Arc<OnceCell<Instance>>>,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- Registration ---

  /// Adds a registration and re-validates the whole dependency graph.
  ///
  /// Fails with [`Error::EmptyServiceId`] for an empty id, with
  /// [`Error::DuplicateService`] if the id is taken, and with
  /// [`Error::CyclicDependency`] if the new entry closes a cycle. In both cases
  /// the registration table is left as it was before the call.
  pub fn register(&self, service: Service) -> Result<&Self> {
    let Service {
      id,
      factory,
      lifetime,
      depends_on,
    } = service;

    if id.is_empty() {
      tracing::warn!("rejected service registration without an id");
      return Err(Error::EmptyServiceId);
    }

    let mut registry = self.registry.write();
    if registry.contains(&id) {
      tracing::warn!(service = %id, "rejected duplicate service registration");
      return Err(Error::DuplicateService(id));
    }

    registry.insert(
      id.clone(),
      Registration {
        factory,
        lifetime,
        depends_on,
      },
    );

    if let Some(cycle) = registry.find_cycle() {
      registry.rollback(&id);
      tracing::warn!(service = %id, cycle = ?cycle, "rejected cyclic service registration");
      return Err(Error::CyclicDependency(cycle));
    }

    tracing::debug!(service = %id, %lifetime, "registered service");
    Ok(self)
  }

  /// Registers a singleton with no declared dependencies.
  pub fn add_singleton<T, F>(&self, id: impl Into<String>, factory: F) -> Result<&Self>
  where
    T: Any + Send + Sync,
    F: Fn(&Container, &mut Scope) -> Result<T> + Send + Sync + 'static,
  {
    self.register(Service::new(id, factory))
  }

  /// Registers a scoped service with no declared dependencies. Declare
  /// dependencies through [`Service::depends_on`] and [`Container::register`].
  pub fn add_scoped<T, F>(&self, id: impl Into<String>, factory: F) -> Result<&Self>
  where
    T: Any + Send + Sync,
    F: Fn(&Container, &mut Scope) -> Result<T> + Send + Sync + 'static,
  {
    self.register(Service::new(id, factory).scoped())
  }

  // --- Resolution ---

  /// Resolves a service with a throwaway scope.
  ///
  /// `Scoped` services resolved this way are never reused.
  pub fn resolve<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
    self.resolve_in(id, &mut Scope::new())
  }

  /// Resolves a service within a caller-owned scope.
  pub fn resolve_in<T: Any + Send + Sync>(&self, id: &str, scope: &mut Scope) -> Result<Arc<T>> {
    self
      .resolve_instance(id, scope)?
      .downcast::<T>()
      .map_err(|_| Error::TypeMismatch {
        id: id.to_owned(),
        expected: type_name::<T>(),
      })
  }

  /// Resolves a service to its type-erased instance.
  ///
  /// At most one `Singleton` instance is built per container (until
  /// `clear_singletons`), and at most one `Scoped` instance per scope. A factory
  /// error is returned unchanged and nothing is cached.
  pub fn resolve_instance(&self, id: &str, scope: &mut Scope) -> Result<Instance> {
    let registration = self
      .registry
      .read()
      .get(id)
      .cloned()
      .ok_or_else(|| Error::UnknownService(id.to_owned()))?;

    match registration.lifetime {
      Lifetime::Singleton => {
        let cell = self.singleton_cell(id);
        if let Some(instance) = cell.get() {
          return Ok(instance.clone());
        }
        let _guard =
          ResolutionGuard::enter(self, id).ok_or_else(|| Error::CircularResolution(id.to_owned()))?;
        cell
          .get_or_try_init(|| self.construct(id, &registration, scope))
          .cloned()
      }
      Lifetime::Scoped => {
        if let Some(instance) = scope.cached(id) {
          return Ok(instance);
        }
        let _guard =
          ResolutionGuard::enter(self, id).ok_or_else(|| Error::CircularResolution(id.to_owned()))?;
        let instance = self.construct(id, &registration, scope)?;
        scope.cache(id, instance.clone());
        Ok(instance)
      }
    }
  }

  fn singleton_cell(&self, id: &str) -> Arc<OnceCell<Instance>> {
    if let Some(cell) = self.singletons.get(id) {
      return cell.clone();
    }
    self.singletons.entry(id.to_owned()).or_default().clone()
  }

  fn construct(&self, id: &str, registration: &Registration, scope: &mut Scope) -> Result<Instance> {
    tracing::debug!(service = %id, lifetime = %registration.lifetime, "constructing service");
    registration.factory.construct(self, scope)
  }

  /// Empties the singleton cache. Registrations are kept, so the next resolution
  /// of a singleton runs its factory again.
  pub fn clear_singletons(&self) {
    self.singletons.clear();
    tracing::debug!("cleared singleton cache");
  }

  // --- Introspection ---

  pub fn contains(&self, id: &str) -> bool {
    self.registry.read().contains(id)
  }

  pub fn len(&self) -> usize {
    self.registry.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Registered identifiers in registration order.
  pub fn service_ids(&self) -> Vec<String> {
    self.registry.read().ids().to_vec()
  }

  pub fn lifetime(&self, id: &str) -> Option<Lifetime> {
    self.registry.read().get(id).map(|r| r.lifetime)
  }

  /// The declared dependency list of `id`.
  pub fn dependencies(&self, id: &str) -> Option<Vec<String>> {
    self.registry.read().get(id).map(|r| r.depends_on.clone())
  }

  /// Registered identifiers ordered so that every registered dependency comes
  /// before the services that declare it.
  pub fn dependency_order(&self) -> Vec<String> {
    self.registry.read().dependency_order()
  }

  /// Checks that every declared dependency is registered.
  ///
  /// `register` tolerates forward references; call this once wiring is complete
  /// to surface a missing service at startup instead of at first resolution.
  pub fn validate(&self) -> Result<()> {
    match self.registry.read().first_missing_dependency() {
      Some((service, dependency)) => Err(Error::MissingDependency { service, dependency }),
      None => Ok(()),
    }
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("services", &self.service_ids())
      .field("singletons", &self.singletons.len())
      .finish()
  }
}
