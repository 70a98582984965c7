use scaffold_ioc::{Container, Error, Lifetime, Scope, Service};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// --- Test Fixtures ---

#[derive(Debug, PartialEq, Eq)]
struct SimpleService {
  id: u32,
}

fn counting_factory(
  counter: Arc<AtomicUsize>,
) -> impl Fn(&Container, &mut Scope) -> scaffold_ioc::Result<SimpleService> + Send + Sync + 'static {
  move |_, _| {
    let id = counter.fetch_add(1, Ordering::SeqCst) as u32;
    Ok(SimpleService { id })
  }
}

// --- Basic Tests ---

#[test]
fn test_singleton_is_built_once_and_shared() {
  // Arrange
  let container = Container::new();
  let calls = Arc::new(AtomicUsize::new(0));
  container
    .register(Service::new("simple", counting_factory(calls.clone())))
    .unwrap();

  // Act
  let r1 = container.resolve::<SimpleService>("simple").unwrap();
  let mut scope = Scope::new();
  let r2 = container.resolve_in::<SimpleService>("simple", &mut scope).unwrap();

  // Assert
  assert!(Arc::ptr_eq(&r1, &r2));
  assert_eq!(calls.load(Ordering::SeqCst), 1);
  // Singletons never land in the scope cache.
  assert_eq!(scope.service_count(), 0);
}

#[test]
fn test_scoped_is_shared_within_a_scope() {
  // Arrange
  let container = Container::new();
  let calls = Arc::new(AtomicUsize::new(0));
  container
    .register(Service::new("simple", counting_factory(calls.clone())).scoped())
    .unwrap();
  let mut scope = Scope::new();

  // Act
  let r1 = container.resolve_in::<SimpleService>("simple", &mut scope).unwrap();
  let r2 = container.resolve_in::<SimpleService>("simple", &mut scope).unwrap();

  // Assert
  assert!(Arc::ptr_eq(&r1, &r2));
  assert_eq!(calls.load(Ordering::SeqCst), 1);
  assert!(scope.contains_service("simple"));
}

#[test]
fn test_scoped_differs_across_scopes() {
  // Arrange
  let container = Container::new();
  let calls = Arc::new(AtomicUsize::new(0));
  container
    .register(Service::new("simple", counting_factory(calls.clone())).scoped())
    .unwrap();

  // Act
  let r1 = container
    .resolve_in::<SimpleService>("simple", &mut Scope::new())
    .unwrap();
  let r2 = container
    .resolve_in::<SimpleService>("simple", &mut Scope::new())
    .unwrap();

  // Assert
  assert!(!Arc::ptr_eq(&r1, &r2));
  assert_eq!((r1.id, r2.id), (0, 1));
}

#[test]
fn test_scoped_without_scope_is_never_reused() {
  let container = Container::new();
  let calls = Arc::new(AtomicUsize::new(0));
  container
    .add_scoped("simple", counting_factory(calls.clone()))
    .unwrap();

  let r1 = container.resolve::<SimpleService>("simple").unwrap();
  let r2 = container.resolve::<SimpleService>("simple").unwrap();

  assert!(!Arc::ptr_eq(&r1, &r2));
  assert_eq!(calls.load(Ordering::SeqCst), 2);
  assert_eq!(container.lifetime("simple"), Some(Lifetime::Scoped));
  assert_eq!(container.dependencies("simple"), Some(Vec::new()));
}

#[test]
fn test_empty_id_is_rejected() {
  let container = Container::new();
  let err = container
    .add_singleton("", |_, _| Ok(SimpleService { id: 1 }))
    .unwrap_err();

  assert!(matches!(err, Error::EmptyServiceId));
  assert_eq!(err.to_string(), "Service id must not be empty");
  assert!(container.is_empty());
  assert!(matches!(
    container.resolve::<SimpleService>(""),
    Err(Error::UnknownService(_))
  ));
}

#[test]
fn test_duplicate_registration_is_rejected_and_first_survives() {
  // Arrange
  let container = Container::new();
  container
    .add_singleton("simple", |_, _| Ok(SimpleService { id: 1 }))
    .unwrap();

  // Act
  let err = container
    .add_singleton("simple", |_, _| Ok(SimpleService { id: 2 }))
    .unwrap_err();

  // Assert
  assert!(matches!(err, Error::DuplicateService(ref id) if id == "simple"));
  assert_eq!(container.len(), 1);
  assert_eq!(container.resolve::<SimpleService>("simple").unwrap().id, 1);
}

#[test]
fn test_unknown_service_fails() {
  let container = Container::new();
  let err = container.resolve::<SimpleService>("missing").unwrap_err();
  assert!(matches!(err, Error::UnknownService(ref id) if id == "missing"));
  assert_eq!(err.to_string(), "Unknown service 'missing'");
}

#[test]
fn test_type_mismatch_is_reported() {
  let container = Container::new();
  container
    .add_singleton("simple", |_, _| Ok(SimpleService { id: 7 }))
    .unwrap();

  let err = container.resolve::<String>("simple").unwrap_err();

  assert!(matches!(err, Error::TypeMismatch { ref id, .. } if id == "simple"));
  // The instance is still cached and usable with the right type.
  assert_eq!(container.resolve::<SimpleService>("simple").unwrap().id, 7);
}

#[test]
fn test_registration_chaining_and_defaults() {
  let container = Container::new();
  container
    .register(Service::new("a", |_, _| Ok(1u8)))
    .and_then(|c| c.register(Service::new("b", |_, _| Ok(2u8)).depends_on(["a"])))
    .and_then(|c| c.register(Service::new("c", |_, _| Ok(3u8)).lifetime(Lifetime::Scoped)))
    .unwrap();

  assert_eq!(container.service_ids(), vec!["a", "b", "c"]);
  assert_eq!(container.lifetime("a"), Some(Lifetime::Singleton));
  assert_eq!(container.lifetime("c"), Some(Lifetime::Scoped));
  assert_eq!(container.dependencies("b"), Some(vec!["a".to_string()]));
  assert_eq!(container.dependencies("missing"), None);
  assert!(container.contains("b"));
  assert!(!container.is_empty());
}

#[test]
fn test_scope_values_are_typed() {
  let scope = Scope::new().with("db", String::from("conn"));

  assert_eq!(*scope.get::<String>("db").unwrap(), "conn");
  assert!(scope.get::<u32>("db").is_none());
  assert!(matches!(
    scope.require::<u32>("db"),
    Err(Error::TypeMismatch { .. })
  ));
  assert!(matches!(
    scope.require::<String>("nope"),
    Err(Error::MissingScopeValue(ref key)) if key == "nope"
  ));
}

#[test]
fn test_resolve_macro_returns_service() {
  let container = Container::new();
  container
    .add_singleton("simple", |_, _| Ok(SimpleService { id: 11 }))
    .unwrap();

  let service = scaffold_ioc::resolve!(container, SimpleService, "simple");
  let mut scope = Scope::new();
  let same = scaffold_ioc::resolve!(container, SimpleService, "simple", &mut scope);

  assert_eq!(service.id, 11);
  assert!(Arc::ptr_eq(&service, &same));
}

#[test]
#[should_panic(expected = "Failed to resolve required service 'missing'")]
fn test_resolve_macro_panics_on_missing_service() {
  let container = Container::new();
  scaffold_ioc::resolve!(container, SimpleService, "missing");
}
