//! Public macros for ergonomic service resolution.

/// Resolves a required service from a container.
///
/// Intended for wiring code where a missing or mistyped service is a programming
/// error. It panics if the service cannot be resolved. For a non-panicking
/// version, use `Container::resolve` or `Container::resolve_in` directly.
///
/// # Panics
///
/// Panics with the underlying container error if resolution fails.
///
/// # Examples
///
/// ```
/// use scaffold_ioc::{resolve, Container, Scope};
///
/// let container = Container::new();
/// container.add_singleton("greeting", |_, _| Ok(String::from("hello"))).unwrap();
///
/// let greeting = resolve!(container, String, "greeting");
/// assert_eq!(*greeting, "hello");
///
/// let mut scope = Scope::new();
/// let again = resolve!(container, String, "greeting", &mut scope);
/// assert_eq!(*again, "hello");
/// ```
#[macro_export]
macro_rules! resolve {
  // resolve!(container, Type, "id")
  ($container:expr, $type:ty, $id:expr) => {
    $container
      .resolve::<$type>($id)
      .unwrap_or_else(|err| panic!("Failed to resolve required service '{}': {}", $id, err))
  };

  // resolve!(container, Type, "id", scope)
  ($container:expr, $type:ty, $id:expr, $scope:expr) => {
    $container
      .resolve_in::<$type>($id, $scope)
      .unwrap_or_else(|err| panic!("Failed to resolve required service '{}': {}", $id, err))
  };
}
