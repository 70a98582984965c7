use scaffold_ioc::{Container, Scope, Service};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn tracker() -> scaffold_ioc::Result<RequestTracker> {
  Ok(RequestTracker {
    id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
  })
}

fn main() -> scaffold_ioc::Result<()> {
  let container = Container::new();

  // --- Singleton Registration ---
  // This factory will only be called ONCE.
  container.register(Service::new("singleton_tracker", |_, _| {
    println!("Creating SINGLETON RequestTracker...");
    tracker()
  }))?;

  // --- Scoped Registration ---
  // This factory will be called once per scope.
  container.register(
    Service::new("scoped_tracker", |_, _| {
      println!("Creating SCOPED RequestTracker...");
      tracker()
    })
    .scoped(),
  )?;

  println!("--- Resolving Singletons ---");
  let s1 = container.resolve::<RequestTracker>("singleton_tracker")?;
  let s2 = container.resolve::<RequestTracker>("singleton_tracker")?;
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.id, s2.id);
  assert!(Arc::ptr_eq(&s1, &s2), "Singleton instances should be identical");

  println!("\n--- Resolving Scoped ---");
  let mut request_a = Scope::new();
  let mut request_b = Scope::new();
  let a1 = container.resolve_in::<RequestTracker>("scoped_tracker", &mut request_a)?;
  let a2 = container.resolve_in::<RequestTracker>("scoped_tracker", &mut request_a)?;
  let b1 = container.resolve_in::<RequestTracker>("scoped_tracker", &mut request_b)?;
  println!("Request A IDs: {} {}, Request B ID: {}", a1.id, a2.id, b1.id);
  assert!(Arc::ptr_eq(&a1, &a2), "Same scope should share an instance");
  assert!(!Arc::ptr_eq(&a1, &b1), "Different scopes should not");

  println!("\n--- Clearing Singletons ---");
  container.clear_singletons();
  let s3 = container.resolve::<RequestTracker>("singleton_tracker")?;
  println!("Singleton after clear ID: {}", s3.id);
  assert!(!Arc::ptr_eq(&s1, &s3));

  Ok(())
}
