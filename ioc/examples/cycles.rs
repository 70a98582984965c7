use scaffold_ioc::{Container, Error, Service};

fn main() {
  let container = Container::new();

  container
    .register(Service::new("orders", |_, _| Ok(())).depends_on(["billing"]))
    .expect("billing is not registered yet, so there is no cycle");

  // Closing the loop is rejected at declaration time and rolled back.
  let err = container
    .register(Service::new("billing", |_, _| Ok(())).depends_on(["orders"]))
    .unwrap_err();
  assert!(matches!(err, Error::CyclicDependency(_)));
  println!("Rejected: {err}");
  println!("Registered services: {:?}", container.service_ids());

  container
    .register(Service::new("billing", |_, _| Ok(())))
    .expect("billing without the back edge is fine");
  println!("Dependency order: {:?}", container.dependency_order());
}
