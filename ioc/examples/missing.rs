use scaffold_ioc::{resolve, Container, Error, Service};
use std::panic;

struct Report;

fn main() {
  let container = Container::new();

  // Forward references are accepted at registration time.
  container
    .register(
      Service::new("report", |c, scope| {
        c.resolve_in::<String>("formatter", scope)?;
        Ok(Report)
      })
      .depends_on(["formatter"]),
    )
    .expect("registration should accept a forward reference");

  // --- Startup validation ---
  match container.validate() {
    Err(Error::MissingDependency { service, dependency }) => {
      println!("'{service}' declares '{dependency}', which is not registered yet.")
    }
    other => panic!("expected a missing dependency, got {other:?}"),
  }

  // --- Using the fallible `resolve()` method ---
  match container.resolve::<Report>("report") {
    Err(err) => println!("Resolution failed as expected: {err}"),
    Ok(_) => panic!("Should not have built the report!"),
  }

  // --- Using the panicking `resolve!` macro ---
  let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
    let _report = resolve!(container, Report, "report");
  }));
  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");
}
