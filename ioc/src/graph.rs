//! The registration table and the dependency graph derived from it.

use crate::core::Registration;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
  OnStack,
  Done,
}

/// Registrations keyed by service identifier, remembering registration order.
///
/// The dependency graph is never stored: its nodes are the registered identifiers
/// and its edges are each registration's `depends_on` list. Edges to identifiers
/// that are not registered are not part of the graph.
#[derive(Default, Debug)]
pub(crate) struct Registry {
  order: Vec<String>,
  entries: HashMap<String, Arc<Registration>>,
}

impl Registry {
  pub(crate) fn get(&self, id: &str) -> Option<&Arc<Registration>> {
    self.entries.get(id)
  }

  pub(crate) fn contains(&self, id: &str) -> bool {
    self.entries.contains_key(id)
  }

  pub(crate) fn len(&self) -> usize {
    self.order.len()
  }

  pub(crate) fn ids(&self) -> &[String] {
    &self.order
  }

  /// Appends a registration. The caller checks for duplicates first.
  pub(crate) fn insert(&mut self, id: String, registration: Registration) {
    self.entries.insert(id.clone(), Arc::new(registration));
    self.order.push(id);
  }

  /// Removes the most recent registration if it is `id`.
  pub(crate) fn rollback(&mut self, id: &str) {
    if self.order.last().map(String::as_str) == Some(id) {
      self.order.pop();
      self.entries.remove(id);
    }
  }

  fn edges(&self, id: &str) -> impl Iterator<Item = &str> {
    self
      .entries
      .get(id)
      .map(|registration| registration.depends_on.as_slice())
      .unwrap_or_default()
      .iter()
      .map(String::as_str)
      .filter(|dep| self.entries.contains_key(*dep))
  }

  /// Depth-first search from every node in registration order.
  ///
  /// Returns the first cycle found as a path whose first and last elements are the
  /// same identifier.
  pub(crate) fn find_cycle(&self) -> Option<Vec<String>> {
    let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(self.order.len());
    let mut path: Vec<&str> = Vec::new();

    for root in &self.order {
      if marks.contains_key(root.as_str()) {
        continue;
      }
      if let Some(cycle) = self.visit(root, &mut marks, &mut path) {
        return Some(cycle);
      }
    }
    None
  }

  fn visit<'a>(
    &'a self,
    node: &'a str,
    marks: &mut HashMap<&'a str, Mark>,
    path: &mut Vec<&'a str>,
  ) -> Option<Vec<String>> {
    marks.insert(node, Mark::OnStack);
    path.push(node);

    for dep in self.edges(node) {
      match marks.get(dep).copied() {
        Some(Mark::OnStack) => {
          let start = path.iter().position(|n| *n == dep).unwrap_or(0);
          let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
          cycle.push(dep.to_owned());
          return Some(cycle);
        }
        Some(Mark::Done) => {}
        None => {
          if let Some(cycle) = self.visit(dep, marks, path) {
            return Some(cycle);
          }
        }
      }
    }

    path.pop();
    marks.insert(node, Mark::Done);
    None
  }

  /// Registered identifiers with every registered dependency placed before its
  /// dependents. Ties follow registration order. Assumes the graph is acyclic.
  pub(crate) fn dependency_order(&self) -> Vec<String> {
    let mut seen: HashMap<&str, Mark> = HashMap::with_capacity(self.order.len());
    let mut ordered = Vec::with_capacity(self.order.len());

    for root in &self.order {
      self.post_order(root, &mut seen, &mut ordered);
    }
    ordered
  }

  fn post_order<'a>(
    &'a self,
    node: &'a str,
    seen: &mut HashMap<&'a str, Mark>,
    ordered: &mut Vec<String>,
  ) {
    if seen.contains_key(node) {
      return;
    }
    seen.insert(node, Mark::OnStack);
    for dep in self.edges(node) {
      self.post_order(dep, seen, ordered);
    }
    seen.insert(node, Mark::Done);
    ordered.push(node.to_owned());
  }

  /// The first declared dependency, in registration then declaration order, that
  /// names an unregistered service.
  pub(crate) fn first_missing_dependency(&self) -> Option<(String, String)> {
    self.order.iter().find_map(|id| {
      self.entries[id]
        .depends_on
        .iter()
        .find(|dep| !self.entries.contains_key(dep.as_str()))
        .map(|dep| (id.clone(), dep.clone()))
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::{Instance, Lifetime};
  use std::sync::Arc;

  fn registration(deps: &[&str]) -> Registration {
    Registration {
      factory: Box::new(|_: &crate::Container, _: &mut crate::Scope| -> crate::Result<Instance> {
        Ok(Arc::new(()))
      }),
      lifetime: Lifetime::Singleton,
      depends_on: deps.iter().map(|d| d.to_string()).collect(),
    }
  }

  fn registry(nodes: &[(&str, &[&str])]) -> Registry {
    let mut registry = Registry::default();
    for (id, deps) in nodes {
      registry.insert(id.to_string(), registration(deps));
    }
    registry
  }

  #[test]
  fn acyclic_graph_has_no_cycle() {
    let registry = registry(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[])]);
    assert_eq!(registry.find_cycle(), None);
  }

  #[test]
  fn self_loop_is_reported() {
    let registry = registry(&[("a", &["a"])]);
    assert_eq!(registry.find_cycle(), Some(vec!["a".to_string(), "a".to_string()]));
  }

  #[test]
  fn cycle_path_starts_at_the_repeated_node() {
    let registry = registry(&[("root", &["a"]), ("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
    let cycle = registry.find_cycle().unwrap();
    assert_eq!(cycle, vec!["a", "b", "c", "a"]);
  }

  #[test]
  fn unregistered_edges_are_ignored() {
    let registry = registry(&[("a", &["ghost"]), ("b", &["a", "phantom"])]);
    assert_eq!(registry.find_cycle(), None);
  }

  #[test]
  fn diamond_is_not_a_cycle() {
    let registry = registry(&[("top", &["left", "right"]), ("left", &["base"]), ("right", &["base"]), ("base", &[])]);
    assert_eq!(registry.find_cycle(), None);
  }

  #[test]
  fn dependency_order_places_dependencies_first() {
    let registry = registry(&[("utility", &["logger", "db"]), ("db", &["config"]), ("logger", &[]), ("config", &[])]);
    assert_eq!(registry.dependency_order(), vec!["logger", "config", "db", "utility"]);
  }

  #[test]
  fn rollback_only_removes_the_latest_entry() {
    let mut registry = registry(&[("a", &[]), ("b", &[])]);
    registry.rollback("a");
    assert_eq!(registry.len(), 2);
    registry.rollback("b");
    assert_eq!(registry.ids(), ["a".to_string()]);
    assert!(!registry.contains("b"));
  }

  #[test]
  fn first_missing_dependency_follows_registration_order() {
    let registry = registry(&[("a", &["b"]), ("b", &["x", "y"]), ("c", &["z"])]);
    assert_eq!(
      registry.first_missing_dependency(),
      Some(("b".to_string(), "x".to_string()))
    );
  }
}
