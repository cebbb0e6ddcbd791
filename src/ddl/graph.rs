//! Table dependency graph for FK-aware statement ordering.
//!
//! Provides:
//! - Dependency graph construction from the structured foreign keys of [`TableSpec`]s
//! - Depth-first post-order traversal and topological ordering
//! - Cycle tolerance: a table already visited is never descended into again

use super::TableSpec;
use ahash::{AHashMap, AHashSet};
use tracing::debug;

/// Dependency graph: table name → tables it references via foreign keys.
///
/// Only tables that declare at least one foreign key are keys. Keys keep
/// scan order and each edge list keeps FK declaration order, so traversal
/// is deterministic.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    keys: Vec<String>,
    edges: AHashMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Build a dependency graph from table specs (schema tables and junctions alike)
    pub fn from_specs<'a>(specs: impl IntoIterator<Item = &'a TableSpec>) -> Self {
        let mut graph = Self::default();

        for spec in specs {
            for fk in &spec.foreign_keys {
                graph.add_edge(&spec.name, &fk.referenced_table);
            }
        }

        graph
    }

    /// Record that `dependent` references `referenced`
    pub fn add_edge(&mut self, dependent: &str, referenced: &str) {
        if !self.edges.contains_key(dependent) {
            self.keys.push(dependent.to_string());
        }
        let deps = self.edges.entry(dependent.to_string()).or_default();
        if !deps.iter().any(|d| d == referenced) {
            deps.push(referenced.to_string());
        }
    }

    /// Number of tables with outgoing foreign keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Tables with outgoing foreign keys, in scan order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Tables directly referenced by `table`
    pub fn dependencies(&self, table: &str) -> &[String] {
        self.edges.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if `dependent` directly references `referenced`
    pub fn depends_on(&self, dependent: &str, referenced: &str) -> bool {
        self.dependencies(dependent).iter().any(|d| d == referenced)
    }

    /// Every table mentioned by the graph, as a key or as a referenced table
    pub fn nodes(&self) -> Vec<&str> {
        let mut seen = AHashSet::new();
        let mut nodes = Vec::new();
        for key in &self.keys {
            for name in std::iter::once(key).chain(self.dependencies(key)) {
                if seen.insert(name.as_str()) {
                    nodes.push(name.as_str());
                }
            }
        }
        nodes
    }

    /// Depth-first post-order over the graph.
    ///
    /// Traversal starts from each key in scan order and follows edges in
    /// declaration order. A table is appended after everything it references.
    /// On a cycle the back edge is skipped, so every table appears once.
    pub fn post_order(&self) -> Vec<String> {
        let mut visited: AHashSet<&str> = AHashSet::new();
        let mut on_path: AHashSet<&str> = AHashSet::new();
        let mut order = Vec::new();

        for key in &self.keys {
            if !visited.insert(key.as_str()) {
                continue;
            }
            on_path.insert(key.as_str());
            let mut stack: Vec<(&str, usize)> = vec![(key.as_str(), 0)];

            while let Some(frame) = stack.last_mut() {
                let node = frame.0;
                match self.dependencies(node).get(frame.1) {
                    Some(next) => {
                        frame.1 += 1;
                        let next = next.as_str();
                        if visited.insert(next) {
                            on_path.insert(next);
                            stack.push((next, 0));
                        } else if on_path.contains(next) {
                            debug!(from = node, to = next, "breaking dependency cycle");
                        }
                    }
                    None => {
                        on_path.remove(node);
                        order.push(node.to_string());
                        stack.pop();
                    }
                }
            }
        }

        order
    }

    /// Topological order: the reversed post-order, dependents before the
    /// tables they reference.
    pub fn topological_order(&self) -> Vec<String> {
        let mut order = self.post_order();
        order.reverse();
        order
    }
}
