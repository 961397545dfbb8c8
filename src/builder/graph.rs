//! Dependency edges registered with the build engine.
//!
//! The emitter reports "these targets require these files" through the
//! [`DependencyGraph`] trait. [`BuildGraph`] is the in-process engine used
//! by the CLI; other engines implement the trait themselves.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;

/// Sink for dependency edges.
pub trait DependencyGraph {
    /// Record that every path in `targets` requires every path in `sources`.
    fn depends(&mut self, targets: &[PathBuf], sources: &[PathBuf]);
}

/// A single `target -> requirement` edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub target: PathBuf,
    pub requires: PathBuf,
}

/// In-memory dependency graph over file paths.
#[derive(Debug, Default)]
pub struct BuildGraph {
    graph: DiGraph<PathBuf, ()>,
    nodes: HashMap<PathBuf, NodeIndex>,
}

impl BuildGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&mut self, path: &Path) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(path.to_path_buf());
        self.nodes.insert(path.to_path_buf(), idx);
        idx
    }

    /// All edges in registration order.
    pub fn edges(&self) -> Vec<GraphEdge> {
        self.graph
            .edge_references()
            .map(|e| GraphEdge {
                target: self.graph[e.source()].clone(),
                requires: self.graph[e.target()].clone(),
            })
            .collect()
    }

    /// Files `target` directly requires, in registration order.
    pub fn requirements(&self, target: &Path) -> Vec<PathBuf> {
        let Some(&idx) = self.nodes.get(target) else {
            return Vec::new();
        };

        self.graph
            .edge_references()
            .filter(|e| e.source() == idx)
            .map(|e| self.graph[e.target()].clone())
            .collect()
    }

    /// Every target that directly or transitively requires `changed`,
    /// sorted by path.
    pub fn invalidated_by(&self, changed: &Path) -> Vec<PathBuf> {
        let Some(&start) = self.nodes.get(changed) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some(idx) = queue.pop_front() {
            for dependent in self.graph.neighbors_directed(idx, Direction::Incoming) {
                if seen.insert(dependent) {
                    queue.push_back(dependent);
                }
            }
        }

        let mut stale: Vec<PathBuf> = seen.into_iter().map(|i| self.graph[i].clone()).collect();
        stale.sort();
        stale
    }
}

impl DependencyGraph for BuildGraph {
    fn depends(&mut self, targets: &[PathBuf], sources: &[PathBuf]) {
        for target in targets {
            let from = self.node(target);
            for source in sources {
                let to = self.node(source);
                self.graph.update_edge(from, to, ());
            }
        }
    }
}
