//! Transitive ALI closure of a unit.
//!
//! Walks `with` clauses depth-first through the unit's own directory and
//! collects the ALI files the unit needs, dependencies before dependents.
//! Imports that do not resolve to a sibling file are dropped; the search
//! path is covered by the source scanner instead (see `scan::deps`).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::builder::naming::ArtifactNamer;
use crate::scan::{scan_imports, SiblingIndex};

/// Resolves the ALI files a unit transitively requires.
#[derive(Debug, Clone, Copy)]
pub struct ClosureResolver<'a> {
    namer: &'a ArtifactNamer,
}

impl<'a> ClosureResolver<'a> {
    /// Create a resolver naming ALI files with `namer`.
    pub fn new(namer: &'a ArtifactNamer) -> Self {
        ClosureResolver { namer }
    }

    /// ALI files `unit` depends on, each listed once.
    pub fn closure(&self, unit: &Path) -> Vec<PathBuf> {
        let mut visited = HashSet::new();
        self.closure_with(unit, &mut visited)
    }

    /// Like [`closure`](Self::closure), sharing `visited` with the caller.
    ///
    /// `visited` holds the uppercased identity of every ALI file already
    /// recorded; those units are never descended into again.
    pub fn closure_with(&self, unit: &Path, visited: &mut HashSet<String>) -> Vec<PathBuf> {
        trace!("closure of {} (visited {})", unit.display(), visited.len());

        let mut closure = Vec::new();

        if !unit.exists() {
            debug!("{} does not exist, empty closure", unit.display());
            return closure;
        }

        let imports = scan_imports(unit);
        let siblings = SiblingIndex::of(unit);

        for import in &imports {
            let matches = siblings.units_named(import);
            if matches.is_empty() {
                trace!("`{}` is not a sibling of {}", import, unit.display());
                continue;
            }

            for matched in matches {
                let Some(ali) = self.namer.summary_artifact(&matched, None) else {
                    continue;
                };

                if !visited.insert(artifact_key(&ali)) {
                    continue;
                }

                closure.extend(self.closure_with(&matched, visited));
                closure.push(ali);
            }
        }

        debug!("{} requires {:?}", unit.display(), closure);
        closure
    }
}

/// Case-insensitive identity of an artifact path.
fn artifact_key(path: &Path) -> String {
    path.to_string_lossy().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::config::Conventions;
    use std::fs;
    use tempfile::TempDir;

    struct Tree {
        tmp: TempDir,
        namer: ArtifactNamer,
    }

    impl Tree {
        fn new() -> Self {
            let tmp = TempDir::new().unwrap();
            let namer = ArtifactNamer::new(Conventions::default(), tmp.path().join("build"));
            Tree { tmp, namer }
        }

        fn unit(&self, name: &str, text: &str) -> PathBuf {
            let path = self.tmp.path().join(name);
            fs::write(&path, text).unwrap();
            path
        }

        fn ali(&self, base: &str) -> PathBuf {
            self.tmp.path().join("build").join(format!("{}.ali", base))
        }

        fn closure(&self, unit: &Path) -> Vec<PathBuf> {
            ClosureResolver::new(&self.namer).closure(unit)
        }
    }

    #[test]
    fn test_no_imports_no_closure() {
        let tree = Tree::new();
        let main = tree.unit("main.adb", "procedure Main is\nbegin\n   null;\nend Main;\n");
        assert!(tree.closure(&main).is_empty());
    }

    #[test]
    fn test_missing_unit_no_closure() {
        let tree = Tree::new();
        assert!(tree.closure(&tree.tmp.path().join("b~main.adb")).is_empty());
    }

    #[test]
    fn test_direct_import() {
        let tree = Tree::new();
        let main = tree.unit("main.adb", "with Greet;\nprocedure Main is\n");
        tree.unit("greet.adb", "package body Greet is\nend Greet;\n");
        tree.unit("greet.ads", "package Greet is\nend Greet;\n");

        assert_eq!(tree.closure(&main), vec![tree.ali("greet")]);
    }

    #[test]
    fn test_dependencies_before_dependents() {
        let tree = Tree::new();
        let main = tree.unit("main.adb", "with A;\nprocedure Main is\n");
        tree.unit("a.ads", "with B;\npackage A is\nend A;\n");
        tree.unit("b.ads", "package B is\nend B;\n");

        assert_eq!(tree.closure(&main), vec![tree.ali("b"), tree.ali("a")]);
    }

    #[test]
    fn test_diamond_listed_once() {
        let tree = Tree::new();
        let main = tree.unit("main.adb", "with Left, Right;\nprocedure Main is\n");
        tree.unit("left.ads", "with Base;\npackage Left is\nend Left;\n");
        tree.unit("right.ads", "with Base;\npackage Right is\nend Right;\n");
        tree.unit("base.ads", "package Base is\nend Base;\n");

        assert_eq!(
            tree.closure(&main),
            vec![tree.ali("base"), tree.ali("left"), tree.ali("right")]
        );
    }

    #[test]
    fn test_cycle_terminates() {
        let tree = Tree::new();
        let a = tree.unit("a.ads", "with B;\npackage A is\nend A;\n");
        let b = tree.unit("b.ads", "with A;\npackage B is\nend B;\n");

        let closure_a = tree.closure(&a);
        let closure_b = tree.closure(&b);

        assert_eq!(closure_a.iter().filter(|p| **p == tree.ali("b")).count(), 1);
        assert_eq!(closure_b.iter().filter(|p| **p == tree.ali("a")).count(), 1);
        assert!(closure_a.len() <= 2);
        assert!(closure_b.len() <= 2);
    }

    #[test]
    fn test_unresolved_imports_dropped() {
        let tree = Tree::new();
        let main = tree.unit(
            "main.adb",
            "with Ada.Text_IO;\nwith Greet;\nprocedure Main is\n",
        );
        tree.unit("greet.ads", "package Greet is\nend Greet;\n");

        assert_eq!(tree.closure(&main), vec![tree.ali("greet")]);
    }

    #[test]
    fn test_import_matched_ignoring_case() {
        let tree = Tree::new();
        let main = tree.unit("main.adb", "with GREET;\nprocedure Main is\n");
        tree.unit("Greet.ads", "package Greet is\nend Greet;\n");

        assert_eq!(tree.closure(&main), vec![tree.ali("Greet")]);
    }

    #[test]
    fn test_shared_visited_set() {
        let tree = Tree::new();
        let main = tree.unit("main.adb", "with Greet;\nprocedure Main is\n");
        tree.unit("greet.ads", "package Greet is\nend Greet;\n");

        let mut visited = HashSet::new();
        visited.insert(artifact_key(&tree.ali("greet")));

        let resolver = ClosureResolver::new(&tree.namer);
        assert!(resolver.closure_with(&main, &mut visited).is_empty());
    }
}
