//! alibuild - dependency scanning and target emission for GNAT-style Ada builds
//!
//! This crate scans Ada units for `with` clauses, resolves the transitive
//! closure of ALI files a main program depends on, names the artifacts a
//! compile step produces, and runs the compile/bind/link sequence.

pub mod builder;
pub mod core;
pub mod ops;
pub mod scan;
pub mod util;

/// Test utilities and mocks for alibuild unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a scripted command runner and on-disk Ada
/// project fixtures.
#[cfg(test)]
pub mod test_support;

pub use builder::{ArtifactNamer, BuildGraph, ClosureResolver, TargetEmitter, Toolchain};
pub use core::unit::SourceUnit;
pub use util::config::Config;
pub use util::context::GlobalContext;
