//! Ada build planning and execution.
//!
//! This module names artifacts, resolves ALI closures, emits targets and
//! dependency edges, and drives the compile/bind/link tools.

pub mod action;
pub mod closure;
pub mod emitter;
pub mod events;
pub mod executor;
pub mod graph;
pub mod naming;
pub mod toolchain;

pub use action::{ActionError, BuildAction, BuildOutcome, Tool};
pub use closure::ClosureResolver;
pub use emitter::{Emission, TargetEmitter};
pub use events::BuildEvent;
pub use executor::{BuildExecutor, BuildReport, MessageFormat};
pub use graph::{BuildGraph, DependencyGraph, GraphEdge};
pub use naming::{ArtifactNamer, BindUnits};
pub use toolchain::{CommandSpec, TemplateError, Toolchain};
