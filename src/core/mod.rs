//! Core data structures for alibuild.

pub mod unit;

pub use unit::{filter_sources, SourceUnit, UnitKind, BODY_SUFFIX, SPEC_SUFFIX};
