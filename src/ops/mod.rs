//! High-level operations.
//!
//! This module contains the implementation of alibuild commands.

pub mod ali_build;
pub mod clean;
pub mod doctor;
pub mod emit;
pub mod inspect;

pub use ali_build::{build, BuildOptions};
pub use clean::{clean, CleanOptions};
pub use doctor::{doctor, DoctorReport};
pub use emit::{emit, EmitPlan};
pub use inspect::{classify, closure, deps, imports, Classification, ImportReport};
