//! Command implementations

pub mod build;
pub mod classify;
pub mod clean;
pub mod closure;
pub mod completions;
pub mod deps;
pub mod doctor;
pub mod emit;
pub mod imports;
