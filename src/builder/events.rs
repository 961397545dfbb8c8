//! Build event types for JSON output.
//!
//! These events are emitted one per line when using `--message-format json`.
//!
//! # Event Types
//!
//! - `unit-compiled`: A unit's objects were produced
//! - `binder-generated`: The binder ran for an entry point (its output is already removed)
//! - `unit-linked`: An entry point was linked into an executable
//! - `build-finished`: Build completed (success or failure)
//! - `diagnostic`: A free-form message

use std::path::PathBuf;

use serde::Serialize;

/// A build event emitted during the build process.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "reason")]
pub enum BuildEvent {
    /// A unit was compiled.
    #[serde(rename = "unit-compiled")]
    UnitCompiled {
        /// Source unit
        unit: PathBuf,
        /// Object files produced, including the generated main's
        objects: Vec<PathBuf>,
    },

    /// The binder generated (and the build consumed) a main program pair.
    #[serde(rename = "binder-generated")]
    BinderGenerated {
        /// Entry point the pair belongs to
        unit: PathBuf,
        /// Generated body and spec
        files: Vec<PathBuf>,
    },

    /// An entry point was linked.
    #[serde(rename = "unit-linked")]
    UnitLinked {
        /// Entry point
        unit: PathBuf,
        /// Executable written
        executable: PathBuf,
    },

    /// Build completed (success or failure).
    #[serde(rename = "build-finished")]
    BuildFinished {
        /// Whether the build succeeded
        success: bool,
        /// Total build duration in milliseconds
        duration_ms: u64,
        /// Number of units compiled
        #[serde(skip_serializing_if = "Option::is_none")]
        units_built: Option<u64>,
    },

    /// A generic diagnostic message.
    #[serde(rename = "diagnostic")]
    Diagnostic {
        /// Severity level ("error", "warning", "note")
        level: String,
        /// Message text
        message: String,
    },
}

impl BuildEvent {
    /// Create a unit compiled event.
    pub fn compiled(unit: impl Into<PathBuf>, objects: Vec<PathBuf>) -> Self {
        BuildEvent::UnitCompiled {
            unit: unit.into(),
            objects,
        }
    }

    /// Create a build finished event.
    pub fn finished(success: bool, duration_ms: u64, units_built: u64) -> Self {
        BuildEvent::BuildFinished {
            success,
            duration_ms,
            units_built: Some(units_built),
        }
    }

    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        BuildEvent::Diagnostic {
            level: "error".to_string(),
            message: message.into(),
        }
    }

    /// Serialize this event to a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_serialization() {
        let event = BuildEvent::compiled(
            "src/main.adb",
            vec![PathBuf::from("main.o"), PathBuf::from("b~main.o")],
        );
        let json = event.to_json();
        assert!(json.contains("\"reason\":\"unit-compiled\""));
        assert!(json.contains("\"unit\":\"src/main.adb\""));
        assert!(json.contains("b~main.o"));
    }

    #[test]
    fn test_finished_serialization() {
        let event = BuildEvent::finished(false, 1250, 3);
        let json = event.to_json();
        assert!(json.contains("\"reason\":\"build-finished\""));
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"duration_ms\":1250"));
        assert!(json.contains("\"units_built\":3"));
    }

    #[test]
    fn test_binder_generated_serialization() {
        let event = BuildEvent::BinderGenerated {
            unit: PathBuf::from("main.adb"),
            files: vec![PathBuf::from("b~main.adb"), PathBuf::from("b~main.ads")],
        };
        let json = event.to_json();
        assert!(json.contains("\"reason\":\"binder-generated\""));
        assert!(json.contains("b~main.ads"));
    }

    #[test]
    fn test_error_diagnostic() {
        let json = BuildEvent::error("binder exited with status 4").to_json();
        assert!(json.contains("\"reason\":\"diagnostic\""));
        assert!(json.contains("\"level\":\"error\""));
    }
}
