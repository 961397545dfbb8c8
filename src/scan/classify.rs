//! Entry point classification.

use std::path::Path;

use tracing::debug;

use super::{read_source, PACKAGE_BODY_RE, PROCEDURE_RE};
use crate::core::unit::{suffix_of, BODY_SUFFIX};

/// Whether a unit is a main program rather than a library body.
///
/// Only existing body files qualify. Lines are scanned top-down and the
/// first header that matches decides: a `package body ... is` line means a
/// library body, a `procedure ... is` line means an entry point. A file with
/// neither is not an entry point.
pub fn is_entry_point(path: &Path) -> bool {
    // Suffix case is ignored here but not in `bind_units` or `filter_sources`,
    // so `MAIN.ADB` classifies as a main yet never gets a binder pair.
    let is_body = suffix_of(path)
        .map(|suffix| suffix.eq_ignore_ascii_case(BODY_SUFFIX))
        .unwrap_or(false);
    if !is_body {
        return false;
    }

    let Some(text) = read_source(path) else {
        return false;
    };

    for line in text.lines() {
        if PACKAGE_BODY_RE.is_match(line) {
            debug!("{} is a package body", path.display());
            return false;
        }
        if PROCEDURE_RE.is_match(line) {
            debug!("{} is an entry point", path.display());
            return true;
        }
    }

    false
}
