//! Compiling caller-supplied match patterns.

use regex::Regex;

use depdiag_error::{Error, Result};

/// Compile `source` into a [`Regex`] for the diagram's bulk mutations.
///
/// Matching is a search anywhere in the subject; anchor with `^`/`$` for a
/// whole-name match.
pub fn pattern(source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|err| {
        Error::invalid_pattern(source, err.to_string())
            .with_operation("pattern")
            .set_source(err)
    })
}
