//! # depdiag-error
//!
//! Unified error handling for depdiag.
//!
//! - **ErrorKind**: what went wrong (e.g. InvalidArgument, Network)
//! - **Error Context**: key/value pairs locating the cause
//! - **Error Source**: the wrapped underlying error, if any
//!
//! ## Usage
//!
//! ```rust
//! use depdiag_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::InvalidArgument, "entity name is empty")
//!         .with_operation("diagram::get_or_create")
//!         .with_context("name", "[]"))
//! }
//! ```

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using depdiag Error
pub type Result<T> = std::result::Result<T, Error>;
