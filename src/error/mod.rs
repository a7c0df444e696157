//! Error types.
//!
//! Document problems are recoverable and end up in a [`CheckResult`].
//! Construction problems are reported as [`BuildError`] before any document
//! is checked, and [`CompileError`] covers schema description documents.

mod build_error;
mod check_error;
mod check_result;

pub use build_error::{BuildError, CompileError};
pub use check_error::{CheckError, CheckErrors, ErrorKind, SizeViolation};
pub use check_result::CheckResult;
