//! Codec error type
//!
//! [`CodecError`] is defined in [`crate::common`] next to the constants it
//! reports on; this module gives it a stable path for callers that only need
//! the error and the matching `Result` alias.

pub use crate::common::{CodecError, Result};
