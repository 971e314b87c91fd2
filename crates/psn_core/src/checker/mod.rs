//! External model checker invocation.
//!
//! Provides a safe interface to the Modest toolset for checking and
//! simulating one window's model. The driver only sees the
//! [`CheckerClient`] capability: model in, raw text or failure out.

mod client;
mod modest;
mod types;
mod validator;

pub use client::CheckerClient;
pub use modest::ModestClient;
pub use types::{CheckerError, CheckerResult, InvocationProfile, ModelSource, ERROR_MARKER};
pub use validator::ToolValidator;
