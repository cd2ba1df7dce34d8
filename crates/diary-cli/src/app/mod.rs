//! Application-level utilities for the Diary CLI.
//!
//! This module provides:
//! - Config path and settings resolution
//! - The per-invocation application context

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::TemplateSource;
