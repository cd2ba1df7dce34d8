//! Input helper functions for the CLI.
//!
//! - Password prompting and entry body reading (`input`)
//! - Editor capture and display (`editor`)

mod editor;
mod input;

pub use editor::{display_entry, EditorSettings};
pub use input::{prompt_password, read_entry_body};
