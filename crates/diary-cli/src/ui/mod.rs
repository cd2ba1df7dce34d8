//! Terminal feedback.

mod progress;

pub use progress::with_spinner;
