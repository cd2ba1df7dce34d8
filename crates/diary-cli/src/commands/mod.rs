mod list;
mod misc;
mod new;
mod read;

pub use list::handle_list;
pub use misc::handle_completions;
pub use new::handle_new;
pub use read::handle_read;
