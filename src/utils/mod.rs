pub mod format;
pub mod logging;

pub use format::{format_elapsed, format_file_size};
