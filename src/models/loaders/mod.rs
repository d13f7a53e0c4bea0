pub mod file_loader;
pub mod toml_loader;

pub use file_loader::{content_type_for, load_raw_files};
pub use toml_loader::{load_all_quiz_files, load_quiz_file};
