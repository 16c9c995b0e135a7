//! Generic file handling utilities

mod file_type;
mod media_file;

pub use file_type::{EXTENSIONS, FileType};
pub use media_file::MediaFile;
