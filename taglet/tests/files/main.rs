#![allow(missing_docs)]

mod ape;
mod media_file;
mod mpeg;
mod probe;
pub(crate) mod util;
