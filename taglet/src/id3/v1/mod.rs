//! ID3v1 items
//!
//! # ID3v1 notes
//!
//! An ID3v1 tag is a fixed 128 byte block at the very end of a file. Every field has a fixed size,
//! so text will be truncated if it doesn't fit, and only Latin-1 text can be stored.
//!
//! ## Keys
//!
//! The tag only has seven fields, addressed by these (case-insensitive) keys:
//!
//! * `title`, `artist`, `album`: up to 30 bytes
//! * `comment`: up to 28 bytes, or 30 bytes if no track number is set
//! * `year`: a number from 0 to 9999
//! * `track`: a number from 1 to 255
//! * `genre`: one of the names in [`GENRES`], or its index

mod constants;
mod read;
mod tag;
mod write;

pub use constants::{GENRES, ID3V1_TAG_MARKER};
pub use tag::{Id3v1Field, Id3v1Tag};
