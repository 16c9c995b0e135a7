//! Read and write media tags through one key/value interface.
//!
//! # Supported Formats
//!
//! | Format          | Extensions                     | Tag      |
//! |-----------------|--------------------------------|----------|
//! | Monkey's Audio  | `ape`                          | `APEv2`  |
//! | MPEG audio      | `mp3`, `mp2`, `mp1`, `mpga`    | `ID3v1`  |
//!
//! Other formats can be plugged in with [`resolve::register_custom_resolver`].
//!
//! # Examples
//!
//! ## Reading a file
//!
//! The format is sniffed from the first bytes of the file and its extension.
//!
//! ```rust,no_run
//! # fn main() -> taglet::error::Result<()> {
//! use taglet::probe::Probe;
//!
//! let path = "test.mp3";
//!
//! // `None` if no format recognized the file
//! let media_file = taglet::read_from_path(path)?;
//!
//! // Same thing, restricting the candidates
//! let media_file2 = Probe::new(path)
//! 	.resolvers(vec![&taglet::mpeg::MpegResolver])
//! 	.read()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Editing tags
//!
//! ```rust,no_run
//! # fn main() -> taglet::error::Result<()> {
//! use taglet::prelude::*;
//!
//! let Some(mut media_file) = taglet::read_from_path("test.ape")? else {
//! 	return Ok(());
//! };
//!
//! // Creates the tag if the file doesn't have one yet
//! media_file.insert("Title", ItemValue::from("Foo title"))?;
//!
//! if let Some(tag) = media_file.tag_mut() {
//! 	tag.set_artist("Foo artist")?;
//! }
//!
//! media_file.save()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Using concrete file types
//!
//! ```rust
//! # fn main() -> taglet::error::Result<()> {
//! use taglet::config::ParseOptions;
//! use taglet::mpeg::MpegFile;
//!
//! # let mut data = vec![0xFF, 0xFB, 0x90, 0x64];
//! # data.resize(417, 0);
//! let mut reader = std::io::Cursor::new(data);
//! let mpeg_file = MpegFile::read_from(&mut reader, ParseOptions::new())?;
//!
//! assert_eq!(mpeg_file.properties().sample_rate(), 44100);
//! assert!(mpeg_file.id3v1_tag().is_none());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod error;
pub mod file;
pub(crate) mod macros;
pub mod probe;
pub mod properties;
pub mod resolve;
pub mod tag;
mod util;

pub mod ape;
pub mod id3;
pub mod mpeg;

pub use crate::probe::read_from_path;

pub use util::io;

pub mod prelude {
	//! A prelude for commonly used items in the library.
	//!
	//! This module is intended to be wildcard imported.
	//!
	//! ```rust
	//! use taglet::prelude::*;
	//! ```

	pub use crate::properties::StreamInfo;
	pub use crate::tag::{Accessor, ItemValue, TagContainer};
}
