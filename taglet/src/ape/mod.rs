//! APE specific items
//!
//! ## File notes
//!
//! Monkey's Audio files carry an APEv2 tag at the end of the file. An `ID3v2` tag at the start
//! is skipped over, and an `ID3v1` tag after the APE tag is left untouched.
pub(crate) mod constants;
pub(crate) mod header;
mod properties;
mod read;
pub(crate) mod tag;

use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::{FileType, MediaFile};
use crate::id3::strip_id3v2;
use crate::resolve::{FileResolver, extension_matches};
use crate::tag::TagContainer;

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

// Exports

pub use properties::ApeProperties;
pub use tag::ApeTag;
pub use tag::item::ApeItem;

/// An APE file
#[derive(Debug, Default)]
pub struct ApeFile {
	/// An APEv1/v2 tag
	pub(crate) ape_tag: Option<ApeTag>,
	/// The file's audio properties
	pub(crate) properties: ApeProperties,
}

impl ApeFile {
	/// Read an `ApeFile` from a reader
	///
	/// # Errors
	///
	/// * The stream does not start with a `MAC ` descriptor (after an optional ID3v2 tag)
	/// * The APE tag or the audio properties are malformed
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		read::read_from(reader, parse_options)
	}

	/// The file's APE tag, if it has one
	pub fn ape_tag(&self) -> Option<&ApeTag> {
		self.ape_tag.as_ref()
	}

	/// The file's audio properties
	pub fn properties(&self) -> &ApeProperties {
		&self.properties
	}

	/// Converts the file into a [`MediaFile`] bound to `path`
	pub fn into_media_file(self, path: &Path) -> MediaFile {
		let tag = self
			.ape_tag
			.map(|tag| -> Box<dyn TagContainer> { Box::new(tag) });

		MediaFile::new(FileType::Ape, path, self.properties, ApeTag::new_boxed).with_tag(tag)
	}
}

/// The built-in resolver for Monkey's Audio files
#[derive(Copy, Clone, Debug, Default)]
pub struct ApeResolver;

impl FileResolver for ApeResolver {
	fn name(&self) -> &'static str {
		"Ape"
	}

	fn score(&self, path: &Path, header: &[u8]) -> u32 {
		let mut score = 0;
		let ape_extension = extension_matches(path, &["ape"]);

		let stream = strip_id3v2(header);
		if stream.starts_with(b"MAC ") {
			score += 2;
		} else if ape_extension && stream.is_empty() && header.starts_with(b"ID3") {
			// The stream is hidden behind an ID3v2 tag
			score += 1;
		}

		if header.starts_with(constants::APE_PREAMBLE) {
			score += 1;
		}

		if ape_extension {
			score += 1;
		}

		score
	}

	fn open(&self, path: &Path, parse_options: ParseOptions) -> Result<MediaFile> {
		let mut reader = BufReader::new(File::open(path)?);
		let file = ApeFile::read_from(&mut reader, parse_options)?;

		Ok(file.into_media_file(path))
	}
}

#[cfg(test)]
mod tests {
	use super::ApeResolver;
	use crate::resolve::FileResolver;

	use std::path::Path;

	#[test_log::test]
	fn score() {
		let resolver = ApeResolver;

		assert_eq!(resolver.score(Path::new("a.ape"), b"MAC \x96\x0f"), 3);
		assert_eq!(resolver.score(Path::new("a.bin"), b"MAC \x96\x0f"), 2);
		assert_eq!(resolver.score(Path::new("a.APE"), b"APETAGEX"), 2);
		assert_eq!(resolver.score(Path::new("a.ape"), b""), 1);
		assert_eq!(resolver.score(Path::new("a.mp3"), b"ID3"), 0);

		// A small ID3v2 tag, with the stream right after it
		assert_eq!(resolver.score(Path::new("a.bin"), b"ID3\x04\0\0\0\0\0\0MAC "), 2);

		// A 2 KiB ID3v2 tag, longer than any header
		let large_id3v2 = b"ID3\x04\0\0\0\0\x10\0";
		assert_eq!(resolver.score(Path::new("a.ape"), large_id3v2), 2);
		assert_eq!(resolver.score(Path::new("a.mp3"), large_id3v2), 0);
	}
}
