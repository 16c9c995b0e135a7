//! MPEG specific items
//!
//! ## File notes
//!
//! The only tag written to MPEG files is `ID3v1`. Leading `ID3v2` tags are skipped when
//! looking for the first frame, and an `APE` tag at the end is excluded from the stream length.
mod constants;
pub(crate) mod header;
mod properties;
mod read;

use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::{FileType, MediaFile};
use crate::id3::strip_id3v2;
use crate::id3::v1::Id3v1Tag;
use crate::resolve::{FileResolver, extension_matches};
use crate::tag::TagContainer;

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

pub use header::{ChannelMode, Layer, MpegVersion};
pub use properties::MpegProperties;

/// An MPEG file
#[derive(Debug, Default)]
pub struct MpegFile {
	/// An ID3v1 tag
	pub(crate) id3v1_tag: Option<Id3v1Tag>,
	/// The file's audio properties
	pub(crate) properties: MpegProperties,
}

impl MpegFile {
	/// Read an `MpegFile` from a reader
	///
	/// # Errors
	///
	/// * No frame was found within [`ParseOptions::max_junk_bytes`] of the audio start,
	///   and properties were requested
	/// * The ID3v1 tag is malformed
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		read::read_from(reader, parse_options)
	}

	/// The file's ID3v1 tag, if it has one
	pub fn id3v1_tag(&self) -> Option<&Id3v1Tag> {
		self.id3v1_tag.as_ref()
	}

	/// The file's audio properties
	pub fn properties(&self) -> &MpegProperties {
		&self.properties
	}

	/// Converts the file into a [`MediaFile`] bound to `path`
	pub fn into_media_file(self, path: &Path) -> MediaFile {
		let tag = self
			.id3v1_tag
			.map(|tag| -> Box<dyn TagContainer> { Box::new(tag) });

		MediaFile::new(FileType::Mpeg, path, self.properties, Id3v1Tag::new_boxed).with_tag(tag)
	}
}

/// The built-in resolver for MPEG audio files
#[derive(Copy, Clone, Debug, Default)]
pub struct MpegResolver;

impl FileResolver for MpegResolver {
	fn name(&self) -> &'static str {
		"Mpeg"
	}

	fn score(&self, path: &Path, header: &[u8]) -> u32 {
		let mut score = 0;

		// ID3v2 tags show up in front of other formats as well
		if header.starts_with(b"ID3") {
			score += 1;
		}

		if header::Header::is_frame_start(strip_id3v2(header)) {
			score += 2;
		}

		if extension_matches(path, &["mp3", "mp2", "mp1", "mpga"]) {
			score += 1;
		}

		score
	}

	fn open(&self, path: &Path, parse_options: ParseOptions) -> Result<MediaFile> {
		let mut reader = BufReader::new(File::open(path)?);
		let file = MpegFile::read_from(&mut reader, parse_options)?;

		Ok(file.into_media_file(path))
	}
}

#[cfg(test)]
mod tests {
	use super::MpegResolver;
	use crate::resolve::FileResolver;

	use std::path::Path;

	#[test_log::test]
	fn score() {
		let resolver = MpegResolver;
		let frame = [0xFF, 0xFB, 0x90, 0x64];

		assert_eq!(resolver.score(Path::new("a.mp3"), b"ID3\x04\x00"), 2);
		assert_eq!(resolver.score(Path::new("a.ape"), b"ID3\x04\x00"), 1);

		let mut tagged = b"ID3\x03\0\0\0\0\0\0".to_vec();
		tagged.extend_from_slice(&frame);
		assert_eq!(resolver.score(Path::new("a.bin"), &tagged), 3);
		assert_eq!(resolver.score(Path::new("a.MP2"), &frame), 3);
		assert_eq!(resolver.score(Path::new("a.ape"), &frame), 2);
		assert_eq!(resolver.score(Path::new("a.mpga"), b""), 1);
		assert_eq!(resolver.score(Path::new("a.ape"), b"MAC "), 0);
	}
}
