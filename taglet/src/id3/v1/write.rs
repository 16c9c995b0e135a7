use super::constants::ID3V1_TAG_MARKER;
use super::tag::{Id3v1Field, Id3v1Tag};
use crate::config::WriteOptions;
use crate::error::Result;
use crate::id3::find_id3v1;
use crate::tag::TagContainer;
use crate::util::io::{SeekStreamLen, rewrite_region};
use crate::util::text::latin1_encode;

use std::fs::File;
use std::io::{BufReader, Write};
use std::ops::Range;
use std::path::Path;

use byteorder::WriteBytesExt;

/// Where the tag lives in the file, or where it would be appended
fn tag_region(path: &Path) -> Result<(bool, Range<u64>)> {
	let mut reader = BufReader::new(File::open(path)?);
	let len = reader.stream_len_hack()?;

	match find_id3v1(&mut reader)? {
		Some(start) => Ok((true, start..len)),
		None => Ok((false, len..len)),
	}
}

pub(super) fn write_to_path(tag: &Id3v1Tag, path: &Path, write_options: WriteOptions) -> Result<()> {
	let (exists, region) = tag_region(path)?;

	if tag.is_empty() {
		if exists {
			log::debug!("ID3v1: Tag is empty, stripping it");
		}

		// An empty region is left alone
		return rewrite_region(path, region, &[]);
	}

	let encoded = encode(tag, write_options)?;
	rewrite_region(path, region, &encoded)
}

pub(super) fn remove_from_path(path: &Path) -> Result<()> {
	let (exists, region) = tag_region(path)?;
	if !exists {
		log::debug!("ID3v1: No tag to remove from `{}`", path.display());
		return Ok(());
	}

	rewrite_region(path, region, &[])
}

pub(super) fn encode(tag: &Id3v1Tag, write_options: WriteOptions) -> Result<Vec<u8>> {
	fn resize_string(value: Option<&str>, size: usize, write_options: WriteOptions) -> Result<Vec<u8>> {
		let mut out = match value {
			Some(val) => latin1_encode(val, write_options.lossy_text_encoding)?,
			None => Vec::new(),
		};

		out.resize(size, 0);
		Ok(out)
	}

	let mut writer = Vec::with_capacity(128);

	writer.write_all(&ID3V1_TAG_MARKER)?;

	for field in [Id3v1Field::Title, Id3v1Field::Artist, Id3v1Field::Album] {
		let text = resize_string(tag.field(field), 30, write_options)?;
		writer.write_all(&text)?;
	}

	let mut year = [0; 4];
	if let Some(year_num) = tag.year_number() {
		let mut year_num = std::cmp::min(year_num, 9999);

		for digit in year.iter_mut().rev() {
			*digit = b'0' + (year_num % 10) as u8;
			year_num /= 10;
		}
	}

	writer.write_all(&year)?;

	// ID3v1.1 gives up the last two bytes of the comment for the track number
	match tag.track_number_value() {
		Some(track) => {
			let comment = resize_string(tag.field(Id3v1Field::Comment), 28, write_options)?;
			writer.write_all(&comment)?;
			writer.write_u8(0)?;
			writer.write_u8(track)?;
		},
		None => {
			let comment = resize_string(tag.field(Id3v1Field::Comment), 30, write_options)?;
			writer.write_all(&comment)?;
		},
	}

	writer.write_u8(tag.genre_index().unwrap_or(255))?;

	Ok(writer)
}
