use super::constants::{GENRES, ID3V1_TAG_MARKER};
use super::tag::{Id3v1Field, Id3v1Tag};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::{decode_err, err};
use crate::util::text::latin1_decode;

impl Id3v1Tag {
	/// Parse an ID3v1 tag from its 128 bytes
	///
	/// # Errors
	///
	/// * `block` doesn't start with `"TAG"`
	/// * [`ParsingMode::Strict`]: the year isn't made of 4 ASCII digits
	pub fn parse(block: [u8; 128], parse_mode: ParsingMode) -> Result<Self> {
		if block[..3] != ID3V1_TAG_MARKER {
			decode_err!(@BAIL "ID3v1 tag is missing its \"TAG\" marker");
		}

		let mut tag = Self::default();
		let block = &block[3..];

		let text_fields = [
			(Id3v1Field::Title, &block[..30]),
			(Id3v1Field::Artist, &block[30..60]),
			(Id3v1Field::Album, &block[60..90]),
		];
		for (field, data) in text_fields {
			if let Some(text) = decode_text(data) {
				tag.set_field_unchecked(field, text);
			}
		}

		if let Some(year) = try_parse_year(&block[90..94], parse_mode)? {
			tag.set_field_unchecked(Id3v1Field::Year, year.to_string());
		}

		// Determine the range of the comment (30 bytes for ID3v1 and 28 for ID3v1.1)
		// We check for the null terminator 28 bytes in, and for a non-zero track number after it.
		// A track number of 0 is invalid.
		let range = if block[122] == 0 && block[123] != 0 {
			tag.set_field_unchecked(Id3v1Field::Track, block[123].to_string());

			94_usize..123
		} else {
			94..124
		};

		if let Some(comment) = decode_text(&block[range]) {
			tag.set_field_unchecked(Id3v1Field::Comment, comment);
		}

		if let Some(genre) = GENRES.get(usize::from(block[124])) {
			tag.set_field_unchecked(Id3v1Field::Genre, (*genre).to_owned());
		}

		Ok(tag)
	}
}

fn decode_text(data: &[u8]) -> Option<String> {
	if let Some(null_pos) = data.iter().position(|&b| b == 0) {
		if data[null_pos..].iter().any(|b| *b != b'\0') {
			log::warn!("ID3v1 text field contains trailing junk, skipping");
		}
	}

	let text = latin1_decode(data);
	if text.is_empty() {
		return None;
	}

	Some(text)
}

fn try_parse_year(input: &[u8], parse_mode: ParsingMode) -> Result<Option<u16>> {
	let (num_digits, year) = input
		.iter()
		.take_while(|c| (**c).is_ascii_digit())
		.fold((0usize, 0u16), |(num_digits, year), c| {
			(num_digits + 1, year * 10 + u16::from(*c - b'0'))
		});
	if num_digits != 4 {
		// Most writers leave "\0\0\0\0" for an empty year, rather than "0000"
		if parse_mode == ParsingMode::Strict && input.iter().any(|b| *b != 0) {
			err!(TextDecode(
				"ID3v1 year field contains non-ASCII digit characters"
			));
		}

		return Ok(None);
	}

	Ok(Some(year))
}
