use super::ApeTag;
use super::item::{ApeItem, is_valid_key};
use crate::ape::constants::{APE_HEADER_LEN, APE_PREAMBLE};
use crate::ape::header::{ApeHeader, read_ape_header};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::find_id3v1;
use crate::macros::{decode_err, err, parse_mode_choice, try_vec};
use crate::tag::ItemValue;
use crate::util::io::SeekStreamLen;
use crate::util::text::utf8_decode;

use std::io::{Read, Seek, SeekFrom};
use std::ops::Range;

use byteorder::{LittleEndian, ReadBytesExt};

/// Locates an APE tag at the end of the stream, optionally followed by an ID3v1 tag
///
/// Returns the tag's header and its full extent. Without a tag, the range is the empty
/// position a new tag would be written to.
pub(crate) fn locate_ape_tag<R>(reader: &mut R) -> Result<(Option<ApeHeader>, Range<u64>)>
where
	R: Read + Seek + ?Sized,
{
	let len = reader.stream_len_hack()?;
	let end = find_id3v1(reader)?.unwrap_or(len);

	if end < u64::from(APE_HEADER_LEN) {
		return Ok((None, end..end));
	}

	// Search for an APE tag footer
	//
	// Starts with ['A', 'P', 'E', 'T', 'A', 'G', 'E', 'X']
	// Exactly 32 bytes long
	reader.seek(SeekFrom::Start(end - u64::from(APE_HEADER_LEN)))?;

	let mut ape_preamble = [0; 8];
	reader.read_exact(&mut ape_preamble)?;

	if &ape_preamble != APE_PREAMBLE {
		return Ok((None, end..end));
	}

	let header = read_ape_header(reader)?;

	let Some(start) = end.checked_sub(header.tag_len()) else {
		decode_err!(@BAIL Ape, "APE tag has an invalid size (> file size)");
	};

	log::debug!(
		"APE: Found a tag with {} items at offset {start}",
		header.item_count
	);

	Ok((Some(header), start..end))
}

/// Reads the tag found by [`locate_ape_tag`]
pub(crate) fn read_ape_tag<R>(
	reader: &mut R,
	parse_options: ParseOptions,
) -> Result<Option<(ApeTag, Range<u64>)>>
where
	R: Read + Seek + ?Sized,
{
	let (Some(header), region) = locate_ape_tag(reader)? else {
		return Ok(None);
	};

	let tag = read_ape_tag_with_header(reader, header, region.end, parse_options)?;
	Ok(Some((tag, region)))
}

pub(crate) fn read_ape_tag_with_header<R>(
	reader: &mut R,
	header: ApeHeader,
	tag_end: u64,
	parse_options: ParseOptions,
) -> Result<ApeTag>
where
	R: Read + Seek + ?Sized,
{
	let parse_mode = parse_options.parsing_mode;

	reader.seek(SeekFrom::Start(tag_end - u64::from(header.size)))?;

	let mut body = try_vec![0; header.items_len() as usize];
	reader.read_exact(&mut body)?;

	let mut tag = ApeTag {
		read_only: header.read_only(),
		items: Vec::new(),
	};

	let mut data = &body[..];
	for _ in 0..header.item_count {
		// Value size (4), flags (4), and at least a 2 character key with its terminator
		if data.len() < 11 {
			log::warn!("APE: Tag ended before all of its items were read");
			break;
		}

		let value_size = data.read_u32::<LittleEndian>()? as usize;
		let flags = data.read_u32::<LittleEndian>()?;

		let Some(key_len) = data.iter().position(|&b| b == 0) else {
			decode_err!(@BAIL Ape, "APE tag item has an unterminated key");
		};

		let key = &data[..key_len];
		data = &data[key_len + 1..];

		if value_size > data.len() {
			err!(SizeMismatch);
		}

		let (value, rest) = data.split_at(value_size);
		data = rest;

		let key = match std::str::from_utf8(key) {
			Ok(key) if is_valid_key(key) => key,
			_ => {
				parse_mode_choice!(
					parse_mode,
					STRICT: decode_err!(@BAIL Ape, "APE tag item contains an illegal key"),
					DEFAULT: {
						log::warn!(
							"APE: Skipping item with invalid key '{}'",
							String::from_utf8_lossy(key)
						);
						continue;
					}
				)
			},
		};

		let read_only = (flags & 1) == 1;
		let item_type = (flags >> 1) & 3;

		let parsed_value = match item_type {
			0 | 2 => {
				let Some(values) = decode_values(value) else {
					parse_mode_choice!(
						parse_mode,
						RELAXED: {
							log::warn!("APE: Skipping item '{key}', its value is not valid UTF-8");
							continue;
						},
						DEFAULT: decode_err!(@BAIL Ape, "Failed to convert text item into a UTF-8 string")
					)
				};

				if item_type == 0 {
					ItemValue::Text(values)
				} else {
					ItemValue::Locator(values)
				}
			},
			1 => ItemValue::Binary(value.to_vec()),
			_ => decode_err!(@BAIL Ape, "APE tag item contains an invalid item type"),
		};

		let mut item = ApeItem::new(key.to_owned(), parsed_value)?;
		item.read_only = read_only;

		tag.insert_item(item);
	}

	Ok(tag)
}

fn decode_values(value: &[u8]) -> Option<Vec<String>> {
	let text = utf8_decode(value.to_vec()).ok()?;
	Some(text.split('\0').map(str::to_owned).collect())
}
