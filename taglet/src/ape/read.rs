use super::tag::ApeTag;
use super::tag::read::{locate_ape_tag, read_ape_tag_with_header};
use super::{ApeFile, ApeProperties};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::skip_id3v2;
use crate::macros::{decode_err, err};

use std::io::{Read, Seek, SeekFrom};

pub(super) fn read_from<R>(data: &mut R, parse_options: ParseOptions) -> Result<ApeFile>
where
	R: Read + Seek,
{
	let start = data.stream_position()?;
	let end = data.seek(SeekFrom::End(0))?;

	data.seek(SeekFrom::Start(start))?;

	// ID3v2 tags are not allowed in APE files, but they show up anyway
	let mut audio_start = start;
	if let Some(id3v2_len) = skip_id3v2(data)? {
		log::warn!("APE: Encountered an ID3v2 tag, it will be ignored");
		audio_start += id3v2_len;
	}

	let mut header = [0; 4];
	data.read_exact(&mut header)
		.map_err(|_| decode_err!(Ape, "File too short to contain a MAC header"))?;

	if &header != b"MAC " {
		decode_err!(@BAIL Ape, "Invalid data found while reading header, expected \"MAC \"");
	}

	let mac_start = data.stream_position()?;

	// The APE tag sits at the end, possibly followed by an ID3v1 tag
	let (ape_header, region) = locate_ape_tag(data)?;

	let Some(stream_len) = region.start.checked_sub(audio_start) else {
		err!(SizeMismatch);
	};

	let mut ape_tag: Option<ApeTag> = None;
	if let Some(ape_header) = ape_header {
		if region.start < mac_start {
			decode_err!(@BAIL Ape, "APE tag overlaps the MAC header");
		}

		if parse_options.read_tags {
			ape_tag = Some(read_ape_tag_with_header(
				data,
				ape_header,
				region.end,
				parse_options,
			)?);
		}
	}

	// Go back to the MAC header to read properties
	data.seek(SeekFrom::Start(mac_start))?;

	Ok(ApeFile {
		ape_tag,
		properties: if parse_options.read_properties {
			super::properties::read_properties(
				data,
				stream_len,
				end - start,
				parse_options.parsing_mode,
			)?
		} else {
			ApeProperties::default()
		},
	})
}
