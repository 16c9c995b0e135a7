use super::header::{Header, HeaderCmpResult, VbrHeader, cmp_header, search_for_frame_sync};
use super::MpegFile;
use crate::ape::tag::read::locate_ape_tag;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v1::Id3v1Tag;
use crate::id3::{find_id3v1, skip_id3v2};
use crate::macros::decode_err;
use crate::util::io::SeekStreamLen;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

pub(super) fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<MpegFile>
where
	R: Read + Seek,
{
	let mut file = MpegFile::default();

	// Tags are sometimes stacked, none of them are of any use to us
	while skip_id3v2(reader)?.is_some() {}

	let first_frame = find_next_frame(reader, parse_options.max_junk_bytes as u64)?;

	if let Some(id3v1_start) = find_id3v1(reader)? {
		if parse_options.read_tags {
			let mut block = [0; 128];
			reader.seek(SeekFrom::Start(id3v1_start))?;
			reader.read_exact(&mut block)?;

			file.id3v1_tag = Some(Id3v1Tag::parse(block, parse_options.parsing_mode)?);
		}
	}

	// An APE tag may sit between the audio and the ID3v1 tag
	let (_, tag_region) = locate_ape_tag(reader)?;
	let audio_end = tag_region.start;

	if !parse_options.read_properties {
		return Ok(file);
	}

	let Some((first_frame_header, first_frame_offset)) = first_frame else {
		// The search for sync bits was unsuccessful
		decode_err!(@BAIL Mpeg, "File contains an invalid frame");
	};

	// Try to read a Xing header
	let xing_header_location = first_frame_offset + u64::from(first_frame_header.data_start);
	reader.seek(SeekFrom::Start(xing_header_location))?;

	let mut xing_reader = Vec::with_capacity(32);
	reader.by_ref().take(32).read_to_end(&mut xing_reader)?;

	let xing_header = VbrHeader::read(&mut &xing_reader[..])?;

	let file_length = reader.stream_len_hack()?;

	file.properties = super::properties::read_properties(
		first_frame_header,
		audio_end.saturating_sub(first_frame_offset),
		xing_header,
		file_length,
	);

	Ok(file)
}

// Searches for the next frame within `max_junk_bytes` of the current position, comparing it
// to the following one
fn find_next_frame<R>(reader: &mut R, max_junk_bytes: u64) -> Result<Option<(Header, u64)>>
where
	R: Read + Seek,
{
	let search_start = reader.stream_position()?;
	// Includes the 2 bytes of the frame sync itself
	let search_end = search_start + max_junk_bytes + 2;

	let mut pos = search_start;
	while pos < search_end {
		let Some(relative_start) =
			search_for_frame_sync(&mut reader.by_ref().take(search_end - pos))?
		else {
			break;
		};

		let frame_start = pos + relative_start;

		// Seek back to the start of the frame and read the header
		reader.seek(SeekFrom::Start(frame_start))?;
		let Ok(header_data) = reader.read_u32::<BigEndian>() else {
			break;
		};

		if let Some(header) = Header::read(header_data) {
			match cmp_header(reader, header.len, header_data) {
				HeaderCmpResult::Equal => return Ok(Some((header, frame_start))),
				// A lone frame at the end of the stream
				HeaderCmpResult::Undetermined => {
					log::debug!("MPEG: Unable to verify the frame at {frame_start}, accepting it");
					return Ok(Some((header, frame_start)));
				},
				HeaderCmpResult::NotEqual => {},
			}
		}

		// Continue right after this sync
		pos = frame_start + 1;
		reader.seek(SeekFrom::Start(pos))?;
	}

	log::debug!("MPEG: No frame found within {max_junk_bytes} bytes of {search_start}");
	Ok(None)
}
