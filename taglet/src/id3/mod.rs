//! ID3 specific items
//!
//! ID3v1 is a fully supported tag format. ID3v2 tags are only recognized so they can be
//! skipped over when looking for the audio stream.

pub mod v1;

use crate::error::Result;
use crate::util::io::SeekStreamLen;

use std::io::{Read, Seek, SeekFrom};

/// The size of an ID3v2 header, and of its optional footer
pub(crate) const ID3V2_HEADER_LEN: u64 = 10;

/// Decodes a 28-bit synchsafe integer, `None` if any byte has its high bit set
pub(crate) fn synchsafe_u32(bytes: [u8; 4]) -> Option<u32> {
	bytes.iter().try_fold(0_u32, |acc, &b| {
		if b & 0x80 == 0 {
			Some((acc << 7) | u32::from(b))
		} else {
			None
		}
	})
}

/// The full size of the ID3v2 tag described by `header`, including the header itself and any footer
pub(crate) fn id3v2_tag_len(header: &[u8]) -> Option<u64> {
	let [b'I', b'D', b'3', major, _minor, flags, s0, s1, s2, s3, ..] = *header else {
		return None;
	};

	if !(2..=4).contains(&major) {
		return None;
	}

	let size = synchsafe_u32([s0, s1, s2, s3])?;

	let mut len = ID3V2_HEADER_LEN + u64::from(size);
	// Footer present (v2.4 only)
	if major == 4 && flags & 0x10 == 0x10 {
		len += ID3V2_HEADER_LEN;
	}

	Some(len)
}

/// The bytes following the ID3v2 tag at the start of `header`
///
/// Without a tag, this is all of `header`. When the tag extends past the end of `header`, it is empty.
pub(crate) fn strip_id3v2(header: &[u8]) -> &[u8] {
	match id3v2_tag_len(header) {
		Some(tag_len) => usize::try_from(tag_len)
			.ok()
			.and_then(|tag_len| header.get(tag_len..))
			.unwrap_or_default(),
		None => header,
	}
}

/// Skips over an ID3v2 tag at the current position, returning its full size
///
/// If there is no tag, the reader is left where it was.
pub(crate) fn skip_id3v2<R>(data: &mut R) -> Result<Option<u64>>
where
	R: Read + Seek + ?Sized,
{
	let start = data.stream_position()?;

	let mut header = [0; ID3V2_HEADER_LEN as usize];
	let read = data.read(&mut header)?;

	let Some(tag_len) = id3v2_tag_len(&header[..read]) else {
		data.seek(SeekFrom::Start(start))?;
		return Ok(None);
	};

	log::debug!("Found an ID3v2 tag, skipping {tag_len} bytes");

	data.seek(SeekFrom::Start(start + tag_len))?;
	Ok(Some(tag_len))
}

/// The offset of an ID3v1 tag at the end of the stream, if there is one
pub(crate) fn find_id3v1<R>(data: &mut R) -> Result<Option<u64>>
where
	R: Read + Seek + ?Sized,
{
	log::debug!("Searching for an ID3v1 tag");

	let len = data.stream_len_hack()?;
	if len < 128 {
		return Ok(None);
	}

	let start = data.seek(SeekFrom::End(-128))?;

	let mut marker = [0; 3];
	data.read_exact(&mut marker)?;

	if marker != v1::ID3V1_TAG_MARKER {
		return Ok(None);
	}

	log::debug!("Found an ID3v1 tag at offset {start}");
	Ok(Some(start))
}

#[cfg(test)]
mod tests {
	use super::{find_id3v1, id3v2_tag_len, skip_id3v2, synchsafe_u32};

	use std::io::{Cursor, Seek};

	#[test_log::test]
	fn synchsafe() {
		assert_eq!(synchsafe_u32([0, 0, 0x02, 0x01]), Some(257));
		assert_eq!(synchsafe_u32([0x7F, 0x7F, 0x7F, 0x7F]), Some(0x0FFF_FFFF));
		assert_eq!(synchsafe_u32([0, 0, 0x80, 0]), None);
	}

	#[test_log::test]
	fn id3v2_lengths() {
		assert_eq!(id3v2_tag_len(b"ID3\x03\x00\x00\x00\x00\x00\x0A"), Some(20));
		// v2.4 with a footer
		assert_eq!(id3v2_tag_len(b"ID3\x04\x00\x10\x00\x00\x00\x0A"), Some(30));
		assert_eq!(id3v2_tag_len(b"ID3\x05\x00\x00\x00\x00\x00\x0A"), None);
		assert_eq!(id3v2_tag_len(b"ID3"), None);
	}

	#[test_log::test]
	fn skip_leaves_position_without_tag() {
		let mut reader = Cursor::new(b"MAC \x96\x0F".to_vec());
		assert_eq!(skip_id3v2(&mut reader).unwrap(), None);
		assert_eq!(reader.stream_position().unwrap(), 0);

		let mut data = b"ID3\x03\x00\x00\x00\x00\x00\x02".to_vec();
		data.extend_from_slice(b"\0\0MAC ");
		let mut reader = Cursor::new(data);
		assert_eq!(skip_id3v2(&mut reader).unwrap(), Some(12));
		assert_eq!(reader.stream_position().unwrap(), 12);
	}

	#[test_log::test]
	fn id3v1_location() {
		let mut data = vec![0xAA; 200];
		assert_eq!(find_id3v1(&mut Cursor::new(&data)).unwrap(), None);

		data[72..75].copy_from_slice(b"TAG");
		assert_eq!(find_id3v1(&mut Cursor::new(&data)).unwrap(), Some(72));

		assert_eq!(find_id3v1(&mut Cursor::new(b"TAG")).unwrap(), None);
	}
}
