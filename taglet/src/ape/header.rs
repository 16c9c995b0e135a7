use super::constants::{APE_HEADER_LEN, FLAG_HAS_HEADER, FLAG_READ_ONLY};
use crate::error::Result;
use crate::macros::decode_err;

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

#[derive(Copy, Clone, Debug)]
pub(crate) struct ApeHeader {
	pub(crate) version: u32,
	/// Size of the items and the footer, but not the header
	pub(crate) size: u32,
	pub(crate) item_count: u32,
	pub(crate) flags: u32,
}

impl ApeHeader {
	/// The size of the whole tag, including the header if there is one
	pub(crate) fn tag_len(&self) -> u64 {
		let mut len = u64::from(self.size);

		// Version 1 doesn't include a header
		if self.version >= 2000 && self.flags & FLAG_HAS_HEADER != 0 {
			len += u64::from(APE_HEADER_LEN);
		}

		len
	}

	/// The size of the items alone
	pub(crate) fn items_len(&self) -> u32 {
		self.size - APE_HEADER_LEN
	}

	pub(crate) fn read_only(&self) -> bool {
		self.flags & FLAG_READ_ONLY != 0
	}
}

/// Reads the remaining 24 bytes of a header or footer, following the preamble
pub(crate) fn read_ape_header<R>(data: &mut R) -> Result<ApeHeader>
where
	R: Read + ?Sized,
{
	let version = data.read_u32::<LittleEndian>()?;
	let size = data.read_u32::<LittleEndian>()?;

	if size < APE_HEADER_LEN {
		// If the size is < 32, something went wrong during encoding
		// The size includes the footer and all items
		decode_err!(@BAIL Ape, "APE tag has an invalid size (< 32)");
	}

	let item_count = data.read_u32::<LittleEndian>()?;
	let flags = data.read_u32::<LittleEndian>()?;

	// Reserved (8)
	let _reserved = data.read_u64::<LittleEndian>()?;

	Ok(ApeHeader {
		version,
		size,
		item_count,
		flags,
	})
}
