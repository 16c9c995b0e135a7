use super::ApeTag;
use super::item::ApeItem;
use super::read::{locate_ape_tag, read_ape_tag_with_header};
use crate::ape::constants::{
	APE_HEADER_LEN, APE_PREAMBLE, FLAG_HAS_FOOTER, FLAG_HAS_HEADER, FLAG_IS_HEADER,
	FLAG_READ_ONLY,
};
use crate::config::{ParseOptions, WriteOptions};
use crate::error::Result;
use crate::macros::{encode_err, err};
use crate::tag::ItemValue;
use crate::util::io::rewrite_region;

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

pub(super) fn write_to_path(tag: &ApeTag, path: &Path, write_options: WriteOptions) -> Result<()> {
	let mut reader = BufReader::new(File::open(path)?);
	let (header, region) = locate_ape_tag(&mut reader)?;

	// We have to check the existing tag for any read only items first
	let mut read_only = Vec::new();
	if let (Some(header), true) = (header, write_options.respect_read_only) {
		let existing = read_ape_tag_with_header(&mut reader, header, region.end, ParseOptions::new())?;
		read_only.extend(existing.items.into_iter().filter(|i| i.read_only));
	}
	drop(reader);

	let mut items: Vec<&ApeItem> = tag
		.items
		.iter()
		.map(|item| match read_only.iter().find(|ro| ro.matches(&item.key)) {
			Some(ro) => {
				if ro.value != item.value {
					log::warn!("APE: Item '{}' is read only, keeping the existing value", ro.key);
				}
				ro
			},
			None => item,
		})
		.collect();

	for ro in &read_only {
		if tag.item(&ro.key).is_none() {
			log::warn!("APE: Item '{}' is read only, it cannot be removed", ro.key);
			items.push(ro);
		}
	}

	let encoded = create_ape_tag(tag, items.into_iter())?;
	if encoded.is_empty() {
		log::debug!("APE: Tag is empty, nothing will be written");
	}

	rewrite_region(path, region, &encoded)
}

pub(super) fn remove_from_path(path: &Path) -> Result<()> {
	let mut reader = BufReader::new(File::open(path)?);
	let (header, region) = locate_ape_tag(&mut reader)?;
	drop(reader);

	if header.is_none() {
		log::debug!("APE: No tag to remove from `{}`", path.display());
		return Ok(());
	}

	rewrite_region(path, region, &[])
}

pub(super) fn create_ape_tag<'a, I>(tag: &ApeTag, items: I) -> Result<Vec<u8>>
where
	I: Iterator<Item = &'a ApeItem>,
{
	let mut peek = items.peekable();

	// Unnecessary to write anything if there's no metadata
	if peek.peek().is_none() {
		return Ok(Vec::<u8>::new());
	}

	let mut tag_write = Vec::<u8>::new();

	let mut item_count = 0_u32;

	for item in peek {
		let joined;
		let (mut flags, value) = match &item.value {
			ItemValue::Binary(value) => (1_u32 << 1, value.as_slice()),
			ItemValue::Text(values) => {
				joined = values.join("\0");
				(0_u32, joined.as_bytes())
			},
			ItemValue::Locator(values) => {
				joined = values.join("\0");
				(2_u32 << 1, joined.as_bytes())
			},
		};

		if item.read_only {
			flags |= FLAG_READ_ONLY;
		}

		let Ok(value_size) = u32::try_from(value.len()) else {
			err!(TooMuchData);
		};

		tag_write.write_u32::<LittleEndian>(value_size)?;
		tag_write.write_u32::<LittleEndian>(flags)?;
		tag_write.write_all(item.key.as_bytes())?;
		tag_write.write_u8(0)?;
		tag_write.write_all(value)?;

		item_count += 1;
	}

	let size = tag_write.len();

	if size as u64 + u64::from(APE_HEADER_LEN) > u64::from(u32::MAX) {
		encode_err!(@BAIL Ape, "APE tag is too large to be written");
	}

	let mut flags = FLAG_HAS_FOOTER | FLAG_HAS_HEADER;
	if tag.read_only {
		// Bit 0 set: tag is read only
		flags |= FLAG_READ_ONLY;
	}

	// The header is exactly the same as the footer, except for the flags
	let header = header_or_footer(size as u32, item_count, flags | FLAG_IS_HEADER)?;
	let footer = header_or_footer(size as u32, item_count, flags)?;

	let mut out = Vec::with_capacity(size + 2 * APE_HEADER_LEN as usize);
	out.extend_from_slice(&header);
	out.append(&mut tag_write);
	out.extend_from_slice(&footer);

	Ok(out)
}

fn header_or_footer(items_size: u32, item_count: u32, flags: u32) -> Result<Vec<u8>> {
	let mut out = Vec::with_capacity(APE_HEADER_LEN as usize);

	out.write_all(APE_PREAMBLE)?;
	// This is the APE tag version
	// Even if we read a v1 tag, we end up adding a header anyway
	out.write_u32::<LittleEndian>(2000)?;
	// The total size includes the 32 bytes of the footer
	out.write_u32::<LittleEndian>(items_size + APE_HEADER_LEN)?;
	out.write_u32::<LittleEndian>(item_count)?;
	out.write_u32::<LittleEndian>(flags)?;
	// The header/footer must end in 8 bytes of zeros
	out.write_u64::<LittleEndian>(0)?;

	Ok(out)
}
