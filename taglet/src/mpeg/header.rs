use super::constants::{BITRATES, PADDING_SIZES, SAMPLE_RATES, SAMPLES, SIDE_INFORMATION_SIZES};
use crate::error::Result;
use crate::macros::decode_err;

use std::fmt::{Display, Formatter};
use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

pub(crate) fn verify_frame_sync(frame_sync: [u8; 2]) -> bool {
	frame_sync[0] == 0xFF && frame_sync[1] >> 5 == 0b111
}

// Searches for a frame sync (11 set bits) in the reader.
// The search starts at the beginning of the reader and returns the index relative to this beginning.
// This will return the first match, if one is found.
//
// Note that the search searches in 8 bit steps, i.e. the first 8 bits need to be byte aligned.
pub(crate) fn search_for_frame_sync<R>(input: &mut R) -> std::io::Result<Option<u64>>
where
	R: Read,
{
	let mut iterator = input.bytes();
	let mut buffer = [0u8; 2];
	// The first iteration needs buffer[0] to already be set
	if let Some(byte) = iterator.next() {
		buffer[0] = byte?;
	}

	// Walk overlapping 2 byte pairs:
	// [0x01, 0x02, 0x03] is checked as [0x01, 0x02], [0x02, 0x03]
	for (index, byte) in iterator.enumerate() {
		buffer[1] = byte?;
		if verify_frame_sync(buffer) {
			return Ok(Some(index as u64));
		}

		buffer[0] = buffer[1];
	}

	Ok(None)
}

/// See [`cmp_header()`].
pub(crate) enum HeaderCmpResult {
	Equal,
	Undetermined,
	NotEqual,
}

// Used to compare the versions, layers, and sample rates of two frame headers.
// If they aren't equal, something is broken.
pub(super) const HEADER_MASK: u32 = 0xFFFE_0C00;

/// Compares the frame header at the current position with the one `first_header_len` bytes
/// after its start
///
/// The reader is left right after the first header.
///
/// ## Returns
///
/// - [`HeaderCmpResult::Equal`] if the versions, layers, and sample rates match.
/// - [`HeaderCmpResult::NotEqual`] if they don't.
/// - [`HeaderCmpResult::Undetermined`] if there is no second header to read.
pub(crate) fn cmp_header<R>(
	reader: &mut R,
	first_header_len: u32,
	first_header_bytes: u32,
) -> HeaderCmpResult
where
	R: Read + Seek,
{
	let Ok(pos) = reader.stream_position() else {
		return HeaderCmpResult::Undetermined;
	};

	// The first header (4 bytes) was already read
	let skip = i64::from(first_header_len.saturating_sub(4));
	if reader.seek(SeekFrom::Current(skip)).is_err() {
		return HeaderCmpResult::Undetermined;
	}

	let second_header_data = reader.read_u32::<BigEndian>();

	if reader.seek(SeekFrom::Start(pos)).is_err() {
		return HeaderCmpResult::Undetermined;
	}

	match second_header_data {
		Ok(second) if first_header_bytes & HEADER_MASK == second & HEADER_MASK => {
			HeaderCmpResult::Equal
		},
		Ok(_) => HeaderCmpResult::NotEqual,
		Err(_) => HeaderCmpResult::Undetermined,
	}
}

/// MPEG Audio version
#[derive(Default, PartialEq, Eq, Copy, Clone, Debug)]
#[allow(missing_docs)]
pub enum MpegVersion {
	#[default]
	V1,
	V2,
	V2_5,
}

impl Display for MpegVersion {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			MpegVersion::V1 => f.write_str("1"),
			MpegVersion::V2 => f.write_str("2"),
			MpegVersion::V2_5 => f.write_str("2.5"),
		}
	}
}

/// MPEG layer
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Layer {
	Layer1 = 1,
	Layer2 = 2,
	#[default]
	Layer3 = 3,
}

impl Display for Layer {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", *self as u8)
	}
}

/// Channel mode
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum ChannelMode {
	#[default]
	Stereo = 0,
	JointStereo = 1,
	/// Two independent mono channels
	DualChannel = 2,
	SingleChannel = 3,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Header {
	pub(crate) sample_rate: u32,
	/// Length of the whole frame, header included
	pub(crate) len: u32,
	/// Offset of the frame data from the start of the frame
	pub(crate) data_start: u32,
	pub(crate) samples: u16,
	pub(crate) bitrate: u32,
	pub(crate) version: MpegVersion,
	pub(crate) layer: Layer,
	pub(crate) channel_mode: ChannelMode,
}

impl Header {
	pub(crate) fn read(data: u32) -> Option<Self> {
		if data >> 21 != 0x7FF {
			return None;
		}

		let version = match (data >> 19) & 0b11 {
			0b00 => MpegVersion::V2_5,
			0b10 => MpegVersion::V2,
			0b11 => MpegVersion::V1,
			_ => return None,
		};

		let version_index = usize::from(version != MpegVersion::V1);

		let layer = match (data >> 17) & 0b11 {
			0b01 => Layer::Layer3,
			0b10 => Layer::Layer2,
			0b11 => Layer::Layer1,
			_ => {
				log::debug!("MPEG: Frame header uses a reserved layer");
				return None;
			},
		};

		let layer_index = (layer as usize) - 1;

		let bitrate = BITRATES[version_index][layer_index][((data >> 12) & 0xF) as usize];
		// Free format and invalid bitrates can't be used for anything
		if bitrate == 0 {
			return None;
		}

		let sample_rate = match (data >> 10) & 0b11 {
			0b11 => return None,
			index => SAMPLE_RATES[version as usize][index as usize],
		};

		let padding = if (data >> 9) & 1 == 1 {
			u32::from(PADDING_SIZES[layer_index])
		} else {
			0
		};

		let channel_mode = match (data >> 6) & 0b11 {
			0b00 => ChannelMode::Stereo,
			0b01 => ChannelMode::JointStereo,
			0b10 => ChannelMode::DualChannel,
			_ => ChannelMode::SingleChannel,
		};

		let samples = SAMPLES[layer_index][version_index];

		Some(Header {
			sample_rate,
			len: (u32::from(samples) * bitrate * 125 / sample_rate) + padding,
			data_start: SIDE_INFORMATION_SIZES[version_index][channel_mode as usize] + 4,
			samples,
			bitrate,
			version,
			layer,
			channel_mode,
		})
	}

	/// Whether `header` starts with a valid frame header
	pub(crate) fn is_frame_start(header: &[u8]) -> bool {
		match header {
			[a, b, c, d, ..] => Self::read(u32::from_be_bytes([*a, *b, *c, *d])).is_some(),
			_ => false,
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum VbrHeaderType {
	Xing,
	Info,
	Vbri,
}

#[derive(Copy, Clone, Debug)]
pub(super) struct VbrHeader {
	pub ty: VbrHeaderType,
	pub frames: u32,
	pub size: u32,
}

impl VbrHeader {
	pub(super) fn read(reader: &mut &[u8]) -> Result<Option<Self>> {
		let reader_len = reader.len();
		if reader_len < 4 {
			return Ok(None);
		}

		let mut header = [0; 4];
		reader.read_exact(&mut header)?;

		let ty = match &header {
			b"Xing" => VbrHeaderType::Xing,
			b"Info" => VbrHeaderType::Info,
			b"VBRI" => VbrHeaderType::Vbri,
			_ => return Ok(None),
		};

		if ty == VbrHeaderType::Vbri {
			if reader_len < 32 {
				decode_err!(@BAIL Mpeg, "VBRI header has an invalid size (< 32)");
			}

			// Skip 6 bytes
			// Version ID (2)
			// Delay float (2)
			// Quality indicator (2)
			let _info = reader.read_uint::<BigEndian>(6)?;

			let size = reader.read_u32::<BigEndian>()?;
			let frames = reader.read_u32::<BigEndian>()?;

			return Ok(Some(Self { ty, frames, size }));
		}

		if reader_len < 16 {
			decode_err!(@BAIL Mpeg, "Xing header has an invalid size (< 16)");
		}

		let flags = reader.read_u32::<BigEndian>()?;
		if flags & 0x03 != 0x03 {
			log::debug!("MPEG: Xing header doesn't have required flags set (0x0001 and 0x0002)");
			return Ok(None);
		}

		let frames = reader.read_u32::<BigEndian>()?;
		let size = reader.read_u32::<BigEndian>()?;

		Ok(Some(Self { ty, frames, size }))
	}

	pub(super) fn is_valid(&self) -> bool {
		self.frames > 0 && self.size > 0
	}
}
