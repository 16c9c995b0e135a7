use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::decode_err;
use crate::properties::{FileProperties, StreamInfo};
use crate::util::math::RoundedDivision;

use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};

/// An APE file's audio properties
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct ApeProperties {
	pub(crate) version: u16,
	pub(crate) duration: Duration,
	pub(crate) overall_bitrate: u32,
	pub(crate) audio_bitrate: u32,
	pub(crate) sample_rate: u32,
	pub(crate) bit_depth: u8,
	pub(crate) channels: u8,
}

impl From<ApeProperties> for FileProperties {
	fn from(input: ApeProperties) -> Self {
		Self {
			duration: input.duration,
			overall_bitrate: Some(input.overall_bitrate),
			audio_bitrate: Some(input.audio_bitrate),
			sample_rate: Some(input.sample_rate),
			bit_depth: Some(input.bit_depth),
			channels: Some(input.channels),
		}
	}
}

impl StreamInfo for ApeProperties {
	fn properties(&self) -> FileProperties {
		self.clone().into()
	}

	fn pretty_print(&self) -> String {
		format!(
			"Monkey's Audio {:.2}, {} kbps, {} Hz, {:.2} seconds",
			f64::from(self.version) / 1000.0,
			self.audio_bitrate,
			self.sample_rate,
			self.duration.as_secs_f64()
		)
	}
}

impl ApeProperties {
	/// Duration of the audio
	pub fn duration(&self) -> Duration {
		self.duration
	}

	/// Overall bitrate (kbps)
	pub fn overall_bitrate(&self) -> u32 {
		self.overall_bitrate
	}

	/// Audio bitrate (kbps)
	pub fn bitrate(&self) -> u32 {
		self.audio_bitrate
	}

	/// Sample rate (Hz)
	pub fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	/// Bits per sample
	pub fn bit_depth(&self) -> u8 {
		self.bit_depth
	}

	/// Channel count
	pub fn channels(&self) -> u8 {
		self.channels
	}

	/// APE version
	pub fn version(&self) -> u16 {
		self.version
	}
}

/// The parts of a Monkey's Audio header that describe the stream
#[derive(Debug, Default)]
struct StreamHeader {
	blocks_per_frame: u32,
	final_frame_blocks: u32,
	total_frames: u32,
	bit_depth: u8,
	channels: u8,
	sample_rate: u32,
}

impl StreamHeader {
	// Version 3980 and up: a descriptor followed by the header
	fn read_with_descriptor<R>(data: &mut R) -> Result<Self>
	where
		R: Read + Seek + ?Sized,
	{
		let mut descriptor = [0; 46];
		data.read_exact(&mut descriptor).map_err(|_| {
			decode_err!(
				Ape,
				"Not enough data left in reader to finish file descriptor"
			)
		})?;

		// The descriptor length counts the magic and version as well. Newer encoders may
		// append fields we don't know about.
		let descriptor_len = LittleEndian::read_u32(&descriptor[2..6]);
		if let Some(unknown) = descriptor_len.checked_sub(52).filter(|len| *len > 0) {
			data.seek(SeekFrom::Current(i64::from(unknown)))?;
		}

		let mut header = [0; 24];
		data.read_exact(&mut header)
			.map_err(|_| decode_err!(Ape, "Not enough data left in reader to finish MAC header"))?;

		// Compression level (2) and format flags (2) are unused
		Ok(Self {
			blocks_per_frame: LittleEndian::read_u32(&header[4..8]),
			final_frame_blocks: LittleEndian::read_u32(&header[8..12]),
			total_frames: LittleEndian::read_u32(&header[12..16]),
			bit_depth: LittleEndian::read_u16(&header[16..18]) as u8,
			channels: LittleEndian::read_u16(&header[18..20]) as u8,
			sample_rate: LittleEndian::read_u32(&header[20..24]),
		})
	}

	// Older versions have no descriptor, and the frame size depends on the version
	fn read_legacy<R>(data: &mut R, version: u16) -> Result<Self>
	where
		R: Read + ?Sized,
	{
		let mut header = [0; 26];
		data.read_exact(&mut header)
			.map_err(|_| decode_err!(Ape, "Not enough data left in reader to finish MAC header"))?;

		let compression_level = LittleEndian::read_u16(&header[0..2]);
		let format_flags = LittleEndian::read_u16(&header[2..4]);

		let bit_depth = if format_flags & 0b0001 != 0 {
			8
		} else if format_flags & 0b1000 != 0 {
			24
		} else {
			16
		};

		let blocks_per_frame = if version >= 3950 {
			73728 * 4
		} else if version >= 3900 || (version >= 3800 && compression_level >= 4000) {
			73728
		} else {
			9216
		};

		// Bytes 10..18 hold the WAV header and tail lengths
		Ok(Self {
			blocks_per_frame,
			final_frame_blocks: LittleEndian::read_u32(&header[22..26]),
			total_frames: LittleEndian::read_u32(&header[18..22]),
			bit_depth,
			channels: LittleEndian::read_u16(&header[4..6]) as u8,
			sample_rate: LittleEndian::read_u32(&header[6..10]),
		})
	}

	fn verify(&self) -> Result<()> {
		if !(1..=32).contains(&self.channels) {
			decode_err!(@BAIL Ape, "File has an invalid channel count (must be between 1 and 32 inclusive)");
		}

		if self.total_frames == 0 {
			decode_err!(@BAIL Ape, "File contains no frames");
		}

		Ok(())
	}

	// Every frame but the last is full
	fn total_samples(&self) -> u64 {
		u64::from(self.blocks_per_frame) * u64::from(self.total_frames.saturating_sub(1))
			+ u64::from(self.final_frame_blocks)
	}
}

pub(super) fn read_properties<R>(
	data: &mut R,
	stream_len: u64,
	file_length: u64,
	parse_mode: ParsingMode,
) -> Result<ApeProperties>
where
	R: Read + Seek + ?Sized,
{
	let version = data
		.read_u16::<LittleEndian>()
		.map_err(|_| decode_err!(Ape, "Unable to read APE version"))?;

	log::debug!("APE: Reading properties for version {version}");

	let header = if version >= 3980 {
		StreamHeader::read_with_descriptor(data)?
	} else {
		StreamHeader::read_legacy(data, version)?
	};

	let mut properties = ApeProperties {
		version,
		bit_depth: header.bit_depth,
		channels: header.channels,
		sample_rate: header.sample_rate,
		..ApeProperties::default()
	};

	if let Err(e) = header.verify() {
		if parse_mode == ParsingMode::Strict {
			return Err(e);
		}

		log::warn!("APE: {e}, unable to determine the duration");
		return Ok(properties);
	}

	let total_samples = header.total_samples();
	if properties.sample_rate == 0 || total_samples == 0 {
		return Ok(properties);
	}

	let duration_ms = (total_samples * 1000).div_round(u64::from(properties.sample_rate));
	properties.duration = Duration::from_millis(duration_ms);

	if duration_ms > 0 {
		properties.audio_bitrate = (stream_len * 8).div_round(duration_ms) as u32;
		properties.overall_bitrate = (file_length * 8).div_round(duration_ms) as u32;
	}

	Ok(properties)
}
