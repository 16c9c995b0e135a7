use super::header::{ChannelMode, Header, Layer, MpegVersion, VbrHeader, VbrHeaderType};
use crate::properties::{FileProperties, StreamInfo};
use crate::util::math::RoundedDivision;

use std::time::Duration;

/// An MPEG file's audio properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct MpegProperties {
	pub(crate) version: MpegVersion,
	pub(crate) layer: Layer,
	pub(crate) duration: Duration,
	pub(crate) overall_bitrate: u32,
	pub(crate) audio_bitrate: u32,
	pub(crate) sample_rate: u32,
	pub(crate) channels: u8,
	pub(crate) channel_mode: ChannelMode,
}

impl From<MpegProperties> for FileProperties {
	fn from(input: MpegProperties) -> Self {
		Self {
			duration: input.duration,
			overall_bitrate: Some(input.overall_bitrate),
			audio_bitrate: Some(input.audio_bitrate),
			sample_rate: Some(input.sample_rate),
			bit_depth: None,
			channels: Some(input.channels),
		}
	}
}

impl StreamInfo for MpegProperties {
	fn properties(&self) -> FileProperties {
		(*self).into()
	}

	fn pretty_print(&self) -> String {
		format!(
			"MPEG {} layer {}, {} kbps, {} Hz, {} channels, {:.2} seconds",
			self.version,
			self.layer,
			self.audio_bitrate,
			self.sample_rate,
			self.channels,
			self.duration.as_secs_f64()
		)
	}
}

impl MpegProperties {
	/// Duration of the audio
	pub fn duration(&self) -> Duration {
		self.duration
	}

	/// Overall bitrate (kbps)
	pub fn overall_bitrate(&self) -> u32 {
		self.overall_bitrate
	}

	/// Audio bitrate (kbps)
	pub fn audio_bitrate(&self) -> u32 {
		self.audio_bitrate
	}

	/// Sample rate (Hz)
	pub fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	/// Channel count
	pub fn channels(&self) -> u8 {
		self.channels
	}

	/// MPEG version
	pub fn version(&self) -> MpegVersion {
		self.version
	}

	/// MPEG layer
	pub fn layer(&self) -> Layer {
		self.layer
	}

	/// MPEG channel mode
	pub fn channel_mode(&self) -> ChannelMode {
		self.channel_mode
	}
}

/// Computes the properties from the first frame
///
/// `stream_len` is the number of bytes from the first frame to the end of the audio.
pub(super) fn read_properties(
	first_frame_header: Header,
	stream_len: u64,
	vbr_header: Option<VbrHeader>,
	file_length: u64,
) -> MpegProperties {
	let mut properties = MpegProperties {
		version: first_frame_header.version,
		layer: first_frame_header.layer,
		sample_rate: first_frame_header.sample_rate,
		channel_mode: first_frame_header.channel_mode,
		channels: if first_frame_header.channel_mode == ChannelMode::SingleChannel {
			1
		} else {
			2
		},
		..MpegProperties::default()
	};

	if let Some(vbr_header) = vbr_header.filter(VbrHeader::is_valid) {
		log::debug!("MPEG: Valid VBR header; using it to calculate duration");

		let sample_rate = u64::from(first_frame_header.sample_rate);
		let samples_per_frame = u64::from(first_frame_header.samples);
		let total_frames = u64::from(vbr_header.frames);

		let length = (samples_per_frame * 1000 * total_frames).div_round(sample_rate);
		if length > 0 {
			properties.duration = Duration::from_millis(length);
			properties.overall_bitrate = ((file_length * 8) / length) as u32;
			properties.audio_bitrate = ((u64::from(vbr_header.size) * 8) / length) as u32;
		}

		return properties;
	}

	log::debug!("MPEG: Using bitrate to estimate duration");

	// "Info" headers mark a CBR stream, and without any header we can only assume one
	if let Some(VbrHeaderType::Xing | VbrHeaderType::Vbri) = vbr_header.map(|h| h.ty) {
		log::warn!("MPEG: VBR header is unusable, estimating from the first frame's bitrate");
	}

	properties.audio_bitrate = first_frame_header.bitrate;

	let length = (stream_len * 8).div_round(u64::from(properties.audio_bitrate));
	if length > 0 {
		properties.overall_bitrate = ((file_length * 8) / length) as u32;
		properties.duration = Duration::from_millis(length);
	}

	properties
}
