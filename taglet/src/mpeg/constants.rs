// Bitrates in kbps, indexed by [version][layer][bitrate index]
//
// MPEG 2 and 2.5 share a table
pub(super) const BITRATES: [[[u32; 16]; 3]; 2] = [
	[
		[0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0],
		[0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384, 0],
		[0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0],
	],
	[
		[0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0],
		[0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
		[0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
	],
];

// Indexed by [MpegVersion][sample rate index]
pub(super) const SAMPLE_RATES: [[u32; 3]; 3] = [
	[44100, 48000, 32000],
	[22050, 24000, 16000],
	[11025, 12000, 8000],
];

// Samples per frame, indexed by [layer][version]
pub(super) const SAMPLES: [[u16; 2]; 3] = [[384, 384], [1152, 1152], [1152, 576]];

// Size of the side information following the frame header, indexed by [version][ChannelMode]
pub(super) const SIDE_INFORMATION_SIZES: [[u32; 4]; 2] = [[32, 32, 32, 17], [17, 17, 17, 9]];

// Layer 1 pads with a 4 byte slot
pub(super) const PADDING_SIZES: [u8; 3] = [4, 1, 1];
