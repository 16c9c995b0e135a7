use taglet::ape::ApeTag;
use taglet::config::WriteOptions;
use taglet::tag::TagContainer;

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// MPEG 1 layer 3, 128 kbps, 44.1 kHz, joint stereo. Each frame is 417 bytes.
pub const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
pub const FRAME_LEN: usize = 417;

/// `count` back to back MPEG frames with silent payloads
pub fn mpeg_frames(count: usize) -> Vec<u8> {
	let mut frames = Vec::with_capacity(count * FRAME_LEN);
	for _ in 0..count {
		frames.extend_from_slice(&FRAME_HEADER);
		frames.resize(frames.len() + FRAME_LEN - 4, 0);
	}

	frames
}

/// An ID3v2.4 tag with a `body_len` byte zeroed body
pub fn id3v2(body_len: u32) -> Vec<u8> {
	let mut tag = b"ID3\x04\x00\x00".to_vec();
	for shift in [21, 14, 7, 0] {
		tag.push(((body_len >> shift) & 0x7F) as u8);
	}

	tag.resize(tag.len() + body_len as usize, 0);
	tag
}

/// A 128 byte ID3v1.1 block
pub fn id3v1(title: &str, artist: &str, track: u8) -> Vec<u8> {
	let mut block = vec![0; 128];
	block[..3].copy_from_slice(b"TAG");
	block[3..3 + title.len()].copy_from_slice(title.as_bytes());
	block[33..33 + artist.len()].copy_from_slice(artist.as_bytes());
	block[93..97].copy_from_slice(b"2024");
	block[126] = track;
	block[127] = 17;
	block
}

/// A Monkey's Audio 3.99 stream: one second of 44.1 kHz, 16 bit stereo, followed by `audio_len` bytes
pub fn ape_audio(audio_len: usize) -> Vec<u8> {
	let mut data = b"MAC ".to_vec();
	data.extend_from_slice(&3990_u16.to_le_bytes());

	let mut descriptor = [0_u8; 46];
	descriptor[2..6].copy_from_slice(&52_u32.to_le_bytes());
	data.extend_from_slice(&descriptor);

	data.extend_from_slice(&2000_u16.to_le_bytes()); // Compression level
	data.extend_from_slice(&0_u16.to_le_bytes()); // Format flags
	data.extend_from_slice(&44100_u32.to_le_bytes()); // Blocks per frame
	data.extend_from_slice(&44100_u32.to_le_bytes()); // Final frame blocks
	data.extend_from_slice(&1_u32.to_le_bytes()); // Total frames
	data.extend_from_slice(&16_u16.to_le_bytes()); // Bit depth
	data.extend_from_slice(&2_u16.to_le_bytes()); // Channels
	data.extend_from_slice(&44100_u32.to_le_bytes()); // Sample rate

	data.resize(data.len() + audio_len, 0x55);
	data
}

/// The on-disk form of `tag`
pub fn ape_tag(tag: &ApeTag) -> Vec<u8> {
	let mut out = Vec::new();
	tag.dump_to(&mut out, WriteOptions::default()).unwrap();
	out
}

/// Write `content` to a fresh temporary directory
///
/// The directory is deleted once the returned [`TempDir`] is dropped.
pub fn temp_file(name: &str, content: &[u8]) -> (TempDir, PathBuf) {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join(name);
	std::fs::write(&path, content).unwrap();

	(dir, path)
}

/// The number of entries in `dir`
pub fn dir_len(dir: &Path) -> usize {
	std::fs::read_dir(dir).unwrap().count()
}
