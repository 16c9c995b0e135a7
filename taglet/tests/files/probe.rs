use crate::util::{ape_audio, id3v2, mpeg_frames, temp_file};

use taglet::ape::ApeResolver;
use taglet::config::ParseOptions;
use taglet::error::{ErrorKind, Result, TagletError};
use taglet::file::{FileType, MediaFile};
use taglet::mpeg::MpegResolver;
use taglet::probe::Probe;
use taglet::properties::FileProperties;
use taglet::resolve::FileResolver;

use std::path::Path;

/// Claims files starting with `prefix`
struct PrefixResolver {
	name: &'static str,
	prefix: &'static [u8],
	fail: bool,
}

impl FileResolver for PrefixResolver {
	fn name(&self) -> &'static str {
		self.name
	}

	fn score(&self, _path: &Path, header: &[u8]) -> u32 {
		u32::from(header.starts_with(self.prefix)) * 2
	}

	fn open(&self, path: &Path, _parse_options: ParseOptions) -> Result<MediaFile> {
		if self.fail {
			return Err(TagletError::new(ErrorKind::InvalidValue("refusing to open")));
		}

		Ok(MediaFile::new(
			FileType::Custom(self.name),
			path,
			FileProperties::default(),
			taglet::ape::ApeTag::new_boxed,
		))
	}
}

#[test_log::test]
fn sniff_by_content() {
	// Misleading extensions lose to the content
	let (_dir, path) = temp_file("actually_ape.mp3", &ape_audio(100));
	let file = taglet::read_from_path(&path).unwrap().unwrap();
	assert_eq!(file.file_type(), FileType::Ape);

	let mut data = id3v2(10);
	data.extend(mpeg_frames(2));
	let (_dir, path) = temp_file("no_extension", &data);
	let file = taglet::read_from_path(&path).unwrap().unwrap();
	assert_eq!(file.file_type(), FileType::Mpeg);
}

#[test_log::test]
fn ape_behind_id3v2() {
	// Stream start visible in the header
	let mut data = id3v2(50);
	data.extend(ape_audio(64));
	let (_dir, path) = temp_file("track.ape", &data);

	let file = taglet::read_from_path(&path).unwrap().unwrap();
	assert_eq!(file.file_type(), FileType::Ape);
	assert_eq!(file.properties().sample_rate(), Some(44100));

	// Stream start pushed past the header
	let mut data = id3v2(500);
	data.extend(ape_audio(64));
	let (_dir, path) = temp_file("track.ape", &data);

	let file = taglet::read_from_path(&path).unwrap().unwrap();
	assert_eq!(file.file_type(), FileType::Ape);

	// Same file, no hint from the extension
	let (_dir, path) = temp_file("track", &data);
	let guess = Probe::new(&path).guess().unwrap().unwrap();
	assert_eq!(guess.name(), "Mpeg");
}

#[test_log::test]
fn unknown_file() {
	let (_dir, path) = temp_file("notes.txt", b"Nothing to see here");
	assert!(taglet::read_from_path(&path).unwrap().is_none());

	let (_dir, path) = temp_file("empty", b"");
	assert!(taglet::read_from_path(&path).unwrap().is_none());
}

#[test_log::test]
fn missing_file() {
	let err = taglet::read_from_path("/this/path/does/not/exist.mp3").unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Io(_)));
}

#[test_log::test]
fn later_candidate_wins_ties() {
	let (_dir, path) = temp_file("data.bin", b"FOOBAR");

	let first = PrefixResolver {
		name: "First",
		prefix: b"FOO",
		fail: false,
	};
	let second = PrefixResolver {
		name: "Second",
		prefix: b"FOOBAR",
		fail: false,
	};

	let file = Probe::new(&path)
		.resolvers(vec![&first, &second])
		.read()
		.unwrap()
		.unwrap();
	assert_eq!(file.file_type(), FileType::Custom("Second"));

	let file = Probe::new(&path)
		.resolvers(vec![&second, &first])
		.read()
		.unwrap()
		.unwrap();
	assert_eq!(file.file_type(), FileType::Custom("First"));

	let guess = Probe::new(&path)
		.resolvers(vec![&first, &MpegResolver, &second])
		.guess()
		.unwrap()
		.unwrap();
	assert_eq!(guess.name(), "Second");
	assert_eq!(guess.index(), 2);
	assert_eq!(guess.score(), 2);
}

#[test_log::test]
fn winner_errors_are_not_swallowed() {
	let (_dir, path) = temp_file("data.mp3", b"FOOBAR");

	// MPEG scores 1 for the extension, and would have opened the file
	let failing = PrefixResolver {
		name: "Failing",
		prefix: b"FOO",
		fail: true,
	};

	let err = Probe::new(&path)
		.resolvers(vec![&MpegResolver, &failing])
		.read()
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::InvalidValue("refusing to open")));
}

#[test_log::test]
fn failed_built_in_read() {
	// Looks like Monkey's Audio, but is far too short
	let (_dir, path) = temp_file("short.ape", b"MAC \x96\x0f");

	let err = Probe::new(&path)
		.resolvers(vec![&MpegResolver, &ApeResolver])
		.read()
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::FileDecoding(_)));
}

#[test_log::test]
fn header_is_bounded() {
	struct LenResolver;

	impl FileResolver for LenResolver {
		fn name(&self) -> &'static str {
			"Len"
		}

		fn score(&self, _path: &Path, header: &[u8]) -> u32 {
			header.len() as u32
		}

		fn open(&self, _path: &Path, _parse_options: ParseOptions) -> Result<MediaFile> {
			unreachable!()
		}
	}

	let (_dir, path) = temp_file("big", &[0; 4096]);
	let guess = Probe::new(&path).resolvers(vec![&LenResolver]).guess().unwrap();
	assert_eq!(guess.unwrap().score(), Probe::HEADER_LEN as u32);

	let (_dir, path) = temp_file("small", &[0; 10]);
	let guess = Probe::new(&path).resolvers(vec![&LenResolver]).guess().unwrap();
	assert_eq!(guess.unwrap().score(), 10);
}
