use crate::util::{FRAME_LEN, id3v1, id3v2, mpeg_frames, temp_file};

use taglet::config::{ParseOptions, WriteOptions};
use taglet::error::ErrorKind;
use taglet::file::FileType;
use taglet::id3::v1::{Id3v1Field, Id3v1Tag};
use taglet::mpeg::{Layer, MpegFile, MpegVersion};
use taglet::prelude::*;
use taglet::probe::Probe;
use taglet::tag::TagType;

use std::io::Cursor;
use std::time::Duration;

fn full_test() -> Vec<u8> {
	let mut data = id3v2(100);
	data.extend(mpeg_frames(10));
	data.extend(id3v1("Foo title", "Bar artist", 3));
	data
}

#[test_log::test]
fn read() {
	let (_dir, path) = temp_file("full_test.mp3", &full_test());
	let file = taglet::read_from_path(&path).unwrap().unwrap();

	assert_eq!(file.file_type(), FileType::Mpeg);
	assert_eq!(file.primary_tag_type(), Some(TagType::Id3v1));

	assert_eq!(file.get("title").unwrap().text(), Some("Foo title"));
	assert_eq!(file.get("ARTIST").unwrap().text(), Some("Bar artist"));
	assert_eq!(file.get("track").unwrap().text(), Some("3"));
	assert_eq!(file.get("genre").unwrap().text(), Some("Rock"));
	assert_eq!(file.get("year").unwrap().text(), Some("2024"));
	assert!(matches!(
		file.get("album").unwrap_err().kind(),
		ErrorKind::MissingKey(_)
	));

	assert_eq!(
		file.keys(),
		vec!["title", "artist", "year", "track", "genre"]
	);
}

#[test_log::test]
fn properties() {
	let mut reader = Cursor::new(full_test());
	let file = MpegFile::read_from(&mut reader, ParseOptions::new()).unwrap();
	let properties = file.properties();

	assert_eq!(properties.version(), MpegVersion::V1);
	assert_eq!(properties.layer(), Layer::Layer3);
	assert_eq!(properties.sample_rate(), 44100);
	assert_eq!(properties.channels(), 2);
	assert_eq!(properties.audio_bitrate(), 128);

	// 10 frames of 417 bytes at 128 kbps
	let expected_ms = (10 * FRAME_LEN as u64 * 8 + 64) / 128;
	assert_eq!(properties.duration(), Duration::from_millis(expected_ms));

	let id3v1 = file.id3v1_tag().unwrap();
	assert_eq!(id3v1.field(Id3v1Field::Title), Some("Foo title"));
	assert_eq!(id3v1.track_number_value(), Some(3));
	assert_eq!(id3v1.genre_index(), Some(17));
}

#[test_log::test]
fn read_no_properties() {
	let mut reader = Cursor::new(full_test());
	let file = MpegFile::read_from(&mut reader, ParseOptions::new().read_properties(false)).unwrap();

	assert_eq!(file.properties().duration(), Duration::ZERO);
	assert!(file.id3v1_tag().is_some());
}

#[test_log::test]
fn read_no_tags() {
	let mut reader = Cursor::new(full_test());
	let file = MpegFile::read_from(&mut reader, ParseOptions::new().read_tags(false)).unwrap();

	assert!(file.id3v1_tag().is_none());
	assert_eq!(file.properties().sample_rate(), 44100);
}

#[test_log::test]
fn junk_before_first_frame() {
	let mut data = vec![0x01; 2000];
	data.extend(mpeg_frames(4));

	let (_dir, path) = temp_file("junk.mp3", &data);

	// The frame is out of reach by default, the file is still recognized by its extension
	let err = taglet::read_from_path(&path).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::FileDecoding(_)));

	let file = Probe::new(&path)
		.options(ParseOptions::new().max_junk_bytes(4096))
		.read()
		.unwrap()
		.unwrap();
	assert_eq!(file.properties().sample_rate(), Some(44100));
}

#[test_log::test]
fn write() {
	let (_dir, path) = temp_file("full_test.mp3", &full_test());

	let mut file = taglet::read_from_path(&path).unwrap().unwrap();
	let tag = file.tag_mut().unwrap();
	tag.set_artist("Baz artist").unwrap();
	tag.set_album("Qux album").unwrap();
	tag.remove_title();
	file.save().unwrap();

	let file = taglet::read_from_path(&path).unwrap().unwrap();
	let tag = file.tag().unwrap();
	assert_eq!(tag.artist(), Some("Baz artist"));
	assert_eq!(tag.album(), Some("Qux album"));
	assert_eq!(tag.title(), None);

	// Tag replaced in place
	assert_eq!(std::fs::read(&path).unwrap().len(), full_test().len());
}

#[test_log::test]
fn single_values_only() {
	let (_dir, path) = temp_file("full_test.mp3", &full_test());
	let mut file = taglet::read_from_path(&path).unwrap().unwrap();

	let err = file
		.insert("artist", ItemValue::from(vec!["Foo", "Bar"]))
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::InvalidValue(_)));

	let err = file.insert("composer", ItemValue::from("Foo")).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::UnsupportedKey(_)));

	let err = file.insert("track", ItemValue::from("0")).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::InvalidValue(_)));

	let err = file.insert("genre", ItemValue::from("Not a genre")).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::InvalidValue(_)));

	// Nothing changed
	assert_eq!(file.get("artist").unwrap().text(), Some("Bar artist"));
}

#[test_log::test]
fn remove() {
	let data = full_test();
	let (_dir, path) = temp_file("full_test.mp3", &data);

	let mut file = taglet::read_from_path(&path).unwrap().unwrap();
	file.delete().unwrap();

	assert_eq!(std::fs::read(&path).unwrap(), &data[..data.len() - 128]);

	let file = taglet::read_from_path(&path).unwrap().unwrap();
	assert!(!file.has_tags());
}

#[test_log::test]
fn v1_0_comment_survives_save() {
	let mut block = id3v1("Foo title", "Bar artist", 0);
	block[97..127].copy_from_slice(&[b'c'; 30]);

	let mut data = mpeg_frames(2);
	data.extend(block);
	let (_dir, path) = temp_file("v1_0.mp3", &data);

	let mut tag = Id3v1Tag::new();
	tag.load_from_path(&path, ParseOptions::new()).unwrap();
	let first = tag.get("comment").cloned();
	assert_eq!(first.as_ref().and_then(ItemValue::text).map(str::len), Some(30));

	tag.save_to_path(&path, WriteOptions::default()).unwrap();

	let mut reloaded = Id3v1Tag::new();
	reloaded.load_from_path(&path, ParseOptions::new()).unwrap();
	assert_eq!(reloaded.get("comment").cloned(), first);
	assert_eq!(reloaded, tag);
	assert_eq!(std::fs::read(&path).unwrap(), data);
}
