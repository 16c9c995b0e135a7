use crate::util::{ape_audio, ape_tag, dir_len, id3v1, id3v2, temp_file};

use taglet::ape::{ApeFile, ApeItem, ApeTag};
use taglet::config::{ParseOptions, ParsingMode, WriteOptions};
use taglet::error::ErrorKind;
use taglet::file::FileType;
use taglet::prelude::*;
use taglet::tag::TagType;

use std::io::Cursor;
use std::time::Duration;

fn test_tag() -> ApeTag {
	let mut tag = ApeTag::new();
	tag.set_title("Foo title").unwrap();
	tag.insert("Artist", ItemValue::from(vec!["Foo artist", "Bar artist"]))
		.unwrap();
	tag.insert("Cover Art (Front)", ItemValue::from(&[1_u8, 2, 3][..]))
		.unwrap();
	tag
}

fn full_test() -> Vec<u8> {
	let mut data = ape_audio(1000);
	data.extend(ape_tag(&test_tag()));
	data.extend(id3v1("Bar title", "Baz artist", 1));
	data
}

#[test_log::test]
fn read() {
	let (_dir, path) = temp_file("full_test.ape", &full_test());
	let file = taglet::read_from_path(&path).unwrap().unwrap();

	assert_eq!(file.file_type(), FileType::Ape);
	assert_eq!(file.primary_tag_type(), Some(TagType::Ape));

	assert_eq!(file.get("title").unwrap().text(), Some("Foo title"));
	assert_eq!(
		file.get("ARTIST").unwrap().values().unwrap(),
		&["Foo artist", "Bar artist"]
	);
	assert_eq!(
		file.get("Cover Art (Front)").unwrap().binary(),
		Some(&[1_u8, 2, 3][..])
	);
	assert_eq!(file.keys(), vec!["Title", "Artist", "Cover Art (Front)"]);
}

#[test_log::test]
fn properties() {
	let mut reader = Cursor::new(full_test());
	let file = ApeFile::read_from(&mut reader, ParseOptions::new()).unwrap();
	let properties = file.properties();

	assert_eq!(properties.version(), 3990);
	assert_eq!(properties.duration(), Duration::from_secs(1));
	assert_eq!(properties.sample_rate(), 44100);
	assert_eq!(properties.channels(), 2);
	assert_eq!(properties.bit_depth(), 16);

	assert_eq!(file.ape_tag(), Some(&test_tag()));
}

#[test_log::test]
fn skips_id3v2() {
	let mut data = id3v2(50);
	data.extend(full_test());

	let file = ApeFile::read_from(&mut Cursor::new(data), ParseOptions::new()).unwrap();
	assert_eq!(file.properties().sample_rate(), 44100);
	assert!(file.ape_tag().is_some());
}

#[test_log::test]
fn not_an_ape_file() {
	let err = ApeFile::read_from(&mut Cursor::new(b"RIFF\0\0\0\0WAVE".to_vec()), ParseOptions::new())
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::FileDecoding(_)));
}

#[test_log::test]
fn write() {
	let (dir, path) = temp_file("full_test.ape", &full_test());

	let mut file = taglet::read_from_path(&path).unwrap().unwrap();
	file.insert("Title", ItemValue::from("New title")).unwrap();
	file.insert("Album", ItemValue::from("Qux album")).unwrap();
	file.remove("Cover Art (Front)").unwrap();
	file.save().unwrap();

	// The save went through a temporary file, which must be gone now
	assert_eq!(dir_len(dir.path()), 1);

	let file = taglet::read_from_path(&path).unwrap().unwrap();
	assert_eq!(file.keys(), vec!["Title", "Artist", "Album"]);
	assert_eq!(file.get("title").unwrap().text(), Some("New title"));

	// The trailing ID3v1 tag is left alone
	let content = std::fs::read(&path).unwrap();
	assert_eq!(
		&content[content.len() - 128..],
		&id3v1("Bar title", "Baz artist", 1)[..]
	);
}

#[test_log::test]
fn empty_tag_is_stripped() {
	let mut data = ape_audio(1000);
	data.extend(ape_tag(&test_tag()));
	let (_dir, path) = temp_file("full_test.ape", &data);

	let mut file = taglet::read_from_path(&path).unwrap().unwrap();
	for key in ["Title", "Artist", "Cover Art (Front)"] {
		file.remove(key).unwrap();
	}
	file.save().unwrap();

	assert_eq!(std::fs::read(&path).unwrap(), ape_audio(1000));
}

fn read_only_test() -> Vec<u8> {
	let mut tag = ApeTag::new();
	tag.set_title("Foo title").unwrap();

	let mut artist = ApeItem::new(String::from("Artist"), ItemValue::from("Locked artist")).unwrap();
	artist.read_only = true;
	tag.insert_item(artist);

	let mut data = ape_audio(1000);
	data.extend(ape_tag(&tag));
	data
}

#[test_log::test]
fn read_only_items_are_kept() {
	let (_dir, path) = temp_file("read_only.ape", &read_only_test());

	let mut file = taglet::read_from_path(&path).unwrap().unwrap();
	file.insert("Artist", ItemValue::from("New artist")).unwrap();
	file.insert("Title", ItemValue::from("New title")).unwrap();
	file.save().unwrap();

	let mut file = taglet::read_from_path(&path).unwrap().unwrap();
	assert_eq!(file.get("artist").unwrap().text(), Some("Locked artist"));
	assert_eq!(file.get("title").unwrap().text(), Some("New title"));

	// Removal is overridden too
	file.remove("Artist").unwrap();
	file.save().unwrap();

	let file = taglet::read_from_path(&path).unwrap().unwrap();
	assert_eq!(file.get("artist").unwrap().text(), Some("Locked artist"));
}

#[test_log::test]
fn read_only_items_can_be_overridden() {
	let (_dir, path) = temp_file("read_only.ape", &read_only_test());

	let mut file = taglet::read_from_path(&path).unwrap().unwrap();
	file.insert("Artist", ItemValue::from("New artist")).unwrap();
	file.save_with(WriteOptions::new().respect_read_only(false))
		.unwrap();

	let file = taglet::read_from_path(&path).unwrap().unwrap();
	assert_eq!(file.get("artist").unwrap().text(), Some("New artist"));
}

#[test_log::test]
fn invalid_key() {
	// Item with the key "TAG", which may not be used in APE tags
	let mut item = Vec::new();
	item.extend_from_slice(&3_u32.to_le_bytes());
	item.extend_from_slice(&0_u32.to_le_bytes());
	item.extend_from_slice(b"TAG\0Foo");

	let original = ape_tag(&test_tag());
	let tag_size = u32::from_le_bytes(original[12..16].try_into().unwrap()) + item.len() as u32;
	let item_count = u32::from_le_bytes(original[16..20].try_into().unwrap()) + 1;

	// Put the item right after the header, and fix up the sizes and counts
	let mut tag = original[..32].to_vec();
	tag.extend(item);
	tag.extend_from_slice(&original[32..]);
	let footer = tag.len() - 32;
	for offset in [0, footer] {
		tag[offset + 12..offset + 16].copy_from_slice(&tag_size.to_le_bytes());
		tag[offset + 16..offset + 20].copy_from_slice(&item_count.to_le_bytes());
	}

	let mut data = ape_audio(1000);
	data.extend(tag);

	let file = ApeFile::read_from(&mut Cursor::new(&data), ParseOptions::new()).unwrap();
	assert_eq!(file.ape_tag(), Some(&test_tag()));

	let err = ApeFile::read_from(
		&mut Cursor::new(&data),
		ParseOptions::new().parsing_mode(ParsingMode::Strict),
	)
	.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::FileDecoding(_)));
}
