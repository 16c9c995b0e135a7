use crate::util::{ape_audio, ape_tag, dir_len, mpeg_frames, temp_file};

use taglet::ape::ApeTag;
use taglet::error::ErrorKind;
use taglet::prelude::*;
use taglet::tag::TagType;

#[test_log::test]
fn untagged_file() {
	let data = mpeg_frames(4);
	let (dir, path) = temp_file("untagged.mp3", &data);

	let mut file = taglet::read_from_path(&path).unwrap().unwrap();
	assert!(!file.has_tags());
	assert!(file.keys().is_empty());
	assert!(matches!(
		file.get("title").unwrap_err().kind(),
		ErrorKind::MissingKey(_)
	));
	assert!(matches!(
		file.remove("title").unwrap_err().kind(),
		ErrorKind::MissingKey(_)
	));

	// Nothing to save, the file isn't touched
	let err = file.save().unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::NoTags));
	assert_eq!(err.to_string(), "no tags in file");
	assert_eq!(std::fs::read(&path).unwrap(), data);
	assert_eq!(dir_len(dir.path()), 1);

	// Deleting is a no-op
	file.delete().unwrap();
	assert!(!file.has_tags());
	assert_eq!(std::fs::read(&path).unwrap(), data);
}

#[test_log::test]
fn lazy_tag_creation() {
	let (_dir, path) = temp_file("untagged.mp3", &mpeg_frames(4));

	let mut file = taglet::read_from_path(&path).unwrap().unwrap();
	assert_eq!(file.insert("title", ItemValue::from("Foo title")).unwrap(), None);

	assert!(file.has_tags());
	assert_eq!(file.primary_tag_type(), Some(TagType::Id3v1));
	assert_eq!(file.get("title").unwrap().text(), Some("Foo title"));

	// Only in memory so far
	let reread = taglet::read_from_path(&path).unwrap().unwrap();
	assert!(!reread.has_tags());

	file.save().unwrap();

	let reread = taglet::read_from_path(&path).unwrap().unwrap();
	assert_eq!(reread.get("title").unwrap().text(), Some("Foo title"));
}

#[test_log::test]
fn add_tags_once() {
	let (_dir, path) = temp_file("untagged.ape", &ape_audio(100));

	let mut file = taglet::read_from_path(&path).unwrap().unwrap();
	let tag = file.add_tags().unwrap();
	assert!(tag.is_empty());
	assert_eq!(tag.tag_type(), TagType::Ape);

	let err = file.add_tags().unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::TagAlreadyExists));

	// An empty tag saves as nothing
	file.save().unwrap();
	assert_eq!(std::fs::read(&path).unwrap(), ape_audio(100));
}

#[test_log::test]
fn delete_is_idempotent() {
	let mut tag = ApeTag::new();
	tag.set_artist("Foo artist").unwrap();

	let mut data = ape_audio(100);
	data.extend(ape_tag(&tag));
	let (_dir, path) = temp_file("tagged.ape", &data);

	let mut file = taglet::read_from_path(&path).unwrap().unwrap();
	file.delete().unwrap();

	// The store stays, but is emptied
	assert!(file.has_tags());
	assert!(file.keys().is_empty());
	assert_eq!(std::fs::read(&path).unwrap(), ape_audio(100));

	file.delete().unwrap();
	assert_eq!(std::fs::read(&path).unwrap(), ape_audio(100));
}

#[test_log::test]
#[allow(deprecated)]
fn deprecated_path_overrides() {
	let mut tag = ApeTag::new();
	tag.set_artist("Foo artist").unwrap();

	let mut data = ape_audio(100);
	data.extend(ape_tag(&tag));

	let (dir, path) = temp_file("tagged.ape", &data);
	let other = dir.path().join("other.ape");
	std::fs::write(&other, ape_audio(100)).unwrap();

	let mut file = taglet::read_from_path(&path).unwrap().unwrap();
	file.insert("Artist", ItemValue::from("Bar artist")).unwrap();
	file.save_to_path(&other).unwrap();

	// Only the other file was written
	assert_eq!(std::fs::read(&path).unwrap(), data);
	let saved = taglet::read_from_path(&other).unwrap().unwrap();
	assert_eq!(saved.get("artist").unwrap().text(), Some("Bar artist"));
	assert_eq!(file.path(), path.as_path());

	file.delete_from_path(&other).unwrap();
	assert_eq!(std::fs::read(&other).unwrap(), ape_audio(100));
	assert_eq!(std::fs::read(&path).unwrap(), data);
}

#[test_log::test]
fn pretty_print() {
	let mut tag = ApeTag::new();
	tag.set_title("Foo title").unwrap();
	tag.set_artist("Bar artist").unwrap();

	let mut data = ape_audio(1000);
	data.extend(ape_tag(&tag));
	let (_dir, path) = temp_file("tagged.ape", &data);

	let file = taglet::read_from_path(&path).unwrap().unwrap();
	let printed = file.pretty_print();

	let mut lines = printed.lines();
	assert!(lines.next().unwrap().starts_with("Monkey's Audio 3.99, "));
	assert_eq!(lines.next(), Some("Title=Foo title"));
	assert_eq!(lines.next(), Some("Artist=Bar artist"));
	assert_eq!(lines.next(), None);

	let (_dir, path) = temp_file("untagged.mp3", &mpeg_frames(4));
	let file = taglet::read_from_path(&path).unwrap().unwrap();
	assert_eq!(file.pretty_print().lines().count(), 1);
}
