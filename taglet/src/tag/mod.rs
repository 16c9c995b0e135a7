//! The format-independent tag container
//!
//! Every tag format taglet (or a third-party handler) supports is exposed through the
//! [`TagContainer`] trait. It is an ordered mapping from string keys to [`ItemValue`]s, with
//! the ability to load itself from a stream and to persist itself to, or strip itself from,
//! a file on disk.
//!
//! A missing key is always reported as absence (`None`, or
//! [`ErrorKind::MissingKey`](crate::error::ErrorKind::MissingKey) from [`TagContainer::try_get`]),
//! never as a stored null.

mod accessor;
mod item;

pub use accessor::Accessor;
pub use item::ItemValue;

use crate::config::{ParseOptions, WriteOptions};
use crate::error::{Result, TagletError};
use crate::util::io::SeekRead;

use std::fmt::{Debug, Write as _};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// The tag's format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TagType {
	/// This covers both APEv1 and APEv2 as it doesn't matter much
	Ape,
	/// Represents an ID3v1 tag
	Id3v1,
	/// A tag format provided by a custom resolver
	Custom(&'static str),
}

/// A mutable, ordered key/value tag store
///
/// Implementations decide which keys and values they can represent. [`TagContainer::insert`]
/// rejects anything the format cannot store instead of silently dropping it.
///
/// # Examples
///
/// ```rust
/// use taglet::ape::ApeTag;
/// use taglet::tag::{ItemValue, TagContainer};
///
/// # fn main() -> taglet::error::Result<()> {
/// let mut tag = ApeTag::new();
/// tag.insert("Artist", ItemValue::from("Foo artist"))?;
///
/// assert_eq!(tag.get("artist").and_then(ItemValue::text), Some("Foo artist"));
/// assert_eq!(tag.keys(), vec!["Artist"]);
/// # Ok(()) }
/// ```
pub trait TagContainer: Debug + Send + Sync {
	/// Returns the tag's format
	fn tag_type(&self) -> TagType;

	/// Gets the value stored under `key`
	fn get(&self, key: &str) -> Option<&ItemValue>;

	/// Gets the value stored under `key`, failing if it is absent
	///
	/// # Errors
	///
	/// [`ErrorKind::MissingKey`](crate::error::ErrorKind::MissingKey) if `key` is not present
	fn try_get(&self, key: &str) -> Result<&ItemValue> {
		self.get(key).ok_or_else(|| TagletError::missing_key(key))
	}

	/// Stores `value` under `key`, returning the replaced value if there was one
	///
	/// An existing key keeps its position in [`TagContainer::keys`].
	///
	/// # Errors
	///
	/// * [`ErrorKind::UnsupportedKey`](crate::error::ErrorKind::UnsupportedKey) if the format has no place for `key`
	/// * [`ErrorKind::InvalidValue`](crate::error::ErrorKind::InvalidValue) if the format cannot store `value`
	fn insert(&mut self, key: &str, value: ItemValue) -> Result<Option<ItemValue>>;

	/// Removes the value stored under `key`
	fn remove(&mut self, key: &str) -> Option<ItemValue>;

	/// Returns all present keys, in the format's order
	fn keys(&self) -> Vec<&str>;

	/// Returns the number of present keys
	fn len(&self) -> usize;

	/// Whether the tag has no items
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Removes every item
	fn clear(&mut self);

	/// Replaces the contents of the tag with the one found in `reader`
	///
	/// If the stream carries no tag of this format, the container is left empty. On error,
	/// the existing contents are left untouched.
	///
	/// # Errors
	///
	/// * `reader` could not be read
	/// * The tag in `reader` is malformed
	fn load_from(&mut self, reader: &mut dyn SeekRead, parse_options: ParseOptions) -> Result<()>;

	/// Replaces the contents of the tag with the one found in the file at `path`
	///
	/// # Errors
	///
	/// See [`TagContainer::load_from`]
	fn load_from_path(&mut self, path: &Path, parse_options: ParseOptions) -> Result<()> {
		let mut reader = BufReader::new(File::open(path)?);
		self.load_from(&mut reader, parse_options)
	}

	/// Writes the encoded tag, and nothing else, to `writer`
	///
	/// # Errors
	///
	/// * The tag cannot be encoded
	/// * `writer` could not be written to
	fn dump_to(&self, writer: &mut dyn Write, write_options: WriteOptions) -> Result<()>;

	/// Writes the tag to the file at `path`, replacing any existing tag of the same format
	///
	/// The file is replaced atomically. Saving an empty tag is legal.
	///
	/// # Errors
	///
	/// * The file could not be read or written
	/// * The tag cannot be encoded
	fn save_to_path(&self, path: &Path, write_options: WriteOptions) -> Result<()>;

	/// Strips this tag format from the file at `path`, then clears the in-memory tag
	///
	/// A file that doesn't carry the tag is left untouched.
	///
	/// # Errors
	///
	/// * The file could not be read or written
	fn remove_from_path(&mut self, path: &Path) -> Result<()>;

	/// A human readable summary of the tag, if the format can produce one
	fn pretty_print(&self) -> Option<String> {
		None
	}
}

/// Formats every item as a `key=value` line, in key order
pub(crate) fn pretty_print_items<T>(tag: &T) -> String
where
	T: TagContainer + ?Sized,
{
	let mut out = String::new();
	for key in tag.keys() {
		if let Some(value) = tag.get(key) {
			if !out.is_empty() {
				out.push('\n');
			}

			let _ = write!(out, "{key}={value}");
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::{ItemValue, TagContainer, pretty_print_items};
	use crate::ape::ApeTag;
	use crate::error::ErrorKind;

	#[test_log::test]
	fn try_get_reports_missing_key() {
		let tag = ApeTag::new();

		let err = tag.try_get("Title").unwrap_err();
		match err.kind() {
			ErrorKind::MissingKey(key) => assert_eq!(key, "Title"),
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[test_log::test]
	fn pretty_print_follows_key_order() {
		let mut tag = ApeTag::new();
		tag.insert("Title", ItemValue::from("Foo title")).unwrap();
		tag.insert(
			"Artist",
			ItemValue::Text(vec![String::from("A"), String::from("B")]),
		)
		.unwrap();

		assert_eq!(pretty_print_items(&tag), "Title=Foo title\nArtist=A / B");
	}
}
