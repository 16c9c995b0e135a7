pub(crate) mod item;
pub(crate) mod read;
mod write;

use crate::ape::tag::item::ApeItem;
use crate::config::{ParseOptions, WriteOptions};
use crate::error::Result;
use crate::tag::{ItemValue, TagContainer, TagType, pretty_print_items};
use crate::util::io::SeekRead;

use std::io::Write;
use std::path::Path;

/// An `APE` tag
///
/// ## Item storage
///
/// `APE` isn't a very strict format. An [`ApeItem`] only restricts its key, meaning it can hold
/// any [`ItemValue`]. Keys are matched case-insensitively, and keep their insertion order.
///
/// ## Multiple values
///
/// Text and locator items may hold several values. On disk, they are separated by a NUL byte.
///
/// # Examples
///
/// ```rust
/// use taglet::ape::ApeTag;
/// use taglet::tag::{ItemValue, TagContainer};
///
/// # fn main() -> taglet::error::Result<()> {
/// let mut tag = ApeTag::new();
/// tag.insert("Artist", ItemValue::from(vec!["Foo", "Bar"]))?;
/// tag.insert("Album", ItemValue::from("Baz"))?;
///
/// assert_eq!(tag.keys(), vec!["Artist", "Album"]);
/// assert_eq!(tag.get("ARTIST").and_then(ItemValue::values).map(<[String]>::len), Some(2));
/// # Ok(()) }
/// ```
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct ApeTag {
	/// Whether or not to mark the tag as read only
	pub read_only: bool,
	pub(super) items: Vec<ApeItem>,
}

impl ApeTag {
	/// Create a new empty `ApeTag`
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::ape::ApeTag;
	/// use taglet::tag::TagContainer;
	///
	/// let ape_tag = ApeTag::new();
	/// assert!(ape_tag.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a new empty `ApeTag` as a boxed [`TagContainer`]
	pub fn new_boxed() -> Box<dyn TagContainer> {
		Box::new(Self::new())
	}

	/// Get an [`ApeItem`] by key
	///
	/// NOTE: While `APE` items are supposed to be case-sensitive,
	/// this rule is rarely followed, so this will ignore case when searching.
	pub fn item(&self, key: &str) -> Option<&ApeItem> {
		self.items.iter().find(|i| i.matches(key))
	}

	/// Insert an [`ApeItem`]
	///
	/// This will remove any item with the same key, keeping its position.
	pub fn insert_item(&mut self, value: ApeItem) -> Option<ApeItem> {
		match self.items.iter_mut().find(|i| i.matches(&value.key)) {
			Some(existing) => Some(std::mem::replace(existing, value)),
			None => {
				self.items.push(value);
				None
			},
		}
	}

	/// Removes an item by key
	///
	/// NOTE: Like [`ApeTag::item`], this is not case-sensitive
	pub fn remove_item(&mut self, key: &str) -> Option<ApeItem> {
		let pos = self.items.iter().position(|i| i.matches(key))?;
		Some(self.items.remove(pos))
	}

	/// Returns all of the tag's items
	pub fn items(&self) -> &[ApeItem] {
		&self.items
	}
}

impl TagContainer for ApeTag {
	fn tag_type(&self) -> TagType {
		TagType::Ape
	}

	fn get(&self, key: &str) -> Option<&ItemValue> {
		self.item(key).map(ApeItem::value)
	}

	fn insert(&mut self, key: &str, value: ItemValue) -> Result<Option<ItemValue>> {
		let item = ApeItem::new(key.to_owned(), value)?;
		Ok(self.insert_item(item).map(|previous| previous.value))
	}

	fn remove(&mut self, key: &str) -> Option<ItemValue> {
		self.remove_item(key).map(|item| item.value)
	}

	fn keys(&self) -> Vec<&str> {
		self.items.iter().map(ApeItem::key).collect()
	}

	fn len(&self) -> usize {
		self.items.len()
	}

	fn clear(&mut self) {
		self.items.clear();
	}

	fn load_from(&mut self, reader: &mut dyn SeekRead, parse_options: ParseOptions) -> Result<()> {
		let tag = read::read_ape_tag(reader, parse_options)?;
		*self = tag.map(|(tag, _)| tag).unwrap_or_default();
		Ok(())
	}

	fn dump_to(&self, writer: &mut dyn Write, _write_options: WriteOptions) -> Result<()> {
		let encoded = write::create_ape_tag(self, self.items.iter())?;
		writer.write_all(&encoded)?;
		Ok(())
	}

	fn save_to_path(&self, path: &Path, write_options: WriteOptions) -> Result<()> {
		write::write_to_path(self, path, write_options)
	}

	fn remove_from_path(&mut self, path: &Path) -> Result<()> {
		write::remove_from_path(path)?;
		self.clear();
		Ok(())
	}

	fn pretty_print(&self) -> Option<String> {
		Some(pretty_print_items(self))
	}
}
