use super::constants::GENRES;
use crate::config::{ParseOptions, WriteOptions};
use crate::error::{ErrorKind, Result, TagletError};
use crate::id3::find_id3v1;
use crate::macros::err;
use crate::tag::{ItemValue, TagContainer, TagType, pretty_print_items};
use crate::util::io::SeekRead;

use std::io::{SeekFrom, Write};
use std::path::Path;

/// One of the seven fixed ID3v1 fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Id3v1Field {
	Title,
	Artist,
	Album,
	Year,
	Comment,
	Track,
	Genre,
}

impl Id3v1Field {
	/// Every field, in the order they are listed by [`TagContainer::keys`]
	pub const ALL: [Self; 7] = [
		Self::Title,
		Self::Artist,
		Self::Album,
		Self::Year,
		Self::Comment,
		Self::Track,
		Self::Genre,
	];

	/// The key used to address the field
	pub fn key(self) -> &'static str {
		match self {
			Self::Title => "title",
			Self::Artist => "artist",
			Self::Album => "album",
			Self::Year => "year",
			Self::Comment => "comment",
			Self::Track => "track",
			Self::Genre => "genre",
		}
	}

	/// Looks up a field by key, ignoring case
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::id3::v1::Id3v1Field;
	///
	/// assert_eq!(Id3v1Field::from_key("TITLE"), Some(Id3v1Field::Title));
	/// assert_eq!(Id3v1Field::from_key("Composer"), None);
	/// ```
	pub fn from_key(key: &str) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|field| field.key().eq_ignore_ascii_case(key))
	}

	fn index(self) -> usize {
		self as usize
	}
}

/// An ID3v1 tag
///
/// Values are stored as single-valued text. Numeric fields are validated on insertion, and
/// genres are normalized to their name in [`GENRES`](super::GENRES).
///
/// # Examples
///
/// ```rust
/// use taglet::id3::v1::Id3v1Tag;
/// use taglet::tag::{ItemValue, TagContainer};
///
/// # fn main() -> taglet::error::Result<()> {
/// let mut tag = Id3v1Tag::new();
/// tag.insert("Genre", ItemValue::from("17"))?;
///
/// assert_eq!(tag.get("genre").and_then(ItemValue::text), Some("Rock"));
///
/// // Only one value fits in a field
/// assert!(tag.insert("artist", ItemValue::from(vec!["A", "B"])).is_err());
/// # Ok(()) }
/// ```
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Id3v1Tag {
	fields: [Option<ItemValue>; 7],
}

impl Id3v1Tag {
	/// Create a new empty `Id3v1Tag`
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a new empty `Id3v1Tag` as a boxed [`TagContainer`]
	pub fn new_boxed() -> Box<dyn TagContainer> {
		Box::new(Self::new())
	}

	/// Gets the text of a field
	pub fn field(&self, field: Id3v1Field) -> Option<&str> {
		self.fields[field.index()]
			.as_ref()
			.and_then(ItemValue::text)
	}

	/// The index of the genre in [`GENRES`](super::GENRES)
	pub fn genre_index(&self) -> Option<u8> {
		let genre = self.field(Id3v1Field::Genre)?;
		GENRES.iter().position(|g| *g == genre).map(|i| i as u8)
	}

	/// The year as a number
	pub fn year_number(&self) -> Option<u16> {
		self.field(Id3v1Field::Year)?.parse().ok()
	}

	/// The track number as a number
	pub fn track_number_value(&self) -> Option<u8> {
		self.field(Id3v1Field::Track)?.parse().ok()
	}

	pub(super) fn set_field_unchecked(&mut self, field: Id3v1Field, text: String) {
		self.fields[field.index()] = Some(ItemValue::Text(vec![text]));
	}
}

fn normalize(field: Id3v1Field, value: ItemValue) -> Result<String> {
	let text = match value {
		ItemValue::Text(mut values) if values.len() == 1 => values.remove(0),
		ItemValue::Text(_) => err!(InvalidValue("ID3v1 fields hold exactly one value")),
		ItemValue::Locator(_) | ItemValue::Binary(_) => {
			err!(InvalidValue("ID3v1 fields can only hold text"))
		},
	};

	match field {
		Id3v1Field::Year => match text.trim().parse::<u16>() {
			Ok(year) if year <= 9999 => Ok(year.to_string()),
			_ => err!(InvalidValue("ID3v1 years must be a number from 0 to 9999")),
		},
		Id3v1Field::Track => match text.trim().parse::<u8>() {
			Ok(track) if track > 0 => Ok(track.to_string()),
			_ => err!(InvalidValue("ID3v1 track numbers must be a number from 1 to 255")),
		},
		Id3v1Field::Genre => {
			let text = text.trim();
			if let Some(genre) = text.parse::<usize>().ok().and_then(|i| GENRES.get(i)) {
				return Ok((*genre).to_owned());
			}

			match GENRES.iter().find(|g| g.eq_ignore_ascii_case(text)) {
				Some(genre) => Ok((*genre).to_owned()),
				None => err!(InvalidValue("unknown ID3v1 genre")),
			}
		},
		_ => Ok(text),
	}
}

impl TagContainer for Id3v1Tag {
	fn tag_type(&self) -> TagType {
		TagType::Id3v1
	}

	fn get(&self, key: &str) -> Option<&ItemValue> {
		let field = Id3v1Field::from_key(key)?;
		self.fields[field.index()].as_ref()
	}

	fn insert(&mut self, key: &str, value: ItemValue) -> Result<Option<ItemValue>> {
		let Some(field) = Id3v1Field::from_key(key) else {
			return Err(TagletError::new(ErrorKind::UnsupportedKey(key.to_owned())));
		};

		let text = normalize(field, value)?;
		Ok(self.fields[field.index()].replace(ItemValue::Text(vec![text])))
	}

	fn remove(&mut self, key: &str) -> Option<ItemValue> {
		let field = Id3v1Field::from_key(key)?;
		self.fields[field.index()].take()
	}

	fn keys(&self) -> Vec<&str> {
		Id3v1Field::ALL
			.into_iter()
			.filter(|field| self.fields[field.index()].is_some())
			.map(Id3v1Field::key)
			.collect()
	}

	fn len(&self) -> usize {
		self.fields.iter().filter(|f| f.is_some()).count()
	}

	fn clear(&mut self) {
		*self = Self::default();
	}

	fn load_from(&mut self, reader: &mut dyn SeekRead, parse_options: ParseOptions) -> Result<()> {
		let tag = match find_id3v1(reader)? {
			Some(_) => {
				let mut block = [0; 128];
				reader.seek(SeekFrom::End(-128))?;
				reader.read_exact(&mut block)?;

				Self::parse(block, parse_options.parsing_mode)?
			},
			None => Self::default(),
		};

		*self = tag;
		Ok(())
	}

	fn dump_to(&self, writer: &mut dyn Write, write_options: WriteOptions) -> Result<()> {
		let encoded = super::write::encode(self, write_options)?;
		writer.write_all(&encoded)?;
		Ok(())
	}

	fn save_to_path(&self, path: &Path, write_options: WriteOptions) -> Result<()> {
		super::write::write_to_path(self, path, write_options)
	}

	fn remove_from_path(&mut self, path: &Path) -> Result<()> {
		super::write::remove_from_path(path)?;
		self.clear();
		Ok(())
	}

	fn pretty_print(&self) -> Option<String> {
		Some(pretty_print_items(self))
	}
}
