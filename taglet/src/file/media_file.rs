use crate::config::WriteOptions;
use crate::error::{ErrorKind, Result, TagletError};
use crate::file::FileType;
use crate::macros::err;
use crate::properties::{FileProperties, StreamInfo};
use crate::tag::{ItemValue, TagContainer, TagType};

use std::path::{Path, PathBuf};

/// A file with stream info and, optionally, a tag
///
/// `MediaFile` exposes a dict-like view of the tag. Reads on an untagged file fail with
/// [`ErrorKind::MissingKey`], while the first [`MediaFile::insert`] creates an empty tag in memory.
/// Nothing is written to disk until [`MediaFile::save`].
///
/// # Examples
///
/// ```rust,no_run
/// use taglet::tag::ItemValue;
///
/// # fn main() -> taglet::error::Result<()> {
/// if let Some(mut file) = taglet::read_from_path("track.ape")? {
/// 	file.insert("Title", ItemValue::from("Foo title"))?;
/// 	file.save()?;
/// }
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct MediaFile {
	pub(crate) file_type: FileType,
	pub(crate) path: PathBuf,
	pub(crate) info: Box<dyn StreamInfo>,
	pub(crate) tag: Option<Box<dyn TagContainer>>,
	pub(crate) new_tag: fn() -> Box<dyn TagContainer>,
}

impl MediaFile {
	/// Create a new, untagged `MediaFile`
	///
	/// `new_tag` creates the empty tag store used by [`MediaFile::add_tags`].
	pub fn new<P, I>(
		file_type: FileType,
		path: P,
		info: I,
		new_tag: fn() -> Box<dyn TagContainer>,
	) -> Self
	where
		P: Into<PathBuf>,
		I: StreamInfo + 'static,
	{
		Self {
			file_type,
			path: path.into(),
			info: Box::new(info),
			tag: None,
			new_tag,
		}
	}

	/// Attach the tag read from the file
	pub fn with_tag(mut self, tag: Option<Box<dyn TagContainer>>) -> Self {
		self.tag = tag;
		self
	}

	/// Returns the file's [`FileType`]
	pub fn file_type(&self) -> FileType {
		self.file_type
	}

	/// The path this file was read from, and the default target of `save`/`delete`
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Returns the stream info
	pub fn info(&self) -> &dyn StreamInfo {
		self.info.as_ref()
	}

	/// Returns a reference to the file's properties
	pub fn properties(&self) -> FileProperties {
		self.info.properties()
	}

	/// Returns the tag, if the file has one
	pub fn tag(&self) -> Option<&dyn TagContainer> {
		self.tag.as_deref()
	}

	/// Returns the tag mutably, if the file has one
	pub fn tag_mut(&mut self) -> Option<&mut (dyn TagContainer + 'static)> {
		self.tag.as_deref_mut()
	}

	/// Whether the file has a tag store, even an empty one
	pub fn has_tags(&self) -> bool {
		self.tag.is_some()
	}

	/// The [`TagType`] of the tag store, if there is one
	pub fn primary_tag_type(&self) -> Option<TagType> {
		self.tag.as_ref().map(|tag| tag.tag_type())
	}

	/// Gets the value stored under `key`
	///
	/// # Errors
	///
	/// [`ErrorKind::MissingKey`] if the file is untagged, or `key` is absent
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::error::ErrorKind;
	/// use taglet::file::{FileType, MediaFile};
	/// use taglet::properties::FileProperties;
	///
	/// let file = MediaFile::new(
	/// 	FileType::Ape,
	/// 	"track.ape",
	/// 	FileProperties::default(),
	/// 	taglet::ape::ApeTag::new_boxed,
	/// );
	///
	/// let err = file.get("Title").unwrap_err();
	/// assert!(matches!(err.kind(), ErrorKind::MissingKey(_)));
	/// ```
	pub fn get(&self, key: &str) -> Result<&ItemValue> {
		match &self.tag {
			Some(tag) => tag.try_get(key),
			None => Err(TagletError::missing_key(key)),
		}
	}

	/// Stores `value` under `key`, creating the tag store first if the file is untagged
	///
	/// # Errors
	///
	/// The tag format rejects the key or value, see [`TagContainer::insert`]
	pub fn insert(&mut self, key: &str, value: ItemValue) -> Result<Option<ItemValue>> {
		if self.tag.is_none() {
			self.add_tags()?;
		}

		match self.tag.as_mut() {
			Some(tag) => tag.insert(key, value),
			None => err!(NoTags),
		}
	}

	/// Creates an empty tag store for an untagged file
	///
	/// # Errors
	///
	/// [`ErrorKind::TagAlreadyExists`] if the file already has a tag store
	pub fn add_tags(&mut self) -> Result<&mut dyn TagContainer> {
		if self.tag.is_some() {
			err!(TagAlreadyExists);
		}

		let tag = (self.new_tag)();
		log::debug!(
			"Creating an empty {:?} tag for `{}`",
			tag.tag_type(),
			self.path.display()
		);

		Ok(&mut **self.tag.insert(tag))
	}

	/// Removes the value stored under `key`
	///
	/// # Errors
	///
	/// [`ErrorKind::MissingKey`] if the file is untagged, or `key` is absent
	pub fn remove(&mut self, key: &str) -> Result<ItemValue> {
		self.tag
			.as_mut()
			.and_then(|tag| tag.remove(key))
			.ok_or_else(|| TagletError::missing_key(key))
	}

	/// Returns all present keys, or nothing if the file is untagged
	pub fn keys(&self) -> Vec<&str> {
		match &self.tag {
			Some(tag) => tag.keys(),
			None => Vec::new(),
		}
	}

	/// Saves the tag to [`MediaFile::path`], using the default [`WriteOptions`]
	///
	/// # Errors
	///
	/// See [`MediaFile::save_with`]
	pub fn save(&self) -> Result<()> {
		self.save_with(WriteOptions::default())
	}

	/// Saves the tag to [`MediaFile::path`]
	///
	/// # Errors
	///
	/// * [`ErrorKind::NoTags`] if the file is untagged, before the file is touched
	/// * See [`TagContainer::save_to_path`]
	pub fn save_with(&self, write_options: WriteOptions) -> Result<()> {
		self.save_tag(&self.path, write_options)
	}

	/// Saves the tag to a different path
	///
	/// # Errors
	///
	/// See [`MediaFile::save_with`]
	#[deprecated(note = "save to `MediaFile::path()` and reload the file from its new location")]
	pub fn save_to_path<P>(&self, path: P) -> Result<()>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();
		log::warn!(
			"MediaFile::save_to_path(\"{}\") is deprecated, reload the file instead",
			path.display()
		);

		self.save_tag(path, WriteOptions::default())
	}

	fn save_tag(&self, path: &Path, write_options: WriteOptions) -> Result<()> {
		let Some(tag) = &self.tag else {
			return Err(TagletError::new(ErrorKind::NoTags));
		};

		log::debug!("Saving {:?} tag to `{}`", tag.tag_type(), path.display());
		tag.save_to_path(path, write_options)
	}

	/// Strips the tag from [`MediaFile::path`]
	///
	/// The in-memory tag store is kept, but emptied. Untagged files are left untouched.
	///
	/// # Errors
	///
	/// See [`TagContainer::remove_from_path`]
	pub fn delete(&mut self) -> Result<()> {
		let path = self.path.clone();
		self.delete_tag(&path)
	}

	/// Strips the tag from a different path
	///
	/// # Errors
	///
	/// See [`MediaFile::delete`]
	#[deprecated(note = "delete from `MediaFile::path()` and reload the file from its new location")]
	pub fn delete_from_path<P>(&mut self, path: P) -> Result<()>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();
		log::warn!(
			"MediaFile::delete_from_path(\"{}\") is deprecated, reload the file instead",
			path.display()
		);

		self.delete_tag(path)
	}

	fn delete_tag(&mut self, path: &Path) -> Result<()> {
		match self.tag.as_mut() {
			Some(tag) => tag.remove_from_path(path),
			None => Ok(()),
		}
	}

	/// A human readable summary of the stream info, followed by the tag's items
	pub fn pretty_print(&self) -> String {
		let mut out = self.info.pretty_print();

		let tags = self.tag.as_ref().and_then(|tag| tag.pretty_print());
		if let Some(tags) = tags.filter(|tags| !tags.is_empty()) {
			out.push('\n');
			out.push_str(&tags);
		}

		out
	}
}
