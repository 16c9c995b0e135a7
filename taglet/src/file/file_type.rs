use crate::tag::TagType;

use std::ffi::OsStr;
use std::path::Path;

/// List of common audio extensions handled by the built-in resolvers
pub const EXTENSIONS: &[&str] = &[
	// Also update `FileType::from_ext()` below
	"ape", "mp3", "mp2", "mp1", "mpga",
];

/// The type of file read
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[allow(missing_docs)]
#[non_exhaustive]
pub enum FileType {
	Ape,
	Mpeg,
	/// A format handled by a custom resolver, identified by the resolver's name
	Custom(&'static str),
}

impl FileType {
	/// Returns the file type's "primary" [`TagType`], or the one most likely to be used in the target format
	///
	/// Custom file types have no known primary tag type.
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::file::FileType;
	/// use taglet::tag::TagType;
	///
	/// assert_eq!(FileType::Mpeg.primary_tag_type(), Some(TagType::Id3v1));
	/// ```
	pub fn primary_tag_type(&self) -> Option<TagType> {
		match self {
			FileType::Ape => Some(TagType::Ape),
			FileType::Mpeg => Some(TagType::Id3v1),
			FileType::Custom(_) => None,
		}
	}

	/// Attempts to extract a [`FileType`] from an extension
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::file::FileType;
	///
	/// let extension = "mp3";
	/// assert_eq!(FileType::from_ext(extension), Some(FileType::Mpeg));
	/// ```
	pub fn from_ext<E>(ext: E) -> Option<Self>
	where
		E: AsRef<OsStr>,
	{
		let ext = ext.as_ref().to_str()?.to_ascii_lowercase();

		match ext.as_str() {
			"ape" => Some(Self::Ape),
			"mp3" | "mp2" | "mp1" | "mpga" => Some(Self::Mpeg),
			_ => None,
		}
	}

	/// Attempts to determine a [`FileType`] from a path
	///
	/// # Examples
	///
	/// ```rust
	/// use std::path::Path;
	/// use taglet::file::FileType;
	///
	/// let path = Path::new("path/to/my.ApE");
	/// assert_eq!(FileType::from_path(path), Some(FileType::Ape));
	/// ```
	pub fn from_path<P>(path: P) -> Option<Self>
	where
		P: AsRef<Path>,
	{
		let ext = path.as_ref().extension();
		ext.and_then(Self::from_ext)
	}
}
