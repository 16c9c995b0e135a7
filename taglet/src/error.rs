//! Contains the errors that can arise within taglet
//!
//! The primary error is [`TagletError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use crate::file::FileType;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, TagletError>`
pub type Result<T> = std::result::Result<T, TagletError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Key/value access
	/// The requested key is not present, or the file has no tag at all
	MissingKey(String),
	/// The tag format has no place to store the given key
	UnsupportedKey(String),
	/// The value cannot be stored under the given key
	InvalidValue(&'static str),

	// Usage errors
	/// Attempted to save a file that has no tag store
	NoTags,
	/// Attempted to create a tag store on a file that already has one
	TagAlreadyExists,

	// File data related errors
	/// Attempting to read/write an abnormally large amount of data
	TooMuchData,
	/// Expected the data to be a different size than provided
	///
	/// This occurs when the size of an item is written as one value, but that size is either too
	/// big or small to be valid within the bounds of that item.
	SizeMismatch,
	/// Errors that occur while decoding a file
	FileDecoding(FileDecodingError),
	/// Errors that occur while encoding a file
	FileEncoding(FileEncodingError),
	/// Errors that arise while decoding text
	TextDecode(&'static str),
	/// Errors that arise while encoding text
	TextEncode(&'static str),

	// Conversions for external errors
	/// Unable to convert bytes to a String
	StringFromUtf8(std::string::FromUtf8Error),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// An error that arises while decoding a file
pub struct FileDecodingError {
	format: Option<FileType>,
	description: &'static str,
}

impl FileDecodingError {
	/// Create a `FileDecodingError` from a [`FileType`] and description
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::error::FileDecodingError;
	/// use taglet::file::FileType;
	///
	/// let ape_error = FileDecodingError::new(FileType::Ape, "Invalid descriptor");
	/// assert_eq!(ape_error.format(), Some(FileType::Ape));
	/// ```
	#[must_use]
	pub const fn new(format: FileType, description: &'static str) -> Self {
		Self {
			format: Some(format),
			description,
		}
	}

	/// Create a `FileDecodingError` without binding it to a [`FileType`]
	pub fn from_description(description: &'static str) -> Self {
		Self {
			format: None,
			description,
		}
	}

	/// Returns the associated [`FileType`], if one exists
	pub fn format(&self) -> Option<FileType> {
		self.format
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(format) = self.format {
			write!(f, "{:?}: {:?}", format, self.description)
		} else {
			write!(f, "{:?}", self.description)
		}
	}
}

impl Display for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(format) = self.format {
			write!(f, "{:?}: {}", format, self.description)
		} else {
			write!(f, "{}", self.description)
		}
	}
}

/// An error that arises while encoding a file
pub struct FileEncodingError {
	format: Option<FileType>,
	description: &'static str,
}

impl FileEncodingError {
	/// Create a `FileEncodingError` from a [`FileType`] and description
	#[must_use]
	pub const fn new(format: FileType, description: &'static str) -> Self {
		Self {
			format: Some(format),
			description,
		}
	}

	/// Create a `FileEncodingError` without binding it to a [`FileType`]
	pub fn from_description(description: &'static str) -> Self {
		Self {
			format: None,
			description,
		}
	}

	/// Returns the associated [`FileType`], if one exists
	pub fn format(&self) -> Option<FileType> {
		self.format
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for FileEncodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(format) = self.format {
			write!(f, "{:?}: {:?}", format, self.description)
		} else {
			write!(f, "{:?}", self.description)
		}
	}
}

impl Display for FileEncodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(format) = self.format {
			write!(f, "{:?}: {}", format, self.description)
		} else {
			write!(f, "{}", self.description)
		}
	}
}

/// Errors that could occur within taglet
pub struct TagletError {
	pub(crate) kind: ErrorKind,
}

impl TagletError {
	/// Create a `TagletError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::error::{ErrorKind, TagletError};
	///
	/// let no_tags = TagletError::new(ErrorKind::NoTags);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::error::{ErrorKind, TagletError};
	///
	/// let missing = TagletError::new(ErrorKind::MissingKey(String::from("title")));
	/// if let ErrorKind::MissingKey(key) = missing.kind() {
	/// 	println!("No value for `{key}`");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	pub(crate) fn missing_key(key: &str) -> Self {
		Self::new(ErrorKind::MissingKey(key.to_owned()))
	}
}

impl std::error::Error for TagletError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self.kind {
			ErrorKind::Io(ref err) => Some(err),
			ErrorKind::StringFromUtf8(ref err) => Some(err),
			ErrorKind::Alloc(ref err) => Some(err),
			_ => None,
		}
	}
}

impl Debug for TagletError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<FileDecodingError> for TagletError {
	fn from(input: FileDecodingError) -> Self {
		Self {
			kind: ErrorKind::FileDecoding(input),
		}
	}
}

impl From<FileEncodingError> for TagletError {
	fn from(input: FileEncodingError) -> Self {
		Self {
			kind: ErrorKind::FileEncoding(input),
		}
	}
}

impl From<std::io::Error> for TagletError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<tempfile::PersistError> for TagletError {
	fn from(input: tempfile::PersistError) -> Self {
		Self {
			kind: ErrorKind::Io(input.error),
		}
	}
}

impl From<std::string::FromUtf8Error> for TagletError {
	fn from(input: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(input),
		}
	}
}

impl From<TryReserveError> for TagletError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl Display for TagletError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::StringFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::MissingKey(ref key) => write!(f, "No value found for key `{key}`"),
			ErrorKind::UnsupportedKey(ref key) => {
				write!(f, "The tag format cannot store the key `{key}`")
			},
			ErrorKind::InvalidValue(message) => write!(f, "Invalid value: {message}"),
			ErrorKind::NoTags => write!(f, "no tags in file"),
			ErrorKind::TagAlreadyExists => write!(f, "the file already has a tag"),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::TextEncode(message) => write!(f, "Text encoding: {message}"),

			// Files
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
			ErrorKind::SizeMismatch => write!(
				f,
				"Encountered an invalid item size, either too big or too small to be valid"
			),
			ErrorKind::FileDecoding(ref file_decode_err) => write!(f, "{file_decode_err}"),
			ErrorKind::FileEncoding(ref file_encode_err) => write!(f, "{file_encode_err}"),
		}
	}
}
