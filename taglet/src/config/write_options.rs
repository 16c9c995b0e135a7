/// Options to control how taglet writes to a file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) respect_read_only: bool,
	pub(crate) lossy_text_encoding: bool,
}

impl WriteOptions {
	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			respect_read_only: true,
			lossy_text_encoding: true,
		}
	}

	/// Whether to respect read-only tag items
	///
	/// Some tag formats allow for items to be marked as read-only. If set to `true`, taglet
	/// writes those items back exactly as they are on disk, even if they were edited or removed
	/// in the in-memory tag.
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::config::WriteOptions;
	///
	/// // I don't care about read-only items, I want to write my new items!
	/// let options = WriteOptions::new().respect_read_only(false);
	/// ```
	pub fn respect_read_only(mut self, respect_read_only: bool) -> Self {
		self.respect_read_only = respect_read_only;
		self
	}

	/// Whether to replace characters that cannot be encoded
	///
	/// Formats limited to Latin-1 (ID3v1) cannot store every character. When `true`, any
	/// such character is written as `?`. When `false`, encoding fails with
	/// [`ErrorKind::TextEncode`](crate::error::ErrorKind::TextEncode).
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::config::WriteOptions;
	///
	/// let options = WriteOptions::new().lossy_text_encoding(false);
	/// ```
	pub fn lossy_text_encoding(mut self, lossy_text_encoding: bool) -> Self {
		self.lossy_text_encoding = lossy_text_encoding;
		self
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	respect_read_only: true,
	/// 	lossy_text_encoding: true,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
