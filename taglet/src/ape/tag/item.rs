use crate::ape::constants::INVALID_KEYS;
use crate::error::{ErrorKind, Result, TagletError};
use crate::macros::err;
use crate::tag::ItemValue;

/// Represents an `APE` tag item
///
/// The restrictions for `APE` lie in the key rather than the value,
/// so these are still able to use [`ItemValue`]s
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ApeItem {
	/// Whether or not to mark the item as read only
	pub read_only: bool,
	pub(crate) key: String,
	pub(crate) value: ItemValue,
}

impl ApeItem {
	/// Create an [`ApeItem`]
	///
	/// # Errors
	///
	/// * [`ErrorKind::UnsupportedKey`]: `key` is illegal. It must be 2 to 255 printable ASCII
	///   characters, and not one of `ID3`, `TAG`, `OGGS` or `MP+`
	/// * [`ErrorKind::InvalidValue`]: `value` has no entries, a text entry contains a NUL, or a
	///   list of several entries ends with an empty one
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::ape::ApeItem;
	/// use taglet::tag::ItemValue;
	///
	/// assert!(ApeItem::new(String::from("Artist"), ItemValue::from("Foo")).is_ok());
	/// assert!(ApeItem::new(String::from("TAG"), ItemValue::from("Foo")).is_err());
	/// ```
	pub fn new(key: String, value: ItemValue) -> Result<Self> {
		if !is_valid_key(&key) {
			return Err(TagletError::new(ErrorKind::UnsupportedKey(key)));
		}

		match &value {
			ItemValue::Text(values) | ItemValue::Locator(values) => {
				if values.is_empty() {
					err!(InvalidValue("APE items need at least one value"));
				}

				if values.iter().any(|v| v.contains('\0')) {
					err!(InvalidValue("APE text values cannot contain NUL characters"));
				}

				// Trailing separators are indistinguishable from padding once written
				if values.len() > 1 && values.last().is_some_and(String::is_empty) {
					err!(InvalidValue("APE multi-values cannot end with an empty value"));
				}
			},
			ItemValue::Binary(_) => {},
		}

		Ok(Self {
			read_only: false,
			key,
			value,
		})
	}

	/// Returns the item key
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Returns the item value
	pub fn value(&self) -> &ItemValue {
		&self.value
	}

	pub(crate) fn matches(&self, key: &str) -> bool {
		self.key.eq_ignore_ascii_case(key)
	}
}

pub(crate) fn is_valid_key(key: &str) -> bool {
	(2..=255).contains(&key.len())
		&& key.bytes().all(|b| (0x20..=0x7E).contains(&b))
		&& !INVALID_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}
