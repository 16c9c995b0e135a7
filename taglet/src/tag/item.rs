use std::fmt::{Display, Formatter};

/// The value of a single tag item
///
/// Single and multi-valued text share one shape: a list of strings. Formats that can only hold
/// one value reject lists with more than one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemValue {
	/// One or more UTF-8 strings
	Text(Vec<String>),
	/// One or more locators (URLs, file paths)
	Locator(Vec<String>),
	/// Opaque binary data
	Binary(Vec<u8>),
}

impl ItemValue {
	/// Returns the first text value, if this is a text item
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::tag::ItemValue;
	///
	/// let value = ItemValue::from(vec!["Foo", "Bar"]);
	/// assert_eq!(value.text(), Some("Foo"));
	/// assert_eq!(ItemValue::Binary(vec![1, 2]).text(), None);
	/// ```
	pub fn text(&self) -> Option<&str> {
		match self {
			Self::Text(values) => values.first().map(String::as_str),
			_ => None,
		}
	}

	/// Returns all text or locator values
	pub fn values(&self) -> Option<&[String]> {
		match self {
			Self::Text(values) | Self::Locator(values) => Some(values),
			Self::Binary(_) => None,
		}
	}

	/// Returns the binary content, if this is a binary item
	pub fn binary(&self) -> Option<&[u8]> {
		match self {
			Self::Binary(data) => Some(data),
			_ => None,
		}
	}

	/// Whether the value holds no data
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Text(values) | Self::Locator(values) => values.iter().all(String::is_empty),
			Self::Binary(data) => data.is_empty(),
		}
	}
}

impl Display for ItemValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Text(values) | Self::Locator(values) => write!(f, "{}", values.join(" / ")),
			Self::Binary(data) => write!(f, "[{} bytes]", data.len()),
		}
	}
}

impl From<&str> for ItemValue {
	fn from(value: &str) -> Self {
		Self::Text(vec![value.to_owned()])
	}
}

impl From<String> for ItemValue {
	fn from(value: String) -> Self {
		Self::Text(vec![value])
	}
}

impl From<Vec<String>> for ItemValue {
	fn from(values: Vec<String>) -> Self {
		Self::Text(values)
	}
}

impl From<Vec<&str>> for ItemValue {
	fn from(values: Vec<&str>) -> Self {
		Self::Text(values.into_iter().map(str::to_owned).collect())
	}
}

impl From<&[u8]> for ItemValue {
	fn from(data: &[u8]) -> Self {
		Self::Binary(data.to_vec())
	}
}

#[cfg(test)]
mod tests {
	use super::ItemValue;

	#[test_log::test]
	fn display() {
		assert_eq!(ItemValue::from("Foo").to_string(), "Foo");
		assert_eq!(ItemValue::from(vec!["Foo", "Bar"]).to_string(), "Foo / Bar");
		assert_eq!(ItemValue::Binary(vec![0; 4]).to_string(), "[4 bytes]");
	}

	#[test_log::test]
	fn emptiness() {
		assert!(ItemValue::from("").is_empty());
		assert!(ItemValue::Text(Vec::new()).is_empty());
		assert!(!ItemValue::Locator(vec![String::from("http://example.com")]).is_empty());
	}
}
