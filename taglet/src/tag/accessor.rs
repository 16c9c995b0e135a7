use crate::error::Result;
use crate::tag::{ItemValue, TagContainer};

// This defines the `Accessor` trait, a set of convenience methods for commonly accessed items.
//
// Both reference formats match keys case-insensitively, so one key per accessor is enough.
//
// Usage:
//
// accessor_trait! {
//     [field_name] => "Key",
// }
//
// Multi-segment names are separated by spaces: [track number] => "Track"
macro_rules! accessor_trait {
	($([$($name:tt)+] => $key:literal),+ $(,)?) => {
		/// Provides accessors for common items
		///
		/// This is implemented for every [`TagContainer`]. Setters **overwrite** any existing value,
		/// use [`TagContainer::insert`] directly for multi-valued items.
		///
		/// # Examples
		///
		/// ```rust
		/// use taglet::ape::ApeTag;
		/// use taglet::tag::Accessor;
		///
		/// # fn main() -> taglet::error::Result<()> {
		/// let mut tag = ApeTag::new();
		/// tag.set_title("Foo title")?;
		///
		/// assert_eq!(tag.title(), Some("Foo title"));
		/// # Ok(()) }
		/// ```
		pub trait Accessor: TagContainer {
			$(
				accessor_trait! { @METHODS [$($name)+] $key }
			)+
		}
	};
	(@METHODS [$name:tt $($other:tt)*] $key:literal) => {
		paste::paste! {
			#[doc = "Returns the " $name $(" " $other)* ", stored under `" $key "`."]
			fn [<$name $(_ $other)*>](&self) -> Option<&str> {
				self.get($key).and_then(ItemValue::text)
			}

			#[doc = "Sets the " $name $(" " $other)* "."]
			///
			/// # Errors
			///
			/// The tag format cannot store the value
			fn [<set_ $name $(_ $other)*>](&mut self, value: &str) -> Result<()> {
				self.insert($key, ItemValue::from(value)).map(|_| ())
			}

			#[doc = "Removes the " $name $(" " $other)* "."]
			fn [<remove_ $name $(_ $other)*>](&mut self) {
				let _ = self.remove($key);
			}
		}
	};
}

accessor_trait! {
	[title]        => "Title",
	[artist]       => "Artist",
	[album]        => "Album",
	[genre]        => "Genre",
	[comment]      => "Comment",
	[year]         => "Year",
	[track number] => "Track",
}

impl<T> Accessor for T where T: TagContainer + ?Sized {}

#[cfg(test)]
mod tests {
	use crate::ape::ApeTag;
	use crate::id3::v1::Id3v1Tag;
	use crate::tag::{Accessor, TagContainer};

	#[test_log::test]
	fn accessors_work_across_formats() {
		let mut tags: Vec<Box<dyn TagContainer>> =
			vec![Box::new(ApeTag::new()), Box::new(Id3v1Tag::new())];

		for tag in &mut tags {
			tag.set_title("Foo title").unwrap();
			tag.set_track_number("3").unwrap();

			assert_eq!(tag.title(), Some("Foo title"));
			assert_eq!(tag.track_number(), Some("3"));

			tag.remove_title();
			assert_eq!(tag.title(), None);
		}
	}
}
