//! Generic audio properties
//!
//! Every format handler exposes its stream information through [`StreamInfo`]. Handlers with
//! nothing format-specific to report can hand out a [`FileProperties`] directly.

mod file_properties;

pub use file_properties::FileProperties;

use std::fmt::Debug;

/// Read-only information about the audio stream of a file
pub trait StreamInfo: Debug + Send + Sync {
	/// The format-independent view of the stream
	fn properties(&self) -> FileProperties;

	/// A one-line human readable summary of the stream
	///
	/// The default lists the generic [`FileProperties`].
	fn pretty_print(&self) -> String {
		self.properties().summary()
	}
}

impl StreamInfo for FileProperties {
	fn properties(&self) -> FileProperties {
		self.clone()
	}
}
