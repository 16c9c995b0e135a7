//! Helpers for reading and rewriting file-like objects

use crate::error::Result;

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::ops::Range;
use std::path::Path;

use tempfile::NamedTempFile;

/// A readable and seekable stream, usable as a trait object
pub trait SeekRead: Read + Seek {}

impl<T> SeekRead for T where T: Read + Seek {}

// TODO: https://github.com/rust-lang/rust/issues/59359
pub(crate) trait SeekStreamLen: Seek {
	fn stream_len_hack(&mut self) -> Result<u64> {
		let current_pos = self.stream_position()?;
		let len = self.seek(SeekFrom::End(0))?;

		self.seek(SeekFrom::Start(current_pos))?;

		Ok(len)
	}
}

impl<T> SeekStreamLen for T where T: Seek + ?Sized {}

/// Replace `region` of the file at `path` with `replacement`
///
/// The new contents are assembled in a temporary file next to the target, which is then
/// renamed over it. The original is never modified in place, so a failure at any point
/// leaves it intact.
///
/// Replacing an empty region with nothing leaves the file untouched.
pub(crate) fn rewrite_region(path: &Path, region: Range<u64>, replacement: &[u8]) -> Result<()> {
	if region.is_empty() && replacement.is_empty() {
		log::debug!("Nothing to rewrite in `{}`", path.display());
		return Ok(());
	}

	let mut original = File::open(path)?;
	let metadata = original.metadata()?;
	let file_len = metadata.len();

	let start = region.start.min(file_len);
	let end = region.end.clamp(start, file_len);

	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	let mut temp = NamedTempFile::new_in(dir)?;
	{
		let out = temp.as_file_mut();

		io::copy(&mut (&mut original).take(start), out)?;
		out.write_all(replacement)?;

		original.seek(SeekFrom::Start(end))?;
		io::copy(&mut original, out)?;

		out.flush()?;
	}

	drop(original);
	fs::set_permissions(temp.path(), metadata.permissions())?;

	log::debug!(
		"Rewriting `{}`: replacing bytes {start}..{end} with {} new bytes",
		path.display(),
		replacement.len()
	);

	temp.persist(path)?;
	Ok(())
}
