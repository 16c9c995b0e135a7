//! Format-agnostic file parsing tools

use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::MediaFile;
use crate::resolve::{FileResolver, default_resolvers};

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A format agnostic file opener
///
/// `Probe` reads a short header from the file, asks each candidate [`FileResolver`] how
/// likely it is to own the file, and opens the file with the best one.
///
/// * The highest score wins. When several candidates share it, the last one in the list wins.
/// * A best score of `0` means no candidate recognized the file, and nothing is opened.
/// * Errors from the winning candidate are returned as is, there is no fallback to the runner-up.
///
/// # Examples
///
/// ```rust,no_run
/// use taglet::probe::Probe;
///
/// # fn main() -> taglet::error::Result<()> {
/// match Probe::new("path/to/my.mp3").read()? {
/// 	Some(file) => println!("{}", file.pretty_print()),
/// 	None => println!("Unknown format"),
/// }
/// # Ok(()) }
/// ```
pub struct Probe<'a> {
	path: PathBuf,
	resolvers: Option<Vec<&'a dyn FileResolver>>,
	options: Option<ParseOptions>,
}

/// The outcome of sniffing a file, see [`Probe::guess`]
#[derive(Clone, Copy)]
pub struct Guess<'a> {
	resolver: &'a dyn FileResolver,
	index: usize,
	score: u32,
}

impl<'a> Guess<'a> {
	/// The winning candidate
	pub fn resolver(&self) -> &'a dyn FileResolver {
		self.resolver
	}

	/// The winning candidate's name
	pub fn name(&self) -> &'static str {
		self.resolver.name()
	}

	/// The winning candidate's position in the candidate list
	pub fn index(&self) -> usize {
		self.index
	}

	/// The winning score, always greater than `0`
	pub fn score(&self) -> u32 {
		self.score
	}
}

impl std::fmt::Debug for Guess<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Guess")
			.field("resolver", &self.name())
			.field("index", &self.index)
			.field("score", &self.score)
			.finish()
	}
}

impl<'a> Probe<'a> {
	/// The maximum number of bytes handed to [`FileResolver::score`]
	pub const HEADER_LEN: usize = 128;

	/// Create a new `Probe` for the file at `path`
	///
	/// Unless [`Probe::resolvers`] is used, the candidates are [`default_resolvers()`].
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::probe::Probe;
	///
	/// let probe = Probe::new("path/to/my.ape");
	/// ```
	pub fn new<P>(path: P) -> Self
	where
		P: AsRef<Path>,
	{
		Self {
			path: path.as_ref().to_path_buf(),
			resolvers: None,
			options: None,
		}
	}

	/// Set the ordered list of candidates
	///
	/// An empty list never resolves a file.
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::ape::ApeResolver;
	/// use taglet::probe::Probe;
	///
	/// // Only consider Monkey's Audio files
	/// let probe = Probe::new("path/to/my.ape").resolvers(vec![&ApeResolver]);
	/// ```
	pub fn resolvers(mut self, resolvers: Vec<&'a dyn FileResolver>) -> Self {
		self.resolvers = Some(resolvers);
		self
	}

	/// Set the [`ParseOptions`] handed to the winning candidate
	///
	/// # Examples
	///
	/// ```rust
	/// use taglet::config::{ParseOptions, ParsingMode};
	/// use taglet::probe::Probe;
	///
	/// let options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// let probe = Probe::new("path/to/my.mp3").options(options);
	/// ```
	pub fn options(mut self, options: ParseOptions) -> Self {
		self.options = Some(options);
		self
	}

	/// The path being probed
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Determine which candidate owns the file, without opening it
	///
	/// # Errors
	///
	/// The header could not be read
	pub fn guess(&self) -> Result<Option<Guess<'a>>> {
		let resolvers: Vec<&'a dyn FileResolver> = match &self.resolvers {
			Some(resolvers) => resolvers.clone(),
			None => default_resolvers(),
		};

		if resolvers.is_empty() {
			log::debug!("Probe: No candidates to check `{}` against", self.path.display());
			return Ok(None);
		}

		let header = self.read_header()?;
		Ok(select(&resolvers, &self.path, &header))
	}

	/// Attempts to read the file with the best matching candidate
	///
	/// Returns `None` if no candidate recognized the file.
	///
	/// # Errors
	///
	/// * The header could not be read
	/// * The winning candidate failed to read the file
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use taglet::probe::Probe;
	///
	/// # fn main() -> taglet::error::Result<()> {
	/// let file = Probe::new("path/to/my.mp3").read()?;
	/// # Ok(()) }
	/// ```
	pub fn read(self) -> Result<Option<MediaFile>> {
		let Some(guess) = self.guess()? else {
			return Ok(None);
		};

		log::debug!(
			"Probe: Opening `{}` with `{}`",
			self.path.display(),
			guess.name()
		);

		let options = self.options.unwrap_or_default();
		guess.resolver.open(&self.path, options).map(Some)
	}

	fn read_header(&self) -> Result<Vec<u8>> {
		log::debug!("Probe: Opening `{}` for reading", self.path.display());

		// The handle is dropped before any candidate sees the header
		let file = File::open(&self.path)?;

		let mut header = Vec::with_capacity(Self::HEADER_LEN);
		file.take(Self::HEADER_LEN as u64).read_to_end(&mut header)?;

		log::debug!("Probe: Read {} header bytes", header.len());
		Ok(header)
	}
}

/// Read a [`MediaFile`] from a path
///
/// This uses the default candidates, see [`default_resolvers`].
///
/// # Errors
///
/// See [`Probe::read`]
///
/// # Examples
///
/// ```rust,no_run
/// # fn main() -> taglet::error::Result<()> {
/// let path = "path/to/my.mp3";
///
/// if let Some(file) = taglet::read_from_path(path)? {
/// 	println!("{}", file.pretty_print());
/// }
/// # Ok(()) }
/// ```
pub fn read_from_path<P>(path: P) -> Result<Option<MediaFile>>
where
	P: AsRef<Path>,
{
	Probe::new(path.as_ref()).read()
}

fn select<'a>(resolvers: &[&'a dyn FileResolver], path: &Path, header: &[u8]) -> Option<Guess<'a>> {
	let (index, score) = resolvers
		.iter()
		.map(|resolver| {
			let score = resolver.score(path, header);
			log::debug!("Probe: `{}` scored {score}", resolver.name());
			score
		})
		.enumerate()
		// `max_by_key` returns the last of several equal maxima
		.max_by_key(|&(_, score)| score)?;

	if score == 0 {
		log::debug!("Probe: No candidate recognized `{}`", path.display());
		return None;
	}

	let guess = Guess {
		resolver: resolvers[index],
		index,
		score,
	};

	log::debug!("Probe: Guessed `{}` (score {score})", guess.name());
	Some(guess)
}

#[cfg(test)]
mod tests {
	use super::{Probe, select};
	use crate::config::ParseOptions;
	use crate::error::Result;
	use crate::file::{FileType, MediaFile};
	use crate::properties::FileProperties;
	use crate::resolve::FileResolver;

	use std::path::Path;

	struct Fixed(&'static str, u32);

	impl FileResolver for Fixed {
		fn name(&self) -> &'static str {
			self.0
		}

		fn score(&self, _path: &Path, _header: &[u8]) -> u32 {
			self.1
		}

		fn open(&self, path: &Path, _parse_options: ParseOptions) -> Result<MediaFile> {
			Ok(MediaFile::new(
				FileType::Custom(self.0),
				path,
				FileProperties::default(),
				crate::ape::ApeTag::new_boxed,
			))
		}
	}

	#[test_log::test]
	fn highest_score_wins() {
		let (a, b, c) = (Fixed("a", 1), Fixed("b", 3), Fixed("c", 2));
		let guess = select(&[&a, &b, &c], Path::new("x"), b"").unwrap();

		assert_eq!(guess.name(), "b");
		assert_eq!(guess.index(), 1);
		assert_eq!(guess.score(), 3);
	}

	#[test_log::test]
	fn later_candidate_wins_ties() {
		let (a, b, c) = (Fixed("a", 2), Fixed("b", 2), Fixed("c", 1));
		let guess = select(&[&a, &b, &c], Path::new("x"), b"").unwrap();

		assert_eq!(guess.name(), "b");
	}

	#[test_log::test]
	fn zero_scores_resolve_nothing() {
		let (a, b) = (Fixed("a", 0), Fixed("b", 0));
		assert!(select(&[&a, &b], Path::new("x"), b"").is_none());
		assert!(select(&[], Path::new("x"), b"").is_none());
	}

	#[test_log::test]
	fn empty_candidates_never_touch_the_file() {
		// The path doesn't exist, so any attempt to open it would be an error
		let probe = Probe::new("/this/path/does/not/exist.mp3").resolvers(Vec::new());
		assert!(probe.read().unwrap().is_none());
	}
}
