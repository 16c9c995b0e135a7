//! Format candidates, and tools to register custom ones
//!
//! A [`FileResolver`] is one entry in the list [`Probe`](crate::probe::Probe) sniffs a file
//! against. It scores a header prefix and, if it wins, opens the file.
//!
//! Candidates are ordered. Ties between equal scores go to the **later** candidate, so a
//! custom resolver registered with [`register_custom_resolver`] can take over a format from a
//! built-in one by scoring the same.

use crate::ape::ApeResolver;
use crate::config::{ParseOptions, global_options};
use crate::error::Result;
use crate::file::MediaFile;
use crate::mpeg::MpegResolver;

use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

/// A format candidate
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
///
/// use taglet::config::ParseOptions;
/// use taglet::error::Result;
/// use taglet::file::{FileType, MediaFile};
/// use taglet::properties::FileProperties;
/// use taglet::resolve::FileResolver;
///
/// struct MyResolver;
///
/// impl FileResolver for MyResolver {
/// 	fn name(&self) -> &'static str {
/// 		"MyFile"
/// 	}
///
/// 	fn score(&self, _path: &Path, header: &[u8]) -> u32 {
/// 		u32::from(header.starts_with(b"myfile"))
/// 	}
///
/// 	fn open(&self, path: &Path, _parse_options: ParseOptions) -> Result<MediaFile> {
/// 		Ok(MediaFile::new(
/// 			FileType::Custom("MyFile"),
/// 			path,
/// 			FileProperties::default(),
/// 			taglet::ape::ApeTag::new_boxed,
/// 		))
/// 	}
/// }
/// ```
pub trait FileResolver: Send + Sync {
	/// A unique name for the resolver
	fn name(&self) -> &'static str;

	/// How likely it is that this resolver handles the file
	///
	/// `header` holds up to the first [`Probe::HEADER_LEN`](crate::probe::Probe::HEADER_LEN)
	/// bytes of the file, fewer if the file is shorter. `0` means "not mine".
	fn score(&self, path: &Path, header: &[u8]) -> u32;

	/// Reads the file at `path`
	///
	/// # Errors
	///
	/// Any error while reading. It is handed back to the caller of the probe unchanged.
	fn open(&self, path: &Path, parse_options: ParseOptions) -> Result<MediaFile>;
}

pub(crate) static BUILTIN_RESOLVERS: &[&dyn FileResolver] = &[&MpegResolver, &ApeResolver];

fn custom_resolvers() -> &'static Mutex<Vec<&'static dyn FileResolver>> {
	static INSTANCE: OnceLock<Mutex<Vec<&'static dyn FileResolver>>> = OnceLock::new();
	INSTANCE.get_or_init(Default::default)
}

/// The candidates used when a [`Probe`](crate::probe::Probe) is not given any
///
/// These are the built-in resolvers (MPEG, then Monkey's Audio), followed by every custom
/// resolver in registration order if [`GlobalOptions::use_custom_resolvers`] is enabled.
///
/// [`GlobalOptions::use_custom_resolvers`]: crate::config::GlobalOptions::use_custom_resolvers
pub fn default_resolvers() -> Vec<&'static dyn FileResolver> {
	let mut resolvers = BUILTIN_RESOLVERS.to_vec();

	if global_options().use_custom_resolvers {
		let custom = custom_resolvers()
			.lock()
			.unwrap_or_else(PoisonError::into_inner);
		resolvers.extend(custom.iter().copied());
	}

	resolvers
}

/// Register a custom file resolver
///
/// The resolver is appended to the end of the candidate list.
///
/// # Panics
///
/// * A resolver with the same name is already registered
pub fn register_custom_resolver<T>(resolver: T)
where
	T: FileResolver + 'static,
{
	let name = resolver.name();

	let mut res = custom_resolvers()
		.lock()
		.unwrap_or_else(PoisonError::into_inner);
	if BUILTIN_RESOLVERS
		.iter()
		.chain(res.iter())
		.any(|r| r.name() == name)
	{
		drop(res);
		panic!("Resolver `{}` already exists!", name);
	}

	log::debug!("Registering custom resolver `{name}`");

	let b: Box<dyn FileResolver> = Box::new(resolver);
	res.push(Box::leak::<'static>(b));
}

/// Whether `path` has one of `extensions`, compared ASCII case-insensitively
pub fn extension_matches(path: &Path, extensions: &[&str]) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}
