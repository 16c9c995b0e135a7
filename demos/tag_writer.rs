#![allow(missing_docs)]

use taglet::config::WriteOptions;
use taglet::prelude::*;
use taglet::probe::Probe;

use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(name = "tag_writer", about = "A simple tag writer example")]
struct Opt {
	#[structopt(short, long)]
	title: Option<String>,

	#[structopt(short, long)]
	artist: Option<String>,

	#[structopt(short = "A", long)]
	album: Option<String>,

	#[structopt(short, long)]
	genre: Option<String>,

	/// Overwrite APE items flagged as read only
	#[structopt(long)]
	force: bool,

	/// Strip the tag from the file instead of writing it
	#[structopt(short, long)]
	delete: bool,

	#[structopt(parse(from_os_str))]
	path: PathBuf,
}

fn main() {
	env_logger::init();

	let opt = Opt::from_args();

	if let Opt {
		title: None,
		artist: None,
		album: None,
		genre: None,
		delete: false,
		..
	} = opt
	{
		eprintln!("ERROR: No options provided!");
		std::process::exit(1);
	}

	let Some(mut media_file) = Probe::new(&opt.path)
		.read()
		.expect("ERROR: Failed to read file!")
	else {
		eprintln!("ERROR: Unknown format");
		std::process::exit(1);
	};

	if opt.delete {
		media_file.delete().expect("ERROR: Failed to strip the tag!");
		println!("INFO: Tag successfully removed!");
		return;
	}

	if !media_file.has_tags() {
		eprintln!(
			"WARN: No tags found, creating a new tag of type `{:?}`",
			media_file.file_type().primary_tag_type()
		);
	}

	let fields = [
		("Title", opt.title),
		("Artist", opt.artist),
		("Album", opt.album),
		("Genre", opt.genre),
	];

	for (key, value) in fields {
		if let Some(value) = value {
			media_file
				.insert(key, ItemValue::from(value))
				.expect("ERROR: Invalid value!");
		}
	}

	media_file
		.save_with(WriteOptions::new().respect_read_only(!opt.force))
		.expect("ERROR: Failed to write the tag!");

	println!("INFO: Tag successfully updated!");
}
