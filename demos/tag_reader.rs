#![allow(missing_docs)]

use taglet::prelude::*;
use taglet::probe::Probe;

use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(name = "tag_reader", about = "A simple tag reader example")]
struct Opt {
	/// Print every item, not just the common ones
	#[structopt(short, long)]
	all: bool,

	#[structopt(parse(from_os_str))]
	path: PathBuf,
}

fn main() {
	env_logger::init();

	let opt = Opt::from_args();

	if !opt.path.is_file() {
		eprintln!("ERROR: Path is not a file!");
		std::process::exit(1);
	}

	let Some(media_file) = Probe::new(&opt.path)
		.read()
		.expect("ERROR: Failed to read file!")
	else {
		eprintln!("ERROR: Unknown format");
		std::process::exit(1);
	};

	println!("--- Stream Information ---");
	println!("{}", media_file.info().pretty_print());

	let Some(tag) = media_file.tag() else {
		println!("--- No tags found ---");
		return;
	};

	println!("--- Tag Information ({:?}) ---", tag.tag_type());
	if opt.all {
		println!("{}", tag.pretty_print().unwrap_or_default());
		return;
	}

	println!("Title: {}", tag.title().unwrap_or("None"));
	println!("Artist: {}", tag.artist().unwrap_or("None"));
	println!("Album: {}", tag.album().unwrap_or("None"));
	println!("Genre: {}", tag.genre().unwrap_or("None"));
}
