//! `ufs_read` extracts a V7-style Unix filesystem image into a local
//! directory tree.

use std::env;
use std::path::Path;
use std::path::PathBuf;
use std::process::exit;

use ufs_read::image::Image;
use ufs_read::inode;
use ufs_read::partition;
use ufs_read::superblock;
use ufs_read::walker::Walker;
use utils::util::ByteSize;

/// Root directory inode; reserved inode 1 is never used for a file.
const ROOT_INO: u32 = 2;

struct Args {
	prog: String,
	partition_arg: Option<String>,
	image_path: PathBuf,
	output_dir: PathBuf,
	help: bool,
}

fn parse_args() -> Args {
	let mut iter = env::args();
	let prog = iter.next().unwrap_or_else(|| "ufs_read".to_owned());

	let mut args = Args {
		prog,
		partition_arg: None,
		image_path: PathBuf::from("callan.img"),
		output_dir: PathBuf::from("."),
		help: false,
	};

	while let Some(arg) = iter.next() {
		match arg.as_str() {
			"-h" | "--help" => args.help = true,
			"-i" | "--image" => {
				if let Some(path) = iter.next() {
					args.image_path = PathBuf::from(path);
				} else {
					eprintln!("{}: -i requires a path", args.prog);
					print_usage(&args.prog);
					exit(1);
				}
			}
			"-o" | "--output" => {
				if let Some(path) = iter.next() {
					args.output_dir = PathBuf::from(path);
				} else {
					eprintln!("{}: -o requires a path", args.prog);
					print_usage(&args.prog);
					exit(1);
				}
			}
			_ if args.partition_arg.is_none() => args.partition_arg = Some(arg),
			_ => {
				eprintln!("{}: unexpected argument `{}`", args.prog, arg);
				print_usage(&args.prog);
				exit(1);
			}
		}
	}

	args
}

fn print_usage(prog: &str) {
	eprintln!();
	eprintln!("Usage: {prog} [-h] [-i IMAGE] [-o OUTDIR] [root|usr]");
	eprintln!();
	eprintln!("Extracts a V7 Unix filesystem partition from a Callan disk image.");
	eprintln!("First character `b`/`B` of the partition argument selects `usr`;");
	eprintln!("anything else (or no argument) selects `root`.");
}

fn main() {
	let args = parse_args();

	if args.help {
		print_usage(&args.prog);
		exit(0);
	}

	let partition = partition::select(args.partition_arg.as_deref());

	let mut image = Image::open(&args.image_path, partition).unwrap_or_else(|e| {
		eprintln!("{}: {}: {}", args.prog, args.image_path.display(), e);
		exit(1);
	});

	let sb = superblock::read(&mut image).unwrap_or_else(|e| {
		eprintln!("{}: cannot read superblock: {}", args.prog, e);
		exit(1);
	});
	println!(
		"superblock: isize={} fsize={} time={}",
		sb.isize_blocks, sb.fsize_blocks, sb.time
	);

	let root = inode::load(&mut image, ROOT_INO).unwrap_or_else(|e| {
		eprintln!("{}: cannot load root inode: {}", args.prog, e);
		exit(1);
	});

	let out_dir: &Path = &args.output_dir;
	let top = out_dir.join(partition.name);

	let mut walker = Walker::new(&mut image);
	if let Err(e) = walker.walk(&root, &top, partition.name) {
		eprintln!("{}: {}", args.prog, e);
		exit(1);
	}

	if let Some(path) = &walker.stats.biggest_path {
		println!(
			"largest file: {} ({})",
			path.display(),
			ByteSize(walker.stats.biggest_size as u64)
		);
	}
}
