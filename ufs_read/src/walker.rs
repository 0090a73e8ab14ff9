//! Tree Walker and File Materializer.
//!
//! Rather than migrating the process's working directory with `chdir`
//! (fragile under errors: one missed `chdir("..")` on an error path leaves
//! every subsequent sibling walked from the wrong place), the output
//! location is threaded through the recursion as an explicit `PathBuf`.
//! Each call frame owns its own path value, so a returning call can never
//! have perturbed its caller's notion of where it is.

use std::fs;
use std::fs::File;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;

use crate::dirent::DirIter;
use crate::error::Result;
use crate::error::UfsError;
use crate::image::Image;
use crate::image::BLOCK_SIZE;
use crate::inode::load;
use crate::inode::FileType;
use crate::inode::Inode;
use crate::links::LinkTracker;
use crate::links::Visit;

/// Mode new host directories are created with.
const DIR_MODE: u32 = 0o774;

/// Tracks the single biggest regular file seen during a walk, for the
/// closing summary line.
#[derive(Default)]
pub struct Stats {
	pub biggest_size: u32,
	pub biggest_path: Option<PathBuf>,
}

/// Extraction-wide state threaded through the recursive walk.
pub struct Walker<'a> {
	image: &'a mut Image,
	links: LinkTracker,
	pub stats: Stats,
}

impl<'a> Walker<'a> {
	pub fn new(image: &'a mut Image) -> Self {
		Self {
			image,
			links: LinkTracker::new(),
			stats: Stats::default(),
		}
	}

	/// Walks `inode` (which must be a directory), creating `out_dir` on
	/// the host and populating it. `image_path` is the image-relative
	/// path used purely for diagnostics.
	pub fn walk(&mut self, inode: &Inode, out_dir: &Path, image_path: &str) -> Result<()> {
		if !inode.is_directory() {
			return Err(UfsError::NotADirectory(inode.number));
		}

		create_host_dir(out_dir)?;

		check_bad_blocks(self.image, inode, image_path);

		// First pass: materialize every entry at this level.
		let mut children = Vec::new();
		let entries = collect_entries(self.image, inode)?;
		for entry in &entries {
			if entry.is_tombstone() || entry.name == "." || entry.name == ".." {
				continue;
			}

			let child = load(self.image, entry.inode)?;
			let child_image_path = format!("{image_path}/{}", entry.name);
			let child_out_path = out_dir.join(&entry.name);

			let type_code = match child.file_type {
				FileType::Directory => 'D',
				FileType::Regular => 'R',
				_ => '?',
			};
			println!(
				"{}\t{}\t{}\t{}\t{}",
				child.number, type_code, child.nlink, child.size, entry.name
			);

			// Resolve the link-tracker visit before materializing: a
			// non-canonical encounter of a regular file must not write
			// content at `child_out_path`, since the path is about to
			// become a symlink and `symlink()` refuses to replace an
			// existing file.
			let visit = if child.nlink > 1 {
				Some(self.links.visit(child.number, &child_out_path))
			} else {
				None
			};

			match child.file_type {
				FileType::Directory => {
					create_host_dir(&child_out_path)?;
					children.push((child, child_out_path.clone(), child_image_path.clone()));
				}
				FileType::Regular => {
					check_bad_blocks(self.image, &child, &child_image_path);
					if !matches!(visit, Some(Visit::Symlink { .. })) {
						materialize(self.image, &child, &child_out_path)?;
						if child.size > self.stats.biggest_size {
							self.stats.biggest_size = child.size;
							self.stats.biggest_path = Some(child_out_path.clone());
						}
					}
				}
				_ => {
					println!("SPECIAL {child_image_path}");
				}
			}

			if let Some(visit) = visit {
				match visit {
					Visit::Canonical => {}
					Visit::Symlink { canonical } => {
						let tag = match child.file_type {
							FileType::Directory => "DLINK",
							FileType::Regular => "FLINK",
							_ => "SLINK",
						};
						println!(
							"{tag} {} -> {}",
							child_out_path.display(),
							canonical.display()
						);
						emit_symlink(&canonical, &child_out_path);
					}
				}
			}
		}

		// Second pass: recurse into subdirectories only now that every
		// sibling directory at this level already exists on the host.
		for (child, child_out_path, child_image_path) in children {
			self.walk(&child, &child_out_path, &child_image_path)?;
		}

		Ok(())
	}
}

/// Reads every directory entry of `dir` up front so the first and second
/// passes see a consistent snapshot.
fn collect_entries(image: &mut Image, dir: &Inode) -> Result<Vec<crate::dirent::DirEntry>> {
	DirIter::new(image, dir).collect()
}

/// Creates a host directory with the fixed mode this tool always uses.
/// Already-exists is tolerated, since a directory may be re-entered
/// across runs (the tool is rerunnable); any other failure is fatal.
fn create_host_dir(path: &Path) -> Result<()> {
	match fs::create_dir(path) {
		Ok(()) => {}
		Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
		Err(e) => return Err(UfsError::Create(e)),
	}
	fs::set_permissions(path, fs::Permissions::from_mode(DIR_MODE)).map_err(UfsError::Create)
}

/// Logs a `BAD BLOCK` diagnostic, tagged with the owning path, for every
/// block in `inode`'s flattened list that falls in the suspect region.
/// Non-fatal: the caller still processes the inode.
fn check_bad_blocks(image: &Image, inode: &Inode, owning_path: &str) {
	for &block in &inode.blocks {
		if image.is_suspect(block) {
			println!("BAD BLOCK {block} in {owning_path}");
		}
	}
}

/// Creates a host symbolic link at `link_path` pointing at `target`. This
/// is how a hard-link-turned-symlink is actually materialized on the host
/// filesystem; the caller must not have created anything at `link_path`
/// already, or this fails with `AlreadyExists`.
fn emit_symlink(target: &Path, link_path: &Path) {
	if let Err(e) = std::os::unix::fs::symlink(target, link_path) {
		eprintln!("ufs_read: warning: cannot create symlink {}: {e}", link_path.display());
	}
}

/// Copies a regular file's content from the image to `out_path`.
pub fn materialize(image: &mut Image, inode: &Inode, out_path: &Path) -> Result<()> {
	let mut file = File::create(out_path).map_err(UfsError::Create)?;
	file.set_permissions(fs::Permissions::from_mode(inode.permissions() as u32 & 0o777))
		.map_err(UfsError::Create)?;

	if inode.size == 0 {
		return Ok(());
	}

	let bcount = inode.blocks.len();
	let expected_blocks = ceil_div(inode.size as u64, BLOCK_SIZE as u64) as usize;
	if expected_blocks != bcount {
		eprintln!(
			"ufs_read: warning: inode {} expects {} blocks from its size but has {} in its block list",
			inode.number, expected_blocks, bcount
		);
	}

	let tail = (inode.size as usize) % BLOCK_SIZE;
	let full_block_count = if tail == 0 { bcount } else { bcount.saturating_sub(1) };

	let mut buf = [0u8; BLOCK_SIZE];
	for &block in &inode.blocks[..full_block_count.min(bcount)] {
		image.read_block(block, &mut buf)?;
		file.write_all(&buf).map_err(UfsError::Io)?;
	}

	if tail > 0 {
		if let Some(&block) = inode.blocks.last() {
			image.read_block(block, &mut buf)?;
			file.write_all(&buf[..tail]).map_err(UfsError::Io)?;
		}
	}

	Ok(())
}

fn ceil_div(a: u64, b: u64) -> u64 {
	(a + b - 1) / b
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::partition::Partition;
	use std::io::Read as _;
	use std::process;
	use std::time::SystemTime;
	use std::time::UNIX_EPOCH;

	#[test]
	fn ceil_div_exact_multiple() {
		assert_eq!(ceil_div(1024, 512), 2);
	}

	#[test]
	fn ceil_div_partial() {
		assert_eq!(ceil_div(1025, 512), 3);
		assert_eq!(ceil_div(1, 512), 1);
		assert_eq!(ceil_div(0, 512), 0);
	}

	/// Encodes one 64-byte on-disk inode record.
	fn encode_inode(mode: u16, nlink: u16, size: u32, direct: &[u32]) -> [u8; 64] {
		let mut rec = [0u8; 64];
		rec[0..2].copy_from_slice(&mode.to_be_bytes());
		rec[2..4].copy_from_slice(&nlink.to_be_bytes());
		// uid/gid left zero
		rec[8..12].copy_from_slice(&size.to_be_bytes());
		for (i, &addr) in direct.iter().enumerate() {
			let off = 12 + i * 3;
			let b = addr.to_be_bytes();
			rec[off] = b[1];
			rec[off + 1] = b[2];
			rec[off + 2] = b[3];
		}
		rec
	}

	fn encode_dirent(inode: u16, name: &str) -> [u8; 16] {
		let mut rec = [0u8; 16];
		rec[0..2].copy_from_slice(&inode.to_be_bytes());
		let name_bytes = name.as_bytes();
		let n = name_bytes.len().min(14);
		rec[2..2 + n].copy_from_slice(&name_bytes[..n]);
		rec
	}

	/// Builds a tiny synthetic image: root dir (inode 2, one data block at
	/// block 10 holding `.`, `..`, and `greeting.txt`), and a 5-byte
	/// regular file (inode 3, one data block at block 11).
	fn build_fixture_image() -> Vec<u8> {
		const BLOCKS: usize = 20;
		let mut image = vec![0u8; BLOCKS * 512];

		// Block 2: inode block holding inodes 1..=8. Inode 1 reserved
		// (left zeroed); inode 2 is the root directory; inode 3 is the
		// regular file.
		let inode_block = &mut image[2 * 512..3 * 512];
		let root = encode_inode(0o040755, 2, 48, &[10]);
		let file = encode_inode(0o100644, 1, 5, &[11]);
		inode_block[64..128].copy_from_slice(&root); // inode 2 -> slot 1
		inode_block[128..192].copy_from_slice(&file); // inode 3 -> slot 2

		// Block 10: root directory's one data block.
		let dir_block = &mut image[10 * 512..11 * 512];
		dir_block[0..16].copy_from_slice(&encode_dirent(2, "."));
		dir_block[16..32].copy_from_slice(&encode_dirent(2, ".."));
		dir_block[32..48].copy_from_slice(&encode_dirent(3, "greeting.txt"));

		// Block 11: the regular file's content.
		let data_block = &mut image[11 * 512..12 * 512];
		data_block[0..5].copy_from_slice(b"hello");

		image
	}

	#[test]
	fn walks_and_materializes_a_tiny_tree() {
		let partition = Partition {
			offset_blocks: 0,
			size_blocks: 20,
			good_bound: 1000,
			name: "test",
		};

		let pid = process::id();
		let ts = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
		let work_dir = std::env::temp_dir().join(format!("ufs_read_test_{pid}_{ts}"));
		fs::create_dir_all(&work_dir).unwrap();
		let image_path = work_dir.join("fixture.img");
		fs::write(&image_path, build_fixture_image()).unwrap();

		let mut image = Image::open(&image_path, partition).unwrap();
		let root = load(&mut image, 2).unwrap();
		assert!(root.is_directory());

		let out_dir = work_dir.join("out");
		let mut walker = Walker::new(&mut image);
		walker.walk(&root, &out_dir, "test").unwrap();

		let mut content = String::new();
		File::open(out_dir.join("greeting.txt"))
			.unwrap()
			.read_to_string(&mut content)
			.unwrap();
		assert_eq!(content, "hello");

		assert_eq!(walker.stats.biggest_size, 5);

		fs::remove_dir_all(&work_dir).ok();
	}

	/// A hard-linked regular file: the second encounter must not write a
	/// duplicate copy at its own path, since that path is reserved for a
	/// symlink back to the canonical copy.
	#[test]
	fn hard_linked_regular_file_becomes_a_symlink_not_a_copy() {
		const BLOCKS: usize = 20;
		let mut raw = vec![0u8; BLOCKS * 512];

		let inode_block = &mut raw[2 * 512..3 * 512];
		// Root dir, two entries besides `.`/`..`: both name the same
		// nlink=2 file inode.
		let root = encode_inode(0o040755, 2, 64, &[10]);
		let file = encode_inode(0o100644, 2, 5, &[11]);
		inode_block[64..128].copy_from_slice(&root); // inode 2
		inode_block[128..192].copy_from_slice(&file); // inode 3

		let dir_block = &mut raw[10 * 512..11 * 512];
		dir_block[0..16].copy_from_slice(&encode_dirent(2, "."));
		dir_block[16..32].copy_from_slice(&encode_dirent(2, ".."));
		dir_block[32..48].copy_from_slice(&encode_dirent(3, "first"));
		dir_block[48..64].copy_from_slice(&encode_dirent(3, "second"));

		let data_block = &mut raw[11 * 512..12 * 512];
		data_block[0..5].copy_from_slice(b"hello");

		let partition = Partition {
			offset_blocks: 0,
			size_blocks: 20,
			good_bound: 1000,
			name: "test",
		};

		let pid = process::id();
		let ts = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
		let work_dir = std::env::temp_dir().join(format!("ufs_read_link_test_{pid}_{ts}"));
		fs::create_dir_all(&work_dir).unwrap();
		let image_path = work_dir.join("fixture.img");
		fs::write(&image_path, raw).unwrap();

		let mut image = Image::open(&image_path, partition).unwrap();
		let root = load(&mut image, 2).unwrap();

		let out_dir = work_dir.join("out");
		let mut walker = Walker::new(&mut image);
		walker.walk(&root, &out_dir, "test").unwrap();

		let first = out_dir.join("first");
		let second = out_dir.join("second");

		assert!(fs::symlink_metadata(&first).unwrap().file_type().is_file());
		let second_meta = fs::symlink_metadata(&second).unwrap();
		assert!(second_meta.file_type().is_symlink());
		assert_eq!(fs::read_link(&second).unwrap(), first);

		let mut content = String::new();
		File::open(&first).unwrap().read_to_string(&mut content).unwrap();
		assert_eq!(content, "hello");

		fs::remove_dir_all(&work_dir).ok();
	}
}
