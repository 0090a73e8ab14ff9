//! V7 directory entry iteration.

use crate::endian::u16_from_be;
use crate::error::Result;
use crate::image::Image;
use crate::inode::Inode;

/// Entries per 512-byte directory block (16 bytes each).
const ENTRIES_PER_BLOCK: usize = 512 / 16;
/// Length of the name field in a directory entry; not NUL-terminated
/// when the name fills all 14 bytes.
const NAME_LEN: usize = 14;

/// One directory record, decoded. `inode == 0` is a tombstone left by
/// `unlink`; it is yielded, not hidden, so callers can choose to skip it.
#[derive(Debug, Clone)]
pub struct DirEntry {
	pub inode: u32,
	pub name: String,
}

impl DirEntry {
	pub fn is_tombstone(&self) -> bool {
		self.inode == 0
	}
}

/// Returns the `index`-th directory entry of `dir`, or `None` once past
/// the end of its block list.
pub fn entry(image: &mut Image, dir: &Inode, index: usize) -> Result<Option<DirEntry>> {
	let block_index = index / ENTRIES_PER_BLOCK;
	let slot = index % ENTRIES_PER_BLOCK;

	if block_index >= dir.blocks.len() {
		return Ok(None);
	}

	let mut buf = [0u8; 512];
	image.read_block(dir.blocks[block_index], &mut buf)?;

	let rec = &buf[slot * 16..(slot + 1) * 16];
	let inode = u16_from_be([rec[0], rec[1]]) as u32;

	let name_bytes = &rec[2..2 + NAME_LEN];
	let end = name_bytes.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
	let name = String::from_utf8_lossy(&name_bytes[..end]).into_owned();

	Ok(Some(DirEntry { inode, name }))
}

/// Iterates every entry of `dir` in on-disk order.
pub struct DirIter<'a, 'img> {
	image: &'a mut Image,
	dir: &'img Inode,
	index: usize,
	failed: bool,
}

impl<'a, 'img> DirIter<'a, 'img> {
	pub fn new(image: &'a mut Image, dir: &'img Inode) -> Self {
		Self {
			image,
			dir,
			index: 0,
			failed: false,
		}
	}
}

impl<'a, 'img> Iterator for DirIter<'a, 'img> {
	type Item = Result<DirEntry>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}
		match entry(self.image, self.dir, self.index) {
			Ok(Some(e)) => {
				self.index += 1;
				Some(Ok(e))
			}
			Ok(None) => None,
			Err(e) => {
				self.failed = true;
				Some(Err(e))
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn tombstone_is_yielded_not_hidden() {
		let e = DirEntry {
			inode: 0,
			name: "removed       ".trim_end().to_string(),
		};
		assert!(e.is_tombstone());
	}

	#[test]
	fn fourteen_byte_name_without_nul() {
		// No NUL terminator: the name runs to the end of the 14-byte field.
		let mut rec = [0u8; 16];
		rec[0..2].copy_from_slice(&2u16.to_be_bytes());
		rec[2..16].copy_from_slice(b"12345678901234");

		let inode = u16_from_be([rec[0], rec[1]]) as u32;
		let name_bytes = &rec[2..2 + NAME_LEN];
		let end = name_bytes.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
		let name = String::from_utf8_lossy(&name_bytes[..end]).into_owned();

		assert_eq!(inode, 2);
		assert_eq!(name, "12345678901234");
	}
}
