//! V7 superblock decoding.
//!
//! Block 1 of the partition. There is no magic number; the format is
//! recognized by position alone, so this decoder performs no integrity
//! check and trusts the caller's partition selection.

use crate::endian::u16_from_be;
use crate::endian::u32_from_be;
use crate::error::Result;
use crate::image::Image;

/// Fields of the V7 superblock this extractor consumes. The in-core
/// free-block and free-inode caches are read off disk by nothing here;
/// they exist on disk but this tool has no use for them.
#[derive(Debug, Clone, Copy)]
pub struct Superblock {
	/// Number of blocks occupied by the inode list.
	pub isize_blocks: u16,
	/// Total size of the filesystem in blocks.
	pub fsize_blocks: u32,
	/// Last-modified time, seconds since the Unix epoch, big-endian as
	/// stored on disk (carried verbatim, like inode timestamps).
	pub time: u32,
}

/// Reads and decodes the superblock of `image`'s selected partition.
pub fn read(image: &mut Image) -> Result<Superblock> {
	let mut buf = [0u8; 512];
	image.read_block(1, &mut buf)?;

	let isize_blocks = u16_from_be([buf[0], buf[1]]);
	let fsize_blocks = u32_from_be([buf[2], buf[3], buf[4], buf[5]]);
	// Skip nfree (u16) and the 50 * u32 free-block cache, and ninode (u16)
	// and the 100 * u16 inode cache, and the unused u32 padding, to reach
	// the trailing time field.
	let nfree_off = 6;
	let free_list_off = nfree_off + 2;
	let ninode_off = free_list_off + 50 * 4;
	let inode_cache_off = ninode_off + 2;
	let unused_off = inode_cache_off + 100 * 2;
	let time_off = unused_off + 4;

	let time = u32_from_be([
		buf[time_off],
		buf[time_off + 1],
		buf[time_off + 2],
		buf[time_off + 3],
	]);

	Ok(Superblock {
		isize_blocks,
		fsize_blocks,
		time,
	})
}

#[cfg(test)]
mod test {
	use super::*;

	// isize(2) + nfree(2) + free-list(50*4) + ninode(2) + inode-cache(100*2)
	// + unused(4) = 414, the offset where `time` lands.
	const TIME_OFF: usize = 414;

	fn fixture_block() -> [u8; 512] {
		let mut buf = [0u8; 512];
		buf[0..2].copy_from_slice(&100u16.to_be_bytes());
		buf[2..6].copy_from_slice(&12376u32.to_be_bytes());
		buf[TIME_OFF..TIME_OFF + 4].copy_from_slice(&0x612ab000u32.to_be_bytes());
		buf
	}

	#[test]
	fn field_offsets_match_layout() {
		let buf = fixture_block();
		let isize_blocks = u16_from_be([buf[0], buf[1]]);
		let fsize_blocks = u32_from_be([buf[2], buf[3], buf[4], buf[5]]);
		assert_eq!(isize_blocks, 100);
		assert_eq!(fsize_blocks, 12376);

		let time = u32_from_be([
			buf[TIME_OFF],
			buf[TIME_OFF + 1],
			buf[TIME_OFF + 2],
			buf[TIME_OFF + 3],
		]);
		assert_eq!(time, 0x612ab000);
	}
}
