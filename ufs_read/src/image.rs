//! Random-access, block-addressed reader over the raw disk image.

use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;

use crate::error::Result;
use crate::error::UfsError;
use crate::partition::Partition;

/// Size of a disk block in bytes. Fixed for this filesystem; there is no
/// on-disk field that could change it.
pub const BLOCK_SIZE: usize = 512;

/// A block-addressed reader scoped to one partition window of the image.
pub struct Image {
	file: File,
	partition: Partition,
}

impl Image {
	/// Opens the image file read-only and selects the active partition
	/// window.
	pub fn open(path: &Path, partition: Partition) -> Result<Self> {
		let file = File::open(path).map_err(UfsError::Io)?;
		Ok(Self { file, partition })
	}

	/// The partition window this image was opened against.
	pub fn partition(&self) -> &Partition {
		&self.partition
	}

	/// Reads partition-relative block `relative_block` into `buf`.
	///
	/// `relative_block` must be less than the partition's size in blocks;
	/// exceeding it is a caller bug, not a recoverable condition, so it is
	/// enforced with a debug assertion that aborts the run rather than a
	/// `Result`.
	pub fn read_block(&mut self, relative_block: u32, buf: &mut [u8; BLOCK_SIZE]) -> Result<()> {
		debug_assert!(
			(relative_block as u64) < self.partition.size_blocks as u64,
			"block {relative_block} out of range for partition of size {}",
			self.partition.size_blocks
		);

		let absolute = self.partition.offset_blocks as u64 + relative_block as u64;
		let byte_offset = absolute * BLOCK_SIZE as u64;

		self.file
			.seek(SeekFrom::Start(byte_offset))
			.map_err(UfsError::Io)?;

		let mut read = 0;
		while read < BLOCK_SIZE {
			let n = self.file.read(&mut buf[read..]).map_err(UfsError::Io)?;
			if n == 0 {
				return Err(UfsError::ShortRead {
					block: relative_block,
				});
			}
			read += n;
		}

		Ok(())
	}

	/// Tells whether `relative_block` falls at or beyond the partition's
	/// "good data" bound.
	pub fn is_suspect(&self, relative_block: u32) -> bool {
		relative_block >= self.partition.good_bound
	}
}
