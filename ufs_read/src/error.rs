//! Error taxonomy for the extractor.
//!
//! Only the fatal half of the taxonomy is represented here: suspect-data
//! and benign conditions are handled in-place by the component that
//! observes them and never become an `Err`.

use std::fmt;
use std::io;

/// A fatal condition that aborts the run.
#[derive(Debug)]
pub enum UfsError {
	/// Wraps an underlying I/O failure (open, read, seek, create...).
	Io(io::Error),
	/// `read_block` got fewer bytes than a block; the image is truncated
	/// or the partition table is wrong.
	ShortRead { block: u32 },
	/// An inode's triple-indirect slot (12) is non-zero.
	UnsupportedFeature(&'static str),
	/// Inode number 0 was requested; inode numbers start at 1.
	BadInodeNumber(u32),
	/// A directory walk was asked to descend into a non-directory inode.
	NotADirectory(u32),
	/// Failed to create an output file or directory.
	Create(io::Error),
}

impl fmt::Display for UfsError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Io(e) => write!(f, "{e}"),
			Self::ShortRead { block } => write!(f, "short read at block {block}"),
			Self::UnsupportedFeature(what) => write!(f, "{what}"),
			Self::BadInodeNumber(n) => write!(f, "invalid inode number {n}"),
			Self::NotADirectory(ino) => write!(f, "inode {ino} is not a directory"),
			Self::Create(e) => write!(f, "cannot create output: {e}"),
		}
	}
}

impl std::error::Error for UfsError {}

impl From<io::Error> for UfsError {
	fn from(e: io::Error) -> Self {
		Self::Io(e)
	}
}

pub type Result<T> = std::result::Result<T, UfsError>;
