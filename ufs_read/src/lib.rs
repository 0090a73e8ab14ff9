//! Offline extractor for the V7-style Unix filesystem carried on the
//! Callan CWC's Rodime disk image.
//!
//! Given a raw image, this crate reconstructs the directory tree it
//! contains and copies every regular file and directory into a local
//! host filesystem, translating the big-endian on-disk metadata to host
//! form along the way. It does not write to the image, mount it, or
//! repair it.

pub mod dirent;
pub mod endian;
pub mod error;
pub mod image;
pub mod inode;
pub mod links;
pub mod partition;
pub mod superblock;
pub mod walker;

pub use error::Result;
pub use error::UfsError;
