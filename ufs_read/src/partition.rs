//! Compiled-in partition table.
//!
//! The Callan's Rodime drive carried no on-disk partition table; the two
//! partitions this tool knows about were baked into the original boot
//! ROM/driver and are reproduced here as constants. The 136-block figure
//! is one cylinder (8 heads * 17 sectors); "good" is the empirical
//! cylinder count (306) the drive was readable through before the bad
//! sectors found near the end of its life.

/// A statically-defined `(offset, size, good_bound)` window inside the
/// image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
	/// Starting block of this partition within the image.
	pub offset_blocks: u32,
	/// Length of this partition in blocks.
	pub size_blocks: u32,
	/// Highest block number still considered readable on the original
	/// medium. Blocks at or beyond this are suspect, not necessarily bad.
	pub good_bound: u32,
	/// Human-readable partition name, also the name of the output
	/// directory this partition is extracted into.
	pub name: &'static str,
}

/// The root filesystem partition.
pub const ROOT: Partition = Partition {
	offset_blocks: 136,
	size_blocks: 12376,
	good_bound: 20000,
	name: "root",
};

/// The `/usr` filesystem partition.
pub const USR: Partition = Partition {
	offset_blocks: 17408,
	size_blocks: 26112,
	good_bound: 24208,
	name: "usr",
};

/// Selects a partition from the CLI's positional argument: the first
/// character `b`/`B` selects `usr`; anything else (including a missing
/// argument) selects `root`.
pub fn select(arg: Option<&str>) -> Partition {
	match arg.and_then(|s| s.chars().next()) {
		Some('b') | Some('B') => USR,
		_ => ROOT,
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn selects_usr_on_b() {
		assert_eq!(select(Some("b")), USR);
		assert_eq!(select(Some("B")), USR);
		assert_eq!(select(Some("bogus")), USR);
	}

	#[test]
	fn selects_root_otherwise() {
		assert_eq!(select(Some("root")), ROOT);
		assert_eq!(select(Some("r")), ROOT);
		assert_eq!(select(None), ROOT);
	}

	#[test]
	fn table_values_match_known_geometry() {
		assert_eq!(ROOT.offset_blocks, 136);
		assert_eq!(ROOT.size_blocks, 12376);
		assert_eq!(ROOT.good_bound, 20000);

		assert_eq!(USR.offset_blocks, 17408);
		assert_eq!(USR.size_blocks, 26112);
		assert_eq!(USR.good_bound, 24208);
	}
}
