//! Pion is a minimal hierarchical file system for fixed-size block devices.
//! Everything is bounded: a directory is one block of up to
//! [`MAX_DIR_ENTRIES`] named entries, a file is one inode block plus up to
//! [`MAX_DATA_BLOCKS`] data blocks, and every limit is checked before any
//! block is touched. Writes are append-only; names resolve against a
//! per-session current directory.
//!
//! Linear layout of a device:
//! - Block 0: superblock, owned by the block device
//! - Block 1: root directory
//! - Everything else: directory nodes, file inodes, and file data, handed
//!   out by the device's allocator
//!
//! Pion's layers (from bottom to top):
//! 1. Block device: read/write/allocate/release by index.          | User implemented (hardware-specific)
//! 2. Node codec: typed, tag-validated view of a block.            | Fs implemented
//! 3. Directory/usage: entry mutation and whole-tree accounting.   | Fs implemented
//! 4. File: append-only writes, whole-file reads.                  | Fs implemented
//! 5. FileSystem: the mounted session handle.                      | Fs implemented (one per session)

mod block_dev;
mod config;
mod directory;
mod error;
mod file;
mod fs;
mod node;
mod structs;
mod usage;

pub use block_dev::BlockDevice;
pub use config::*;
pub use error::FsError as Error;
pub use error::Result;
pub use fs::{FileSystem, Stats};
pub use node::Node;
pub use structs::*;
