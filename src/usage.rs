//! Whole-tree disk accounting.
//!
//! Occupancy is recomputed from the block store on every call instead of
//! keeping a running counter; the walk is bounded by the small fixed tree
//! and always reflects what is actually on disk.

use crate::block_dev::BlockDevice;
use crate::config::*;
use crate::error::{FsError, Result};
use crate::node::{Node, read_node};
use crate::structs::BlockId;

/// Total blocks occupied by the file system: the fixed overhead (superblock
/// and root directory) plus every reachable node block and file data block.
pub fn occupied_blocks(device: &impl BlockDevice) -> Result<usize> {
    Ok(RESERVED_BLOCKS + subtree_blocks(device, ROOT_DIR_ID)?)
}

/// Blocks owned by the subtree below `block`, excluding `block` itself.
fn subtree_blocks(device: &impl BlockDevice, block: BlockId) -> Result<usize> {
    match read_node(device, block)? {
        Node::File(inode) => Ok(inode.data_block_count()),
        Node::Directory(dir) => {
            let mut total = 0;
            for entry in dir.entries() {
                total += 1 + subtree_blocks(device, entry.block)?;
            }
            Ok(total)
        }
    }
}

/// Admission check run before any allocation: fails with `DiskFull` if
/// adding `extra` blocks would burst the device.
pub fn check_headroom(device: &impl BlockDevice, extra: usize) -> Result<()> {
    if occupied_blocks(device)? + extra > device.num_blocks() {
        return Err(FsError::DiskFull);
    }
    Ok(())
}
