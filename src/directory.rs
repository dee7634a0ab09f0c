use log::trace;

use crate::block_dev::BlockDevice;
use crate::config::*;
use crate::error::{FsError, Result};
use crate::node::{Node, read_node, write_node};
use crate::structs::*;
use crate::usage;

pub fn trim_zero(name: &[u8]) -> &[u8] {
    let mut end = name.len();
    while end > 0 && name[end - 1] == 0 {
        end -= 1;
    }
    &name[..end]
}

fn name_cmp(n1: &[u8], n2: &[u8]) -> bool {
    trim_zero(n1) == trim_zero(n2)
}

impl DirEntry {
    pub fn name_eq(&self, name: &[u8]) -> bool {
        name_cmp(&self.name, name)
    }
}

fn as_dir(node: Node) -> Result<DirNode> {
    match node {
        Node::Directory(dir) => Ok(dir),
        Node::File(_) => Err(FsError::NotDirectory),
    }
}

/// Reads `dir` fresh and scans its entries in array order for `name`.
/// The order is insertion order subject to removal compaction.
pub fn dir_lookup(device: &impl BlockDevice, dir: BlockId, name: &[u8]) -> Result<BlockId> {
    let dirnode = as_dir(read_node(device, dir)?)?;
    trace!(
        "lookup {:?} in dir block {}",
        String::from_utf8_lossy(trim_zero(name)),
        dir
    );
    match dirnode.position(name) {
        Some(idx) => Ok(dirnode.entries[idx].block),
        None => Err(FsError::NotExists),
    }
}

/// Creates a new child of the given kind under `dir`: validates the name,
/// the disk headroom, the entry capacity, and name uniqueness, then
/// allocates a block, persists the parent with the new entry, and finally
/// initializes the child block. Backs both mkdir and creat.
pub fn create_child(
    device: &impl BlockDevice,
    dir: BlockId,
    name: &[u8],
    node: &Node,
) -> Result<BlockId> {
    if name.len() > MAX_NAME_LEN {
        return Err(FsError::NameTooLong);
    }
    usage::check_headroom(device, 1)?;
    let mut dirnode = as_dir(read_node(device, dir)?)?;
    if dirnode.is_full() {
        return Err(FsError::DirectoryFull);
    }
    if dirnode.position(name).is_some() {
        return Err(FsError::Exists);
    }

    let child = device.allocate_block()? as BlockId;
    dirnode.push(DirEntry::new(name, child)?);
    // Parent first, child second; there is no atomicity across the two
    // writes.
    write_node(device, dir, &Node::Directory(dirnode))?;
    write_node(device, child, node)?;
    Ok(child)
}

/// Removes the entry named `name`, compacting by moving the last entry into
/// the hole. Returns the removed child's block; releasing it (and, for
/// files, its data blocks) is the caller's responsibility.
pub fn dir_rm_entry(device: &impl BlockDevice, dir: BlockId, name: &[u8]) -> Result<BlockId> {
    let mut dirnode = as_dir(read_node(device, dir)?)?;
    let idx = dirnode.position(name).ok_or(FsError::NotExists)?;
    let child = dirnode.entries[idx].block;
    dirnode.swap_remove(idx);
    write_node(device, dir, &Node::Directory(dirnode))?;
    Ok(child)
}

/// All live entries of the directory, in array order.
pub fn read_entries(device: &impl BlockDevice, dir: BlockId) -> Result<Vec<DirEntry>> {
    let dirnode = as_dir(read_node(device, dir)?)?;
    Ok(dirnode.entries().to_vec())
}
