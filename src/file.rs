//! File data access: append-only writes and whole-file reads.

use log::trace;

use crate::block_dev::BlockDevice;
use crate::config::*;
use crate::error::{FsError, Result};
use crate::node::{Node, write_node};
use crate::structs::{BlockId, Inode};
use crate::usage;

/// Appends `data` to the file whose inode lives at `block`.
///
/// New blocks are allocated only for bytes that do not fit into the slack
/// of the current tail block. All limit checks run before anything is
/// persisted; afterwards the inode is written with its new size and block
/// list, and only then is the data copied.
pub fn append(
    device: &impl BlockDevice,
    block: BlockId,
    mut inode: Inode,
    data: &[u8],
) -> Result<()> {
    let old_size = inode.file_size as usize;
    if old_size + data.len() > MAX_FILE_SIZE {
        return Err(FsError::FileTooLarge);
    }

    let old_blocks = inode.data_block_count();
    let slack = old_blocks * BLOCK_SIZE - old_size;
    let new_blocks = if data.len() <= slack {
        0
    } else {
        (data.len() - slack + BLOCK_SIZE - 1) / BLOCK_SIZE
    };
    usage::check_headroom(device, new_blocks)?;

    for i in 0..new_blocks {
        inode.data_blocks[old_blocks + i] = device.allocate_block()? as BlockId;
    }
    inode.file_size = (old_size + data.len()) as u32;
    write_node(device, block, &Node::File(inode))?;

    // Fill the partial tail block first, then stream the rest into the
    // newly allocated blocks in order.
    let mut copied = 0;
    if slack > 0 {
        let tail = inode.data_blocks[old_blocks - 1] as usize;
        let mut buf = [0u8; BLOCK_SIZE];
        device.read_block(tail, &mut buf)?;
        copied = data.len().min(slack);
        let at = BLOCK_SIZE - slack;
        buf[at..at + copied].copy_from_slice(&data[..copied]);
        device.write_block(tail, &buf)?;
    }
    for i in 0..new_blocks {
        let chunk = &data[copied..(copied + BLOCK_SIZE).min(data.len())];
        let mut buf = [0u8; BLOCK_SIZE];
        buf[..chunk.len()].copy_from_slice(chunk);
        device.write_block(inode.data_blocks[old_blocks + i] as usize, &buf)?;
        copied += chunk.len();
    }

    trace!(
        "appended {} bytes to block {} ({} new data blocks)",
        data.len(),
        block,
        new_blocks
    );
    Ok(())
}

/// Copies the file's contents from the start into `buf` and returns the
/// number of bytes copied: the file size or the buffer length, whichever
/// is smaller. Capping on the buffer side avoids an out-of-bounds copy
/// into an undersized caller buffer.
pub fn read_all(device: &impl BlockDevice, inode: &Inode, buf: &mut [u8]) -> Result<usize> {
    let total = (inode.file_size as usize).min(buf.len());
    let mut copied = 0;
    let mut block_buf = [0u8; BLOCK_SIZE];
    for &data_block in &inode.data_blocks[..inode.data_block_count()] {
        if copied >= total {
            break;
        }
        device.read_block(data_block as usize, &mut block_buf)?;
        let n = BLOCK_SIZE.min(total - copied);
        buf[copied..copied + n].copy_from_slice(&block_buf[..n]);
        copied += n;
    }
    Ok(total)
}
