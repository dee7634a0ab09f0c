//! Typed view of raw block payloads.
//!
//! Every allocated block holds a u32 kind tag at offset 0 followed by the
//! node body. Decoding validates the tag instead of trusting the payload;
//! a block that carries anything other than the two known tags surfaces as
//! `InvalidNodeTag`.

use core::ptr;

use crate::block_dev::BlockDevice;
use crate::config::*;
use crate::error::{FsError, Result};
use crate::structs::*;

#[derive(Debug, Clone, Copy)]
pub enum Node {
    Directory(DirNode),
    File(Inode),
}

impl Node {
    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    /// Decodes a raw block payload, validating the kind tag.
    pub fn decode(buf: &[u8; BLOCK_SIZE]) -> Result<Self> {
        let tag = unsafe { ptr::read_unaligned(buf.as_ptr() as *const u32) };
        match tag {
            TAG_DIRECTORY => {
                let dir = unsafe {
                    ptr::read_unaligned(buf.as_ptr().add(TAG_SIZE) as *const DirNode)
                };
                Ok(Node::Directory(dir))
            }
            TAG_FILE => {
                let inode = unsafe {
                    ptr::read_unaligned(buf.as_ptr().add(TAG_SIZE) as *const Inode)
                };
                Ok(Node::File(inode))
            }
            other => Err(FsError::InvalidNodeTag(other)),
        }
    }

    /// Serializes the node into a full block payload, zero padded.
    pub fn encode(&self) -> [u8; BLOCK_SIZE] {
        let mut buf = [0u8; BLOCK_SIZE];
        match self {
            Node::Directory(dir) => unsafe {
                ptr::write_unaligned(buf.as_mut_ptr() as *mut u32, TAG_DIRECTORY);
                ptr::write_unaligned(buf.as_mut_ptr().add(TAG_SIZE) as *mut DirNode, *dir);
            },
            Node::File(inode) => unsafe {
                ptr::write_unaligned(buf.as_mut_ptr() as *mut u32, TAG_FILE);
                ptr::write_unaligned(buf.as_mut_ptr().add(TAG_SIZE) as *mut Inode, *inode);
            },
        }
        buf
    }
}

pub fn read_node(device: &impl BlockDevice, block: BlockId) -> Result<Node> {
    let mut buf = [0u8; BLOCK_SIZE];
    device.read_block(block as usize, &mut buf)?;
    Node::decode(&buf)
}

pub fn write_node(device: &impl BlockDevice, block: BlockId, node: &Node) -> Result<()> {
    device.write_block(block as usize, &node.encode())
}
