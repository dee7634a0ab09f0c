use std::sync::Arc;

use log::debug;

use crate::block_dev::BlockDevice;
use crate::config::*;
use crate::directory::{create_child, dir_lookup, dir_rm_entry, read_entries, trim_zero};
use crate::error::{FsError, Result};
use crate::file;
use crate::node::{Node, read_node, write_node};
use crate::structs::*;
use crate::usage;

/// Metadata for a single named entry, as reported by [`FileSystem::stat`].
/// Directories have no size; the shape makes that explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stats {
    Directory {
        name: String,
        block: BlockId,
    },
    File {
        name: String,
        block: BlockId,
        size: u32,
        data_blocks: usize,
    },
}

/// A mounted session over a block device.
///
/// The handle owns the only piece of cross-call state, the current
/// directory; everything else is re-read from the device on every call.
/// Independent sessions over the same device are possible, but nothing
/// arbitrates between them.
#[derive(Debug)]
pub struct FileSystem<D: BlockDevice> {
    device: Arc<D>,
    cwd: BlockId,
}

impl<D: BlockDevice> FileSystem<D> {
    /// Writes a fresh, empty root directory and mounts the result. The
    /// superblock (block 0) is left to the device itself.
    pub fn format(device: Arc<D>) -> Result<Self> {
        check_geometry(&*device)?;
        write_node(&*device, ROOT_DIR_ID, &Node::Directory(DirNode::EMPTY))?;
        device.flush()?;
        debug!("formatted device with {} blocks", device.num_blocks());
        Ok(Self {
            device,
            cwd: ROOT_DIR_ID,
        })
    }

    /// Opens a session over an already formatted device, with the current
    /// directory at the root.
    pub fn mount(device: Arc<D>) -> Result<Self> {
        check_geometry(&*device)?;
        // Block 1 must hold a directory node.
        match read_node(&*device, ROOT_DIR_ID)? {
            Node::Directory(_) => {}
            Node::File(_) => return Err(FsError::NotDirectory),
        }
        debug!("mounted device with {} blocks", device.num_blocks());
        Ok(Self {
            device,
            cwd: ROOT_DIR_ID,
        })
    }

    /// Ends the session, flushing the device. Consuming the handle makes
    /// use after unmount unrepresentable.
    pub fn unmount(self) -> Result<()> {
        self.device.flush()
    }

    /// Creates an empty subdirectory in the current directory.
    pub fn mkdir(&mut self, name: &str) -> Result<()> {
        let block = create_child(
            &*self.device,
            self.cwd,
            name.as_bytes(),
            &Node::Directory(DirNode::EMPTY),
        )?;
        debug!("mkdir {:?} at block {}", name, block);
        Ok(())
    }

    /// Creates an empty file in the current directory.
    pub fn creat(&mut self, name: &str) -> Result<()> {
        let block = create_child(
            &*self.device,
            self.cwd,
            name.as_bytes(),
            &Node::File(Inode::EMPTY),
        )?;
        debug!("creat {:?} at block {}", name, block);
        Ok(())
    }

    /// Moves the session into the named subdirectory, or back to the root
    /// when `name` is `None`.
    pub fn chdir(&mut self, name: Option<&str>) -> Result<()> {
        let Some(name) = name else {
            self.cwd = ROOT_DIR_ID;
            return Ok(());
        };
        let block = dir_lookup(&*self.device, self.cwd, name.as_bytes())?;
        if !read_node(&*self.device, block)?.is_dir() {
            return Err(FsError::NotDirectory);
        }
        self.cwd = block;
        Ok(())
    }

    /// Names of every entry in the current directory, split into
    /// (directories, files). Each child's kind tag is read fresh.
    pub fn ls(&self) -> Result<(Vec<String>, Vec<String>)> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in read_entries(&*self.device, self.cwd)? {
            let name = String::from_utf8_lossy(trim_zero(&entry.name)).into_owned();
            if read_node(&*self.device, entry.block)?.is_dir() {
                dirs.push(name);
            } else {
                files.push(name);
            }
        }
        Ok((dirs, files))
    }

    /// Removes an empty subdirectory of the current directory and releases
    /// its block.
    pub fn rmdir(&mut self, name: &str) -> Result<()> {
        let block = dir_lookup(&*self.device, self.cwd, name.as_bytes())?;
        let dirnode = match read_node(&*self.device, block)? {
            Node::Directory(dir) => dir,
            Node::File(_) => return Err(FsError::NotDirectory),
        };
        if !dirnode.is_empty() {
            return Err(FsError::NotEmpty);
        }
        dir_rm_entry(&*self.device, self.cwd, name.as_bytes())?;
        self.device.release_block(block as usize)?;
        debug!("rmdir {:?} (block {})", name, block);
        Ok(())
    }

    /// Deletes a file, releasing its data blocks and its inode block.
    /// Directories go through [`rmdir`](Self::rmdir) instead.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let block = dir_lookup(&*self.device, self.cwd, name.as_bytes())?;
        let inode = match read_node(&*self.device, block)? {
            Node::File(inode) => inode,
            Node::Directory(_) => return Err(FsError::IsDirectory),
        };
        dir_rm_entry(&*self.device, self.cwd, name.as_bytes())?;
        for &data_block in &inode.data_blocks[..inode.data_block_count()] {
            self.device.release_block(data_block as usize)?;
        }
        self.device.release_block(block as usize)?;
        debug!("removed file {:?} (block {})", name, block);
        Ok(())
    }

    /// Looks up `name` in the current directory and reports its metadata.
    pub fn stat(&self, name: &str) -> Result<Stats> {
        let block = dir_lookup(&*self.device, self.cwd, name.as_bytes())?;
        let stats = match read_node(&*self.device, block)? {
            Node::Directory(_) => Stats::Directory {
                name: name.to_string(),
                block,
            },
            Node::File(inode) => Stats::File {
                name: name.to_string(),
                block,
                size: inode.file_size,
                data_blocks: inode.data_block_count(),
            },
        };
        Ok(stats)
    }

    /// Appends `data` to the end of the named file. Nothing is persisted
    /// unless every limit check passes.
    pub fn write(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let block = dir_lookup(&*self.device, self.cwd, name.as_bytes())?;
        let inode = match read_node(&*self.device, block)? {
            Node::File(inode) => inode,
            Node::Directory(_) => return Err(FsError::IsDirectory),
        };
        file::append(&*self.device, block, inode, data)
    }

    /// Reads the named file from the start into `buf`, returning the
    /// number of bytes copied: the file size or the buffer length,
    /// whichever is smaller.
    pub fn read(&self, name: &str, buf: &mut [u8]) -> Result<usize> {
        let block = dir_lookup(&*self.device, self.cwd, name.as_bytes())?;
        let inode = match read_node(&*self.device, block)? {
            Node::File(inode) => inode,
            Node::Directory(_) => return Err(FsError::IsDirectory),
        };
        file::read_all(&*self.device, &inode, buf)
    }

    /// Total blocks currently occupied, recomputed from the device.
    pub fn occupied_blocks(&self) -> Result<usize> {
        usage::occupied_blocks(&*self.device)
    }

    /// Block of the current directory.
    pub fn current_dir(&self) -> BlockId {
        self.cwd
    }

    pub fn device(&self) -> Arc<D> {
        Arc::clone(&self.device)
    }
}

fn check_geometry(device: &impl BlockDevice) -> Result<()> {
    if device.block_size() != BLOCK_SIZE {
        return Err(FsError::InvalidBlockSize(device.block_size()));
    }
    if device.num_blocks() < RESERVED_BLOCKS || device.num_blocks() > BlockId::MAX as usize + 1 {
        return Err(FsError::InvalidDevice);
    }
    Ok(())
}
