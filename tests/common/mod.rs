//! Common utilities for tests: block devices backed by memory and by a
//! real file, plus a logging macro.
#![allow(dead_code)]

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Mutex;

use pion::{BLOCK_SIZE, BlockDevice, Error, RESERVED_BLOCKS, Result};

pub const ORANGE: &str = "\x1b[38;5;214m";
pub const RESET: &str = "\x1b[0m";

/// Provides a macro for logging messages during tests.
/// e.g. log!("placeholder") -> println!("[test] placeholder");
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        println!("{}[test] {}{}", crate::common::ORANGE, format!($($arg)*), crate::common::RESET)
    };
}

struct RamDiskInner {
    data: Vec<u8>,
    used: Vec<bool>,
}

/// In-memory block device with a first-fit allocator. Blocks 0 and 1 are
/// reserved at construction and never handed out.
pub struct RamDisk {
    inner: Mutex<RamDiskInner>,
    num_blocks: usize,
}

impl RamDisk {
    pub fn new(num_blocks: usize) -> Self {
        let mut used = vec![false; num_blocks];
        used[..RESERVED_BLOCKS].fill(true);
        RamDisk {
            inner: Mutex::new(RamDiskInner {
                data: vec![0u8; num_blocks * BLOCK_SIZE],
                used,
            }),
            num_blocks,
        }
    }

    /// Number of blocks currently handed out, reserved ones included.
    pub fn used_blocks(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.used.iter().filter(|&&u| u).count()
    }
}

impl BlockDevice for RamDisk {
    fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    fn read_block(&self, block_id: usize, buf: &mut [u8]) -> Result<()> {
        if block_id >= self.num_blocks {
            return Err(Error::InvalidBlockId);
        }
        if buf.len() != BLOCK_SIZE {
            return Err(Error::ReadError);
        }
        let start = block_id * BLOCK_SIZE;
        let inner = self.inner.lock().unwrap();
        buf.copy_from_slice(&inner.data[start..start + BLOCK_SIZE]);
        Ok(())
    }

    fn write_block(&self, block_id: usize, buf: &[u8]) -> Result<()> {
        if block_id >= self.num_blocks {
            return Err(Error::InvalidBlockId);
        }
        if buf.len() != BLOCK_SIZE {
            return Err(Error::WriteError);
        }
        let start = block_id * BLOCK_SIZE;
        let mut inner = self.inner.lock().unwrap();
        inner.data[start..start + BLOCK_SIZE].copy_from_slice(buf);
        Ok(())
    }

    fn allocate_block(&self) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        for id in RESERVED_BLOCKS..self.num_blocks {
            if !inner.used[id] {
                inner.used[id] = true;
                return Ok(id);
            }
        }
        Err(Error::OutOfBlocks)
    }

    fn release_block(&self, block_id: usize) -> Result<()> {
        if block_id < RESERVED_BLOCKS || block_id >= self.num_blocks {
            return Err(Error::InvalidBlockId);
        }
        self.inner.lock().unwrap().used[block_id] = false;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Block device backed by a disk image file. The free map lives in memory
/// only, so a reopened image is good for reading back what a previous
/// session persisted, not for further allocation.
pub struct DiskFile {
    file: Mutex<File>,
    used: Mutex<Vec<bool>>,
    num_blocks: usize,
}

impl DiskFile {
    pub fn create(path: &Path, num_blocks: usize) -> Self {
        let file = File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .unwrap();
        file.set_len((num_blocks * BLOCK_SIZE) as u64).unwrap();
        Self::with_file(file, num_blocks)
    }

    pub fn open(path: &Path, num_blocks: usize) -> Self {
        let file = File::options().read(true).write(true).open(path).unwrap();
        Self::with_file(file, num_blocks)
    }

    fn with_file(file: File, num_blocks: usize) -> Self {
        let mut used = vec![false; num_blocks];
        used[..RESERVED_BLOCKS].fill(true);
        DiskFile {
            file: Mutex::new(file),
            used: Mutex::new(used),
            num_blocks,
        }
    }
}

impl BlockDevice for DiskFile {
    fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    fn read_block(&self, block_id: usize, buf: &mut [u8]) -> Result<()> {
        if block_id >= self.num_blocks {
            return Err(Error::InvalidBlockId);
        }
        if buf.len() != BLOCK_SIZE {
            return Err(Error::ReadError);
        }
        let mut file = self.file.lock().unwrap();
        file.seek(SeekFrom::Start((block_id * BLOCK_SIZE) as u64))
            .map_err(|_| Error::ReadError)?;
        file.read_exact(buf).map_err(|_| Error::ReadError)?;
        Ok(())
    }

    fn write_block(&self, block_id: usize, buf: &[u8]) -> Result<()> {
        if block_id >= self.num_blocks {
            return Err(Error::InvalidBlockId);
        }
        if buf.len() != BLOCK_SIZE {
            return Err(Error::WriteError);
        }
        let mut file = self.file.lock().unwrap();
        file.seek(SeekFrom::Start((block_id * BLOCK_SIZE) as u64))
            .map_err(|_| Error::WriteError)?;
        file.write_all(buf).map_err(|_| Error::WriteError)?;
        Ok(())
    }

    fn allocate_block(&self) -> Result<usize> {
        let mut used = self.used.lock().unwrap();
        for id in RESERVED_BLOCKS..self.num_blocks {
            if !used[id] {
                used[id] = true;
                return Ok(id);
            }
        }
        Err(Error::OutOfBlocks)
    }

    fn release_block(&self, block_id: usize) -> Result<()> {
        if block_id < RESERVED_BLOCKS || block_id >= self.num_blocks {
            return Err(Error::InvalidBlockId);
        }
        self.used.lock().unwrap()[block_id] = false;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.file.lock().unwrap().flush().map_err(|_| Error::WriteError)
    }
}
