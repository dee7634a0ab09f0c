use thiserror::Error;

use crate::config::*;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    #[error("no entry with that name in the current directory")]
    NotExists,
    #[error("an entry with that name already exists")]
    Exists,
    #[error("entry is not a directory")]
    NotDirectory,
    #[error("entry is a directory")]
    IsDirectory,
    #[error("directory is not empty")]
    NotEmpty,
    #[error("name is longer than {} bytes", MAX_NAME_LEN)]
    NameTooLong,
    #[error("directory already holds {} entries", MAX_DIR_ENTRIES)]
    DirectoryFull,
    #[error("append would grow the file past {} bytes", MAX_FILE_SIZE)]
    FileTooLarge,
    #[error("not enough free blocks left on the device")]
    DiskFull,
    #[error("block holds unrecognized node tag {0}, the filesystem is corrupted")]
    InvalidNodeTag(u32),
    #[error("device reported block size {0}, must be {block_size}", block_size = BLOCK_SIZE)]
    InvalidBlockSize(usize),
    #[error("the device is invalid")]
    InvalidDevice,
    #[error("block id is out of range for the device")]
    InvalidBlockId,
    #[error("device read failed")]
    ReadError,
    #[error("device write failed")]
    WriteError,
    #[error("device has no free blocks left")]
    OutOfBlocks,
}

pub type Result<T> = core::result::Result<T, FsError>;
