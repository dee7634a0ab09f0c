use crate::config::*;
use crate::Error;
use crate::Result;

/// Index of a block on the device. Block 0 is the superblock and never a
/// valid entry target, which lets it double as the on-disk "no block" value.
pub type BlockId = u16;

pub const NULL_BLOCK: BlockId = 0;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry {
    pub block: BlockId,
    pub name: [u8; NAME_BYTES],
}

impl DirEntry {
    pub const NULL: Self = Self {
        block: NULL_BLOCK,
        name: [0; NAME_BYTES],
    };

    pub fn new(name: &[u8], block: BlockId) -> Result<Self> {
        if name.len() > MAX_NAME_LEN {
            return Err(Error::NameTooLong);
        }
        Ok(Self {
            block,
            name: {
                let mut arr = [0; NAME_BYTES];
                arr[..name.len()].copy_from_slice(name);
                arr
            },
        })
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DirNode {
    pub num_entries: u16,
    pub entries: [DirEntry; MAX_DIR_ENTRIES],
}

impl DirNode {
    pub const EMPTY: Self = Self {
        num_entries: 0,
        entries: [DirEntry::NULL; MAX_DIR_ENTRIES],
    };

    /// The occupied prefix of the entry array.
    pub fn entries(&self) -> &[DirEntry] {
        &self.entries[..self.num_entries as usize]
    }

    pub fn is_full(&self) -> bool {
        self.num_entries as usize >= MAX_DIR_ENTRIES
    }

    pub fn is_empty(&self) -> bool {
        self.num_entries == 0
    }

    /// Position of the entry matching `name`, scanning in array order.
    pub fn position(&self, name: &[u8]) -> Option<usize> {
        self.entries().iter().position(|e| e.name_eq(name))
    }

    /// Appends an entry in the first free slot. Callers check `is_full`
    /// beforehand.
    pub fn push(&mut self, entry: DirEntry) {
        debug_assert!(!self.is_full());
        self.entries[self.num_entries as usize] = entry;
        self.num_entries += 1;
    }

    /// Removes the entry at `idx` by moving the last occupied slot into its
    /// place and clearing the vacated slot. Does not preserve sibling order.
    pub fn swap_remove(&mut self, idx: usize) {
        let last = self.num_entries as usize - 1;
        self.entries[idx] = self.entries[last];
        self.entries[last] = DirEntry::NULL;
        self.num_entries -= 1;
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Inode {
    pub file_size: u32,
    pub data_blocks: [BlockId; MAX_DATA_BLOCKS],
}

impl Inode {
    pub const EMPTY: Self = Self {
        file_size: 0,
        data_blocks: [NULL_BLOCK; MAX_DATA_BLOCKS],
    };

    /// Number of data blocks backing the current size; the last one may be
    /// partially filled.
    pub fn data_block_count(&self) -> usize {
        (self.file_size as usize + BLOCK_SIZE - 1) / BLOCK_SIZE
    }
}
