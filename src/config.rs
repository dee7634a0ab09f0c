pub const BLOCK_SIZE: usize = 256;
pub const NUM_BLOCKS: usize = 1024; // canonical device size

pub const SUPERBLOCK_ID: u16 = 0; // owned by the block device; also the on-disk "no block" value
pub const ROOT_DIR_ID: u16 = 1; // pre-existing root directory block
pub const RESERVED_BLOCKS: usize = 2; // superblock + root, fixed overhead

pub const MAX_NAME_LEN: usize = 7;
pub const NAME_BYTES: usize = MAX_NAME_LEN + 1; // names are zero padded on disk

pub const MAX_DIR_ENTRIES: usize = 25; // entries per directory node
pub const MAX_DATA_BLOCKS: usize = 124; // data blocks per file inode
pub const MAX_FILE_SIZE: usize = MAX_DATA_BLOCKS * BLOCK_SIZE;

// Node kind tags. The layout encodes a directory as 0 and a file as 1;
// kind checks go through Node::is_dir rather than comparing tags inline.
pub const TAG_DIRECTORY: u32 = 0;
pub const TAG_FILE: u32 = 1;
pub const TAG_SIZE: usize = 4;
