//! Fixed-size chunk block storage.
#![forbid(unsafe_code)]

use loam_blocks::types::Block;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }
}

#[derive(Clone, Debug)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    pub blocks: Vec<Block>,
}

impl ChunkBuf {
    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, b: Block) {
        let i = self.idx(x, y, z);
        self.blocks[i] = b;
    }

    /// Chunk-local lookup with signed coordinates; `None` outside the buffer.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        if x < 0
            || y < 0
            || z < 0
            || x >= self.sx as i32
            || y >= self.sy as i32
            || z >= self.sz as i32
        {
            return None;
        }
        Some(self.get_local(x as usize, y as usize, z as usize))
    }

    pub fn new(coord: ChunkCoord, sx: usize, sy: usize, sz: usize) -> Self {
        ChunkBuf {
            coord,
            sx,
            sy,
            sz,
            blocks: vec![Block::AIR; sx * sy * sz],
        }
    }

    pub fn from_blocks_local(
        coord: ChunkCoord,
        sx: usize,
        sy: usize,
        sz: usize,
        blocks: Vec<Block>,
    ) -> Self {
        let mut b = blocks;
        let expect = sx * sy * sz;
        if b.len() != expect {
            b.resize(expect, Block::AIR);
        }
        ChunkBuf {
            coord,
            sx,
            sy,
            sz,
            blocks: b,
        }
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| *b != Block::AIR)
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        !self.has_non_air()
    }
}
