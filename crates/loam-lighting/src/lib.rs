//! Heightmap-based chunk lighting.
//!
//! One column height per (x, z): the highest block that blocks skylight.
//! Lookups above that height get the sun color, below it the shadow color.
#![forbid(unsafe_code)]

use loam_blocks::BlockRegistry;
use loam_chunk::ChunkBuf;

pub type LightCol = [u8; 4];

pub const SUN: LightCol = [255, 255, 255, 255];
pub const SHADOW: LightCol = [155, 155, 155, 255];

// Directional shading factors applied on top of sun/shadow.
pub const SHADE_X: f32 = 0.6;
pub const SHADE_Z: f32 = 0.8;
pub const SHADE_Y_BOTTOM: f32 = 0.5;

// Face indices follow the mesher's Left/Right/Front/Back/Bottom/Top order.
const FACE_LEFT: usize = 0;
const FACE_RIGHT: usize = 1;
const FACE_FRONT: usize = 2;
const FACE_BACK: usize = 3;
const FACE_BOTTOM: usize = 4;

#[inline]
pub fn scale(col: LightCol, f: f32) -> LightCol {
    [
        (col[0] as f32 * f) as u8,
        (col[1] as f32 * f) as u8,
        (col[2] as f32 * f) as u8,
        col[3],
    ]
}

pub struct LightGrid {
    sx: usize,
    sz: usize,
    /// Highest skylight-blocking y per column, or -1 for open columns.
    heights: Vec<i32>,
}

impl LightGrid {
    pub fn compute(buf: &ChunkBuf, reg: &BlockRegistry) -> Self {
        let mut heights = vec![-1i32; buf.sx * buf.sz];
        for z in 0..buf.sz {
            for x in 0..buf.sx {
                for y in (0..buf.sy).rev() {
                    let b = buf.get_local(x, y, z);
                    let blocks = reg
                        .get(b.id)
                        .map(|ty| ty.blocks_skylight)
                        .unwrap_or(false);
                    if blocks {
                        heights[z * buf.sx + x] = y as i32;
                        break;
                    }
                }
            }
        }
        Self {
            sx: buf.sx,
            sz: buf.sz,
            heights,
        }
    }

    /// An always-sunlit grid, for chunks meshed without lighting data.
    pub fn full_sun(sx: usize, sz: usize) -> Self {
        Self {
            sx,
            sz,
            heights: vec![-1; sx * sz],
        }
    }

    #[inline]
    fn height(&self, x: usize, z: usize) -> i32 {
        self.heights[z * self.sx + x]
    }

    #[inline]
    pub fn is_lit(&self, x: usize, y: usize, z: usize) -> bool {
        y as i32 > self.height(x, z)
    }

    /// Fast sprite light: one column lookup, no per-face shading.
    #[inline]
    pub fn sprite_light_fast(&self, x: usize, y: usize, z: usize) -> LightCol {
        if self.is_lit(x, y, z) { SUN } else { SHADOW }
    }

    /// Light for a cuboid face, sampled from the cell the face opens into
    /// (clamped to this chunk) and shaded by orientation.
    pub fn face_light(&self, x: usize, y: usize, z: usize, face: usize) -> LightCol {
        let (sx, sz) = (self.sx as i32, self.sz as i32);
        let (mut nx, mut ny, mut nz) = (x as i32, y as i32, z as i32);
        match face {
            FACE_LEFT => nx -= 1,
            FACE_RIGHT => nx += 1,
            FACE_FRONT => nz -= 1,
            FACE_BACK => nz += 1,
            FACE_BOTTOM => ny -= 1,
            _ => ny += 1,
        }
        nx = nx.clamp(0, sx - 1);
        nz = nz.clamp(0, sz - 1);
        let ny = ny.max(0) as usize;
        let base = self.sprite_light_fast(nx as usize, ny, nz as usize);
        match face {
            FACE_LEFT | FACE_RIGHT => scale(base, SHADE_X),
            FACE_FRONT | FACE_BACK => scale(base, SHADE_Z),
            FACE_BOTTOM => scale(base, SHADE_Y_BOTTOM),
            _ => base,
        }
    }
}
