//! 1-D texture atlas metadata.
//!
//! The atlas is a single tall texture cut into vertical slices; each slice
//! holds `tiles_per_slice` square tiles stacked top to bottom. A packed
//! texture id encodes the slice in its high bits and the tile row in its
//! low bits.
#![forbid(unsafe_code)]

use std::error::Error;

use loam_blocks::types::TexId;

#[derive(Clone, Copy, Debug)]
pub struct Atlas1D {
    pub tiles_per_slice: usize,
    pub slice_count: usize,
    pub shift: u32,
    pub mask: u16,
    /// Vertical extent of one tile within its slice, in texture space.
    pub inv_tile_size: f32,
}

impl Atlas1D {
    pub fn new(total_tiles: usize, tiles_per_slice: usize) -> Result<Self, Box<dyn Error>> {
        if tiles_per_slice == 0 || !tiles_per_slice.is_power_of_two() {
            return Err(format!("tiles_per_slice must be a power of two, got {tiles_per_slice}").into());
        }
        let slice_count = total_tiles.div_ceil(tiles_per_slice).max(1);
        Ok(Self {
            tiles_per_slice,
            slice_count,
            shift: tiles_per_slice.trailing_zeros(),
            mask: (tiles_per_slice - 1) as u16,
            inv_tile_size: 1.0 / tiles_per_slice as f32,
        })
    }

    /// Atlas slice index for a packed texture id.
    #[inline]
    pub fn slice_of(&self, tex: TexId) -> usize {
        (tex >> self.shift) as usize
    }

    /// Texture-space V coordinate of the tile's top edge within its slice.
    #[inline]
    pub fn v_origin(&self, tex: TexId) -> f32 {
        (tex & self.mask) as f32 * self.inv_tile_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_slice_and_row() {
        let atlas = Atlas1D::new(64, 16).unwrap();
        assert_eq!(atlas.slice_count, 4);
        assert_eq!(atlas.shift, 4);
        assert_eq!(atlas.mask, 15);

        // tile 0 of slice 0
        assert_eq!(atlas.slice_of(0), 0);
        assert_eq!(atlas.v_origin(0), 0.0);
        // tile 3 of slice 2
        let tex: TexId = (2 << 4) | 3;
        assert_eq!(atlas.slice_of(tex), 2);
        assert!((atlas.v_origin(tex) - 3.0 / 16.0).abs() < 1e-6);
    }

    #[test]
    fn partial_last_slice_still_counts() {
        let atlas = Atlas1D::new(17, 16).unwrap();
        assert_eq!(atlas.slice_count, 2);
    }

    #[test]
    fn rejects_non_power_of_two() {
        assert!(Atlas1D::new(64, 12).is_err());
        assert!(Atlas1D::new(64, 0).is_err());
    }
}
