//! Crossed-billboard sprite rasterization.
//!
//! Each sprite block becomes four quads: a diagonal quad across the cell,
//! its mirror, and the perpendicular pair. Blocks with a random offset code
//! get deterministic positional jitter derived purely from their world
//! position, so rebuild order never changes the geometry.

use loam_atlas::Atlas1D;
use loam_blocks::registry::BlockType;
use loam_blocks::types::{SPRITE_OFFSET_RANDOM_DROOP, sprite_offset_is_random};
use loam_geom::Vec3;
use loam_lighting::LightGrid;

use crate::builder::MeshBuilder;
use crate::face::Face;
use crate::rng::JavaRandom;
use crate::vertex::{PackedCol, Vertex};

// Horizontal inset of the billboard within the unit cell.
const INSET_LO: f32 = 2.50 / 16.0;
const INSET_HI: f32 = 13.5 / 16.0;
// Just under a full tile, to keep sampling off neighboring tile edges.
pub(crate) const UV_MAX: f32 = 15.99 / 16.0;
// Horizontal widening applied around a jittered center.
const STRETCH: f32 = 1.7 / 16.0;

/// Seed folding the block's world X/Z into the jitter generator.
#[inline]
pub fn jitter_seed(wx: i32, wz: i32) -> i32 {
    wx.wrapping_add(1217i32.wrapping_mul(wz)) & 0x7fff_ffff
}

/// Emits one sprite block's 16 vertices into the builder's sprite stream
/// for the block's atlas slice.
///
/// `(x, y, z)` address the block within the chunk (for the light lookup);
/// `(wx, wz)` are its world coordinates, which anchor both the geometry and
/// the jitter seed.
#[allow(clippy::too_many_arguments)]
pub fn emit_sprite(
    m: &mut MeshBuilder,
    rng: &mut JavaRandom,
    atlas: &Atlas1D,
    light: &LightGrid,
    ty: &BlockType,
    x: usize,
    y: usize,
    z: usize,
    wx: i32,
    wz: i32,
) {
    let tex = ty.texture(Face::Right.index());
    let slice = atlas.slice_of(tex);
    let v_origin = atlas.v_origin(tex);

    let (fx, fy, fz) = (wx as f32, y as f32, wz as f32);
    let mut x1 = fx + INSET_LO;
    let mut y1 = fy;
    let mut z1 = fz + INSET_LO;
    let mut x2 = fx + INSET_HI;
    let mut y2 = fy + 1.0;
    let mut z2 = fz + INSET_HI;
    let (u1, u2) = (0.0, UV_MAX);
    let v1 = v_origin;
    let v2 = v_origin + atlas.inv_tile_size * UV_MAX;

    if sprite_offset_is_random(ty.sprite_offset) {
        // Reseed every call: jitter is a pure function of block position.
        rng.set_seed(jitter_seed(wx, wz));
        let val_x = rng.range(-3, 3 + 1) as f32 / 16.0;
        let val_y = rng.range(0, 3 + 1) as f32 / 16.0;
        let val_z = rng.range(-3, 3 + 1) as f32 / 16.0;

        x1 += val_x - STRETCH;
        x2 += val_x + STRETCH;
        z1 += val_z - STRETCH;
        z2 += val_z + STRETCH;
        if ty.sprite_offset == SPRITE_OFFSET_RANDOM_DROOP {
            y1 -= val_y;
            y2 -= val_y;
        }
    }

    let mut col = if ty.full_bright {
        PackedCol::WHITE
    } else {
        light.sprite_light_fast(x, y, z).into()
    };
    if ty.tinted {
        col = col.tint(ty.fog_color.into());
    }

    let vert = |x, y, z, u, v| Vertex::new(Vec3::new(x, y, z), u, v, col);
    let quads = [
        // Z-axis quad
        [
            vert(x1, y1, z1, u2, v2),
            vert(x1, y2, z1, u2, v1),
            vert(x2, y2, z2, u1, v1),
            vert(x2, y1, z2, u1, v2),
        ],
        // Z-axis mirrored
        [
            vert(x2, y1, z2, u2, v2),
            vert(x2, y2, z2, u2, v1),
            vert(x1, y2, z1, u1, v1),
            vert(x1, y1, z1, u1, v2),
        ],
        // X-axis quad
        [
            vert(x1, y1, z2, u2, v2),
            vert(x1, y2, z2, u2, v1),
            vert(x2, y2, z1, u1, v1),
            vert(x2, y1, z1, u1, v2),
        ],
        // X-axis mirrored
        [
            vert(x2, y1, z1, u2, v2),
            vert(x2, y2, z1, u2, v1),
            vert(x1, y2, z2, u1, v1),
            vert(x1, y1, z2, u1, v2),
        ],
    ];
    m.emit_sprite_quads(slice, quads);
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_blocks::types::{DrawKind, SPRITE_OFFSET_RANDOM};

    fn sprite_type(offset: u8, tinted: bool, full_bright: bool) -> BlockType {
        BlockType {
            id: 1,
            name: "sapling".into(),
            draw: DrawKind::Sprite,
            textures: [15; 6],
            sprite_offset: offset,
            full_bright,
            tinted,
            fog_color: [96, 160, 77, 255],
            blocks_skylight: false,
        }
    }

    fn emit_one(ty: &BlockType, wx: i32, wz: i32) -> Vec<Vertex> {
        let atlas = Atlas1D::new(64, 16).unwrap();
        let light = LightGrid::full_sun(16, 16);
        let mut m = MeshBuilder::new();
        let mut rng = JavaRandom::new(0);

        let slice = atlas.slice_of(ty.texture(0));
        m.prepare(atlas.slice_count);
        m.tally_sprite(slice);
        let total = m.finalize();
        assert_eq!(total, 16);
        emit_sprite(&mut m, &mut rng, &atlas, &light, ty, 0, 0, 0, wx, wz);
        m.vertices()[..16].to_vec()
    }

    #[test]
    fn no_offset_code_means_no_jitter() {
        let ty = sprite_type(0, false, false);
        let verts = emit_one(&ty, 3, 5);

        // First quad runs corner to corner of the inset square.
        assert_eq!(verts[0].pos.x, 3.0 + INSET_LO);
        assert_eq!(verts[0].pos.z, 5.0 + INSET_LO);
        assert_eq!(verts[0].pos.y, 0.0);
        assert_eq!(verts[2].pos.x, 3.0 + INSET_HI);
        assert_eq!(verts[2].pos.z, 5.0 + INSET_HI);
        assert_eq!(verts[2].pos.y, 1.0);
        // The crossed pair is centered on the cell center.
        let cx = (verts[0].pos.x + verts[2].pos.x) / 2.0;
        let cz = (verts[0].pos.z + verts[2].pos.z) / 2.0;
        assert!((cx - 3.5).abs() < 1e-6);
        assert!((cz - 5.5).abs() < 1e-6);
    }

    #[test]
    fn quads_interleave_by_orientation() {
        let ty = sprite_type(0, false, false);
        let verts = emit_one(&ty, 0, 0);

        // Z quad and its mirror traverse the same diagonal in opposite order.
        assert_eq!(verts[4].pos.x, verts[3].pos.x);
        assert_eq!(verts[4].pos.z, verts[3].pos.z);
        // X quads use the opposite diagonal.
        assert_eq!(verts[8].pos.x, verts[0].pos.x);
        assert_eq!(verts[8].pos.z, verts[2].pos.z);
    }

    #[test]
    fn jitter_is_reproducible() {
        let ty = sprite_type(SPRITE_OFFSET_RANDOM, false, false);
        let a = emit_one(&ty, 100, 250);
        let b = emit_one(&ty, 100, 250);
        assert_eq!(a, b);
    }

    #[test]
    fn jitter_matches_reference_values() {
        // Seed (5 + 1217*9) & 0x7fffffff draws X=-2, Y=3, Z=-2 sixteenths.
        let ty = sprite_type(SPRITE_OFFSET_RANDOM_DROOP, false, false);
        let verts = emit_one(&ty, 5, 9);

        let expect_x1 = 5.0 + INSET_LO + (-2.0 / 16.0) - STRETCH;
        let expect_x2 = 5.0 + INSET_HI + (-2.0 / 16.0) + STRETCH;
        let expect_z1 = 9.0 + INSET_LO + (-2.0 / 16.0) - STRETCH;
        let expect_y1 = 0.0 - 3.0 / 16.0;
        assert!((verts[0].pos.x - expect_x1).abs() < 1e-6);
        assert!((verts[0].pos.z - expect_z1).abs() < 1e-6);
        assert!((verts[0].pos.y - expect_y1).abs() < 1e-6);
        assert!((verts[2].pos.x - expect_x2).abs() < 1e-6);
    }

    #[test]
    fn droop_only_applies_to_code_seven() {
        let plain = sprite_type(SPRITE_OFFSET_RANDOM, false, false);
        let verts = emit_one(&plain, 5, 9);
        assert_eq!(verts[0].pos.y, 0.0);
        assert_eq!(verts[1].pos.y, 1.0);
    }

    #[test]
    fn tint_multiplies_fog_color() {
        let ty = sprite_type(0, true, true);
        let verts = emit_one(&ty, 0, 0);
        let expect = PackedCol::WHITE.tint(PackedCol::new(96, 160, 77, 255));
        assert_eq!(verts[0].col, expect);
    }

    #[test]
    fn uv_covers_just_under_one_tile() {
        let ty = sprite_type(0, false, false);
        let verts = emit_one(&ty, 0, 0);
        let atlas = Atlas1D::new(64, 16).unwrap();
        // Texture 15 is the last row of slice 0.
        let v_origin = atlas.v_origin(15);
        assert_eq!(verts[0].u, UV_MAX);
        assert!((verts[0].v - (v_origin + atlas.inv_tile_size * UV_MAX)).abs() < 1e-6);
        assert_eq!(verts[1].v, v_origin);
    }
}
