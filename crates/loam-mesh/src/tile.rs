//! Per-draw-kind tile rendering strategies.
//!
//! Both meshing passes go through the same strategy object: `tally` counts
//! exactly what `emit` later writes, so the two passes cannot diverge per
//! rendering style.

use loam_atlas::Atlas1D;
use loam_blocks::BlockRegistry;
use loam_blocks::registry::BlockType;
use loam_blocks::types::DrawKind;
use loam_chunk::ChunkBuf;
use loam_geom::Vec3;
use loam_lighting::LightGrid;

use crate::builder::{MeshBuilder, Pass};
use crate::face::{FACES, Face};
use crate::rng::JavaRandom;
use crate::sprite::{UV_MAX, emit_sprite};
use crate::vertex::{PackedCol, Vertex};

pub struct TileCtx<'a> {
    pub buf: &'a ChunkBuf,
    pub reg: &'a BlockRegistry,
    pub atlas: &'a Atlas1D,
    pub light: &'a LightGrid,
    pub rng: &'a mut JavaRandom,
    /// World coordinates of the chunk's (0, _, 0) corner.
    pub base_x: i32,
    pub base_z: i32,
}

pub trait TileRenderer {
    fn tally(&self, m: &mut MeshBuilder, ctx: &mut TileCtx<'_>, ty: &BlockType, x: usize, y: usize, z: usize);
    fn emit(&self, m: &mut MeshBuilder, ctx: &mut TileCtx<'_>, ty: &BlockType, x: usize, y: usize, z: usize);
}

/// Strategy for a block's draw kind; `None` for invisible blocks.
pub fn renderer_for(kind: DrawKind) -> Option<&'static dyn TileRenderer> {
    match kind {
        DrawKind::Gas => None,
        DrawKind::Opaque | DrawKind::Translucent => Some(&CuboidTiles),
        DrawKind::Sprite => Some(&SpriteTiles),
    }
}

/// A cuboid face is hidden behind opaque neighbors, and behind same-block
/// translucent neighbors (adjacent water cells share no inner walls).
/// Neighbors outside the chunk never occlude.
fn face_visible(ctx: &TileCtx<'_>, ty: &BlockType, x: usize, y: usize, z: usize, face: Face) -> bool {
    let (dx, dy, dz) = face.delta();
    let Some(nb) = ctx.buf.get(x as i32 + dx, y as i32 + dy, z as i32 + dz) else {
        return true;
    };
    match ctx.reg.draw_kind(nb) {
        DrawKind::Opaque => false,
        DrawKind::Translucent => !(ty.draw == DrawKind::Translucent && nb.id == ty.id),
        _ => true,
    }
}

pub struct CuboidTiles;

impl TileRenderer for CuboidTiles {
    fn tally(&self, m: &mut MeshBuilder, ctx: &mut TileCtx<'_>, ty: &BlockType, x: usize, y: usize, z: usize) {
        let pass = pass_for(ty);
        for face in FACES {
            if face_visible(ctx, ty, x, y, z, face) {
                let slice = ctx.atlas.slice_of(ty.texture(face.index()));
                m.tally_face(slice, pass, face);
            }
        }
    }

    fn emit(&self, m: &mut MeshBuilder, ctx: &mut TileCtx<'_>, ty: &BlockType, x: usize, y: usize, z: usize) {
        let pass = pass_for(ty);
        for face in FACES {
            if face_visible(ctx, ty, x, y, z, face) {
                let tex = ty.texture(face.index());
                let slice = ctx.atlas.slice_of(tex);
                let mut col: PackedCol = ctx.light.face_light(x, y, z, face.index()).into();
                if ty.tinted {
                    col = col.tint(ty.fog_color.into());
                }
                let quad = face_quad(
                    ctx.base_x + x as i32,
                    y as i32,
                    ctx.base_z + z as i32,
                    face,
                    ctx.atlas.v_origin(tex),
                    ctx.atlas.inv_tile_size,
                    col,
                );
                m.emit_face(slice, pass, face, quad);
            }
        }
    }
}

#[inline]
fn pass_for(ty: &BlockType) -> Pass {
    if ty.draw == DrawKind::Translucent {
        Pass::Translucent
    } else {
        Pass::Opaque
    }
}

/// Unit-cell face corners with atlas UVs, top edge first.
fn face_quad(wx: i32, y: i32, wz: i32, face: Face, v_origin: f32, inv_tile: f32, col: PackedCol) -> [Vertex; 4] {
    let (x1, y1, z1) = (wx as f32, y as f32, wz as f32);
    let (x2, y2, z2) = (x1 + 1.0, y1 + 1.0, z1 + 1.0);
    let (u1, u2) = (0.0, UV_MAX);
    let v1 = v_origin;
    let v2 = v_origin + inv_tile * UV_MAX;

    let p = match face {
        Face::Left => [(x1, y2, z1), (x1, y2, z2), (x1, y1, z2), (x1, y1, z1)],
        Face::Right => [(x2, y2, z2), (x2, y2, z1), (x2, y1, z1), (x2, y1, z2)],
        Face::Front => [(x2, y2, z1), (x1, y2, z1), (x1, y1, z1), (x2, y1, z1)],
        Face::Back => [(x1, y2, z2), (x2, y2, z2), (x2, y1, z2), (x1, y1, z2)],
        Face::Bottom => [(x1, y1, z1), (x2, y1, z1), (x2, y1, z2), (x1, y1, z2)],
        Face::Top => [(x1, y2, z2), (x2, y2, z2), (x2, y2, z1), (x1, y2, z1)],
    };
    [
        Vertex::new(Vec3::new(p[0].0, p[0].1, p[0].2), u1, v1, col),
        Vertex::new(Vec3::new(p[1].0, p[1].1, p[1].2), u2, v1, col),
        Vertex::new(Vec3::new(p[2].0, p[2].1, p[2].2), u2, v2, col),
        Vertex::new(Vec3::new(p[3].0, p[3].1, p[3].2), u1, v2, col),
    ]
}

pub struct SpriteTiles;

impl TileRenderer for SpriteTiles {
    fn tally(&self, m: &mut MeshBuilder, ctx: &mut TileCtx<'_>, ty: &BlockType, _x: usize, _y: usize, _z: usize) {
        let slice = ctx.atlas.slice_of(ty.texture(Face::Right.index()));
        m.tally_sprite(slice);
    }

    fn emit(&self, m: &mut MeshBuilder, ctx: &mut TileCtx<'_>, ty: &BlockType, x: usize, y: usize, z: usize) {
        let wx = ctx.base_x + x as i32;
        let wz = ctx.base_z + z as i32;
        emit_sprite(m, ctx.rng, ctx.atlas, ctx.light, ty, x, y, z, wx, wz);
    }
}
