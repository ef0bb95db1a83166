//! Two-pass chunk mesh driver.

use loam_atlas::Atlas1D;
use loam_blocks::BlockRegistry;
use loam_chunk::{ChunkBuf, ChunkCoord};
use loam_geom::{Aabb, Vec3};
use loam_lighting::LightGrid;

use crate::builder::{MeshBuilder, Pass};
use crate::face::FACE_COUNT;
use crate::part::Partition;
use crate::rng::JavaRandom;
use crate::tile::{TileCtx, renderer_for};
use crate::vertex::Vertex;

/// One contiguous sub-range of the vertex buffer, drawable in one call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub count: usize,
}

/// Draw metadata for one (slice, pass) partition, snapshotted after sizing
/// and before emission advances the write cursors.
#[derive(Clone, Copy, Debug, Default)]
pub struct PartRanges {
    pub faces: [Range; FACE_COUNT],
    pub sprite: Range,
    pub sprite_stride: usize,
}

impl PartRanges {
    fn snapshot(part: &Partition) -> Self {
        let mut faces = [Range::default(); FACE_COUNT];
        for i in 0..FACE_COUNT {
            faces[i] = Range {
                start: part.face_offset[i],
                count: part.face_count[i],
            };
        }
        Self {
            faces,
            sprite: Range {
                start: part.sprite_index,
                count: part.sprite_count,
            },
            sprite_stride: part.sprite_advance,
        }
    }

    #[inline]
    pub fn vertices_count(&self) -> usize {
        self.sprite.count + self.faces.iter().map(|r| r.count).sum::<usize>()
    }
}

/// Finished mesh for one chunk: the packed vertex buffer plus, per atlas
/// slice and pass, the sub-ranges a renderer addresses one draw call each.
pub struct ChunkMesh {
    pub coord: ChunkCoord,
    /// World-space bounds of the chunk, for renderer-side culling.
    pub bbox: Aabb,
    pub vertices: Vec<Vertex>,
    pub opaque: Vec<PartRanges>,
    pub translucent: Vec<PartRanges>,
}

impl ChunkMesh {
    #[inline]
    pub fn total_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Reusable chunk mesher. The partition set and vertex buffer grow
/// monotonically and persist across rebuilds; one instance serves one chunk
/// worker at a time.
#[derive(Default)]
pub struct ChunkMesher {
    builder: MeshBuilder,
    rng: JavaRandom,
}

impl ChunkMesher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Meshes one chunk: reset, tally pass, sizing, emission pass.
    pub fn build(&mut self, buf: &ChunkBuf, reg: &BlockRegistry, atlas: &Atlas1D) -> ChunkMesh {
        let light = LightGrid::compute(buf, reg);
        let base_x = buf.coord.cx * buf.sx as i32;
        let base_z = buf.coord.cz * buf.sz as i32;

        let ChunkMesher { builder, rng } = self;
        builder.prepare(atlas.slice_count);

        let mut ctx = TileCtx {
            buf,
            reg,
            atlas,
            light: &light,
            rng,
            base_x,
            base_z,
        };

        // Pass 1: count only.
        for z in 0..buf.sz {
            for y in 0..buf.sy {
                for x in 0..buf.sx {
                    let b = buf.get_local(x, y, z);
                    let Some(ty) = reg.get(b.id) else { continue };
                    if let Some(r) = renderer_for(ty.draw) {
                        r.tally(builder, &mut ctx, ty, x, y, z);
                    }
                }
            }
        }

        let total = builder.finalize();

        let opaque: Vec<PartRanges> = (0..builder.slice_count())
            .map(|i| PartRanges::snapshot(builder.part(i, Pass::Opaque)))
            .collect();
        let translucent: Vec<PartRanges> = (0..builder.slice_count())
            .map(|i| PartRanges::snapshot(builder.part(i, Pass::Translucent)))
            .collect();

        // Pass 2: emit in the identical traversal order.
        for z in 0..buf.sz {
            for y in 0..buf.sy {
                for x in 0..buf.sx {
                    let b = buf.get_local(x, y, z);
                    let Some(ty) = reg.get(b.id) else { continue };
                    if let Some(r) = renderer_for(ty.draw) {
                        r.emit(builder, &mut ctx, ty, x, y, z);
                    }
                }
            }
        }

        log::debug!(
            "meshed chunk ({},{}) verts={} slices={}",
            buf.coord.cx,
            buf.coord.cz,
            total,
            atlas.slice_count,
        );

        ChunkMesh {
            coord: buf.coord,
            bbox: Aabb::new(
                Vec3::new(base_x as f32, 0.0, base_z as f32),
                Vec3::new(
                    (base_x + buf.sx as i32) as f32,
                    buf.sy as f32,
                    (base_z + buf.sz as i32) as f32,
                ),
            ),
            vertices: builder.vertices()[..total].to_vec(),
            opaque,
            translucent,
        }
    }
}
