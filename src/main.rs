//! Demo driver: fills synthetic chunks, meshes them, and reports per-pass
//! vertex statistics.

use std::error::Error;

use clap::Parser;
use hashbrown::HashMap;

use loam_atlas::Atlas1D;
use loam_blocks::BlockRegistry;
use loam_blocks::types::Block;
use loam_chunk::{ChunkBuf, ChunkCoord};
use loam_geom::Aabb;
use loam_mesh::{ChunkMesh, ChunkMesher};

#[derive(Parser, Debug)]
#[command(name = "loam", about = "Voxel chunk meshing demo")]
struct Args {
    /// Block table to load.
    #[arg(long, default_value = "assets/voxels/blocks.toml")]
    blocks: String,
    /// Mesh chunks in [-radius, radius] on both axes.
    #[arg(long, default_value_t = 2)]
    radius: i32,
    /// Chunk dimensions.
    #[arg(long, default_value_t = 16)]
    size_x: usize,
    #[arg(long, default_value_t = 64)]
    size_y: usize,
    #[arg(long, default_value_t = 16)]
    size_z: usize,
    /// Atlas geometry.
    #[arg(long, default_value_t = 64)]
    atlas_tiles: usize,
    #[arg(long, default_value_t = 16)]
    tiles_per_slice: usize,
}

struct DemoBlocks {
    stone: Block,
    dirt: Block,
    grass: Block,
    water: Block,
    sapling: Block,
    tall_grass: Block,
}

impl DemoBlocks {
    fn resolve(reg: &BlockRegistry) -> Result<Self, Box<dyn Error>> {
        let id = |name: &str| {
            reg.id_by_name(name)
                .map(Block::new)
                .ok_or_else(|| format!("block table is missing '{name}'"))
        };
        Ok(Self {
            stone: id("stone")?,
            dirt: id("dirt")?,
            grass: id("grass")?,
            water: id("water")?,
            sapling: id("sapling")?,
            tall_grass: id("tall_grass")?,
        })
    }
}

/// Every texture id in the block table must land in a prepared atlas slice;
/// the mesher indexes its partition set by slice and trusts its inputs.
fn check_atlas_covers(reg: &BlockRegistry, atlas: &Atlas1D) -> Result<(), Box<dyn Error>> {
    for ty in &reg.blocks {
        for &tex in &ty.textures {
            let slice = atlas.slice_of(tex);
            if slice >= atlas.slice_count {
                return Err(format!(
                    "block '{}' uses texture {tex} in atlas slice {slice}, \
                     but the atlas only has {} slice(s)",
                    ty.name, atlas.slice_count
                )
                .into());
            }
        }
    }
    Ok(())
}

/// Deterministic rolling-hills fill; no worldgen, just enough variety to
/// exercise every draw kind.
fn fill_chunk(coord: ChunkCoord, sx: usize, sy: usize, sz: usize, blocks: &DemoBlocks) -> ChunkBuf {
    let mut buf = ChunkBuf::new(coord, sx, sy, sz);
    let sea = sy / 4;
    for z in 0..sz {
        for x in 0..sx {
            let wx = coord.cx * sx as i32 + x as i32;
            let wz = coord.cz * sz as i32 + z as i32;
            let rolling = ((wx as f32 * 0.21).sin() + (wz as f32 * 0.17).cos()) * 4.0;
            let h = ((sea as f32 + rolling) as usize).clamp(1, sy - 2);

            for y in 0..h.saturating_sub(3) {
                buf.set_local(x, y, z, blocks.stone);
            }
            for y in h.saturating_sub(3)..h {
                buf.set_local(x, y, z, blocks.dirt);
            }
            if h > sea {
                buf.set_local(x, h, z, blocks.grass);
                match (wx * 31 + wz * 17).rem_euclid(23) {
                    0 => buf.set_local(x, h + 1, z, blocks.sapling),
                    1 | 2 => buf.set_local(x, h + 1, z, blocks.tall_grass),
                    _ => {}
                }
            } else {
                for y in h..=sea {
                    buf.set_local(x, y, z, blocks.water);
                }
            }
        }
    }
    buf
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let reg = BlockRegistry::from_path(&args.blocks)?;
    let atlas = Atlas1D::new(args.atlas_tiles, args.tiles_per_slice)?;
    check_atlas_covers(&reg, &atlas)?;
    let blocks = DemoBlocks::resolve(&reg)?;

    let mut mesher = ChunkMesher::new();
    let mut cache: HashMap<(i32, i32), ChunkMesh> = HashMap::new();

    for cz in -args.radius..=args.radius {
        for cx in -args.radius..=args.radius {
            let coord = ChunkCoord::new(cx, cz);
            let buf = fill_chunk(coord, args.size_x, args.size_y, args.size_z, &blocks);
            let mesh = mesher.build(&buf, &reg, &atlas);
            log::info!(
                "chunk ({cx},{cz}): {} vertices, {} slices",
                mesh.total_vertices(),
                atlas.slice_count,
            );
            cache.insert((cx, cz), mesh);
        }
    }

    let bounds = cache.values().map(|m| m.bbox).reduce(Aabb::union);
    if let Some(b) = bounds {
        log::info!("world bounds {:?} .. {:?}", b.min, b.max);
    }

    let total: usize = cache.values().map(|m| m.total_vertices()).sum();
    let opaque: usize = cache
        .values()
        .flat_map(|m| m.opaque.iter())
        .map(|p| p.vertices_count())
        .sum();
    let sprites: usize = cache
        .values()
        .flat_map(|m| m.opaque.iter())
        .map(|p| p.sprite.count)
        .sum();
    log::info!(
        "{} chunks meshed: {total} vertices ({opaque} opaque incl. {sprites} sprite, {} translucent)",
        cache.len(),
        total - opaque,
    );
    Ok(())
}
