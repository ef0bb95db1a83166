//! Chunk-to-mesh conversion: count-then-emit vertex packing by render pass
//! and atlas slice, cuboid faces plus jittered billboard sprites.
#![forbid(unsafe_code)]

pub mod build;
pub mod builder;
pub mod face;
pub mod part;
pub mod rng;
pub mod sprite;
pub mod tile;
pub mod vertex;

pub use build::{ChunkMesh, ChunkMesher, PartRanges, Range};
pub use builder::{MeshBuilder, Pass};
pub use face::{FACE_COUNT, FACES, Face};
pub use part::Partition;
pub use rng::JavaRandom;
pub use vertex::{PackedCol, Vertex};
