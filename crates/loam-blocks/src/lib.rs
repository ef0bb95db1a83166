//! Block types and the TOML-backed block registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::{BlockRegistry, BlockType};
pub use types::{Block, BlockId, DrawKind, TexId};
