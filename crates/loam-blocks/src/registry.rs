use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::config::{BlockDef, BlocksConfig, TexturesDef};
use crate::types::{Block, BlockId, DrawKind, TexId};

pub const FACE_TEXTURES: usize = 6;

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub draw: DrawKind,
    /// Per-face packed texture ids in Left/Right/Front/Back/Bottom/Top order.
    pub textures: [TexId; FACE_TEXTURES],
    pub sprite_offset: u8,
    pub full_bright: bool,
    pub tinted: bool,
    pub fog_color: [u8; 4],
    pub blocks_skylight: bool,
}

impl BlockType {
    #[inline]
    pub fn texture(&self, face: usize) -> TexId {
        self.textures[face]
    }
}

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
    pub unknown_block_id: Option<BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            by_name: HashMap::new(),
            unknown_block_id: None,
        }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn draw_kind(&self, b: Block) -> DrawKind {
        self.get(b.id).map(|ty| ty.draw).unwrap_or(DrawKind::Gas)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = BlockRegistry::new();
        let unknown_name = cfg.unknown_block;
        for def in cfg.blocks.into_iter() {
            let ty = compile_block(&reg, def)?;
            if ty.id as usize != reg.blocks.len() {
                return Err(format!(
                    "block '{}' declares id {} but registry slot is {}",
                    ty.name,
                    ty.id,
                    reg.blocks.len()
                )
                .into());
            }
            reg.by_name.insert(ty.name.clone(), ty.id);
            reg.blocks.push(ty);
        }
        if let Some(name) = unknown_name {
            reg.unknown_block_id = reg.id_by_name(&name);
        }
        Ok(reg)
    }
}

fn compile_block(reg: &BlockRegistry, def: BlockDef) -> Result<BlockType, Box<dyn Error>> {
    let id = def.id.unwrap_or(reg.blocks.len() as u16);
    let draw = def.draw.unwrap_or_default();
    let textures = match def.textures {
        None => [0; FACE_TEXTURES],
        Some(TexturesDef::Uniform(t)) => [t; FACE_TEXTURES],
        Some(TexturesDef::PerFace(v)) => {
            let arr: [u16; FACE_TEXTURES] = v.as_slice().try_into().map_err(|_| {
                format!(
                    "block '{}': per-face textures must list exactly {} ids",
                    def.name, FACE_TEXTURES
                )
            })?;
            arr
        }
    };
    Ok(BlockType {
        id,
        name: def.name,
        draw,
        textures,
        sprite_offset: def.sprite_offset.unwrap_or(0),
        full_bright: def.full_bright.unwrap_or(false),
        tinted: def.tinted.unwrap_or(false),
        fog_color: def.fog_color.unwrap_or([255, 255, 255, 255]),
        blocks_skylight: def
            .blocks_skylight
            .unwrap_or(matches!(draw, DrawKind::Opaque)),
    })
}
