use serde::Deserialize;

use crate::types::DrawKind;

#[derive(Deserialize)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
    pub unknown_block: Option<String>,
}

#[derive(Deserialize)]
pub struct BlockDef {
    pub name: String,
    pub id: Option<u16>,
    pub draw: Option<DrawKind>,
    pub textures: Option<TexturesDef>,
    pub sprite_offset: Option<u8>,
    pub full_bright: Option<bool>,
    pub tinted: Option<bool>,
    pub fog_color: Option<[u8; 4]>,
    pub blocks_skylight: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum TexturesDef {
    // Simple: textures = 7
    Uniform(u16),
    // Detailed: textures = [left, right, front, back, bottom, top]
    PerFace(Vec<u16>),
}
