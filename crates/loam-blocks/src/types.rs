use serde::Deserialize;

pub type BlockId = u16;

/// Packed texture id: atlas slice in the high bits, tile row in the low bits.
/// Decoding lives in `loam-atlas`.
pub type TexId = u16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block {
    pub id: BlockId,
}

impl Block {
    pub const AIR: Block = Block { id: 0 };

    #[inline]
    pub const fn new(id: BlockId) -> Self {
        Self { id }
    }
}

/// How a block participates in meshing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawKind {
    /// Invisible; contributes nothing to the mesh.
    #[default]
    Gas,
    /// Six cuboid faces in the opaque pass.
    Opaque,
    /// Six cuboid faces in the translucent pass.
    Translucent,
    /// Crossed billboard quads, always in the opaque pass.
    Sprite,
}

impl DrawKind {
    #[inline]
    pub fn is_cuboid(self) -> bool {
        matches!(self, DrawKind::Opaque | DrawKind::Translucent)
    }
}

/// Sprite offset codes in this range get deterministic positional jitter.
pub const SPRITE_OFFSET_RANDOM: u8 = 6;
/// Like [`SPRITE_OFFSET_RANDOM`], plus a vertical droop.
pub const SPRITE_OFFSET_RANDOM_DROOP: u8 = 7;

#[inline]
pub fn sprite_offset_is_random(code: u8) -> bool {
    (SPRITE_OFFSET_RANDOM..=SPRITE_OFFSET_RANDOM_DROOP).contains(&code)
}
