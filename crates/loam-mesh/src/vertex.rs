use loam_geom::Vec3;

/// Packed RGBA vertex color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct PackedCol {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PackedCol {
    pub const WHITE: PackedCol = PackedCol::new(255, 255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Component-wise multiply, used for fog/foliage tinting.
    #[inline]
    pub fn tint(self, other: PackedCol) -> PackedCol {
        PackedCol {
            r: ((self.r as u16 * other.r as u16) / 255) as u8,
            g: ((self.g as u16 * other.g as u16) / 255) as u8,
            b: ((self.b as u16 * other.b as u16) / 255) as u8,
            a: self.a,
        }
    }
}

impl From<[u8; 4]> for PackedCol {
    #[inline]
    fn from(c: [u8; 4]) -> Self {
        PackedCol::new(c[0], c[1], c[2], c[3])
    }
}

/// One mesh vertex: position, atlas UV, packed color.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Vertex {
    pub pos: Vec3,
    pub u: f32,
    pub v: f32,
    pub col: PackedCol,
}

impl Vertex {
    #[inline]
    pub const fn new(pos: Vec3, u: f32, v: f32, col: PackedCol) -> Self {
        Self { pos, u, v, col }
    }
}
