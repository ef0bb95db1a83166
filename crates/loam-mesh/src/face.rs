#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    Left = 0,
    Right = 1,
    Front = 2,
    Back = 3,
    Bottom = 4,
    Top = 5,
}

pub const FACE_COUNT: usize = 6;

/// All faces in offset-assignment order.
pub const FACES: [Face; FACE_COUNT] = [
    Face::Left,
    Face::Right,
    Face::Front,
    Face::Back,
    Face::Bottom,
    Face::Top,
];

impl Face {
    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a face index `[0..6)` back into a `Face` value.
    /// Falls back to `Top` for out-of-range indices.
    #[inline]
    pub fn from_index(i: usize) -> Face {
        match i {
            0 => Face::Left,
            1 => Face::Right,
            2 => Face::Front,
            3 => Face::Back,
            4 => Face::Bottom,
            _ => Face::Top,
        }
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::Left => (-1, 0, 0),
            Face::Right => (1, 0, 0),
            Face::Front => (0, 0, -1),
            Face::Back => (0, 0, 1),
            Face::Bottom => (0, -1, 0),
            Face::Top => (0, 1, 0),
        }
    }
}
