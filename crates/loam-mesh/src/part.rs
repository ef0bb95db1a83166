use crate::face::FACE_COUNT;

/// Per (render pass, atlas slice) accumulation record.
///
/// During the tally pass only the counts grow. [`Partition::calc_offsets`]
/// then assigns this partition a contiguous range of the output buffer:
/// the sprite sub-stream first, then the six face streams in fixed face
/// order. During emission the offset fields double as write cursors.
#[derive(Clone, Copy, Debug, Default)]
pub struct Partition {
    /// Vertices tallied per face; always a multiple of 4.
    pub face_count: [usize; FACE_COUNT],
    /// Base index per face after sizing; write cursor during emission.
    pub face_offset: [usize; FACE_COUNT],
    /// Sprite vertices tallied; a multiple of 16 (4 quads of 4).
    pub sprite_count: usize,
    /// Base index of the sprite sub-stream; write cursor during emission.
    pub sprite_index: usize,
    /// Stride between the four quad-orientation groups of the sub-stream.
    pub sprite_advance: usize,
    /// One past the end of each face range; only consulted by debug asserts.
    pub face_end: [usize; FACE_COUNT],
    /// One past the end of the first quad-orientation group.
    pub sprite_end: usize,
}

impl Partition {
    /// Total vertex demand of this partition.
    #[inline]
    pub fn vertices_count(&self) -> usize {
        self.sprite_count + self.face_count.iter().sum::<usize>()
    }

    /// Assigns this partition's range starting at `*offset` and advances
    /// `*offset` past it.
    pub fn calc_offsets(&mut self, offset: &mut usize) {
        self.sprite_index = *offset;
        self.sprite_advance = self.sprite_count / 4;

        self.face_offset[0] = *offset + self.sprite_count;
        for i in 1..FACE_COUNT {
            self.face_offset[i] = self.face_offset[i - 1] + self.face_count[i - 1];
        }
        for i in 0..FACE_COUNT {
            self.face_end[i] = self.face_offset[i] + self.face_count[i];
        }
        self.sprite_end = self.sprite_index + self.sprite_advance;

        *offset += self.vertices_count();
    }

    pub fn reset(&mut self) {
        *self = Partition::default();
    }
}
