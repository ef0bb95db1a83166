use crate::face::Face;
use crate::part::Partition;
use crate::vertex::Vertex;

/// Render pass of a cuboid face. Sprites always land in the opaque pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Opaque,
    Translucent,
}

/// Extra slots appended past the counted demand when the buffer grows.
const BUFFER_PAD: usize = 2;

/// Two-pass mesh accumulation for one chunk.
///
/// Protocol per rebuild: [`MeshBuilder::prepare`], then tally every visible
/// face and sprite, then [`MeshBuilder::finalize`], then emit in the same
/// order as the tally. Partitions and the vertex buffer grow monotonically
/// and are reused across rebuilds.
#[derive(Default)]
pub struct MeshBuilder {
    vertices: Vec<Vertex>,
    opaque: Vec<Partition>,
    translucent: Vec<Partition>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets partition state, growing the collection if `required_slices`
    /// exceeds every previous rebuild's demand. Must run before any tally.
    pub fn prepare(&mut self, required_slices: usize) {
        if self.opaque.len() < required_slices {
            self.opaque = vec![Partition::default(); required_slices];
            self.translucent = vec![Partition::default(); required_slices];
        } else {
            for part in self.opaque.iter_mut().chain(self.translucent.iter_mut()) {
                part.reset();
            }
        }
    }

    #[inline]
    pub fn slice_count(&self) -> usize {
        self.opaque.len()
    }

    #[inline]
    fn parts(&self, pass: Pass) -> &[Partition] {
        match pass {
            Pass::Opaque => &self.opaque,
            Pass::Translucent => &self.translucent,
        }
    }

    #[inline]
    fn parts_mut(&mut self, pass: Pass) -> &mut [Partition] {
        match pass {
            Pass::Opaque => &mut self.opaque,
            Pass::Translucent => &mut self.translucent,
        }
    }

    #[inline]
    pub fn part(&self, slice: usize, pass: Pass) -> &Partition {
        &self.parts(pass)[slice]
    }

    /// Queues one quad (4 vertices) for a cuboid face.
    #[inline]
    pub fn tally_face(&mut self, slice: usize, pass: Pass, face: Face) {
        self.parts_mut(pass)[slice].face_count[face.index()] += 4;
    }

    /// Queues one sprite (4 quads, 16 vertices) in the opaque pass.
    #[inline]
    pub fn tally_sprite(&mut self, slice: usize) {
        self.opaque[slice].sprite_count += 4 * 4;
    }

    /// Total vertex demand across every partition, in slice order.
    pub fn total_vertices(&self) -> usize {
        let mut count = 0;
        for i in 0..self.opaque.len() {
            count += self.opaque[i].vertices_count();
            count += self.translucent[i].vertices_count();
        }
        count
    }

    /// Sizes the output buffer and assigns every partition a disjoint
    /// contiguous range. Returns the total vertex count. No buffer growth
    /// or offset change happens after this until the next rebuild.
    pub fn finalize(&mut self) -> usize {
        let total = self.total_vertices();
        if self.vertices.len() < total + BUFFER_PAD {
            self.vertices = vec![Vertex::default(); total + BUFFER_PAD];
        }

        // Ranges are laid out as: opaque 0, translucent 0, opaque 1, ...
        let mut offset = 0;
        for i in 0..self.opaque.len() {
            self.opaque[i].calc_offsets(&mut offset);
            self.translucent[i].calc_offsets(&mut offset);
        }
        debug_assert_eq!(offset, total);
        total
    }

    /// Writes one cuboid face quad at its partition's face cursor.
    pub fn emit_face(&mut self, slice: usize, pass: Pass, face: Face, quad: [Vertex; 4]) {
        let part = &self.parts(pass)[slice];
        let at = part.face_offset[face.index()];
        debug_assert!(
            at + 4 <= part.face_end[face.index()],
            "face emission past tallied range (slice {slice}, face {face:?})"
        );
        self.vertices[at..at + 4].copy_from_slice(&quad);
        self.parts_mut(pass)[slice].face_offset[face.index()] = at + 4;
    }

    /// Writes one sprite's four quads, strided so that quads of the same
    /// orientation from different sprites group together, then advances the
    /// sprite cursor by one quad (4 slots), not by all 16.
    pub fn emit_sprite_quads(&mut self, slice: usize, quads: [[Vertex; 4]; 4]) {
        let part = &self.opaque[slice];
        let base = part.sprite_index;
        let advance = part.sprite_advance;
        debug_assert!(
            base + 4 <= part.sprite_end,
            "sprite emission past tallied range (slice {slice})"
        );
        for (k, quad) in quads.iter().enumerate() {
            let at = base + k * advance;
            self.vertices[at..at + 4].copy_from_slice(quad);
        }
        self.opaque[slice].sprite_index = base + 4;
    }

    /// The output buffer. Slots past the current rebuild's total hold stale
    /// data from prior rebuilds.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::FACES;
    use crate::vertex::PackedCol;
    use loam_geom::Vec3;
    use proptest::prelude::*;

    fn quad(tag: f32) -> [Vertex; 4] {
        [0, 1, 2, 3].map(|i| Vertex::new(Vec3::new(tag, i as f32, 0.0), 0.0, 0.0, PackedCol::WHITE))
    }

    #[test]
    fn empty_rebuild_is_zero_and_keeps_buffer() {
        let mut m = MeshBuilder::new();
        m.prepare(3);
        assert_eq!(m.finalize(), 0);
        let ptr = m.vertices().as_ptr();

        m.prepare(3);
        assert_eq!(m.finalize(), 0);
        assert_eq!(m.vertices().as_ptr(), ptr);
    }

    #[test]
    fn single_cube_scenario() {
        let mut m = MeshBuilder::new();
        m.prepare(1);
        for face in FACES {
            m.tally_face(0, Pass::Opaque, face);
        }
        assert_eq!(m.finalize(), 24);

        let part = m.part(0, Pass::Opaque);
        assert_eq!(part.sprite_count, 0);
        assert_eq!(part.face_offset, [0, 4, 8, 12, 16, 20]);
    }

    #[test]
    fn sprite_region_precedes_faces() {
        let mut m = MeshBuilder::new();
        m.prepare(1);
        m.tally_sprite(0);
        m.tally_face(0, Pass::Opaque, Face::Top);
        m.finalize();

        let part = m.part(0, Pass::Opaque);
        assert_eq!(part.sprite_index, 0);
        assert_eq!(part.sprite_advance, 4);
        assert_eq!(part.face_offset[Face::Top.index()], 16);
    }

    #[test]
    fn passes_stay_separate() {
        let mut m = MeshBuilder::new();
        m.prepare(2);
        m.tally_face(1, Pass::Translucent, Face::Back);
        m.finalize();

        assert_eq!(m.part(1, Pass::Opaque).vertices_count(), 0);
        assert_eq!(m.part(1, Pass::Translucent).vertices_count(), 4);
    }

    #[test]
    fn partitions_interleave_opaque_then_translucent_per_slice() {
        let mut m = MeshBuilder::new();
        m.prepare(2);
        m.tally_face(0, Pass::Opaque, Face::Left);
        m.tally_face(0, Pass::Translucent, Face::Left);
        m.tally_face(1, Pass::Opaque, Face::Left);
        m.finalize();

        assert_eq!(m.part(0, Pass::Opaque).face_offset[0], 0);
        assert_eq!(m.part(0, Pass::Translucent).face_offset[0], 4);
        assert_eq!(m.part(1, Pass::Opaque).face_offset[0], 8);
    }

    #[test]
    fn buffer_grows_only_when_demand_exceeds_it() {
        let mut m = MeshBuilder::new();
        m.prepare(1);
        for face in FACES {
            m.tally_face(0, Pass::Opaque, face);
        }
        m.finalize();
        let ptr = m.vertices().as_ptr();
        let len = m.vertices().len();

        // Smaller rebuild reuses the buffer.
        m.prepare(1);
        m.tally_face(0, Pass::Opaque, Face::Top);
        m.finalize();
        assert_eq!(m.vertices().as_ptr(), ptr);
        assert_eq!(m.vertices().len(), len);

        // Larger rebuild reallocates to demand + pad.
        m.prepare(1);
        for face in FACES {
            m.tally_face(0, Pass::Opaque, face);
        }
        m.tally_sprite(0);
        let total = m.finalize();
        assert_eq!(m.vertices().len(), total + 2);
    }

    #[test]
    fn prepare_grows_partitions_monotonically() {
        let mut m = MeshBuilder::new();
        m.prepare(2);
        assert_eq!(m.slice_count(), 2);
        m.prepare(5);
        assert_eq!(m.slice_count(), 5);
        // Shrinking demand keeps the larger collection, reset to zero.
        m.prepare(1);
        assert_eq!(m.slice_count(), 5);
        assert_eq!(m.part(4, Pass::Opaque).vertices_count(), 0);
    }

    #[test]
    fn matching_emission_fills_exactly() {
        let mut m = MeshBuilder::new();
        m.prepare(1);
        m.tally_face(0, Pass::Opaque, Face::Left);
        m.tally_face(0, Pass::Opaque, Face::Left);
        m.tally_sprite(0);
        let total = m.finalize();
        assert_eq!(total, 24);

        m.emit_sprite_quads(0, [quad(10.0), quad(11.0), quad(12.0), quad(13.0)]);
        m.emit_face(0, Pass::Opaque, Face::Left, quad(1.0));
        m.emit_face(0, Pass::Opaque, Face::Left, quad(2.0));

        let v = m.vertices();
        // Sprite quads occupy the strided groups at 0, 4, 8, 12.
        assert_eq!(v[0].pos.x, 10.0);
        assert_eq!(v[4].pos.x, 11.0);
        assert_eq!(v[8].pos.x, 12.0);
        assert_eq!(v[12].pos.x, 13.0);
        // Face quads follow the sprite region back to back.
        assert_eq!(v[16].pos.x, 1.0);
        assert_eq!(v[20].pos.x, 2.0);
    }

    proptest! {
        /// Partition ranges are pairwise disjoint and cover [0, total).
        #[test]
        fn ranges_partition_the_buffer(
            tallies in proptest::collection::vec(
                (0usize..4, 0usize..2, 0usize..7), 0..64,
            )
        ) {
            let mut m = MeshBuilder::new();
            m.prepare(4);
            for (slice, pass, op) in tallies {
                let pass = if pass == 0 { Pass::Opaque } else { Pass::Translucent };
                if op == 6 {
                    m.tally_sprite(slice);
                } else {
                    m.tally_face(slice, pass, Face::from_index(op));
                }
            }
            let total = m.finalize();

            let mut ranges: Vec<(usize, usize)> = Vec::new();
            for slice in 0..4 {
                for pass in [Pass::Opaque, Pass::Translucent] {
                    let p = m.part(slice, pass);
                    if p.sprite_count > 0 {
                        ranges.push((p.sprite_index, p.sprite_count));
                    }
                    for f in 0..6 {
                        if p.face_count[f] > 0 {
                            ranges.push((p.face_offset[f], p.face_count[f]));
                        }
                    }
                }
            }
            ranges.sort();
            let mut cursor = 0;
            for (start, count) in ranges {
                prop_assert_eq!(start, cursor);
                cursor += count;
            }
            prop_assert_eq!(cursor, total);
        }
    }
}
