//! Deterministic 48-bit linear-congruential generator.
//!
//! Sprite jitter is a visible contract: the classic client derives it from
//! Java's `Random`, so the exact multiplier, increment, seed scrambling, and
//! `nextInt` rejection loop are reproduced here bit for bit. The generator
//! is reseeded before every use and never carries state between sprites.

const MULTIPLIER: i64 = 0x5DEECE66D;
const INCREMENT: i64 = 0xB;
const MASK: i64 = (1 << 48) - 1;

#[derive(Clone, Debug)]
pub struct JavaRandom {
    seed: i64,
}

impl Default for JavaRandom {
    fn default() -> Self {
        JavaRandom::new(0)
    }
}

impl JavaRandom {
    pub fn new(seed: i32) -> Self {
        let mut rng = Self { seed: 0 };
        rng.set_seed(seed);
        rng
    }

    #[inline]
    pub fn set_seed(&mut self, seed: i32) {
        self.seed = (seed as i64 ^ MULTIPLIER) & MASK;
    }

    /// Advances the state and returns the top 31 bits.
    #[inline]
    fn next_bits(&mut self) -> i32 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT) & MASK;
        (self.seed >> 17) as i32
    }

    /// Uniform integer in `[0, n)`, matching Java's `nextInt(n)`.
    pub fn next_int(&mut self, n: i32) -> i32 {
        debug_assert!(n > 0);
        if (n & n.wrapping_neg()) == n {
            // Power of two: single draw, high bits.
            return ((n as i64 * self.next_bits() as i64) >> 31) as i32;
        }
        loop {
            let bits = self.next_bits();
            let val = bits % n;
            if bits.wrapping_sub(val).wrapping_add(n - 1) >= 0 {
                return val;
            }
        }
    }

    /// Uniform integer in `[min, max)`.
    #[inline]
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        min + self.next_int(max - min)
    }
}
