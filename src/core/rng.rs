//! Spawn RNG
//!
//! Xorshift128+ drives diamond placement and palette picks. Seeding it
//! with a fixed value replays the same sequence of spawns.

use sha2::{Digest, Sha256};

const SEED_DOMAIN: &[u8] = b"DIAMOND_HUNT_SEED_V1";

/// Xorshift128+ generator.
///
/// ```
/// use diamond_hunt::core::rng::DeterministicRng;
///
/// let mut a = DeterministicRng::new(7);
/// let mut b = DeterministicRng::new(7);
/// assert_eq!(a.next_in(20, 680), b.next_in(20, 680));
/// ```
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    s0: u64,
    s1: u64,
}

impl DeterministicRng {
    /// Seed the generator. Two SplitMix64 steps expand the seed into the
    /// 128-bit state.
    pub fn new(seed: u64) -> Self {
        let mut cursor = seed;
        let s0 = splitmix64(&mut cursor);
        let s1 = splitmix64(&mut cursor);

        // The all-zero state is a fixed point
        if s0 | s1 == 0 {
            return Self { s0: 1, s1: 1 };
        }
        Self { s0, s1 }
    }

    /// Seed from the wall clock, for runs without a configured seed.
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        Self::new(derive_seed(b"spawn", &nanos.to_le_bytes()))
    }

    /// Next raw 64-bit output.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let (a, mut b) = (self.s0, self.s1);
        let out = a.wrapping_add(b);

        b ^= a;
        self.s0 = a.rotate_left(24) ^ b ^ (b << 16);
        self.s1 = b.rotate_left(37);
        out
    }

    /// Uniform-ish value below `bound` (0 when `bound` is 0).
    #[inline]
    pub fn next_below(&mut self, bound: u64) -> u64 {
        match bound {
            0 => 0,
            _ => self.next_u64() % bound,
        }
    }

    /// Value in `[min, max)`; `min` when the range is empty.
    pub fn next_in(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (i64::from(max) - i64::from(min)) as u64;
        (i64::from(min) + self.next_below(span) as i64) as i32
    }

    /// Pick one element, or `None` from an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let idx = self.next_below(items.len() as u64) as usize;
        items.get(idx)
    }
}

fn splitmix64(cursor: &mut u64) -> u64 {
    *cursor = cursor.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *cursor;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Fold a label and some entropy into a 64-bit seed.
pub fn derive_seed(label: &[u8], entropy: &[u8]) -> u64 {
    let digest = Sha256::new()
        .chain_update(SEED_DOMAIN)
        .chain_update((label.len() as u32).to_le_bytes())
        .chain_update(label)
        .chain_update(entropy)
        .finalize();

    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}
