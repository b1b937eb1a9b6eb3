use xxhash_rust::xxh3::{Xxh3, xxh3_64_with_seed};

/// Seed shared by every stable hash in the crate. Changing it changes background offsets.
pub(crate) const XXH3_SEED: u64 = 0x8b5a_d4a0_c7d8_e9f1;

pub(crate) fn stable_hash64(bytes: &[u8]) -> u64 {
    xxh3_64_with_seed(bytes, XXH3_SEED)
}

/// Incremental hasher with explicit little-endian encodings so digests are platform-stable.
pub(crate) struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    pub(crate) fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    pub(crate) fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    pub(crate) fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub(crate) fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_i32(&mut self, v: i32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    // Length-prefixed so ("ab","c") and ("a","bc") differ.
    pub(crate) fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    pub(crate) fn digest128(&self) -> u128 {
        self.inner.digest128()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
