use rand::rngs::SmallRng;
use rand::{Error, Rng, RngCore, SeedableRng};

/// Source of uniform values in `[0, 1)` driving every shuffle and pick.
pub trait RandomSource {
    fn next(&mut self) -> f64;
}

/// Exposes a `RandomSource` as an `RngCore`, so `rand`'s slice and range
/// helpers can draw from it.
pub struct SourceRng<'a> {
    source: &'a mut dyn RandomSource,
}

impl<'a> SourceRng<'a> {
    pub fn new(source: &'a mut dyn RandomSource) -> Self {
        Self { source }
    }
}

impl RngCore for SourceRng<'_> {
    fn next_u32(&mut self) -> u32 {
        (self.source.next() * 4_294_967_296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        (self.source.next() * 18_446_744_073_709_551_616.0) as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Entropy-seeded `SmallRng` used outside of tests.
#[derive(Debug, Clone)]
pub struct EntropyRandom {
    rng: SmallRng,
}

impl EntropyRandom {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRandom {
    fn next(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Range sampling rejects some draws and asks again. `0.0` is never
/// rejected, so a cycle that contains it always makes progress.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    position: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 0.999_999))
            .collect();
        Self {
            values,
            position: 0,
        }
    }

    /// Always yields zero: every pick is the first slot and every shuffle
    /// is the same fixed permutation.
    pub fn zeros() -> Self {
        Self::new(vec![0.0])
    }
}

impl RandomSource for SequenceRandom {
    fn next(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}
