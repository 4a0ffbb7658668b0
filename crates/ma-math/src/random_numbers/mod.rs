//! Seedable standard-normal generators.
//!
//! Every simulation owns its generator; nothing here touches process-wide
//! state, so independent runs can live on separate threads. Two generators
//! are provided behind the [`NormalRng`] trait:
//!
//! * [`InverseCumulativeNormalRng`] — Mersenne Twister MT19937-64 uniforms
//!   pushed through the inverse normal CDF. The default for the VAR
//!   discretizer.
//! * [`StdNormalRng`] — `rand`'s `StdRng` sampled with
//!   `rand_distr::StandardNormal`.

use ma_core::Real;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_mt::Mt19937GenRand64;

/// A source of independent standard-normal deviates.
///
/// Implementations must be deterministic given their seed: two generators
/// built from the same seed produce the same sequence.
pub trait NormalRng {
    /// Draw the next standard-normal deviate.
    fn next_normal(&mut self) -> Real;

    /// Fill `out` with consecutive deviates.
    fn fill_normal(&mut self, out: &mut [Real]) {
        for v in out.iter_mut() {
            *v = self.next_normal();
        }
    }
}

impl<R: NormalRng + ?Sized> NormalRng for &mut R {
    fn next_normal(&mut self) -> Real {
        (**self).next_normal()
    }
}

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
#[derive(Clone)]
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)` with 53 random bits.
    pub fn next_real(&mut self) -> Real {
        const SCALE: Real = 1.0 / (1u64 << 53) as Real;
        (self.rng.next_u64() >> 11) as Real * SCALE
    }
}

/// Standard-normal deviates by inversion of Mersenne Twister uniforms.
#[derive(Clone)]
pub struct InverseCumulativeNormalRng {
    inner: MersenneTwisterUniformRng,
}

impl InverseCumulativeNormalRng {
    /// Create a new generator backed by a Mersenne Twister with the given
    /// seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: MersenneTwisterUniformRng::new(seed),
        }
    }
}

impl NormalRng for InverseCumulativeNormalRng {
    fn next_normal(&mut self) -> Real {
        // 0 maps to -inf; (0, 1) is all the inverse CDF accepts.
        let u = loop {
            let u = self.inner.next_real();
            if u > 0.0 {
                break u;
            }
        };
        crate::distributions::normal_cdf_inverse(u)
    }
}

/// Standard-normal deviates from `rand`'s seedable `StdRng`.
///
/// The `StdRng` algorithm may change between `rand` releases, so sequences
/// are reproducible only for a fixed `rand` version.
#[derive(Clone)]
pub struct StdNormalRng {
    rng: StdRng,
}

impl StdNormalRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NormalRng for StdNormalRng {
    fn next_normal(&mut self) -> Real {
        self.rng.sample(StandardNormal)
    }
}
