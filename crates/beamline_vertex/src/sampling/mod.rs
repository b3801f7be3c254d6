//! Random sampling primitives used by the vertex sampler.
//!
//! - [`table`]: prefix-sum table and inverse-CDF selection over weighted segments
//! - [`beam_profile`]: truncated 2D Gaussian transverse beam profile
use rand::RngCore;

pub mod beam_profile;
pub mod table;

pub use beam_profile::BeamProfile;
pub use table::CumulativeTable;

/// Generate a random float in the range [0, 1) with 53 bits of precision.
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Pair of independent standard normal deviates.
pub(crate) fn box_muller_pair(rng: &mut dyn RngCore) -> (f64, f64) {
    let u1 = (1.0 - rand01(rng)).clamp(f64::MIN_POSITIVE, 1.0);
    let u2 = rand01(rng);

    let r = (-2.0 * u1.ln()).sqrt();
    let theta = std::f64::consts::TAU * u2;

    (r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
pub(crate) mod test_rng {
    use rand::RngCore;

    /// Returns the same word forever.
    pub(crate) struct FixedRng {
        pub(crate) value: u64,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            (self.value >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.value
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 8];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::test_rng::FixedRng;
    use super::*;

    #[test]
    fn rand01_returns_zero_for_zero_input() {
        let mut rng = FixedRng { value: 0 };
        assert_eq!(rand01(&mut rng), 0.0);
    }

    #[test]
    fn rand01_stays_below_one_for_max_input() {
        let mut rng = FixedRng { value: u64::MAX };
        let result = rand01(&mut rng);
        assert!(result < 1.0);
        assert!(1.0 - result <= f64::EPSILON);
    }

    #[test]
    fn rand01_midpoint() {
        let mut rng = FixedRng { value: 1u64 << 63 };
        assert_eq!(rand01(&mut rng), 0.5);
    }

    #[test]
    fn box_muller_moments_are_standard_normal() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let (mut sum, mut sum_sq) = (0.0, 0.0);
        for _ in 0..n {
            let (a, b) = box_muller_pair(&mut rng);
            sum += a + b;
            sum_sq += a * a + b * b;
        }
        let count = (2 * n) as f64;
        let mean = sum / count;
        let var = sum_sq / count - mean * mean;
        assert!(mean.abs() < 0.03, "mean {mean}");
        assert!((var - 1.0).abs() < 0.05, "variance {var}");
    }

    #[test]
    fn box_muller_is_finite_at_zero_draw() {
        let mut rng = FixedRng { value: u64::MAX };
        let (a, b) = box_muller_pair(&mut rng);
        assert!(a.is_finite() && b.is_finite());
    }
}
