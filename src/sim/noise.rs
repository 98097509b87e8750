//! 1D gradient noise for snowflake drift
//!
//! Classic Perlin construction over a seeded permutation table, so two runs
//! with the same seed drift identically.

use rand::Rng;
use rand::seq::SliceRandom;

/// Seeded 1D Perlin noise
#[derive(Debug, Clone)]
pub struct Noise1D {
    /// 256-entry permutation, doubled so `perm[x + 1]` never wraps
    perm: Vec<u8>,
}

impl Noise1D {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        table.shuffle(rng);

        let mut perm = Vec::with_capacity(512);
        perm.extend_from_slice(&table);
        perm.extend_from_slice(&table);
        Self { perm }
    }

    #[inline]
    fn fade(t: f32) -> f32 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(t: f32, a: f32, b: f32) -> f32 {
        a + t * (b - a)
    }

    #[inline]
    fn grad(hash: u8, x: f32) -> f32 {
        let h = hash & 15;
        let g = 1.0 + (h & 7) as f32;
        if h & 8 != 0 { -g * x } else { g * x }
    }

    /// Sample the noise at `x`. Centered on 0.5; exactly 0.5 at integers.
    pub fn sample(&self, x: f32) -> f32 {
        let floor = x.floor();
        let xi = (floor as i64 & 255) as usize;
        let xf = x - floor;
        let u = Self::fade(xf);

        let a = self.perm[xi];
        let b = self.perm[xi + 1];

        Self::lerp(u, Self::grad(a, xf), Self::grad(b, xf - 1.0)) * 0.5 + 0.5
    }
}
