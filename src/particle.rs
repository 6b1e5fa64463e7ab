//! Particle storage and spawning.
//!
//! A field is a flat, unordered set of point particles. The set is created in
//! one shot for a viewport (count derived from its area) and recreated
//! wholesale whenever the viewport changes; between resets the size is fixed
//! and individual slots are only ever rewritten in place by the periodic
//! reseed.
//!
//! Randomness is injected: every spawning function takes `&mut impl Rng`, so
//! production code can feed system entropy while tests supply a seeded
//! [`SmallRng`](rand::rngs::SmallRng) and get reproducible fields.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Fewest particles a field will hold, regardless of viewport size.
pub const MIN_PARTICLES: usize = 70;
/// Most particles a field will hold; bounds the O(N²) pair sweep.
pub const MAX_PARTICLES: usize = 220;
/// Logical screen area (px²) that earns one particle.
const AREA_PER_PARTICLE: f32 = 10_000.0;

/// Half-width of the velocity component range at initial spawn.
const SPAWN_DRIFT: f32 = 0.35;
/// Half-width of the velocity component range when a slot is reseeded.
const RESEED_DRIFT: f32 = 0.6;
const MIN_RADIUS: f32 = 0.9;
const RADIUS_SPREAD: f32 = 1.5;

/// A single drifting particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in logical surface coordinates.
    pub position: Vec2,
    pub velocity: Vec2,
    /// Glyph radius, fixed for the particle's lifetime.
    pub radius: f32,
    /// Phase offset in `[0, 2π)` decorrelating periodic motion across
    /// particles.
    pub seed: f32,
}

impl Particle {
    fn spawn(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        Self {
            position: Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height),
            velocity: Vec2::new(
                (rng.gen::<f32>() - 0.5) * SPAWN_DRIFT,
                (rng.gen::<f32>() - 0.5) * SPAWN_DRIFT,
            ),
            radius: MIN_RADIUS + rng.gen::<f32>() * RADIUS_SPREAD,
            seed: rng.gen::<f32>() * TAU,
        }
    }
}

/// Particle count for a viewport: one per 10 000 logical px² of area, clamped
/// to `[MIN_PARTICLES, MAX_PARTICLES]`.
///
/// Degenerate (zero-area) viewports get the floor count.
pub fn particle_count(width: f32, height: f32) -> usize {
    let by_area = (width * height / AREA_PER_PARTICLE).floor() as usize;
    by_area.clamp(MIN_PARTICLES, MAX_PARTICLES)
}

/// Owning collection of every particle in a field.
#[derive(Debug, Clone, Default)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    /// Spawn `count` particles uniformly over `[0, width) × [0, height)`.
    pub fn spawn(count: usize, width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let particles = (0..count)
            .map(|_| Particle::spawn(width, height, rng))
            .collect();
        Self { particles }
    }

    /// Rewrite one slot with a fresh position, velocity and phase.
    ///
    /// The slot keeps its radius; reseeded particles drift faster than
    /// freshly spawned ones so the burst reads as motion rather than a pop-in.
    pub fn reseed(&mut self, index: usize, width: f32, height: f32, rng: &mut impl Rng) {
        let p = &mut self.particles[index];
        p.position = Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height);
        p.velocity = Vec2::new(
            (rng.gen::<f32>() - 0.5) * RESEED_DRIFT,
            (rng.gen::<f32>() - 0.5) * RESEED_DRIFT,
        );
        p.seed = rng.gen::<f32>() * TAU;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_count_clamps_both_ends() {
        assert_eq!(particle_count(0.0, 0.0), MIN_PARTICLES);
        assert_eq!(particle_count(100.0, 100.0), MIN_PARTICLES);
        assert_eq!(particle_count(1000.0, 1000.0), 100);
        assert_eq!(particle_count(800.0, 600.0), MAX_PARTICLES);
        assert_eq!(particle_count(4000.0, 4000.0), MAX_PARTICLES);
    }

    #[test]
    fn test_count_monotone_in_area() {
        let mut last = 0;
        for w in (100..4000).step_by(50) {
            let count = particle_count(w as f32, 900.0);
            assert!(count >= last);
            last = count;
        }
    }

    #[test]
    fn test_spawn_within_viewport() {
        let mut rng = SmallRng::seed_from_u64(3);
        let set = ParticleSet::spawn(220, 800.0, 600.0, &mut rng);
        assert_eq!(set.len(), 220);
        for p in set.iter() {
            assert!(p.position.x >= 0.0 && p.position.x < 800.0);
            assert!(p.position.y >= 0.0 && p.position.y < 600.0);
            assert!(p.radius >= MIN_RADIUS && p.radius < MIN_RADIUS + RADIUS_SPREAD);
            assert!(p.seed >= 0.0 && p.seed < TAU);
            assert!(p.velocity.x.abs() <= SPAWN_DRIFT / 2.0);
            assert!(p.velocity.y.abs() <= SPAWN_DRIFT / 2.0);
        }
    }

    #[test]
    fn test_reseed_keeps_radius() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut set = ParticleSet::spawn(10, 300.0, 300.0, &mut rng);
        let radius_before = set.as_slice()[5].radius;
        set.reseed(5, 300.0, 300.0, &mut rng);
        let p = set.as_slice()[5];
        assert_eq!(p.radius, radius_before);
        assert!(p.position.x >= 0.0 && p.position.x < 300.0);
        assert!(p.position.y >= 0.0 && p.position.y < 300.0);
    }
}
