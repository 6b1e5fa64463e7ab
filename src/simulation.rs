//! Simulation state and the per-tick transition.
//!
//! [`FieldSimulation`] is the whole simulation context in one struct:
//! viewport, pointer, particle set, frame counter and the links discovered by
//! the latest tick. The driver owns it and calls [`step`](FieldSimulation::step)
//! once per frame; the renderer reads it and never writes.
//!
//! # Tick order
//!
//! 1. Every [`RESEED_INTERVAL`] ticks, rewrite a few random slots
//!    ([`ParticleSet::reseed`]); this is the only randomness after creation,
//!    there to break up the lanes a purely deterministic field settles into.
//! 2. Sweep pairs over the pre-step positions
//!    ([`pair_scan`](crate::interactions::pair_scan)), keeping the links for
//!    the renderer and the collision nudges for this tick.
//! 3. Per particle: accumulate nudge, pointer push, flow, jitter and breeze
//!    into velocity; damp; clamp speed into `[MIN_SPEED, MAX_SPEED]`;
//!    advance; wrap across the padded viewport edges.

use crate::field;
use crate::input::Pointer;
use crate::interactions::{self, Link, PairEffects};
use crate::particle::{self, ParticleSet};
use glam::Vec2;
use rand::Rng;

/// Velocity retained per tick; keeps force accumulation from running away.
pub const DAMPING: f32 = 0.986;
/// Floor on particle speed. Stalled particles are turned and pushed back up
/// to this rather than left dead in place.
pub const MIN_SPEED: f32 = 0.25;
/// Ceiling on particle speed.
pub const MAX_SPEED: f32 = 1.35;
/// Heading rotation applied when a particle stalls below [`MIN_SPEED`].
const STALL_TURN: f32 = 0.35;
/// Particles may drift this far past an edge before wrapping to the far side.
pub const WRAP_PAD: f32 = 8.0;
/// Ticks between partial reseed bursts.
pub const RESEED_INTERVAL: u64 = 240;
/// Fraction of the set rewritten per burst, floored, at least one slot.
const RESEED_FRACTION: f32 = 0.04;

/// Logical viewport dimensions plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio, clamped to `[1, 2]`.
    pub scale_factor: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, scale_factor: f64) -> Self {
        Self {
            width,
            height,
            scale_factor: (scale_factor as f32).clamp(1.0, 2.0),
        }
    }
}

/// The complete simulation context.
#[derive(Debug, Clone)]
pub struct FieldSimulation {
    viewport: Viewport,
    pointer: Pointer,
    particles: ParticleSet,
    links: Vec<Link>,
    frame: u64,
    reseed_events: u64,
}

impl FieldSimulation {
    /// Create a field sized for `viewport`, with the particle count derived
    /// from its area.
    pub fn new(viewport: Viewport, rng: &mut impl Rng) -> Self {
        let count = particle::particle_count(viewport.width, viewport.height);
        Self {
            particles: ParticleSet::spawn(count, viewport.width, viewport.height, rng),
            pointer: Pointer::new(),
            links: Vec::new(),
            frame: 0,
            reseed_events: 0,
            viewport,
        }
    }

    /// Hard reset for a new viewport: the set is recreated at the new
    /// area-derived count, not rescaled from the old one.
    pub fn reset(&mut self, viewport: Viewport, rng: &mut impl Rng) {
        let count = particle::particle_count(viewport.width, viewport.height);
        self.particles = ParticleSet::spawn(count, viewport.width, viewport.height, rng);
        self.links.clear();
        self.frame = 0;
        self.reseed_events = 0;
        self.viewport = viewport;
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    /// Links discovered by the most recent tick, at their swept positions.
    #[inline]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    #[inline]
    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    #[inline]
    pub fn pointer_mut(&mut self) -> &mut Pointer {
        &mut self.pointer
    }

    /// Ticks completed so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Total individual reseed events since the last reset.
    #[inline]
    pub fn reseed_events(&self) -> u64 {
        self.reseed_events
    }

    /// Advance the field by one tick.
    pub fn step(&mut self, rng: &mut impl Rng) {
        let Viewport { width, height, .. } = self.viewport;

        // Low-rate reseed against long-run lane collapse. Slots are drawn
        // with replacement, so a burst may hit the same slot twice.
        if self.frame > 0 && self.frame % RESEED_INTERVAL == 0 {
            let burst = ((self.particles.len() as f32 * RESEED_FRACTION) as usize).max(1);
            for _ in 0..burst {
                let slot = rng.gen_range(0..self.particles.len());
                self.particles.reseed(slot, width, height, rng);
                self.reseed_events += 1;
            }
        }

        // Pair sweep over the pre-step snapshot.
        let PairEffects { links, nudges } = interactions::pair_scan(self.particles.as_slice());
        self.links = links;

        let t = field::time_at(self.frame);
        for (p, nudge) in self.particles.as_mut_slice().iter_mut().zip(nudges) {
            let mut velocity = p.velocity + nudge;
            velocity += field::pointer_push(p.position, &self.pointer);
            velocity += field::flow_velocity(p.position, p.seed, t) * field::FLOW_GAIN;
            velocity += field::jitter(p.seed, t);
            velocity += field::breeze(p.seed, t);

            velocity *= DAMPING;
            let speed = velocity.length();
            if speed < MIN_SPEED {
                let heading = velocity.y.atan2(velocity.x) + STALL_TURN;
                velocity = Vec2::new(heading.cos(), heading.sin()) * MIN_SPEED;
            } else if speed > MAX_SPEED {
                velocity *= MAX_SPEED / speed;
            }

            let position = p.position + velocity;
            p.position = Vec2::new(wrap(position.x, width), wrap(position.y, height));
            p.velocity = velocity;
        }

        self.frame += 1;
    }
}

/// Wrap one coordinate across an axis of length `extent`, with slack so a
/// particle slides fully off-screen before reappearing on the far side.
fn wrap(value: f32, extent: f32) -> f32 {
    if value < -WRAP_PAD {
        extent + WRAP_PAD
    } else if value > extent + WRAP_PAD {
        -WRAP_PAD
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const SPEED_TOLERANCE: f32 = 1e-4;

    fn small_sim(rng: &mut SmallRng) -> FieldSimulation {
        FieldSimulation::new(Viewport::new(400.0, 300.0, 1.0), rng)
    }

    #[test]
    fn test_speed_clamped_after_tick() {
        let mut rng = SmallRng::seed_from_u64(21);
        let mut sim = small_sim(&mut rng);
        for _ in 0..10 {
            sim.step(&mut rng);
            for p in sim.particles().iter() {
                let speed = p.velocity.length();
                assert!(speed >= MIN_SPEED - SPEED_TOLERANCE, "speed {speed} under floor");
                assert!(speed <= MAX_SPEED + SPEED_TOLERANCE, "speed {speed} over ceiling");
            }
        }
    }

    #[test]
    fn test_positions_stay_wrapped() {
        let mut rng = SmallRng::seed_from_u64(22);
        let mut sim = small_sim(&mut rng);
        for _ in 0..50 {
            sim.step(&mut rng);
            for p in sim.particles().iter() {
                assert!(p.position.x >= -WRAP_PAD && p.position.x <= 400.0 + WRAP_PAD);
                assert!(p.position.y >= -WRAP_PAD && p.position.y <= 300.0 + WRAP_PAD);
            }
        }
    }

    #[test]
    fn test_no_reseed_before_interval() {
        let mut rng = SmallRng::seed_from_u64(23);
        let mut sim = small_sim(&mut rng);
        for _ in 0..RESEED_INTERVAL {
            sim.step(&mut rng);
        }
        assert_eq!(sim.reseed_events(), 0);
    }

    #[test]
    fn test_reseed_burst_size() {
        let mut rng = SmallRng::seed_from_u64(24);
        let mut sim = small_sim(&mut rng);
        let expected = ((sim.particles().len() as f32 * 0.04) as u64).max(1);
        for _ in 0..=RESEED_INTERVAL {
            sim.step(&mut rng);
        }
        assert_eq!(sim.reseed_events(), expected);
    }

    #[test]
    fn test_reset_rebuilds_for_new_viewport() {
        let mut rng = SmallRng::seed_from_u64(25);
        let mut sim = small_sim(&mut rng);
        for _ in 0..5 {
            sim.step(&mut rng);
        }

        sim.reset(Viewport::new(800.0, 600.0, 1.0), &mut rng);
        assert_eq!(sim.frame(), 0);
        assert_eq!(sim.particles().len(), 220);
        for p in sim.particles().iter() {
            assert!(p.position.x >= 0.0 && p.position.x < 800.0);
            assert!(p.position.y >= 0.0 && p.position.y < 600.0);
        }
    }

    #[test]
    fn test_wrap_is_symmetric() {
        assert_eq!(wrap(-8.5, 100.0), 108.0);
        assert_eq!(wrap(108.5, 100.0), -8.0);
        assert_eq!(wrap(50.0, 100.0), 50.0);
        // The pad itself is still in bounds.
        assert_eq!(wrap(-8.0, 100.0), -8.0);
        assert_eq!(wrap(108.0, 100.0), 108.0);
    }

    #[test]
    fn test_scale_factor_clamped() {
        assert_eq!(Viewport::new(100.0, 100.0, 0.5).scale_factor, 1.0);
        assert_eq!(Viewport::new(100.0, 100.0, 1.5).scale_factor, 1.5);
        assert_eq!(Viewport::new(100.0, 100.0, 3.0).scale_factor, 2.0);
    }
}
