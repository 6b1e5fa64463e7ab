//! Short-range pair interactions.
//!
//! One sweep over every unordered particle pair serves two purposes:
//!
//! * **Links**: pairs closer than [`LINK_DIST`] produce a faint connecting
//!   line, its opacity fading with distance. Links are purely visual and
//!   exert no force.
//! * **Collisions**: pairs closer than [`COLLISION_DIST`] receive
//!   equal-and-opposite velocity nudges along the separation normal, scaled
//!   by penetration depth. A soft shove, not a rigid-body response.
//!
//! The sweep is O(N²), but the particle count is capped at
//! [`MAX_PARTICLES`](crate::particle::MAX_PARTICLES) so brute force beats the
//! bookkeeping of a spatial index. The function is pure: same particles in,
//! same effects out.

use crate::particle::Particle;
use glam::Vec2;

/// Separation under which two particles are joined by a link line.
pub const LINK_DIST: f32 = 98.0;
/// Separation under which two particles shove each other apart.
pub const COLLISION_DIST: f32 = 20.0;
const COLLISION_STRENGTH: f32 = 0.0046;
/// Pairs closer than this (squared) are treated as coincident and skipped;
/// there is no meaningful separation normal to push along.
const COINCIDENT_SQ: f32 = 1e-4;

/// A link between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    /// 1.0 at zero separation, fading to 0.0 at [`LINK_DIST`].
    pub fade: f32,
}

/// Everything one pair sweep produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairEffects {
    /// Links discovered this sweep, at the swept positions.
    pub links: Vec<Link>,
    /// Accumulated collision nudge per particle, indexed like the input.
    pub nudges: Vec<Vec2>,
}

/// Sweep every unordered pair once, collecting links and collision nudges.
pub fn pair_scan(particles: &[Particle]) -> PairEffects {
    let mut effects = PairEffects {
        links: Vec::new(),
        nudges: vec![Vec2::ZERO; particles.len()],
    };
    let link_sq = LINK_DIST * LINK_DIST;
    let collision_sq = COLLISION_DIST * COLLISION_DIST;

    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let delta = particles[j].position - particles[i].position;
            let dist_sq = delta.length_squared();
            if dist_sq <= COINCIDENT_SQ {
                continue;
            }

            if dist_sq < link_sq {
                let dist = dist_sq.sqrt();
                effects.links.push(Link {
                    a: i,
                    b: j,
                    fade: 1.0 - dist / LINK_DIST,
                });
            }

            if dist_sq < collision_sq {
                let dist = dist_sq.sqrt();
                let normal = delta / dist;
                let push = (COLLISION_DIST - dist) * COLLISION_STRENGTH;
                effects.nudges[i] -= normal * push;
                effects.nudges[j] += normal * push;
            }
        }
    }

    effects
}
