//! The flow field and pointer forces.
//!
//! Everything here is a pure function of position, per-particle phase seed,
//! the field time scalar and (for [`pointer_push`]) the pointer state.
//! Repeated evaluation with identical inputs yields bit-identical results;
//! there is no hidden state and no randomness.
//!
//! The drift field is not a fluid solve. It is a designed sum of sinusoids:
//! two phase-shifted terms per axis give a curl-dominant swirl that varies
//! smoothly in space and time, and the per-particle seed keeps neighbouring
//! particles from converging onto one trajectory. Two much smaller terms, a
//! fast jitter and a slow breeze, keep the picture from ever looking static.

use crate::input::Pointer;
use glam::Vec2;

/// Converts the frame counter into the flow-field time scalar.
pub const TIME_SCALE: f32 = 0.012;
/// Weight applied to [`flow_velocity`] when it is folded into a velocity.
pub const FLOW_GAIN: f32 = 0.0042;
/// Radius inside which an active pointer pushes particles away.
pub const POINTER_RADIUS: f32 = 170.0;
const POINTER_STRENGTH: f32 = 0.06;
const JITTER_AMPLITUDE: f32 = 0.0016;
const BREEZE_AMPLITUDE: f32 = 0.0009;

/// Field time for a frame counter value.
#[inline]
pub fn time_at(frame: u64) -> f32 {
    frame as f32 * TIME_SCALE
}

/// Pseudo-fluid drift at a position.
///
/// The dominant term in each axis reads the *other* axis, which is what makes
/// the field curl rather than collapse into straight lanes.
pub fn flow_velocity(position: Vec2, seed: f32, t: f32) -> Vec2 {
    let x = (position.y * 0.007 + t * 0.9 + seed).sin() * 0.9
        + ((position.y + position.x) * 0.003 - t * 0.6).sin() * 0.35;
    let y = -(position.x * 0.007 - t * 0.85 - seed * 0.7).sin() * 0.9
        + ((position.x - position.y) * 0.003 + t * 0.5).sin() * 0.35;
    Vec2::new(x, y)
}

/// Fast, tiny wobble decorrelated by the particle seed.
pub fn jitter(seed: f32, t: f32) -> Vec2 {
    Vec2::new(
        (t * 2.1 + seed * 2.9).sin() * JITTER_AMPLITUDE,
        (t * 1.9 + seed * 3.3).cos() * JITTER_AMPLITUDE,
    )
}

/// Slow ambient push, an order of magnitude below the flow term.
pub fn breeze(seed: f32, t: f32) -> Vec2 {
    Vec2::new(
        (t * 0.13 + seed).cos() * BREEZE_AMPLITUDE,
        (t * 0.11 + seed * 1.2).sin() * BREEZE_AMPLITUDE,
    )
}

/// Velocity push away from an active pointer.
///
/// Falls off linearly to zero at [`POINTER_RADIUS`]; an inactive or
/// out-of-range pointer contributes nothing. A coincident pointer falls back
/// to distance 1 so the division stays finite.
pub fn pointer_push(position: Vec2, pointer: &Pointer) -> Vec2 {
    if !pointer.active() {
        return Vec2::ZERO;
    }
    let delta = position - pointer.position();
    let dist_sq = delta.length_squared();
    if dist_sq >= POINTER_RADIUS * POINTER_RADIUS {
        return Vec2::ZERO;
    }
    let dist = dist_sq.sqrt();
    let dist = if dist == 0.0 { 1.0 } else { dist };
    let away = delta / dist;
    away * (1.0 - dist / POINTER_RADIUS) * POINTER_STRENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_is_deterministic() {
        let position = Vec2::new(123.4, 567.8);
        let a = flow_velocity(position, 1.7, 2.88);
        let b = flow_velocity(position, 1.7, 2.88);
        assert_eq!(a.to_array(), b.to_array());
    }

    #[test]
    fn test_seed_decorrelates_flow() {
        let position = Vec2::new(200.0, 200.0);
        let a = flow_velocity(position, 0.0, 1.0);
        let b = flow_velocity(position, 3.0, 1.0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_pointer_push_points_away() {
        let mut pointer = Pointer::new();
        pointer.set(Vec2::new(350.0, 300.0));

        // 50 units away, well inside the radius.
        let position = Vec2::new(400.0, 300.0);
        let push = pointer_push(position, &pointer);
        assert!(push.length() > 0.0);
        // Strictly away from the pointer.
        assert!(push.dot(position - pointer.position()) > 0.0);
        assert!(push.x > 0.0);
        assert_eq!(push.y, 0.0);
    }

    #[test]
    fn test_pointer_push_out_of_range() {
        let mut pointer = Pointer::new();
        pointer.set(Vec2::new(200.0, 300.0));

        // 200 units away, outside the 170-unit radius.
        let push = pointer_push(Vec2::new(400.0, 300.0), &pointer);
        assert_eq!(push, Vec2::ZERO);
    }

    #[test]
    fn test_inactive_pointer_contributes_nothing() {
        let mut pointer = Pointer::new();
        pointer.set(Vec2::new(400.0, 300.0));
        pointer.clear();

        let push = pointer_push(Vec2::new(410.0, 300.0), &pointer);
        assert_eq!(push, Vec2::ZERO);
    }

    #[test]
    fn test_coincident_pointer_is_finite() {
        let mut pointer = Pointer::new();
        pointer.set(Vec2::new(400.0, 300.0));

        let push = pointer_push(Vec2::new(400.0, 300.0), &pointer);
        assert!(push.is_finite());
        assert_eq!(push, Vec2::ZERO);
    }
}
