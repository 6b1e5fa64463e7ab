//! End-to-end properties of the field simulation.
//!
//! Everything here runs on a seeded RNG, so failures reproduce exactly.

use driftfield::field::{self, POINTER_RADIUS};
use driftfield::input::Pointer;
use driftfield::interactions::pair_scan;
use driftfield::particle::{particle_count, ParticleSet, MAX_PARTICLES, MIN_PARTICLES};
use driftfield::simulation::{FieldSimulation, Viewport, MAX_SPEED, MIN_SPEED, RESEED_INTERVAL, WRAP_PAD};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

const SPEED_TOLERANCE: f32 = 1e-4;

#[test]
fn count_is_bounded_and_monotone() {
    assert_eq!(particle_count(0.0, 0.0), MIN_PARTICLES);
    assert_eq!(particle_count(320.0, 480.0), MIN_PARTICLES);
    assert_eq!(particle_count(800.0, 600.0), MAX_PARTICLES);
    assert_eq!(particle_count(2560.0, 1440.0), MAX_PARTICLES);

    let mut last = 0;
    for side in (0..3000).step_by(25) {
        let count = particle_count(side as f32, side as f32);
        assert!((MIN_PARTICLES..=MAX_PARTICLES).contains(&count));
        assert!(count >= last, "count must not shrink as area grows");
        last = count;
    }
}

#[test]
fn fresh_set_spawns_inside_viewport() {
    let mut rng = SmallRng::seed_from_u64(1);
    let set = ParticleSet::spawn(220, 800.0, 600.0, &mut rng);
    assert_eq!(set.len(), 220);
    for p in set.iter() {
        assert!(p.position.x >= 0.0 && p.position.x < 800.0);
        assert!(p.position.y >= 0.0 && p.position.y < 600.0);
        assert!(p.radius > 0.0);
    }
}

#[test]
fn long_run_holds_speed_and_wrap_invariants() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut sim = FieldSimulation::new(Viewport::new(800.0, 600.0, 1.0), &mut rng);
    assert_eq!(sim.particles().len(), 220);

    for _ in 0..241 {
        sim.step(&mut rng);
        for p in sim.particles().iter() {
            let speed = p.velocity.length();
            assert!(speed >= MIN_SPEED - SPEED_TOLERANCE);
            assert!(speed <= MAX_SPEED + SPEED_TOLERANCE);
            assert!(p.position.x >= -WRAP_PAD && p.position.x <= 800.0 + WRAP_PAD);
            assert!(p.position.y >= -WRAP_PAD && p.position.y <= 600.0 + WRAP_PAD);
        }
    }
}

#[test]
fn reseed_fires_once_per_interval() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut sim = FieldSimulation::new(Viewport::new(800.0, 600.0, 1.0), &mut rng);
    let burst = ((sim.particles().len() as f32 * 0.04) as u64).max(1);

    for _ in 0..RESEED_INTERVAL {
        sim.step(&mut rng);
    }
    assert_eq!(sim.reseed_events(), 0, "no reseed before the interval elapses");

    sim.step(&mut rng);
    assert_eq!(sim.reseed_events(), burst, "exactly one burst at the interval");

    // The burst does not break the position invariant.
    for p in sim.particles().iter() {
        assert!(p.position.x >= -WRAP_PAD && p.position.x <= 800.0 + WRAP_PAD);
        assert!(p.position.y >= -WRAP_PAD && p.position.y <= 600.0 + WRAP_PAD);
    }

    for _ in 0..(RESEED_INTERVAL - 1) {
        sim.step(&mut rng);
    }
    assert_eq!(sim.reseed_events(), burst, "no further burst mid-interval");
    sim.step(&mut rng);
    assert_eq!(sim.reseed_events(), burst * 2, "second burst at the next interval");
}

#[test]
fn force_model_is_idempotent() {
    let position = Vec2::new(411.5, 293.25);
    let t = field::time_at(1234);
    assert_eq!(
        field::flow_velocity(position, 2.4, t).to_array(),
        field::flow_velocity(position, 2.4, t).to_array(),
    );
    assert_eq!(
        field::jitter(2.4, t).to_array(),
        field::jitter(2.4, t).to_array(),
    );
    assert_eq!(
        field::breeze(2.4, t).to_array(),
        field::breeze(2.4, t).to_array(),
    );

    let mut rng = SmallRng::seed_from_u64(4);
    let set = ParticleSet::spawn(120, 640.0, 480.0, &mut rng);
    assert_eq!(pair_scan(set.as_slice()), pair_scan(set.as_slice()));

    let mut pointer = Pointer::new();
    pointer.set(Vec2::new(400.0, 300.0));
    assert_eq!(
        field::pointer_push(position, &pointer).to_array(),
        field::pointer_push(position, &pointer).to_array(),
    );
}

#[test]
fn pointer_pushes_in_range_only() {
    let mut pointer = Pointer::new();
    pointer.set(Vec2::new(400.0, 300.0));

    // Distance 50: pushed strictly away with positive magnitude.
    let near = Vec2::new(450.0, 300.0);
    let push = field::pointer_push(near, &pointer);
    assert!(push.length() > 0.0);
    assert!(push.dot(near - pointer.position()) > 0.0);

    // Distance 200, beyond the 170-unit radius: untouched.
    let far = Vec2::new(600.0, 300.0);
    assert_eq!(field::pointer_push(far, &pointer), Vec2::ZERO);
    assert!(200.0 > POINTER_RADIUS);
}

#[test]
fn pointer_activity_changes_the_step() {
    let mut rng_a = SmallRng::seed_from_u64(5);
    let mut rng_b = SmallRng::seed_from_u64(5);
    let viewport = Viewport::new(400.0, 300.0, 1.0);

    let mut with_pointer = FieldSimulation::new(viewport, &mut rng_a);
    let mut without_pointer = FieldSimulation::new(viewport, &mut rng_b);
    with_pointer.pointer_mut().set(Vec2::new(200.0, 150.0));

    with_pointer.step(&mut rng_a);
    without_pointer.step(&mut rng_b);

    let moved: Vec<_> = with_pointer
        .particles()
        .iter()
        .zip(without_pointer.particles().iter())
        .filter(|(a, b)| a.velocity != b.velocity)
        .collect();
    assert!(!moved.is_empty(), "an active pointer must perturb nearby particles");
}

#[test]
fn viewport_reset_recreates_the_set() {
    let mut rng = SmallRng::seed_from_u64(6);
    let mut sim = FieldSimulation::new(Viewport::new(800.0, 600.0, 1.0), &mut rng);
    for _ in 0..10 {
        sim.step(&mut rng);
    }

    sim.reset(Viewport::new(320.0, 240.0, 2.0), &mut rng);
    assert_eq!(sim.frame(), 0);
    assert_eq!(sim.particles().len(), MIN_PARTICLES);
    assert!(sim.links().is_empty());
    for p in sim.particles().iter() {
        assert!(p.position.x >= 0.0 && p.position.x < 320.0);
        assert!(p.position.y >= 0.0 && p.position.y < 240.0);
    }
}

#[test]
fn links_reference_valid_slots() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut sim = FieldSimulation::new(Viewport::new(800.0, 600.0, 1.0), &mut rng);
    sim.step(&mut rng);

    let len = sim.particles().len();
    assert!(!sim.links().is_empty(), "a 220-particle field always has close pairs");
    for link in sim.links() {
        assert!(link.a < link.b && link.b < len);
        assert!(link.fade > 0.0 && link.fade <= 1.0);
    }
}
