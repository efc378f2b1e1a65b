use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use orbitsim::simulation::states::{Body, NVec2, Rgb, System};
use orbitsim::simulation::params::Parameters;
use orbitsim::simulation::engine::Engine;
use orbitsim::simulation::forces::{AccelSet, NewtonianGravity, NewtonianGravityBarnesHut};
use orbitsim::simulation::catalog::{self, MoonKind, OrbitSeed, PlanetKind, StarKind};
use orbitsim::simulation::orbits::{angle, assign_binary, assign_parent, bearing};
use orbitsim::simulation::render::{NullSink, RenderedBody};
use orbitsim::simulation::scenario::{Phase, Scenario};
use orbitsim::simulation::error::SimulationError;
use orbitsim::IntegratorConfig;

const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Body at rest
pub fn body_at(m: f64, x: f64, y: f64) -> Body {
    Body::new(m, x, y, 0.0, 0.0, 1.0, WHITE)
}

/// Default physics parameters for tests (G = 6.67e-11, M = 1e14, h0 = 1)
pub fn test_params() -> Parameters {
    Parameters::default()
}

/// Build a gravity term + AccelSet
pub fn gravity_set(p: &Parameters) -> AccelSet {
    AccelSet::new().with(NewtonianGravity { G: p.G })
}

pub fn accels(forces: &AccelSet, sys: &System) -> Vec<NVec2> {
    let mut out = vec![NVec2::zeros(); sys.bodies.len()];
    forces.accumulate_accels(sys.t, sys, &mut out);
    out
}

fn assert_close(a: f64, b: f64, rel: f64) {
    let scale = a.abs().max(b.abs()).max(f64::MIN_POSITIVE);
    assert!((a - b).abs() <= rel * scale, "{a} != {b} (rel tol {rel})");
}

fn assert_vec_close(a: &NVec2, b: &NVec2, rel: f64) {
    let scale = a.norm().max(b.norm()).max(f64::MIN_POSITIVE);
    assert!((a - b).norm() <= rel * scale, "{a:?} != {b:?} (rel tol {rel})");
}

/// Running scenario with the given bodies, direct gravity, euler
fn running(bodies: Vec<Body>) -> Scenario {
    let mut scenario = Scenario::new(Engine::default(), test_params()).unwrap();
    scenario.load_preset(bodies).unwrap();
    scenario.start().unwrap();
    scenario
}

/// Star at the origin plus a rocky planet at (r, 0) seeded on a circular orbit
fn star_and_planet(r: f64) -> (Body, Body) {
    let p = test_params();
    let star = catalog::star(StarKind::Main, &p, OrbitSeed::at(0.0, 0.0));
    let mut planet = catalog::planet(PlanetKind::Rocky, WHITE, &p, OrbitSeed::at(r, 0.0));
    assign_parent(&mut planet, &star, p.G);
    (star, planet)
}

// ==================================================================================
// Body tests
// ==================================================================================

#[test]
fn velocity_from_speed_and_angle() {
    let b = Body::new(1.0, 3.0, 4.0, 2.0, FRAC_PI_2, 1.0, WHITE);
    assert!(b.velocity().x.abs() < 1e-12);
    assert_close(b.velocity().y, 2.0, 1e-12);
    assert_eq!(b.acceleration(), NVec2::zeros());
    assert_eq!(b.position(), NVec2::new(3.0, 4.0));
}

#[test]
fn singleton_set_has_zero_acceleration() {
    let p = test_params();
    let mut b = Body::new(5.0e14, 10.0, -3.0, 1.0, 0.3, 1.0, WHITE);
    assert_eq!(b.distance(&b), 0.0);

    let set = vec![b.clone()];
    b.update_acceleration(&set, p.G);
    assert_eq!(b.acceleration(), NVec2::zeros());

    b.update_acceleration(&[], p.G);
    assert_eq!(b.acceleration(), NVec2::zeros());
}

#[test]
fn unit_step_velocity_then_position() {
    let p = test_params();
    let star = body_at(1.0e14, 0.0, 0.0);
    let mut b = body_at(1.0, 100.0, 0.0);

    b.update_acceleration(&[star, b.clone()], p.G);
    let a = b.acceleration();
    assert_close(a.x, -p.G * 1.0e14 / 1.0e4, 1e-12);

    b.update_velocity(1.0);
    assert_eq!(b.velocity(), a);
    b.update_position(1.0);
    assert_eq!(b.position(), NVec2::new(100.0, 0.0) + a);
}

#[test]
fn update_acceleration_is_idempotent() {
    let p = test_params();
    let set = vec![
        body_at(1.0e14, 0.0, 0.0),
        body_at(3.0e12, 40.0, 7.0),
        body_at(2.0e8, -90.0, 55.0),
    ];
    let mut b = set[1].clone();
    b.update_acceleration(&set, p.G);
    let first = b.acceleration();
    b.update_acceleration(&set, p.G);
    assert_eq!(first, b.acceleration());
}

#[test]
fn set_mass_changes_pull() {
    let p = test_params();
    let mut heavy = body_at(1.0e14, 0.0, 0.0);
    let light = body_at(1.0, 50.0, 0.0);
    let before = light.gravity_from(&[heavy.clone()], p.G);
    heavy.set_mass(2.0e14);
    assert_eq!(heavy.mass(), 2.0e14);
    let after = light.gravity_from(&[heavy], p.G);
    assert_vec_close(&after, &(2.0 * before), 1e-12);
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let p = test_params();
    let sys = System { bodies: vec![body_at(2.0e14, -50.0, 0.0), body_at(3.0e14, 50.0, 0.0)], t: 0.0 };
    let acc = accels(&gravity_set(&p), &sys);

    let fa = sys.bodies[0].mass() * acc[0];
    let fb = sys.bodies[1].mass() * acc[1];
    let net = fa + fb;

    assert!(net.norm() < 1e-12 * fa.norm(), "Net momentum not zero: {:?}", net);
    assert_close(fa.norm(), fb.norm(), 1e-12);
}

#[test]
fn gravity_points_toward_other_body() {
    let p = test_params();
    let sys = System { bodies: vec![body_at(1.0e14, 0.0, 0.0), body_at(1.0e14, 30.0, 40.0)], t: 0.0 };
    let acc = accels(&gravity_set(&p), &sys);

    let dx = sys.bodies[1].position() - sys.bodies[0].position();
    assert!(acc[0].dot(&dx) > 0.0, "Acceleration is not toward second body");
    assert!(acc[1].dot(&dx) < 0.0, "Acceleration is not toward first body");

    // |a| = G m / r^2 with r = 50
    assert_close(acc[0].norm(), p.G * 1.0e14 / 2500.0, 1e-12);
}

#[test]
fn gravity_inverse_square_law() {
    let p = test_params();
    let forces = gravity_set(&p);
    let near = System { bodies: vec![body_at(1.0e14, 0.0, 0.0), body_at(1.0e14, 100.0, 0.0)], t: 0.0 };
    let far = System { bodies: vec![body_at(1.0e14, 0.0, 0.0), body_at(1.0e14, 200.0, 0.0)], t: 0.0 };

    let ratio = accels(&forces, &near)[0].norm() / accels(&forces, &far)[0].norm();
    assert_close(ratio, 4.0, 1e-12);
}

#[test]
fn coincident_bodies_ignore_each_other() {
    let p = test_params();
    let sys = System {
        bodies: vec![
            body_at(1.0e14, 10.0, 10.0),
            body_at(5.0e13, 10.0, 10.0),
            body_at(2.0e14, 110.0, 10.0),
        ],
        t: 0.0,
    };
    let acc = accels(&gravity_set(&p), &sys);

    // Only the third body pulls on the coincident pair
    let expected = NVec2::new(p.G * 2.0e14 / 1.0e4, 0.0);
    assert_vec_close(&acc[0], &expected, 1e-12);
    assert_vec_close(&acc[1], &expected, 1e-12);
    assert!(acc.iter().all(|a| a.x.is_finite() && a.y.is_finite()));
}

#[test]
fn accumulation_is_order_independent() {
    let p = test_params();
    let bodies = vec![
        body_at(1.0e14, 0.0, 0.0),
        body_at(2.0e12, 120.0, -35.0),
        body_at(7.0e9, -60.0, 80.0),
        body_at(4.0e13, 300.0, 250.0),
        body_at(1.0e8, -5.0, -400.0),
    ];
    let forward = System { bodies: bodies.clone(), t: 0.0 };
    let reversed = System { bodies: bodies.into_iter().rev().collect(), t: 0.0 };

    let forces = gravity_set(&p);
    let a_fwd = accels(&forces, &forward);
    let a_rev = accels(&forces, &reversed);

    let n = a_fwd.len();
    for i in 0..n {
        assert_vec_close(&a_fwd[i], &a_rev[n - 1 - i], 1e-12);
    }
}

#[test]
fn accumulate_reads_one_snapshot() {
    let p = test_params();
    let sys = System {
        bodies: vec![body_at(1.0e14, 0.0, 0.0), body_at(1.0e14, 80.0, 0.0), body_at(1.0e14, 0.0, 60.0)],
        t: 0.0,
    };
    let acc = accels(&gravity_set(&p), &sys);
    for (i, b) in sys.bodies.iter().enumerate() {
        assert_eq!(acc[i], b.gravity_from(&sys.bodies, p.G));
    }
}

// ==================================================================================
// Barnes-Hut tests
// ==================================================================================

fn scattered(n: usize) -> System {
    let bodies = (0..n)
        .map(|i| {
            let f = i as f64;
            body_at(1.0e10 * (1.0 + (f * 0.7).sin().abs()), (f * 0.37).sin() * 500.0, (f * 0.13).cos() * 500.0)
        })
        .collect();
    System { bodies, t: 0.0 }
}

#[test]
fn barnes_hut_with_zero_theta_matches_direct() {
    let p = test_params();
    let sys = scattered(64);
    let direct = accels(&gravity_set(&p), &sys);
    let bh = accels(&AccelSet::new().with(NewtonianGravityBarnesHut { G: p.G, theta: 0.0 }), &sys);

    for (d, b) in direct.iter().zip(bh.iter()) {
        assert_vec_close(d, b, 1e-9);
    }
}

#[test]
fn barnes_hut_never_counts_the_body_itself() {
    let p = test_params();
    let sys = System { bodies: vec![body_at(1.0e15, 0.0, 0.0), body_at(1.0e16, 10.0, 10.0)], t: 0.0 };
    let direct = accels(&gravity_set(&p), &sys);

    // wide opening angles would otherwise lump each body into a node with itself
    for theta in [0.8, 2.5] {
        let bh = accels(&AccelSet::new().with(NewtonianGravityBarnesHut { G: p.G, theta }), &sys);
        for (d, b) in direct.iter().zip(bh.iter()) {
            assert_vec_close(d, b, 1e-9);
        }
    }
}

#[test]
fn barnes_hut_handles_coincident_bodies() {
    let p = test_params();
    let sys = System {
        bodies: vec![
            body_at(1.0e14, 5.0, 5.0),
            body_at(1.0e14, 5.0, 5.0),
            body_at(1.0e14, 5.0, 5.0),
            body_at(2.0e14, -95.0, 5.0),
        ],
        t: 0.0,
    };
    let direct = accels(&gravity_set(&p), &sys);
    let bh = accels(&AccelSet::new().with(NewtonianGravityBarnesHut { G: p.G, theta: 0.0 }), &sys);

    for (d, b) in direct.iter().zip(bh.iter()) {
        assert!(b.x.is_finite() && b.y.is_finite());
        assert_vec_close(d, b, 1e-9);
    }
}

#[test]
fn barnes_hut_far_cluster_is_close_to_direct() {
    let p = test_params();
    // Tight cluster far from a single light body
    let mut bodies = vec![body_at(1.0, 0.0, 0.0)];
    for (dx, dy) in [(0.0, 0.0), (3.0, 1.0), (-2.0, 4.0), (1.0, -3.0)] {
        bodies.push(body_at(1.0e14, 1000.0 + dx, 1000.0 + dy));
    }
    let sys = System { bodies, t: 0.0 };

    let direct = accels(&gravity_set(&p), &sys);
    let bh = accels(&AccelSet::new().with(NewtonianGravityBarnesHut { G: p.G, theta: 0.5 }), &sys);
    assert_vec_close(&direct[0], &bh[0], 1e-3);
}

#[test]
fn barnes_hut_empty_system_is_noop() {
    let p = test_params();
    let sys = System::default();
    let out = accels(&AccelSet::new().with(NewtonianGravityBarnesHut { G: p.G, theta: 0.7 }), &sys);
    assert!(out.is_empty());
}

// ==================================================================================
// Factory tests
// ==================================================================================

#[test]
fn star_sub_types_scale_stellar_mass() {
    let p = test_params();
    let seed = OrbitSeed::at(0.0, 0.0);
    let cases = [
        (StarKind::Main, 1.0),
        (StarKind::Blue, 50.0),
        (StarKind::Red, 0.1),
        (StarKind::Yellow, 0.85),
        (StarKind::Orange, 0.55),
        (StarKind::Giant, 1000.0),
    ];
    for (kind, scale) in cases {
        let s = catalog::star(kind, &p, seed);
        assert_close(s.mass(), scale * p.stellar_mass, 1e-12);
        assert_eq!(s.radius(), catalog::STAR_RADIUS);
        assert_eq!(s.color(), kind.color());
    }
}

#[test]
fn planets_and_moons_use_planetary_unit() {
    let p = test_params();
    let seed = OrbitSeed { x: 1.0, y: 2.0, speed: 3.0, angle: 0.0 };
    let color = Rgb::new(10, 20, 30);

    let rocky = catalog::planet(PlanetKind::Rocky, color, &p, seed);
    let gas = catalog::planet(PlanetKind::Gaseous, color, &p, seed);
    assert_close(rocky.mass(), p.stellar_mass / 1.0e6, 1e-12);
    assert_close(gas.mass(), 1000.0 * p.stellar_mass / 1.0e6, 1e-12);
    assert_eq!(rocky.color(), color);
    assert!(gas.radius() > rocky.radius());
    assert_eq!(rocky.velocity(), NVec2::new(3.0, 0.0));

    let small = catalog::moon(MoonKind::Small, &p, seed);
    let large = catalog::moon(MoonKind::Large, &p, seed);
    assert_close(small.mass(), p.planet_mass() / 1.0e4, 1e-12);
    assert_close(large.mass(), p.planet_mass() / 1.0e2, 1e-12);
    assert_eq!(small.color(), catalog::MOON_COLOR);
    assert!(small.radius() < rocky.radius());
}

#[test]
fn unknown_sub_types_fall_back_to_defaults() {
    assert_eq!(StarKind::from_tag("neutron"), StarKind::Main);
    assert_eq!(StarKind::from_tag(" Blue "), StarKind::Blue);
    assert_eq!(PlanetKind::from_tag(""), PlanetKind::Rocky);
    assert_eq!(PlanetKind::from_tag("GASEOUS"), PlanetKind::Gaseous);
    assert_eq!(MoonKind::from_tag("tiny"), MoonKind::Small);
    assert_eq!(MoonKind::from_tag("large"), MoonKind::Large);
}

#[test]
fn factory_masses_are_positive() {
    let p = test_params();
    let seed = OrbitSeed::default();
    let stars = [StarKind::Main, StarKind::Blue, StarKind::Red, StarKind::Yellow, StarKind::Orange, StarKind::Giant];
    for kind in stars {
        assert!(catalog::star(kind, &p, seed).mass() > 0.0);
    }
    for kind in [PlanetKind::Rocky, PlanetKind::Gaseous] {
        assert!(catalog::planet(kind, WHITE, &p, seed).mass() > 0.0);
    }
    for kind in [MoonKind::Small, MoonKind::Large] {
        assert!(catalog::moon(kind, &p, seed).mass() > 0.0);
    }
}

// ==================================================================================
// Orbit seeding tests
// ==================================================================================

#[test]
fn bearing_covers_all_quadrants() {
    let o = NVec2::zeros();
    let cases = [
        (NVec2::new(1.0, 0.0), 0.0),
        (NVec2::new(1.0, 1.0), FRAC_PI_4),
        (NVec2::new(0.0, 1.0), FRAC_PI_2),
        (NVec2::new(-1.0, 1.0), 3.0 * FRAC_PI_4),
        (NVec2::new(-1.0, 0.0), PI),
        (NVec2::new(-1.0, -1.0), 5.0 * FRAC_PI_4),
        (NVec2::new(0.0, -1.0), 3.0 * FRAC_PI_2),
        (NVec2::new(1.0, -1.0), 7.0 * FRAC_PI_4),
    ];
    for (q, expected) in cases {
        let b = bearing(&o, &q);
        assert!((0.0..TAU).contains(&b), "bearing {b} out of range");
        assert!((b - expected).abs() < 1e-12, "bearing to {q:?}: {b} != {expected}");
    }
    assert_eq!(bearing(&o, &o), 0.0);
}

#[test]
fn angle_between_bodies_is_reversible() {
    let a = body_at(1.0, 10.0, 20.0);
    let b = body_at(1.0, -30.0, 45.0);
    let diff = (angle(&a, &b) - angle(&b, &a)).abs();
    assert!((diff - PI).abs() < 1e-12);
}

#[test]
fn assign_parent_gives_circular_speed() {
    let p = test_params();
    let anchor = body_at(1.0e14, 20.0, -10.0);
    let mut child = body_at(1.0e8, 20.0, 90.0);
    assign_parent(&mut child, &anchor, p.G);

    let r = 100.0;
    assert_close(child.velocity().norm(), (p.G * 1.0e14 / r).sqrt(), 1e-12);

    let radial = child.position() - anchor.position();
    assert!(child.velocity().dot(&radial).abs() < 1e-9 * child.velocity().norm() * r);
    // angle(child -> anchor) + π/2 turns clockwise with y up
    assert!(radial.perp(&child.velocity()) < 0.0);
}

#[test]
fn assign_parent_adds_anchor_velocity() {
    let p = test_params();
    let anchor = Body::new(1.0e14, 0.0, 0.0, 2.5, 0.4, 1.0, WHITE);
    let mut moving = body_at(1.0e8, 150.0, 0.0);
    let mut still = body_at(1.0e8, 150.0, 0.0);
    assign_parent(&mut moving, &anchor, p.G);
    assign_parent(&mut still, &body_at(1.0e14, 0.0, 0.0), p.G);

    assert_vec_close(&(moving.velocity() - still.velocity()), &anchor.velocity(), 1e-12);
}

#[test]
fn assign_parent_on_top_of_anchor_copies_its_velocity() {
    let p = test_params();
    let anchor = Body::new(1.0e14, 5.0, 5.0, 1.0, 0.0, 1.0, WHITE);
    let mut child = body_at(1.0e8, 5.0, 5.0);
    assign_parent(&mut child, &anchor, p.G);
    assert_eq!(child.velocity(), anchor.velocity());
}

#[test]
fn assign_binary_balances_momentum() {
    let p = test_params();
    for (ma, mb) in [(1.0e14, 3.0e14), (5.0e13, 5.0e13), (1.0e14, 1.0e8)] {
        let mut a = body_at(ma, -40.0, 10.0);
        let mut b = body_at(mb, 160.0, 10.0);
        assign_binary(&mut a, &mut b, p.G);

        let pa = a.mass() * a.velocity();
        let pb = b.mass() * b.velocity();
        assert!((pa + pb).norm() <= 1e-12 * pa.norm(), "momentum not balanced for {ma}, {mb}");

        let r = 200.0;
        assert_close(a.velocity().norm(), (p.G * mb * mb / (r * (ma + mb))).sqrt(), 1e-12);
        assert_close(b.velocity().norm(), (p.G * ma * ma / (r * (ma + mb))).sqrt(), 1e-12);
    }
}

#[test]
fn binary_pair_keeps_its_separation() {
    let p = test_params();
    let mut a = body_at(1.0e14, -100.0, 0.0);
    let mut b = body_at(1.0e14, 100.0, 0.0);
    assign_binary(&mut a, &mut b, p.G);

    let mut scenario = running(vec![a, b]);
    let mut min_d = f64::INFINITY;
    let mut max_d = 0.0_f64;
    for _ in 0..300 {
        scenario.step(&mut NullSink).unwrap();
        let d = scenario.system.bodies[0].distance(&scenario.system.bodies[1]);
        min_d = min_d.min(d);
        max_d = max_d.max(d);
    }
    assert!(min_d > 190.0 && max_d < 210.0, "separation drifted to [{min_d}, {max_d}]");
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn circular_orbit_returns_after_one_period() {
    let r = 400.0;
    let (star, planet) = star_and_planet(r);
    let v = planet.velocity().norm();
    let period = (TAU * r / v).ceil() as u64;

    let mut scenario = running(vec![star, planet]);
    let mut min_d = f64::INFINITY;
    let mut max_d = 0.0_f64;
    for _ in 0..period {
        scenario.step(&mut NullSink).unwrap();
        let d = scenario.system.bodies[0].distance(&scenario.system.bodies[1]);
        min_d = min_d.min(d);
        max_d = max_d.max(d);
    }

    let d = scenario.system.bodies[0].distance(&scenario.system.bodies[1]);
    assert!((d - r).abs() < 0.01 * r, "distance after one period: {d}");
    assert!(min_d > 0.99 * r && max_d < 1.01 * r, "radius left [{min_d}, {max_d}]");

    let home = (scenario.system.bodies[1].position() - NVec2::new(r, 0.0)).norm();
    assert!(home < 0.02 * r, "planet ended {home} away from its start");
}

#[test]
fn one_tick_moves_planet_by_its_new_velocity() {
    let p = test_params();
    let (star, planet) = star_and_planet(100.0);
    assert_close(planet.velocity().norm(), (p.G * star.mass() / 100.0).sqrt(), 1e-12);

    let before = planet.position();
    let v_before = planet.velocity();
    let mut scenario = running(vec![star, planet]);

    let mut frame: Vec<RenderedBody> = Vec::new();
    scenario.step(&mut frame).unwrap();

    let moved = &scenario.system.bodies[1];
    let a = moved.acceleration();
    assert_eq!(moved.velocity(), v_before + a);
    assert_eq!(moved.position(), before + moved.velocity());
    // the stored acceleration was taken from the start-of-tick star position
    assert!(a.dot(&(NVec2::zeros() - before)) > 0.0);

    let fresh = moved.gravity_from(&scenario.system.bodies, p.G);
    let to_star = scenario.system.bodies[0].position() - moved.position();
    assert!(fresh.dot(&to_star) > 0.0);
    assert!(fresh.perp(&to_star).abs() < 1e-9 * fresh.norm() * to_star.norm());
}

#[test]
fn verlet_orbit_stays_bounded() {
    let r = 200.0;
    let (star, planet) = star_and_planet(r);
    let engine = Engine { integrator: IntegratorConfig::Verlet, ..Engine::default() };
    let mut scenario = Scenario::new(engine, test_params()).unwrap();
    scenario.load_preset(vec![star, planet]).unwrap();
    scenario.start().unwrap();

    for _ in 0..500 {
        scenario.step(&mut NullSink).unwrap();
        let d = scenario.system.bodies[0].distance(&scenario.system.bodies[1]);
        assert!((d - r).abs() < 0.01 * r, "verlet radius drifted to {d}");
    }
    assert_close(scenario.system.t, 500.0, 1e-12);
}

#[test]
fn every_body_is_rendered_once_per_tick_after_moving() {
    let p = test_params();
    let bodies = vec![
        catalog::star(StarKind::Blue, &p, OrbitSeed::at(0.0, 0.0)),
        catalog::planet(PlanetKind::Gaseous, Rgb::new(1, 2, 3), &p, OrbitSeed { x: 300.0, y: 0.0, speed: 5.0, angle: FRAC_PI_2 }),
        catalog::moon(MoonKind::Small, &p, OrbitSeed::at(320.0, 0.0)),
    ];
    let mut scenario = running(bodies);

    let mut frame: Vec<RenderedBody> = Vec::new();
    scenario.step(&mut frame).unwrap();
    assert_eq!(frame.len(), 3);
    for (r, b) in frame.iter().zip(scenario.system.bodies.iter()) {
        assert_eq!(r.position, b.position());
        assert_eq!(r.radius, b.radius());
        assert_eq!(r.color, b.color());
    }

    frame.clear();
    scenario.run(4, &mut frame).unwrap();
    assert_eq!(frame.len(), 12);
    assert_eq!(scenario.ticks(), 5);
}

#[test]
fn empty_scenario_steps_trivially() {
    let mut scenario = running(Vec::new());
    let mut frame: Vec<RenderedBody> = Vec::new();
    scenario.run(3, &mut frame).unwrap();
    assert!(frame.is_empty());
    assert_eq!(scenario.ticks(), 3);
}

// ==================================================================================
// Scenario lifecycle tests
// ==================================================================================

#[test]
fn step_before_start_is_rejected() {
    let mut scenario = Scenario::new(Engine::default(), test_params()).unwrap();
    assert_eq!(scenario.phase(), Phase::Placing);
    assert_eq!(scenario.step(&mut NullSink), Err(SimulationError::NotRunning));
}

#[test]
fn no_edits_after_start() {
    let mut scenario = running(vec![body_at(1.0e14, 0.0, 0.0)]);
    assert_eq!(scenario.phase(), Phase::Running);
    assert_eq!(scenario.place(body_at(1.0, 1.0, 1.0)), Err(SimulationError::AlreadyRunning));
    assert_eq!(scenario.load_preset(Vec::new()), Err(SimulationError::AlreadyRunning));
    assert_eq!(scenario.start(), Err(SimulationError::AlreadyRunning));
    assert_eq!(scenario.body_count(), 1);
}

#[test]
fn start_merges_presets_before_placed_bodies() {
    let mut scenario = Scenario::new(Engine::default(), test_params()).unwrap();
    scenario.place(body_at(3.0, 30.0, 0.0)).unwrap();
    scenario.load_preset(vec![body_at(1.0, 10.0, 0.0), body_at(2.0, 20.0, 0.0)]).unwrap();
    scenario.place(body_at(4.0, 40.0, 0.0)).unwrap();

    let pending: Vec<f64> = scenario.bodies().map(|b| b.mass()).collect();
    assert_eq!(pending, vec![1.0, 2.0, 3.0, 4.0]);

    scenario.start().unwrap();
    let active: Vec<f64> = scenario.system.bodies.iter().map(|b| b.mass()).collect();
    assert_eq!(active, vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(scenario.bodies().count(), 4);
}

#[test]
fn bad_parameters_are_rejected() {
    let mut p = test_params();
    p.h0 = 0.0;
    assert!(matches!(
        Scenario::new(Engine::default(), p),
        Err(SimulationError::BadParameter { name: "h0", .. })
    ));

    let mut p = test_params();
    p.G = f64::NAN;
    assert!(matches!(
        Scenario::new(Engine::default(), p),
        Err(SimulationError::BadParameter { name: "G", .. })
    ));

    let engine = Engine { theta: -1.0, ..Engine::default() };
    assert!(matches!(
        Scenario::new(engine, test_params()),
        Err(SimulationError::BadParameter { name: "theta", .. })
    ));
}

// ==================================================================================
// Benchmark tests
// ==================================================================================

#[test]
fn step_benchmark_runs_every_size() {
    assert_eq!(orbitsim::bench_steps(), Ok(()));
}
