//! Fixed-step time integrators for the N-body system
//!
//! Both integrators take one step of `params.h0`, hand every body to the
//! render sink after its position update, and compute all accelerations
//! from a single snapshot before any velocity or position changes

use super::forces::AccelSet;
use super::params::Parameters;
use super::render::RenderSink;
use super::states::{NVec2, System};

/// Advance the system by one step using semi-implicit Euler.
///
/// 1. a_n from x_n for every body
/// 2. v_n+1 = v_n + dt a_n for every body
/// 3. x_n+1 = x_n + dt v_n+1, then render, for every body
pub fn euler_integrator<S>(sys: &mut System, forces: &AccelSet, params: &Parameters, sink: &mut S)
where
    S: RenderSink + ?Sized,
{
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let dt = params.h0;

    // Phase 1: every acceleration reads the same start-of-step positions
    let mut accels = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys.t, &*sys, &mut accels);
    for (b, a) in sys.bodies.iter_mut().zip(accels) {
        b.a = a;
    }

    // Phase 2: kick
    for b in sys.bodies.iter_mut() {
        b.update_velocity(dt);
    }

    // Phase 3: drift and hand off
    for b in sys.bodies.iter_mut() {
        b.update_position(dt);
        sink.render(&b.x, b.radius, b.color);
    }

    sys.t += dt;
}

/// Advance the system by one step using velocity–Verlet.
/// Uses two force evaluations per step; each body keeps the end-of-step
/// acceleration
pub fn verlet_integrator<S>(sys: &mut System, forces: &AccelSet, params: &Parameters, sink: &mut S)
where
    S: RenderSink + ?Sized,
{
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let dt = params.h0; // time step dt
    let half_dt = 0.5 * dt; // half step dt/2

    // a_n from x_n at time t_n
    let mut a_old = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys.t, &*sys, &mut a_old);

    // Kick: v_n+1/2 = v_n + (1/2 * dt) * a_n
    for (b, a) in sys.bodies.iter_mut().zip(a_old.iter()) {
        b.v += half_dt * *a;
    }

    // Drift: x_n+1 = x_n + dt v_n+1/2
    for b in sys.bodies.iter_mut() {
        b.update_position(dt);
    }

    // advance time: t_n+1 = t_n + dt
    sys.t += dt;

    // a_n+1 from x_n+1 at time t_n+1
    let mut a_new = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys.t, &*sys, &mut a_new);

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) * a_n+1
    for (b, a) in sys.bodies.iter_mut().zip(a_new) {
        b.a = a;
        b.update_velocity(half_dt);
        sink.render(&b.x, b.radius, b.color);
    }
}
