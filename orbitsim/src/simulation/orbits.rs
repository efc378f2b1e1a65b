//! Initial-velocity helpers that put a freshly built body on a circular orbit.
//!
//! Both seeders run once, before the body joins the active set. They only
//! write velocities.

use std::f64::consts::{FRAC_PI_2, TAU};

use log::warn;

use crate::simulation::states::{Body, NVec2};

/// Bearing from `p` to `q` in `[0, 2π)`, counter-clockwise from +x.
///
/// A vertical line gives `π/2` (q above p) or `3π/2` (q below p);
/// coincident points give `0`.
pub fn bearing(p: &NVec2, q: &NVec2) -> f64 {
    let d = q - p;
    let theta = d.y.atan2(d.x);
    if theta < 0.0 {
        theta + TAU
    } else {
        theta
    }
}

/// Bearing from body `a` to body `b`
pub fn angle(a: &Body, b: &Body) -> f64 {
    bearing(&a.x, &b.x)
}

/// Vector of length `magnitude` pointing along `angle`
#[inline]
pub fn components(magnitude: f64, angle: f64) -> NVec2 {
    NVec2::new(magnitude * angle.cos(), magnitude * angle.sin())
}

/// Speed of a circular orbit of radius `r` around a mass `m`
#[inline]
pub fn circular_orbit_speed(g: f64, m: f64, r: f64) -> f64 {
    (g * m / r).sqrt()
}

/// Put `child` on a circular orbit around `anchor`.
///
/// The new velocity is the anchor's velocity plus `sqrt(G m_anchor / d)`
/// along `angle(child -> anchor) + π/2`. The anchor is assumed to dominate
/// and to be unaffected by the child; use [`assign_binary`] when both
/// masses matter.
pub fn assign_parent(child: &mut Body, anchor: &Body, g: f64) {
    let frame_velocity = anchor.v;
    let d = child.distance(anchor);
    if d == 0.0 {
        warn!("assign_parent: child sits on its anchor, copying anchor velocity only");
        child.v = frame_velocity;
        return;
    }

    let speed = circular_orbit_speed(g, anchor.m, d);
    let direction = angle(child, anchor) + FRAC_PI_2;
    child.v = frame_velocity + components(speed, direction);
}

/// Put `a` and `b` on mutual circular orbits about their barycenter.
///
/// For separation `r`:
/// - `|v_a| = sqrt(G m_b^2 / (r (m_a + m_b)))` along `angle(a -> b) + π/2`
/// - `|v_b| = sqrt(G m_a^2 / (r (m_a + m_b)))` along `angle(b -> a) + π/2`
///
/// The two bearings differ by π, so the momenta cancel.
pub fn assign_binary(a: &mut Body, b: &mut Body, g: f64) {
    let r = a.distance(b);
    if r == 0.0 {
        warn!("assign_binary: bodies are coincident, leaving them at rest");
        a.v = NVec2::zeros();
        b.v = NVec2::zeros();
        return;
    }

    let total = a.m + b.m;
    let speed_a = (g * b.m * b.m / (r * total)).sqrt();
    let speed_b = (g * a.m * a.m / (r * total)).sqrt();

    let dir_a = angle(a, b) + FRAC_PI_2;
    let dir_b = angle(b, a) + FRAC_PI_2;

    a.v = components(speed_a, dir_a);
    b.v = components(speed_b, dir_b);
}
