//! Core state types for the N-body simulation.
//!
//! - `Body`: a point mass with position, velocity, acceleration, visual
//!   radius and color
//! - `System`: the active set of bodies and the elapsed simulation time `t`
//!
//! Positions live in a y-up plane. Any axis flip belongs to the renderer.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Three 0-255 color channels, opaque to the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) x: NVec2, // position
    pub(crate) v: NVec2, // velocity
    pub(crate) a: NVec2, // acceleration, recomputed every tick
    pub(crate) m: f64, // mass
    pub(crate) radius: f64, // visual size only
    pub(crate) color: Rgb,
}

impl Body {
    /// Build a body at `(x, y)` moving with `speed` along `angle` (radians,
    /// counter-clockwise from +x). Acceleration starts at zero.
    pub fn new(m: f64, x: f64, y: f64, speed: f64, angle: f64, radius: f64, color: Rgb) -> Self {
        Self {
            x: NVec2::new(x, y),
            v: NVec2::new(speed * angle.cos(), speed * angle.sin()),
            a: NVec2::zeros(),
            m,
            radius,
            color,
        }
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    /// Not used by the force or integration code; mass is otherwise fixed.
    pub fn set_mass(&mut self, m: f64) {
        self.m = m;
    }

    pub fn position(&self) -> NVec2 {
        self.x
    }

    pub fn velocity(&self) -> NVec2 {
        self.v
    }

    pub fn acceleration(&self) -> NVec2 {
        self.a
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Euclidean distance between the two bodies' positions
    pub fn distance(&self, other: &Body) -> f64 {
        (other.x - self.x).norm()
    }

    /// Gravitational acceleration this body feels from every body in `bodies`.
    ///
    /// Each contributor adds `G * m_j / |r|^2` along the unit vector toward it.
    /// Any body sitting exactly on this body's position (itself included)
    /// contributes nothing, so an empty or singleton set yields zero.
    pub fn gravity_from(&self, bodies: &[Body], g: f64) -> NVec2 {
        let mut acc = NVec2::zeros();
        for other in bodies {
            // r points from this body toward the other one
            let r = other.x - self.x;
            let r2 = r.dot(&r);
            if r2 == 0.0 {
                continue;
            }

            // G m_j / |r|^2 * r_hat == G m_j r / |r|^3
            let inv_r = r2.sqrt().recip();
            acc += g * other.m * inv_r * inv_r * inv_r * r;
        }
        acc
    }

    /// Recompute and store this body's acceleration from `bodies`.
    /// `bodies` is only read.
    pub fn update_acceleration(&mut self, bodies: &[Body], g: f64) {
        self.a = self.gravity_from(bodies, g);
    }

    /// v += a dt
    pub fn update_velocity(&mut self, dt: f64) {
        self.v += dt * self.a;
    }

    /// x += v dt
    pub fn update_position(&mut self, dt: f64) {
        self.x += dt * self.v;
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // active set
    pub t: f64, // time
}
