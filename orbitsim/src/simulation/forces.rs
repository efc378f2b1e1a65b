//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait, direct Newtonian gravity and a
//! Barnes–Hut quadtree variant for larger body counts

use crate::simulation::barnes_hut::BarnesHutTree;
use crate::simulation::states::{NVec2, System};

/// Collection of acceleration terms.
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    /// - `sys` is only read, so every term sees the same snapshot
    pub fn accumulate_accels(&self, t: f64, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(t, sys, out);
        }
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for acceleration sources operating on [`System`].
/// Implementations add their contribution into `out[i]` for each body and
/// must only read `sys`
pub trait Acceleration {
    fn acceleration(&self, t: f64, sys: &System, out: &mut [NVec2]);
}

/// Direct O(n^2) Newtonian gravity without softening.
///
/// Each body gathers its own sum, so `out[i]` is only ever written for body
/// `i` and the result does not depend on the order of `sys.bodies`.
/// Coincident bodies are skipped instead of dividing by zero.
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        for (acc, body) in out.iter_mut().zip(sys.bodies.iter()) {
            *acc += body.gravity_from(&sys.bodies, self.G);
        }
    }
}

/// Newtonian gravity evaluated via a Barnes–Hut quadtree.
/// Approximate O(N log N); `theta` is the opening angle, and `theta = 0`
/// reduces to direct summation
#[allow(non_snake_case)]
pub struct NewtonianGravityBarnesHut {
    pub G: f64,
    pub theta: f64,
}

impl Acceleration for NewtonianGravityBarnesHut {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        if sys.bodies.is_empty() {
            return;
        }
        let tree = BarnesHutTree::build(sys);
        for (i, acc) in out.iter_mut().enumerate().take(sys.bodies.len()) {
            *acc += tree.accel_on_body(i, sys, self.G, self.theta);
        }
    }
}
