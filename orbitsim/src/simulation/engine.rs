//! High-level runtime engine settings
//!
//! Selects the integrator and the force accumulation strategy
//! used when building and running a `Scenario`

use crate::configuration::config::IntegratorConfig;

/// Opening angle used when a scene enables Barnes–Hut without giving one
pub const DEFAULT_THETA: f64 = 0.7;

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: IntegratorConfig, // euler or verlet
    pub barnes_hut: bool, // false = direct, true = barnes-hut
    pub theta: f64, // parameter to determine if use center of mass
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            integrator: IntegratorConfig::Euler,
            barnes_hut: false,
            theta: DEFAULT_THETA,
        }
    }
}
