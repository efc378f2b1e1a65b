//! Configuration types for loading simulation scenes from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scene. A scene consists of:
//!
//! - [`EngineConfig`]     – integrator and force accumulation options
//! - [`ParametersConfig`] – step size and physical constants
//! - [`BodyConfig`]       – category, sub-type and placement of each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scene from YAML
//!
//! `engine` and `parameters` may be left out entirely; every field has a
//! default.
//!
//! # YAML format
//! A star with one planet on a circular orbit and a moon around the planet:
//!
//! ```yaml
//! engine:
//!   integrator: "euler"     # or "verlet"
//!   barnes_hut: false
//!   theta: 0.5
//!
//! parameters:
//!   h0: 1.0                 # step size, one frame
//!   G: 6.67e-11             # gravitational constant
//!   stellar_mass: 1.0e14    # M; planets use M/1e6
//!
//! bodies:
//!   - kind: star
//!     sub_type: main
//!     x: [ 0.0, 0.0 ]
//!   - kind: planet
//!     sub_type: rocky
//!     color: [ 80, 140, 255 ]
//!     x: [ 300.0, 0.0 ]
//!     parent: 0             # circular orbit around body 0
//!   - kind: moon
//!     x: [ 320.0, 0.0 ]
//!     parent: 1
//! ```
//!
//! `parent` and `binary_with` must name an earlier body. Bodies without
//! either start with `speed` along `angle` (radians).

use serde::Deserialize;

use crate::simulation::params::{Parameters, GRAV_CONST, STELLAR_MASS};

/// Which integrator the engine uses
/// `integrator: "euler"` or `integrator: "verlet"`
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntegratorConfig {
    #[default]
    #[serde(rename = "euler")] // Semi-implicit Euler, one force evaluation per step
    Euler,

    #[serde(rename = "verlet")] // Velocity Verlet, two force evaluations per step
    Verlet,
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub integrator: IntegratorConfig, // Time integrator used for advancing the system state
    pub barnes_hut: bool, // `true` - approximate gravity with a quadtree, `false` - direct N^2 summation
    pub theta: Option<f64>, // Opening angle for Barnes–Hut
}

/// Step size and physical constants for a scene
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub h0: f64, // time step size
    pub G: f64, // gravitational constant
    pub stellar_mass: f64, // base stellar mass unit
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            h0: 1.0,
            G: GRAV_CONST,
            stellar_mass: STELLAR_MASS,
        }
    }
}

impl From<&ParametersConfig> for Parameters {
    fn from(cfg: &ParametersConfig) -> Self {
        Self {
            h0: cfg.h0,
            G: cfg.G,
            stellar_mass: cfg.stellar_mass,
        }
    }
}

/// Body category, `kind: star | planet | moon`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryConfig {
    Star,
    Planet,
    Moon,
}

/// Configuration for a single body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub kind: CategoryConfig,
    #[serde(default)]
    pub sub_type: Option<String>, // unknown or missing -> category default
    pub x: Vec<f64>, // Initial position `[x, y]`
    #[serde(default)]
    pub speed: f64, // Initial speed, ignored when an orbit is seeded
    #[serde(default)]
    pub angle: f64, // Direction of the initial speed in radians
    #[serde(default)]
    pub color: Option<[u8; 3]>, // Planet color
    #[serde(default)]
    pub parent: Option<usize>, // Circular orbit around this earlier body
    #[serde(default)]
    pub binary_with: Option<usize>, // Mutual orbit with this earlier body
}

/// Top-level scene configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // Integrator and Barnes–Hut options
    #[serde(default)]
    pub parameters: ParametersConfig, // Step size and constants
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // Preset bodies, in placement order
}
