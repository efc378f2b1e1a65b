//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the runtime settings that stay fixed once a scenario
//! is built:
//! - integration step size (`h0`, one frame per step, 1.0 by default),
//! - gravitational constant `G`,
//! - the stellar mass unit `M`, from which planet and moon masses derive

/// Gravitational constant used when a scene does not override it
pub const GRAV_CONST: f64 = 6.67e-11;

/// Base stellar mass unit `M`
pub const STELLAR_MASS: f64 = 1.0e14;

/// Planetary mass unit `P` as a fraction of `M`
pub const PLANET_MASS_RATIO: f64 = 1.0e-6;

/// Small and large moon masses as fractions of `P`
pub const SMALL_MOON_RATIO: f64 = 1.0e-4;
pub const LARGE_MOON_RATIO: f64 = 1.0e-2;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub h0: f64, // step size
    pub G: f64, // gravitational constant
    pub stellar_mass: f64, // M
}

impl Parameters {
    /// `P = M / 1e6`
    pub fn planet_mass(&self) -> f64 {
        self.stellar_mass * PLANET_MASS_RATIO
    }

    pub fn small_moon_mass(&self) -> f64 {
        self.planet_mass() * SMALL_MOON_RATIO
    }

    pub fn large_moon_mass(&self) -> f64 {
        self.planet_mass() * LARGE_MOON_RATIO
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            h0: 1.0,
            G: GRAV_CONST,
            stellar_mass: STELLAR_MASS,
        }
    }
}
