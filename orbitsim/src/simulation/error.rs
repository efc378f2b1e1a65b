//! Errors reported by scenario building and the simulation state machine.
//!
//! Numerical edge cases (coincident bodies, empty sets, unknown sub-types)
//! are handled by policy and never show up here.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Bodies can only be placed, and the run started, before it is running
    AlreadyRunning,
    /// `step` was called before `start`
    NotRunning,
    /// A body's `parent`/`binary_with` does not name an earlier body
    BadOrbitReference { body: usize, target: usize },
    /// A body names both a parent and a binary partner
    ConflictingOrbit { body: usize },
    /// A position vector without exactly two components
    BadVector { body: usize, len: usize },
    /// Step size, constant or opening angle out of range
    BadParameter { name: &'static str, value: f64 },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRunning => write!(f, "simulation is already running"),
            Self::NotRunning => write!(f, "simulation has not been started"),
            Self::BadOrbitReference { body, target } => {
                write!(f, "body {body}: orbit target {target} is not an earlier body")
            }
            Self::ConflictingOrbit { body } => {
                write!(f, "body {body}: `parent` and `binary_with` are mutually exclusive")
            }
            Self::BadVector { body, len } => {
                write!(f, "body {body}: expected a 2-component position, got {len}")
            }
            Self::BadParameter { name, value } => {
                write!(f, "parameter `{name}` is out of range: {value}")
            }
        }
    }
}

impl std::error::Error for SimulationError {}
