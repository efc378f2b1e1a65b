pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, System, NVec2, Rgb};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::error::SimulationError;
pub use simulation::catalog::{BodyKind, StarKind, PlanetKind, MoonKind, OrbitSeed, star, planet, moon};
pub use simulation::orbits::{angle, bearing, assign_parent, assign_binary};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity, NewtonianGravityBarnesHut};
pub use simulation::integrator::{euler_integrator, verlet_integrator};
pub use simulation::render::{RenderSink, RenderedBody, NullSink};
pub use simulation::scenario::{Scenario, Phase};

pub use configuration::config::{IntegratorConfig, EngineConfig, ParametersConfig, BodyConfig, CategoryConfig, ScenarioConfig};

pub use visualization::{vis2d::run_2d, headless::run_headless};

pub use benchmark::benchmark::{bench_gravity, bench_steps, bench_agreement};
