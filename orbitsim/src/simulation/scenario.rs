//! Simulation context and its two-state lifecycle
//!
//! A `Scenario` owns everything a run needs:
//! - engine settings (`Engine`)
//! - numerical parameters and constants (`Parameters`)
//! - the active body set (`System`)
//! - the force set (`AccelSet`)
//!
//! It starts out *placing*: preset bodies are loaded and user bodies are
//! placed. `start` merges presets then placed bodies into the active set
//! and switches to *running*, after which each `step` advances one tick.
//! There is no way back; a restart is a new `Scenario`.
//!
//! Scenarios are inserted into Bevy as a `Resource` by the viewer.

use bevy::prelude::Resource;
use log::{debug, info, trace};

use crate::configuration::config::{BodyConfig, CategoryConfig, IntegratorConfig, ScenarioConfig};
use crate::simulation::catalog::{BodyKind, MoonKind, OrbitSeed, PlanetKind, StarKind, DEFAULT_PLANET_COLOR};
use crate::simulation::engine::{Engine, DEFAULT_THETA};
use crate::simulation::error::SimulationError;
use crate::simulation::forces::{AccelSet, NewtonianGravity, NewtonianGravityBarnesHut};
use crate::simulation::integrator::{euler_integrator, verlet_integrator};
use crate::simulation::orbits::{assign_binary, assign_parent};
use crate::simulation::params::Parameters;
use crate::simulation::render::RenderSink;
use crate::simulation::states::{Body, Rgb, System};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Placing,
    Running,
}

#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
    phase: Phase,
    presets: Vec<Body>,
    placed: Vec<Body>,
    ticks: u64,
}

impl Scenario {
    /// Empty scenario in the placing phase
    pub fn new(engine: Engine, parameters: Parameters) -> Result<Self, SimulationError> {
        check_positive("h0", parameters.h0)?;
        check_positive("G", parameters.G)?;
        check_positive("stellar_mass", parameters.stellar_mass)?;
        if !(engine.theta.is_finite() && engine.theta >= 0.0) {
            return Err(SimulationError::BadParameter { name: "theta", value: engine.theta });
        }

        let forces = build_forces(&engine, &parameters);

        Ok(Self {
            engine,
            parameters,
            system: System::default(),
            forces,
            phase: Phase::Placing,
            presets: Vec::new(),
            placed: Vec::new(),
            ticks: 0,
        })
    }

    /// Scenario with the scene's bodies loaded as presets
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimulationError> {
        // Parameters (runtime) from ParametersConfig
        let parameters = Parameters::from(&cfg.parameters);

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            integrator: cfg.engine.integrator,
            barnes_hut: cfg.engine.barnes_hut,
            theta: cfg.engine.theta.unwrap_or(DEFAULT_THETA),
        };

        let mut scenario = Self::new(engine, parameters)?;
        let bodies = build_bodies(&cfg.bodies, &scenario.parameters)?;
        scenario.load_preset(bodies)?;
        Ok(scenario)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Ticks taken since `start`
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Queue preset bodies; they go ahead of placed bodies at `start`
    pub fn load_preset(&mut self, bodies: Vec<Body>) -> Result<(), SimulationError> {
        if self.is_running() {
            return Err(SimulationError::AlreadyRunning);
        }
        debug!("loaded {} preset bodies", bodies.len());
        self.presets.extend(bodies);
        Ok(())
    }

    /// Queue one user-placed body
    pub fn place(&mut self, body: Body) -> Result<(), SimulationError> {
        if self.is_running() {
            return Err(SimulationError::AlreadyRunning);
        }
        debug!("placed body of mass {:e} at {:?}", body.mass(), body.position());
        self.placed.push(body);
        Ok(())
    }

    /// Bodies in active-set order: pending presets then placed bodies before
    /// `start`, the active set after
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        let (first, second): (&[Body], &[Body]) = match self.phase {
            Phase::Placing => (self.presets.as_slice(), self.placed.as_slice()),
            Phase::Running => (self.system.bodies.as_slice(), &[][..]),
        };
        first.iter().chain(second.iter())
    }

    pub fn body_count(&self) -> usize {
        match self.phase {
            Phase::Placing => self.presets.len() + self.placed.len(),
            Phase::Running => self.system.bodies.len(),
        }
    }

    /// Merge presets and placed bodies into the active set and start running
    pub fn start(&mut self) -> Result<(), SimulationError> {
        if self.is_running() {
            return Err(SimulationError::AlreadyRunning);
        }

        let preset_count = self.presets.len();
        let placed_count = self.placed.len();
        let mut bodies = std::mem::take(&mut self.presets);
        bodies.append(&mut self.placed);

        self.system = System { bodies, t: 0.0 };
        self.phase = Phase::Running;

        info!(
            "simulation running: {} bodies ({} preset, {} placed), {:?}, {}",
            self.system.bodies.len(),
            preset_count,
            placed_count,
            self.engine.integrator,
            if self.engine.barnes_hut { "barnes-hut" } else { "direct" },
        );
        Ok(())
    }

    /// Advance one tick: accelerate, integrate, hand every body to `sink`
    pub fn step<S>(&mut self, sink: &mut S) -> Result<(), SimulationError>
    where
        S: RenderSink + ?Sized,
    {
        if !self.is_running() {
            return Err(SimulationError::NotRunning);
        }

        match self.engine.integrator {
            IntegratorConfig::Euler => euler_integrator(&mut self.system, &self.forces, &self.parameters, sink),
            IntegratorConfig::Verlet => verlet_integrator(&mut self.system, &self.forces, &self.parameters, sink),
        }

        self.ticks += 1;
        trace!("tick {} done, t = {}", self.ticks, self.system.t);
        Ok(())
    }

    /// Take `steps` ticks
    pub fn run<S>(&mut self, steps: u64, sink: &mut S) -> Result<(), SimulationError>
    where
        S: RenderSink + ?Sized,
    {
        for _ in 0..steps {
            self.step(sink)?;
        }
        Ok(())
    }
}

/// Build and orbit-seed the scene's bodies in order.
///
/// `parent` and `binary_with` may only name bodies that come earlier in the
/// list; those have already been built and seeded.
pub fn build_bodies(cfgs: &[BodyConfig], params: &Parameters) -> Result<Vec<Body>, SimulationError> {
    let mut bodies: Vec<Body> = Vec::with_capacity(cfgs.len());

    for (i, bc) in cfgs.iter().enumerate() {
        let &[x, y] = bc.x.as_slice() else {
            return Err(SimulationError::BadVector { body: i, len: bc.x.len() });
        };
        let seed = OrbitSeed { x, y, speed: bc.speed, angle: bc.angle };
        let mut body = body_kind(bc).build(params, seed);

        match (bc.parent, bc.binary_with) {
            (Some(_), Some(_)) => return Err(SimulationError::ConflictingOrbit { body: i }),
            (Some(p), None) => {
                // `bodies` only holds earlier entries, so `get` rejects forward references
                let anchor = bodies
                    .get(p)
                    .ok_or(SimulationError::BadOrbitReference { body: i, target: p })?;
                assign_parent(&mut body, anchor, params.G);
            }
            (None, Some(j)) => {
                let partner = bodies
                    .get_mut(j)
                    .ok_or(SimulationError::BadOrbitReference { body: i, target: j })?;
                assign_binary(partner, &mut body, params.G);
            }
            (None, None) => {}
        }

        bodies.push(body);
    }

    Ok(bodies)
}

fn body_kind(bc: &BodyConfig) -> BodyKind {
    let tag = bc.sub_type.as_deref();
    match bc.kind {
        CategoryConfig::Star => BodyKind::Star(tag.map(StarKind::from_tag).unwrap_or_default()),
        CategoryConfig::Planet => BodyKind::Planet(
            tag.map(PlanetKind::from_tag).unwrap_or_default(),
            bc.color.map(Rgb::from).unwrap_or(DEFAULT_PLANET_COLOR),
        ),
        CategoryConfig::Moon => BodyKind::Moon(tag.map(MoonKind::from_tag).unwrap_or_default()),
    }
}

/// Forces: direct Newtonian gravity, or the quadtree variant
fn build_forces(engine: &Engine, parameters: &Parameters) -> AccelSet {
    let forces = AccelSet::new();
    if engine.barnes_hut {
        forces.with(NewtonianGravityBarnesHut {
            G: parameters.G,
            theta: engine.theta,
        })
    } else {
        forces.with(NewtonianGravity {
            G: parameters.G,
        })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::BadParameter { name, value })
    }
}
