//! Windowless runner: steps the scenario and reports body state through `log`.

use log::{debug, info, log_enabled, trace, Level};

use crate::simulation::error::SimulationError;
use crate::simulation::render::RenderSink;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, Rgb};

/// Sink that traces every body and counts what it saw
#[derive(Debug, Default)]
pub struct LogSink {
    pub rendered: u64,
}

impl RenderSink for LogSink {
    fn render(&mut self, position: &NVec2, radius: f64, color: Rgb) {
        if log_enabled!(Level::Trace) {
            trace!(
                "body {} at ({:.3}, {:.3}) r={} rgb=({}, {}, {})",
                self.rendered, position.x, position.y, radius, color.r, color.g, color.b
            );
        }
        self.rendered += 1;
    }
}

/// Start the scenario and run `steps` ticks, logging a summary every
/// `report_every` ticks (0 disables the periodic report)
pub fn run_headless(scenario: &mut Scenario, steps: u64, report_every: u64) -> Result<(), SimulationError> {
    if !scenario.is_running() {
        scenario.start()?;
    }

    let mut sink = LogSink::default();
    for _ in 0..steps {
        scenario.step(&mut sink)?;
        if report_every > 0 && scenario.ticks() % report_every == 0 {
            report(scenario);
        }
    }

    info!(
        "headless run finished: {} ticks, t = {}, {} body renders",
        scenario.ticks(),
        scenario.system.t,
        sink.rendered
    );
    for (i, b) in scenario.bodies().enumerate() {
        info!(
            "  body {i}: m={:e} x=({:.3}, {:.3}) v=({:.4}, {:.4})",
            b.mass(),
            b.position().x,
            b.position().y,
            b.velocity().x,
            b.velocity().y
        );
    }
    Ok(())
}

fn report(scenario: &Scenario) {
    let momentum = scenario
        .bodies()
        .fold(NVec2::zeros(), |p, b| p + b.mass() * b.velocity());
    debug!(
        "tick {}: {} bodies, total momentum ({:e}, {:e})",
        scenario.ticks(),
        scenario.body_count(),
        momentum.x,
        momentum.y
    );
}
