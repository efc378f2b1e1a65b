use std::time::Instant;

use crate::simulation::engine::Engine;
use crate::simulation::error::SimulationError;
use crate::simulation::forces::{AccelSet, Acceleration, NewtonianGravity, NewtonianGravityBarnesHut};
use crate::simulation::params::Parameters;
use crate::simulation::render::NullSink;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Body, NVec2, Rgb, System};

/// Build a manual System of size `n`, deterministic positions, no rand needed
fn make_system(n: usize, params: &Parameters) -> System {
    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            Body::new(
                params.planet_mass(),
                (i_f * 0.37).sin() * 500.0,
                (i_f * 0.13).cos() * 500.0,
                0.0,
                0.0,
                1.0,
                Rgb::new(255, 255, 255),
            )
        })
        .collect();

    System { bodies, t: 0.0 }
}

/// Time one force evaluation, direct vs Barnes–Hut, for growing `n`
pub fn bench_gravity() {
    let params = Parameters::default();
    let ns = [100, 200, 400, 800, 1600, 3200];

    for n in ns {
        let sys = make_system(n, &params);
        let mut out = vec![NVec2::zeros(); n];

        let direct = NewtonianGravity { G: params.G };
        let bh = NewtonianGravityBarnesHut { G: params.G, theta: 0.7 };

        // Warm up
        direct.acceleration(0.0, &sys, &mut out);
        bh.acceleration(0.0, &sys, &mut out);

        out.fill(NVec2::zeros());
        let t0 = Instant::now();
        direct.acceleration(0.0, &sys, &mut out);
        let dt_direct = t0.elapsed().as_secs_f64();

        out.fill(NVec2::zeros());
        let t1 = Instant::now();
        bh.acceleration(0.0, &sys, &mut out);
        let dt_bh = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, direct = {:8.6} s, BH = {:8.6} s", dt_direct, dt_bh);
    }
}

/// Time full scenario ticks (accumulate + integrate + render) per strategy
pub fn bench_steps() -> Result<(), SimulationError> {
    let params = Parameters::default();
    let steps = 5;

    println!("N,direct_ms,bh_ms");
    for n in (200..=1600).step_by(200) {
        let mut per_step = [0.0; 2];

        for (slot, barnes_hut) in [false, true].into_iter().enumerate() {
            let engine = Engine { barnes_hut, ..Engine::default() };
            let mut scenario = Scenario::new(engine, params.clone())?;
            scenario.load_preset(make_system(n, &params).bodies)?;
            scenario.start()?;

            let t0 = Instant::now();
            scenario.run(steps, &mut NullSink)?;
            per_step[slot] = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;
        }

        println!("{},{:.6},{:.6}", n, per_step[0], per_step[1]);
    }
    Ok(())
}

/// Largest relative difference between direct and Barnes–Hut accelerations
/// over an `n`-body system
pub fn bench_agreement(n: usize) -> f64 {
    let params = Parameters::default();
    let sys = make_system(n, &params);

    let direct = AccelSet::new().with(NewtonianGravity { G: params.G });
    let bh = AccelSet::new().with(NewtonianGravityBarnesHut { G: params.G, theta: 0.5 });

    let mut a = vec![NVec2::zeros(); n];
    let mut b = vec![NVec2::zeros(); n];
    direct.accumulate_accels(0.0, &sys, &mut a);
    bh.accumulate_accels(0.0, &sys, &mut b);

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm() / x.norm().max(f64::MIN_POSITIVE))
        .fold(0.0, f64::max)
}
