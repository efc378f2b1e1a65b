use orbitsim::{ScenarioConfig, Scenario};
use orbitsim::{run_2d, run_headless};
use orbitsim::{bench_gravity, bench_steps, bench_agreement};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "2D gravitational N-body simulation")]
struct Args {
    /// Scene file, looked up under `scenes/` unless it is a path to an existing file
    #[arg(short, long, default_value = "solar_system.yaml")]
    file_name: String,

    /// Run without a window and log body state
    #[arg(long)]
    headless: bool,

    /// Ticks to run in headless mode
    #[arg(long, default_value_t = 1000)]
    steps: u64,

    /// Log a momentum summary every this many ticks (headless, 0 = never)
    #[arg(long, default_value_t = 100)]
    report_every: u64,

    /// Time direct vs Barnes–Hut force accumulation and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenes").join(file_name)
    };

    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scene {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scene {}", config_path.display()))?;

    log::info!("loaded scene {} ({} bodies)", config_path.display(), scenario_cfg.bodies.len());
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_gravity();
        bench_steps()?;
        println!("max relative BH error (n = 400): {:e}", bench_agreement(400));
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    if args.headless {
        run_headless(&mut scenario, args.steps, args.report_every)?;
    } else {
        run_2d(scenario);
    }

    Ok(())
}
