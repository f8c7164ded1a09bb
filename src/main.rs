//! Headless host for the simulation: owns the frame loop, records snapshots, and reports diagnostics.
//! A windowed front end would call `advance`, then read `positions_view` and `colors_view`, the same way.

use std::{path::Path, time::Instant};

use sph_fluid::{playback::SnapShot, properties, util, Config, SimError, State};

const SAVE_FILE: &str = "config.sph";
const DEFAULT_SNAPSHOT_FILE: &str = "snapshots.sph";

const BENCH_RATIO: usize = 100;

fn load_config() -> Config {
    match util::load(Path::new(SAVE_FILE)) {
        Ok(cfg) => {
            log::info!("Loaded config from {SAVE_FILE}");
            cfg
        }
        Err(e) => {
            log::info!("No usable config at {SAVE_FILE} ({e}); using defaults");
            let cfg = Config::default();
            if let Err(e) = util::save(Path::new(SAVE_FILE), &cfg) {
                log::warn!("Unable to write default config: {e}");
            }
            cfg
        }
    }
}

fn run(config: Config) -> Result<(), SimError> {
    let num_timesteps = config.num_timesteps;
    // 0 would divide by zero in the modulo below.
    let snapshot_ratio = config.snapshot_ratio.max(1);
    let plot_diagnostics = config.plot_diagnostics;

    let mut state = State::new(config)?;

    let mut snapshots = vec![SnapShot::new(&state)];
    let mut ke_history = vec![(0., properties::kinetic_energy(state.particles()))];

    log::info!(
        "Running {} particles for {num_timesteps} steps",
        state.particles().len()
    );

    let mut start_time = Instant::now();

    for t in 0..num_timesteps {
        state.advance();

        if t % snapshot_ratio == 0 {
            snapshots.push(SnapShot::new(&state));
            ke_history.push((
                state.time_elapsed(),
                properties::kinetic_energy(state.particles()),
            ));
        }

        if t % BENCH_RATIO == 0 {
            state.check_stability()?;

            let particles = state.particles();
            log::info!(
                "t: {}, Step time: {}μs, KE: {:.4}, ρ mean: {:.4}, V max: {:.4}",
                t,
                start_time.elapsed().as_micros() / BENCH_RATIO as u128,
                properties::kinetic_energy(particles),
                properties::mean_density(particles),
                properties::max_speed(particles),
            );
            start_time = Instant::now();
        }
    }

    state.check_stability()?;

    let c = properties::centroid(state.particles());
    log::info!(
        "Run complete. t: {:.3}. Centroid: ({:.3}, {:.3})",
        state.time_elapsed(),
        c.x,
        c.y
    );

    util::save(Path::new(DEFAULT_SNAPSHOT_FILE), &snapshots)?;
    log::info!("Saved {} snapshots to {DEFAULT_SNAPSHOT_FILE}", snapshots.len());

    if plot_diagnostics {
        if let Err(e) = properties::plot_kinetic_energy(&ke_history, "run") {
            log::error!("Error plotting kinetic energy: {e}");
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let config = load_config();

    if let Err(e) = run(config) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
