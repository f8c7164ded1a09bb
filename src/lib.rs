//! A 2D Smoothed-particle hydrodynamics (SPH) fluid simulation.
//!
//! Each call to [`State::advance`] runs, in order: a spatial grid rebuild, the density/pressure pass,
//! the force pass, and integration with wall reflection. The host owns the frame loop, and reads
//! positions and colors between steps.

use bincode::{Decode, Encode};
use lin_alg::f64::Vec3;
use rand::{rngs::StdRng, SeedableRng};

pub mod accel;
pub mod error;
pub mod fluid_dynamics;
pub mod grid;
pub mod integrate;
pub mod kernel;
pub mod particle_creation;
pub mod playback;
pub mod properties;
pub mod render;
pub mod util;

pub use error::SimError;
pub use grid::SpatialGrid;

/// Densities are clamped to at least this, so we never divide by zero.
pub const DENSITY_FLOOR: f64 = 1e-4;

/// Mass is not modeled per particle.
pub const PARTICLE_MASS: f64 = 1.;

pub type Color = (f64, f64, f64);

pub const COLOR_INIT: Color = (0., 0., 1.);

#[derive(Clone, Copy, Debug, PartialEq, Default, Encode, Decode)]
pub enum ParticleLayout {
    /// Uniformly random positions in the domain, and random velocities.
    #[default]
    Random,
    /// A square lattice from the lower-left corner, at rest. Spacing is h/2.
    Block,
}

/// Immutable for the duration of a run. All units are the caller's choice; the presets below
/// are two self-consistent scales.
#[derive(Clone, Debug, PartialEq, Encode, Decode)]
pub struct Config {
    pub num_particles: usize,
    /// Smoothing radius (h). Also the grid cell size.
    pub h: f64,
    /// ρ₀: Pressure is 0 at this density.
    pub rest_density: f64,
    /// k, in p = k(ρ - ρ₀)
    pub stiffness: f64,
    /// μ
    pub viscosity: f64,
    pub gravity: [f64; 2],
    pub dt: f64,
    pub bounds_min: [f64; 2],
    pub bounds_max: [f64; 2],
    /// Velocity is scaled by this on wall reflection. 0 ≤ damping < 1.
    pub boundary_damping: f64,
    /// Each velocity component is clamped to ±this.
    pub max_vel: f64,
    /// Initial velocities are uniform in ±this, per axis.
    pub init_vel: f64,
    /// This speed maps to the top (red) of the color ramp.
    pub color_speed_cap: f64,
    pub layout: ParticleLayout,
    /// `None` uses a thread RNG.
    pub seed: Option<u64>,
    // Host loop settings below.
    pub num_timesteps: usize,
    pub snapshot_ratio: usize,
    pub plot_diagnostics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::unit_square()
    }
}

impl Config {
    /// Screen-space units, e.g. for an 800x600 window. Y points down, so gravity is +y.
    pub fn pixel_space() -> Self {
        Self {
            num_particles: 50,
            h: 15.,
            rest_density: 1.,
            stiffness: 0.1,
            viscosity: 0.01,
            gravity: [0., 0.1],
            dt: 2.,
            bounds_min: [0., 0.],
            bounds_max: [800., 600.],
            boundary_damping: 0.5,
            max_vel: 1.,
            init_vel: 50.,
            color_speed_cap: 10.,
            layout: ParticleLayout::Random,
            seed: None,
            num_timesteps: 2_000,
            snapshot_ratio: 4,
            plot_diagnostics: false,
        }
    }

    /// A small box with unit-scale lengths.
    pub fn unit_square() -> Self {
        Self {
            num_particles: 500,
            h: 0.25,
            rest_density: 150.,
            stiffness: 0.5,
            viscosity: 0.01,
            gravity: [0., -9.81],
            dt: 0.02,
            bounds_min: [0., 0.],
            bounds_max: [5., 5.],
            boundary_damping: 0.5,
            max_vel: 2.,
            init_vel: 1.,
            color_speed_cap: 2.,
            layout: ParticleLayout::Random,
            seed: None,
            num_timesteps: 1_000,
            snapshot_ratio: 4,
            plot_diagnostics: false,
        }
    }

    pub fn gravity(&self) -> Vec3 {
        Vec3::new(self.gravity[0], self.gravity[1], 0.)
    }

    /// Fails on anything that can't describe a runnable simulation. We never correct values silently.
    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |msg: String| Err(SimError::InvalidConfiguration(msg));

        if self.num_particles == 0 {
            return invalid("particle count must be positive".to_owned());
        }

        let fields = [
            ("h", self.h),
            ("rest_density", self.rest_density),
            ("stiffness", self.stiffness),
            ("viscosity", self.viscosity),
            ("gravity.x", self.gravity[0]),
            ("gravity.y", self.gravity[1]),
            ("dt", self.dt),
            ("bounds_min.x", self.bounds_min[0]),
            ("bounds_min.y", self.bounds_min[1]),
            ("bounds_max.x", self.bounds_max[0]),
            ("bounds_max.y", self.bounds_max[1]),
            ("boundary_damping", self.boundary_damping),
            ("max_vel", self.max_vel),
            ("init_vel", self.init_vel),
            ("color_speed_cap", self.color_speed_cap),
        ];
        for (name, val) in fields {
            if !val.is_finite() {
                return invalid(format!("{name} must be finite; got {val}"));
            }
        }
        // Random init samples across these spans, so they must be finite too.
        for i in 0..2 {
            if !(self.bounds_max[i] - self.bounds_min[i]).is_finite() {
                return invalid(format!("domain width on axis {i} overflows"));
            }
        }
        if !(2. * self.init_vel).is_finite() {
            return invalid(format!("initial velocity range overflows; got ±{}", self.init_vel));
        }
        // Written as negations so NaN fails too.
        if !(self.h > 0.) {
            return invalid(format!("smoothing radius must be positive; got {}", self.h));
        }
        if !(self.dt > 0.) {
            return invalid(format!("time step must be positive; got {}", self.dt));
        }
        for i in 0..2 {
            if !(self.bounds_min[i] < self.bounds_max[i]) {
                return invalid(format!(
                    "bounds min must be below max on axis {i}; got {} and {}",
                    self.bounds_min[i], self.bounds_max[i]
                ));
            }
        }
        if !(0. ..1.).contains(&self.boundary_damping) {
            return invalid(format!(
                "boundary damping must be in [0, 1); got {}",
                self.boundary_damping
            ));
        }
        if !(self.max_vel > 0.) {
            return invalid(format!("max velocity must be positive; got {}", self.max_vel));
        }
        if !(self.init_vel >= 0.) {
            return invalid(format!("initial velocity range can't be negative; got {}", self.init_vel));
        }
        if !(self.color_speed_cap > 0.) {
            return invalid(format!(
                "color speed cap must be positive; got {}",
                self.color_speed_cap
            ));
        }

        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub posit: Vec3,
    pub vel: Vec3,
    /// The acceleration applied during the most recent step.
    pub accel: Vec3,
    /// Local density. Always ≥ `DENSITY_FLOOR` after a density pass.
    pub density: f64,
    /// Negative below rest density (tension), positive above (compression).
    pub pressure: f64,
    /// Derived from speed; for rendering only.
    pub color: Color,
}

impl Particle {
    pub fn new(posit: Vec3, vel: Vec3) -> Self {
        Self {
            posit,
            vel,
            accel: Vec3::new_zero(),
            density: 1.,
            pressure: 0.,
            color: COLOR_INIT,
        }
    }
}

/// The particle array, and the config it runs under. The simulation is its only writer.
#[derive(Debug)]
pub struct State {
    config: Config,
    particles: Vec<Particle>,
    time_elapsed: f64,
    steps: usize,
}

impl State {
    /// Validates the config, and creates its particles.
    pub fn new(config: Config) -> Result<Self, SimError> {
        config.validate()?;

        let particles = match config.seed {
            Some(seed) => particle_creation::make_particles(&config, &mut StdRng::seed_from_u64(seed)),
            None => particle_creation::make_particles(&config, &mut rand::rng()),
        };

        log::debug!(
            "Initialized {} particles. Layout: {:?}, h: {}, dt: {}",
            particles.len(),
            config.layout,
            config.h,
            config.dt
        );

        Ok(Self {
            config,
            particles,
            time_elapsed: 0.,
            steps: 0,
        })
    }

    /// Run a custom particle set, e.g. a hand-placed test scene.
    pub fn from_particles(config: Config, particles: Vec<Particle>) -> Result<Self, SimError> {
        config.validate()?;

        if particles.len() != config.num_particles {
            return Err(SimError::InvalidConfiguration(format!(
                "got {} particles; config specifies {}",
                particles.len(),
                config.num_particles
            )));
        }

        Ok(Self {
            config,
            particles,
            time_elapsed: 0.,
            steps: 0,
        })
    }

    /// Advance one time step. The grid is built once here, and shared by the density and force
    /// passes.
    pub fn advance(&mut self) {
        let cfg = &self.config;

        let grid = SpatialGrid::rebuild(&self.particles, cfg.h);
        log::debug!(
            "Step {}: {} occupied cells for {} particles",
            self.steps,
            grid.num_cells(),
            self.particles.len()
        );
        fluid_dynamics::compute_density_pressure(&mut self.particles, &grid, cfg);
        let accels = accel::compute_accels(&self.particles, &grid, cfg);
        integrate::step(&mut self.particles, &accels, cfg);

        render::update_colors(&mut self.particles, cfg.color_speed_cap);

        self.time_elapsed += cfg.dt;
        self.steps += 1;
    }

    /// Returns an error naming the first particle with a non-finite position or velocity.
    pub fn check_stability(&self) -> Result<(), SimError> {
        let bad = self.particles.iter().position(|p| {
            !(p.posit.x.is_finite()
                && p.posit.y.is_finite()
                && p.vel.x.is_finite()
                && p.vel.y.is_finite())
        });

        match bad {
            Some(particle) => {
                log::warn!("Particle {particle} went non-finite at step {}", self.steps);
                Err(SimError::UnstableSimulation { particle })
            }
            None => Ok(()),
        }
    }

    pub fn positions_view(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.particles.iter().map(|p| (p.posit.x, p.posit.y))
    }

    pub fn colors_view(&self) -> impl Iterator<Item = Color> + '_ {
        self.particles.iter().map(|p| p.color)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn time_elapsed(&self) -> f64 {
        self.time_elapsed
    }

    pub fn steps(&self) -> usize {
        self.steps
    }
}
