//! This module contains acceleration calculations: pressure, viscosity, and gravity.

use lin_alg::f64::Vec3;

use crate::{grid::SpatialGrid, kernel::kernel_gradient, Config, Particle, DENSITY_FLOOR};

/// Pressure force on a particle from one neighbor. `diff` is the particle's position minus the
/// neighbor's. The pair's pressures are averaged, so both feel equal and opposite forces.
pub(crate) fn force_pressure(diff: Vec3, pressure_tgt: f64, pressure_src: f64, h: f64) -> Vec3 {
    kernel_gradient(diff, h) * (-(pressure_tgt + pressure_src) / 2.)
}

/// Velocity diffusion toward a neighbor. Not kernel-weighted.
pub(crate) fn force_viscosity(vel_tgt: Vec3, vel_src: Vec3, viscosity: f64) -> Vec3 {
    (vel_src - vel_tgt) * viscosity
}

/// The acceleration acting on a single particle, from its grid neighbors and gravity:
/// a = F / ρ. A particle with no neighbors gets gravity only.
pub fn acc_particle(id_tgt: usize, particles: &[Particle], grid: &SpatialGrid, cfg: &Config) -> Vec3 {
    let tgt = &particles[id_tgt];

    let mut f_pressure = Vec3::new_zero();
    let mut f_viscosity = Vec3::new_zero();

    for j in grid.neighbors_of(grid.cell_of(tgt.posit)) {
        if j == id_tgt {
            continue; // self-interaction.
        }
        let src = &particles[j];

        let diff = tgt.posit - src.posit;
        let dist = diff.magnitude();
        if dist <= 0. || dist >= cfg.h {
            continue;
        }

        f_pressure = f_pressure + force_pressure(diff, tgt.pressure, src.pressure, cfg.h);
        f_viscosity = f_viscosity + force_viscosity(tgt.vel, src.vel, cfg.viscosity);
    }

    let f_net = f_pressure + f_viscosity + cfg.gravity();
    f_net * (1. / tgt.density.max(DENSITY_FLOOR))
}

/// Accelerations for all particles. Reads densities and pressures from the preceding density pass.
pub fn compute_accels(particles: &[Particle], grid: &SpatialGrid, cfg: &Config) -> Vec<Vec3> {
    (0..particles.len())
        .map(|i| acc_particle(i, particles, grid, cfg))
        .collect()
}
