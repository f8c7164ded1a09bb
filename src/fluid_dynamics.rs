//! Density and pressure estimation. The first pass of each step.

use crate::{grid::SpatialGrid, kernel::kernel_value, Config, Particle, DENSITY_FLOOR, PARTICLE_MASS};

/// Linear equation of state. Negative below rest density.
pub fn pressure_from_density(density: f64, cfg: &Config) -> f64 {
    cfg.stiffness * (density - cfg.rest_density)
}

/// Density at a single particle: the kernel-weighted sum over grid neighbors within `h`. This
/// includes the particle itself, contributing W(0).
pub fn density_at(id: usize, particles: &[Particle], grid: &SpatialGrid, h: f64) -> f64 {
    let posit = particles[id].posit;
    let mut result = 0.;

    for j in grid.neighbors_of(grid.cell_of(posit)) {
        let dist = (posit - particles[j].posit).magnitude();
        if dist < h {
            result += PARTICLE_MASS * kernel_value(dist, h);
        }
    }

    result.max(DENSITY_FLOOR)
}

/// Update density and pressure on all particles, in place. `grid` must have been built from the
/// current positions.
pub fn compute_density_pressure(particles: &mut [Particle], grid: &SpatialGrid, cfg: &Config) {
    // Compute all densities before writing any, so reads see a consistent snapshot.
    let snapshot: &[Particle] = particles;
    let densities: Vec<f64> = (0..snapshot.len())
        .map(|i| density_at(i, snapshot, grid, cfg.h))
        .collect();

    for (particle, density) in particles.iter_mut().zip(densities) {
        particle.density = density;
        particle.pressure = pressure_from_density(density, cfg);
    }
}
