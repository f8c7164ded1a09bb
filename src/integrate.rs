use lin_alg::f64::Vec3;

use crate::{Config, Particle};

/// Semi-implicit Euler, with velocity clamping and damped reflection off the domain walls.
/// The wall check uses the predicted position, so reflection happens before a particle can leave.
pub fn integrate_particle(particle: &mut Particle, accel: Vec3, cfg: &Config) {
    particle.accel = accel;

    let vel = particle.vel + accel * cfg.dt;
    let mut vel = [
        vel.x.clamp(-cfg.max_vel, cfg.max_vel),
        vel.y.clamp(-cfg.max_vel, cfg.max_vel),
    ];
    let mut posit = [particle.posit.x, particle.posit.y];

    for dim in 0..2 {
        let next = posit[dim] + vel[dim] * cfg.dt;
        if next < cfg.bounds_min[dim] || next > cfg.bounds_max[dim] {
            vel[dim] = -vel[dim] * cfg.boundary_damping;
        }

        // The clamp only matters if the reflected move would reach past the opposite wall.
        posit[dim] = (posit[dim] + vel[dim] * cfg.dt).clamp(cfg.bounds_min[dim], cfg.bounds_max[dim]);
    }

    particle.vel = Vec3::new(vel[0], vel[1], 0.);
    particle.posit = Vec3::new(posit[0], posit[1], 0.);
}

/// Apply one step to all particles. `accels` is indexed the same as `particles`.
pub fn step(particles: &mut [Particle], accels: &[Vec3], cfg: &Config) {
    for (particle, accel) in particles.iter_mut().zip(accels) {
        integrate_particle(particle, *accel, cfg);
    }
}
