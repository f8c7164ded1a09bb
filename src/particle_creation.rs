//! Initial particle distributions.

use lin_alg::f64::Vec3;
use rand::Rng;

use crate::{Config, Particle, ParticleLayout};

pub fn make_particles<R: Rng>(cfg: &Config, rng: &mut R) -> Vec<Particle> {
    match cfg.layout {
        ParticleLayout::Random => make_particles_random(cfg, rng),
        ParticleLayout::Block => make_particles_block(cfg),
    }
}

/// Uniform random positions over the whole domain, and uniform random velocity per axis.
pub fn make_particles_random<R: Rng>(cfg: &Config, rng: &mut R) -> Vec<Particle> {
    let mut result = Vec::with_capacity(cfg.num_particles);

    for _ in 0..cfg.num_particles {
        let posit = Vec3::new(
            rng.random_range(cfg.bounds_min[0]..=cfg.bounds_max[0]),
            rng.random_range(cfg.bounds_min[1]..=cfg.bounds_max[1]),
            0.,
        );
        let vel = Vec3::new(
            rng.random_range(-cfg.init_vel..=cfg.init_vel),
            rng.random_range(-cfg.init_vel..=cfg.init_vel),
            0.,
        );

        result.push(Particle::new(posit, vel));
    }

    result
}

/// A block of fluid at rest, packed from the lower-left corner at half the smoothing radius.
/// Rows wrap at the right wall. If the domain fills, the rest pile up along the top wall.
pub fn make_particles_block(cfg: &Config) -> Vec<Particle> {
    let mut result = Vec::with_capacity(cfg.num_particles);

    let spacing = cfg.h / 2.;
    let width = cfg.bounds_max[0] - cfg.bounds_min[0];
    let per_row = ((width / spacing).floor() as usize).max(1);

    for i in 0..cfg.num_particles {
        let col = i % per_row;
        let row = i / per_row;

        let x = cfg.bounds_min[0] + spacing * (col as f64 + 0.5);
        let y = cfg.bounds_min[1] + spacing * (row as f64 + 0.5);

        let posit = Vec3::new(
            x.min(cfg.bounds_max[0]),
            y.min(cfg.bounds_max[1]),
            0.,
        );
        result.push(Particle::new(posit, Vec3::new_zero()));
    }

    result
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn random_is_seeded() {
        let cfg = Config {
            num_particles: 30,
            ..Default::default()
        };
        let a = make_particles_random(&cfg, &mut StdRng::seed_from_u64(3));
        let b = make_particles_random(&cfg, &mut StdRng::seed_from_u64(3));

        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.posit.x, pb.posit.x);
            assert_eq!(pa.posit.y, pb.posit.y);
            assert_eq!(pa.vel.x, pb.vel.x);
        }
    }

    #[test]
    fn zero_init_vel() {
        let cfg = Config {
            num_particles: 10,
            init_vel: 0.,
            ..Default::default()
        };
        for p in make_particles_random(&cfg, &mut StdRng::seed_from_u64(0)) {
            assert_eq!(p.vel.x, 0.);
            assert_eq!(p.vel.y, 0.);
        }
    }

    #[test]
    fn block_lattice() {
        let cfg = Config {
            num_particles: 25,
            h: 1.,
            bounds_min: [0., 0.],
            bounds_max: [2., 10.],
            layout: ParticleLayout::Block,
            ..Default::default()
        };
        let particles = make_particles_block(&cfg);

        assert_eq!(particles.len(), 25);
        // 4 per row at spacing 0.5.
        assert!((particles[0].posit.x - 0.25).abs() < 1e-12);
        assert!((particles[3].posit.x - 1.75).abs() < 1e-12);
        assert!((particles[4].posit.x - 0.25).abs() < 1e-12);
        assert!((particles[4].posit.y - 0.75).abs() < 1e-12);

        for p in &particles {
            assert!(p.posit.x <= 2. && p.posit.y <= 10.);
            assert_eq!(p.vel.x, 0.);
        }
    }
}
