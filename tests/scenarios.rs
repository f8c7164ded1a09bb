//! End-to-end scenarios through `State::advance`.

use std::f64::consts::PI;

use lin_alg::f64::Vec3;
use sph_fluid::{
    grid::SpatialGrid, kernel::kernel_value, Config, Particle, ParticleLayout, State, DENSITY_FLOOR,
};

/// Smoothing radius at which the Poly6 self-contribution W(0) is exactly 1.
fn h_unit_self_density() -> f64 {
    (315. / (64. * PI)).cbrt()
}

fn at(x: f64, y: f64) -> Particle {
    Particle::new(Vec3::new(x, y, 0.), Vec3::new_zero())
}

fn distance(state: &State) -> f64 {
    let p = state.particles();
    (p[0].posit - p[1].posit).magnitude()
}

#[test]
fn lone_particle_at_equilibrium() {
    let h = h_unit_self_density();
    let cfg = Config {
        num_particles: 1,
        h,
        rest_density: 1.,
        stiffness: 1.,
        gravity: [0., 0.],
        dt: 0.01,
        bounds_min: [0., 0.],
        bounds_max: [10., 10.],
        ..Default::default()
    };
    assert!((kernel_value(0., h) - 1.).abs() < 1e-12);

    let mut state = State::from_particles(cfg, vec![at(5., 5.)]).unwrap();

    for _ in 0..100 {
        state.advance();

        let p = &state.particles()[0];
        assert!((p.density - 1.).abs() < 1e-12);
        assert!(p.pressure.abs() < 1e-12);
        assert_eq!(p.posit.x, 5.);
        assert_eq!(p.posit.y, 5.);
    }
}

#[test]
fn compressed_pair_separates() {
    let cfg = Config {
        num_particles: 2,
        h: 1.,
        rest_density: 1.,
        stiffness: 1.,
        viscosity: 0.01,
        gravity: [0., 0.],
        dt: 0.01,
        max_vel: 10.,
        bounds_min: [-10., -10.],
        bounds_max: [10., 10.],
        ..Default::default()
    };
    let mut state = State::from_particles(cfg, vec![at(0., 0.), at(0.5, 0.)]).unwrap();

    let mut prev = distance(&state);
    for _ in 0..10 {
        state.advance();
        let dist = distance(&state);
        assert!(dist > prev, "{dist} <= {prev}");
        prev = dist;
    }

    // Pushed apart along x only.
    assert!(state.particles()[0].posit.x < 0.);
    assert!(state.particles()[1].posit.x > 0.5);
    assert_eq!(state.particles()[0].posit.y, 0.);
}

#[test]
fn neighbor_query_finds_close_pair() {
    let h = 1.;
    let particles = vec![at(0.9, 0.5), at(1.3, 0.5)];
    let grid = SpatialGrid::rebuild(&particles, h);

    let n0: Vec<usize> = grid.neighbors_of(grid.cell_of(particles[0].posit)).collect();
    let n1: Vec<usize> = grid.neighbors_of(grid.cell_of(particles[1].posit)).collect();
    assert!(n0.contains(&1));
    assert!(n1.contains(&0));
}

#[test]
fn neighbor_query_skips_distant_pair() {
    let h = 1.;
    // 2.1h apart, in cells 0 and 2.
    let particles = vec![at(0.5, 0.5), at(2.6, 0.5)];
    let grid = SpatialGrid::rebuild(&particles, h);

    let n0: Vec<usize> = grid.neighbors_of(grid.cell_of(particles[0].posit)).collect();
    let n1: Vec<usize> = grid.neighbors_of(grid.cell_of(particles[1].posit)).collect();
    assert_eq!(n0, vec![0]);
    assert_eq!(n1, vec![1]);
}

#[test]
fn long_run_stays_bounded() {
    let cfg = Config {
        num_particles: 200,
        seed: Some(42),
        ..Config::unit_square()
    };
    let (min, max, v_max) = (cfg.bounds_min, cfg.bounds_max, cfg.max_vel);
    let mut state = State::new(cfg).unwrap();

    for _ in 0..300 {
        state.advance();

        for p in state.particles() {
            assert!(p.density >= DENSITY_FLOOR);
            assert!(p.vel.x.abs() <= v_max && p.vel.y.abs() <= v_max);
            assert!(p.posit.x >= min[0] && p.posit.x <= max[0]);
            assert!(p.posit.y >= min[1] && p.posit.y <= max[1]);
        }
    }
    assert!(state.check_stability().is_ok());
}

#[test]
fn pixel_space_run_stays_bounded() {
    let cfg = Config {
        seed: Some(9),
        ..Config::pixel_space()
    };
    let mut state = State::new(cfg).unwrap();

    for _ in 0..500 {
        state.advance();
    }

    assert!(state.check_stability().is_ok());
    for (x, y) in state.positions_view() {
        assert!((0. ..=800.).contains(&x));
        assert!((0. ..=600.).contains(&y));
    }
    for (r, g, b) in state.colors_view() {
        for c in [r, g, b] {
            assert!((0. ..=1.).contains(&c));
        }
    }
}

#[test]
fn dam_break_stays_in_domain() {
    let cfg = Config {
        num_particles: 100,
        layout: ParticleLayout::Block,
        ..Config::unit_square()
    };
    let mut state = State::new(cfg).unwrap();

    for _ in 0..200 {
        state.advance();
    }

    assert!(state.check_stability().is_ok());
    for (_, y) in state.positions_view() {
        assert!((0. ..=5.).contains(&y));
    }
}

#[test]
fn seeded_runs_are_deterministic() {
    let cfg = Config {
        num_particles: 100,
        seed: Some(1234),
        ..Default::default()
    };
    let mut a = State::new(cfg.clone()).unwrap();
    let mut b = State::new(cfg).unwrap();

    for _ in 0..50 {
        a.advance();
        b.advance();
    }

    for (pa, pb) in a.positions_view().zip(b.positions_view()) {
        assert_eq!(pa, pb);
    }
}

#[test]
fn tiny_smoothing_radius_far_from_origin() {
    // Cell indices here are far beyond the i32 range.
    let cfg = Config {
        num_particles: 2,
        h: 1e-10,
        bounds_min: [0., 0.],
        bounds_max: [5., 5.],
        ..Default::default()
    };
    let mut state = State::from_particles(cfg, vec![at(4., 4.), at(4.5, 1.)]).unwrap();

    for _ in 0..10 {
        state.advance();
    }

    assert!(state.check_stability().is_ok());
    for p in state.particles() {
        assert!(p.density >= DENSITY_FLOOR);
    }
}
