//! Aggregate properties of the particle set, e.g. for monitoring a run, and plotting them.

use std::error::Error;

use lin_alg::f64::Vec3;
use plotters::{
    element::PathElement,
    prelude::{BitMapBackend, ChartBuilder, Color, IntoDrawingArea, BLACK, BLUE, WHITE},
    series::LineSeries,
};

use crate::{Particle, PARTICLE_MASS};

/// Σ ½ m |v|²
pub fn kinetic_energy(particles: &[Particle]) -> f64 {
    particles
        .iter()
        .map(|p| 0.5 * PARTICLE_MASS * (p.vel.x.powi(2) + p.vel.y.powi(2)))
        .sum()
}

pub fn mean_density(particles: &[Particle]) -> f64 {
    if particles.is_empty() {
        return 0.;
    }
    particles.iter().map(|p| p.density).sum::<f64>() / particles.len() as f64
}

pub fn max_speed(particles: &[Particle]) -> f64 {
    particles
        .iter()
        .map(|p| p.vel.magnitude())
        .fold(0., f64::max)
}

/// Center of mass. All particles have equal mass.
pub fn centroid(particles: &[Particle]) -> Vec3 {
    if particles.is_empty() {
        return Vec3::new_zero();
    }
    let n = particles.len() as f64;
    let (x, y) = particles
        .iter()
        .fold((0., 0.), |(x, y), p| (x + p.posit.x, y + p.posit.y));

    Vec3::new(x / n, y / n, 0.)
}

/// (min, max) over values, widened if degenerate so the chart has a nonzero span.
fn range(vals: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = vals.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    });

    if !(min.is_finite() && max.is_finite()) {
        return (0., 1.);
    }
    if max - min < 1e-12 {
        return (min - 0.5, max + 0.5);
    }
    (min, max)
}

/// Write a 2d line plot of `data` to `{filename}.png`.
pub fn plot(
    data: &[(f64, f64)],
    x_label: &str,
    y_label: &str,
    plot_title: &str,
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    let x_range = range(data.iter().map(|(x, _)| *x));
    let y_range = range(data.iter().map(|(_, y)| *y));

    let fname = format!("{filename}.png");
    let root = BitMapBackend::new(&fname, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(plot_title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()?;

    chart
        .draw_series(LineSeries::new(data.iter().cloned(), BLUE))?
        .label(y_label)
        .legend(|(x, y)| PathElement::new([(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// X: time. Y: kinetic energy.
pub fn plot_kinetic_energy(data: &[(f64, f64)], desc: &str) -> Result<(), Box<dyn Error>> {
    plot(
        data,
        "t",
        "Kinetic energy",
        &format!("Kinetic energy: {desc}"),
        &format!("ke_plot_{desc}"),
    )
}
