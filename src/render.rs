//! Data handed to the renderer each frame. Colors have no physical role; they're derived from speed.

use crate::{Color, Particle};

/// Map speed onto a four-band ramp. `speed_cap` and above saturate the top band.
pub fn speed_color(speed: f64, speed_cap: f64) -> Color {
    let s = (speed / speed_cap).min(1.);

    if s < 0.25 {
        let t = s / 0.25;
        ((1. - t) * 0., t * 1., 1.)
    } else if s < 0.5 {
        let t = (s - 0.25) / 0.25;
        (0., 1., (1. - t) * 1.)
    } else if s < 0.75 {
        let t = (s - 0.5) / 0.25;
        (t * 1., (1. - t) * 1., 0.)
    } else {
        let t = (s - 0.75) / 0.25;
        (1., t * 1., 0.)
    }
}

pub fn update_colors(particles: &mut [Particle], speed_cap: f64) {
    for particle in particles {
        particle.color = speed_color(particle.vel.magnitude(), speed_cap);
    }
}
