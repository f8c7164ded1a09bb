//! Smoothing kernels. We use the Poly6 kernel for both density estimation and the pressure gradient.
//!
//! W(r, h) = 315 / (64π h⁹) · (h² - r²)³, for 0 ≤ r ≤ h. 0 otherwise.

use std::f64::consts::PI;

use lin_alg::f64::Vec3;

/// Poly6 kernel value at distance `r`. Max at r = 0, and exactly 0 at r = h and beyond.
pub fn kernel_value(r: f64, h: f64) -> f64 {
    if !(0. ..=h).contains(&r) {
        return 0.;
    }

    let diff = h.powi(2) - r.powi(2);
    315. / (64. * PI * h.powi(9)) * diff.powi(3)
}

/// Gradient of the Poly6 kernel with respect to the separation vector `r_vec` (particle minus
/// neighbor). ∇W = -945 / (32π h⁹) · (h² - r²)² · r_vec
///
/// This points from the particle toward the neighbor, since W falls off with distance. It is not
/// itself repulsive: the repulsion comes from the leading `-` in `accel::force_pressure`, which
/// flips it so that positive pressure pushes the pair apart.
pub fn kernel_gradient(r_vec: Vec3, h: f64) -> Vec3 {
    let r_sq = r_vec.x.powi(2) + r_vec.y.powi(2);
    let h_sq = h.powi(2);

    if r_sq >= h_sq {
        return Vec3::new_zero();
    }

    let coeff = -945. / (32. * PI * h.powi(9)) * (h_sq - r_sq).powi(2);
    r_vec * coeff
}
