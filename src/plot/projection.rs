// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Mollweide projection on a unit sphere, centred on longitude 0.
//!
//! Projected coordinates fill the ellipse (x / 2 sqrt(2))^2 + (y / sqrt(2))^2
//! <= 1, with east to the right and north up.

use std::f64::consts::{FRAC_PI_2, PI, SQRT_2};

/// Half the width of the projected ellipse.
pub(crate) const X_MAX: f64 = 2.0 * SQRT_2;
/// Half the height of the projected ellipse.
pub(crate) const Y_MAX: f64 = SQRT_2;

const MAX_ITERATIONS: usize = 50;
const TOLERANCE: f64 = 1e-12;

/// Project a longitude (in \[-pi, pi\]) and latitude \[radians\] to (x, y).
pub(crate) fn forward(lon_rad: f64, lat_rad: f64) -> (f64, f64) {
    let theta = auxiliary_angle(lat_rad);
    let x = X_MAX / PI * lon_rad * theta.cos();
    let y = SQRT_2 * theta.sin();
    (x, y)
}

/// Take projected (x, y) back to (longitude, latitude) \[radians\], or `None`
/// if the point is outside the ellipse.
pub(crate) fn inverse(x: f64, y: f64) -> Option<(f64, f64)> {
    if (x / X_MAX).powi(2) + (y / Y_MAX).powi(2) > 1.0 {
        return None;
    }

    let theta = (y / SQRT_2).clamp(-1.0, 1.0).asin();
    let lat = ((2.0 * theta + (2.0 * theta).sin()) / PI)
        .clamp(-1.0, 1.0)
        .asin();
    let c_theta = theta.cos();
    let lon = if c_theta.abs() < TOLERANCE {
        0.0
    } else {
        (PI * x / (X_MAX * c_theta)).clamp(-PI, PI)
    };
    Some((lon, lat))
}

/// Solve 2 theta + sin(2 theta) = pi sin(lat) with Newton-Raphson.
fn auxiliary_angle(lat_rad: f64) -> f64 {
    if FRAC_PI_2 - lat_rad.abs() < TOLERANCE {
        return lat_rad.signum() * FRAC_PI_2;
    }

    let target = PI * lat_rad.sin();
    let mut theta = lat_rad;
    for _ in 0..MAX_ITERATIONS {
        let f = 2.0 * theta + (2.0 * theta).sin() - target;
        let f_prime = 2.0 + 2.0 * (2.0 * theta).cos();
        if f_prime.abs() < TOLERANCE {
            break;
        }
        let step = f / f_prime;
        theta -= step;
        if step.abs() < TOLERANCE {
            break;
        }
    }
    theta
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn projection_boundaries() {
        let (x, y) = forward(0.0, 0.0);
        assert_abs_diff_eq!(x, 0.0);
        assert_abs_diff_eq!(y, 0.0);

        let (x, y) = forward(PI, 0.0);
        assert_abs_diff_eq!(x, X_MAX, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-12);

        let (x, y) = forward(-PI, 0.0);
        assert_abs_diff_eq!(x, -X_MAX, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-12);

        let (x, y) = forward(1.0, FRAC_PI_2);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, Y_MAX, epsilon = 1e-12);

        let (_, y) = forward(1.0, -FRAC_PI_2);
        assert_abs_diff_eq!(y, -Y_MAX, epsilon = 1e-12);
    }

    #[test]
    fn inverse_undoes_forward() {
        for &(lon, lat) in &[
            (0.3, 0.2),
            (-2.9, -1.2),
            (3.0, 1.4),
            (-0.01, -0.7),
            (1.7, 0.0),
        ] {
            let (x, y) = forward(lon, lat);
            let (lon2, lat2) = inverse(x, y).unwrap();
            assert_abs_diff_eq!(lon, lon2, epsilon = 1e-9);
            assert_abs_diff_eq!(lat, lat2, epsilon = 1e-9);
        }
    }

    #[test]
    fn outside_the_ellipse() {
        assert!(inverse(X_MAX, Y_MAX).is_none());
        assert!(inverse(0.0, Y_MAX + 1e-6).is_none());
        assert!(inverse(X_MAX * 0.99, 0.0).is_some());
    }
}
