// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use marlu::RADec;

/// A trait that describes a coordinate pair in the equatorial coordinate
/// system. Antenna patterns are evaluated at a (right ascension, declination)
/// and a time; the time supplies the sidereal rotation that takes the sky
/// position into the Earth-fixed frame of a detector.
pub trait SkyCoord: Copy {
    /// Get the right ascension of this coordinate \[radians\].
    fn get_ra(&self) -> f64;
    /// Get the declination of this coordinate \[radians\].
    fn get_dec(&self) -> f64;
}

impl<C: SkyCoord> SkyCoord for &C {
    fn get_ra(&self) -> f64 {
        (*self).get_ra()
    }

    fn get_dec(&self) -> f64 {
        (*self).get_dec()
    }
}

impl SkyCoord for RADec {
    fn get_ra(&self) -> f64 {
        self.ra
    }

    fn get_dec(&self) -> f64 {
        self.dec
    }
}

/// We assume that a tuple of floats is (right ascension, declination), both
/// in radians.
impl SkyCoord for (f64, f64) {
    fn get_ra(&self) -> f64 {
        self.0
    }

    fn get_dec(&self) -> f64 {
        self.1
    }
}

impl SkyCoord for (&f64, &f64) {
    fn get_ra(&self) -> f64 {
        *self.0
    }

    fn get_dec(&self) -> f64 {
        *self.1
    }
}
