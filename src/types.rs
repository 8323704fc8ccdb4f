// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Generic types.

/// The response of a detector to the plus and cross polarisations of a
/// gravitational wave from a single direction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AntennaResponse {
    /// F+, in \[-1, 1\].
    pub plus: f64,
    /// Fx, in \[-1, 1\].
    pub cross: f64,
}

impl AntennaResponse {
    /// The combined sensitivity, sqrt(F+^2 + Fx^2). This doesn't depend on the
    /// polarisation angle.
    pub fn magnitude(&self) -> f64 {
        self.plus.hypot(self.cross)
    }
}

/// An axis of a sky grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Longitude,
    Latitude,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Axis::Longitude => "longitude",
                Axis::Latitude => "latitude",
            }
        )
    }
}
