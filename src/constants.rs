// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.
 */

/// The number of longitude samples in the default sky grid. Both 0 and 360
/// degrees are included.
pub const DEFAULT_NUM_LONGITUDES: usize = 120;
/// The number of latitude samples in the default sky grid. Both poles are
/// included.
pub const DEFAULT_NUM_LATITUDES: usize = 60;

/// The reference GPS time \[seconds\] used to evaluate antenna patterns. The
/// sensitivity map doesn't depend on this value; it only sets the sidereal
/// rotation that is added to the grid longitudes and then removed again inside
/// the pattern evaluation.
pub const REFERENCE_GPS_SECONDS: f64 = 1736267618.0;

/// The default polarisation angle \[radians\]. The combined sensitivity is
/// independent of it.
pub const DEFAULT_POLARISATION_ANGLE: f64 = 0.0;

/// The number of filled-contour bands drawn by default.
pub const DEFAULT_NUM_LEVELS: usize = 50;

