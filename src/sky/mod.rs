// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sky grids and the sensitivity maps evaluated on them.

mod error;
#[cfg(test)]
mod tests;

pub use error::SkyMapError;

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use hifitime::Epoch;
use log::{debug, trace};
use ndarray::{parallel::prelude::*, prelude::*, Zip};

use crate::{
    constants::{DEFAULT_NUM_LATITUDES, DEFAULT_NUM_LONGITUDES, DEFAULT_POLARISATION_ANGLE},
    detector::Detector,
    types::Axis,
};

/// A regular longitude-latitude grid covering the whole sphere. Longitudes run
/// over \[0, 360\] degrees and latitudes over \[-90, 90\] degrees; both
/// endpoints are included on each axis, so the first and last longitude
/// columns describe the same meridian.
#[derive(Debug, Clone)]
pub struct SkyGrid {
    lon_deg: Array1<f64>,
    lat_deg: Array1<f64>,
    lon_rad: Array1<f64>,
    lat_rad: Array1<f64>,
}

impl Default for SkyGrid {
    fn default() -> Self {
        SkyGrid::build(DEFAULT_NUM_LONGITUDES, DEFAULT_NUM_LATITUDES)
    }
}

impl SkyGrid {
    /// Create a new [`SkyGrid`]. Each axis needs at least 2 samples.
    pub fn new(num_longitudes: usize, num_latitudes: usize) -> Result<SkyGrid, SkyMapError> {
        if num_longitudes < 2 {
            return Err(SkyMapError::TooFewSamples {
                axis: Axis::Longitude,
                got: num_longitudes,
            });
        }
        if num_latitudes < 2 {
            return Err(SkyMapError::TooFewSamples {
                axis: Axis::Latitude,
                got: num_latitudes,
            });
        }
        Ok(SkyGrid::build(num_longitudes, num_latitudes))
    }

    fn build(num_longitudes: usize, num_latitudes: usize) -> SkyGrid {
        let lon_deg = Array1::linspace(0.0, 360.0, num_longitudes);
        let lat_deg = Array1::linspace(-90.0, 90.0, num_latitudes);
        SkyGrid {
            lon_rad: lon_deg.mapv(f64::to_radians),
            lat_rad: lat_deg.mapv(f64::to_radians),
            lon_deg,
            lat_deg,
        }
    }

    pub fn longitudes_deg(&self) -> ArrayView1<f64> {
        self.lon_deg.view()
    }

    pub fn latitudes_deg(&self) -> ArrayView1<f64> {
        self.lat_deg.view()
    }

    pub fn longitudes_rad(&self) -> ArrayView1<f64> {
        self.lon_rad.view()
    }

    pub fn latitudes_rad(&self) -> ArrayView1<f64> {
        self.lat_rad.view()
    }

    /// The shape of fields on this grid: (number of latitudes, number of
    /// longitudes).
    pub fn dim(&self) -> (usize, usize) {
        (self.lat_rad.len(), self.lon_rad.len())
    }

    /// The 2D longitude and latitude meshes \[radians\]. Rows are latitudes,
    /// columns are longitudes.
    pub fn mesh(&self) -> (Array2<f64>, Array2<f64>) {
        let lon2d = Array2::from_shape_fn(self.dim(), |(_, j)| self.lon_rad[j]);
        let lat2d = Array2::from_shape_fn(self.dim(), |(i, _)| self.lat_rad[i]);
        (lon2d, lat2d)
    }

    /// Get the (row, column) of the grid point closest to a position.
    /// Longitudes are wrapped into \[0, 2pi\) first.
    pub fn nearest_index(&self, lon_rad: f64, lat_rad: f64) -> (usize, usize) {
        let (num_lat, num_lon) = self.dim();
        let lon_step = TAU / (num_lon - 1) as f64;
        let lat_step = PI / (num_lat - 1) as f64;

        let lon = lon_rad.rem_euclid(TAU);
        let lat = lat_rad.clamp(-FRAC_PI_2, FRAC_PI_2);
        let j = ((lon / lon_step).round() as usize).min(num_lon - 1);
        let i = (((lat + FRAC_PI_2) / lat_step).round() as usize).min(num_lat - 1);
        (i, j)
    }
}

/// The right ascension \[radians\] of every grid point at an epoch: the
/// detector's sidereal time estimate added to each mesh longitude.
pub fn right_ascensions(detector: &Detector, grid: &SkyGrid, epoch: Epoch) -> Array2<f64> {
    let gmst = detector.gmst_estimate(epoch);
    debug!("GMST at {epoch}: {:.6} deg", gmst.to_degrees());
    let (lon2d, _) = grid.mesh();
    lon2d + gmst
}

/// Plus and cross responses of a detector over a grid.
#[derive(Debug, Clone)]
pub struct ResponseMaps {
    pub plus: Array2<f64>,
    pub cross: Array2<f64>,
}

impl ResponseMaps {
    /// Evaluate the antenna pattern at every (right ascension, declination)
    /// pair of the supplied fields. Each cell is independent, so the work is
    /// spread over the rayon thread pool.
    pub fn new(
        detector: &Detector,
        ra: ArrayView2<f64>,
        dec: ArrayView2<f64>,
        polarisation_rad: f64,
        epoch: Epoch,
    ) -> Result<ResponseMaps, SkyMapError> {
        if ra.dim() != dec.dim() {
            return Err(SkyMapError::ShapeMismatch {
                ra: ra.dim(),
                dec: dec.dim(),
            });
        }

        let gmst = detector.gmst_estimate(epoch);
        let mut plus = Array2::zeros(ra.dim());
        let mut cross = Array2::zeros(ra.dim());
        Zip::from(&mut plus)
            .and(&mut cross)
            .and(ra)
            .and(dec)
            .par_for_each(|plus, cross, &ra, &dec| {
                let r = detector.antenna_pattern_inner(ra, dec, polarisation_rad, gmst);
                *plus = r.plus;
                *cross = r.cross;
            });
        trace!("Evaluated {} antenna patterns", ra.len());

        Ok(ResponseMaps { plus, cross })
    }

    /// The combined sensitivity sqrt(F+^2 + Fx^2) of every cell.
    pub fn magnitude(&self) -> Array2<f64> {
        magnitude(self.plus.view(), self.cross.view())
    }
}

/// Elementwise sqrt(plus^2 + cross^2). The fields must have the same shape.
pub fn magnitude(plus: ArrayView2<f64>, cross: ArrayView2<f64>) -> Array2<f64> {
    Zip::from(plus)
        .and(cross)
        .map_collect(|&p, &c| (p * p + c * c).sqrt())
}

/// A detector's sensitivity evaluated over a sky grid.
#[derive(Debug, Clone)]
pub struct SensitivityMap {
    detector: Detector,
    epoch: Epoch,
    grid: SkyGrid,
    responses: ResponseMaps,
    magnitude: Array2<f64>,
}

impl SensitivityMap {
    /// Evaluate `detector` over `grid`. The epoch sets the sidereal rotation
    /// used to turn grid longitudes into right ascensions; because the same
    /// rotation is removed again inside the pattern evaluation, the map is in
    /// Earth-fixed longitude and doesn't change with the epoch.
    pub fn new(
        detector: Detector,
        grid: SkyGrid,
        epoch: Epoch,
    ) -> Result<SensitivityMap, SkyMapError> {
        let (num_lat, num_lon) = grid.dim();
        debug!("Evaluating {} over a {num_lon} x {num_lat} grid", detector.name());

        let ra = right_ascensions(&detector, &grid, epoch);
        let (_, lat2d) = grid.mesh();
        let responses = ResponseMaps::new(
            &detector,
            ra.view(),
            lat2d.view(),
            DEFAULT_POLARISATION_ANGLE,
            epoch,
        )?;
        let magnitude = responses.magnitude();

        Ok(SensitivityMap {
            detector,
            epoch,
            grid,
            responses,
            magnitude,
        })
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn grid(&self) -> &SkyGrid {
        &self.grid
    }

    pub fn plus(&self) -> ArrayView2<f64> {
        self.responses.plus.view()
    }

    pub fn cross(&self) -> ArrayView2<f64> {
        self.responses.cross.view()
    }

    /// sqrt(F+^2 + Fx^2) for every grid cell; shape (latitudes, longitudes).
    pub fn magnitude(&self) -> ArrayView2<f64> {
        self.magnitude.view()
    }

    /// The largest sensitivity on the grid, with its longitude and latitude
    /// \[radians\]. NaNs are ignored.
    pub fn peak(&self) -> (f64, f64, f64) {
        let mut best = (f64::NEG_INFINITY, 0, 0);
        for ((i, j), &v) in self.magnitude.indexed_iter() {
            if v > best.0 {
                best = (v, i, j);
            }
        }
        let (v, i, j) = best;
        (v, self.grid.lon_rad[j], self.grid.lat_rad[i])
    }

    /// The sensitivity at the grid point nearest to a position.
    pub fn value_nearest(&self, lon_rad: f64, lat_rad: f64) -> f64 {
        self.magnitude[self.grid.nearest_index(lon_rad, lat_rad)]
    }
}
