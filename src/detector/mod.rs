// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code for gravitational-wave interferometer geometry and antenna patterns.

mod error;
mod sites;

pub use error::DetectorError;
pub use sites::DetectorSite;

use std::{f64::consts::TAU, str::FromStr};

use hifitime::{Duration, Epoch};
use log::trace;
use marlu::{precession::get_lmst, RADec};
use rayon::prelude::*;
use strum::IntoEnumIterator;

use crate::{direction::SkyCoord, types::AntennaResponse};
use sites::{arm_unit_vector, response_tensor};

/// Get the Greenwich mean sidereal time \[radians, in \[0, 2pi)\] at an epoch.
/// UT1 is taken to be UTC; that's plenty for an estimate.
pub fn gmst(epoch: Epoch) -> f64 {
    get_lmst(0.0, epoch, Duration::ZERO).rem_euclid(TAU)
}

/// An L-shaped interferometer, ready to calculate antenna patterns.
#[derive(Debug, Clone)]
pub struct Detector {
    site: DetectorSite,

    /// Geodetic latitude of the vertex \[radians\].
    latitude_rad: f64,

    /// Longitude of the vertex \[radians\], east positive.
    longitude_rad: f64,

    /// The response tensor in Earth-centred, Earth-fixed coordinates.
    response: [[f64; 3]; 3],
}

impl Detector {
    /// Look up a detector by its code (e.g. "H1"; case doesn't matter).
    ///
    /// # Examples
    ///
    /// ```
    /// use gw_antenna::detector::Detector;
    ///
    /// let detector = Detector::new("V1").unwrap();
    /// assert_eq!(detector.name(), "V1");
    /// assert!(Detector::new("XX").is_err());
    /// ```
    pub fn new(name: &str) -> Result<Detector, DetectorError> {
        let site = DetectorSite::from_str(name).map_err(|_| DetectorError::UnknownDetector {
            name: name.to_string(),
            available: Detector::available()
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })?;
        Ok(Detector::from_site(site))
    }

    /// Create a [`Detector`] for a known site.
    pub fn from_site(site: DetectorSite) -> Detector {
        let g = site.geometry();
        let u = arm_unit_vector(
            g.latitude_rad,
            g.longitude_rad,
            g.x_arm_azimuth_rad,
            g.x_arm_altitude_rad,
        );
        let v = arm_unit_vector(
            g.latitude_rad,
            g.longitude_rad,
            g.y_arm_azimuth_rad,
            g.y_arm_altitude_rad,
        );
        trace!("{} arms: x {u:?}, y {v:?}", g.full_name);

        Detector {
            site,
            latitude_rad: g.latitude_rad,
            longitude_rad: g.longitude_rad,
            response: response_tensor(u, v),
        }
    }

    /// All of the detectors that can be looked up by name.
    pub fn available() -> Vec<DetectorSite> {
        DetectorSite::iter().collect()
    }

    /// The two-character code of this detector.
    pub fn name(&self) -> &'static str {
        self.site.into()
    }

    /// The descriptive name of this detector, e.g. "LIGO Hanford".
    pub fn full_name(&self) -> &'static str {
        self.site.geometry().full_name
    }

    pub fn site(&self) -> DetectorSite {
        self.site
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_rad
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_rad
    }

    pub fn response_tensor(&self) -> &[[f64; 3]; 3] {
        &self.response
    }

    /// Estimate the Greenwich mean sidereal time \[radians\] at an epoch. Every
    /// antenna-pattern calculation in this crate takes its sidereal rotation
    /// from here, so sky positions made by adding this to an Earth-fixed
    /// longitude map back onto that exact longitude.
    pub fn gmst_estimate(&self, epoch: Epoch) -> f64 {
        gmst(epoch)
    }

    /// The sky position directly above the detector at the given epoch. The
    /// combined sensitivity is greatest here.
    pub fn optimal_orientation(&self, epoch: Epoch) -> RADec {
        RADec {
            ra: (self.gmst_estimate(epoch) + self.longitude_rad).rem_euclid(TAU),
            dec: self.latitude_rad,
        }
    }

    /// Calculate the plus and cross responses of this detector to a
    /// gravitational wave arriving from a direction at an epoch.
    /// `polarisation_rad` is the polarisation angle.
    ///
    /// # Examples
    ///
    /// ```
    /// use gw_antenna::{detector::Detector, Epoch, RADec};
    ///
    /// let detector = Detector::new("H1").unwrap();
    /// let epoch = Epoch::from_gpst_seconds(1736267618.0);
    /// let response = detector.antenna_pattern(RADec { ra: 0.4, dec: 0.7 }, 0.0, epoch);
    ///
    /// // Floats can be used too.
    /// let response2 = detector.antenna_pattern((0.4, 0.7), 0.0, epoch);
    /// assert_eq!(response, response2);
    /// ```
    pub fn antenna_pattern<C: SkyCoord>(
        &self,
        direction: C,
        polarisation_rad: f64,
        epoch: Epoch,
    ) -> AntennaResponse {
        let gmst = self.gmst_estimate(epoch);
        self.antenna_pattern_inner(
            direction.get_ra(),
            direction.get_dec(),
            polarisation_rad,
            gmst,
        )
    }

    /// Calculate antenna patterns for many directions at an epoch. This is
    /// basically a wrapper around `antenna_pattern` that calculates the
    /// responses in parallel. The number of parallel threads used can be
    /// controlled by setting `RAYON_NUM_THREADS`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gw_antenna::{detector::Detector, Epoch, RADec};
    ///
    /// let detector = Detector::new("L1").unwrap();
    /// let epoch = Epoch::from_gpst_seconds(1736267618.0);
    /// let directions = vec![RADec { ra: 0.4, dec: 0.7 }, RADec { ra: 0.5, dec: -0.8 }];
    /// let results = detector.antenna_pattern_array(&directions, 0.0, epoch);
    ///
    /// // Floats can be used, but these need to be grouped by RA and Dec.
    /// let ras = vec![0.4, 0.5];
    /// let decs = vec![0.7, -0.8];
    /// let results2 = detector.antenna_pattern_array((&ras, &decs), 0.0, epoch);
    /// assert_eq!(results, results2);
    /// ```
    pub fn antenna_pattern_array<C, I, I2>(
        &self,
        directions: I,
        polarisation_rad: f64,
        epoch: Epoch,
    ) -> Vec<AntennaResponse>
    where
        C: SkyCoord,
        I: IntoParallelIterator<Iter = I2>,
        I2: IndexedParallelIterator<Item = C>,
    {
        let gmst = self.gmst_estimate(epoch);
        directions
            .into_par_iter()
            .map(|dir| {
                self.antenna_pattern_inner(dir.get_ra(), dir.get_dec(), polarisation_rad, gmst)
            })
            .collect()
    }

    /// Calculate antenna patterns for many directions at an epoch. This is the
    /// same as `antenna_pattern_array` but uses pre-allocated memory. `results`
    /// should have a length equal to or greater than `directions`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gw_antenna::{detector::Detector, AntennaResponse, Epoch, RADec};
    ///
    /// let detector = Detector::new("K1").unwrap();
    /// let epoch = Epoch::from_gpst_seconds(1736267618.0);
    /// let directions = vec![RADec { ra: 0.4, dec: 0.7 }, RADec { ra: 0.5, dec: -0.8 }];
    /// let mut results = vec![AntennaResponse::default(); directions.len()];
    /// detector.antenna_pattern_array_inner(&directions, 0.0, epoch, &mut results).unwrap();
    /// assert_ne!(results[0].plus, 0.0);
    ///
    /// let mut too_short = vec![AntennaResponse::default(); 1];
    /// assert!(detector.antenna_pattern_array_inner(&directions, 0.0, epoch, &mut too_short).is_err());
    /// ```
    pub fn antenna_pattern_array_inner<C, I, I2>(
        &self,
        directions: I,
        polarisation_rad: f64,
        epoch: Epoch,
        results: &mut [AntennaResponse],
    ) -> Result<(), DetectorError>
    where
        C: SkyCoord,
        I: IntoParallelIterator<Iter = I2>,
        I2: IndexedParallelIterator<Item = C>,
    {
        let directions = directions.into_par_iter();
        if results.len() < directions.len() {
            return Err(DetectorError::ResultsTooShort {
                got: results.len(),
                expected: directions.len(),
            });
        }

        let gmst = self.gmst_estimate(epoch);
        directions
            .zip(results.par_iter_mut())
            .for_each(|(dir, result)| {
                *result =
                    self.antenna_pattern_inner(dir.get_ra(), dir.get_dec(), polarisation_rad, gmst);
            });
        Ok(())
    }

    /// Helper function. The sidereal time has already been worked out, so this
    /// is pure geometry: project the response tensor onto the polarisation
    /// basis of a wave arriving from (ra, dec).
    pub(crate) fn antenna_pattern_inner(
        &self,
        ra_rad: f64,
        dec_rad: f64,
        polarisation_rad: f64,
        gmst_rad: f64,
    ) -> AntennaResponse {
        let gha = gmst_rad - ra_rad;
        let (s_gha, c_gha) = gha.sin_cos();
        let (s_dec, c_dec) = dec_rad.sin_cos();
        let (s_psi, c_psi) = polarisation_rad.sin_cos();

        let x = [
            -c_psi * s_gha - s_psi * c_gha * s_dec,
            -c_psi * c_gha + s_psi * s_gha * s_dec,
            s_psi * c_dec,
        ];
        let y = [
            s_psi * s_gha - c_psi * c_gha * s_dec,
            s_psi * c_gha + c_psi * s_gha * s_dec,
            c_psi * c_dec,
        ];

        let dx = mat_vec(&self.response, &x);
        let dy = mat_vec(&self.response, &y);

        AntennaResponse {
            plus: dot(&x, &dx) - dot(&y, &dy),
            cross: dot(&x, &dy) + dot(&y, &dx),
        }
    }
}

fn mat_vec(m: &[[f64; 3]; 3], v: &[f64; 3]) -> [f64; 3] {
    [dot(&m[0], v), dot(&m[1], v), dot(&m[2], v)]
}

fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}
