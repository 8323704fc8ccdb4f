// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Interferometer sites and their geometry.
//!
//! Vertex positions are geodetic (WGS84). Arm azimuths are measured clockwise
//! from North, arm altitudes upwards from the local horizontal. The numbers
//! are those published with the LIGO Algorithm Library detector tables.

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The gravitational-wave interferometers that we know the geometry of. The
/// string forms are the usual two-character codes, e.g. "H1".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum DetectorSite {
    /// LIGO Hanford, 4 km.
    #[strum(serialize = "H1")]
    LigoHanford,

    /// LIGO Livingston, 4 km.
    #[strum(serialize = "L1")]
    LigoLivingston,

    /// Virgo, 3 km.
    #[strum(serialize = "V1")]
    Virgo,

    /// GEO600.
    #[strum(serialize = "G1")]
    Geo600,

    /// KAGRA, 3 km.
    #[strum(serialize = "K1")]
    Kagra,

    /// TAMA300.
    #[strum(serialize = "T1")]
    Tama300,
}

/// The geometry of an L-shaped interferometer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SiteGeometry {
    pub(crate) full_name: &'static str,
    pub(crate) latitude_rad: f64,
    pub(crate) longitude_rad: f64,
    pub(crate) x_arm_azimuth_rad: f64,
    pub(crate) y_arm_azimuth_rad: f64,
    pub(crate) x_arm_altitude_rad: f64,
    pub(crate) y_arm_altitude_rad: f64,
}

impl DetectorSite {
    pub(crate) fn geometry(self) -> SiteGeometry {
        match self {
            DetectorSite::LigoHanford => SiteGeometry {
                full_name: "LIGO Hanford",
                latitude_rad: 0.81079526383,
                longitude_rad: -2.08405676917,
                x_arm_azimuth_rad: 5.65487724844,
                y_arm_azimuth_rad: 4.08408092164,
                x_arm_altitude_rad: -6.195e-4,
                y_arm_altitude_rad: 1.25e-5,
            },

            DetectorSite::LigoLivingston => SiteGeometry {
                full_name: "LIGO Livingston",
                latitude_rad: 0.53342313506,
                longitude_rad: -1.58430937078,
                x_arm_azimuth_rad: 4.40317772346,
                y_arm_azimuth_rad: 2.83238139666,
                x_arm_altitude_rad: -3.121e-4,
                y_arm_altitude_rad: -6.107e-4,
            },

            DetectorSite::Virgo => SiteGeometry {
                full_name: "Virgo",
                latitude_rad: 0.76151183984,
                longitude_rad: 0.18333805213,
                x_arm_azimuth_rad: 0.33916285222,
                y_arm_azimuth_rad: 5.05155183261,
                x_arm_altitude_rad: 0.0,
                y_arm_altitude_rad: 0.0,
            },

            DetectorSite::Geo600 => SiteGeometry {
                full_name: "GEO600",
                latitude_rad: 0.91184982752,
                longitude_rad: 0.17116780435,
                x_arm_azimuth_rad: 1.19360100484,
                y_arm_azimuth_rad: 5.83039279401,
                x_arm_altitude_rad: 0.0,
                y_arm_altitude_rad: 0.0,
            },

            DetectorSite::Kagra => SiteGeometry {
                full_name: "KAGRA",
                latitude_rad: 0.6355068497,
                longitude_rad: 2.396441015,
                x_arm_azimuth_rad: 1.054113,
                // Negative, as published; it is only ever used through sin/cos.
                y_arm_azimuth_rad: -0.5166798,
                x_arm_altitude_rad: 0.0031414,
                y_arm_altitude_rad: -0.0036270,
            },

            DetectorSite::Tama300 => SiteGeometry {
                full_name: "TAMA300",
                latitude_rad: 0.62267336022,
                longitude_rad: 2.43536359469,
                x_arm_azimuth_rad: 4.71238898038,
                y_arm_azimuth_rad: 3.14159265359,
                x_arm_altitude_rad: 0.0,
                y_arm_altitude_rad: 0.0,
            },
        }
    }
}

/// Get the Earth-centred, Earth-fixed unit vector of an arm, given the vertex
/// latitude and longitude and the arm's azimuth and altitude (all radians).
pub(crate) fn arm_unit_vector(
    latitude_rad: f64,
    longitude_rad: f64,
    azimuth_rad: f64,
    altitude_rad: f64,
) -> [f64; 3] {
    let (s_lat, c_lat) = latitude_rad.sin_cos();
    let (s_lon, c_lon) = longitude_rad.sin_cos();
    let (s_az, c_az) = azimuth_rad.sin_cos();
    let (s_alt, c_alt) = altitude_rad.sin_cos();

    let north = c_alt * c_az;
    let east = c_alt * s_az;
    let up = s_alt;

    [
        -s_lon * east - c_lon * s_lat * north + c_lon * c_lat * up,
        c_lon * east - s_lon * s_lat * north + s_lon * c_lat * up,
        c_lat * north + s_lat * up,
    ]
}

/// The response tensor of an interferometer with the given arm unit vectors:
/// D = (u u^T - v v^T) / 2.
pub(crate) fn response_tensor(u: [f64; 3], v: [f64; 3]) -> [[f64; 3]; 3] {
    let mut d = [[0.0; 3]; 3];
    for (i, row) in d.iter_mut().enumerate() {
        for (j, d_ij) in row.iter_mut().enumerate() {
            *d_ij = 0.5 * (u[i] * u[j] - v[i] * v[j]);
        }
    }
    d
}
