// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Antenna patterns of ground-based gravitational-wave detectors, and Mollweide
sky maps of how sensitive each detector is across the sky.
 */

pub mod constants;
pub mod detector;
mod direction;
pub mod errors;
#[cfg(feature = "plotting")]
pub mod plot;
pub mod sky;
mod types;

#[cfg(feature = "plotting")]
use std::path::PathBuf;

use log::debug;
#[cfg(feature = "plotting")]
use log::info;

pub use direction::SkyCoord;
pub use errors::AntennaPatternError;
pub use types::{AntennaResponse, Axis};

// Re-exports.
pub use hifitime::Epoch;
pub use marlu::RADec;

use detector::Detector;
use sky::{SensitivityMap, SkyGrid};

/// Look up a detector by its code (e.g. "H1") and evaluate its sensitivity over
/// `grid`. An unknown detector is reported before anything is computed.
pub fn sensitivity_map(
    detector_name: &str,
    epoch: Epoch,
    grid: SkyGrid,
) -> Result<SensitivityMap, AntennaPatternError> {
    let detector = Detector::new(detector_name)?;
    debug!("Using {} ({})", detector.full_name(), detector.site());
    let map = SensitivityMap::new(detector, grid, epoch)?;
    Ok(map)
}

/// Render the sensitivity map of a detector with the default grid and the
/// reference epoch. Returns the path of the written PNG.
#[cfg(feature = "plotting")]
pub fn plot_antenna_pattern(
    detector_name: &str,
    config: &plot::PlotConfig,
) -> Result<PathBuf, AntennaPatternError> {
    let epoch = Epoch::from_gpst_seconds(constants::REFERENCE_GPS_SECONDS);
    let map = sensitivity_map(detector_name, epoch, SkyGrid::default())?;

    let (peak, lon, lat) = map.peak();
    info!(
        "{} peak sensitivity {peak:.4} at longitude {:.1} deg, latitude {:.1} deg",
        map.detector().name(),
        lon.to_degrees(),
        lat.to_degrees()
    );

    let path = plot::plot_sensitivity_map(&map, config)?;
    info!("Wrote '{}'", path.display());
    Ok(path)
}
