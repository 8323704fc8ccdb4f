// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Errors associated with all aspects of gw_antenna.
 */

use thiserror::Error;

use crate::{detector::DetectorError, sky::SkyMapError};
#[cfg(feature = "plotting")]
use crate::plot::PlotError;

#[derive(Error, Debug)]
pub enum AntennaPatternError {
    #[error(transparent)]
    Detector(#[from] DetectorError),

    #[error(transparent)]
    SkyMap(#[from] SkyMapError),

    #[cfg(feature = "plotting")]
    #[error(transparent)]
    Plot(#[from] PlotError),
}
