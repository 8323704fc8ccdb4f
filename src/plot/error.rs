// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with rendering sensitivity maps.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("The image must be at least {min_width}x{min_height} pixels, but {width}x{height} was requested")]
    ImageTooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },

    #[error("At least one contour level is needed")]
    InvalidLevels,

    #[error("The colour normalisation range [{min}, {max}] is invalid; it must be finite and increasing")]
    InvalidNormalisation { min: f64, max: f64 },

    #[error("Error from the plotters library: {0}")]
    Draw(String),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
