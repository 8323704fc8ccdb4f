// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with sky grids and sensitivity maps.

use thiserror::Error;

use crate::types::Axis;

#[derive(Error, Debug)]
pub enum SkyMapError {
    #[error("A sky grid needs at least 2 {axis} samples, but {got} were requested")]
    TooFewSamples { axis: Axis, got: usize },

    #[error("The right ascension field has shape {ra:?}, but the declination field has shape {dec:?}")]
    ShapeMismatch {
        ra: (usize, usize),
        dec: (usize, usize),
    },
}
