// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with detector lookups and antenna patterns.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Unknown detector '{name}'; available detectors: {available}")]
    UnknownDetector { name: String, available: String },

    #[error("The results buffer has {got} elements, but {expected} directions were supplied")]
    ResultsTooShort { got: usize, expected: usize },
}
