// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plot the antenna pattern of a gravitational-wave detector as a Mollweide
//! sky map.
//!
//! Usage: `plot-antenna-pattern <DETECTOR> [OUTPUT_PNG]`, e.g.
//! `plot-antenna-pattern H1 h1.png`. Without an output path, the map is written
//! to "antenna_pattern_<DETECTOR>.png". Set `RUST_LOG=debug` for more output.

use std::path::PathBuf;

use gw_antenna::{detector::Detector, plot::PlotConfig, plot_antenna_pattern};
use log::info;

fn main() {
    setup_logging();
    if let Err(e) = try_main() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let detector_name = match args.next() {
        Some(name) => name,
        None => {
            let available = Detector::available()
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(format!(
                "No detector was given. Usage: plot-antenna-pattern <DETECTOR> [OUTPUT_PNG]\nAvailable detectors: {available}"
            )
            .into());
        }
    };

    let mut config = PlotConfig::for_detector(&detector_name);
    if let Some(output) = args.next() {
        config.output = PathBuf::from(output);
    }

    info!(
        "Plotting the {detector_name} antenna pattern to '{}'",
        config.output.display()
    );
    plot_antenna_pattern(&detector_name, &config)?;
    Ok(())
}

/// Log to stdout at the info level, unless `RUST_LOG` says otherwise.
fn setup_logging() {
    let mut builder = env_logger::Builder::new();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    builder.filter_level(log::LevelFilter::Info);
    builder.parse_default_env();
    builder.init();
}
