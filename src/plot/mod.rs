// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to render sensitivity maps as filled-contour Mollweide projections.

mod colour;
mod error;
mod projection;

pub use colour::{ColourScale, Normalisation};
pub use error::PlotError;

use std::{
    f64::consts::{PI, TAU},
    path::PathBuf,
};

use log::{debug, trace};
use ndarray::ArrayView2;
use plotters::{coord::Shift, prelude::*};
use rayon::prelude::*;

use crate::{
    constants::DEFAULT_NUM_LEVELS,
    sky::{SensitivityMap, SkyGrid},
};
use colour::{band_colours, band_index, contour_levels};
use projection::{X_MAX, Y_MAX};

const MIN_WIDTH: u32 = 300;
const MIN_HEIGHT: u32 = 150;

/// Height of the strip at the top holding the title.
const TITLE_PIXELS: u32 = 40;
/// Width of the strip on the right holding the colourbar.
const COLOURBAR_PIXELS: u32 = 110;
const MARGIN_PIXELS: u32 = 10;
/// Spacing of graticule lines \[degrees\].
const GRATICULE_STEP: i32 = 30;

const COLOURBAR_LABEL: &str = "√(F₊² + F×²)";

/// Everything that controls how a sensitivity map is drawn.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Where the PNG is written.
    pub output: PathBuf,

    /// Image width \[pixels\].
    pub width: u32,

    /// Image height \[pixels\].
    pub height: u32,

    /// The number of filled-contour bands. The band edges evenly span the
    /// range of the data.
    pub num_levels: usize,

    pub colour_scale: ColourScale,

    /// The values mapped to the bottom and top of the colour scale.
    pub norm_min: f64,
    pub norm_max: f64,

    /// Mark the detector's own location on the map.
    pub show_detector: bool,

    /// Replaces the default title ("<detector> antenna pattern").
    pub title: Option<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            output: PathBuf::from("antenna_pattern.png"),
            width: 1000,
            height: 500,
            num_levels: DEFAULT_NUM_LEVELS,
            colour_scale: ColourScale::default(),
            norm_min: 0.0,
            norm_max: 1.0,
            show_detector: false,
            title: None,
        }
    }
}

impl PlotConfig {
    /// The default configuration, writing to "antenna_pattern_<name>.png".
    pub fn for_detector(name: &str) -> PlotConfig {
        PlotConfig {
            output: PathBuf::from(format!("antenna_pattern_{name}.png")),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<Normalisation, PlotError> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(PlotError::ImageTooSmall {
                width: self.width,
                height: self.height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }
        if self.num_levels == 0 {
            return Err(PlotError::InvalidLevels);
        }
        Normalisation::new(self.norm_min, self.norm_max)
    }
}

/// Pixel geometry of the map ellipse.
#[derive(Debug, Clone, Copy)]
struct MapArea {
    x0: i32,
    y0: i32,
    width: u32,
    height: u32,
}

impl MapArea {
    fn new(image_width: u32, image_height: u32) -> MapArea {
        let avail_w = image_width - COLOURBAR_PIXELS - 2 * MARGIN_PIXELS;
        let avail_h = image_height - TITLE_PIXELS - MARGIN_PIXELS;
        let width = avail_w.min(2 * avail_h);
        let height = width / 2;
        MapArea {
            x0: (MARGIN_PIXELS + (avail_w - width) / 2) as i32,
            y0: (TITLE_PIXELS + (avail_h - height) / 2) as i32,
            width,
            height,
        }
    }

    /// Projected coordinates of the centre of a pixel (relative to the area).
    fn pixel_to_projected(&self, px: u32, py: u32) -> (f64, f64) {
        let half_w = self.width as f64 / 2.0;
        let half_h = self.height as f64 / 2.0;
        let x = ((px as f64 + 0.5) / half_w - 1.0) * X_MAX;
        let y = (1.0 - (py as f64 + 0.5) / half_h) * Y_MAX;
        (x, y)
    }

    /// Absolute pixel position of a (longitude, latitude) \[radians\].
    /// Longitudes outside \[-pi, pi\] are wrapped.
    fn lonlat_to_pixel(&self, lon_rad: f64, lat_rad: f64) -> (i32, i32) {
        let lon = if lon_rad.abs() <= PI + 1e-9 {
            lon_rad.clamp(-PI, PI)
        } else {
            (lon_rad + PI).rem_euclid(TAU) - PI
        };
        let (x, y) = projection::forward(lon, lat_rad);
        let px = self.x0 as f64 + (x / X_MAX + 1.0) * self.width as f64 / 2.0;
        let py = self.y0 as f64 + (1.0 - y / Y_MAX) * self.height as f64 / 2.0;
        (px.round() as i32, py.round() as i32)
    }
}

/// Bilinearly interpolate a field on `grid` at a position \[radians\].
/// Longitudes are wrapped into \[0, 2pi\).
pub(crate) fn interpolate(
    grid: &SkyGrid,
    field: ArrayView2<f64>,
    lon_rad: f64,
    lat_rad: f64,
) -> f64 {
    let (num_lat, num_lon) = grid.dim();
    let lon_step = TAU / (num_lon - 1) as f64;
    let lat_step = PI / (num_lat - 1) as f64;

    let fj = (lon_rad.rem_euclid(TAU) / lon_step).clamp(0.0, (num_lon - 1) as f64);
    let fi = ((lat_rad + PI / 2.0) / lat_step).clamp(0.0, (num_lat - 1) as f64);
    let j = (fj.floor() as usize).min(num_lon - 2);
    let i = (fi.floor() as usize).min(num_lat - 2);
    let tj = fj - j as f64;
    let ti = fi - i as f64;

    let bottom = field[(i, j)] * (1.0 - tj) + field[(i, j + 1)] * tj;
    let top = field[(i + 1, j)] * (1.0 - tj) + field[(i + 1, j + 1)] * tj;
    bottom * (1.0 - ti) + top * ti
}

fn draw_error<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Draw(e.to_string())
}

/// Draw some black sans-serif text with its top-left corner at `pos`.
fn draw_label(
    root: &DrawingArea<BitMapBackend, Shift>,
    text: &str,
    size: u32,
    pos: (i32, i32),
) -> Result<(), PlotError> {
    root.draw_text(
        text,
        &("sans-serif", size).into_font().color(&BLACK),
        pos,
    )
    .map_err(draw_error)
}

/// Render a sensitivity map to a PNG. Returns the path written.
pub fn plot_sensitivity_map(
    map: &SensitivityMap,
    config: &PlotConfig,
) -> Result<PathBuf, PlotError> {
    let norm = config.validate()?;

    let magnitude = map.magnitude();
    let (data_min, data_max) = magnitude
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let (data_min, data_max) = if data_min > data_max {
        // Nothing finite; band everything together.
        (0.0, 0.0)
    } else {
        (data_min, data_max)
    };
    let levels = contour_levels(data_min, data_max, config.num_levels)?;
    let colours = band_colours(&levels, &norm, config.colour_scale);
    trace!(
        "{} contour bands over [{data_min:.4}, {data_max:.4}]",
        config.num_levels
    );

    let area = MapArea::new(config.width, config.height);
    let pixels = rasterise(map, &area, &levels, &colours);

    let root =
        BitMapBackend::new(&config.output, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    for (py, row) in pixels.iter().enumerate() {
        for (px, colour) in row.iter().enumerate() {
            if let Some(colour) = colour {
                root.draw_pixel((area.x0 + px as i32, area.y0 + py as i32), colour)
                    .map_err(draw_error)?;
            }
        }
    }

    draw_graticule(&root, &area)?;
    if config.show_detector {
        let d = map.detector();
        let (x, y) = area.lonlat_to_pixel(d.longitude_rad(), d.latitude_rad());
        root.draw(&Circle::new((x, y), 6, BLUE.filled()))
            .map_err(draw_error)?;
        root.draw(&Circle::new((x, y), 6, WHITE.stroke_width(1)))
            .map_err(draw_error)?;
    }
    draw_colourbar(&root, &area, config)?;

    let title = config
        .title
        .clone()
        .unwrap_or_else(|| format!("{} antenna pattern", map.detector().full_name()));
    draw_label(&root, &title, 24, (MARGIN_PIXELS as i32, 8))?;

    root.present().map_err(draw_error)?;
    let bytes = std::fs::metadata(&config.output)?.len();
    debug!("Wrote {bytes} bytes to '{}'", config.output.display());

    Ok(config.output.clone())
}

/// Work out the colour of every pixel in the map area; `None` is outside the
/// ellipse. Rows are done in parallel.
fn rasterise(
    map: &SensitivityMap,
    area: &MapArea,
    levels: &[f64],
    colours: &[RGBColor],
) -> Vec<Vec<Option<RGBColor>>> {
    let grid = map.grid();
    let magnitude = map.magnitude();
    (0..area.height)
        .into_par_iter()
        .map(|py| {
            (0..area.width)
                .map(|px| {
                    let (x, y) = area.pixel_to_projected(px, py);
                    projection::inverse(x, y).map(|(lon, lat)| {
                        let v = interpolate(grid, magnitude, lon, lat);
                        colours[band_index(v, levels)]
                    })
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn draw_graticule(
    root: &DrawingArea<BitMapBackend, Shift>,
    area: &MapArea,
) -> Result<(), PlotError> {
    let style = WHITE.mix(0.35).stroke_width(1);
    let mut lines: Vec<Vec<(i32, i32)>> = vec![];

    // Meridians.
    for lon in (-180 + GRATICULE_STEP..180).step_by(GRATICULE_STEP as usize) {
        lines.push(
            (-90..=90)
                .map(|lat| {
                    area.lonlat_to_pixel((lon as f64).to_radians(), (lat as f64).to_radians())
                })
                .collect(),
        );
    }
    // Parallels.
    for lat in (-90 + GRATICULE_STEP..90).step_by(GRATICULE_STEP as usize) {
        lines.push(
            (-180..=180)
                .map(|lon| {
                    area.lonlat_to_pixel((lon as f64).to_radians(), (lat as f64).to_radians())
                })
                .collect(),
        );
    }
    for line in lines {
        root.draw(&PathElement::new(line, style))
            .map_err(draw_error)?;
    }

    // The outline.
    for side in [-PI, PI] {
        let outline: Vec<(i32, i32)> = (-90..=90)
            .map(|lat| area.lonlat_to_pixel(side, (lat as f64).to_radians()))
            .collect();
        root.draw(&PathElement::new(outline, BLACK.stroke_width(1)))
            .map_err(draw_error)?;
    }

    Ok(())
}

fn draw_colourbar(
    root: &DrawingArea<BitMapBackend, Shift>,
    area: &MapArea,
    config: &PlotConfig,
) -> Result<(), PlotError> {
    let bar_x0 = (config.width - COLOURBAR_PIXELS + MARGIN_PIXELS) as i32;
    let bar_x1 = bar_x0 + 22;
    let bar_top = area.y0;
    let bar_height = area.height as i32;

    for r in 0..bar_height {
        let t = 1.0 - (r as f64 + 0.5) / bar_height as f64;
        let colour = config.colour_scale.colour(t);
        root.draw(&Rectangle::new(
            [(bar_x0, bar_top + r), (bar_x1, bar_top + r + 1)],
            colour.filled(),
        ))
        .map_err(draw_error)?;
    }
    root.draw(&Rectangle::new(
        [(bar_x0, bar_top), (bar_x1, bar_top + bar_height)],
        BLACK.stroke_width(1),
    ))
    .map_err(draw_error)?;

    let num_ticks = 5;
    for k in 0..=num_ticks {
        let frac = k as f64 / num_ticks as f64;
        let y = bar_top + bar_height - (frac * bar_height as f64).round() as i32;
        let value = config.norm_min + frac * (config.norm_max - config.norm_min);
        root.draw(&PathElement::new(
            vec![(bar_x1, y), (bar_x1 + 5, y)],
            BLACK.stroke_width(1),
        ))
        .map_err(draw_error)?;
        draw_label(root, &format!("{value:.1}"), 14, (bar_x1 + 8, y - 7))?;
    }

    draw_label(
        root,
        COLOURBAR_LABEL,
        16,
        (bar_x0 - 8, (bar_top - 22).max(TITLE_PIXELS as i32 - 18)),
    )?;

    Ok(())
}
