// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colour scales and filled-contour banding.

use plotters::style::RGBColor;

use super::PlotError;

/// Colour scales available for sensitivity maps. Both are perceptually uniform
/// and are sampled at nine evenly spaced anchors, then linearly interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColourScale {
    #[default]
    Inferno,
    Viridis,
}

const INFERNO: [(u8, u8, u8); 9] = [
    (0, 0, 4),
    (31, 12, 72),
    (85, 15, 109),
    (136, 34, 106),
    (186, 54, 85),
    (227, 89, 51),
    (249, 140, 10),
    (249, 201, 50),
    (252, 255, 164),
];

const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

impl ColourScale {
    fn anchors(self) -> &'static [(u8, u8, u8); 9] {
        match self {
            ColourScale::Inferno => &INFERNO,
            ColourScale::Viridis => &VIRIDIS,
        }
    }

    /// The colour at `t`, which is clamped to \[0, 1\]. NaN gives the bottom of
    /// the scale.
    pub fn colour(self, t: f64) -> RGBColor {
        let anchors = self.anchors();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (anchors.len() - 1) as f64;
        let i = (scaled.floor() as usize).min(anchors.len() - 2);
        let frac = scaled - i as f64;

        let (r0, g0, b0) = anchors[i];
        let (r1, g1, b1) = anchors[i + 1];
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }
}

/// A normalisation taking values in \[min, max\] to \[0, 1\]. Values outside are
/// clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalisation {
    pub min: f64,
    pub max: f64,
}

impl Normalisation {
    pub fn new(min: f64, max: f64) -> Result<Normalisation, PlotError> {
        if !(min.is_finite() && max.is_finite() && max > min) {
            return Err(PlotError::InvalidNormalisation { min, max });
        }
        Ok(Normalisation { min, max })
    }

    pub fn apply(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Edges of `num_bands` equal-width contour bands spanning the data range.
/// There is one more edge than bands. A constant field gets a unit-wide span
/// centred on its value.
pub(crate) fn contour_levels(
    data_min: f64,
    data_max: f64,
    num_bands: usize,
) -> Result<Vec<f64>, PlotError> {
    if num_bands == 0 {
        return Err(PlotError::InvalidLevels);
    }
    let (lo, hi) = if data_max > data_min {
        (data_min, data_max)
    } else {
        (data_min - 0.5, data_min + 0.5)
    };
    let width = (hi - lo) / num_bands as f64;
    Ok((0..=num_bands).map(|i| lo + width * i as f64).collect())
}

/// Which band a value falls into. Values below the first edge (and NaNs) go in
/// the first band, values above the last edge in the last band.
pub(crate) fn band_index(value: f64, levels: &[f64]) -> usize {
    let num_bands = levels.len() - 1;
    if value.is_nan() || value <= levels[0] {
        return 0;
    }
    // The first edge strictly greater than the value closes its band.
    let upper = levels.partition_point(|&edge| edge <= value);
    upper.saturating_sub(1).min(num_bands - 1)
}

/// The colour of each band: its midpoint, normalised, looked up on the scale.
pub(crate) fn band_colours(
    levels: &[f64],
    norm: &Normalisation,
    scale: ColourScale,
) -> Vec<RGBColor> {
    levels
        .windows(2)
        .map(|w| scale.colour(norm.apply(0.5 * (w[0] + w[1]))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_endpoints() {
        assert_eq!(ColourScale::Inferno.colour(0.0), RGBColor(0, 0, 4));
        assert_eq!(ColourScale::Inferno.colour(1.0), RGBColor(252, 255, 164));
        assert_eq!(ColourScale::Viridis.colour(-3.0), RGBColor(68, 1, 84));
        assert_eq!(ColourScale::Viridis.colour(7.0), RGBColor(253, 231, 37));
        assert_eq!(ColourScale::Inferno.colour(f64::NAN), RGBColor(0, 0, 4));
    }

    #[test]
    fn scale_interpolates_between_anchors() {
        // Halfway between the first two inferno anchors.
        let c = ColourScale::Inferno.colour(0.0625);
        assert_eq!(c, RGBColor(16, 6, 38));
        // The middle anchor is hit exactly.
        assert_eq!(ColourScale::Viridis.colour(0.5), RGBColor(33, 144, 141));
    }

    #[test]
    fn normalisation() {
        let n = Normalisation::new(0.0, 1.0).unwrap();
        assert_eq!(n.apply(0.25), 0.25);
        assert_eq!(n.apply(-1.0), 0.0);
        assert_eq!(n.apply(1.2), 1.0);

        assert!(Normalisation::new(1.0, 1.0).is_err());
        assert!(Normalisation::new(1.0, 0.0).is_err());
        assert!(Normalisation::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn levels_span_the_data() {
        let levels = contour_levels(0.2, 0.7, 50).unwrap();
        assert_eq!(levels.len(), 51);
        assert_eq!(levels[0], 0.2);
        assert!((levels[50] - 0.7).abs() < 1e-12);

        let flat = contour_levels(0.4, 0.4, 4).unwrap();
        for (got, expected) in flat.iter().zip([-0.1, 0.15, 0.4, 0.65, 0.9]) {
            assert!((got - expected).abs() < 1e-12, "{got} != {expected}");
        }

        assert!(matches!(
            contour_levels(0.0, 1.0, 0),
            Err(PlotError::InvalidLevels)
        ));
    }

    #[test]
    fn bands() {
        let levels = [0.0, 0.25, 0.5, 0.75, 1.0];
        assert_eq!(band_index(-0.5, &levels), 0);
        assert_eq!(band_index(0.0, &levels), 0);
        assert_eq!(band_index(0.1, &levels), 0);
        assert_eq!(band_index(0.25, &levels), 1);
        assert_eq!(band_index(0.6, &levels), 2);
        assert_eq!(band_index(0.99, &levels), 3);
        assert_eq!(band_index(1.0, &levels), 3);
        assert_eq!(band_index(5.0, &levels), 3);
        assert_eq!(band_index(f64::NAN, &levels), 0);
    }

    #[test]
    fn band_colours_use_midpoints() {
        let levels = [0.0, 0.5, 1.0];
        let norm = Normalisation::new(0.0, 1.0).unwrap();
        let colours = band_colours(&levels, &norm, ColourScale::Viridis);
        assert_eq!(colours.len(), 2);
        assert_eq!(colours[0], ColourScale::Viridis.colour(0.25));
        assert_eq!(colours[1], ColourScale::Viridis.colour(0.75));
    }
}
