// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::f64::consts::SQRT_2;

use approx::*;

use super::*;
use crate::constants::REFERENCE_GPS_SECONDS;

fn reference_epoch() -> Epoch {
    Epoch::from_gpst_seconds(REFERENCE_GPS_SECONDS)
}

fn map_for(name: &str, gps: f64) -> SensitivityMap {
    let detector = Detector::new(name).unwrap();
    SensitivityMap::new(detector, SkyGrid::default(), Epoch::from_gpst_seconds(gps)).unwrap()
}

#[test]
fn default_grid_shape() {
    let grid = SkyGrid::default();
    assert_eq!(grid.dim(), (60, 120));
    assert_eq!(grid.longitudes_deg().len(), 120);
    assert_eq!(grid.latitudes_deg().len(), 60);

    let (lon2d, lat2d) = grid.mesh();
    assert_eq!(lon2d.dim(), (60, 120));
    assert_eq!(lat2d.dim(), (60, 120));
}

#[test]
fn grid_includes_endpoints() {
    let grid = SkyGrid::default();
    let lon = grid.longitudes_deg();
    let lat = grid.latitudes_deg();
    assert_abs_diff_eq!(lon[0], 0.0);
    assert_abs_diff_eq!(lon[119], 360.0, epsilon = 1e-12);
    assert_abs_diff_eq!(lat[0], -90.0);
    assert_abs_diff_eq!(lat[59], 90.0, epsilon = 1e-12);

    assert_abs_diff_eq!(grid.longitudes_rad()[119], TAU, epsilon = 1e-12);
    assert_abs_diff_eq!(grid.latitudes_rad()[0], -FRAC_PI_2, epsilon = 1e-12);
}

#[test]
fn mesh_is_row_major_with_longitude_fastest() {
    let grid = SkyGrid::new(4, 3).unwrap();
    let (lon2d, lat2d) = grid.mesh();
    for i in 0..3 {
        assert_eq!(lon2d.row(i), grid.longitudes_rad());
    }
    for j in 0..4 {
        assert_eq!(lat2d.column(j), grid.latitudes_rad());
    }
}

#[test]
fn grid_needs_two_samples_per_axis() {
    assert!(matches!(
        SkyGrid::new(1, 60),
        Err(SkyMapError::TooFewSamples {
            axis: Axis::Longitude,
            got: 1
        })
    ));
    assert!(matches!(
        SkyGrid::new(120, 0),
        Err(SkyMapError::TooFewSamples {
            axis: Axis::Latitude,
            got: 0
        })
    ));
    assert!(SkyGrid::new(2, 2).is_ok());
}

#[test]
fn nearest_index_wraps_and_clamps() {
    let grid = SkyGrid::default();
    assert_eq!(grid.nearest_index(0.0, -FRAC_PI_2), (0, 0));
    // Just below 0 wraps around to the 360 degree column.
    assert_eq!(grid.nearest_index(-1e-9, FRAC_PI_2), (59, 119));
    assert_eq!(grid.nearest_index(FRAC_PI_2, 0.5), (39, 30));
    assert_eq!(grid.nearest_index(TAU + 0.01, -2.0), (0, 0));
}

#[test]
fn right_ascensions_are_offset_longitudes() {
    let detector = Detector::new("H1").unwrap();
    let grid = SkyGrid::new(8, 5).unwrap();
    let epoch = reference_epoch();
    let ra = right_ascensions(&detector, &grid, epoch);
    let (lon2d, _) = grid.mesh();
    let gmst = detector.gmst_estimate(epoch);
    assert_abs_diff_eq!(ra - lon2d, Array2::from_elem((5, 8), gmst), epsilon = 1e-12);
}

#[test]
fn response_maps_reject_mismatched_shapes() {
    let detector = Detector::new("V1").unwrap();
    let ra = Array2::zeros((3, 4));
    let dec = Array2::zeros((4, 3));
    let result = ResponseMaps::new(&detector, ra.view(), dec.view(), 0.0, reference_epoch());
    assert!(matches!(result, Err(SkyMapError::ShapeMismatch { .. })));
}

#[test]
fn response_maps_match_single_evaluations() {
    let detector = Detector::new("L1").unwrap();
    let grid = SkyGrid::new(7, 5).unwrap();
    let epoch = reference_epoch();
    let ra = right_ascensions(&detector, &grid, epoch);
    let (_, dec) = grid.mesh();
    let maps = ResponseMaps::new(&detector, ra.view(), dec.view(), 0.0, epoch).unwrap();

    for ((i, j), &plus) in maps.plus.indexed_iter() {
        let r = detector.antenna_pattern((ra[(i, j)], dec[(i, j)]), 0.0, epoch);
        assert_eq!(plus, r.plus);
        assert_eq!(maps.cross[(i, j)], r.cross);
    }
}

#[test]
fn magnitude_is_elementwise_norm() {
    let plus = array![[0.6, 0.0], [-1.0, 0.3]];
    let cross = array![[0.8, 0.0], [0.0, -0.4]];
    let expected = array![[1.0, 0.0], [1.0, 0.5]];
    assert_abs_diff_eq!(magnitude(plus.view(), cross.view()), expected, epsilon = 1e-15);
}

#[test]
fn maps_are_deterministic() {
    let a = map_for("H1", REFERENCE_GPS_SECONDS);
    let b = map_for("H1", REFERENCE_GPS_SECONDS);
    assert_eq!(a.magnitude(), b.magnitude());
    assert_eq!(a.plus(), b.plus());
    assert_eq!(a.cross(), b.cross());
}

#[test]
fn maps_are_independent_of_the_reference_epoch() {
    for name in ["H1", "V1", "K1"] {
        let a = map_for(name, REFERENCE_GPS_SECONDS);
        let b = map_for(name, 1e9 + 4321.5);
        assert_abs_diff_eq!(a.magnitude(), b.magnitude(), epsilon = 1e-10);
    }
}

#[test]
fn values_are_in_range() {
    for name in ["L1", "G1", "T1"] {
        let map = map_for(name, REFERENCE_GPS_SECONDS);
        assert_eq!(map.magnitude().dim(), (60, 120));
        assert!(map.plus().iter().all(|v| (-1.0..=1.0).contains(v)));
        assert!(map.cross().iter().all(|v| (-1.0..=1.0).contains(v)));
        assert!(map.magnitude().iter().all(|v| (0.0..=SQRT_2).contains(v)));
    }
}

#[test]
fn first_and_last_meridians_agree() {
    let map = map_for("V1", REFERENCE_GPS_SECONDS);
    let m = map.magnitude();
    for i in 0..m.nrows() {
        assert_abs_diff_eq!(m[(i, 0)], m[(i, 119)], epsilon = 1e-12);
    }
}

#[test]
fn zenith_cells_are_pinned() {
    for (name, cell, expected) in [
        ("H1", (45, 80), 0.999751246254),
        ("L1", (40, 89), 0.999652810517),
        ("V1", (44, 3), 0.999782864085),
    ] {
        let map = map_for(name, REFERENCE_GPS_SECONDS);
        let d = map.detector();
        assert_eq!(
            map.grid().nearest_index(d.longitude_rad(), d.latitude_rad()),
            cell,
            "{name}"
        );
        assert_abs_diff_eq!(map.magnitude()[cell], expected, epsilon = 1e-9);
    }
}

#[test]
fn peak_sensitivity_is_near_the_zenith() {
    for name in ["H1", "L1", "V1"] {
        let map = map_for(name, REFERENCE_GPS_SECONDS);
        let d = map.detector();

        let zenith_value = map.value_nearest(d.longitude_rad(), d.latitude_rad());
        assert!(zenith_value > 0.99, "{name}: {zenith_value}");

        let (peak, _, _) = map.peak();
        assert!(peak >= zenith_value);
        assert!(peak <= 1.0 + 1e-3);
    }
}
