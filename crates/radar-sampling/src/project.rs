//! Projection of grid cells to geolocated samples.

use grib_decode::ReflectivityGrid;
use radar_common::{LatLonBounds, Sample};

/// Subsampling interval: only every Nth row and column is visited,
/// trading resolution for payload size.
pub const DEFAULT_STRIDE: usize = 25;

/// Open interval of reflectivity values worth emitting, in dBZ. Values
/// at or below the floor are noise; values at or above the ceiling are
/// sensor-saturation artifacts. Out-of-range cells are dropped, never
/// clamped.
pub const REFLECTIVITY_RANGE: (f64, f64) = (5.0, 80.0);

/// Project a decoded grid onto geographic samples.
///
/// Row 0 of the grid is its northernmost row (MRMS grids scan
/// north-to-south), so latitude decreases with row index. Cells whose
/// flat index exceeds the actual data length are skipped: the declared
/// dimensions may be larger than the data that arrived. Emission order
/// is row-major visitation order; an empty result is valid.
pub fn grid_to_samples(
    grid: &ReflectivityGrid,
    bounds: &LatLonBounds,
    stride: usize,
) -> Vec<Sample> {
    let stride = stride.max(1);
    let (low, high) = REFLECTIVITY_RANGE;

    if grid.rows == 0 || grid.columns == 0 {
        return Vec::new();
    }

    let lat_step = bounds.lat_span() / grid.rows as f64;
    let lon_step = bounds.lon_span() / grid.columns as f64;

    let mut samples = Vec::new();

    for row in (0..grid.rows).step_by(stride) {
        for col in (0..grid.columns).step_by(stride) {
            let index = row * grid.columns + col;
            if index >= grid.values.len() {
                continue;
            }

            let value = grid.values[index] as f64;
            if value <= low || value >= high {
                continue;
            }

            let lat = bounds.max_lat - row as f64 * lat_step;
            let lon = bounds.min_lon + col as f64 * lon_step;

            samples.push(Sample::rounded(lat, lon, value));
        }
    }

    samples
}
