//! Synthetic reflectivity field generation.
//!
//! Terminal safety net for the acquisition pipeline: when the live path
//! fails at any stage, a plausible-looking storm field is fabricated
//! in-process. Shape is deterministic (fixed storm centers, fixed point
//! counts); values and placement are randomized. The random source is
//! seedable so tests can assert exact output.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use radar_common::{Sample, CONUS_BOUNDS};

/// A fabricated storm cell.
struct StormCenter {
    lat: f64,
    lon: f64,
    peak_dbz: f64,
    radius_deg: f64,
}

/// Fixed storm centers, all placed far enough inside the CONUS box that
/// no scattered point can leave it.
const STORM_CENTERS: [StormCenter; 5] = [
    StormCenter { lat: 32.8, lon: -96.8, peak_dbz: 72.0, radius_deg: 1.6 },
    StormCenter { lat: 35.1, lon: -90.0, peak_dbz: 66.0, radius_deg: 1.3 },
    StormCenter { lat: 41.9, lon: -87.7, peak_dbz: 58.0, radius_deg: 1.1 },
    StormCenter { lat: 29.8, lon: -95.4, peak_dbz: 69.0, radius_deg: 1.5 },
    StormCenter { lat: 39.7, lon: -104.9, peak_dbz: 54.0, radius_deg: 0.9 },
];

/// Points scattered around each storm center.
const POINTS_PER_STORM: usize = 80;

/// Uniformly-scattered low-intensity background points.
const BACKGROUND_POINTS: usize = 150;

/// Half-width of the uniform noise added to storm point values.
const STORM_NOISE_DBZ: f64 = 7.5;

/// Clamp range for storm point values.
const STORM_VALUE_RANGE: (f64, f64) = (5.0, 75.0);

/// Value range for background points.
const BACKGROUND_VALUE_RANGE: (f64, f64) = (5.0, 25.0);

/// Total sample count: every invocation produces exactly this many.
pub const SYNTHETIC_SAMPLE_COUNT: usize =
    STORM_CENTERS.len() * POINTS_PER_STORM + BACKGROUND_POINTS;

/// Generate a synthetic sample set.
///
/// Pass a seed for reproducible output; `None` draws from entropy.
/// Never fails.
pub fn synthetic_samples(seed: Option<u64>) -> Vec<Sample> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut samples = Vec::with_capacity(SYNTHETIC_SAMPLE_COUNT);

    for storm in &STORM_CENTERS {
        for _ in 0..POINTS_PER_STORM {
            let angle = rng.gen::<f64>() * 2.0 * PI;
            let distance = rng.gen::<f64>() * storm.radius_deg;

            let lat = storm.lat + distance * angle.sin();
            let lon = storm.lon + distance * angle.cos();

            // Intensity falls off linearly from the core, with noise.
            let noise = rng.gen_range(-STORM_NOISE_DBZ..=STORM_NOISE_DBZ);
            let value = (storm.peak_dbz * (1.0 - distance / storm.radius_deg) + noise)
                .clamp(STORM_VALUE_RANGE.0, STORM_VALUE_RANGE.1);

            samples.push(Sample::rounded(lat, lon, value));
        }
    }

    for _ in 0..BACKGROUND_POINTS {
        let lat = rng.gen_range(CONUS_BOUNDS.min_lat..=CONUS_BOUNDS.max_lat);
        let lon = rng.gen_range(CONUS_BOUNDS.min_lon..=CONUS_BOUNDS.max_lon);
        let value = rng.gen_range(BACKGROUND_VALUE_RANGE.0..=BACKGROUND_VALUE_RANGE.1);

        samples.push(Sample::rounded(lat, lon, value));
    }

    samples
}
