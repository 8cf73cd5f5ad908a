//! GRIB2 decoding for MRMS reflectivity grids (WMO FM 92 Edition 2).
//!
//! Decodes the first message of a decompressed GRIB2 buffer into a flat
//! reflectivity grid. Only what the radar pipeline needs is implemented:
//! grid-definition template 3.0 for dimensions and data-representation
//! template 5.0 (simple packing) for values. Anything else is a decode
//! error; the caller decides what failure means.

pub mod sections;
pub mod testdata;
pub mod unpack;

use radar_common::RadarError;
use thiserror::Error;

/// Marker substituted for cells the source flags as missing.
pub const NO_DATA: f32 = -999.0;

/// Dimensions assumed when the grid definition does not carry usable
/// point counts. This is the MRMS CONUS 0.01-degree grid.
pub const DEFAULT_COLUMNS: usize = 7000;
pub const DEFAULT_ROWS: usize = 3500;

/// Decoding failures. All of them abort the live path entirely; there
/// is no partial recovery.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid GRIB2 format: {0}")]
    InvalidFormat(String),

    #[error("Invalid section {section}: {reason}")]
    InvalidSection { section: u8, reason: String },

    #[error("Unsupported data representation template: 5.{0}")]
    UnsupportedPacking(u16),

    #[error("Unpacking failed: {0}")]
    Unpacking(String),
}

impl From<DecodeError> for RadarError {
    fn from(err: DecodeError) -> Self {
        RadarError::Decode(err.to_string())
    }
}

/// A decoded rectangular grid of reflectivity values.
///
/// Values are stored row-major and addressed by `row * columns + column`.
/// Row 0 is the first row in storage order; for MRMS grids (scanning
/// mode 0) that is the northernmost row.
#[derive(Debug, Clone)]
pub struct ReflectivityGrid {
    pub columns: usize,
    pub rows: usize,
    pub values: Vec<f32>,
    pub no_data: f32,
}

impl ReflectivityGrid {
    /// Number of cells the declared dimensions describe. May exceed
    /// `values.len()` when the declared grid is larger than the data.
    pub fn declared_len(&self) -> usize {
        self.columns * self.rows
    }
}

/// Decode the first GRIB2 message in `data` into a reflectivity grid.
///
/// The buffer must begin with a complete message; a buffer in which no
/// usable message is found is an error, never silently indexed.
pub fn decode_reflectivity(data: &[u8]) -> Result<ReflectivityGrid, DecodeError> {
    let _indicator = sections::parse_indicator(data)?;

    let (columns, rows) = grid_dimensions(data);

    let repr = sections::parse_data_representation(data)?;
    if repr.template != 0 {
        return Err(DecodeError::UnsupportedPacking(repr.template));
    }

    let bitmap = sections::parse_bitmap(data)?;
    let packed = sections::parse_data_section(data)?;

    let values = unpack::unpack_simple(
        packed,
        repr.num_data_points as usize,
        repr.bits_per_value,
        repr.reference_value,
        repr.binary_scale_factor,
        repr.decimal_scale_factor,
        bitmap,
        NO_DATA,
    )?;

    Ok(ReflectivityGrid {
        columns,
        rows,
        values,
        no_data: NO_DATA,
    })
}

/// Extract grid dimensions, falling back to the documented MRMS CONUS
/// defaults when the grid definition does not yield usable point counts.
fn grid_dimensions(data: &[u8]) -> (usize, usize) {
    match sections::parse_grid_definition(data) {
        Ok(gd) if gd.columns > 0 && gd.rows > 0 => (gd.columns as usize, gd.rows as usize),
        _ => (DEFAULT_COLUMNS, DEFAULT_ROWS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_buffer() {
        assert!(matches!(
            decode_reflectivity(&[]),
            Err(DecodeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_non_grib_buffer() {
        let garbage = vec![0u8; 64];
        assert!(decode_reflectivity(&garbage).is_err());
    }
}
