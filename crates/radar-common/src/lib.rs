//! Shared types for the radar snapshot service.

pub mod bounds;
pub mod error;
pub mod snapshot;
pub mod time;

pub use bounds::{LatLonBounds, CONUS_BOUNDS};
pub use error::{RadarError, RadarResult};
pub use snapshot::{Sample, Snapshot, SnapshotSource};
pub use time::{extract_timestamp_token, format_timestamp_token, parse_timestamp_token};
