//! Turning reflectivity grids into bounded sample sets.
//!
//! Two producers share one output shape: the projector subsamples a
//! decoded grid into geolocated samples, and the synthetic generator
//! fabricates a plausible storm field when no grid is available. Both
//! emit the same precision so clients cannot tell the formats apart.

pub mod project;
pub mod synthetic;

pub use project::{grid_to_samples, DEFAULT_STRIDE, REFLECTIVITY_RANGE};
pub use synthetic::{synthetic_samples, SYNTHETIC_SAMPLE_COUNT};
