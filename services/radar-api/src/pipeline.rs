//! Per-request snapshot orchestration.
//!
//! Cache hit: return the cached snapshot unchanged. Cache stale or
//! absent: run the full acquisition pipeline inline, falling back to a
//! synthetic snapshot on any acquisition failure. Either outcome
//! overwrites the cache slot. Only faults past that boundary propagate
//! to the caller.

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use radar_common::{
    extract_timestamp_token, format_timestamp_token, RadarError, RadarResult, Snapshot,
    SnapshotSource, CONUS_BOUNDS,
};
use radar_sampling::{grid_to_samples, synthetic_samples};

use crate::state::AppState;

/// Produce the snapshot for one request.
pub async fn latest_snapshot(state: &AppState) -> RadarResult<Snapshot> {
    if let Some(snapshot) = state.cache.get().await {
        return Ok(snapshot);
    }

    let snapshot = match live_snapshot(state).await {
        Ok(snapshot) => snapshot,
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "Live pipeline failed, generating synthetic snapshot");
            generated_snapshot()
        }
        Err(e) => return Err(e),
    };

    state.cache.set(snapshot.clone()).await;
    Ok(snapshot)
}

/// Run the live acquisition pipeline: scan, fetch, decode, project.
#[instrument(skip(state))]
async fn live_snapshot(state: &AppState) -> RadarResult<Snapshot> {
    let file = state.source.latest_file().await?;
    let buffer = state.source.fetch_file(&file).await?;

    let grid = grib_decode::decode_reflectivity(&buffer).map_err(RadarError::from)?;
    debug!(
        columns = grid.columns,
        rows = grid.rows,
        values = grid.values.len(),
        "Decoded reflectivity grid"
    );

    let samples = grid_to_samples(&grid, &CONUS_BOUNDS, state.config.stride);

    // The scanner's filename pattern guarantees the token; a miss here
    // means the upstream naming contract broke.
    let timestamp = extract_timestamp_token(&file.name).ok_or_else(|| {
        RadarError::Decode(format!("selected filename missing timestamp token: {}", file.name))
    })?;

    info!(
        count = samples.len(),
        timestamp = %timestamp,
        "Live snapshot assembled"
    );

    Ok(Snapshot::new(timestamp, samples, SnapshotSource::Live))
}

/// Fabricate the fallback snapshot, stamped with the current time in
/// the same token format the live path uses.
fn generated_snapshot() -> Snapshot {
    let samples = synthetic_samples(None);
    let timestamp = format_timestamp_token(Utc::now());
    Snapshot::new(timestamp, samples, SnapshotSource::Generated)
}
