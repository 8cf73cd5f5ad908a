//! Remote acquisition of MRMS reflectivity grid files.
//!
//! The upstream feed is a plain HTTPS directory of timestamped
//! `.grib2`/`.grib2.gz` files. This crate lists that directory, selects
//! the most recent eligible file, downloads it, and hands back the
//! decompressed bytes. A single failed attempt propagates immediately;
//! the caller owns the fallback policy.

pub mod fetch;
pub mod scanner;

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, info, instrument};

use radar_common::{RadarError, RadarResult};

use crate::scanner::ListingScanner;

/// Directory listing timeout. The listing is a small text page; a slow
/// response means the feed is effectively down.
pub const LISTING_TIMEOUT: Duration = Duration::from_secs(10);

/// File download timeout, longer than the listing call because the
/// payload runs to megabytes.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Default MRMS RALA directory.
pub const DEFAULT_BASE_URL: &str = "https://mrms.ncep.noaa.gov/2D/ReflectivityAtLowestAltitude/";

/// One file in the remote directory, as selected by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFileRef {
    pub name: String,
    pub is_compressed: bool,
}

/// Source of reflectivity grid files: list-and-select plus fetch.
///
/// Abstracted so orchestration and tests never touch the network
/// directly.
#[async_trait]
pub trait ReflectivitySource: Send + Sync {
    /// Select the most recent eligible file in the remote directory.
    async fn latest_file(&self) -> RadarResult<RemoteFileRef>;

    /// Download a file and return its fully decompressed bytes.
    async fn fetch_file(&self, file: &RemoteFileRef) -> RadarResult<Bytes>;
}

/// HTTPS-backed source for the MRMS directory.
pub struct MrmsHttpSource {
    client: Client,
    base_url: String,
    scanner: ListingScanner,
}

impl MrmsHttpSource {
    /// Create a source for the given directory URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .tcp_nodelay(true)
            .build()
            .expect("Failed to create HTTP client");

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self {
            client,
            base_url,
            scanner: ListingScanner::new(),
        }
    }
}

#[async_trait]
impl ReflectivitySource for MrmsHttpSource {
    #[instrument(skip(self), fields(url = %self.base_url))]
    async fn latest_file(&self) -> RadarResult<RemoteFileRef> {
        let response = self
            .client
            .get(&self.base_url)
            .timeout(LISTING_TIMEOUT)
            .send()
            .await
            .map_err(|e| RadarError::Transport(format!("directory listing failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RadarError::Transport(format!(
                "directory listing returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RadarError::Transport(format!("reading listing body failed: {}", e)))?;

        let file = self.scanner.select_latest(&body)?;
        info!(name = %file.name, compressed = file.is_compressed, "Selected latest file");
        Ok(file)
    }

    #[instrument(skip(self), fields(name = %file.name))]
    async fn fetch_file(&self, file: &RemoteFileRef) -> RadarResult<Bytes> {
        let url = format!("{}{}", self.base_url, file.name);

        debug!(url = %url, "Downloading file");

        let response = self
            .client
            .get(&url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await
            .map_err(|e| RadarError::Transport(format!("download failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RadarError::Transport(format!(
                "download returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RadarError::Transport(format!("reading download body failed: {}", e)))?;

        info!(size = bytes.len(), name = %file.name, "Downloaded file");

        if file.is_compressed {
            fetch::decompress_gzip(&bytes)
        } else {
            Ok(bytes)
        }
    }
}
