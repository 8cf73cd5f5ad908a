//! Sample and snapshot types returned to clients.

use serde::{Deserialize, Serialize};

/// One geolocated reflectivity sample in dBZ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub latitude: f64,
    pub longitude: f64,
    pub value: f64,
}

impl Sample {
    /// Build a sample with the wire precision applied: coordinates to
    /// 4 decimal places, value to 1.
    pub fn rounded(latitude: f64, longitude: f64, value: f64) -> Self {
        Self {
            latitude: round_to(latitude, 4),
            longitude: round_to(longitude, 4),
            value: round_to(value, 1),
        }
    }
}

/// Round to `decimals` decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Where a snapshot's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotSource {
    #[serde(rename = "MRMS RALA (Live)")]
    Live,
    #[serde(rename = "Generated (MRMS unavailable)")]
    Generated,
}

/// The unit of data held in cache and returned to clients.
///
/// `count` always equals the number of samples; fields are private and
/// only the constructor can build one.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    timestamp: String,
    #[serde(rename = "data")]
    samples: Vec<Sample>,
    count: usize,
    source: SnapshotSource,
}

impl Snapshot {
    pub fn new(timestamp: String, samples: Vec<Sample>, source: SnapshotSource) -> Self {
        let count = samples.len();
        Self {
            timestamp,
            samples,
            count,
            source,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn source(&self) -> SnapshotSource {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        let s = Sample::rounded(39.123456, -104.987654, 47.56);
        assert_eq!(s.latitude, 39.1235);
        assert_eq!(s.longitude, -104.9877);
        assert_eq!(s.value, 47.6);
    }

    #[test]
    fn test_count_matches_samples() {
        let samples = vec![
            Sample::rounded(30.0, -100.0, 40.0),
            Sample::rounded(31.0, -101.0, 45.0),
        ];
        let snap = Snapshot::new("20240101-000000".to_string(), samples, SnapshotSource::Live);
        assert_eq!(snap.count(), 2);
        assert_eq!(snap.count(), snap.samples().len());
    }

    #[test]
    fn test_serialized_shape() {
        let snap = Snapshot::new(
            "20240101-120000".to_string(),
            vec![Sample::rounded(35.0, -90.0, 52.3)],
            SnapshotSource::Live,
        );
        let json = serde_json::to_value(&snap).unwrap();

        assert_eq!(json["timestamp"], "20240101-120000");
        assert_eq!(json["count"], 1);
        assert_eq!(json["source"], "MRMS RALA (Live)");
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["latitude"], 35.0);
    }

    #[test]
    fn test_generated_source_label() {
        let snap = Snapshot::new("20240101-120000".to_string(), vec![], SnapshotSource::Generated);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["source"], "Generated (MRMS unavailable)");
        assert_eq!(json["count"], 0);
    }
}
