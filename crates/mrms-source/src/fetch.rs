//! Payload decompression.

use std::io::Read;

use bytes::Bytes;
use flate2::read::GzDecoder;

use radar_common::{RadarError, RadarResult};

/// Decompress a gzip-compressed grid file.
///
/// The whole payload is already in memory; there is no streaming
/// decode. A corrupt or truncated stream fails outright.
pub fn decompress_gzip(data: &[u8]) -> RadarResult<Bytes> {
    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| RadarError::Decompression(e.to_string()))?;
    Ok(Bytes::from(decompressed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_decompress_valid() {
        let original = b"GRIB payload bytes";
        let result = decompress_gzip(&gzip(original)).expect("should decompress");
        assert_eq!(result.as_ref(), original);
    }

    #[test]
    fn test_decompress_invalid() {
        let result = decompress_gzip(b"not gzip data");
        assert!(matches!(result, Err(RadarError::Decompression(_))));
    }

    #[test]
    fn test_decompress_truncated() {
        let compressed = gzip(&vec![0xABu8; 4096]);
        let truncated = &compressed[..compressed.len() / 2];
        assert!(matches!(
            decompress_gzip(truncated),
            Err(RadarError::Decompression(_))
        ));
    }

    #[test]
    fn test_decompress_empty_payload() {
        let result = decompress_gzip(&gzip(b"")).expect("empty payload is valid gzip");
        assert!(result.is_empty());
    }
}
