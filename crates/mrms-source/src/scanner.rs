//! Directory listing parsing and latest-file selection.
//!
//! The remote listing is semi-structured HTML whose exact shape is not
//! under our control, so the match is done against the one stable
//! contract: filenames of the form
//! `MRMS_ReflectivityAtLowestAltitude_YYYYMMDD-HHMMSS.grib2[.gz]`.
//! Parsing lives entirely behind this type; orchestration never sees
//! listing text.

use regex::Regex;

use radar_common::{RadarError, RadarResult};

use crate::RemoteFileRef;

/// Suffix marking a gzip-compressed grid file.
const COMPRESSED_SUFFIX: &str = ".gz";

/// Pattern for eligible filenames. The fixed-width zero-padded
/// timestamp makes lexicographic order chronological.
const FILE_PATTERN: &str =
    r"MRMS_ReflectivityAtLowestAltitude_\d{8}-\d{6}\.grib2(?:\.gz)?";

/// Scans directory listing text for eligible grid files.
pub struct ListingScanner {
    pattern: Regex,
}

impl Default for ListingScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingScanner {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(FILE_PATTERN).expect("Failed to compile filename pattern"),
        }
    }

    /// Select the single most recent eligible file in the listing.
    ///
    /// Matches are sorted lexicographically descending and the first is
    /// taken; zero matches is `NoFilesFound`.
    pub fn select_latest(&self, listing: &str) -> RadarResult<RemoteFileRef> {
        let mut names: Vec<&str> = self
            .pattern
            .find_iter(listing)
            .map(|m| m.as_str())
            .collect();

        if names.is_empty() {
            return Err(RadarError::NoFilesFound);
        }

        names.sort_unstable_by(|a, b| b.cmp(a));
        names.dedup();

        let name = names[0].to_string();
        let is_compressed = name.ends_with(COMPRESSED_SUFFIX);

        Ok(RemoteFileRef {
            name,
            is_compressed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_lexicographically_latest() {
        let scanner = ListingScanner::new();
        let listing = concat!(
            r#"<a href="MRMS_ReflectivityAtLowestAltitude_20240101-000000.grib2">file</a>"#,
            "\n",
            r#"<a href="MRMS_ReflectivityAtLowestAltitude_20240101-000200.grib2.gz">file</a>"#,
        );

        let file = scanner.select_latest(listing).unwrap();
        assert_eq!(
            file.name,
            "MRMS_ReflectivityAtLowestAltitude_20240101-000200.grib2.gz"
        );
        assert!(file.is_compressed);
    }

    #[test]
    fn test_uncompressed_file_flagged() {
        let scanner = ListingScanner::new();
        let listing = r#"href="MRMS_ReflectivityAtLowestAltitude_20240601-120000.grib2""#;

        let file = scanner.select_latest(listing).unwrap();
        assert!(!file.is_compressed);
    }

    #[test]
    fn test_empty_listing_is_no_files_found() {
        let scanner = ListingScanner::new();
        assert!(matches!(
            scanner.select_latest(""),
            Err(RadarError::NoFilesFound)
        ));
    }

    #[test]
    fn test_listing_without_matches_is_no_files_found() {
        let scanner = ListingScanner::new();
        let listing = concat!(
            r#"<a href="MRMS_PrecipRate_20240101-000000.grib2">other product</a>"#,
            "\n",
            r#"<a href="readme.txt">readme</a>"#,
        );
        assert!(matches!(
            scanner.select_latest(listing),
            Err(RadarError::NoFilesFound)
        ));
    }

    #[test]
    fn test_malformed_timestamps_skipped() {
        let scanner = ListingScanner::new();
        // Wrong token widths never match; the one valid name wins even
        // though it sorts earlier as a string.
        let listing = concat!(
            "MRMS_ReflectivityAtLowestAltitude_2024011-000000.grib2\n",
            "MRMS_ReflectivityAtLowestAltitude_20240101-0000.grib2\n",
            "MRMS_ReflectivityAtLowestAltitude_20230601-080000.grib2\n",
        );

        let file = scanner.select_latest(listing).unwrap();
        assert_eq!(
            file.name,
            "MRMS_ReflectivityAtLowestAltitude_20230601-080000.grib2"
        );
    }

    #[test]
    fn test_duplicate_entries_deduped() {
        let scanner = ListingScanner::new();
        // Apache-style listings mention each filename twice (href and
        // link text); selection must still be stable.
        let listing = concat!(
            r#"<a href="MRMS_ReflectivityAtLowestAltitude_20240101-000200.grib2">"#,
            "MRMS_ReflectivityAtLowestAltitude_20240101-000200.grib2</a>",
        );

        let file = scanner.select_latest(listing).unwrap();
        assert_eq!(
            file.name,
            "MRMS_ReflectivityAtLowestAltitude_20240101-000200.grib2"
        );
    }
}
