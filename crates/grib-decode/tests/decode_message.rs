//! End-to-end decode tests over synthetic GRIB2 messages.

use grib_decode::testdata::{uniform_message, MessageBuilder};
use grib_decode::{decode_reflectivity, DecodeError, DEFAULT_COLUMNS, DEFAULT_ROWS, NO_DATA};

#[test]
fn test_decode_roundtrip() {
    let values = [0.0, 12.5, 47.5, 80.0, 100.0, 6553.5];
    let msg = MessageBuilder::new(3, 2).values(&values).build();

    let grid = decode_reflectivity(&msg).unwrap();

    assert_eq!(grid.columns, 3);
    assert_eq!(grid.rows, 2);
    assert_eq!(grid.values.len(), 6);
    for (decoded, expected) in grid.values.iter().zip(values.iter()) {
        assert!(
            (decoded - expected).abs() < 0.01,
            "expected {} got {}",
            expected,
            decoded
        );
    }
}

#[test]
fn test_decode_addressing_is_row_major() {
    // 3 columns x 2 rows; cell (row, col) holds row*10 + col.
    let values = [0.0, 1.0, 2.0, 10.0, 11.0, 12.0];
    let msg = MessageBuilder::new(3, 2).values(&values).build();

    let grid = decode_reflectivity(&msg).unwrap();

    for row in 0..2 {
        for col in 0..3 {
            let v = grid.values[row * grid.columns + col];
            assert!((v - (row * 10 + col) as f32).abs() < 0.01);
        }
    }
}

#[test]
fn test_decode_bitmap_missing_cells() {
    let values = [Some(30.0), None, Some(55.5), None];
    let msg = MessageBuilder::new(2, 2).masked_values(&values).build();

    let grid = decode_reflectivity(&msg).unwrap();

    assert_eq!(grid.values.len(), 4);
    assert!((grid.values[0] - 30.0).abs() < 0.01);
    assert_eq!(grid.values[1], NO_DATA);
    assert!((grid.values[2] - 55.5).abs() < 0.01);
    assert_eq!(grid.values[3], NO_DATA);
    assert_eq!(grid.no_data, NO_DATA);
}

#[test]
fn test_decode_dimension_fallback() {
    // A non-lat/lon grid template with a zeroed body leaves Ni/Nj
    // unrecoverable; the decoder assumes the MRMS CONUS grid.
    let msg = MessageBuilder::new(2, 2)
        .grid_template(30)
        .values(&[1.0, 2.0, 3.0, 4.0])
        .build();

    let grid = decode_reflectivity(&msg).unwrap();

    assert_eq!(grid.columns, DEFAULT_COLUMNS);
    assert_eq!(grid.rows, DEFAULT_ROWS);
    // Values still decode; the projector's bound check covers the
    // mismatch between declared dimensions and actual data length.
    assert_eq!(grid.values.len(), 4);
}

#[test]
fn test_decode_rejects_unsupported_packing() {
    let mut msg = uniform_message(2, 2, 10.0);
    // Section 5 starts after indicator (16) + section 1 (21) + section 3
    // (72); its template number sits at bytes 9-10 of the section.
    let sec5 = 16 + 21 + 72;
    msg[sec5 + 9] = 0;
    msg[sec5 + 10] = 3; // complex packing and spatial differencing

    match decode_reflectivity(&msg) {
        Err(DecodeError::UnsupportedPacking(3)) => {}
        other => panic!("expected UnsupportedPacking, got {:?}", other),
    }
}

#[test]
fn test_decode_rejects_truncated_message() {
    let msg = uniform_message(4, 4, 25.0);
    let truncated = &msg[..msg.len() / 2];
    assert!(decode_reflectivity(truncated).is_err());
}

#[test]
fn test_decode_rejects_garbage() {
    let garbage: Vec<u8> = (0..200).map(|i| (i * 7 % 251) as u8).collect();
    assert!(decode_reflectivity(&garbage).is_err());
}
