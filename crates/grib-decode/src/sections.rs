//! GRIB2 section parsing.
//!
//! A GRIB2 message is a sequence of length-prefixed sections between a
//! fixed 16-byte indicator and the `7777` end marker. Only the sections
//! the reflectivity decode path reads are parsed here.

use crate::DecodeError;

/// Section 0: Indicator Section (16 bytes).
#[derive(Debug, Clone)]
pub struct Indicator {
    pub discipline: u8,
    pub edition: u8,
    pub message_length: u32,
}

/// Section 3: grid dimensions, as far as the decode path needs them.
#[derive(Debug, Clone)]
pub struct GridDefinition {
    pub template: u16,
    /// Ni - number of points along a parallel.
    pub columns: u32,
    /// Nj - number of points along a meridian.
    pub rows: u32,
}

/// Section 5: Data Representation Section.
#[derive(Debug, Clone)]
pub struct DataRepresentation {
    pub num_data_points: u32,
    pub template: u16,
    pub reference_value: f32,
    pub binary_scale_factor: i16,
    pub decimal_scale_factor: i16,
    pub bits_per_value: u8,
}

/// Parse Section 0 (Indicator) from the start of the message.
pub fn parse_indicator(data: &[u8]) -> Result<Indicator, DecodeError> {
    if data.len() < 16 {
        return Err(DecodeError::InvalidFormat(
            "buffer too short for indicator section".to_string(),
        ));
    }

    if &data[0..4] != b"GRIB" {
        return Err(DecodeError::InvalidFormat(
            "missing GRIB magic bytes; no usable message".to_string(),
        ));
    }

    // Octet 7: discipline, octet 8: edition, octets 9-16: total message
    // length (8-byte big-endian; the lower 4 bytes cover any real file).
    let discipline = data[6];
    let edition = data[7];
    let message_length = u32::from_be_bytes([data[12], data[13], data[14], data[15]]);

    if edition != 2 {
        return Err(DecodeError::InvalidFormat(format!(
            "expected GRIB edition 2, got {}",
            edition
        )));
    }

    Ok(Indicator {
        discipline,
        edition,
        message_length,
    })
}

/// Parse Section 3 (Grid Definition), extracting point counts.
///
/// Template 3.0 (lat/lon) carries Ni/Nj at template bytes 16-23; other
/// templates keep the counts at the same offsets often enough that the
/// same read is attempted, with zeros when the body is too short. The
/// caller treats zero counts as unrecoverable dimensions.
pub fn parse_grid_definition(data: &[u8]) -> Result<GridDefinition, DecodeError> {
    let offset = find_section(data, 3)?;
    let section = &data[offset..];

    if section.len() < 14 {
        return Err(DecodeError::InvalidSection {
            section: 3,
            reason: "not enough data".to_string(),
        });
    }

    // Bytes 0-3: section length, byte 4: section number (3),
    // bytes 12-13: grid definition template number, bytes 14+: template.
    let template = u16::from_be_bytes([section[12], section[13]]);
    let body = &section[14..];

    let columns = if body.len() >= 20 {
        u32::from_be_bytes([body[16], body[17], body[18], body[19]])
    } else {
        0
    };
    let rows = if body.len() >= 24 {
        u32::from_be_bytes([body[20], body[21], body[22], body[23]])
    } else {
        0
    };

    Ok(GridDefinition {
        template,
        columns,
        rows,
    })
}

/// Parse Section 5 (Data Representation).
pub fn parse_data_representation(data: &[u8]) -> Result<DataRepresentation, DecodeError> {
    let offset = find_section(data, 5)?;
    let section = &data[offset..];

    if section.len() < 21 {
        return Err(DecodeError::InvalidSection {
            section: 5,
            reason: "not enough data".to_string(),
        });
    }

    // Bytes 5-8: number of data points, bytes 9-10: template number.
    let num_data_points =
        u32::from_be_bytes([section[5], section[6], section[7], section[8]]);
    let template = u16::from_be_bytes([section[9], section[10]]);

    // Template 5.0 fields follow at byte 11: reference value (IEEE f32),
    // binary scale factor, decimal scale factor, bits per packed value.
    let body = &section[11..];
    let reference_value = f32::from_be_bytes([body[0], body[1], body[2], body[3]]);
    let binary_scale_factor = i16::from_be_bytes([body[4], body[5]]);
    let decimal_scale_factor = i16::from_be_bytes([body[6], body[7]]);
    let bits_per_value = body[8];

    Ok(DataRepresentation {
        num_data_points,
        template,
        reference_value,
        binary_scale_factor,
        decimal_scale_factor,
        bits_per_value,
    })
}

/// Parse Section 6 (Bitmap). Returns the bitmap bits when one is
/// present (indicator 0), `None` when the section declares no bitmap.
pub fn parse_bitmap(data: &[u8]) -> Result<Option<&[u8]>, DecodeError> {
    let offset = find_section(data, 6)?;
    let section = &data[offset..];

    if section.len() < 6 {
        return Err(DecodeError::InvalidSection {
            section: 6,
            reason: "not enough data".to_string(),
        });
    }

    let length = u32::from_be_bytes([section[0], section[1], section[2], section[3]]) as usize;
    let indicator = section[5];

    if indicator != 0 || length <= 6 {
        return Ok(None);
    }

    if length > section.len() {
        return Err(DecodeError::InvalidSection {
            section: 6,
            reason: "section length exceeds available data".to_string(),
        });
    }

    Ok(Some(&section[6..length]))
}

/// Parse Section 7 (Data), returning the packed payload.
pub fn parse_data_section(data: &[u8]) -> Result<&[u8], DecodeError> {
    let offset = find_section(data, 7)?;
    let section = &data[offset..];

    if section.len() < 5 {
        return Err(DecodeError::InvalidSection {
            section: 7,
            reason: "not enough data".to_string(),
        });
    }

    let length = u32::from_be_bytes([section[0], section[1], section[2], section[3]]) as usize;

    if length < 5 || length > section.len() {
        return Err(DecodeError::InvalidSection {
            section: 7,
            reason: "section length exceeds available data".to_string(),
        });
    }

    Ok(&section[5..length])
}

/// Find a section by number, walking length-prefixed sections after the
/// 16-byte indicator.
fn find_section(data: &[u8], section_num: u8) -> Result<usize, DecodeError> {
    let mut offset = 16;

    loop {
        if offset + 5 > data.len() {
            return Err(DecodeError::InvalidSection {
                section: section_num,
                reason: "section not found".to_string(),
            });
        }

        let length = u32::from_be_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]) as usize;

        if length < 5 || offset + length > data.len() {
            return Err(DecodeError::InvalidSection {
                section: section_num,
                reason: "invalid section length".to_string(),
            });
        }

        let current = data[offset + 4];
        if current == section_num {
            return Ok(offset);
        }

        offset += length;

        if offset >= data.len() || current == 8 {
            return Err(DecodeError::InvalidSection {
                section: section_num,
                reason: "reached end of message without finding section".to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::MessageBuilder;

    #[test]
    fn test_parse_indicator() {
        let msg = MessageBuilder::new(4, 3).values(&[0.0; 12]).build();
        let ind = parse_indicator(&msg).unwrap();
        assert_eq!(ind.edition, 2);
        assert_eq!(ind.message_length as usize, msg.len());
    }

    #[test]
    fn test_indicator_rejects_wrong_edition() {
        let mut msg = MessageBuilder::new(4, 3).values(&[0.0; 12]).build();
        msg[7] = 1;
        assert!(matches!(
            parse_indicator(&msg),
            Err(DecodeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_grid_definition_dimensions() {
        let msg = MessageBuilder::new(40, 30).values(&[0.0; 1200]).build();
        let gd = parse_grid_definition(&msg).unwrap();
        assert_eq!(gd.template, 0);
        assert_eq!(gd.columns, 40);
        assert_eq!(gd.rows, 30);
    }

    #[test]
    fn test_parse_data_representation() {
        let msg = MessageBuilder::new(4, 2).values(&[1.0; 8]).build();
        let repr = parse_data_representation(&msg).unwrap();
        assert_eq!(repr.num_data_points, 8);
        assert_eq!(repr.template, 0);
        assert_eq!(repr.bits_per_value, 16);
    }

    #[test]
    fn test_find_section_missing() {
        // Truncate right after the indicator: no sections at all.
        let msg = MessageBuilder::new(4, 3).values(&[0.0; 12]).build();
        let truncated = &msg[..16];
        assert!(matches!(
            find_section(truncated, 5),
            Err(DecodeError::InvalidSection { section: 5, .. })
        ));
    }
}
