//! GRIB2 simple-packing unpacker (data representation template 5.0).
//!
//! Unpacking formula:
//! `value = (reference_value + packed * 2^binary_scale) * 10^(-decimal_scale)`
//!
//! When a bitmap is present, packed data holds only the cells the bitmap
//! marks present; absent cells take the caller's no-data marker.

use crate::DecodeError;

#[allow(clippy::too_many_arguments)]
pub fn unpack_simple(
    packed: &[u8],
    num_points: usize,
    bits_per_value: u8,
    reference_value: f32,
    binary_scale_factor: i16,
    decimal_scale_factor: i16,
    bitmap: Option<&[u8]>,
    no_data: f32,
) -> Result<Vec<f32>, DecodeError> {
    if bits_per_value == 0 {
        // All values collapse to the reference value.
        return Ok(vec![reference_value; num_points]);
    }
    if bits_per_value > 32 {
        return Err(DecodeError::Unpacking(format!(
            "invalid bits per value: {}",
            bits_per_value
        )));
    }

    let binary_scale = 2.0_f32.powi(binary_scale_factor as i32);
    let decimal_scale = 10.0_f32.powi(-(decimal_scale_factor as i32));
    let bits_per_value = bits_per_value as usize;

    let mut values = Vec::with_capacity(num_points);
    let mut bit_position = 0;

    for i in 0..num_points {
        let present = match bitmap {
            Some(bm) => {
                // 1 bit per data point, MSB first; 1 = value present.
                let byte_idx = i / 8;
                let bit_idx = 7 - (i % 8);
                byte_idx < bm.len() && (bm[byte_idx] >> bit_idx) & 1 == 1
            }
            None => true,
        };

        if !present {
            values.push(no_data);
            continue;
        }

        let raw = extract_bits(packed, bit_position, bits_per_value)
            .map_err(DecodeError::Unpacking)?;
        bit_position += bits_per_value;

        values.push((reference_value + raw as f32 * binary_scale) * decimal_scale);
    }

    Ok(values)
}

/// Extract `num_bits` (MSB first) starting at `start_bit`.
fn extract_bits(data: &[u8], start_bit: usize, num_bits: usize) -> Result<u32, String> {
    if num_bits > 32 || num_bits == 0 {
        return Err(format!("invalid number of bits: {}", num_bits));
    }

    let mut result = 0u32;

    for i in 0..num_bits {
        let absolute_bit = start_bit + i;
        let byte_idx = absolute_bit / 8;
        let bit_idx = 7 - (absolute_bit % 8);

        if byte_idx >= data.len() {
            return Err("not enough data to extract bits".to_string());
        }

        let bit = (data[byte_idx] >> bit_idx) & 1;
        result = (result << 1) | (bit as u32);
    }

    Ok(result)
}
