//! Synthetic GRIB2 message construction for tests.
//!
//! Builds a single-message buffer the decoder can parse: indicator,
//! identification, grid definition (template 3.0), simple packing
//! (template 5.0, 16 bits per value, decimal scale 1), optional bitmap,
//! data section, and the `7777` end marker. Values must lie in
//! [0, 6553.5] and are quantized to 0.1.
//!
//! Section 5 carries the total number of grid points; when a bitmap is
//! present it marks which of those points have packed values, matching
//! what the unpacker expects.

/// Builder for a synthetic GRIB2 reflectivity message.
pub struct MessageBuilder {
    columns: u32,
    rows: u32,
    grid_template: u16,
    values: Vec<Option<f32>>,
}

impl MessageBuilder {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns: columns as u32,
            rows: rows as u32,
            grid_template: 0,
            values: Vec::new(),
        }
    }

    /// Use a non-lat/lon grid definition template. The template body is
    /// left zeroed, so the decoder cannot recover dimensions from it.
    pub fn grid_template(mut self, template: u16) -> Self {
        self.grid_template = template;
        self
    }

    /// Set cell values, all present.
    pub fn values(mut self, values: &[f32]) -> Self {
        self.values = values.iter().copied().map(Some).collect();
        self
    }

    /// Set cell values with missing cells (`None`), encoded via bitmap.
    pub fn masked_values(mut self, values: &[Option<f32>]) -> Self {
        self.values = values.to_vec();
        self
    }

    pub fn build(self) -> Vec<u8> {
        let total = self.values.len() as u32;
        let has_bitmap = self.values.iter().any(Option::is_none);

        // Pack present values as 16-bit integers, value * 10.
        let mut packed = Vec::new();
        for value in self.values.iter().flatten() {
            let quantized = (value * 10.0).round().clamp(0.0, u16::MAX as f32) as u16;
            packed.extend_from_slice(&quantized.to_be_bytes());
        }

        let mut msg = Vec::new();

        // Section 0: indicator (length patched at the end).
        msg.extend_from_slice(b"GRIB");
        msg.extend_from_slice(&[0, 0]); // reserved
        msg.push(209); // discipline: MRMS local use
        msg.push(2); // edition
        msg.extend_from_slice(&[0u8; 8]);

        // Section 1: identification (fixed reference time, unused by the
        // decoder but required for section traversal realism).
        msg.extend_from_slice(&21u32.to_be_bytes());
        msg.push(1);
        msg.extend_from_slice(&161u16.to_be_bytes()); // center: NOAA/NSSL
        msg.extend_from_slice(&0u16.to_be_bytes());
        msg.push(2); // master table version
        msg.push(1); // local table version
        msg.push(0); // significance of reference time
        msg.extend_from_slice(&2024u16.to_be_bytes());
        msg.extend_from_slice(&[1, 1, 0, 0, 0]); // month day hour min sec
        msg.push(0); // production status
        msg.push(1); // data type

        // Section 3: grid definition, template body of 58 bytes.
        let mut body = [0u8; 58];
        body[0] = 6; // shape of the earth
        if self.grid_template == 0 {
            body[16..20].copy_from_slice(&self.columns.to_be_bytes());
            body[20..24].copy_from_slice(&self.rows.to_be_bytes());
            // MRMS CONUS corner coordinates in microdegrees; the decode
            // path never reads these, the projector owns georeferencing.
            body[32..36].copy_from_slice(&54_995_000i32.to_be_bytes());
            body[36..40].copy_from_slice(&230_005_000i32.to_be_bytes());
            body[41..45].copy_from_slice(&20_005_000i32.to_be_bytes());
            body[45..49].copy_from_slice(&299_995_000i32.to_be_bytes());
            body[49..53].copy_from_slice(&10_000u32.to_be_bytes());
            body[53..57].copy_from_slice(&10_000u32.to_be_bytes());
            body[57] = 0; // scanning mode: west-to-east, north-to-south
        }
        msg.extend_from_slice(&72u32.to_be_bytes());
        msg.push(3);
        msg.push(0); // source of grid definition
        msg.extend_from_slice(&total.to_be_bytes());
        msg.push(0); // no optional list
        msg.push(0);
        msg.extend_from_slice(&self.grid_template.to_be_bytes());
        msg.extend_from_slice(&body);

        // Section 5: data representation, template 5.0.
        msg.extend_from_slice(&21u32.to_be_bytes());
        msg.push(5);
        msg.extend_from_slice(&total.to_be_bytes());
        msg.extend_from_slice(&0u16.to_be_bytes()); // simple packing
        msg.extend_from_slice(&0f32.to_be_bytes()); // reference value
        msg.extend_from_slice(&0i16.to_be_bytes()); // binary scale
        msg.extend_from_slice(&1i16.to_be_bytes()); // decimal scale
        msg.push(16); // bits per value
        msg.push(0); // original field type: float

        // Section 6: bitmap.
        if has_bitmap {
            let mut bits = vec![0u8; (self.values.len() + 7) / 8];
            for (i, value) in self.values.iter().enumerate() {
                if value.is_some() {
                    bits[i / 8] |= 1 << (7 - (i % 8));
                }
            }
            msg.extend_from_slice(&((6 + bits.len()) as u32).to_be_bytes());
            msg.push(6);
            msg.push(0); // bitmap applies and is specified here
            msg.extend_from_slice(&bits);
        } else {
            msg.extend_from_slice(&6u32.to_be_bytes());
            msg.push(6);
            msg.push(255); // no bitmap
        }

        // Section 7: data.
        msg.extend_from_slice(&((5 + packed.len()) as u32).to_be_bytes());
        msg.push(7);
        msg.extend_from_slice(&packed);

        // Section 8: end marker.
        msg.extend_from_slice(b"7777");

        // Patch total message length into the indicator.
        let total_len = msg.len() as u64;
        msg[8..16].copy_from_slice(&total_len.to_be_bytes());

        msg
    }
}

/// Convenience: a fully-present grid where every cell holds `value`.
pub fn uniform_message(columns: usize, rows: usize, value: f32) -> Vec<u8> {
    MessageBuilder::new(columns, rows)
        .values(&vec![value; columns * rows])
        .build()
}
