//! Decoding of raw characteristic buffers into numeric field values.
//!
//! Every characteristic carries a fixed, ordered layout of scalar fields.
//! The board firmware packs them little-endian with no padding, so a buffer
//! is decoded by walking the layout and advancing a byte cursor per field.

use std::fmt;

/// Scalar type of a single field within a characteristic buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Unsigned 8-bit integer, 1 byte.
    UInt8,
    /// Unsigned 16-bit integer, 2 bytes little-endian.
    UInt16,
    /// IEEE-754 single-precision float, 4 bytes little-endian.
    Float32,
}

impl FieldType {
    /// Number of bytes this field occupies on the wire.
    pub const fn width(self) -> usize {
        match self {
            FieldType::UInt8 => 1,
            FieldType::UInt16 => 2,
            FieldType::Float32 => 4,
        }
    }
}

/// Total wire size of a layout in bytes.
pub fn layout_width(layout: &[FieldType]) -> usize {
    layout.iter().map(|t| t.width()).sum()
}

/// A buffer was shorter than the layout it was decoded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    /// Bytes required by the layout.
    pub expected: usize,
    /// Bytes actually received.
    pub actual: usize,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "buffer too short: expected {} bytes, got {}",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for DecodeError {}

/// Decode `buf` according to `layout`, one value per field type, in order.
///
/// All values are widened to `f64` so that downstream history buffers and
/// statistics work on a single numeric type. Fails if the buffer cannot
/// satisfy the full layout; a partial buffer is never silently truncated.
pub fn decode_fields(buf: &[u8], layout: &[FieldType]) -> Result<Vec<f64>, DecodeError> {
    let expected = layout_width(layout);
    if buf.len() < expected {
        return Err(DecodeError {
            expected,
            actual: buf.len(),
        });
    }

    let mut values = Vec::with_capacity(layout.len());
    let mut offset = 0;
    for &ty in layout {
        let value = match ty {
            FieldType::UInt8 => f64::from(buf[offset]),
            FieldType::UInt16 => {
                f64::from(u16::from_le_bytes([buf[offset], buf[offset + 1]]))
            }
            FieldType::Float32 => f64::from(f32::from_le_bytes([
                buf[offset],
                buf[offset + 1],
                buf[offset + 2],
                buf[offset + 3],
            ])),
        };
        values.push(value);
        offset += ty.width();
    }

    Ok(values)
}
