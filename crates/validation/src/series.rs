//! Tagged numeric arrays
//!
//! Producers serialise numeric arrays as a tagged JSON object:
//!
//! ```json
//! {"_type": "numpy.ndarray", "dtype": "float64", "bytes": "<base64>"}
//! ```
//!
//! The payload is the raw little-endian element buffer. Supported dtypes:
//!
//! | dtype | alias | element |
//! |-------|-------|---------|
//! | `float64` | `<f8` | 8-byte IEEE-754 |
//! | `float32` | `<f4` | 4-byte IEEE-754 |
//! | `int64` | `<i8` | 8-byte signed |
//! | `int32` | `<i4` | 4-byte signed |
//!
//! Such arrays are not flat metadata; they are decoded here for validation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use byteorder::{LittleEndian, ReadBytesExt};
use simdb_meta_core::value::{NDARRAY_MARKER, TYPE_MARKER_KEY};
use simdb_meta_core::{Error, Result};
use std::io::Cursor;

/// Element type of a tagged array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    /// 8-byte float
    Float64,
    /// 4-byte float
    Float32,
    /// 8-byte signed integer
    Int64,
    /// 4-byte signed integer
    Int32,
}

impl Dtype {
    /// Parse a dtype name
    pub fn from_name(name: &str) -> Option<Dtype> {
        match name {
            "float64" | "<f8" => Some(Dtype::Float64),
            "float32" | "<f4" => Some(Dtype::Float32),
            "int64" | "<i8" => Some(Dtype::Int64),
            "int32" | "<i4" => Some(Dtype::Int32),
            _ => None,
        }
    }

    /// Canonical dtype name
    pub fn name(&self) -> &'static str {
        match self {
            Dtype::Float64 => "float64",
            Dtype::Float32 => "float32",
            Dtype::Int64 => "int64",
            Dtype::Int32 => "int32",
        }
    }

    /// Element width in bytes
    pub fn width(&self) -> usize {
        match self {
            Dtype::Float64 | Dtype::Int64 => 8,
            Dtype::Float32 | Dtype::Int32 => 4,
        }
    }
}

/// Check if a JSON value carries the tagged array marker
pub fn is_tagged_series(raw: &serde_json::Value) -> bool {
    raw.get(TYPE_MARKER_KEY).and_then(|t| t.as_str()) == Some(NDARRAY_MARKER)
}

/// Decode a tagged array into `f64` samples
///
/// # Errors
///
/// `InvalidSeries` when the marker, dtype or payload is wrong, or the payload
/// length is not a multiple of the element width.
pub fn decode_series(raw: &serde_json::Value) -> Result<Vec<f64>> {
    if !is_tagged_series(raw) {
        return Err(Error::InvalidSeries(format!(
            "expected a '{}' tagged object",
            NDARRAY_MARKER
        )));
    }
    let dtype_name = raw
        .get("dtype")
        .and_then(|d| d.as_str())
        .ok_or_else(|| Error::InvalidSeries("missing dtype".to_string()))?;
    let dtype = Dtype::from_name(dtype_name)
        .ok_or_else(|| Error::InvalidSeries(format!("unsupported dtype '{}'", dtype_name)))?;
    let payload = raw
        .get("bytes")
        .and_then(|b| b.as_str())
        .ok_or_else(|| Error::InvalidSeries("missing bytes".to_string()))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| Error::InvalidSeries(format!("bad base64 payload: {}", e)))?;

    if bytes.len() % dtype.width() != 0 {
        return Err(Error::InvalidSeries(format!(
            "{} bytes is not a whole number of {} elements",
            bytes.len(),
            dtype.name()
        )));
    }

    let count = bytes.len() / dtype.width();
    let mut reader = Cursor::new(bytes);
    let mut samples = Vec::with_capacity(count);
    for _ in 0..count {
        let sample = match dtype {
            Dtype::Float64 => reader.read_f64::<LittleEndian>(),
            Dtype::Float32 => reader.read_f32::<LittleEndian>().map(f64::from),
            Dtype::Int64 => reader.read_i64::<LittleEndian>().map(|i| i as f64),
            Dtype::Int32 => reader.read_i32::<LittleEndian>().map(f64::from),
        }
        .map_err(|e| Error::InvalidSeries(format!("truncated payload: {}", e)))?;
        samples.push(sample);
    }
    Ok(samples)
}

/// Encode samples as a tagged `float64` array
pub fn encode_series(samples: &[f64]) -> serde_json::Value {
    let mut buf = Vec::with_capacity(samples.len() * 8);
    for x in samples {
        buf.extend_from_slice(&x.to_le_bytes());
    }
    let mut obj = serde_json::Map::new();
    obj.insert(TYPE_MARKER_KEY.to_string(), NDARRAY_MARKER.into());
    obj.insert("dtype".to_string(), Dtype::Float64.name().into());
    obj.insert("bytes".to_string(), STANDARD.encode(&buf).into());
    serde_json::Value::Object(obj)
}
