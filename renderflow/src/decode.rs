//! Expansion of compact numeric fragments into plain JSON arrays
//!
//! The charting library encodes numeric arrays as `{"dtype", "bdata", "shape"}`
//! objects, where `bdata` is base64 over the raw buffer. Plain-JSON consumers
//! (figure JSON export, inline report scripts) need literal nested arrays.
//! Decoding is best-effort: a fragment that cannot be decoded is kept verbatim.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Number, Value};

/// Element type of a compact fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Little,
    Big,
}

impl DType {
    /// Parse a numpy-style dtype string, returning the byte order alongside
    fn parse(raw: &str) -> Option<(Self, ByteOrder)> {
        let raw = raw.trim();
        let (order, code) = match raw.chars().next()? {
            '<' | '=' | '|' => (ByteOrder::Little, &raw[1..]),
            '>' => (ByteOrder::Big, &raw[1..]),
            _ => (ByteOrder::Little, raw),
        };
        let dtype = match code {
            "b1" | "bool" | "?" => Self::Bool,
            "i1" | "int8" => Self::Int8,
            "u1" | "uint8" => Self::UInt8,
            "i2" | "int16" => Self::Int16,
            "u2" | "uint16" => Self::UInt16,
            "i4" | "int32" => Self::Int32,
            "u4" | "uint32" => Self::UInt32,
            "i8" | "int64" => Self::Int64,
            "u8" | "uint64" => Self::UInt64,
            "f4" | "float32" => Self::Float32,
            "f8" | "float64" => Self::Float64,
            _ => return None,
        };
        Some((dtype, order))
    }

    /// Canonical little-endian code
    pub fn code(self) -> &'static str {
        match self {
            Self::Bool => "b1",
            Self::Int8 => "i1",
            Self::UInt8 => "u1",
            Self::Int16 => "i2",
            Self::UInt16 => "u2",
            Self::Int32 => "i4",
            Self::UInt32 => "u4",
            Self::Int64 => "i8",
            Self::UInt64 => "u8",
            Self::Float32 => "f4",
            Self::Float64 => "f8",
        }
    }

    pub fn item_size(self) -> usize {
        match self {
            Self::Bool | Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }

    fn read(self, chunk: &[u8], order: ByteOrder) -> Option<Value> {
        macro_rules! read_as {
            ($ty:ty) => {{
                let bytes = chunk.try_into().ok()?;
                match order {
                    ByteOrder::Little => <$ty>::from_le_bytes(bytes),
                    ByteOrder::Big => <$ty>::from_be_bytes(bytes),
                }
            }};
        }

        let value = match self {
            Self::Bool => Value::Bool(chunk[0] != 0),
            Self::Int8 => Value::from(read_as!(i8)),
            Self::UInt8 => Value::from(read_as!(u8)),
            Self::Int16 => Value::from(read_as!(i16)),
            Self::UInt16 => Value::from(read_as!(u16)),
            Self::Int32 => Value::from(read_as!(i32)),
            Self::UInt32 => Value::from(read_as!(u32)),
            Self::Int64 => Value::from(read_as!(i64)),
            Self::UInt64 => Value::from(read_as!(u64)),
            Self::Float32 => float_value(f64::from(read_as!(f32))),
            Self::Float64 => float_value(read_as!(f64)),
        };
        Some(value)
    }
}

fn float_value(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Recursively replace compact numeric fragments with nested arrays
///
/// Mappings keep their keys and sequences keep their order and length.
/// Applying this to its own output is a no-op.
pub fn decode_numeric_payload(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            if is_fragment(&map) {
                if let Some(decoded) = decode_fragment(&map) {
                    return decoded;
                }
                tracing::debug!(dtype = ?map.get("dtype"), "leaving undecodable numeric fragment as-is");
            }
            Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, decode_numeric_payload(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(decode_numeric_payload).collect()),
        other => other,
    }
}

/// Largest number of nested empty rows a zero-size shape may expand to
const MAX_EMPTY_ROWS: usize = 1 << 16;

fn is_fragment(map: &Map<String, Value>) -> bool {
    map.contains_key("dtype") && map.contains_key("bdata")
}

fn decode_fragment(map: &Map<String, Value>) -> Option<Value> {
    let (dtype, order) = DType::parse(map.get("dtype")?.as_str()?)?;
    let bytes = STANDARD.decode(map.get("bdata")?.as_str()?).ok()?;

    let size = dtype.item_size();
    if bytes.len() % size != 0 {
        return None;
    }
    let flat = bytes
        .chunks_exact(size)
        .map(|chunk| dtype.read(chunk, order))
        .collect::<Option<Vec<Value>>>()?;

    let dims = match map.get("shape") {
        None | Some(Value::Null) => Vec::new(),
        Some(shape) => parse_shape(shape)?,
    };
    if dims.is_empty() {
        return Some(Value::Array(flat));
    }
    if shape_len(&dims)? != flat.len() {
        return None;
    }
    Some(reshape(flat, &dims))
}

/// Element count of `dims`, or `None` when the shape cannot be materialized
///
/// Every running product must fit a `usize`. An empty array may still hold
/// nested empty rows, so their count is capped too.
fn shape_len(dims: &[usize]) -> Option<usize> {
    let total = dims.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))?;
    if total == 0 {
        let rows = dims
            .iter()
            .take_while(|&&dim| dim != 0)
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))?;
        if rows > MAX_EMPTY_ROWS {
            return None;
        }
    }
    Some(total)
}

fn parse_shape(shape: &Value) -> Option<Vec<usize>> {
    match shape {
        Value::String(text) => text
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<usize>().ok())
            .collect(),
        Value::Array(dims) => dims
            .iter()
            .map(|dim| dim.as_u64().and_then(|d| usize::try_from(d).ok()))
            .collect(),
        _ => Some(Vec::new()),
    }
}

fn reshape(flat: Vec<Value>, dims: &[usize]) -> Value {
    match dims {
        [] | [_] => Value::Array(flat),
        [0, ..] => Value::Array(Vec::new()),
        [rows, rest @ ..] => {
            // Running products were checked by `shape_len`.
            let stride: usize = rest.iter().product();
            let mut remaining = flat.into_iter();
            Value::Array(
                (0..*rows)
                    .map(|_| reshape(remaining.by_ref().take(stride).collect(), rest))
                    .collect(),
            )
        }
    }
}

/// Encode a flat numeric buffer as a compact fragment
///
/// `values` are written with `dtype`'s width, little-endian. Integers that do
/// not fit the dtype wrap the way a C cast would.
pub fn encode_fragment(values: &[f64], dtype: DType, shape: Option<&[usize]>) -> Value {
    let mut bytes = Vec::with_capacity(values.len() * dtype.item_size());
    for &value in values {
        match dtype {
            DType::Bool => bytes.push(u8::from(value != 0.0)),
            DType::Int8 => bytes.extend_from_slice(&(value as i8).to_le_bytes()),
            DType::UInt8 => bytes.extend_from_slice(&(value as u8).to_le_bytes()),
            DType::Int16 => bytes.extend_from_slice(&(value as i16).to_le_bytes()),
            DType::UInt16 => bytes.extend_from_slice(&(value as u16).to_le_bytes()),
            DType::Int32 => bytes.extend_from_slice(&(value as i32).to_le_bytes()),
            DType::UInt32 => bytes.extend_from_slice(&(value as u32).to_le_bytes()),
            DType::Int64 => bytes.extend_from_slice(&(value as i64).to_le_bytes()),
            DType::UInt64 => bytes.extend_from_slice(&(value as u64).to_le_bytes()),
            DType::Float32 => bytes.extend_from_slice(&(value as f32).to_le_bytes()),
            DType::Float64 => bytes.extend_from_slice(&value.to_le_bytes()),
        }
    }

    let mut fragment = Map::new();
    fragment.insert("dtype".to_string(), Value::from(dtype.code()));
    fragment.insert("bdata".to_string(), Value::from(STANDARD.encode(bytes)));
    if let Some(shape) = shape {
        let shape = shape
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        fragment.insert("shape".to_string(), Value::from(shape));
    }
    Value::Object(fragment)
}
