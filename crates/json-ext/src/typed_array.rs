//! Element-typed numeric buffers.
//!
//! Every buffer travels as raw little-endian bytes plus the name of its
//! element kind. Plain byte buffers (`Uint8Array`) are `Value::Bytes`, not a
//! `TypedArray`, so the two never compete for the same data.

use json_ext_buffers::{decode_f16, encode_f16};

use crate::error::DecodeError;

/// Numeric element kinds, named after their wire spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedArrayKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float16,
    Float32,
    Float64,
    BigInt64,
    BigUint64,
}

impl TypedArrayKind {
    pub const ALL: [TypedArrayKind; 12] = [
        TypedArrayKind::Int8,
        TypedArrayKind::Uint8,
        TypedArrayKind::Uint8Clamped,
        TypedArrayKind::Int16,
        TypedArrayKind::Uint16,
        TypedArrayKind::Int32,
        TypedArrayKind::Uint32,
        TypedArrayKind::Float16,
        TypedArrayKind::Float32,
        TypedArrayKind::Float64,
        TypedArrayKind::BigInt64,
        TypedArrayKind::BigUint64,
    ];

    /// The element-type name written into the `type` field of the payload.
    pub fn name(self) -> &'static str {
        match self {
            TypedArrayKind::Int8 => "Int8Array",
            TypedArrayKind::Uint8 => "Uint8Array",
            TypedArrayKind::Uint8Clamped => "Uint8ClampedArray",
            TypedArrayKind::Int16 => "Int16Array",
            TypedArrayKind::Uint16 => "Uint16Array",
            TypedArrayKind::Int32 => "Int32Array",
            TypedArrayKind::Uint32 => "Uint32Array",
            TypedArrayKind::Float16 => "Float16Array",
            TypedArrayKind::Float32 => "Float32Array",
            TypedArrayKind::Float64 => "Float64Array",
            TypedArrayKind::BigInt64 => "BigInt64Array",
            TypedArrayKind::BigUint64 => "BigUint64Array",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn element_size(self) -> usize {
        match self {
            TypedArrayKind::Int8 | TypedArrayKind::Uint8 | TypedArrayKind::Uint8Clamped => 1,
            TypedArrayKind::Int16 | TypedArrayKind::Uint16 | TypedArrayKind::Float16 => 2,
            TypedArrayKind::Int32 | TypedArrayKind::Uint32 | TypedArrayKind::Float32 => 4,
            TypedArrayKind::Float64 | TypedArrayKind::BigInt64 | TypedArrayKind::BigUint64 => 8,
        }
    }
}

/// A numeric buffer with a fixed element kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    /// Same layout as bytes, kept apart so the element kind survives.
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    /// Raw IEEE 754 half-precision bits.
    Float16(Vec<u16>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    BigInt64(Vec<i64>),
    BigUint64(Vec<u64>),
}

macro_rules! le_elements {
    ($bytes:expr, $ty:ty) => {
        $bytes
            .chunks_exact(std::mem::size_of::<$ty>())
            .map(|chunk| {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(chunk);
                <$ty>::from_le_bytes(raw)
            })
            .collect()
    };
}

impl TypedArray {
    /// Builds a half-precision buffer, rounding each value to nearest.
    pub fn float16_from_f64(values: &[f64]) -> Self {
        TypedArray::Float16(values.iter().map(|&v| encode_f16(v)).collect())
    }

    pub fn kind(&self) -> TypedArrayKind {
        match self {
            TypedArray::Int8(_) => TypedArrayKind::Int8,
            TypedArray::Uint8Clamped(_) => TypedArrayKind::Uint8Clamped,
            TypedArray::Int16(_) => TypedArrayKind::Int16,
            TypedArray::Uint16(_) => TypedArrayKind::Uint16,
            TypedArray::Int32(_) => TypedArrayKind::Int32,
            TypedArray::Uint32(_) => TypedArrayKind::Uint32,
            TypedArray::Float16(_) => TypedArrayKind::Float16,
            TypedArray::Float32(_) => TypedArrayKind::Float32,
            TypedArray::Float64(_) => TypedArrayKind::Float64,
            TypedArray::BigInt64(_) => TypedArrayKind::BigInt64,
            TypedArray::BigUint64(_) => TypedArrayKind::BigUint64,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            TypedArray::Int8(v) => v.len(),
            TypedArray::Uint8Clamped(v) => v.len(),
            TypedArray::Int16(v) => v.len(),
            TypedArray::Uint16(v) | TypedArray::Float16(v) => v.len(),
            TypedArray::Int32(v) => v.len(),
            TypedArray::Uint32(v) => v.len(),
            TypedArray::Float32(v) => v.len(),
            TypedArray::Float64(v) => v.len(),
            TypedArray::BigInt64(v) => v.len(),
            TypedArray::BigUint64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element values widened to `f64`. 64-bit integers beyond 2^53 lose
    /// precision here; match on the variant to read them exactly.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            TypedArray::Int8(v) => v.iter().map(|&x| x as f64).collect(),
            TypedArray::Uint8Clamped(v) => v.iter().map(|&x| x as f64).collect(),
            TypedArray::Int16(v) => v.iter().map(|&x| x as f64).collect(),
            TypedArray::Uint16(v) => v.iter().map(|&x| x as f64).collect(),
            TypedArray::Int32(v) => v.iter().map(|&x| x as f64).collect(),
            TypedArray::Uint32(v) => v.iter().map(|&x| x as f64).collect(),
            TypedArray::Float16(v) => v.iter().map(|&x| decode_f16(x)).collect(),
            TypedArray::Float32(v) => v.iter().map(|&x| x as f64).collect(),
            TypedArray::Float64(v) => v.clone(),
            TypedArray::BigInt64(v) => v.iter().map(|&x| x as f64).collect(),
            TypedArray::BigUint64(v) => v.iter().map(|&x| x as f64).collect(),
        }
    }

    /// The underlying bytes, little-endian.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            TypedArray::Int8(v) => v.iter().map(|&x| x as u8).collect(),
            TypedArray::Uint8Clamped(v) => v.clone(),
            TypedArray::Int16(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            TypedArray::Uint16(v) | TypedArray::Float16(v) => {
                v.iter().flat_map(|x| x.to_le_bytes()).collect()
            }
            TypedArray::Int32(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            TypedArray::Uint32(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            TypedArray::Float32(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            TypedArray::Float64(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            TypedArray::BigInt64(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            TypedArray::BigUint64(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
        }
    }

    /// Reinterprets little-endian bytes as elements of `kind`.
    ///
    /// Returns `None` for [`TypedArrayKind::Uint8`], whose natural form is a
    /// plain byte buffer.
    pub fn from_le_bytes(kind: TypedArrayKind, bytes: &[u8]) -> Result<Option<Self>, DecodeError> {
        let element_size = kind.element_size();
        if bytes.len() % element_size != 0 {
            return Err(DecodeError::Layout {
                kind: kind.name(),
                len: bytes.len(),
                element_size,
            });
        }
        let array = match kind {
            TypedArrayKind::Uint8 => return Ok(None),
            TypedArrayKind::Int8 => TypedArray::Int8(bytes.iter().map(|&b| b as i8).collect()),
            TypedArrayKind::Uint8Clamped => TypedArray::Uint8Clamped(bytes.to_vec()),
            TypedArrayKind::Int16 => TypedArray::Int16(le_elements!(bytes, i16)),
            TypedArrayKind::Uint16 => TypedArray::Uint16(le_elements!(bytes, u16)),
            TypedArrayKind::Int32 => TypedArray::Int32(le_elements!(bytes, i32)),
            TypedArrayKind::Uint32 => TypedArray::Uint32(le_elements!(bytes, u32)),
            TypedArrayKind::Float16 => TypedArray::Float16(le_elements!(bytes, u16)),
            TypedArrayKind::Float32 => TypedArray::Float32(le_elements!(bytes, f32)),
            TypedArrayKind::Float64 => TypedArray::Float64(le_elements!(bytes, f64)),
            TypedArrayKind::BigInt64 => TypedArray::BigInt64(le_elements!(bytes, i64)),
            TypedArrayKind::BigUint64 => TypedArray::BigUint64(le_elements!(bytes, u64)),
        };
        Ok(Some(array))
    }
}
