use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Data types known to the strided array registry
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Binary,
    Bool,
    Complex64,
    Complex128,
    Float32,
    Float64,
    Generic,
    Int8,
    Int16,
    Int32,
    Uint8,
    Uint8c,
    Uint16,
    Uint32,
}

/// Returned when a name or character does not resolve to a registered data type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown data type: {0}")]
pub struct ParseDTypeError(pub String);

impl DType {
    /// Full registry list, in declaration order.
    pub const fn all() -> &'static [DType] {
        &[
            Self::Binary,
            Self::Bool,
            Self::Complex64,
            Self::Complex128,
            Self::Float32,
            Self::Float64,
            Self::Generic,
            Self::Int8,
            Self::Int16,
            Self::Int32,
            Self::Uint8,
            Self::Uint8c,
            Self::Uint16,
            Self::Uint32,
        ]
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Bool => "bool",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Generic => "generic",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Uint8 => "uint8",
            Self::Uint8c => "uint8c",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
        }
    }

    /// One-letter abbreviation used in kernel signatures and file names.
    pub const fn char_code(&self) -> char {
        match self {
            Self::Binary => 'r',
            Self::Bool => 'x',
            Self::Complex64 => 'c',
            Self::Complex128 => 'z',
            Self::Float32 => 'f',
            Self::Float64 => 'd',
            Self::Generic => 'o',
            Self::Int8 => 's',
            Self::Int16 => 'k',
            Self::Int32 => 'i',
            Self::Uint8 => 'b',
            Self::Uint8c => 'a',
            Self::Uint16 => 'm',
            Self::Uint32 => 'u',
        }
    }

    /// Resolve a data type from its one-letter abbreviation.
    pub fn from_char(ch: char) -> Option<Self> {
        Self::all().iter().copied().find(|dt| dt.char_code() == ch)
    }

    /// Number of bytes per element.
    ///
    /// `generic` arrays hold references, so there is no meaningful width; the
    /// registry reports zero for it.
    pub const fn bytes_per_element(&self) -> usize {
        match self {
            Self::Binary => 1,
            Self::Bool => 1,
            Self::Complex64 => 8,
            Self::Complex128 => 16,
            Self::Float32 => 4,
            Self::Float64 => 8,
            Self::Generic => 0,
            Self::Int8 => 1,
            Self::Int16 => 2,
            Self::Int32 => 4,
            Self::Uint8 => 1,
            Self::Uint8c => 1,
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Binary => "byte",
            Self::Bool => "boolean values",
            Self::Complex64 => "single-precision floating-point complex numbers",
            Self::Complex128 => "double-precision floating-point complex numbers",
            Self::Float32 => "single-precision floating-point numbers",
            Self::Float64 => "double-precision floating-point numbers",
            Self::Generic => "values of any type",
            Self::Int8 => "signed 8-bit integers",
            Self::Int16 => "signed 16-bit integers",
            Self::Int32 => "signed 32-bit integers",
            Self::Uint8 => "unsigned 8-bit integers",
            Self::Uint8c => "unsigned clamped 8-bit integers",
            Self::Uint16 => "unsigned 16-bit integers",
            Self::Uint32 => "unsigned 32-bit integers",
        }
    }

    /// C type used to store one element in generated sources.
    pub const fn c_type(&self) -> &'static str {
        match self {
            Self::Binary => "uint8_t",
            Self::Bool => "bool",
            Self::Complex64 => "stdlib_complex64_t",
            Self::Complex128 => "stdlib_complex128_t",
            Self::Float32 => "float",
            Self::Float64 => "double",
            Self::Generic => "void",
            Self::Int8 => "int8_t",
            Self::Int16 => "int16_t",
            Self::Int32 => "int32_t",
            Self::Uint8 => "uint8_t",
            Self::Uint8c => "uint8_t",
            Self::Uint16 => "uint16_t",
            Self::Uint32 => "uint32_t",
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for DType {
    type Err = ParseDTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|dt| dt.name() == s)
            .ok_or_else(|| ParseDTypeError(s.to_string()))
    }
}
