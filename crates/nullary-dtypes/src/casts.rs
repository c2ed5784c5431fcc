//! Safe casting table
//!
//! A cast is "safe" when every value of the source type is representable in
//! the target type. Each entry lists the targets a data type may be cast to,
//! itself included, sorted by name.

use crate::dtype::DType;

use DType::*;

impl DType {
    /// Data types to which a value of this type may be safely cast.
    pub const fn safe_casts(&self) -> &'static [DType] {
        match self {
            Binary => &[Binary],
            Bool => &[Bool, Generic],
            Complex64 => &[Complex128, Complex64, Generic],
            Complex128 => &[Complex128, Generic],
            Float32 => &[Complex128, Complex64, Float32, Float64, Generic],
            Float64 => &[Complex128, Float64, Generic],
            Generic => &[Generic],
            Int8 => &[Complex128, Complex64, Float32, Float64, Generic, Int16, Int32, Int8],
            Int16 => &[Complex128, Complex64, Float32, Float64, Generic, Int16, Int32],
            Int32 => &[Complex128, Float64, Generic, Int32],
            Uint8 => &[
                Complex128, Complex64, Float32, Float64, Generic, Int16, Int32, Uint16, Uint32, Uint8, Uint8c,
            ],
            Uint8c => &[
                Complex128, Complex64, Float32, Float64, Generic, Int16, Int32, Uint16, Uint32, Uint8, Uint8c,
            ],
            Uint16 => &[Complex128, Complex64, Float32, Float64, Generic, Int32, Uint16, Uint32],
            Uint32 => &[Complex128, Float64, Generic, Uint32],
        }
    }

    /// Whether a value of this type may be safely cast to `target`.
    pub fn can_safely_cast_to(&self, target: DType) -> bool {
        self.safe_casts().contains(&target)
    }

    /// Data types whose values may be safely cast into this type, itself included.
    pub fn safe_sources(&self) -> Vec<DType> {
        let mut out: Vec<DType> = DType::all()
            .iter()
            .copied()
            .filter(|src| src.can_safely_cast_to(*self))
            .collect();
        out.sort_by_key(|dt| dt.name());
        out
    }
}
