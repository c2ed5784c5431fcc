//! Supported data type resolution

use nullary_dtypes::DType;

/// Registry data types minus `excluded`, de-duplicated and sorted by name.
pub fn supported_dtypes(all: &[DType], excluded: &[DType]) -> Vec<DType> {
    let mut out: Vec<DType> = all.iter().copied().filter(|dt| !excluded.contains(dt)).collect();
    out.sort_by_key(|dt| dt.name());
    out.dedup();
    out
}
