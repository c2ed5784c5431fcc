//! Cast resolution against the supported type set

use nullary_dtypes::DType;

/// Supported data types whose values may be safely cast into `target`, sorted by name.
///
/// `target` itself is part of the result whenever it is supported, since every type
/// casts to itself. The registry's safe-cast table is the only authority consulted.
pub fn safe_sources(target: DType, supported: &[DType], excluded: &[DType]) -> Vec<DType> {
    let mut out: Vec<DType> = target
        .safe_sources()
        .into_iter()
        .filter(|dt| !excluded.contains(dt) && supported.contains(dt))
        .collect();
    out.sort_by_key(|dt| dt.name());
    out
}
