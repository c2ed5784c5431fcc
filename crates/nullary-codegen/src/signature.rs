//! Loop signatures
//!
//! A signature names one generated kernel: the output array's data type and,
//! when the callback returns a different type, the callback's data type. Its
//! textual form is `<out>` or `<out>_as_<callback>` using one-letter
//! character codes, e.g. `d`, `d_as_f`, `c_as_z`. File names, include lines,
//! C symbol names, and manifest entries are all derived from that text.

use nullary_dtypes::DType;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::casts::safe_sources;
use crate::config::GeneratorConfig;
use crate::error::{CodegenError, Result};

const CAST_SEPARATOR: &str = "_as_";

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    output: DType,
    callback: Option<DType>,
}

impl Signature {
    /// Kernel whose callback returns the output type itself.
    pub const fn plain(output: DType) -> Self {
        Self { output, callback: None }
    }

    /// Kernel whose callback value of type `callback` is converted into `output`.
    pub const fn cast(output: DType, callback: DType) -> Self {
        Self {
            output,
            callback: Some(callback),
        }
    }

    pub const fn output(&self) -> DType {
        self.output
    }

    /// Explicit callback type, `None` for plain signatures.
    pub const fn callback(&self) -> Option<DType> {
        self.callback
    }

    /// Type actually returned by the callback.
    pub fn effective_callback(&self) -> DType {
        self.callback.unwrap_or(self.output)
    }

    pub const fn is_cast(&self) -> bool {
        self.callback.is_some()
    }

    /// Every data type named by the signature.
    pub fn dtypes(&self) -> impl Iterator<Item = DType> {
        std::iter::once(self.output).chain(self.callback)
    }

    fn sort_key(&self) -> (char, Option<char>) {
        (self.output.char_code(), self.callback.map(|dt| dt.char_code()))
    }
}

// Orders exactly like the textual forms: `c` < `c_as_b` < `c_as_z` < `d`.
impl Ord for Signature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Signature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.callback {
            Some(callback) => write!(
                f,
                "{}{}{}",
                self.output.char_code(),
                CAST_SEPARATOR,
                callback.char_code()
            ),
            None => write!(f, "{}", self.output.char_code()),
        }
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

fn parse_char(s: &str, text: &str) -> Result<DType> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => DType::from_char(ch).ok_or_else(|| CodegenError::InvalidSignature(text.to_string())),
        _ => Err(CodegenError::InvalidSignature(text.to_string())),
    }
}

/// Parses hand-written signatures such as configured special loops.
impl FromStr for Signature {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(CAST_SEPARATOR) {
            Some((output, callback)) => Ok(Self::cast(parse_char(output, s)?, parse_char(callback, s)?)),
            None => Ok(Self::plain(parse_char(s, s)?)),
        }
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Generate the sorted list of loop signatures for a set of supported data types.
///
/// For every output type the plain signature is emitted, followed by one cast
/// signature per other supported type that safely casts into it. The type's own
/// "self" cast entry adds the configured precision-widening kernels instead.
/// Configured special signatures are merged in before sorting.
///
/// # Errors
///
/// [`CodegenError::DuplicateSignature`] if the merged list names a kernel twice.
pub fn signatures(supported: &[DType], config: &GeneratorConfig) -> Result<Vec<Signature>> {
    let mut out = Vec::new();

    for &t1 in supported {
        out.push(Signature::plain(t1));

        for t2 in safe_sources(t1, supported, &config.excluded) {
            if t2 == t1 {
                for widening in &config.precision_widening {
                    if widening.narrow == t1 && supported.contains(&widening.wide) {
                        out.push(Signature::cast(t1, widening.wide));
                    }
                }
                continue;
            }
            out.push(Signature::cast(t1, t2));
        }
    }

    out.extend(config.special_signatures.iter().copied());
    out.sort();

    if let Some(pair) = out.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(CodegenError::DuplicateSignature(pair[0].to_string()));
    }

    Ok(out)
}
