//! Strided array data type registry
//!
//! Every data type a strided kernel can be generated for is described here:
//! its full name (`float64`), its one-letter character code (`d`), its width
//! in bytes, the C type used by generated sources, a human description, and
//! the table of data types it may be safely cast to.
//!
//! ```
//! use nullary_dtypes::DType;
//!
//! let dt: DType = "float32".parse().unwrap();
//! assert_eq!(dt.char_code(), 'f');
//! assert_eq!(DType::from_char('f'), Some(dt));
//! assert!(dt.can_safely_cast_to(DType::Float64));
//! ```

pub mod casts;
pub mod dtype;

pub use dtype::{DType, ParseDTypeError};
