//! Strided Nullary Loop Generator
//!
//! Generates the typed C kernels of a strided nullary package: one header and
//! one source per loop signature, plus the umbrella header, manifest, and
//! README sections that list them.
//!
//! A run derives the supported data types from the registry, expands them into
//! a sorted signature list, renders each signature through the package's
//! templates, and rewrites the marker-delimited regions of the aggregators.
//!
//! ```
//! use nullary_codegen::{signatures, GeneratorConfig};
//! use nullary_dtypes::DType;
//!
//! let config = GeneratorConfig::for_package(".");
//! let sigs = signatures(&[DType::Float32, DType::Float64], &config).unwrap();
//! let text: Vec<String> = sigs.iter().map(|s| s.to_string()).collect();
//! assert_eq!(text, ["d", "d_as_f", "f", "f_as_d"]);
//! ```

pub mod aggregate;
pub mod artifacts;
pub mod casts;
pub mod config;
pub mod error;
pub mod filter;
pub mod generator;
pub mod loop_macro;
pub mod markers;
pub mod render;
pub mod signature;
pub mod template;

pub use config::{GeneratorConfig, LoopMacroNames, PackageLayout, PrecisionWidening};
pub use error::{CodegenError, Result};
pub use generator::{GenerationReport, Generator};
pub use loop_macro::{LoopMacro, LoopMacroKind};
pub use markers::{MarkedRegion, MarkerError};
pub use signature::{signatures, Signature};
pub use template::{Template, Templates};
