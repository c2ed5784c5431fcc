//! Generator configuration
//!
//! Everything a generation run depends on besides the type registry and the
//! files it reads is collected into one immutable [`GeneratorConfig`], built
//! once at process start and passed by reference into every phase.

use chrono::Datelike;
use nullary_dtypes::DType;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{CodegenError, Result};
use crate::signature::Signature;

const YEAR_VAR: &str = "NULLARY_LOOPS_YEAR";

/// Locations of every file and directory a run reads or writes, relative to a package root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLayout {
    /// Directory receiving one `<signature>.h` per loop
    pub include_dir: PathBuf,
    /// Directory receiving one `<signature>.c` per loop
    pub src_dir: PathBuf,
    /// Umbrella header including every loop header
    pub umbrella_header: PathBuf,
    pub manifest: PathBuf,
    pub readme: PathBuf,
    /// Directory holding `header.txt`, `source.txt`, and `docs.txt`
    pub templates_dir: PathBuf,
}

impl PackageLayout {
    pub fn for_package(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let include_base = root.join("include").join("stdlib").join("strided").join("base");
        Self {
            include_dir: include_base.join("nullary"),
            src_dir: root.join("src"),
            umbrella_header: include_base.join("nullary.h"),
            manifest: root.join("manifest.json"),
            readme: root.join("README.md"),
            templates_dir: root.join("scripts").join("templates"),
        }
    }
}

/// C macro names used by generated loop sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopMacroNames {
    pub default: String,
    pub no_cast: String,
    pub return_cast: String,
}

impl Default for LoopMacroNames {
    fn default() -> Self {
        Self {
            default: "STDLIB_STRIDED_NULLARY_LOOP_CLBK".to_string(),
            no_cast: "STDLIB_STRIDED_NULLARY_LOOP_CLBK_RET_NOCAST".to_string(),
            return_cast: "STDLIB_STRIDED_NULLARY_LOOP_CLBK_RET_CAST_FCN".to_string(),
        }
    }
}

/// A kernel storing `narrow` values whose callback intentionally returns the wider `wide` type.
///
/// Such kernels are not safe casts, so the cast table cannot produce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecisionWidening {
    pub narrow: DType,
    pub wide: DType,
}

impl PrecisionWidening {
    pub const fn new(narrow: DType, wide: DType) -> Self {
        Self { narrow, wide }
    }

    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(DType::Float32, DType::Float64),
            Self::new(DType::Complex64, DType::Complex128),
        ]
    }
}

/// Immutable configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub layout: PackageLayout,
    /// Data types never given loops
    pub excluded: Vec<DType>,
    /// Hand-maintained signatures merged into the generated list
    pub special_signatures: Vec<Signature>,
    pub precision_widening: Vec<PrecisionWidening>,
    pub macros: LoopMacroNames,
    pub copyright: String,
    pub year: i32,
    /// Element count used by documentation examples
    pub example_len: usize,
    /// Prefix of umbrella header include paths, e.g. `nullary/`
    pub include_prefix: String,
    /// Prefix of manifest source paths, e.g. `./src/`
    pub manifest_src_prefix: String,
}

impl GeneratorConfig {
    /// Default configuration for a package rooted at `root`, stamped with the current year.
    pub fn for_package(root: impl AsRef<Path>) -> Self {
        Self {
            layout: PackageLayout::for_package(root),
            excluded: vec![DType::Binary, DType::Generic, DType::Uint8c],
            special_signatures: Vec::new(),
            precision_widening: PrecisionWidening::defaults(),
            macros: LoopMacroNames::default(),
            copyright: "The Stdlib Authors".to_string(),
            year: current_year(),
            example_len: 3,
            include_prefix: "nullary/".to_string(),
            manifest_src_prefix: "./src/".to_string(),
        }
    }

    /// Build a configuration using environment hints.
    ///
    /// # Environment Variables
    ///
    /// - `NULLARY_LOOPS_PACKAGE_DIR` - Package root (defaults to the working directory)
    /// - `NULLARY_LOOPS_YEAR` - Copyright year (defaults to the current year)
    ///
    /// # Errors
    ///
    /// [`CodegenError::InvalidEnv`] if `NULLARY_LOOPS_YEAR` is set but is not a year.
    pub fn from_env() -> Result<Self> {
        let root = env::var_os("NULLARY_LOOPS_PACKAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut config = Self::for_package(root);

        if let Some(value) = env::var_os(YEAR_VAR) {
            let value = value.to_string_lossy().into_owned();
            config.year = value.trim().parse().map_err(|_| CodegenError::InvalidEnv {
                name: YEAR_VAR.to_string(),
                value: value.clone(),
            })?;
        }

        Ok(config)
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_special_signatures(mut self, signatures: Vec<Signature>) -> Self {
        self.special_signatures = signatures;
        self
    }
}

/// Current calendar year in local time.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_for_package() {
        let layout = PackageLayout::for_package("/pkg");
        assert_eq!(layout.include_dir, Path::new("/pkg/include/stdlib/strided/base/nullary"));
        assert_eq!(layout.umbrella_header, Path::new("/pkg/include/stdlib/strided/base/nullary.h"));
        assert_eq!(layout.src_dir, Path::new("/pkg/src"));
        assert_eq!(layout.templates_dir, Path::new("/pkg/scripts/templates"));
    }

    #[test]
    fn test_default_exclusions() {
        let config = GeneratorConfig::for_package("/pkg");
        assert_eq!(config.excluded, vec![DType::Binary, DType::Generic, DType::Uint8c]);
        assert_eq!(config.example_len, 3);
        assert!(config.special_signatures.is_empty());
        assert!(config.year >= 2024);
    }

    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn from_env_with_year(year: Option<&str>) -> Result<GeneratorConfig> {
        let _guard = ENV_LOCK.lock().unwrap();
        match year {
            Some(year) => env::set_var(YEAR_VAR, year),
            None => env::remove_var(YEAR_VAR),
        }
        let config = GeneratorConfig::from_env();
        env::remove_var(YEAR_VAR);
        config
    }

    #[test]
    fn test_from_env_year() {
        assert_eq!(from_env_with_year(Some(" 2021 ")).unwrap().year, 2021);
        assert_eq!(from_env_with_year(None).unwrap().year, current_year());
    }

    #[test]
    fn test_from_env_rejects_unparseable_year() {
        let err = from_env_with_year(Some("twenty22")).unwrap_err();
        match err {
            CodegenError::InvalidEnv { name, value } => {
                assert_eq!(name, "NULLARY_LOOPS_YEAR");
                assert_eq!(value, "twenty22");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_with_year_overrides_current_year() {
        let config = GeneratorConfig::for_package("/pkg").with_year(2022);
        assert_eq!(config.year, 2022);
    }
}
