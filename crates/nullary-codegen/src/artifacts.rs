//! Per-signature output files

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::{CodegenError, Result};
use crate::render;
use crate::signature::Signature;
use crate::template::Templates;

/// Whether `name` looks like a generated loop file: `x.h`, `x.c`, `x_as_y.h`, or `x_as_y.c`.
pub fn is_loop_file_name(name: &str) -> bool {
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    if ext != "h" && ext != "c" {
        return false;
    }
    let is_code = |s: &str| s.len() == 1 && s.bytes().all(|b| b.is_ascii_lowercase());
    match stem.split_once("_as_") {
        Some((output, callback)) => is_code(output) && is_code(callback),
        None => is_code(stem),
    }
}

/// Delete every generated loop file in `dir`, returning how many were removed.
///
/// Hand-maintained files, subdirectories, and a missing directory are left alone.
pub fn clear_loop_files(dir: &Path) -> Result<usize> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(source) => {
            return Err(CodegenError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CodegenError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if is_file && entry.file_name().to_str().is_some_and(is_loop_file_name) {
            paths.push(entry.path());
        }
    }
    paths.sort();

    for path in &paths {
        fs::remove_file(path).map_err(|source| CodegenError::Remove {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "removed stale loop file");
    }
    Ok(paths.len())
}

fn write_all<F>(dir: &Path, extension: &str, signatures: &[Signature], render: F) -> Result<usize>
where
    F: Fn(Signature) -> Result<String>,
{
    fs::create_dir_all(dir).map_err(|source| CodegenError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    for &sig in signatures {
        let path = dir.join(format!("{sig}.{extension}"));
        let text = render(sig)?;
        fs::write(&path, text).map_err(|source| CodegenError::Write { path, source })?;
    }
    Ok(signatures.len())
}

/// Write `<signature>.h` for every signature into the include directory.
pub fn write_headers(signatures: &[Signature], templates: &Templates, config: &GeneratorConfig) -> Result<usize> {
    write_all(&config.layout.include_dir, "h", signatures, |sig| {
        render::render_header(sig, templates, config)
    })
}

/// Write `<signature>.c` for every signature into the source directory.
pub fn write_sources(signatures: &[Signature], templates: &Templates, config: &GeneratorConfig) -> Result<usize> {
    write_all(&config.layout.src_dir, "c", signatures, |sig| {
        render::render_source(sig, templates, config)
    })
}
