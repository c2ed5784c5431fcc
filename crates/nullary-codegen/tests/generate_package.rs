//! Integration tests for full generation runs
//!
//! Each test copies the demo package into a scratch directory and runs the
//! generator against it.

use std::fs;
use std::path::{Path, PathBuf};

use nullary_codegen::{CodegenError, GenerationReport, Generator, GeneratorConfig, MarkerError, Result};
use tempfile::TempDir;

fn demo_package() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/strided-nullary")
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

fn scratch_package() -> (TempDir, GeneratorConfig) {
    let dir = tempfile::tempdir().unwrap();
    copy_dir(&demo_package(), dir.path());
    let config = GeneratorConfig::for_package(dir.path()).with_year(2022);
    (dir, config)
}

fn run(config: &GeneratorConfig) -> Result<GenerationReport> {
    Generator::new(config.clone()).run()
}

/// Every file under `root` with its contents, sorted by relative path.
fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, Vec<u8>)>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                out.push((path.strip_prefix(root).unwrap().to_path_buf(), fs::read(&path).unwrap()));
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

#[test]
fn test_generates_every_loop() -> Result<()> {
    let (_dir, config) = scratch_package();
    let report = run(&config)?;

    assert_eq!(report.signatures.len(), 47);
    assert_eq!(report.headers_written, 47);
    assert_eq!(report.sources_written, 47);
    assert_eq!(report.headers_removed, 0);
    assert_eq!(report.aggregators_updated, 3);

    for sig in &report.signatures {
        assert!(config.layout.include_dir.join(format!("{sig}.h")).is_file());
        assert!(config.layout.src_dir.join(format!("{sig}.c")).is_file());
    }

    let source = fs::read_to_string(config.layout.src_dir.join("c_as_z.c")).unwrap();
    assert!(source.contains("Copyright (c) 2022 The Stdlib Authors."));
    assert!(source.contains("STDLIB_STRIDED_NULLARY_LOOP_CLBK_RET_CAST_FCN( stdlib_complex64_t, stdlib_complex128_to_complex64 );"));
    assert!(!source.contains("{{"));

    let header = fs::read_to_string(config.layout.include_dir.join("d_as_f.h")).unwrap();
    assert!(header.contains("#ifndef STDLIB_STRIDED_BASE_NULLARY_D_AS_F_H"));
    Ok(())
}

#[test]
fn test_second_run_is_byte_identical() -> Result<()> {
    let (dir, config) = scratch_package();
    run(&config)?;
    let first = snapshot(dir.path());

    let report = run(&config)?;
    assert_eq!(report.headers_removed, 47);
    assert_eq!(report.sources_removed, 47);
    assert_eq!(snapshot(dir.path()), first);
    Ok(())
}

#[test]
fn test_hand_maintained_files_survive() -> Result<()> {
    let (_dir, config) = scratch_package();
    let macros = config.layout.include_dir.join("macros.h");
    let before = fs::read(&macros).unwrap();

    run(&config)?;

    assert_eq!(fs::read(&macros).unwrap(), before);
    assert!(config.layout.src_dir.join("Makefile").is_file());
    Ok(())
}

#[test]
fn test_stale_loops_are_removed() -> Result<()> {
    let (_dir, config) = scratch_package();
    let stale_header = config.layout.include_dir.join("r_as_o.h");
    let stale_source = config.layout.src_dir.join("r.c");
    fs::write(&stale_header, "stale").unwrap();
    fs::write(&stale_source, "stale").unwrap();

    let report = run(&config)?;

    assert_eq!(report.headers_removed, 1);
    assert_eq!(report.sources_removed, 1);
    assert!(!stale_header.exists());
    assert!(!stale_source.exists());
    Ok(())
}

#[test]
fn test_missing_output_directories_are_created() -> Result<()> {
    let (_dir, config) = scratch_package();
    fs::remove_dir_all(&config.layout.src_dir).unwrap();
    fs::remove_dir_all(&config.layout.include_dir).unwrap();

    let report = run(&config)?;

    assert_eq!(report.headers_removed, 0);
    assert_eq!(report.sources_removed, 0);
    assert_eq!(fs::read_dir(&config.layout.src_dir).unwrap().count(), 47);
    assert_eq!(fs::read_dir(&config.layout.include_dir).unwrap().count(), 47);
    Ok(())
}

#[test]
fn test_aggregators_list_generated_loops() -> Result<()> {
    let (_dir, config) = scratch_package();
    run(&config)?;

    let umbrella = fs::read_to_string(&config.layout.umbrella_header).unwrap();
    assert!(umbrella.contains("// BEGIN LOOPS\n#include \"nullary/b.h\"\n\n#include \"nullary/c.h\"\n#include \"nullary/c_as_b.h\"\n"));
    assert!(umbrella.contains("#include \"nullary/z_as_u.h\"\n// END LOOPS\n\n#endif"));
    assert!(umbrella.starts_with("/**\n* @license Apache-2.0"));

    let manifest: serde_json::Value = serde_json::from_str(&fs::read_to_string(&config.layout.manifest).unwrap()).unwrap();
    let src = manifest["confs"][0]["src"].as_array().unwrap();
    assert_eq!(src.len(), 47);
    assert_eq!(src[0], "./src/b.c");
    assert_eq!(src[46], "./src/z_as_u.c");
    assert_eq!(manifest["confs"][0]["include"][0], "./include");

    let readme = fs::read_to_string(&config.layout.readme).unwrap();
    assert!(readme.contains("<!-- charcodes -->\n\n-   **x**: `bool` (boolean values).\n"));
    assert!(readme.contains("-   **b**: `uint8` (unsigned 8-bit integers).\n\n<!-- ./charcodes -->"));
    assert!(readme.contains("#### stdlib_strided_x( \\*arrays\\[], \\*shape, \\*strides, \\*fcn )"));
    assert!(readme.contains("#include <stdint.h>\n#include <stdbool.h>\n"));
    assert!(readme.ends_with("<!-- /.usage -->\n"));
    Ok(())
}

#[test]
fn test_missing_marker_fails() {
    let (_dir, config) = scratch_package();
    let umbrella = fs::read_to_string(&config.layout.umbrella_header).unwrap();
    fs::write(&config.layout.umbrella_header, umbrella.replace("// END LOOPS\n", "")).unwrap();

    let err = run(&config).unwrap_err();
    match err {
        CodegenError::MalformedAggregator { path, source } => {
            assert_eq!(path, config.layout.umbrella_header);
            assert_eq!(
                source,
                MarkerError::Missing {
                    marker: "// END LOOPS".to_string()
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_template_aborts_before_deleting() {
    let (_dir, config) = scratch_package();
    let stale = config.layout.include_dir.join("d.h");
    fs::write(&stale, "previous").unwrap();
    fs::remove_file(config.layout.templates_dir.join("docs.txt")).unwrap();

    let err = run(&config).unwrap_err();
    assert!(matches!(err, CodegenError::Read { .. }));
    assert_eq!(fs::read_to_string(&stale).unwrap(), "previous");
}

#[test]
fn test_malformed_manifest_fails() {
    let (_dir, config) = scratch_package();
    fs::write(&config.layout.manifest, "{\"confs\": \"nope\"}\n").unwrap();
    assert!(matches!(run(&config), Err(CodegenError::MalformedManifest { .. })));

    fs::write(&config.layout.manifest, "{ not json").unwrap();
    assert!(matches!(run(&config), Err(CodegenError::Json { .. })));
}
