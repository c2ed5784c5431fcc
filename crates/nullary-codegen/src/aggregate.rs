//! Aggregator rewrites
//!
//! The umbrella header, the build manifest, and the README each list the
//! generated loops. Only their marker-delimited (or keyed) part is replaced.

use std::fs;
use std::path::Path;

use nullary_dtypes::DType;
use serde_json::Value;

use crate::config::GeneratorConfig;
use crate::error::{CodegenError, Result};
use crate::markers::{MarkedRegion, MarkerError};
use crate::signature::Signature;

pub const UMBRELLA_BEGIN: &str = "// BEGIN LOOPS";
pub const UMBRELLA_END: &str = "// END LOOPS";
pub const CHARCODES_BEGIN: &str = "<!-- charcodes -->";
pub const CHARCODES_END: &str = "<!-- ./charcodes -->";
pub const LOOPS_BEGIN: &str = "<!-- loops -->";
pub const LOOPS_END: &str = "<!-- ./loops -->";

/// Include lines for the umbrella header, grouped by output type with a blank line between groups.
pub fn umbrella_body(signatures: &[Signature], include_prefix: &str) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(signatures.len());
    let mut previous: Option<DType> = None;
    for sig in signatures {
        if previous.is_some_and(|output| output != sig.output()) {
            lines.push(String::new());
        }
        previous = Some(sig.output());
        lines.push(format!("#include \"{include_prefix}{sig}.h\""));
    }
    let mut body = lines.join("\n");
    body.push('\n');
    body
}

fn marked<'a>(path: &Path, text: &'a str, begin: &str, end: &str) -> Result<MarkedRegion<'a>> {
    MarkedRegion::parse(text, begin, end).map_err(|source| malformed(path, source))
}

fn malformed(path: &Path, source: MarkerError) -> CodegenError {
    CodegenError::MalformedAggregator {
        path: path.to_path_buf(),
        source,
    }
}

/// Replace the loop includes of umbrella header `text`.
pub fn update_umbrella(path: &Path, text: &str, signatures: &[Signature], config: &GeneratorConfig) -> Result<String> {
    let region = marked(path, text, UMBRELLA_BEGIN, UMBRELLA_END)?;
    Ok(region.with_region(&umbrella_body(signatures, &config.include_prefix)))
}

/// Source paths listed by the manifest's first configuration.
pub fn manifest_sources(signatures: &[Signature], prefix: &str) -> Vec<Value> {
    signatures
        .iter()
        .map(|sig| Value::String(format!("{prefix}{sig}.c")))
        .collect()
}

/// Replace `confs[0].src` of `manifest`, leaving every other key in place.
pub fn update_manifest(path: &Path, manifest: &mut Value, signatures: &[Signature], config: &GeneratorConfig) -> Result<()> {
    let bad = |reason: &str| CodegenError::MalformedManifest {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let conf = manifest
        .get_mut("confs")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| bad("missing `confs` array"))?
        .first_mut()
        .and_then(Value::as_object_mut)
        .ok_or_else(|| bad("`confs` has no configuration object"))?;

    let src = conf.get_mut("src").ok_or_else(|| bad("first configuration has no `src`"))?;
    *src = Value::Array(manifest_sources(signatures, &config.manifest_src_prefix));
    Ok(())
}

/// Manifest text in the package's canonical form: two-space indentation and a trailing newline.
pub fn manifest_text(manifest: &Value) -> std::result::Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(manifest)?;
    text.push('\n');
    Ok(text)
}

/// One README bullet per supported data type.
pub fn charcode_list(supported: &[DType]) -> String {
    let bullets: Vec<String> = supported
        .iter()
        .map(|dt| format!("-   **{}**: `{}` ({}).", dt.char_code(), dt.name(), dt.description()))
        .collect();
    format!("\n{}\n\n", bullets.join("\n"))
}

/// Replace both the character-code list and the loop documentation of README `text`.
pub fn update_readme(path: &Path, text: &str, supported: &[DType], docs: &[String]) -> Result<String> {
    let region = marked(path, text, CHARCODES_BEGIN, CHARCODES_END)?;
    let text = region.with_region(&charcode_list(supported));

    let region = marked(path, &text, LOOPS_BEGIN, LOOPS_END)?;
    Ok(region.with_region(&format!("\n{}\n", docs.join("\n"))))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CodegenError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| CodegenError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn rewrite_umbrella(signatures: &[Signature], config: &GeneratorConfig) -> Result<()> {
    let path = &config.layout.umbrella_header;
    let text = read(path)?;
    write(path, &update_umbrella(path, &text, signatures, config)?)
}

pub fn rewrite_manifest(signatures: &[Signature], config: &GeneratorConfig) -> Result<()> {
    let path = &config.layout.manifest;
    let json_error = |source| CodegenError::Json {
        path: path.to_path_buf(),
        source,
    };

    let mut manifest: Value = serde_json::from_str(&read(path)?).map_err(json_error)?;
    update_manifest(path, &mut manifest, signatures, config)?;
    write(path, &manifest_text(&manifest).map_err(json_error)?)
}

pub fn rewrite_readme(supported: &[DType], docs: &[String], config: &GeneratorConfig) -> Result<()> {
    let path = &config.layout.readme;
    let text = read(path)?;
    write(path, &update_readme(path, &text, supported, docs)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use DType::*;

    fn config() -> GeneratorConfig {
        GeneratorConfig::for_package("/pkg").with_year(2022)
    }

    fn sigs(text: &[&str]) -> Vec<Signature> {
        text.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_umbrella_body_groups_by_output() {
        let body = umbrella_body(&sigs(&["b", "c", "c_as_b", "d", "d_as_f"]), "nullary/");
        insta::assert_snapshot!(body, @r###"
        #include "nullary/b.h"

        #include "nullary/c.h"
        #include "nullary/c_as_b.h"

        #include "nullary/d.h"
        #include "nullary/d_as_f.h"
        "###);
    }

    #[test]
    fn test_update_umbrella_keeps_surroundings() {
        let text = "#ifndef X\n#include \"nullary/macros.h\"\n\n// BEGIN LOOPS\n#include \"nullary/q.h\"\n// END LOOPS\n\n#endif\n";
        let out = update_umbrella(Path::new("nullary.h"), text, &sigs(&["d", "f"]), &config()).unwrap();
        assert_eq!(
            out,
            "#ifndef X\n#include \"nullary/macros.h\"\n\n// BEGIN LOOPS\n#include \"nullary/d.h\"\n\n#include \"nullary/f.h\"\n// END LOOPS\n\n#endif\n"
        );
    }

    #[test]
    fn test_update_umbrella_without_markers() {
        let err = update_umbrella(Path::new("nullary.h"), "#endif\n", &sigs(&["d"]), &config()).unwrap_err();
        match err {
            CodegenError::MalformedAggregator { path, source } => {
                assert_eq!(path, Path::new("nullary.h"));
                assert_eq!(source, MarkerError::Missing { marker: UMBRELLA_BEGIN.to_string() });
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_manifest_five_sources_become_three() {
        let mut manifest = json!({
            "options": {"task": "build"},
            "fields": [],
            "confs": [{
                "task": "build",
                "src": ["./src/a.c", "./src/b.c", "./src/c.c", "./src/d.c", "./src/e.c"],
                "include": ["./include"],
            }],
        });
        update_manifest(Path::new("manifest.json"), &mut manifest, &sigs(&["c", "d", "d_as_f"]), &config()).unwrap();

        assert_eq!(
            manifest["confs"][0]["src"],
            json!(["./src/c.c", "./src/d.c", "./src/d_as_f.c"])
        );
        assert_eq!(manifest["confs"][0]["include"], json!(["./include"]));
        assert_eq!(manifest["options"], json!({"task": "build"}));

        let keys: Vec<&String> = manifest["confs"][0].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["task", "src", "include"]);
    }

    #[test]
    fn test_manifest_text_format() {
        let text = manifest_text(&json!({"confs": [{"src": ["./src/d.c"]}]})).unwrap();
        assert_eq!(text, "{\n  \"confs\": [\n    {\n      \"src\": [\n        \"./src/d.c\"\n      ]\n    }\n  ]\n}\n");
    }

    #[test]
    fn test_manifest_without_confs() {
        let mut manifest = json!({"options": {}});
        let err = update_manifest(Path::new("manifest.json"), &mut manifest, &[], &config()).unwrap_err();
        assert!(matches!(err, CodegenError::MalformedManifest { .. }));

        let mut manifest = json!({"confs": []});
        let err = update_manifest(Path::new("manifest.json"), &mut manifest, &[], &config()).unwrap_err();
        assert!(matches!(err, CodegenError::MalformedManifest { .. }));

        let mut manifest = json!({"confs": [{"task": "build"}]});
        let err = update_manifest(Path::new("manifest.json"), &mut manifest, &[], &config()).unwrap_err();
        assert!(matches!(err, CodegenError::MalformedManifest { ref reason, .. } if reason.contains("src")));
    }

    #[test]
    fn test_charcode_list() {
        assert_eq!(
            charcode_list(&[Bool, Float64]),
            "\n-   **x**: `bool` (boolean values).\n-   **d**: `float64` (double-precision floating-point numbers).\n\n"
        );
    }

    #[test]
    fn test_update_readme_regions() {
        let text = "# nullary\n\n<!-- charcodes -->\nold list\n<!-- ./charcodes -->\n\n## Loops\n\n<!-- loops -->\nold docs\n<!-- ./loops -->\n\n<section class=\"links\">\n";
        let docs = vec!["#### d\n".to_string(), "#### f\n".to_string()];
        let out = update_readme(Path::new("README.md"), text, &[Float64], &docs).unwrap();
        assert_eq!(
            out,
            "# nullary\n\n<!-- charcodes -->\n\n-   **d**: `float64` (double-precision floating-point numbers).\n\n<!-- ./charcodes -->\n\n## Loops\n\n<!-- loops -->\n\n#### d\n\n#### f\n\n<!-- ./loops -->\n\n<section class=\"links\">\n"
        );
    }

    #[test]
    fn test_update_readme_requires_both_regions() {
        let text = "<!-- charcodes -->\n<!-- ./charcodes -->\n";
        let err = update_readme(Path::new("README.md"), text, &[Float64], &[]).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::MalformedAggregator {
                source: MarkerError::Missing { .. },
                ..
            }
        ));
    }
}
