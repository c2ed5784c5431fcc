//! Text templates with `{{NAME}}` placeholders

use std::fs;
use std::path::Path;

use crate::error::{CodegenError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    text: String,
}

impl Template {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn load(name: &str, path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| CodegenError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(name, text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace every occurrence of each `{{KEY}}` with its value.
    ///
    /// # Errors
    ///
    /// [`CodegenError::UnrenderedPlaceholder`] if a placeholder remains afterwards.
    pub fn render(&self, values: &[(&str, String)]) -> Result<String> {
        let mut out = self.text.clone();
        for (key, value) in values {
            out = out.replace(&format!("{{{{{key}}}}}"), value);
        }
        match find_placeholder(&out) {
            Some(placeholder) => Err(CodegenError::UnrenderedPlaceholder {
                template: self.name.clone(),
                placeholder: placeholder.to_string(),
            }),
            None => Ok(out),
        }
    }
}

/// First `{{NAME}}` in `text` whose name is uppercase ASCII, digits, or underscores.
pub fn find_placeholder(text: &str) -> Option<&str> {
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        if let Some(end) = after.find("}}") {
            let name = &after[..end];
            let valid = !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
            if valid {
                return Some(name);
            }
        }
        rest = after;
    }
    None
}

/// The three templates a run renders.
#[derive(Debug, Clone)]
pub struct Templates {
    pub header: Template,
    pub source: Template,
    pub docs: Template,
}

impl Templates {
    /// Load `header.txt`, `source.txt`, and `docs.txt` from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            header: Template::load("header", &dir.join("header.txt"))?,
            source: Template::load("source", &dir.join("source.txt"))?,
            docs: Template::load("docs", &dir.join("docs.txt"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_every_occurrence() {
        let t = Template::new("t", "{{A}}-{{B}}-{{A}}");
        let out = t.render(&[("A", "x".to_string()), ("B", "y".to_string())]).unwrap();
        assert_eq!(out, "x-y-x");
    }

    #[test]
    fn test_unrendered_placeholder_is_error() {
        let t = Template::new("source", "int x = {{N}}; {{MISSING_ONE}}");
        let err = t.render(&[("N", "3".to_string())]).unwrap_err();
        match err {
            CodegenError::UnrenderedPlaceholder { template, placeholder } => {
                assert_eq!(template, "source");
                assert_eq!(placeholder, "MISSING_ONE");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_braces_in_c_code_are_not_placeholders() {
        assert_eq!(find_placeholder("uint8_t x[] = { {0}, {1} };"), None);
        assert_eq!(find_placeholder("{{lower}} {{ N }}"), None);
        assert_eq!(find_placeholder("{ {{OUTPUT_ARRAY_BYTES}} }"), Some("OUTPUT_ARRAY_BYTES"));
    }

    #[test]
    fn test_missing_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Templates::load(dir.path()).unwrap_err();
        assert!(matches!(err, CodegenError::Read { ref path, .. } if path.ends_with("header.txt")));
    }
}
