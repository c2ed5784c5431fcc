//! Per-signature template rendering
//!
//! Derives every placeholder value for one signature and fills the header,
//! source, and documentation templates. Rendering reads nothing but its
//! arguments, so identical inputs always produce identical text.

use nullary_dtypes::DType;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::loop_macro::{self, LoopMacro};
use crate::signature::Signature;
use crate::template::Templates;

/// Header lines needed by code mentioning `dtypes`, in a fixed order.
pub fn type_includes(dtypes: &[DType]) -> Vec<&'static str> {
    let mut out = Vec::new();
    if dtypes.contains(&DType::Complex64) {
        out.push("#include \"stdlib/complex/float32/ctor.h\"");
    }
    if dtypes.contains(&DType::Complex128) {
        out.push("#include \"stdlib/complex/float64/ctor.h\"");
    }
    if dtypes.contains(&DType::Bool) {
        out.push("#include <stdbool.h>");
    }
    out
}

fn join_includes(lines: &[&str], separator: &str) -> String {
    if lines.is_empty() {
        String::new()
    } else {
        format!("{separator}{}", lines.join(separator))
    }
}

/// Body of the example callback for a callback return type.
pub fn callback_body(dtype: DType) -> &'static str {
    match dtype {
        DType::Complex64 | DType::Complex128 => "// ...",
        DType::Bool => "return true;",
        DType::Float64 => "return 3.0;",
        DType::Float32 => "return 3.0f;",
        _ => "return 3;",
    }
}

/// Zero-filled example byte buffer contents for `len` elements of `dtype`.
pub fn example_bytes(dtype: DType, len: usize) -> String {
    vec!["0"; len * dtype.bytes_per_element()].join(", ")
}

/// Values derived from one signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub signature: Signature,
    pub output: DType,
    pub callback: DType,
    pub example_len: usize,
    pub loop_macro: LoopMacro,
}

impl RenderContext {
    pub fn new(signature: Signature, config: &GeneratorConfig) -> Self {
        Self {
            signature,
            output: signature.output(),
            callback: signature.effective_callback(),
            example_len: config.example_len,
            loop_macro: loop_macro::resolve(&signature),
        }
    }

    fn example_values(&self) -> Vec<(&'static str, String)> {
        vec![
            ("SIGNATURE", self.signature.to_string()),
            ("OUTPUT_ARRAY_STRIDE", self.output.bytes_per_element().to_string()),
            ("N", self.example_len.to_string()),
            ("OUTPUT_ARRAY_BYTES", example_bytes(self.output, self.example_len)),
            ("CALLBACK_RETURN_TYPE", self.callback.c_type().to_string()),
            ("CALLBACK_BODY", callback_body(self.callback).to_string()),
        ]
    }

    /// Includes for the kernel source, covering every type the signature names.
    fn source_includes(&self) -> Vec<&'static str> {
        let dtypes: Vec<DType> = self.signature.dtypes().collect();
        type_includes(&dtypes)
    }

    /// Includes for usage examples, which only handle the callback's type.
    fn example_includes(&self) -> Vec<&'static str> {
        type_includes(&[self.callback])
    }
}

fn copyright_values(config: &GeneratorConfig) -> Vec<(&'static str, String)> {
    vec![("YEAR", config.year.to_string()), ("COPYRIGHT", config.copyright.clone())]
}

pub fn render_header(signature: Signature, templates: &Templates, config: &GeneratorConfig) -> Result<String> {
    let text = signature.to_string();
    let mut values = copyright_values(config);
    values.push(("INCLUDE_GUARD", text.to_uppercase()));
    values.push(("SIGNATURE", text));
    templates.header.render(&values)
}

pub fn render_source(signature: Signature, templates: &Templates, config: &GeneratorConfig) -> Result<String> {
    let ctx = RenderContext::new(signature, config);
    let mut values = copyright_values(config);
    values.push(("INCLUDES", join_includes(&ctx.source_includes(), "\n")));
    values.push(("EXAMPLE_INCLUDES", join_includes(&ctx.example_includes(), "\n* ")));
    values.extend(ctx.example_values());
    values.push(("LOOP_MACRO", ctx.loop_macro.name(&config.macros).to_string()));
    values.push(("LOOP_MACRO_ARGUMENTS", ctx.loop_macro.arguments_list()));
    templates.source.render(&values)
}

/// README documentation fragment for one signature.
pub fn render_doc(signature: Signature, templates: &Templates, config: &GeneratorConfig) -> Result<String> {
    let ctx = RenderContext::new(signature, config);
    let mut values = vec![("INCLUDES", join_includes(&ctx.example_includes(), "\n"))];
    values.extend(ctx.example_values());
    templates.docs.render(&values)
}
