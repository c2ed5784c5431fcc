//! Loop macro selection
//!
//! Each generated source file expands one C loop macro. Which macro, and
//! which arguments it receives, depends only on the signature.

use crate::config::LoopMacroNames;
use crate::signature::Signature;
use nullary_dtypes::DType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMacroKind {
    /// Callback value assigned (implicitly converted) into the output element
    Default,
    /// Complex output whose callback already returns the storage type
    NoCast,
    /// Complex output whose callback value passes through a conversion function
    ReturnCast,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopMacro {
    pub kind: LoopMacroKind,
    pub arguments: Vec<String>,
}

impl LoopMacro {
    pub fn name<'a>(&self, names: &'a LoopMacroNames) -> &'a str {
        match self.kind {
            LoopMacroKind::Default => &names.default,
            LoopMacroKind::NoCast => &names.no_cast,
            LoopMacroKind::ReturnCast => &names.return_cast,
        }
    }

    pub fn arguments_list(&self) -> String {
        self.arguments.join(", ")
    }
}

/// Name of the C function converting a callback value into a complex output element.
///
/// Narrowing from double-precision complex uses the single canonical
/// `stdlib_complex128_to_<out>` routine; everything else uses `stdlib_<out>_from_<callback>`.
pub fn complex_cast_function(output: DType, callback: DType) -> String {
    if callback == DType::Complex128 {
        format!("stdlib_complex128_to_{}", output.name())
    } else {
        format!("stdlib_{}_from_{}", output.name(), callback.name())
    }
}

/// Resolve the loop macro and its arguments for a signature.
pub fn resolve(signature: &Signature) -> LoopMacro {
    let output = signature.output();
    let output_type = output.c_type().to_string();

    match signature.callback() {
        Some(callback) if output.is_complex() => LoopMacro {
            kind: LoopMacroKind::ReturnCast,
            arguments: vec![output_type, complex_cast_function(output, callback)],
        },
        None if output.is_complex() => LoopMacro {
            kind: LoopMacroKind::NoCast,
            arguments: vec![output_type],
        },
        _ => LoopMacro {
            kind: LoopMacroKind::Default,
            arguments: vec![output_type],
        },
    }
}
