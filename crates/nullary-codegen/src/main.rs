use nullary_codegen::{Generator, GeneratorConfig};
use nullary_tracing::{error, init_global_tracing, TracingConfig};

fn main() {
    if let Err(e) = init_global_tracing(&TracingConfig::from_env()) {
        eprintln!("Warning: {e}");
    }

    let result = GeneratorConfig::from_env().and_then(|config| Generator::new(config).run());
    if let Err(e) = result {
        error!(error = %e, "loop generation failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
