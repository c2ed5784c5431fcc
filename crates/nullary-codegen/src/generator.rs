//! Generation run
//!
//! One [`Generator::run`] regenerates every loop header and source of a
//! package and refreshes its aggregators. Phases run in a fixed order and the
//! first failure aborts the run; templates are loaded before anything on disk
//! is touched.

use nullary_dtypes::DType;
use nullary_tracing::timed_block;
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate;
use crate::artifacts;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::filter::supported_dtypes;
use crate::render;
use crate::signature::{self, Signature};
use crate::template::Templates;

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub supported: Vec<DType>,
    pub signatures: Vec<Signature>,
    /// Stale loop headers deleted before writing
    pub headers_removed: usize,
    /// Stale loop sources deleted before writing
    pub sources_removed: usize,
    pub headers_written: usize,
    pub sources_written: usize,
    /// Aggregator files rewritten (umbrella header, manifest, README)
    pub aggregators_updated: usize,
}

pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Data types that receive loops.
    pub fn supported(&self) -> Vec<DType> {
        supported_dtypes(DType::all(), &self.config.excluded)
    }

    /// Sorted signature list for the supported data types.
    pub fn signatures(&self) -> Result<Vec<Signature>> {
        signature::signatures(&self.supported(), &self.config)
    }

    /// Regenerate the package.
    ///
    /// A missing header or source directory is treated as empty and created
    /// when the loop files are written; it is not an error.
    #[tracing::instrument(skip(self), fields(year = self.config.year))]
    pub fn run(&self) -> Result<GenerationReport> {
        let config = &self.config;
        let supported = self.supported();
        let signatures = self.signatures()?;
        info!(
            supported = supported.len(),
            signatures = signatures.len(),
            "generating nullary loops"
        );

        let (templates, _) = timed_block!("load_templates", { Templates::load(&config.layout.templates_dir) });
        let templates = templates?;

        let (removed, _) = timed_block!("clear", { self.clear() });
        let (headers_removed, sources_removed) = removed?;

        let (headers, _) = timed_block!("headers", { artifacts::write_headers(&signatures, &templates, config) });
        let headers_written = headers?;
        let (sources, _) = timed_block!("sources", { artifacts::write_sources(&signatures, &templates, config) });
        let sources_written = sources?;

        let (updated, _) = timed_block!("aggregators", {
            self.update_aggregators(&supported, &signatures, &templates)
        });
        let aggregators_updated = updated?;

        let report = GenerationReport {
            supported,
            signatures,
            headers_removed,
            sources_removed,
            headers_written,
            sources_written,
            aggregators_updated,
        };
        if let Ok(json) = serde_json::to_string(&report) {
            debug!(report = %json, "generation report");
        }
        info!(
            headers = report.headers_written,
            sources = report.sources_written,
            removed = report.headers_removed + report.sources_removed,
            "nullary loops generated"
        );
        Ok(report)
    }

    #[tracing::instrument(skip(self))]
    fn clear(&self) -> Result<(usize, usize)> {
        let headers = artifacts::clear_loop_files(&self.config.layout.include_dir)?;
        let sources = artifacts::clear_loop_files(&self.config.layout.src_dir)?;
        debug!(headers, sources, "cleared stale loop files");
        Ok((headers, sources))
    }

    #[tracing::instrument(skip_all)]
    fn update_aggregators(&self, supported: &[DType], signatures: &[Signature], templates: &Templates) -> Result<usize> {
        let config = &self.config;

        aggregate::rewrite_umbrella(signatures, config)?;
        debug!(path = %config.layout.umbrella_header.display(), "umbrella header updated");

        aggregate::rewrite_manifest(signatures, config)?;
        debug!(path = %config.layout.manifest.display(), "manifest updated");

        let docs = signatures
            .iter()
            .map(|&sig| render::render_doc(sig, templates, config))
            .collect::<Result<Vec<_>>>()?;
        aggregate::rewrite_readme(supported, &docs, config)?;
        debug!(path = %config.layout.readme.display(), "README updated");

        Ok(3)
    }
}
