// Dictionary build pipeline: download, parse, normalize, filter, write

pub mod processing;

use serde::Serialize;
use std::time::Instant;
use tracing::{error, info, info_span, Instrument};

use crate::app::BuildDictionaryUseCase;
use crate::config::DictionaryConfig;
use crate::observability::metrics;
use crate::types::BuildReport;

/// Result of running the pipeline over every configured dictionary.
#[derive(Debug, Default, Serialize)]
pub struct PipelineResult {
    pub total: usize,
    pub reports: Vec<BuildReport>,
    /// `(dictionary, error)` for each dictionary that failed.
    pub errors: Vec<(String, String)>,
}

impl PipelineResult {
    pub fn succeeded(&self) -> usize {
        self.reports.len()
    }

    pub fn is_success(&self) -> bool {
        self.succeeded() == self.total
    }
}

pub struct Pipeline;

impl Pipeline {
    /// Build each dictionary in order. A failure is logged and recorded; the
    /// remaining dictionaries still run.
    pub async fn run(use_case: &BuildDictionaryUseCase, dictionaries: &[DictionaryConfig]) -> PipelineResult {
        let mut result = PipelineResult {
            total: dictionaries.len(),
            ..PipelineResult::default()
        };

        for dict in dictionaries {
            let span = info_span!("dictionary", name = %dict.name);
            let started = Instant::now();
            info!(parent: &span, "=== Processing {} ===", dict.name);

            match use_case.build(dict).instrument(span.clone()).await {
                Ok(report) => {
                    metrics::pipeline::dictionary_finished(&dict.name, true, started.elapsed().as_secs_f64());
                    result.reports.push(report);
                }
                Err(e) => {
                    metrics::pipeline::dictionary_finished(&dict.name, false, started.elapsed().as_secs_f64());
                    error!(parent: &span, "Failed to build {}: {}", dict.name, e);
                    result.errors.push((dict.name.clone(), e.to_string()));
                }
            }
        }

        info!(
            "=== Completed: {}/{} dictionaries processed ===",
            result.succeeded(),
            result.total
        );
        result
    }
}
