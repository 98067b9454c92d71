//! Metrics for the dictionary build.
//!
//! Recording is a no-op until [`init`] installs the Prometheus recorder, so
//! library code and tests can call these freely.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::error::{BuilderError, Result};

/// All metric names used in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    FetchDownloadsSuccess,
    FetchDownloadsError,
    FetchBytes,
    FetchDuration,
    NormalizeStringsCleaned,
    NormalizeProseParagraphs,
    NormalizeStructuredParagraphs,
    FilterKeysRemoved,
    OutputAssetsWritten,
    OutputBytes,
    PipelineDictionariesSuccess,
    PipelineDictionariesError,
    PipelineDuration,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::FetchDownloadsSuccess => "dict_fetch_downloads_success_total",
            MetricName::FetchDownloadsError => "dict_fetch_downloads_error_total",
            MetricName::FetchBytes => "dict_fetch_bytes",
            MetricName::FetchDuration => "dict_fetch_duration_seconds",
            MetricName::NormalizeStringsCleaned => "dict_normalize_strings_cleaned_total",
            MetricName::NormalizeProseParagraphs => "dict_normalize_prose_paragraphs_total",
            MetricName::NormalizeStructuredParagraphs => "dict_normalize_structured_paragraphs_total",
            MetricName::FilterKeysRemoved => "dict_filter_keys_removed_total",
            MetricName::OutputAssetsWritten => "dict_output_assets_written_total",
            MetricName::OutputBytes => "dict_output_bytes",
            MetricName::PipelineDictionariesSuccess => "dict_pipeline_dictionaries_success_total",
            MetricName::PipelineDictionariesError => "dict_pipeline_dictionaries_error_total",
            MetricName::PipelineDuration => "dict_pipeline_duration_seconds",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Install the Prometheus recorder. Call once per process.
pub fn init() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| BuilderError::Config(format!("Failed to install Prometheus recorder: {}", e)))?;
    info!("Metrics recorder installed");
    Ok(handle)
}

/// Write the current exposition text to `path` (node-exporter textfile style).
pub fn write_snapshot(handle: &PrometheusHandle, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, handle.render())?;
    info!("Wrote metrics snapshot to {}", path.display());
    Ok(())
}

pub mod fetch {
    use super::MetricName;

    pub fn download_succeeded(bytes: u64, duration_secs: f64) {
        ::metrics::counter!(MetricName::FetchDownloadsSuccess.as_str()).increment(1);
        ::metrics::histogram!(MetricName::FetchBytes.as_str()).record(bytes as f64);
        ::metrics::histogram!(MetricName::FetchDuration.as_str()).record(duration_secs);
    }

    pub fn download_failed() {
        ::metrics::counter!(MetricName::FetchDownloadsError.as_str()).increment(1);
    }
}

pub mod normalize {
    use super::MetricName;
    use crate::pipeline::processing::NormalizeSummary;

    pub fn tree_normalized(summary: &NormalizeSummary) {
        ::metrics::counter!(MetricName::NormalizeStringsCleaned.as_str())
            .increment(summary.strings_cleaned as u64);
        ::metrics::counter!(MetricName::NormalizeProseParagraphs.as_str())
            .increment(summary.prose_paragraphs as u64);
        ::metrics::counter!(MetricName::NormalizeStructuredParagraphs.as_str())
            .increment(summary.structured_paragraphs as u64);
    }
}

pub mod filter {
    use super::MetricName;

    pub fn keys_removed(count: usize) {
        ::metrics::counter!(MetricName::FilterKeysRemoved.as_str()).increment(count as u64);
    }
}

pub mod output {
    use super::MetricName;

    pub fn asset_written(bytes: u64) {
        ::metrics::counter!(MetricName::OutputAssetsWritten.as_str()).increment(1);
        ::metrics::histogram!(MetricName::OutputBytes.as_str()).record(bytes as f64);
    }
}

pub mod pipeline {
    use super::MetricName;

    pub fn dictionary_finished(name: &str, success: bool, duration_secs: f64) {
        let metric = if success {
            MetricName::PipelineDictionariesSuccess
        } else {
            MetricName::PipelineDictionariesError
        };
        ::metrics::counter!(metric.as_str(), "dictionary" => name.to_string()).increment(1);
        ::metrics::histogram!(MetricName::PipelineDuration.as_str(), "dictionary" => name.to_string())
            .record(duration_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_are_prefixed() {
        for name in [
            MetricName::FetchDownloadsSuccess,
            MetricName::NormalizeStringsCleaned,
            MetricName::PipelineDuration,
        ] {
            assert!(name.to_string().starts_with("dict_"));
        }
    }
}
