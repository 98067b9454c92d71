use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::app::download::download_to;
use crate::app::ports::{DocumentParserPort, HttpClientPort, OutputPort};
use crate::config::DictionaryConfig;
use crate::error::{BuilderError, Result};
use crate::observability::metrics;
use crate::pipeline::processing::{KeyFilter, NormalizeSummary, TextNormalizer};
use crate::types::{BuildReport, SourceFormat, Tree};

/// Use case for turning one dictionary source into a hover asset:
/// download, parse, clean strings, filter keys, write compact JSON.
pub struct BuildDictionaryUseCase {
    http: Arc<dyn HttpClientPort>,
    cif_parser: Box<dyn DocumentParserPort>,
    json_parser: Box<dyn DocumentParserPort>,
    normalizer: TextNormalizer,
    filter: Option<KeyFilter>,
    output: Box<dyn OutputPort>,
}

/// A tree after the processing stages, with what they did to it.
#[derive(Debug)]
pub struct ProcessedTree {
    pub tree: Tree,
    pub summary: NormalizeSummary,
    pub keys_removed: usize,
}

impl BuildDictionaryUseCase {
    pub fn new(
        http: Arc<dyn HttpClientPort>,
        cif_parser: Box<dyn DocumentParserPort>,
        json_parser: Box<dyn DocumentParserPort>,
        filter: Option<KeyFilter>,
        output: Box<dyn OutputPort>,
    ) -> Self {
        Self {
            http,
            cif_parser,
            json_parser,
            normalizer: TextNormalizer,
            filter,
            output,
        }
    }

    fn parser_for(&self, format: SourceFormat) -> &dyn DocumentParserPort {
        match format {
            SourceFormat::Cif => self.cif_parser.as_ref(),
            SourceFormat::Json => self.json_parser.as_ref(),
        }
    }

    /// Clean every string, then drop unneeded keys.
    pub fn process(&self, tree: Tree) -> ProcessedTree {
        info!("Cleaning strings...");
        let (tree, summary) = self.normalizer.normalize_with_summary(tree);
        metrics::normalize::tree_normalized(&summary);
        info!(
            "Cleaned {} strings ({} prose / {} structured paragraphs)",
            summary.strings_cleaned, summary.prose_paragraphs, summary.structured_paragraphs
        );

        let (tree, keys_removed) = match &self.filter {
            Some(filter) => {
                info!("Filtering unnecessary metadata ({:?} mode)...", filter.mode());
                let (tree, removed) = filter.apply(tree);
                metrics::filter::keys_removed(removed);
                (tree, removed)
            }
            None => (tree, 0),
        };

        ProcessedTree {
            tree,
            summary,
            keys_removed,
        }
    }

    /// Build one configured dictionary end to end.
    #[instrument(skip(self, dict), fields(dictionary = %dict.name))]
    pub async fn build(&self, dict: &DictionaryConfig) -> Result<BuildReport> {
        let downloaded = match &dict.url {
            Some(url) => {
                info!("Downloading from {}...", url);
                download_to(self.http.as_ref(), url, &dict.local_path).await?;
                true
            }
            None => {
                if !dict.local_path.exists() {
                    return Err(BuilderError::Config(format!(
                        "dictionary '{}' has no url and {} does not exist",
                        dict.name,
                        dict.local_path.display()
                    )));
                }
                false
            }
        };

        info!("Parsing dictionary ({:?})...", dict.format);
        let tree = self.parser_for(dict.format).parse(&dict.local_path).await?;

        let report = self.finish(&dict.name, tree, &dict.output_path).await?;

        if downloaded {
            if let Err(e) = tokio::fs::remove_file(&dict.local_path).await {
                warn!("Failed to remove {}: {}", dict.local_path.display(), e);
            }
        }

        Ok(report)
    }

    /// Clean and filter an already-parsed JSON tree on disk. No network.
    #[instrument(skip(self))]
    pub async fn clean_file(&self, input: &Path, output: &Path) -> Result<BuildReport> {
        let tree = self.json_parser.parse(input).await?;
        let name = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("dictionary")
            .to_string();
        self.finish(&name, tree, output).await
    }

    async fn finish(&self, name: &str, tree: Tree, output_path: &Path) -> Result<BuildReport> {
        let processed = self.process(tree);

        info!("Saving to {}...", output_path.display());
        let written = self.output.write_tree(output_path, &processed.tree).await?;

        let report = BuildReport {
            name: name.to_string(),
            output_path: output_path.to_path_buf(),
            bytes_written: written.bytes_written,
            sha256: written.sha256,
            strings_cleaned: processed.summary.strings_cleaned,
            keys_removed: processed.keys_removed,
            built_at: Utc::now(),
        };
        info!("Done. Output size: {:.2} MB", report.size_mib());
        Ok(report)
    }
}
