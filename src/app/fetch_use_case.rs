use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::app::download::download_to;
use crate::app::ports::HttpClientPort;
use crate::types::FetchReport;

/// Use case for pulling prebuilt hover assets from a release location
/// instead of building them locally.
pub struct FetchAssetsUseCase {
    http: Arc<dyn HttpClientPort>,
    base_url: String,
    assets_dir: PathBuf,
}

impl FetchAssetsUseCase {
    pub fn new(http: Arc<dyn HttpClientPort>, base_url: &str, assets_dir: PathBuf) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        Self {
            http,
            base_url,
            assets_dir,
        }
    }

    pub fn url_for(&self, file: &str) -> String {
        format!("{}{}", self.base_url, file)
    }

    /// Download every file; a failure is recorded and the rest still run.
    pub async fn fetch_all(&self, files: &[String]) -> FetchReport {
        let mut report = FetchReport::default();

        for file in files {
            let url = self.url_for(file);
            let dest = self.assets_dir.join(file);
            info!("Downloading {} from {}...", file, url);

            match download_to(self.http.as_ref(), &url, &dest).await {
                Ok(bytes) => {
                    info!("Saved {} bytes to {}", bytes, dest.display());
                    report.downloaded.push(dest);
                }
                Err(e) => {
                    error!("Error downloading {}: {}", file, e);
                    // Never leave a partial asset behind
                    let _ = tokio::fs::remove_file(&dest).await;
                    report.failed.push((file.clone(), e.to_string()));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::HttpGetResult;
    use crate::error::Result;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct StaticHttp;

    #[async_trait]
    impl HttpClientPort for StaticHttp {
        async fn get(&self, url: &str) -> Result<HttpGetResult> {
            let status = if url.ends_with("missing.json") { 404 } else { 200 };
            Ok(HttpGetResult {
                status,
                bytes: br#"{"ok":true}"#.to_vec(),
                content_type: "application/json".to_string(),
                content_length: 11,
            })
        }
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let use_case = FetchAssetsUseCase::new(Arc::new(StaticHttp), "https://host/dl", PathBuf::from("a"));
        assert_eq!(use_case.url_for("x.json"), "https://host/dl/x.json");
    }

    #[tokio::test]
    async fn test_fetch_all_continues_after_failure() {
        let dir = TempDir::new().unwrap();
        let use_case = FetchAssetsUseCase::new(
            Arc::new(StaticHttp),
            "https://host/dl/",
            dir.path().join("assets"),
        );

        let report = use_case
            .fetch_all(&["missing.json".to_string(), "present.json".to_string()])
            .await;

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "missing.json");
        assert!(report.failed[0].1.contains("404"));
        assert_eq!(report.downloaded, vec![dir.path().join("assets/present.json")]);
        assert!(!dir.path().join("assets/missing.json").exists());
        let content = std::fs::read_to_string(dir.path().join("assets/present.json")).unwrap();
        assert_eq!(content, r#"{"ok":true}"#);
        assert!(!report.is_success());
    }
}
