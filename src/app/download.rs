use std::path::Path;
use std::time::Instant;
use tracing::debug;

use crate::app::ports::HttpClientPort;
use crate::error::{BuilderError, Result};
use crate::observability::metrics;

/// Download `url` into `dest`, creating parent directories. Returns the
/// number of bytes written. Non-2xx responses are errors and leave nothing
/// on disk.
pub async fn download_to(http: &dyn HttpClientPort, url: &str, dest: &Path) -> Result<u64> {
    let started = Instant::now();
    let response = match http.get(url).await {
        Ok(r) => r,
        Err(e) => {
            metrics::fetch::download_failed();
            return Err(e);
        }
    };

    if !response.is_success() {
        metrics::fetch::download_failed();
        return Err(BuilderError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(dest, &response.bytes).await?;

    let bytes = response.bytes.len() as u64;
    metrics::fetch::download_succeeded(bytes, started.elapsed().as_secs_f64());
    debug!(
        "Downloaded {} bytes ({}) to {}",
        bytes,
        response.content_type,
        dest.display()
    );
    Ok(bytes)
}
