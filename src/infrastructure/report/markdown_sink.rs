//! Markdown file report sink

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::domain::report::ReportSink;
use crate::domain::review::ContractReview;
use crate::domain::DomainError;

/// Maximum suffix tried before giving up on a unique file name
const MAX_NAME_ATTEMPTS: usize = 100;

/// Writes `<output_dir>/<stem>_review_<YYYYmmdd_HHMMSS_mmm>.md`.
///
/// Files are created exclusively; a name already taken gets a `_<n>` suffix,
/// so earlier reports are never overwritten.
#[derive(Debug, Clone)]
pub struct MarkdownFileSink {
    output_dir: PathBuf,
}

impl MarkdownFileSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn base_name(review: &ContractReview) -> String {
        let stem = Path::new(review.filename())
            .file_stem()
            .and_then(|s| s.to_str())
            .map(sanitize)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "contract".to_string());

        format!("{}_review_{}", stem, Utc::now().format("%Y%m%d_%H%M%S_%3f"))
    }

    /// Create a new file that does not exist yet
    async fn create_unique(&self, base: &str) -> Result<(PathBuf, tokio::fs::File), DomainError> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = match attempt {
                0 => format!("{}.md", base),
                n => format!("{}_{}.md", base, n),
            };
            let path = self.output_dir.join(name);

            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(DomainError::storage(format!(
                        "Failed to create {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        }

        Err(DomainError::storage(format!(
            "No free report file name for {} in {}",
            base,
            self.output_dir.display()
        )))
    }
}

fn sanitize(stem: &str) -> String {
    stem.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

#[async_trait]
impl ReportSink for MarkdownFileSink {
    async fn write(&self, review: &ContractReview, report: &str) -> Result<String, DomainError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to create {}: {}",
                    self.output_dir.display(),
                    e
                ))
            })?;

        let (path, mut file) = self.create_unique(&Self::base_name(review)).await?;
        let write_error =
            |e: std::io::Error| DomainError::storage(format!("Failed to write {}: {}", path.display(), e));
        file.write_all(report.as_bytes()).await.map_err(write_error)?;
        file.flush().await.map_err(write_error)?;

        info!(review_id = %review.id(), path = %path.display(), "Report written");

        Ok(path.display().to_string())
    }
}
