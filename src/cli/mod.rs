//! CLI module for contract review
//!
//! Provides subcommands:
//! - `ingest`: split, embed and store documents
//! - `review`: ground a contract against statutes and write its report

pub mod ingest;
pub mod review;

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::domain::{Document, DocumentClassifier, DocumentId, DocumentType};
use crate::infrastructure::logging;

/// Contract review - legal document ingestion and AI-assisted review reports
#[derive(Parser)]
#[command(name = "contract-review")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ingest documents and report chunk counts.
    ///
    /// The vector store is in-memory and lives only for this process, so
    /// nothing is kept after the command exits. Use `review --statutes` to
    /// ground a report in the same run.
    Ingest(ingest::IngestArgs),

    /// Generate a review report for a contract
    Review(review::ReviewArgs),
}

/// Load configuration and install logging
pub(crate) fn init() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}

/// Read a file into a document, classifying it unless a type is forced
pub(crate) async fn read_document(
    path: &Path,
    forced_type: Option<DocumentType>,
    classifier: &DocumentClassifier,
) -> anyhow::Result<Document> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string());

    let document_type = forced_type.unwrap_or_else(|| classifier.classify(&filename, &text));

    Ok(Document::new(document_id_for(path), text, document_type, filename)?)
}

/// Use the file stem as id when it is a valid identifier, otherwise a fresh one
fn document_id_for(path: &Path) -> DocumentId {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| DocumentId::new(stem).ok())
        .unwrap_or_else(DocumentId::generate)
}
