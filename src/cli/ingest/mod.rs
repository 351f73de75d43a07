//! Ingest command - splits, embeds and stores documents
//!
//! Records go to the in-memory store created for this run and are dropped on
//! exit; the command is a dry run of the ingestion pipeline that reports what
//! would be stored.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::domain::{DocumentType, VectorStore};

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Files to ingest
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Force a document type instead of classifying each file
    #[arg(long)]
    pub doc_type: Option<DocumentType>,
}

/// Run the ingest command; stored records do not outlive the process
pub async fn run(args: IngestArgs) -> anyhow::Result<()> {
    let config = super::init()?;
    let context = crate::create_app_context_with_config(&config)?;

    for path in &args.files {
        let document = super::read_document(path, args.doc_type, &context.classifier).await?;
        let filename = document.filename().to_string();
        let document_type = document.document_type();

        let result = context.processor.ingest(document).await?;

        println!(
            "{}\t{}\t{} stored, {} filtered, {} failed",
            filename,
            document_type,
            result.chunks_stored,
            result.chunks_filtered,
            result.chunks_failed()
        );
    }

    info!(
        documents = args.files.len(),
        records = context.store.count().await?,
        "Ingestion complete"
    );

    Ok(())
}
