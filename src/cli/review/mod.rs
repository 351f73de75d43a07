//! Review command - grounds a contract against statutes and writes its report

use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use crate::domain::{ContractReview, DocumentType, RiskLevel};

#[derive(Debug, Args)]
pub struct ReviewArgs {
    /// Contract file to review
    #[arg(long)]
    pub contract: PathBuf,

    /// Statute files to ingest as legal references
    #[arg(long)]
    pub statutes: Vec<PathBuf>,

    /// Risk level from the upstream risk review
    #[arg(long, default_value = "MEDIUM")]
    pub risk_level: RiskLevel,

    /// Number of risks found by the upstream risk review
    #[arg(long, default_value_t = 0)]
    pub total_risks: u32,

    /// Directory for the generated report
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Run the review command
pub async fn run(args: ReviewArgs) -> anyhow::Result<()> {
    let mut config = super::init()?;
    if let Some(output) = args.output {
        config.report.output_dir = output;
    }

    let context = crate::create_app_context_with_config(&config)?;

    for path in &args.statutes {
        let statute =
            super::read_document(path, Some(DocumentType::Statute), &context.classifier).await?;
        let result = context.processor.ingest(statute).await?;

        if result.chunks_stored == 0 {
            warn!(path = %path.display(), "No statute chunks stored, references will be missing");
        }
    }

    let contract = super::read_document(&args.contract, None, &context.classifier).await?;
    let review = ContractReview::new(
        contract.filename(),
        contract.text(),
        args.risk_level,
        args.total_risks,
    );
    let review = context.review_service.register(review).await?;

    let exported = context.review_service.export_report(&review.id()).await?;

    for (kind, source) in exported.report.sources() {
        info!(section = %kind, source = source.label(), "Section resolved");
    }

    println!("{}", exported.location);
    Ok(())
}
