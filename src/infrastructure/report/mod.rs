//! Report generation: model-backed sections, composition and output

mod composer;
mod llm_generator;
mod markdown_sink;
mod prompts;

pub use composer::{ComposedReport, ReportComposer};
pub use llm_generator::LlmContentGenerator;
pub use markdown_sink::MarkdownFileSink;
