//! Infrastructure layer - External service implementations

pub mod document;
pub mod embedding;
pub mod ingestion;
pub mod llm;
pub mod logging;
pub mod report;
pub mod review;
pub mod services;
pub mod vector_store;
