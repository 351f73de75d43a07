//! Document ingestion infrastructure
//!
//! This module provides the splitter implementations, splitter selection by
//! document type, and the document processor that stores embedded chunks.

pub mod factory;
pub mod keyed_lock;
pub mod processor;
pub mod splitters;

pub use factory::SplitterFactory;
pub use keyed_lock::KeyedLock;
pub use processor::DocumentProcessor;
pub use splitters::{FixedWindowSplitter, StatuteSplitter};
