//! Splitter implementations

mod fixed_window;
mod statute;

pub use fixed_window::FixedWindowSplitter;
pub use statute::StatuteSplitter;
