//! Per-section generate / validate / fallback resolution

use std::fmt;

use serde::Serialize;

use crate::domain::review::{DeepAnalysis, ExecutiveSummary, ImprovementSuggestions};

/// The three report sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    ExecutiveSummary,
    DeepAnalysis,
    ImprovementSuggestions,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "executive_summary",
            Self::DeepAnalysis => "deep_analysis",
            Self::ImprovementSuggestions => "improvement_suggestions",
        }
    }

    /// Report heading
    pub fn title(&self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "执行摘要",
            Self::DeepAnalysis => "深度分析",
            Self::ImprovementSuggestions => "改进建议",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionState {
    NotStarted,
    Generating,
    Valid,
    InvalidOrFailed,
    Resolved,
}

/// Where a resolved section's content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionSource {
    Generated,
    Fallback,
}

impl SectionSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Generated => "AI生成",
            Self::Fallback => "规则生成",
        }
    }
}

/// Section content tagged with its origin
#[derive(Debug, Clone, PartialEq)]
pub enum SectionResolution<T> {
    Generated(T),
    Fallback(T),
}

impl<T> SectionResolution<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Generated(value) | Self::Fallback(value) => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Generated(value) | Self::Fallback(value) => value,
        }
    }

    pub fn source(&self) -> SectionSource {
        match self {
            Self::Generated(_) => SectionSource::Generated,
            Self::Fallback(_) => SectionSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// A section that reached `Resolved`, with the states it went through
#[derive(Debug, Clone)]
pub struct ResolvedSection<T> {
    kind: SectionKind,
    resolution: SectionResolution<T>,
    trace: Vec<SectionState>,
    failure: Option<String>,
}

impl<T> ResolvedSection<T> {
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn resolution(&self) -> &SectionResolution<T> {
        &self.resolution
    }

    pub fn value(&self) -> &T {
        self.resolution.value()
    }

    pub fn source(&self) -> SectionSource {
        self.resolution.source()
    }

    pub fn trace(&self) -> &[SectionState] {
        &self.trace
    }

    /// Why the fallback was used; `None` for generated sections
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

/// Drives one section through its lifecycle.
///
/// Transitions are only reachable in order: `start` records `NotStarted`,
/// `generating` moves to `Generating`, and `accept` or `reject` consume the
/// lifecycle and finish in `Resolved`.
#[derive(Debug)]
pub struct SectionLifecycle {
    kind: SectionKind,
    trace: Vec<SectionState>,
}

impl SectionLifecycle {
    pub fn start(kind: SectionKind) -> Self {
        Self {
            kind,
            trace: vec![SectionState::NotStarted],
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn generating(mut self) -> Self {
        self.trace.push(SectionState::Generating);
        self
    }

    pub fn state(&self) -> SectionState {
        self.trace
            .last()
            .copied()
            .unwrap_or(SectionState::NotStarted)
    }

    /// Generated content passed validation
    pub fn accept<T>(mut self, value: T) -> ResolvedSection<T> {
        self.trace
            .extend([SectionState::Valid, SectionState::Resolved]);
        ResolvedSection {
            kind: self.kind,
            resolution: SectionResolution::Generated(value),
            trace: self.trace,
            failure: None,
        }
    }

    /// Generation failed, timed out or was rejected by the validator
    pub fn reject<T>(mut self, reason: impl Into<String>, fallback: T) -> ResolvedSection<T> {
        self.trace
            .extend([SectionState::InvalidOrFailed, SectionState::Resolved]);
        ResolvedSection {
            kind: self.kind,
            resolution: SectionResolution::Fallback(fallback),
            trace: self.trace,
            failure: Some(reason.into()),
        }
    }
}

/// All three sections, each resolved
#[derive(Debug, Clone)]
pub struct ResolvedSections {
    pub executive_summary: ResolvedSection<ExecutiveSummary>,
    pub deep_analysis: ResolvedSection<DeepAnalysis>,
    pub improvements: ResolvedSection<ImprovementSuggestions>,
}

impl ResolvedSections {
    pub fn sources(&self) -> [(SectionKind, SectionSource); 3] {
        [
            (self.executive_summary.kind(), self.executive_summary.source()),
            (self.deep_analysis.kind(), self.deep_analysis.source()),
            (self.improvements.kind(), self.improvements.source()),
        ]
    }

    pub fn fallback_count(&self) -> usize {
        self.sources()
            .iter()
            .filter(|(_, source)| *source == SectionSource::Fallback)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_trace() {
        let lifecycle = SectionLifecycle::start(SectionKind::DeepAnalysis).generating();
        assert_eq!(lifecycle.state(), SectionState::Generating);

        let section = lifecycle.accept(42);
        assert_eq!(
            section.trace(),
            &[
                SectionState::NotStarted,
                SectionState::Generating,
                SectionState::Valid,
                SectionState::Resolved
            ]
        );
        assert_eq!(section.source(), SectionSource::Generated);
        assert!(section.failure().is_none());
        assert_eq!(*section.value(), 42);
    }

    #[test]
    fn test_rejected_trace_keeps_reason() {
        let section = SectionLifecycle::start(SectionKind::ExecutiveSummary)
            .generating()
            .reject("timed out", "fallback");

        assert_eq!(section.trace()[2], SectionState::InvalidOrFailed);
        assert_eq!(section.trace().last(), Some(&SectionState::Resolved));
        assert_eq!(section.failure(), Some("timed out"));
        assert!(section.resolution().is_fallback());
        assert_eq!(section.resolution().clone().into_value(), "fallback");
    }

    #[test]
    fn test_fallback_count() {
        let sections = ResolvedSections {
            executive_summary: SectionLifecycle::start(SectionKind::ExecutiveSummary)
                .generating()
                .reject("failed", ExecutiveSummary::default()),
            deep_analysis: SectionLifecycle::start(SectionKind::DeepAnalysis)
                .generating()
                .accept(DeepAnalysis::default()),
            improvements: SectionLifecycle::start(SectionKind::ImprovementSuggestions)
                .generating()
                .reject("invalid", ImprovementSuggestions::default()),
        };

        assert_eq!(sections.fallback_count(), 2);
        assert_eq!(sections.sources()[1], (SectionKind::DeepAnalysis, SectionSource::Generated));
    }

    #[test]
    fn test_section_kind_names() {
        assert_eq!(SectionKind::ImprovementSuggestions.to_string(), "improvement_suggestions");
        assert_eq!(SectionKind::ExecutiveSummary.title(), "执行摘要");
    }
}
