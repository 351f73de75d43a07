//! Structural completeness checks for generated sections

#[cfg(test)]
use mockall::automock;

use crate::domain::review::{DeepAnalysis, ExecutiveSummary, ImprovementSuggestions};

/// Risk labels an executive summary may carry
pub const VALID_RISK_LABELS: [&str; 3] = ["高", "中", "低"];

/// One predicate per section. Predicates never fail; incomplete content is
/// simply reported as invalid.
#[cfg_attr(test, automock)]
pub trait ContentValidation: Send + Sync + std::fmt::Debug {
    fn is_valid_executive_summary(&self, summary: &ExecutiveSummary) -> bool;

    fn is_valid_deep_analysis(&self, analysis: &DeepAnalysis) -> bool;

    fn is_valid_improvement_suggestions(&self, suggestions: &ImprovementSuggestions) -> bool;
}

#[derive(Debug, Clone, Default)]
pub struct ContentValidator;

impl ContentValidator {
    pub fn new() -> Self {
        Self
    }
}

impl ContentValidation for ContentValidator {
    fn is_valid_executive_summary(&self, summary: &ExecutiveSummary) -> bool {
        VALID_RISK_LABELS.contains(&summary.risk_level.trim())
            && !is_blank(&summary.risk_reason)
            && !summary.core_risks.is_empty()
            && !summary.action_suggestions.is_empty()
    }

    /// A contract type is the minimum usable content; the rest may be partial
    fn is_valid_deep_analysis(&self, analysis: &DeepAnalysis) -> bool {
        !is_blank(&analysis.legal_nature.contract_type)
    }

    fn is_valid_improvement_suggestions(&self, suggestions: &ImprovementSuggestions) -> bool {
        !suggestions.suggestions.is_empty()
            && suggestions.suggestions.iter().all(|s| {
                !is_blank(&s.problem_description) && !is_blank(&s.suggested_modification)
            })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
