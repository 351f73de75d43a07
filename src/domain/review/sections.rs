//! Structured report sections.
//!
//! Field names follow the camelCase JSON the model is asked to produce.
//! Every collection and optional field defaults so that partially populated
//! model output still deserializes; completeness is judged by the content
//! validator, not by the parser.

use serde::{Deserialize, Serialize};

/// Executive summary: overall risk verdict and what to do about it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutiveSummary {
    /// One of 高 / 中 / 低
    pub risk_level: String,
    pub risk_reason: String,
    pub core_risks: Vec<String>,
    pub action_suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_conclusion: Option<String>,
}

/// Legal characterisation of the contract
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegalNature {
    pub contract_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_relationship: Option<String>,
    pub applicable_laws: Vec<String>,
}

/// Analysis of a single clause
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClauseAnalysis {
    pub clause: String,
    pub analysis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,
}

/// A categorised risk with its severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskPoint {
    pub category: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_basis: Option<String>,
}

/// Deep analysis: legal nature, clause-by-clause review and risk map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeepAnalysis {
    pub legal_nature: LegalNature,
    pub key_clauses: Vec<ClauseAnalysis>,
    pub risk_points: Vec<RiskPoint>,
    pub compliance_notes: Vec<String>,
}

/// A concrete modification proposal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImprovementSuggestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause_reference: Option<String>,
    pub problem_description: String,
    pub suggested_modification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_effect: Option<String>,
}

/// Ordered list of modification proposals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImprovementSuggestions {
    pub suggestions: Vec<ImprovementSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}
