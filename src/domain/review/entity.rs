//! Contract review entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Review identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(Uuid);

impl ReviewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ReviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReviewId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| DomainError::validation(format!("Invalid review ID '{}': {}", s, e)))
    }
}

/// Overall risk level of a reviewed contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Chinese label used in generated sections and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "低",
            Self::Medium => "中",
            Self::High => "高",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = DomainError;

    /// Accepts `LOW`/`MEDIUM`/`HIGH` in any case, or the labels 低/中/高
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" | "低" => Ok(Self::Low),
            "MEDIUM" | "中" => Ok(Self::Medium),
            "HIGH" | "高" => Ok(Self::High),
            other => Err(DomainError::validation(format!(
                "Unknown risk level '{}'",
                other
            ))),
        }
    }
}

/// A contract that went through risk review, source of report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractReview {
    id: ReviewId,
    filename: String,
    content: String,
    risk_level: RiskLevel,
    total_risks: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContractReview {
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<String>,
        risk_level: RiskLevel,
        total_risks: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ReviewId::new(),
            filename: filename.into(),
            content: content.into(),
            risk_level,
            total_risks,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create with specific ID (for loading from storage)
    pub fn with_id(mut self, id: ReviewId) -> Self {
        self.id = id;
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn id(&self) -> ReviewId {
        self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn total_risks(&self) -> u32 {
        self.total_risks
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
