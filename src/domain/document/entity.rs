//! Document entity, identifier and type

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Maximum length for document IDs
pub const MAX_DOCUMENT_ID_LENGTH: usize = 128;

static DOCUMENT_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9._-]*$").unwrap());

/// Document identifier - alphanumeric plus `.`, `_` and `-`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a new DocumentId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if id.is_empty() {
            return Err(DomainError::validation("Document ID cannot be empty"));
        }

        if id.len() > MAX_DOCUMENT_ID_LENGTH {
            return Err(DomainError::validation(format!(
                "Document ID too long: {} characters (max {})",
                id.len(),
                MAX_DOCUMENT_ID_LENGTH
            )));
        }

        if !DOCUMENT_ID_PATTERN.is_match(&id) {
            return Err(DomainError::validation(format!(
                "Invalid document ID format '{}'",
                id
            )));
        }

        Ok(Self(id))
    }

    /// Generate a random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classified type of a legal document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Laws, regulations and judicial interpretations
    #[serde(alias = "statute")]
    Statute,
    /// Blank contract templates and model texts
    #[serde(alias = "contract_template")]
    ContractTemplate,
    /// Signed or negotiated contracts
    #[serde(alias = "contract_instance")]
    ContractInstance,
    #[serde(alias = "other")]
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        Self::Statute,
        Self::ContractTemplate,
        Self::ContractInstance,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Statute => "STATUTE",
            Self::ContractTemplate => "CONTRACT_TEMPLATE",
            Self::ContractInstance => "CONTRACT_INSTANCE",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");

        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| DomainError::validation(format!("Unknown document type '{}'", s)))
    }
}

/// A source document to be split, embedded and stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    text: String,
    document_type: DocumentType,
    filename: String,
    created_at: DateTime<Utc>,
}

impl Document {
    /// Create a new document; the filename must not be blank
    pub fn new(
        id: DocumentId,
        text: impl Into<String>,
        document_type: DocumentType,
        filename: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let filename = filename.into();

        if filename.trim().is_empty() {
            return Err(DomainError::validation("Document filename cannot be blank"));
        }

        Ok(Self {
            id,
            text: text.into(),
            document_type,
            filename,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the source text, keeping identity and type
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_validation() {
        assert!(DocumentId::new("civil-code_2020.v1").is_ok());
        assert!(DocumentId::new("").is_err());
        assert!(DocumentId::new("-leading-dash").is_err());
        assert!(DocumentId::new("has space").is_err());
        assert!(DocumentId::new("a".repeat(MAX_DOCUMENT_ID_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_generated_id_is_valid() {
        let id = DocumentId::generate();
        assert!(DocumentId::new(id.as_str()).is_ok());
    }

    #[test]
    fn test_document_type_from_str() {
        assert_eq!("STATUTE".parse::<DocumentType>().unwrap(), DocumentType::Statute);
        assert_eq!(
            "contract-template".parse::<DocumentType>().unwrap(),
            DocumentType::ContractTemplate
        );
        assert_eq!(
            "contract_instance".parse::<DocumentType>().unwrap(),
            DocumentType::ContractInstance
        );
        assert!("memo".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_document_type_serde() {
        let json = serde_json::to_string(&DocumentType::ContractTemplate).unwrap();
        assert_eq!(json, "\"CONTRACT_TEMPLATE\"");

        let parsed: DocumentType = serde_json::from_str("\"statute\"").unwrap();
        assert_eq!(parsed, DocumentType::Statute);
    }

    #[test]
    fn test_document_requires_filename() {
        let id = DocumentId::new("doc-1").unwrap();
        assert!(Document::new(id.clone(), "text", DocumentType::Other, "  ").is_err());

        let doc = Document::new(id, "text", DocumentType::Other, "memo.txt").unwrap();
        assert_eq!(doc.filename(), "memo.txt");
        assert_eq!(doc.document_type(), DocumentType::Other);
    }
}
