//! Rule-based document type classification

use once_cell::sync::Lazy;
use regex::Regex;

use super::DocumentType;

/// Line-leading article marker such as `第十二条` or `第12条`
pub(crate) static ARTICLE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t\u{3000}]*第[一二三四五六七八九十百千零〇两0-9]+条").unwrap()
});

const TEMPLATE_MARKERS: &[&str] = &["模板", "范本", "示范文本", "template"];
const STATUTE_SUFFIXES: &[&str] = &["法", "法典", "条例", "规定", "办法", "解释"];
const CONTRACT_MARKERS: &[&str] = &["合同", "协议", "contract", "agreement"];

/// Minimum number of line-leading articles for text to read as a statute
const MIN_ARTICLES_FOR_STATUTE: usize = 3;

/// Classifies documents by filename and content markers
#[derive(Debug, Clone, Default)]
pub struct DocumentClassifier;

impl DocumentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a document. Filename markers win over content markers, and
    /// template markers win over statute markers.
    pub fn classify(&self, filename: &str, text: &str) -> DocumentType {
        let name = filename.to_lowercase();

        if contains_any(&name, TEMPLATE_MARKERS) {
            return DocumentType::ContractTemplate;
        }

        if is_statute_name(&name)
            || ARTICLE_MARKER.find_iter(text).count() >= MIN_ARTICLES_FOR_STATUTE
        {
            return DocumentType::Statute;
        }

        if contains_any(&name, CONTRACT_MARKERS) || (text.contains("甲方") && text.contains("乙方"))
        {
            return DocumentType::ContractInstance;
        }

        DocumentType::Other
    }
}

/// Chinese statute titles end with the instrument kind (…法, …条例, …解释)
fn is_statute_name(name: &str) -> bool {
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem).trim();
    STATUTE_SUFFIXES.iter().any(|s| stem.ends_with(s)) || stem.contains("statute")
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
