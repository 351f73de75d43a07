//! Deterministic rule-based section content.
//!
//! Built only from the review's risk level, risk count and filename, so it
//! is always available when generation fails or produces unusable content.

use crate::domain::review::{
    ContractReview, DeepAnalysis, ExecutiveSummary, ImprovementSuggestion,
    ImprovementSuggestions, LegalNature, RiskLevel, RiskPoint,
};

/// Recommendation carried by every HIGH-risk fallback
pub const WITHHOLD_SIGNING_PHRASE: &str = "暂缓签署";

/// Recommendation carried by every LOW-risk fallback
pub const RISK_ACCEPTABLE_PHRASE: &str = "风险可接受";

/// Recommendation carried by every MEDIUM-risk fallback
pub const NEEDS_REVIEW_PHRASE: &str = "需进一步审查";

const PENDING_CONTRACT_TYPE: &str = "待人工确认";

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackContent;

impl FallbackContent {
    pub fn executive_summary(review: &ContractReview) -> ExecutiveSummary {
        let level = review.risk_level();
        let total = review.total_risks();

        let risk_reason = format!(
            "自动分析暂不可用，以下结论依据风险审查统计生成：《{}》共识别出{}项风险，综合风险等级为{}。",
            review.filename(),
            total,
            level.label()
        );

        let mut core_risks = vec![if total == 0 {
            "风险审查未识别出具体风险点".to_string()
        } else {
            format!("风险审查共识别出{}项风险点，详见风险明细", total)
        }];
        if level == RiskLevel::High {
            core_risks.push("存在可能导致重大损失的高风险条款".to_string());
        }

        let (action_suggestions, conclusion) = match level {
            RiskLevel::High => (
                vec![
                    format!(
                        "建议{}本合同，待高风险条款修订完成并经法务复核后再行决定",
                        WITHHOLD_SIGNING_PHRASE
                    ),
                    "就高风险条款与对方重新协商".to_string(),
                ],
                format!("合同风险较高，建议{}", WITHHOLD_SIGNING_PHRASE),
            ),
            RiskLevel::Medium => (
                vec![format!(
                    "已识别风险条款{}，建议由法务人员复核后再决定是否签署",
                    NEEDS_REVIEW_PHRASE
                )],
                format!("合同存在一定风险，{}", NEEDS_REVIEW_PHRASE),
            ),
            RiskLevel::Low => (
                vec![
                    format!("整体{}，可按正常审批流程推进签署", RISK_ACCEPTABLE_PHRASE),
                    "签署前核对主体信息与付款条款".to_string(),
                ],
                format!("合同整体{}", RISK_ACCEPTABLE_PHRASE),
            ),
        };

        ExecutiveSummary {
            risk_level: level.label().to_string(),
            risk_reason,
            core_risks,
            action_suggestions,
            overall_conclusion: Some(conclusion),
        }
    }

    pub fn deep_analysis(review: &ContractReview) -> DeepAnalysis {
        let level = review.risk_level();
        let total = review.total_risks();

        let risk_points = if total == 0 {
            Vec::new()
        } else {
            vec![RiskPoint {
                category: "综合风险".to_string(),
                description: format!("共识别出{}项风险，综合风险等级为{}", total, level.label()),
                level: Some(level.label().to_string()),
                legal_basis: None,
            }]
        };

        DeepAnalysis {
            legal_nature: LegalNature {
                contract_type: PENDING_CONTRACT_TYPE.to_string(),
                legal_relationship: None,
                applicable_laws: Vec::new(),
            },
            key_clauses: Vec::new(),
            risk_points,
            compliance_notes: vec![format!(
                "《{}》的自动深度分析暂不可用，请结合风险明细人工复核",
                review.filename()
            )],
        }
    }

    pub fn improvement_suggestions(review: &ContractReview) -> ImprovementSuggestions {
        let total = review.total_risks();

        let suggestion = match review.risk_level() {
            RiskLevel::High => ImprovementSuggestion {
                priority: Some("高".to_string()),
                clause_reference: None,
                problem_description: format!("合同存在{}项风险，其中包含高风险条款", total),
                suggested_modification: format!(
                    "{}，逐条修订高风险条款并提交法务复核",
                    WITHHOLD_SIGNING_PHRASE
                ),
                expected_effect: Some("消除重大违约与损失风险".to_string()),
            },
            RiskLevel::Medium => ImprovementSuggestion {
                priority: Some("中".to_string()),
                clause_reference: None,
                problem_description: format!("合同存在{}项需关注的风险", total),
                suggested_modification: format!(
                    "相关条款{}，补充或明确约定后再签署",
                    NEEDS_REVIEW_PHRASE
                ),
                expected_effect: Some("降低履约争议".to_string()),
            },
            RiskLevel::Low => ImprovementSuggestion {
                priority: Some("低".to_string()),
                clause_reference: None,
                problem_description: format!("合同整体风险较低，共识别出{}项风险", total),
                suggested_modification: format!(
                    "{}，签署前核对关键商业条款即可",
                    RISK_ACCEPTABLE_PHRASE
                ),
                expected_effect: None,
            },
        };

        ImprovementSuggestions {
            suggestions: vec![suggestion],
            summary: Some("以上建议依据风险等级自动生成".to_string()),
        }
    }
}
