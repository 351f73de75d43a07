//! Markdown report template

use chrono::{DateTime, Utc};

use super::resolution::{ResolvedSection, ResolvedSections};
use crate::domain::review::{
    ContractReview, DeepAnalysis, ExecutiveSummary, ImprovementSuggestions,
};

/// Assembles the final report from resolved sections.
///
/// Rendering is a pure function of its inputs. Blank optional fields and
/// empty lists are left out instead of producing empty headings.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        review: &ContractReview,
        sections: &ResolvedSections,
        generated_at: DateTime<Utc>,
    ) -> String {
        let mut out = String::new();

        out.push_str("# 合同审查报告\n\n");
        out.push_str(&format!("- **合同文件**: {}\n", review.filename()));
        out.push_str(&format!(
            "- **风险等级**: {} ({})\n",
            review.risk_level().label(),
            review.risk_level()
        ));
        out.push_str(&format!("- **识别风险数**: {}\n", review.total_risks()));
        out.push_str(&format!(
            "- **生成时间**: {}\n",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        let fallbacks = sections.fallback_count();
        if fallbacks > 0 {
            out.push_str(&format!(
                "\n> 注意：{} 个章节的自动分析不可用，已使用基于风险等级的规则内容。\n",
                fallbacks
            ));
        }

        section_heading(&mut out, "一", &sections.executive_summary);
        render_executive_summary(&mut out, review, sections.executive_summary.value());

        section_heading(&mut out, "二", &sections.deep_analysis);
        render_deep_analysis(&mut out, sections.deep_analysis.value());

        section_heading(&mut out, "三", &sections.improvements);
        render_improvements(&mut out, sections.improvements.value());

        out.push_str("\n---\n\n*本报告由合同审查系统自动生成，仅供参考，不构成正式法律意见。*\n");
        out
    }
}

fn section_heading<T>(out: &mut String, ordinal: &str, section: &ResolvedSection<T>) {
    out.push_str(&format!("\n## {}、{}\n\n", ordinal, section.kind().title()));
    out.push_str(&format!("> 内容来源：{}\n", section.source().label()));
}

fn render_executive_summary(out: &mut String, review: &ContractReview, summary: &ExecutiveSummary) {
    let level = non_blank(&summary.risk_level).unwrap_or(review.risk_level().label());
    out.push_str(&format!("\n**风险等级**：{}\n", level));

    if let Some(reason) = non_blank(&summary.risk_reason) {
        out.push_str(&format!("\n**风险理由**：{}\n", reason));
    }

    numbered_list(out, "核心风险", &summary.core_risks);
    numbered_list(out, "行动建议", &summary.action_suggestions);

    if let Some(conclusion) = summary.overall_conclusion.as_deref().and_then(non_blank) {
        out.push_str(&format!("\n### 总体结论\n\n{}\n", conclusion));
    }
}

fn render_deep_analysis(out: &mut String, analysis: &DeepAnalysis) {
    let nature = &analysis.legal_nature;
    let mut nature_lines = Vec::new();

    if let Some(contract_type) = non_blank(&nature.contract_type) {
        nature_lines.push(format!("- 合同类型：{}", contract_type));
    }
    if let Some(relationship) = nature.legal_relationship.as_deref().and_then(non_blank) {
        nature_lines.push(format!("- 法律关系：{}", relationship));
    }
    let laws: Vec<&str> = nature
        .applicable_laws
        .iter()
        .filter_map(|law| non_blank(law))
        .collect();
    if !laws.is_empty() {
        nature_lines.push(format!("- 适用法律：{}", laws.join("、")));
    }

    if !nature_lines.is_empty() {
        out.push_str("\n### 法律性质\n\n");
        out.push_str(&nature_lines.join("\n"));
        out.push('\n');
    }

    let clauses: Vec<_> = analysis
        .key_clauses
        .iter()
        .filter(|c| non_blank(&c.clause).is_some())
        .collect();
    if !clauses.is_empty() {
        out.push_str("\n### 关键条款分析\n");
        for (i, clause) in clauses.iter().enumerate() {
            out.push_str(&format!("\n**{}. {}**\n", i + 1, clause.clause.trim()));
            if let Some(text) = non_blank(&clause.analysis) {
                out.push_str(&format!("\n{}\n", text));
            }
            if let Some(risk) = clause.risk.as_deref().and_then(non_blank) {
                out.push_str(&format!("\n风险提示：{}\n", risk));
            }
        }
    }

    let risks: Vec<_> = analysis
        .risk_points
        .iter()
        .filter(|r| non_blank(&r.description).is_some())
        .collect();
    if !risks.is_empty() {
        out.push_str("\n### 风险点\n\n| 类别 | 描述 | 等级 | 法律依据 |\n| --- | --- | --- | --- |\n");
        for risk in risks {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                table_cell(&risk.category),
                table_cell(&risk.description),
                table_cell(risk.level.as_deref().unwrap_or("-")),
                table_cell(risk.legal_basis.as_deref().unwrap_or("-")),
            ));
        }
    }

    numbered_list(out, "合规提示", &analysis.compliance_notes);
}

fn render_improvements(out: &mut String, improvements: &ImprovementSuggestions) {
    for (i, suggestion) in improvements.suggestions.iter().enumerate() {
        let mut heading = format!("\n### 建议 {}", i + 1);
        if let Some(priority) = suggestion.priority.as_deref().and_then(non_blank) {
            heading.push_str(&format!("（优先级：{}）", priority));
        }
        if let Some(reference) = suggestion.clause_reference.as_deref().and_then(non_blank) {
            heading.push_str(&format!(" {}", reference));
        }
        out.push_str(&heading);
        out.push_str("\n\n");

        if let Some(problem) = non_blank(&suggestion.problem_description) {
            out.push_str(&format!("- 问题描述：{}\n", problem));
        }
        if let Some(modification) = non_blank(&suggestion.suggested_modification) {
            out.push_str(&format!("- 修改建议：{}\n", modification));
        }
        if let Some(effect) = suggestion.expected_effect.as_deref().and_then(non_blank) {
            out.push_str(&format!("- 预期效果：{}\n", effect));
        }
    }

    if let Some(summary) = improvements.summary.as_deref().and_then(non_blank) {
        out.push_str(&format!("\n{}\n", summary));
    }
}

fn numbered_list(out: &mut String, title: &str, items: &[String]) {
    let items: Vec<&str> = items.iter().filter_map(|item| non_blank(item)).collect();
    if items.is_empty() {
        return;
    }

    out.push_str(&format!("\n### {}\n\n", title));
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, item));
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn table_cell(value: &str) -> String {
    value.trim().replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{FallbackContent, SectionKind, SectionLifecycle};
    use crate::domain::review::{ImprovementSuggestion, LegalNature, RiskLevel, RiskPoint};
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()
    }

    fn all_fallback(review: &ContractReview) -> ResolvedSections {
        ResolvedSections {
            executive_summary: SectionLifecycle::start(SectionKind::ExecutiveSummary)
                .generating()
                .reject("failed", FallbackContent::executive_summary(review)),
            deep_analysis: SectionLifecycle::start(SectionKind::DeepAnalysis)
                .generating()
                .reject("failed", FallbackContent::deep_analysis(review)),
            improvements: SectionLifecycle::start(SectionKind::ImprovementSuggestions)
                .generating()
                .reject("failed", FallbackContent::improvement_suggestions(review)),
        }
    }

    #[test]
    fn test_header_always_present() {
        let review = ContractReview::new("租赁合同.pdf", "", RiskLevel::High, 3);
        let report = TemplateRenderer::new().render(&review, &all_fallback(&review), fixed_time());

        assert!(report.contains("租赁合同.pdf"));
        assert!(report.contains("**风险等级**: 高 (HIGH)"));
        assert!(report.contains("2024-03-01 08:30:00 UTC"));
        assert!(report.contains("3 个章节"));
        assert!(report.contains("规则生成"));
    }

    #[test]
    fn test_empty_generated_sections_omit_subsections() {
        let review = ContractReview::new("合作协议.docx", "", RiskLevel::Low, 0);
        let sections = ResolvedSections {
            executive_summary: SectionLifecycle::start(SectionKind::ExecutiveSummary)
                .generating()
                .accept(ExecutiveSummary::default()),
            deep_analysis: SectionLifecycle::start(SectionKind::DeepAnalysis)
                .generating()
                .accept(DeepAnalysis::default()),
            improvements: SectionLifecycle::start(SectionKind::ImprovementSuggestions)
                .generating()
                .accept(ImprovementSuggestions::default()),
        };

        let report = TemplateRenderer::new().render(&review, &sections, fixed_time());

        assert!(report.contains("合作协议.docx"));
        assert!(report.contains("## 二、深度分析"));
        assert!(!report.contains("### 核心风险"));
        assert!(!report.contains("### 法律性质"));
        assert!(!report.contains("### 风险点"));
        assert!(!report.contains("注意："));
        // falls back to the review's level when the section has none
        assert!(report.contains("**风险等级**：低"));
    }

    #[test]
    fn test_generated_content_rendered() {
        let review = ContractReview::new("买卖合同.docx", "", RiskLevel::Medium, 2);
        let analysis = DeepAnalysis {
            legal_nature: LegalNature {
                contract_type: "买卖合同".to_string(),
                legal_relationship: Some("买卖关系".to_string()),
                applicable_laws: vec!["《民法典》".to_string(), " ".to_string()],
            },
            risk_points: vec![RiskPoint {
                category: "付款".to_string(),
                description: "付款|节点不明".to_string(),
                level: Some("中".to_string()),
                legal_basis: None,
            }],
            ..Default::default()
        };
        let improvements = ImprovementSuggestions {
            suggestions: vec![ImprovementSuggestion {
                priority: Some("高".to_string()),
                clause_reference: Some("第五条".to_string()),
                problem_description: "付款节点不明".to_string(),
                suggested_modification: "约定验收后30日内付款".to_string(),
                expected_effect: None,
            }],
            summary: None,
        };
        let sections = ResolvedSections {
            executive_summary: SectionLifecycle::start(SectionKind::ExecutiveSummary)
                .generating()
                .reject("invalid", FallbackContent::executive_summary(&review)),
            deep_analysis: SectionLifecycle::start(SectionKind::DeepAnalysis)
                .generating()
                .accept(analysis),
            improvements: SectionLifecycle::start(SectionKind::ImprovementSuggestions)
                .generating()
                .accept(improvements),
        };

        let report = TemplateRenderer::new().render(&review, &sections, fixed_time());

        assert!(report.contains("- 适用法律：《民法典》\n"));
        assert!(report.contains("| 付款 | 付款\\|节点不明 | 中 | - |"));
        assert!(report.contains("### 建议 1（优先级：高） 第五条"));
        assert!(!report.contains("预期效果"));
        assert!(report.contains("AI生成"));
        assert!(report.contains("1 个章节"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let review = ContractReview::new("a.txt", "", RiskLevel::Medium, 1);
        let sections = all_fallback(&review);
        let renderer = TemplateRenderer::new();

        assert_eq!(
            renderer.render(&review, &sections, fixed_time()),
            renderer.render(&review, &sections, fixed_time())
        );
    }
}
