//! Prompt templates for report sections
//!
//! Placeholders use `${name}` syntax and are substituted with plain string
//! replacement.

pub const SYSTEM_PROMPT: &str = "你是一名资深的中国合同审查律师，熟悉《中华人民共和国民法典》及相关司法解释。\
你只输出符合要求的 JSON 对象，不输出任何解释性文字或 Markdown 代码块。";

pub const EXECUTIVE_SUMMARY_PROMPT: &str = r#"请根据以下合同内容和风险审查结果，撰写审查报告的执行摘要。

合同文件：${filename}
风险等级：${risk_level}
识别风险数量：${total_risks}

相关法律条文：
${legal_references}

合同内容：
${contract_content}

请输出如下结构的 JSON：
{
  "riskLevel": "高、中、低三者之一",
  "riskReason": "风险等级的主要依据",
  "coreRisks": ["核心风险点"],
  "actionSuggestions": ["具体行动建议"],
  "overallConclusion": "总体结论"
}"#;

pub const DEEP_ANALYSIS_PROMPT: &str = r#"请对以下合同进行深度法律分析。

合同文件：${filename}
风险等级：${risk_level}
识别风险数量：${total_risks}

相关法律条文：
${legal_references}

合同内容：
${contract_content}

请输出如下结构的 JSON：
{
  "legalNature": {
    "contractType": "合同类型",
    "legalRelationship": "法律关系",
    "applicableLaws": ["适用法律"]
  },
  "keyClauses": [
    {"clause": "条款名称或编号", "analysis": "分析", "risk": "风险提示"}
  ],
  "riskPoints": [
    {"category": "风险类别", "description": "风险描述", "level": "高/中/低", "legalBasis": "法律依据"}
  ],
  "complianceNotes": ["合规提示"]
}"#;

pub const IMPROVEMENT_SUGGESTIONS_PROMPT: &str = r#"请针对以下合同提出具体的修改建议。

合同文件：${filename}
风险等级：${risk_level}
识别风险数量：${total_risks}

相关法律条文：
${legal_references}

合同内容：
${contract_content}

请输出如下结构的 JSON：
{
  "suggestions": [
    {
      "priority": "高/中/低",
      "clauseReference": "涉及条款",
      "problemDescription": "存在的问题",
      "suggestedModification": "修改建议（可直接替换的条款文本）",
      "expectedEffect": "预期效果"
    }
  ],
  "summary": "修改建议总结"
}"#;

/// Used when no statute references could be retrieved
pub const NO_REFERENCES: &str = "（无）";
