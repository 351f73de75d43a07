//! Report domain - structured section generation, validation, fallback and
//! rendering of the final contract review report

mod fallback;
mod generator;
mod resolution;
mod sink;
mod template;
mod validation;

pub use fallback::{
    FallbackContent, NEEDS_REVIEW_PHRASE, RISK_ACCEPTABLE_PHRASE, WITHHOLD_SIGNING_PHRASE,
};
pub use generator::StructuredContentGenerator;
pub use resolution::{
    ResolvedSection, ResolvedSections, SectionKind, SectionLifecycle, SectionResolution,
    SectionSource, SectionState,
};
pub use sink::ReportSink;
pub use template::TemplateRenderer;
pub use validation::{ContentValidation, ContentValidator, VALID_RISK_LABELS};

#[cfg(test)]
pub use generator::mock::{ScriptedContentGenerator, SectionScript};
#[cfg(test)]
pub use validation::MockContentValidation;
