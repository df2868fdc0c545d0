//! # EvidenceSynthesizer
//!
//! Looks up a requirement and renders its evidence template with the
//! caller's organizational facts.

use std::sync::Arc;

use serde::Serialize;

use isms_catalog::{Requirement, RequirementStore};
use isms_core::{FactMap, IsmsResult};

use crate::template::EvidenceTemplate;

/// Evidence for one requirement, filled with organizational facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceDocument {
    pub item_code: String,
    pub title: String,
    /// The unrendered `evidence_example`.
    pub template: String,
    pub rendered: String,
    /// Placeholders left unfilled, first-appearance order.
    pub missing_facts: Vec<String>,
}

impl EvidenceDocument {
    /// Whether every placeholder was filled.
    pub fn is_complete(&self) -> bool {
        self.missing_facts.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct EvidenceSynthesizer {
    store: Arc<RequirementStore>,
}

impl EvidenceSynthesizer {
    pub fn new(store: Arc<RequirementStore>) -> Self {
        Self { store }
    }

    /// Render the evidence document for `item_code`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the code is not in the catalog. Missing facts are
    /// never an error.
    pub fn generate(&self, item_code: &str, facts: &FactMap) -> IsmsResult<EvidenceDocument> {
        let req = self.store.get(item_code)?;
        Ok(Self::render(req, facts))
    }

    /// Render an already-resolved requirement.
    pub fn render(req: &Requirement, facts: &FactMap) -> EvidenceDocument {
        let template = EvidenceTemplate::parse(&req.evidence_example);
        let rendered = template.render(facts);

        if !rendered.missing.is_empty() {
            tracing::debug!(
                item_code = req.code(),
                missing = rendered.missing.len(),
                "evidence rendered with unfilled placeholders"
            );
        }

        EvidenceDocument {
            item_code: req.code().to_string(),
            title: req.title.clone(),
            template: req.evidence_example.clone(),
            rendered: rendered.text,
            missing_facts: rendered.missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isms_core::IsmsError;

    fn synthesizer() -> EvidenceSynthesizer {
        EvidenceSynthesizer::new(Arc::new(RequirementStore::embedded().unwrap()))
    }

    #[test]
    fn empty_facts_report_missing_placeholders() {
        let doc = synthesizer().generate("1.1.1", &FactMap::new()).unwrap();
        assert_eq!(doc.item_code, "1.1.1");
        assert!(!doc.missing_facts.is_empty());
        assert_eq!(doc.rendered, doc.template);
        assert!(!doc.is_complete());
    }

    #[test]
    fn facts_are_substituted() {
        let synth = synthesizer();
        let empty = synth.generate("2.5.6", &FactMap::new()).unwrap();
        let facts: FactMap = empty
            .missing_facts
            .iter()
            .map(|name| (name.clone(), format!("<{name}>")))
            .collect();

        let doc = synth.generate("2.5.6", &facts).unwrap();
        assert!(doc.is_complete());
        assert!(!doc.rendered.contains("{{"));
        for name in &empty.missing_facts {
            assert!(doc.rendered.contains(&format!("<{name}>")));
        }
    }

    #[test]
    fn partial_facts_leave_markers() {
        let mut facts = FactMap::new();
        facts.insert("organization_name".into(), "한빛정보".into());
        let doc = synthesizer().generate("1.1.1", &facts).unwrap();
        assert!(doc.rendered.contains("한빛정보"));
        assert!(!doc.missing_facts.contains(&"organization_name".to_string()));
        for name in &doc.missing_facts {
            assert!(doc.rendered.contains(&format!("{{{{{name}}}}}")));
        }
    }

    #[test]
    fn every_requirement_renders() {
        let synth = synthesizer();
        for req in synth.store.all() {
            let doc = synth.generate(req.code(), &FactMap::new()).unwrap();
            assert_eq!(doc.title, req.title);
        }
    }

    #[test]
    fn unknown_code_is_not_found() {
        assert!(matches!(
            synthesizer().generate("9.9.9", &FactMap::new()),
            Err(IsmsError::NotFound { .. })
        ));
    }
}
