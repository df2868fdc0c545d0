//! `{{name}}` template parsing and rendering.

use isms_core::FactMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

/// Output of [`EvidenceTemplate::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Placeholder names with no fact, first-appearance order, no repeats.
    pub missing: Vec<String>,
}

/// A parsed evidence template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceTemplate {
    segments: Vec<Segment>,
}

impl EvidenceTemplate {
    /// Split `source` into literals and placeholders.
    ///
    /// Parsing never fails. Braces that do not enclose a valid name are
    /// kept as literal text.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(start) = rest.find(OPEN) {
            let after_open = &rest[start + OPEN.len()..];
            match after_open.find(CLOSE) {
                Some(end) if is_placeholder_name(&after_open[..end]) => {
                    literal.push_str(&rest[..start]);
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(after_open[..end].to_string()));
                    rest = &after_open[end + CLOSE.len()..];
                }
                _ => {
                    // Keep one brace and rescan from the next one so that
                    // `{{{name}}` still yields a placeholder.
                    literal.push_str(&rest[..start + 1]);
                    rest = &rest[start + 1..];
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Distinct placeholder names in first-appearance order.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for seg in &self.segments {
            if let Segment::Placeholder(name) = seg {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Substitute facts. Unmatched placeholders are written back as
    /// `{{name}}` and reported in [`Rendered::missing`].
    pub fn render(&self, facts: &FactMap) -> Rendered {
        let mut text = String::new();
        let mut missing: Vec<String> = Vec::new();

        for seg in &self.segments {
            match seg {
                Segment::Literal(s) => text.push_str(s),
                Segment::Placeholder(name) => match facts.get(name) {
                    Some(value) => text.push_str(value),
                    None => {
                        text.push_str(OPEN);
                        text.push_str(name);
                        text.push_str(CLOSE);
                        if !missing.contains(name) {
                            missing.push(name.clone());
                        }
                    }
                },
            }
        }

        Rendered { text, missing }
    }
}

fn is_placeholder_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}
