//! Query tokenization.

/// Split a query into distinct lowercase terms.
///
/// Terms are whitespace-delimited; leading and trailing characters that are
/// neither letters nor digits are stripped. Empty terms are dropped and
/// repeats keep their first position.
pub fn tokenize(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for raw in query.split_whitespace() {
        let term = raw
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if !term.is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_queries_have_no_terms() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n").is_empty());
        assert!(tokenize("?! ... --").is_empty());
    }

    #[test]
    fn strips_surrounding_punctuation_only() {
        assert_eq!(tokenize("\"접근권한\"?"), vec!["접근권한"]);
        assert_eq!(tokenize("(ISMS-P)"), vec!["isms-p"]);
        assert_eq!(tokenize("개인정보·이용,"), vec!["개인정보·이용"]);
    }

    #[test]
    fn lowercases_and_dedups() {
        assert_eq!(tokenize("DB db Db 백업"), vec!["db", "백업"]);
    }
}
