//! Reading status and fact files.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

use isms_core::FactMap;

/// Parse a YAML or JSON document. `-` reads standard input; `.json` files
/// are JSON, everything else YAML (a superset of JSON).
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read standard input")?;
        return serde_yaml::from_str(&text).context("failed to parse standard input");
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
    } else {
        serde_yaml::from_str(&text).with_context(|| format!("invalid YAML in {}", path.display()))
    }
}

/// Read an optional document, falling back to `T::default()`.
pub fn read_optional<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        Some(path) => read_document(path),
        None => Ok(T::default()),
    }
}

/// Parse one `KEY=VALUE` fact flag.
pub fn parse_fact(raw: &str) -> Result<(String, String)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("fact must be KEY=VALUE, got {raw:?}");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("fact name is empty in {raw:?}");
    }
    Ok((key.to_string(), value.to_string()))
}

/// Facts from an optional file, with `KEY=VALUE` flags layered on top.
pub fn collect_facts(file: Option<&Path>, flags: &[String]) -> Result<FactMap> {
    let mut facts: FactMap = read_optional(file)?;
    for raw in flags {
        let (key, value) = parse_fact(raw)?;
        facts.insert(key, value);
    }
    Ok(facts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use isms_core::{ComplianceState, StatusMap};

    #[test]
    fn yaml_and_json_status_files() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("status.yaml");
        std::fs::write(&yaml, "\"1.1.1\": satisfied\n").unwrap();
        let json = dir.path().join("status.json");
        std::fs::write(&json, r#"{"1.1.2": {"state": "in_progress"}}"#).unwrap();

        let a: StatusMap = read_document(&yaml).unwrap();
        let b: StatusMap = read_document(&json).unwrap();
        assert_eq!(a["1.1.1"].state, ComplianceState::Satisfied);
        assert_eq!(b["1.1.2"].state, ComplianceState::InProgress);
    }

    #[test]
    fn bad_state_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.yaml");
        std::fs::write(&path, "\"1.1.1\": done\n").unwrap();
        assert!(read_document::<StatusMap>(&path).is_err());
    }

    #[test]
    fn fact_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facts.yaml");
        std::fs::write(&path, "organization_name: 구회사\nreview_date: 2026-01-05\n").unwrap();
        let facts = collect_facts(
            Some(&path),
            &["organization_name=한빛정보".to_string(), "cpo_name=김보안".to_string()],
        )
        .unwrap();
        assert_eq!(facts["organization_name"], "한빛정보");
        assert_eq!(facts["review_date"], "2026-01-05");
        assert_eq!(facts["cpo_name"], "김보안");
    }

    #[test]
    fn malformed_fact_flag() {
        assert!(parse_fact("no_equals").is_err());
        assert!(parse_fact("=value").is_err());
        assert_eq!(parse_fact("a=b=c").unwrap(), ("a".into(), "b=c".into()));
    }
}
