//! Printing engine responses.

use anyhow::Result;
use serde::Serialize;

/// How a subcommand prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Korean plain text.
    Text,
    /// Pretty-printed serde JSON.
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Format `value` as JSON or through `text`.
pub fn format<T, F>(format: OutputFormat, value: &T, text: F) -> Result<String>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Text => text(value),
    })
}

/// Print `value` to stdout.
pub fn emit<T, F>(fmt: OutputFormat, value: &T, text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    let rendered = format(fmt, value, text)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        code: &'static str,
    }

    #[test]
    fn json_and_text_forms() {
        let s = Sample { code: "2.5.6" };
        let json = format(OutputFormat::Json, &s, |_| unreachable!()).unwrap();
        assert_eq!(json, "{\n  \"code\": \"2.5.6\"\n}");
        let text = format(OutputFormat::Text, &s, |v| format!("[{}]", v.code)).unwrap();
        assert_eq!(text, "[2.5.6]");
    }
}
