//! Render a batch for stdout: JSON, human-readable lines, or bare MIME types.

use anyhow::{Context, Result};

use crate::{BatchResult, ClassificationRecord, OutputFormat};

pub fn render(result: &BatchResult, format: OutputFormat) -> Result<String> {
    let records: Vec<&ClassificationRecord> = result.records().collect();
    match format {
        OutputFormat::Json => format_json(&records),
        OutputFormat::Human => Ok(format_human(&records)),
        OutputFormat::Mime => Ok(format_mime(&records)),
    }
}

/// A single record is emitted as an object, anything else as an array.
pub fn format_json(records: &[&ClassificationRecord]) -> Result<String> {
    let out = match records {
        [one] => serde_json::to_string_pretty(one),
        many => serde_json::to_string_pretty(many),
    };
    out.context("serialize results as JSON")
}

pub fn format_human(records: &[&ClassificationRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "{}: {} ({}) [score: {:.2}]",
                r.source_label, r.description, r.mime_type, r.score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_mime(records: &[&ClassificationRecord]) -> String {
    records
        .iter()
        .map(|r| r.mime_type.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, mime: &str) -> ClassificationRecord {
        ClassificationRecord {
            source_label: path.to_string(),
            label: "png".to_string(),
            mime_type: mime.to_string(),
            score: 0.99,
            group: "image".to_string(),
            description: "PNG image data".to_string(),
            is_text: false,
        }
    }

    #[test]
    fn json_single_is_object() {
        let r = record("a.png", "image/png");
        let v: serde_json::Value = serde_json::from_str(&format_json(&[&r]).unwrap()).unwrap();
        assert!(v.is_object());
        assert_eq!(v["path"], "a.png");
        assert_eq!(v["mime_type"], "image/png");
        assert!(v["score"].is_f64());
        for key in ["label", "group", "description", "is_text"] {
            assert!(v.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn json_many_is_array() {
        let a = record("a", "image/png");
        let b = record("b", "text/plain");
        let v: serde_json::Value = serde_json::from_str(&format_json(&[&a, &b]).unwrap()).unwrap();
        assert_eq!(v.as_array().map(Vec::len), Some(2));
        assert_eq!(v[1]["path"], "b");
    }

    #[test]
    fn json_empty_is_empty_array() {
        assert_eq!(format_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn human_line() {
        let r = record("a.png", "image/png");
        assert_eq!(
            format_human(&[&r]),
            "a.png: PNG image data (image/png) [score: 0.99]"
        );
    }

    #[test]
    fn mime_lines() {
        let a = record("a", "image/png");
        let b = record("b", "text/plain");
        assert_eq!(format_mime(&[&a, &b]), "image/png\ntext/plain");
    }
}
