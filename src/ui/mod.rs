//! Output formatting for discovered applications
//!
//! The renderers return strings so they can be tested without capturing
//! stdout.

use console::Style;

use crate::domain::ApplicationRecord;
use crate::error::Result;

/// Render records as a human-readable listing
pub fn render_text(records: &[ApplicationRecord]) -> String {
    if records.is_empty() {
        return "No applications found.\n".to_string();
    }

    let name_width = records
        .iter()
        .map(|r| r.versioned_name().len())
        .max()
        .unwrap_or(0);

    let mut out = format!("Discovered applications ({}):\n\n", records.len());
    for record in records {
        let versioned = record.versioned_name();
        let padding = " ".repeat(name_width - versioned.len());
        let marker = if record.is_linked() {
            Style::new().cyan().apply_to(" (override)").to_string()
        } else {
            String::new()
        };
        out.push_str(&format!(
            "  {}{padding}  {}{marker}\n",
            Style::new().bold().yellow().apply_to(&versioned),
            record.dir().display(),
        ));
        if !record.applications().is_empty() {
            out.push_str(&format!(
                "    {} {}\n",
                Style::new().bold().apply_to("applications:"),
                record.applications().join(", ")
            ));
        }
        if !record.included_applications().is_empty() {
            out.push_str(&format!(
                "    {} {}\n",
                Style::new().bold().apply_to("included:"),
                record.included_applications().join(", ")
            ));
        }
    }
    out
}

/// Render records as pretty-printed JSON
pub fn render_json(records: &[ApplicationRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, deps: &[&str]) -> ApplicationRecord {
        ApplicationRecord::new(
            name,
            "1.0.0",
            format!("/lib/{name}"),
            deps.iter().map(|d| (*d).to_string()).collect(),
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render_text(&[]), "No applications found.\n");
    }

    #[test]
    fn test_render_text_lists_records() {
        let text = render_text(&[
            record("cowboy", &["ranch"]),
            record("ranch", &[]).into_linked(),
        ]);
        assert!(text.contains("Discovered applications (2)"));
        assert!(text.contains("cowboy-1.0.0"));
        assert!(text.contains("/lib/cowboy"));
        assert!(text.contains("ranch"));
        assert!(text.contains("(override)"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&[record("cowboy", &["ranch"])]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "cowboy");
        assert_eq!(value[0]["applications"][0], "ranch");
        assert_eq!(value[0]["linked"], false);
    }
}
