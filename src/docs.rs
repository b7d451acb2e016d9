use crate::field::FieldDescriptor;
use std::{fs, path::Path};

/// Render configuration fields as a markdown table
pub fn render_markdown(fields: &[FieldDescriptor]) -> String {
    let mut md = String::new();

    md.push_str("## Environment Variables Summary\n\n");
    md.push_str("| Variable | Required | Type | Description | Default |\n");
    md.push_str("|----------|----------|------|-------------|---------|\n");
    for field in fields.iter().filter(|field| !field.is_skipped()) {
        let required_str = if field.is_required() { "Yes" } else { "No" };
        let default_display = match field.default {
            Some(default) if !default.is_empty() => default,
            _ => "-",
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            field.key, required_str, field.kind, field.description, default_display
        ));
    }

    md
}

/// Write configuration documentation to a markdown file
pub fn write_docs(fields: &[FieldDescriptor], path: impl AsRef<Path>) -> std::io::Result<()> {
    fs::write(path, render_markdown(fields))
}
