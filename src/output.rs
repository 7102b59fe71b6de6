use colored::Colorize;
use serde_json::Value as JsonValue;

use crate::db::ResultRow;

/// Output format for results
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true
        }
    }
}

/// Format result rows based on output options
pub fn format_rows(rows: &[ResultRow], opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(rows).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(rows).unwrap_or_default(),
        OutputFormat::Text => format_text_table(rows, opts)
    }
}

fn format_text_table(rows: &[ResultRow], opts: &OutputOptions) -> String {
    let Some(first) = rows.first() else {
        return String::from("(no rows)\n");
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();

    // Column widths sized to the longest cell, in chars to match the
    // char-counted padding of format!
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    for row in rows {
        let mut line = Vec::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let text = row.get(*header).map(render_value).unwrap_or_default();
            let chars = text.chars().count();
            if chars > widths[i] {
                widths[i] = chars;
            }
            line.push(text);
        }
        cells.push(line);
    }

    let mut table = String::new();
    let header_line = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect::<Vec<_>>()
        .join(" | ");
    if opts.colored {
        table.push_str(&header_line.cyan().bold().to_string());
    } else {
        table.push_str(&header_line);
    }
    table.push('\n');

    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");
    table.push_str(&separator);
    table.push('\n');

    for line in &cells {
        let row_line = line
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:width$}", c, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" | ");
        table.push_str(&row_line);
        table.push('\n');
    }

    table.push_str(&format!(
        "\n({} row{})\n",
        rows.len(),
        if rows.len() == 1 { "" } else { "s" }
    ));
    table
}

fn render_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::from("NULL"),
        JsonValue::String(s) => s.clone(),
        other => other.to_string()
    }
}
