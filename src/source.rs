//! Parser for `.env` style `KEY=VALUE` files.
//!
//! Values may be wrapped in single or double quotes. Quoted content is taken
//! literally, and a quoted value may span several lines (PEM blocks and the
//! like), in which case the line breaks are kept.

use crate::error::ConfigError;
use std::{collections::HashMap, fs, io, path::Path, str::Lines};
use tracing::{debug, warn};

/// Key to raw string value, as read from the source file
pub type RawValues = HashMap<String, String>;

/// Read and parse `path`. A missing file yields an empty mapping
pub fn read_file(path: impl AsRef<Path>) -> Result<RawValues, ConfigError> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, using environment and defaults only");
            return Ok(RawValues::new());
        }
        Err(err) => return Err(err.into()),
    };

    let values = parse_str(&content);
    debug!(path = %path.display(), entries = values.len(), "parsed config file");
    Ok(values)
}

/// Parse the contents of a `.env` style file
pub fn parse_str(content: &str) -> RawValues {
    let mut values = RawValues::new();
    let mut lines = content.lines();
    let mut line_no = 0;

    while let Some(line) = lines.next() {
        line_no += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            warn!(line = line_no, "ignoring line without '=' in config file");
            continue;
        };

        let key = key.trim();
        if !is_valid_key(key) {
            warn!(line = line_no, key, "ignoring line with invalid key in config file");
            continue;
        }

        // Quoted content is literal, so only the unquoted form is trimmed
        let value = value.trim_start();
        let value = match value.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let (value, consumed) = quoted_value(quote, &value[1..], &mut lines);
                if consumed.is_none() {
                    warn!(line = line_no, key, "unterminated quoted value runs to end of file");
                }
                line_no += consumed.unwrap_or(0);
                value
            }
            _ => value.trim_end().to_string(),
        };

        values.insert(key.to_string(), value);
    }

    values
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Collects a quoted value starting after its opening quote.
///
/// Returns the unquoted text and the number of extra lines consumed, or
/// `None` for the count when no closing quote was found before end of input.
fn quoted_value(quote: char, first: &str, lines: &mut Lines<'_>) -> (String, Option<usize>) {
    if let Some(end) = first.rfind(quote) {
        return (first[..end].to_string(), Some(0));
    }

    let mut value = first.to_string();
    let mut consumed = 0;
    for line in lines.by_ref() {
        consumed += 1;
        value.push('\n');
        match line.rfind(quote) {
            Some(end) => {
                value.push_str(&line[..end]);
                return (value, Some(consumed));
            }
            None => value.push_str(line),
        }
    }

    (value, None)
}
