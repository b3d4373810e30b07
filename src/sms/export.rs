use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::{Folder, SmsError, SmsFilter, SmsMessage, SmsSource};

/// SMS messages read from an export file on disk.
///
/// Two layouts are understood: a JSON array of message objects (the shape
/// Android SMS list exporters produce: `body`, `read`, `type` or `box`, `date`)
/// and a CSV file with a header row containing at least a `body` column.
pub(crate) struct ExportFileSource {
    path: PathBuf,
}

impl ExportFileSource {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl SmsSource for ExportFileSource {
    async fn list_messages(&self, filter: &SmsFilter) -> Result<Vec<SmsMessage>, SmsError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| map_io_error(&self.path, e))?;

        let messages = parse_export(&content)?;
        log::debug!(
            "Read {} messages from {}",
            messages.len(),
            self.path.display()
        );
        filter.apply(messages)
    }
}

/// A refused read is a permission problem, anything else leaves the file unreadable.
pub(crate) fn map_io_error(path: &Path, err: std::io::Error) -> SmsError {
    match err.kind() {
        std::io::ErrorKind::PermissionDenied => SmsError::PermissionDenied(path.to_path_buf()),
        _ => SmsError::Unreadable {
            path: path.to_path_buf(),
            source: err,
        },
    }
}

/// Parse an export, picking JSON or CSV by its first non-blank character.
pub(crate) fn parse_export(content: &str) -> Result<Vec<SmsMessage>, SmsError> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        parse_json(trimmed)
    } else {
        parse_csv(trimmed)
    }
}

#[derive(Deserialize)]
struct RawSms {
    body: String,
    #[serde(default)]
    read: Option<Value>,
    #[serde(rename = "type", default)]
    kind: Option<Value>,
    #[serde(rename = "box", alias = "folder", default)]
    folder: Option<String>,
    #[serde(default)]
    date: Option<Value>,
}

fn parse_json(content: &str) -> Result<Vec<SmsMessage>, SmsError> {
    let raw: Vec<RawSms> =
        serde_json::from_str(content).map_err(|e| SmsError::Malformed(e.to_string()))?;

    Ok(raw
        .into_iter()
        .map(|r| {
            let folder = match (&r.folder, &r.kind) {
                (Some(name), _) => Folder::parse(name),
                (None, Some(kind)) => Folder::parse(&value_text(kind)),
                (None, None) => Folder::Inbox,
            };
            SmsMessage {
                body: r.body,
                read: r.read.as_ref().is_some_and(value_flag),
                folder,
                date: r.date.as_ref().and_then(value_int),
            }
        })
        .collect())
}

fn parse_csv(content: &str) -> Result<Vec<SmsMessage>, SmsError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| SmsError::Malformed(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let body_col = col_index(&headers, &["body", "message", "text"])
        .ok_or_else(|| SmsError::Malformed("CSV export has no 'body' column".into()))?;
    let read_col = col_index(&headers, &["read"]);
    let folder_col = col_index(&headers, &["box", "folder", "type"]);
    let date_col = col_index(&headers, &["date"]);

    let mut messages = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| SmsError::Malformed(format!("row {}: {e}", i + 1)))?;
        let field = |col: Option<usize>| col.and_then(|c| record.get(c)).map(str::trim);

        let Some(body) = field(Some(body_col)) else {
            continue;
        };
        messages.push(SmsMessage {
            body: body.to_string(),
            read: field(read_col).is_some_and(text_flag),
            folder: field(folder_col)
                .filter(|s| !s.is_empty())
                .map_or(Folder::Inbox, Folder::parse),
            date: field(date_col).and_then(|s| s.parse().ok()),
        });
    }
    Ok(messages)
}

fn col_index(headers: &[String], names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| names.contains(&h.as_str()))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn value_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        Value::String(s) => text_flag(s),
        _ => false,
    }
}

fn value_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text_flag(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "read")
}
