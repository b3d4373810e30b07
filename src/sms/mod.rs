mod export;

use regex::Regex;
use std::path::PathBuf;
use thiserror::Error;

pub(crate) use export::ExportFileSource;

/// Coarse keyword pre-filter applied before a message reaches the parser.
pub(crate) const DEFAULT_BODY_PATTERN: &str =
    r"(?i)(?:credited|debited|spent|received|refund|withdrawn)";

/// Number of messages handed over per import.
pub(crate) const DEFAULT_MAX_COUNT: usize = 10;

#[derive(Debug, Error)]
pub(crate) enum SmsError {
    #[error("SMS permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read SMS source {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed SMS export: {0}")]
    Malformed(String),

    #[error("Invalid SMS body filter: {0}")]
    InvalidFilter(#[from] regex::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Folder {
    Inbox,
    Sent,
    Draft,
    Other,
}

impl Folder {
    pub(crate) fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "inbox" | "1" => Self::Inbox,
            "sent" | "2" => Self::Sent,
            "draft" | "3" => Self::Draft,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SmsMessage {
    pub(crate) body: String,
    pub(crate) read: bool,
    pub(crate) folder: Folder,
    /// Milliseconds since the epoch, when the export carries it.
    pub(crate) date: Option<i64>,
}

impl SmsMessage {
    #[cfg(test)]
    pub(crate) fn inbox(body: &str) -> Self {
        Self {
            body: body.to_string(),
            read: false,
            folder: Folder::Inbox,
            date: None,
        }
    }
}

/// Which messages an import asks for.
#[derive(Debug, Clone)]
pub(crate) struct SmsFilter {
    pub(crate) folder: Folder,
    pub(crate) unread_only: bool,
    pub(crate) body_pattern: Option<String>,
    pub(crate) index_from: usize,
    pub(crate) max_count: usize,
}

impl Default for SmsFilter {
    fn default() -> Self {
        Self {
            folder: Folder::Inbox,
            unread_only: true,
            body_pattern: Some(DEFAULT_BODY_PATTERN.to_string()),
            index_from: 0,
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

impl SmsFilter {
    /// Keep matching messages, newest first, then window by `index_from` / `max_count`.
    /// Messages without a date sort after dated ones, in input order.
    pub(crate) fn apply(&self, messages: Vec<SmsMessage>) -> Result<Vec<SmsMessage>, SmsError> {
        let body_regex = self.body_pattern.as_deref().map(Regex::new).transpose()?;

        let mut kept: Vec<SmsMessage> = messages
            .into_iter()
            .filter(|m| m.folder == self.folder)
            .filter(|m| !(self.unread_only && m.read))
            .filter(|m| body_regex.as_ref().map_or(true, |re| re.is_match(&m.body)))
            .collect();

        kept.sort_by_key(|m| std::cmp::Reverse(m.date.unwrap_or(i64::MIN)));

        Ok(kept
            .into_iter()
            .skip(self.index_from)
            .take(self.max_count)
            .collect())
    }
}

/// Anything that can hand over a batch of SMS messages.
///
/// Dropping the returned future discards the batch; there are no partial results.
pub(crate) trait SmsSource {
    async fn list_messages(&self, filter: &SmsFilter) -> Result<Vec<SmsMessage>, SmsError>;
}
