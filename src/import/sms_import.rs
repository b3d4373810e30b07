use chrono::NaiveDate;

use crate::extract::MessageParser;
use crate::models::TransactionRecord;
use crate::sms::{SmsError, SmsFilter, SmsSource};

/// Outcome of one SMS import. A failed fetch is carried as `warning`, never as an error.
#[derive(Debug, Default)]
pub(crate) struct ImportReport {
    pub(crate) fetched: usize,
    pub(crate) records: Vec<TransactionRecord>,
    pub(crate) warning: Option<String>,
}

impl ImportReport {
    pub(crate) fn skipped(&self) -> usize {
        self.fetched - self.records.len()
    }
}

/// Fetch one batch from `source` and extract a record from every message that
/// parses, in message order. A denied or failed fetch yields no records.
pub(crate) async fn import_batch<S: SmsSource>(
    source: &S,
    filter: &SmsFilter,
    parser: &MessageParser,
    today: NaiveDate,
) -> ImportReport {
    let messages = match source.list_messages(filter).await {
        Ok(messages) => messages,
        Err(e) => {
            match &e {
                SmsError::PermissionDenied(_) => log::warn!("SMS permission denied: {e}"),
                _ => log::warn!("Failed to get SMS: {e}"),
            }
            return ImportReport {
                warning: Some(e.to_string()),
                ..Default::default()
            };
        }
    };

    let records: Vec<TransactionRecord> = messages
        .iter()
        .filter_map(|m| parser.parse_on(&m.body, today))
        .collect();

    log::info!(
        "Extracted {} transactions from {} messages",
        records.len(),
        messages.len()
    );

    ImportReport {
        fetched: messages.len(),
        records,
        warning: None,
    }
}
