use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{Direction, TransactionRecord};

/// Currency marker followed by the numeral. Only the first match in a body counts.
/// Case folding is ASCII only, so look-alikes such as `ſ` do not count as `s`.
const AMOUNT_PATTERN: &str = r"(?i-u:INR|Rs\.?)\s*([0-9]+(?:,[0-9]+)*(?:\.[0-9]{2})?)";

/// Direction keywords in evaluation order. Credit comes first and wins when a
/// body carries both.
const DIRECTION_RULES: &[(&str, Direction)] = &[
    (r"(?i-u:credited|received|refund)", Direction::Credit),
    (r"(?i-u:debited|spent|paid|withdrawn)", Direction::Debit),
];

/// Date format stamped on records extracted from SMS.
pub(crate) const SMS_DATE_FORMAT: &str = "%d/%m/%Y";

/// Why a message body did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Rejection {
    NoAmountFound,
    AmbiguousDirection,
    UnparsableAmount(String),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoAmountFound => write!(f, "no amount"),
            Self::AmbiguousDirection => write!(f, "no credit/debit keyword"),
            Self::UnparsableAmount(numeral) => write!(f, "amount '{numeral}' out of range"),
        }
    }
}

pub(crate) struct MessageParser {
    amount: Regex,
    rules: Vec<DirectionRule>,
}

struct DirectionRule {
    pattern: String,
    regex: Regex,
    direction: Direction,
}

impl MessageParser {
    pub(crate) fn new() -> Result<Self> {
        let amount = Regex::new(AMOUNT_PATTERN).context("Invalid amount pattern")?;
        let mut parser = Self {
            amount,
            rules: Vec::new(),
        };
        for &(pattern, direction) in DIRECTION_RULES {
            parser.push_rule(pattern, direction)?;
        }
        Ok(parser)
    }

    /// Append a direction rule. It is consulted after every rule already present.
    pub(crate) fn push_rule(&mut self, pattern: &str, direction: Direction) -> Result<()> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("Invalid direction pattern: {pattern}"))?;
        self.rules.push(DirectionRule {
            pattern: pattern.to_string(),
            regex,
            direction,
        });
        Ok(())
    }

    /// Extract a record from `body`, dated today. `None` means "not a transaction".
    pub(crate) fn parse(&self, body: &str) -> Option<TransactionRecord> {
        self.parse_on(body, chrono::Local::now().date_naive())
    }

    pub(crate) fn parse_on(&self, body: &str, today: NaiveDate) -> Option<TransactionRecord> {
        match self.extract(body) {
            Ok((direction, magnitude)) => Some(TransactionRecord::from_sms(
                direction,
                magnitude,
                today.format(SMS_DATE_FORMAT).to_string(),
            )),
            Err(reason) => {
                log::debug!("Skipping message ({reason}): {}", preview(body));
                None
            }
        }
    }

    /// Amount magnitude and direction of `body`, or the reason there are none.
    pub(crate) fn extract(&self, body: &str) -> Result<(Direction, Decimal), Rejection> {
        let numeral = self
            .amount
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or(Rejection::NoAmountFound)?;

        let direction = self.classify(body).ok_or(Rejection::AmbiguousDirection)?;

        let magnitude = Decimal::from_str(&numeral.replace(',', ""))
            .map_err(|_| Rejection::UnparsableAmount(numeral.to_string()))?;

        Ok((direction, magnitude))
    }

    /// First rule whose pattern occurs anywhere in `body`.
    pub(crate) fn classify(&self, body: &str) -> Option<Direction> {
        self.rules
            .iter()
            .find(|rule| rule.regex.is_match(body))
            .map(|rule| {
                log::trace!("Matched direction rule '{}'", rule.pattern);
                rule.direction
            })
    }
}

fn preview(body: &str) -> String {
    crate::ui::truncate(&body.replace('\n', " "), 48)
}
