//! Analysis scope: the whole chat or one participant.
//!
//! Every aggregation takes a [`Scope`] and the full record slice, and filters
//! first. This keeps the queries pure: no shared state, no pre-filtered
//! copies floating around.

use std::collections::BTreeSet;
use std::fmt;

use crate::record::Record;

/// Label for the scope covering every participant.
pub const OVERALL: &str = "Overall";

/// The subset of records under analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// All records.
    Overall,
    /// Records from one sender.
    Sender(String),
}

impl Scope {
    /// Creates a sender scope.
    pub fn sender(name: impl Into<String>) -> Self {
        Scope::Sender(name.into())
    }

    /// Returns `true` if this scope covers every participant.
    pub fn is_overall(&self) -> bool {
        matches!(self, Scope::Overall)
    }

    /// Returns `true` if `record` belongs to this scope.
    pub fn includes(&self, record: &Record) -> bool {
        match self {
            Scope::Overall => true,
            Scope::Sender(name) => record.user == *name,
        }
    }

    /// Restricts `records` to this scope, preserving order.
    pub fn filter<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.includes(r)).collect()
    }

    /// The display label for this scope.
    pub fn label(&self) -> &str {
        match self {
            Scope::Overall => OVERALL,
            Scope::Sender(name) => name,
        }
    }
}

impl From<&str> for Scope {
    fn from(value: &str) -> Self {
        if value == OVERALL {
            Scope::Overall
        } else {
            Scope::Sender(value.to_string())
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The participant list a presentation layer offers for scope selection:
/// distinct senders excluding the group-notification pseudo-sender, sorted,
/// with [`OVERALL`] prepended.
pub fn sender_choices(records: &[Record]) -> Vec<String> {
    let distinct: BTreeSet<&str> = records
        .iter()
        .filter(|r| !r.is_notification())
        .map(|r| r.user.as_str())
        .collect();

    let mut choices = Vec::with_capacity(distinct.len() + 1);
    choices.push(OVERALL.to_string());
    choices.extend(distinct.into_iter().map(String::from));
    choices
}
