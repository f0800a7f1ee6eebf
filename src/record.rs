//! The parsed message record.
//!
//! This module provides [`Record`], the atomic unit every aggregation works
//! over: one timestamped message with a sender and a body. The parser emits
//! records in the chronological order they appear in the export.
//!
//! # Reserved values
//!
//! Two literals from the WhatsApp export format are load-bearing:
//!
//! - [`GROUP_NOTIFICATION`] — the sender assigned to system lines that carry
//!   no human author ("Bob added Alice", encryption notices). It is a real
//!   sender value, not an absence marker: it participates in overall message
//!   counts and share tables.
//! - [`MEDIA_OMITTED`] — the body WhatsApp substitutes for non-text
//!   attachments. Bodies are compared against it after trailing whitespace
//!   has been trimmed at parse time.
//!
//! # Example
//!
//! ```
//! use chatscope::Record;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2023, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//! let record = Record::new(date, "Alice", "hi");
//!
//! assert_eq!(record.year(), 2023);
//! assert_eq!(record.month_name(), "January");
//! assert_eq!(record.day_name(), "Sunday");
//! assert!(!record.is_notification());
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Reserved sender value for system-generated lines with no human author.
pub const GROUP_NOTIFICATION: &str = "group_notification";

/// Body text the export substitutes for non-text attachments.
pub const MEDIA_OMITTED: &str = "<Media omitted>";

/// One parsed chat message.
///
/// The calendar accessors expose the derived columns the analysis queries
/// group by (`year`, `month`, `day_name`, ...) so aggregations never reach
/// into chrono directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// When the message was sent. Exports carry no timezone, so this is a
    /// naive local timestamp.
    pub date: NaiveDateTime,

    /// Sender name, never empty. Lines without a recognizable sender get
    /// [`GROUP_NOTIFICATION`].
    pub user: String,

    /// Message body with trailing whitespace trimmed.
    pub message: String,
}

impl Record {
    /// Creates a new record.
    pub fn new(date: NaiveDateTime, user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            date,
            user: user.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a system line rather than a human message.
    pub fn is_notification(&self) -> bool {
        self.user == GROUP_NOTIFICATION
    }

    /// Returns `true` if the body is the media placeholder.
    pub fn is_media(&self) -> bool {
        self.message == MEDIA_OMITTED
    }

    // =========================================================================
    // Calendar accessors
    // =========================================================================

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// English month name ("January" .. "December").
    pub fn month_name(&self) -> String {
        self.date.format("%B").to_string()
    }

    /// Month number, 1-based.
    pub fn month_num(&self) -> u32 {
        self.date.month()
    }

    /// Day of month.
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Hour of day, 0-23.
    pub fn hour(&self) -> u32 {
        self.date.hour()
    }

    /// Minute of hour.
    pub fn minute(&self) -> u32 {
        self.date.minute()
    }

    /// Calendar date without the time component.
    pub fn only_date(&self) -> NaiveDate {
        self.date.date()
    }

    /// English weekday name ("Monday" .. "Sunday").
    pub fn day_name(&self) -> String {
        self.date.format("%A").to_string()
    }
}
