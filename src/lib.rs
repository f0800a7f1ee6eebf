//! # Chatscope
//!
//! A Rust library for parsing WhatsApp chat exports and computing
//! per-participant activity statistics.
//!
//! ## Overview
//!
//! Chatscope takes one exported chat transcript (the single text blob
//! WhatsApp produces) and turns it into:
//!
//! - an ordered sequence of [`Record`]s (timestamp, sender, body), with
//!   system lines attributed to the reserved `group_notification` sender;
//! - a set of aggregations over those records — message/word/media/link
//!   totals, sender rankings and share tables, word and emoji frequencies,
//!   and monthly/daily/weekday activity timelines — each scoped to either
//!   the whole chat or one participant.
//!
//! Chart rendering is out of scope: the aggregations return plain data that
//! any presentation layer can plot.
//!
//! ## Quick Start
//!
//! ```
//! use chatscope::parser::{self, ParseOutcome};
//! use chatscope::scope::Scope;
//! use chatscope::stats;
//!
//! fn main() -> chatscope::Result<()> {
//!     let export = "1/1/23, 10:00 am - Alice: hi\n\
//!                   1/1/23, 10:05 am - Bob added Alice\n";
//!
//!     // A file with no recognizable delimiter is Corrupted, not an error:
//!     // always branch before aggregating.
//!     let ParseOutcome::Parsed(records) = parser::parse(export)? else {
//!         eprintln!("unreadable export");
//!         return Ok(());
//!     };
//!
//!     let totals = stats::usage_totals(&Scope::Overall, &records);
//!     assert_eq!(totals.messages, 2);
//!
//!     let mine = stats::usage_totals(&Scope::sender("Alice"), &records);
//!     assert_eq!(mine.messages, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] — export text → records ([`ParseOutcome`](parser::ParseOutcome))
//! - [`record`] — [`Record`] and the reserved export literals
//! - [`scope`] — [`Scope`](scope::Scope) selection and the participant list
//! - [`stats`] — the aggregation queries
//! - [`report`] — [`AnalysisReport`](report::AnalysisReport) assembly, JSON
//!   rendering, CSV record export
//! - [`cli`] — CLI types ([`Args`](cli::Args), [`ReportFormat`](cli::ReportFormat))
//! - [`error`] — [`ChatscopeError`] and [`Result`]

pub mod cli;
pub mod error;
pub mod parser;
pub mod record;
pub mod report;
pub mod scope;
pub mod stats;
mod text;

// Re-export the main types at the crate root for convenience
pub use error::{ChatscopeError, Result};
pub use record::Record;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatscope::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Record;

    pub use crate::error::{ChatscopeError, Result};

    pub use crate::parser::{ParseOutcome, parse, parse_file};

    pub use crate::record::{GROUP_NOTIFICATION, MEDIA_OMITTED};

    pub use crate::scope::{Scope, sender_choices};

    pub use crate::stats::{
        Count, UsageTotals, daily_timeline, monthly_timeline, most_active_senders,
        most_common_emojis, most_common_words, month_activity, usage_totals, weekday_activity,
        wordcloud_text,
    };

    pub use crate::report::{AnalysisReport, analyze, to_json, write_records_csv};

    pub use crate::cli::ReportFormat;
}
