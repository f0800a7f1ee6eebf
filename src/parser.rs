//! WhatsApp TXT export parser.
//!
//! Exports are a single text blob of interleaved timestamped lines:
//!
//! ```text
//! 1/1/23, 10:00 am - Alice: hi
//! 1/1/23, 10:05 am - Bob added Alice
//! 2/1/23, 9:15 pm - Bob: multi
//! line body
//! ```
//!
//! Every message starts with a line-start delimiter token of the form
//! `D/M/YY, H:MM am/pm - ` (day/month 1-2 digits, year 2 or 4 digits,
//! 12-hour time, either meridiem case). The text between two consecutive
//! delimiters is the body of the earlier one, so multiline messages need no
//! special handling. Newer exports put a narrow no-break space (U+202F)
//! before the meridiem marker; it is normalized to an ordinary space before
//! timestamp parsing.
//!
//! The delimiter is recognized with a hand-rolled cursor scanner rather than
//! a regex: the grammar is small and fixed, and an explicit tokenizer keeps
//! it readable without any backtracking.
//!
//! Two failure shapes are deliberately distinct:
//!
//! - No delimiter matches anywhere → [`ParseOutcome::Corrupted`], a value the
//!   caller must branch on before aggregating.
//! - A matched timestamp fails strict calendar parsing →
//!   [`ChatscopeError::Timestamp`], fatal for the whole parse.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::{ChatscopeError, Result};
use crate::record::{GROUP_NOTIFICATION, Record};

/// Fixed message surfaced when no delimiter matches the input.
pub const CORRUPTED_EXPORT: &str = "your chat file is corrupted or something went wrong!";

/// Accepted timestamp layouts. Two-digit years are the common case; the
/// four-digit form covers what the delimiter grammar also admits. Order
/// matters: `%y` must come first so `1/1/23` maps to 2023, not year 23.
const STAMP_FORMATS: [&str; 2] = ["%d/%m/%y, %I:%M %p", "%d/%m/%Y, %I:%M %p"];

/// Result of parsing one export.
///
/// `Corrupted` is not an error: it is the well-defined outcome for a file in
/// which no message delimiter was found. Callers must check for it before
/// invoking any aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// The export parsed into an ordered record sequence.
    Parsed(Vec<Record>),
    /// No delimiter matched anywhere; carries the fixed corruption message.
    Corrupted(String),
}

impl ParseOutcome {
    /// Returns `true` if the export could not be recognized.
    pub fn is_corrupted(&self) -> bool {
        matches!(self, ParseOutcome::Corrupted(_))
    }

    /// Returns the records if the export parsed.
    pub fn records(&self) -> Option<&[Record]> {
        match self {
            ParseOutcome::Parsed(records) => Some(records),
            ParseOutcome::Corrupted(_) => None,
        }
    }

    /// Consumes the outcome, returning the records if the export parsed.
    pub fn into_records(self) -> Option<Vec<Record>> {
        match self {
            ParseOutcome::Parsed(records) => Some(records),
            ParseOutcome::Corrupted(_) => None,
        }
    }
}

/// Parses a full chat export from a string.
///
/// # Example
///
/// ```
/// use chatscope::parser;
///
/// let outcome = parser::parse("1/1/23, 10:00 am - Alice: hi\n")?;
/// let records = outcome.records().unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].user, "Alice");
/// assert_eq!(records[0].message, "hi");
///
/// assert!(parser::parse("not a chat export")?.is_corrupted());
/// # Ok::<(), chatscope::ChatscopeError>(())
/// ```
///
/// # Errors
///
/// Returns [`ChatscopeError::Timestamp`] when a matched delimiter carries a
/// date that fails strict parsing (e.g. month 13). Unrecognizable input is
/// not an error; see [`ParseOutcome::Corrupted`].
pub fn parse(text: &str) -> Result<ParseOutcome> {
    let hits = scan_delimiters(text);
    if hits.is_empty() {
        return Ok(ParseOutcome::Corrupted(CORRUPTED_EXPORT.to_string()));
    }

    let mut records = Vec::with_capacity(hits.len());
    for (i, hit) in hits.iter().enumerate() {
        let chunk_end = hits.get(i + 1).map_or(text.len(), |next| next.start);
        let chunk = &text[hit.body_start..chunk_end];
        let date = parse_stamp(&hit.stamp)?;

        let (user, body) = match split_sender(chunk) {
            Some((user, body)) => (user, body),
            None => (GROUP_NOTIFICATION, chunk),
        };

        records.push(Record::new(date, user, body.trim_end()));
    }

    Ok(ParseOutcome::Parsed(records))
}

/// Reads and parses a chat export file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParseOutcome> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

/// One delimiter occurrence in the source text.
struct DelimiterHit {
    /// Byte offset where the delimiter token starts (a line start).
    start: usize,
    /// Byte offset just past the token; the message chunk begins here.
    body_start: usize,
    /// The date/time portion, U+202F already normalized to a space.
    stamp: String,
}

/// Scans every line start for a delimiter token.
fn scan_delimiters(text: &str) -> Vec<DelimiterHit> {
    let mut hits = Vec::new();
    let mut line_start = 0;

    loop {
        if let Some(token) = match_delimiter(&text[line_start..]) {
            let stamp = text[line_start..line_start + token.stamp_len].replace('\u{202f}', " ");
            hits.push(DelimiterHit {
                start: line_start,
                body_start: line_start + token.consumed,
                stamp,
            });
        }
        match text[line_start..].find('\n') {
            Some(offset) => line_start += offset + 1,
            None => break,
        }
    }

    hits
}

struct DelimiterToken {
    /// Length of the date/time portion, up to and including the meridiem.
    stamp_len: usize,
    /// Total token length including the ` - ` separator.
    consumed: usize,
}

/// Matches the delimiter grammar at the start of `text`.
///
/// Grammar: `digits{1,2} '/' digits{1,2} '/' digits{2|4} ', ' digits{1,2}
/// ':' digits{2} (' '|U+202F) [aApP] [mM] ' ' '-' (' '|'\n')`.
fn match_delimiter(text: &str) -> Option<DelimiterToken> {
    let mut cur = Cursor::new(text);

    cur.digits(1, 2)?;
    cur.literal('/')?;
    cur.digits(1, 2)?;
    cur.literal('/')?;
    cur.year_digits()?;
    cur.literal(',')?;
    cur.literal(' ')?;
    cur.digits(1, 2)?;
    cur.literal(':')?;
    cur.digits(2, 2)?;
    cur.one_of(&[' ', '\u{202f}'])?;
    cur.one_of(&['a', 'A', 'p', 'P'])?;
    cur.one_of(&['m', 'M'])?;
    let stamp_len = cur.pos;
    cur.literal(' ')?;
    cur.literal('-')?;
    // The separator is terminated by the space before the chunk, or directly
    // by the line break when the message itself starts on the next line.
    cur.one_of(&[' ', '\n'])?;

    Some(DelimiterToken {
        stamp_len,
        consumed: cur.pos,
    })
}

/// Minimal forward-only cursor over a candidate delimiter line.
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Consumes a digit run of length `min..=max`. A longer run fails: the
    /// grammar is anchored at the line start, so `123/...` is not a date.
    fn digits(&mut self, min: usize, max: usize) -> Option<()> {
        let run = self
            .rest()
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if run < min || run > max {
            return None;
        }
        self.pos += run;
        Some(())
    }

    /// Consumes a year: exactly two or exactly four digits.
    fn year_digits(&mut self) -> Option<()> {
        let run = self
            .rest()
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if run != 2 && run != 4 {
            return None;
        }
        self.pos += run;
        Some(())
    }

    fn literal(&mut self, expected: char) -> Option<()> {
        if self.rest().starts_with(expected) {
            self.pos += expected.len_utf8();
            Some(())
        } else {
            None
        }
    }

    fn one_of(&mut self, options: &[char]) -> Option<()> {
        options.iter().find_map(|&c| self.literal(c))
    }
}

/// Parses a normalized date/time stamp, trying each accepted layout.
fn parse_stamp(stamp: &str) -> Result<NaiveDateTime> {
    for format in STAMP_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(stamp, format) {
            return Ok(date);
        }
    }
    Err(ChatscopeError::timestamp(stamp))
}

/// Splits a chunk into sender and body at the first `": "` whose colon is
/// preceded by a non-whitespace character. Returns `None` for chunks with no
/// sender attribution (system notifications).
fn split_sender(chunk: &str) -> Option<(&str, &str)> {
    let mut search = 0;
    while let Some(offset) = chunk[search..].find(": ") {
        let at = search + offset;
        let attributed = chunk[..at]
            .chars()
            .next_back()
            .is_some_and(|c| !c.is_whitespace());
        if attributed {
            return Some((&chunk[..at], &chunk[at + 2..]));
        }
        search = at + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn parsed(text: &str) -> Vec<Record> {
        parse(text).unwrap().into_records().expect("valid export")
    }

    #[test]
    fn test_single_message() {
        let records = parsed("1/1/23, 10:00 am - Alice: hi\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user, "Alice");
        assert_eq!(records[0].message, "hi");
        assert_eq!(
            records[0].date,
            NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_system_line_falls_back_to_group_notification() {
        let records = parsed("1/1/23, 10:00 am - Alice: hi\n1/1/23, 10:05 am - Bob added Alice\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].user, GROUP_NOTIFICATION);
        assert_eq!(records[1].message, "Bob added Alice");
    }

    #[test]
    fn test_pm_time() {
        let records = parsed("2/3/23, 9:15 pm - Bob: evening\n");
        assert_eq!(records[0].date.hour(), 21);
        assert_eq!(records[0].date.minute(), 15);
    }

    #[test]
    fn test_narrow_no_break_space_before_meridiem() {
        let records = parsed("1/1/23, 10:00\u{202f}am - Alice: hi\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user, "Alice");
    }

    #[test]
    fn test_uppercase_meridiem() {
        let records = parsed("1/1/23, 10:00 AM - Alice: hi\n");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_four_digit_year() {
        let records = parsed("1/1/2023, 10:00 am - Alice: hi\n");
        assert_eq!(records[0].year(), 2023);
    }

    #[test]
    fn test_multiline_body() {
        let records = parsed("1/1/23, 10:00 am - Alice: first\nsecond line\n1/1/23, 10:01 am - Bob: ok\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "first\nsecond line");
    }

    #[test]
    fn test_preamble_before_first_delimiter_is_discarded() {
        let records = parsed("exported by someone\n1/1/23, 10:00 am - Alice: hi\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "hi");
    }

    #[test]
    fn test_corrupted_input_yields_sentinel() {
        let outcome = parse("nothing that looks like a chat here").unwrap();
        assert!(outcome.is_corrupted());
        assert_eq!(outcome, ParseOutcome::Corrupted(CORRUPTED_EXPORT.into()));
        assert!(outcome.records().is_none());
    }

    #[test]
    fn test_empty_input_yields_sentinel() {
        assert!(parse("").unwrap().is_corrupted());
    }

    #[test]
    fn test_malformed_month_is_fatal() {
        let err = parse("31/13/23, 10:00 am - Alice: hi\n").unwrap_err();
        assert!(err.is_timestamp());
    }

    #[test]
    fn test_thirteen_oclock_is_fatal() {
        // Matches the delimiter grammar but violates 12-hour time.
        let err = parse("1/1/23, 13:00 pm - Alice: hi\n").unwrap_err();
        assert!(err.is_timestamp());
    }

    #[test]
    fn test_colon_inside_body_keeps_first_split() {
        let records = parsed("1/1/23, 10:00 am - Alice: re: the plan\n");
        assert_eq!(records[0].user, "Alice");
        assert_eq!(records[0].message, "re: the plan");
    }

    #[test]
    fn test_colon_after_whitespace_is_not_a_sender() {
        // The colon is preceded by a space, so there is no attribution.
        let records = parsed("1/1/23, 10:00 am - : hello\n");
        assert_eq!(records[0].user, GROUP_NOTIFICATION);
        assert_eq!(records[0].message, ": hello");
    }

    #[test]
    fn test_mid_line_date_does_not_split() {
        let records =
            parsed("1/1/23, 10:00 am - Alice: meet on 2/2/23, 10:00 am - ish?\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "meet on 2/2/23, 10:00 am - ish?");
    }

    #[test]
    fn test_order_follows_source() {
        let records = parsed(
            "1/1/23, 10:00 am - Alice: one\n1/1/23, 10:01 am - Bob: two\n1/1/23, 10:02 am - Alice: three\n",
        );
        let bodies: Vec<_> = records.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(bodies, ["one", "two", "three"]);
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        let records = parsed("1/1/23, 10:00 am - Alice: <Media omitted>\n");
        assert_eq!(records[0].message, "<Media omitted>");
        assert!(records[0].is_media());
    }

    #[test]
    fn test_split_sender_helper() {
        assert_eq!(split_sender("Alice: hello"), Some(("Alice", "hello")));
        assert_eq!(split_sender("Bob added Alice"), None);
        assert_eq!(split_sender(": orphan"), None);
        assert_eq!(
            split_sender("Dr. Who: when: now"),
            Some(("Dr. Who", "when: now"))
        );
    }
}
