//! Aggregation queries over the parsed record sequence.
//!
//! Every function here is a pure `(scope, records) -> value` transform:
//! scope filtering happens first, nothing is cached or mutated, and the same
//! inputs always produce the same output. Empty results are explicit empty
//! values, never errors — the caller renders "no data" for them.
//!
//! All of these assume the parser returned
//! [`ParseOutcome::Parsed`](crate::parser::ParseOutcome::Parsed); feeding
//! them a corrupted export is a caller bug the parser outcome exists to
//! prevent.
//!
//! Ranked results share one ordering rule: descending by count, ties broken
//! by first appearance in the source. The tally is insertion-ordered and the
//! final sort is stable, so the rule falls out for free.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::record::Record;
use crate::scope::Scope;
use crate::text;

/// A labeled frequency, the common shape of ranked results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Count {
    pub label: String,
    pub count: usize,
}

/// Headline numbers for a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageTotals {
    /// Messages in scope, system notifications included.
    pub messages: usize,
    /// Whitespace-delimited tokens across every body in scope.
    pub words: usize,
    /// Bodies equal to the media placeholder.
    pub media: usize,
    /// Bodies matching the crude `http` substring heuristic.
    pub links: usize,
}

/// One sender's share of the scope's messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SenderShare {
    pub user: String,
    /// Percentage of all messages, rounded to two decimals.
    pub percent: f64,
}

/// Ranking of senders by message count, only meaningful chat-wide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveSenders {
    /// The five busiest senders.
    pub top: Vec<Count>,
    /// Percentage share for every sender, group notifications included.
    pub shares: Vec<SenderShare>,
}

/// One month of activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month_num: u32,
    pub month: String,
    pub messages: usize,
    /// `MonthName-Year`, e.g. `January-2023`.
    pub label: String,
}

/// One calendar day of activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub messages: usize,
}

/// Message, word, media, and link totals for a scope.
pub fn usage_totals(scope: &Scope, records: &[Record]) -> UsageTotals {
    let scoped = scope.filter(records);
    UsageTotals {
        messages: scoped.len(),
        words: scoped
            .iter()
            .map(|r| r.message.split_whitespace().count())
            .sum(),
        media: scoped.iter().filter(|r| r.is_media()).count(),
        links: scoped
            .iter()
            .filter(|r| text::looks_like_link(&r.message))
            .count(),
    }
}

/// The busiest senders and the full share table.
///
/// Returns `None` unless the scope is [`Scope::Overall`]: ranking senders
/// inside a single-sender scope is meaningless.
pub fn most_active_senders(scope: &Scope, records: &[Record]) -> Option<ActiveSenders> {
    if !scope.is_overall() {
        return None;
    }

    let total = records.len();
    let ranked = tally(records.iter().map(|r| r.user.clone()));
    let shares = ranked
        .iter()
        .map(|c| SenderShare {
            user: c.label.clone(),
            percent: round2(c.count as f64 / total as f64 * 100.0),
        })
        .collect();

    let mut top = ranked;
    top.truncate(5);

    Some(ActiveSenders { top, shares })
}

/// All non-media bodies in scope joined into one blob for cloud rendering,
/// or `None` when there is no text at all.
pub fn wordcloud_text(scope: &Scope, records: &[Record]) -> Option<String> {
    let joined = scope
        .filter(records)
        .into_iter()
        .filter(|r| !r.is_media())
        .map(|r| r.message.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() { None } else { Some(joined) }
}

/// Up to twenty most frequent words in scope.
///
/// Group notifications and media placeholders are excluded. Each remaining
/// whitespace token is dropped if its lowercased form is a stopword, then
/// stripped of symbol characters; counting is case-sensitive. The stopword
/// test runs before the symbol strip, so `the!` survives as `the` — the
/// frequency table mirrors what people actually typed.
pub fn most_common_words(scope: &Scope, records: &[Record]) -> Vec<Count> {
    let stop = text::stopword_set();
    let mut tokens = Vec::new();

    for record in scope.filter(records) {
        if record.is_notification() || record.is_media() {
            continue;
        }
        for raw in record.message.split_whitespace() {
            if stop.contains(raw.to_lowercase().as_str()) {
                continue;
            }
            let cleaned = text::strip_symbols(raw);
            if cleaned.is_empty() {
                continue;
            }
            tokens.push(cleaned.into_owned());
        }
    }

    let mut ranked = tally(tokens);
    ranked.truncate(20);
    ranked
}

/// Every distinct emoji in scope with its frequency, descending.
///
/// Each character of each body is tested individually against the emoji
/// code-point table, so multi-codepoint sequences count per component.
pub fn most_common_emojis(scope: &Scope, records: &[Record]) -> Vec<Count> {
    let hits = scope
        .filter(records)
        .into_iter()
        .flat_map(|r| r.message.chars())
        .filter(|&c| text::is_emoji(c))
        .map(String::from);
    tally(hits)
}

/// Message counts grouped by calendar month, chronological.
pub fn monthly_timeline(scope: &Scope, records: &[Record]) -> Vec<MonthBucket> {
    let mut buckets: BTreeMap<(i32, u32), (String, usize)> = BTreeMap::new();
    for record in scope.filter(records) {
        let entry = buckets
            .entry((record.year(), record.month_num()))
            .or_insert_with(|| (record.month_name(), 0));
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|((year, month_num), (month, messages))| MonthBucket {
            year,
            month_num,
            label: format!("{month}-{year}"),
            month,
            messages,
        })
        .collect()
}

/// Message counts per distinct calendar date, chronological.
pub fn daily_timeline(scope: &Scope, records: &[Record]) -> Vec<DayCount> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in scope.filter(records) {
        *days.entry(record.only_date()).or_insert(0) += 1;
    }

    days.into_iter()
        .map(|(date, messages)| DayCount { date, messages })
        .collect()
}

/// Message counts keyed by weekday name.
///
/// Ordered by descending frequency, not by calendar position — the busiest
/// day comes first, which is what the activity chart plots.
pub fn weekday_activity(scope: &Scope, records: &[Record]) -> Vec<Count> {
    tally(scope.filter(records).into_iter().map(Record::day_name))
}

/// Message counts keyed by month name, same ordering rule as
/// [`weekday_activity`].
pub fn month_activity(scope: &Scope, records: &[Record]) -> Vec<Count> {
    tally(scope.filter(records).into_iter().map(Record::month_name))
}

/// Insertion-ordered frequency count, sorted descending. The sort is stable,
/// so equal counts keep their first-appearance order.
fn tally<I>(labels: I) -> Vec<Count>
where
    I: IntoIterator<Item = String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<Count> = Vec::new();

    for label in labels {
        if let Some(&at) = index.get(&label) {
            counts[at].count += 1;
        } else {
            index.insert(label.clone(), counts.len());
            counts.push(Count { label, count: 1 });
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
