//! Report assembly and output.
//!
//! [`analyze`] runs every aggregation for one scope and collects the results
//! into an [`AnalysisReport`]; each query is invoked independently on the
//! immutable record slice, so there is no ordering dependency between them.
//! The wordcloud blob is deliberately not embedded — it would duplicate the
//! whole transcript in every report; use
//! [`stats::wordcloud_text`](crate::stats::wordcloud_text) directly.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::record::Record;
use crate::scope::Scope;
use crate::stats::{
    self, ActiveSenders, Count, DayCount, MonthBucket, UsageTotals,
};

/// Every aggregation result for one scope, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Scope label: `Overall` or a sender name.
    pub scope: String,
    pub totals: UsageTotals,
    /// Present only for the `Overall` scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_active: Option<ActiveSenders>,
    pub common_words: Vec<Count>,
    pub common_emojis: Vec<Count>,
    pub monthly_timeline: Vec<MonthBucket>,
    pub daily_timeline: Vec<DayCount>,
    pub weekday_activity: Vec<Count>,
    pub month_activity: Vec<Count>,
}

/// Runs the full set of aggregations for `scope`.
pub fn analyze(scope: &Scope, records: &[Record]) -> AnalysisReport {
    AnalysisReport {
        scope: scope.label().to_string(),
        totals: stats::usage_totals(scope, records),
        most_active: stats::most_active_senders(scope, records),
        common_words: stats::most_common_words(scope, records),
        common_emojis: stats::most_common_emojis(scope, records),
        monthly_timeline: stats::monthly_timeline(scope, records),
        daily_timeline: stats::daily_timeline(scope, records),
        weekday_activity: stats::weekday_activity(scope, records),
        month_activity: stats::month_activity(scope, records),
    }
}

/// Renders a report as pretty-printed JSON.
pub fn to_json(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the parsed record table as CSV: the raw columns plus every derived
/// calendar column, one row per message.
pub fn write_records_csv(records: &[Record], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record([
        "date",
        "user",
        "message",
        "year",
        "month",
        "day",
        "hour",
        "minute",
        "month_num",
        "only_date",
        "day_name",
    ])?;

    for record in records {
        writer.write_record([
            record.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            record.user.clone(),
            record.message.clone(),
            record.year().to_string(),
            record.month_name(),
            record.day().to_string(),
            record.hour().to_string(),
            record.minute().to_string(),
            record.month_num().to_string(),
            record.only_date().format("%Y-%m-%d").to_string(),
            record.day_name(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(day: u32, user: &str, message: &str) -> Record {
        let date = NaiveDate::from_ymd_opt(2023, 1, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        Record::new(date, user, message)
    }

    fn sample() -> Vec<Record> {
        vec![
            rec(1, "Alice", "hello there"),
            rec(1, "Bob", "hi"),
            rec(2, "Alice", "pizza tonight?"),
        ]
    }

    #[test]
    fn test_analyze_overall() {
        let report = analyze(&Scope::Overall, &sample());
        assert_eq!(report.scope, "Overall");
        assert_eq!(report.totals.messages, 3);
        assert!(report.most_active.is_some());
        assert_eq!(report.monthly_timeline.len(), 1);
        assert_eq!(report.daily_timeline.len(), 2);
    }

    #[test]
    fn test_analyze_sender_scope_has_no_ranking() {
        let report = analyze(&Scope::sender("Alice"), &sample());
        assert_eq!(report.scope, "Alice");
        assert_eq!(report.totals.messages, 2);
        assert!(report.most_active.is_none());
    }

    #[test]
    fn test_to_json_roundtrips() {
        let report = analyze(&Scope::Overall, &sample());
        let json = to_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["scope"], "Overall");
        assert_eq!(value["totals"]["messages"], 3);
        assert!(value["most_active"].is_object());
    }

    #[test]
    fn test_json_omits_ranking_for_sender_scope() {
        let report = analyze(&Scope::sender("Alice"), &sample());
        let json = to_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("most_active").is_none());
    }

    #[test]
    fn test_write_records_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        write_records_csv(&sample(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,user,message,year,month,day,hour,minute,month_num,only_date,day_name"
        );
        assert_eq!(lines.clone().count(), 3);
        assert!(content.contains("2023-01-01 10:00:00"));
        assert!(content.contains("January"));
        assert!(content.contains("Sunday"));
    }
}
