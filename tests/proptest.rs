//! Property-based tests: generated transcripts exercise the parser and the
//! share table over a much wider input space than the fixtures do.

use proptest::prelude::*;

use chatscope::prelude::*;
use chatscope::scope::Scope;
use chatscope::stats;

/// One generated message line: calendar fields the delimiter grammar admits,
/// a sender with no colon, and a single-line body with no colon-space pair.
#[derive(Debug, Clone)]
struct GenMessage {
    day: u32,
    month: u32,
    year: u32,
    hour: u32,
    minute: u32,
    pm: bool,
    sender: String,
    body: String,
}

fn gen_message() -> impl Strategy<Value = GenMessage> {
    (
        1u32..=28,
        1u32..=12,
        20u32..=29,
        1u32..=12,
        0u32..=59,
        any::<bool>(),
        "[A-Z][a-z]{2,8}",
        "[a-zA-Z0-9 !?.]{1,40}",
    )
        .prop_map(
            |(day, month, year, hour, minute, pm, sender, body)| GenMessage {
                day,
                month,
                year,
                hour,
                minute,
                pm,
                sender,
                body,
            },
        )
}

fn render(messages: &[GenMessage]) -> String {
    let mut out = String::new();
    for m in messages {
        let meridiem = if m.pm { "pm" } else { "am" };
        out.push_str(&format!(
            "{}/{}/{}, {}:{:02} {} - {}: {}\n",
            m.day, m.month, m.year, m.hour, m.minute, meridiem, m.sender, m.body
        ));
    }
    out
}

proptest! {
    #[test]
    fn record_count_equals_message_count(messages in prop::collection::vec(gen_message(), 1..40)) {
        let transcript = render(&messages);
        let records = parse(&transcript)
            .expect("generated timestamps are valid")
            .into_records()
            .expect("generated transcripts always contain delimiters");

        prop_assert_eq!(records.len(), messages.len());
        for (record, generated) in records.iter().zip(&messages) {
            prop_assert_eq!(&record.user, &generated.sender);
            prop_assert_eq!(&record.message, generated.body.trim_end());
        }
    }

    #[test]
    fn shares_sum_to_one_hundred(messages in prop::collection::vec(gen_message(), 1..40)) {
        let transcript = render(&messages);
        let records = parse(&transcript).unwrap().into_records().unwrap();

        let active = most_active_senders(&Scope::Overall, &records).unwrap();
        let sum: f64 = active.shares.iter().map(|s| s.percent).sum();
        // Each entry is rounded to two decimals, so allow half a cent per sender.
        let tolerance = 0.005 * active.shares.len() as f64 + 0.01;
        prop_assert!((sum - 100.0).abs() <= tolerance, "shares sum to {}", sum);
    }

    #[test]
    fn word_totals_equal_token_sums(messages in prop::collection::vec(gen_message(), 1..40)) {
        let transcript = render(&messages);
        let records = parse(&transcript).unwrap().into_records().unwrap();

        let totals = stats::usage_totals(&Scope::Overall, &records);
        let expected: usize = records
            .iter()
            .map(|r| r.message.split_whitespace().count())
            .sum();
        prop_assert_eq!(totals.words, expected);
    }

    #[test]
    fn arbitrary_text_without_delimiters_is_corrupted(text in "[a-zA-Z ,.!?\n]{0,400}") {
        let outcome = parse(&text).expect("no delimiter means no timestamp to reject");
        prop_assert!(outcome.is_corrupted());
    }
}
