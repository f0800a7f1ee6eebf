//! Text helpers shared by the aggregation queries: the stopword set, symbol
//! stripping, the emoji code-point test, and the link heuristic.

use std::borrow::Cow;
use std::collections::HashSet;

use once_cell::sync::OnceCell;
use regex::Regex;
use stopwords::{Language, Spark, Stopwords};

/// English stopword set, loaded once. Membership is checked against the
/// lowercased token.
pub(crate) fn stopword_set() -> &'static HashSet<&'static str> {
    static STOPWORDS: OnceCell<HashSet<&'static str>> = OnceCell::new();
    STOPWORDS.get_or_init(|| {
        Spark::stopwords(Language::English)
            .unwrap_or_default()
            .iter()
            .copied()
            .collect()
    })
}

/// Strips everything that is neither a word character nor whitespace.
pub(crate) fn strip_symbols(token: &str) -> Cow<'_, str> {
    symbol_re().replace_all(token, "")
}

fn symbol_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("symbol regex"))
}

/// Crude link detector: a case-sensitive `http` substring match. Known to
/// miss bare `www.` links and to hit false positives; the counts it feeds
/// are headline numbers, not a URL validator.
pub(crate) fn looks_like_link(text: &str) -> bool {
    text.contains("http")
}

/// Single-character emoji test over the Unicode emoji blocks: regional
/// indicators, the pictograph planes, dingbats, and the handful of legacy
/// symbols (©, ®, ™, arrows) that carry emoji presentation. ZWJ sequences
/// are therefore counted per component.
pub(crate) fn is_emoji(c: char) -> bool {
    matches!(c,
        '\u{1F1E6}'..='\u{1F1FF}'   // regional indicators (flag halves)
        | '\u{1F300}'..='\u{1FAFF}' // pictographs through extended-A
        | '\u{2600}'..='\u{27BF}'   // misc symbols and dingbats
        | '\u{2300}'..='\u{23FF}'   // technical: watch, hourglass, av controls
        | '\u{2B50}'..='\u{2B55}'
        | '\u{2194}'..='\u{2199}'
        | '\u{25FB}'..='\u{25FE}'
        | '\u{203C}' | '\u{2049}' | '\u{2122}' | '\u{2139}'
        | '\u{21A9}' | '\u{21AA}' | '\u{24C2}'
        | '\u{25AA}' | '\u{25AB}' | '\u{25B6}' | '\u{25C0}'
        | '\u{2934}' | '\u{2935}' | '\u{3030}' | '\u{303D}'
        | '\u{3297}' | '\u{3299}' | '\u{00A9}' | '\u{00AE}'
    )
}
