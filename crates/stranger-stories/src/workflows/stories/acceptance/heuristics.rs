use std::collections::HashMap;

use serde::Serialize;

use super::config::AcceptanceConfig;

const PERMITTED_PUNCTUATION: [char; 12] =
    [' ', '.', ',', '!', '?', ';', ':', '\'', '"', '—', '–', '-'];

const GIBBERISH_MIN_WORD_LEN: usize = 8;

/// Which legitimacy signal flagged a submission. Only used for diagnostics;
/// callers see a single spam reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpamSignal {
    Repetition,
    Symbols,
    Gibberish,
}

/// Runs the three signals in order and returns the first that fires.
pub(crate) fn first_spam_signal(text: &str, config: &AcceptanceConfig) -> Option<SpamSignal> {
    let length = text.chars().count();

    if exceeds_repetition(text, length, config.repetition_ratio_max) {
        return Some(SpamSignal::Repetition);
    }
    if exceeds_symbol_ratio(text, length, config.symbol_ratio_max) {
        return Some(SpamSignal::Symbols);
    }
    if exceeds_gibberish_ratio(text, config.gibberish_ratio_max) {
        return Some(SpamSignal::Gibberish);
    }
    None
}

fn exceeds(count: usize, total: usize, ratio_max: f64) -> bool {
    count as f64 > total as f64 * ratio_max
}

/// Per distinct character value, case-sensitive, whitespace included.
fn exceeds_repetition(text: &str, length: usize, ratio_max: f64) -> bool {
    let mut counts: HashMap<char, usize> = HashMap::new();
    for ch in text.chars() {
        *counts.entry(ch).or_default() += 1;
    }
    counts
        .values()
        .any(|&count| exceeds(count, length, ratio_max))
}

fn is_standard(ch: char) -> bool {
    ch.is_alphanumeric() || PERMITTED_PUNCTUATION.contains(&ch)
}

fn exceeds_symbol_ratio(text: &str, length: usize, ratio_max: f64) -> bool {
    let symbols = text.chars().filter(|&ch| !is_standard(ch)).count();
    exceeds(symbols, length, ratio_max)
}

fn is_gibberish_word(word: &str) -> bool {
    word.chars().count() > GIBBERISH_MIN_WORD_LEN
        && !word
            .chars()
            .any(|ch| matches!(ch.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
}

fn exceeds_gibberish_ratio(text: &str, ratio_max: f64) -> bool {
    let mut words = 0;
    let mut gibberish = 0;
    for word in text.split_whitespace() {
        words += 1;
        if is_gibberish_word(word) {
            gibberish += 1;
        }
    }
    // An empty word list never reaches here through the pipeline; the length check fails first.
    words > 0 && exceeds(gibberish, words, ratio_max)
}
