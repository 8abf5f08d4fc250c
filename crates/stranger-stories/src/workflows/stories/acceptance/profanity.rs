use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const BUILTIN_WORDLIST: &str = include_str!("../../../../data/profanity_words.txt");

/// Failure to build the disallowed-word list. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum WordListError {
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
    #[error("word list contains no entries")]
    Empty,
}

/// Immutable disallowed-word lookup shared by every request.
#[derive(Debug, Clone)]
pub struct ProfanityFilter {
    words: HashSet<String>,
    phrases: Vec<Vec<String>>,
    entries: usize,
}

impl ProfanityFilter {
    /// The English list bundled with the crate.
    pub fn builtin() -> Result<Self, WordListError> {
        Self::from_lines(BUILTIN_WORDLIST.lines())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, WordListError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, WordListError> {
        let lines = BufReader::new(reader)
            .lines()
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_lines(lines.iter().map(String::as_str))
    }

    /// Loads the list at `path`, or the built-in list when no path is configured.
    pub fn load(path: Option<&Path>) -> Result<Self, WordListError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    /// Blank lines and `#` comments are skipped.
    pub fn from_lines<'a, I>(lines: I) -> Result<Self, WordListError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let entries = lines
            .into_iter()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));
        Self::from_words(entries)
    }

    pub fn from_words<I, S>(entries: I) -> Result<Self, WordListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = HashSet::new();
        let mut phrases = Vec::new();
        let mut count = 0;

        for entry in entries {
            let tokens = tokenize(entry.as_ref());
            if !tokens.is_empty() {
                count += 1;
            }
            match tokens.len() {
                0 => {}
                1 => {
                    let folded = fold_token(&tokens[0]);
                    words.insert(folded);
                    words.extend(tokens);
                }
                _ => phrases.push(tokens.iter().map(|token| fold_token(token)).collect()),
            }
        }

        if count == 0 {
            return Err(WordListError::Empty);
        }

        Ok(Self {
            words,
            phrases,
            entries: count,
        })
    }

    /// Number of distinct list entries, not lookup keys.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_profanity(&self, text: &str) -> bool {
        let tokens = tokenize(text);
        if tokens
            .iter()
            .flat_map(|token| word_forms(token))
            .any(|form| self.is_listed_word(form))
        {
            return true;
        }

        if self.phrases.is_empty() {
            return false;
        }

        let whole: Vec<String> = tokens.iter().map(|token| fold_token(token)).collect();
        let pieces: Vec<String> = tokens
            .iter()
            .flat_map(|token| token.split('\''))
            .filter(|piece| !piece.is_empty())
            .map(fold_token)
            .collect();
        self.phrases
            .iter()
            .any(|phrase| contains_run(&whole, phrase) || contains_run(&pieces, phrase))
    }

    fn is_listed_word(&self, token: &str) -> bool {
        self.words.contains(token) || self.words.contains(&fold_token(token))
    }
}

fn contains_run(tokens: &[String], phrase: &[String]) -> bool {
    tokens
        .windows(phrase.len())
        .any(|window| window == phrase)
}

/// The token itself plus its apostrophe-separated pieces, so `word's` also yields `word`.
fn word_forms(token: &str) -> impl Iterator<Item = &str> {
    std::iter::once(token).chain(
        token
            .split('\'')
            .filter(move |piece| !piece.is_empty() && piece.len() != token.len()),
    )
}

fn is_token_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '@' | '$' | '\'')
}

/// Lowercased words; apostrophes survive inside a word but not at its edges.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|ch: char| !is_token_char(ch))
        .map(|token| token.trim_matches('\''))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// All-digit tokens are numbers, not disguised words, and stay as written.
fn fold_token(token: &str) -> String {
    if token.chars().all(|ch| ch.is_ascii_digit()) {
        token.to_string()
    } else {
        fold_lookalikes(token)
    }
}

fn fold_lookalikes(token: &str) -> String {
    token
        .chars()
        .map(|ch| match ch {
            '@' | '4' => 'a',
            '$' | '5' => 's',
            '0' => 'o',
            '1' => 'i',
            '3' => 'e',
            '7' => 't',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn filter() -> ProfanityFilter {
        ProfanityFilter::from_words(["darn", "heck off"]).expect("list builds")
    }

    #[test]
    fn matches_whole_words_in_any_case() {
        let filter = filter();
        assert!(filter.contains_profanity("Well DARN it all"));
        assert!(filter.contains_profanity("darn."));
        assert!(!filter.contains_profanity("darning socks is calming"));
    }

    #[test]
    fn apostrophes_split_words() {
        let filter = filter();
        assert!(filter.contains_profanity("This darn's broken"));
        assert!(filter.contains_profanity("They'd darn't bother"));
        assert!(filter.contains_profanity("he said heck off's the answer"));
        assert!(!filter.contains_profanity("Darnell's bike is blue"));
    }

    #[test]
    fn numbers_are_not_folded() {
        let filter = ProfanityFilter::from_words(["ass", "sos"]).expect("list builds");
        assert!(!filter.contains_profanity("Room 455 was ours for a summer."));
        assert!(!filter.contains_profanity("We paid 505 for the flight"));
        assert!(filter.contains_profanity("what an 4$$"));
        assert!(filter.contains_profanity("what an a55"));
    }

    #[test]
    fn folds_lookalike_characters() {
        let filter = filter();
        assert!(filter.contains_profanity("d@rn this"));
        assert!(filter.contains_profanity("'d4rn'"));
    }

    #[test]
    fn phrases_match_consecutive_words_only() {
        let filter = filter();
        assert!(filter.contains_profanity("He told me to heck   off, so I left."));
        assert!(!filter.contains_profanity("heck, I fell off the bike"));
    }

    #[test]
    fn reader_skips_comments_and_blank_lines() {
        let source = "# header\n\n  blast  \nrats\n";
        let filter = ProfanityFilter::from_reader(Cursor::new(source)).expect("list builds");
        assert!(filter.contains_profanity("oh Rats"));
        assert!(!filter.contains_profanity("header"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn empty_lists_are_rejected() {
        let error = ProfanityFilter::from_reader(Cursor::new("# nothing here\n\n"))
            .expect_err("empty list");
        assert!(matches!(error, WordListError::Empty));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = ProfanityFilter::from_path("./does-not-exist.txt").expect_err("io error");
        assert!(matches!(error, WordListError::Io(_)));
    }

    #[test]
    fn builtin_list_loads() {
        let filter = ProfanityFilter::builtin().expect("builtin list parses");
        assert!(!filter.is_empty());
        assert!(filter.contains_profanity("What the SH1T"));
        assert!(!filter.contains_profanity("We assessed the classic shitake recipe"));
        assert!(filter.contains_profanity("This shit's getting old, honestly."));
        assert!(filter.contains_profanity("That bitch's car blocked the driveway again."));
        assert!(!filter.contains_profanity("Room 455 was ours for a summer."));
    }
}
