//! Case-insensitive phrase matching shared by the built-in rules.
//!
//! Phrases are matched literally (regex metacharacters are escaped) and case
//! folding is ASCII-only, so results do not depend on Unicode tables.

use regex::{Regex, RegexBuilder};

/// A compiled set of literal phrases; matches when any phrase occurs.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    regex: Option<Regex>,
}

impl KeywordSet {
    /// Compile a set of phrases. An empty set never matches.
    pub fn new<I, S>(phrases: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        if phrases.is_empty() {
            return Ok(Self { regex: None });
        }

        let pattern = phrases
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .unicode(false)
            .build()?;

        Ok(Self { regex: Some(regex) })
    }

    /// Compile a built-in phrase list. Literal ASCII phrases always compile.
    pub(crate) fn builtin(phrases: &[&str]) -> Self {
        Self::new(phrases.iter().copied()).expect("built-in keyword phrases are escaped literals")
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|r| r.is_match(text))
    }

    /// True when any of the given texts contains a phrase.
    pub fn matches_any(&self, texts: &[&str]) -> bool {
        texts.iter().any(|text| self.is_match(text))
    }
}
