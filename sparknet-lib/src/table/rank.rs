//! Match ranking between a query and a cell value

use std::cmp::Ordering;

use nucleo_matcher::Config;
use nucleo_matcher::Matcher;
use nucleo_matcher::Utf32Str;
use nucleo_matcher::pattern::Atom;
use nucleo_matcher::pattern::AtomKind;
use nucleo_matcher::pattern::CaseMatching;
use nucleo_matcher::pattern::Normalization;

use crate::model::Value;

/// How well a query matched, worst first.
///
/// The derived ordering is the ranking: a greater variant is a better match.
/// [`Rank::Matches`] carries the fuzzy score so two fuzzy matches still order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// The query's characters do not appear in order.
    NoMatch,
    /// Empty query; everything passes with no preference.
    Neutral,
    /// In-order subsequence match with its fuzzy score.
    Matches(u16),
    /// The query is a run of the value's word initials.
    Acronym,
    Contains,
    /// The query starts one of the value's words.
    WordStartsWith,
    StartsWith,
    /// Equal ignoring case.
    Equal,
    CaseSensitiveEqual,
}

/// A rank plus the character position where the match starts.
///
/// Ordered so that greater is better: higher rank first, then the earlier
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchScore {
    pub rank: Rank,
    pub position: usize,
}

impl MatchScore {
    /// The score of an empty query.
    pub const fn neutral() -> Self {
        Self {
            rank: Rank::Neutral,
            position: 0,
        }
    }

    /// The sentinel for a failed match.
    pub const fn no_match() -> Self {
        Self {
            rank: Rank::NoMatch,
            position: 0,
        }
    }

    const fn at(rank: Rank, position: usize) -> Self {
        Self { rank, position }
    }

    /// Returns `true` unless this is the no-match sentinel.
    pub fn passed(&self) -> bool {
        self.rank != Rank::NoMatch
    }
}

impl Ord for MatchScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for MatchScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Scores a cell value against a query.
///
/// The value is coerced with [`Value::to_text`]. Comparison ignores case
/// except for the [`Rank::CaseSensitiveEqual`] tier.
///
/// ```
/// use sparknet_lib::model::Value;
/// use sparknet_lib::table::{Rank, rank_value};
///
/// let score = rank_value(&Value::from("Kevin Ivan"), "kev");
/// assert_eq!(score.rank, Rank::StartsWith);
/// ```
pub fn rank_value(value: &Value, query: &str) -> MatchScore {
    Ranker::new(query).rank(value)
}

/// Scores many values against one query, reusing the matcher.
pub struct Ranker {
    query: String,
    lowered: String,
    atom: Atom,
    matcher: Matcher,
    buf: Vec<char>,
    indices: Vec<u32>,
}

impl Ranker {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            lowered: query.to_lowercase(),
            atom: Atom::new(
                query,
                CaseMatching::Ignore,
                Normalization::Never,
                AtomKind::Fuzzy,
                false,
            ),
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Returns the query this ranker scores against.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Scores a value.
    pub fn rank(&mut self, value: &Value) -> MatchScore {
        let text = value.to_text();
        self.rank_text(&text)
    }

    /// Scores already coerced text.
    pub fn rank_text(&mut self, text: &str) -> MatchScore {
        if self.query.trim().is_empty() {
            return MatchScore::neutral();
        }
        if self.query.chars().count() > text.chars().count() {
            return MatchScore::no_match();
        }
        if text == self.query {
            return MatchScore::at(Rank::CaseSensitiveEqual, 0);
        }

        let lowered = text.to_lowercase();
        let query = self.lowered.as_str();

        if lowered == query {
            return MatchScore::at(Rank::Equal, 0);
        }
        if lowered.starts_with(query) {
            return MatchScore::at(Rank::StartsWith, 0);
        }
        if let Some(at) = word_start(&lowered, query) {
            return MatchScore::at(Rank::WordStartsWith, char_index(&lowered, at));
        }
        if let Some(at) = lowered.find(query) {
            return MatchScore::at(Rank::Contains, char_index(&lowered, at));
        }
        if query.chars().count() == 1 {
            return MatchScore::no_match();
        }
        if let Some(position) = acronym_start(&lowered, query) {
            return MatchScore::at(Rank::Acronym, position);
        }

        self.fuzzy(text)
    }

    fn fuzzy(&mut self, text: &str) -> MatchScore {
        self.indices.clear();
        let haystack = Utf32Str::new(text, &mut self.buf);
        match self
            .atom
            .indices(haystack, &mut self.matcher, &mut self.indices)
        {
            Some(score) => {
                let position = self.indices.iter().min().copied().unwrap_or(0) as usize;
                MatchScore::at(Rank::Matches(score), position)
            }
            None => MatchScore::no_match(),
        }
    }
}

/// Characters that separate words.
const WORD_BREAKS: [char; 2] = [' ', '-'];

/// Finds `query` at the start of a word after the first one.
fn word_start(text: &str, query: &str) -> Option<usize> {
    text.match_indices(query)
        .map(|(at, _)| at)
        .find(|&at| text[..at].ends_with(WORD_BREAKS))
}

/// Finds `query` in the word initials of `text`.
///
/// Returns the character position of the word where the run starts.
fn acronym_start(text: &str, query: &str) -> Option<usize> {
    let mut initials = String::new();
    let mut starts = Vec::new();
    let mut at_break = true;
    for (i, c) in text.chars().enumerate() {
        if WORD_BREAKS.contains(&c) {
            at_break = true;
        } else if at_break {
            initials.push(c);
            starts.push(i);
            at_break = false;
        }
    }

    let at = initials.find(query)?;
    starts.get(char_index(&initials, at)).copied()
}

fn char_index(text: &str, byte_index: usize) -> usize {
    text[..byte_index].chars().count()
}
