//! Fuzzy query matching for project and file pickers.
//!
//! Queries are split on whitespace into lowercased tokens; a candidate
//! matches when every token fuzzy-matches it independently, so "nav rs"
//! narrows to entries containing both a `nav`-ish and an `rs`-ish
//! subsequence, in any order.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// A compiled query, ready to test candidates against.
///
/// Construct once per filter pass; [`matches`](FuzzyFilter::matches) is then
/// cheap enough to run over every candidate in a listing.
///
/// # Examples
///
/// ```
/// use trailhead::search::FuzzyFilter;
///
/// let filter = FuzzyFilter::new("nav rs");
/// assert!(filter.matches("src/navigation/session.rs"));
/// assert!(!filter.matches("README.md"));
/// ```
pub struct FuzzyFilter {
    matcher: SkimMatcherV2,
    tokens: Vec<String>,
}

impl FuzzyFilter {
    /// Compiles `query` into lowercased whitespace-split tokens.
    #[must_use]
    pub fn new(query: &str) -> Self {
        let tokens = query.split_whitespace().map(str::to_lowercase).collect();
        Self {
            matcher: SkimMatcherV2::default(),
            tokens,
        }
    }

    /// Whether this filter accepts every candidate (the query was blank).
    #[must_use]
    pub fn is_match_all(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tests `candidate` against the query.
    ///
    /// Matching is case-insensitive and every token must fuzzy-match on its
    /// own. A blank query matches everything.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        let lowered = candidate.to_lowercase();
        self.tokens
            .iter()
            .all(|token| self.matcher.fuzzy_match(&lowered, token).is_some())
    }
}
