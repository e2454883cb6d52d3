//! Token-subset name matching, shared by the statistics engine and the
//! holding-age finder.

use std::collections::HashSet;

/// Compiled item-name filter. A candidate matches when every filter
/// token appears among the candidate's tokens (unordered subset, not
/// substring). An empty filter matches everything.
#[derive(Debug, Clone)]
pub struct ItemFilter {
    tokens: Vec<String>,
}

impl ItemFilter {
    pub fn new(filter: &str) -> Self {
        Self {
            tokens: tokenize(filter),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn matches(&self, candidate: &str) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        let have: HashSet<String> = tokenize(candidate).into_iter().collect();
        self.tokens.iter().all(|t| have.contains(t))
    }
}

/// Lower-case, drop everything through the first colon (release-year
/// prefixes like "2023: ..."), then split on non-alphanumeric runs.
fn tokenize(name: &str) -> Vec<String> {
    let lower = name.to_lowercase();
    let tail = match lower.find(':') {
        Some(i) => &lower[i + 1..],
        None => lower.as_str(),
    };
    tail.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subset_match() {
        let filter = ItemFilter::new("red dragon");
        assert!(filter.matches("2023: Red Dragon Plush #2"));
        assert!(!filter.matches("blue dragon"));
    }

    #[test]
    fn test_tokens_are_unordered() {
        let filter = ItemFilter::new("dragon red");
        assert!(filter.matches("Red Dragon"));
    }

    #[test]
    fn test_not_a_substring_match() {
        // "red" is not a token of "bored ape", even as a substring
        let filter = ItemFilter::new("red");
        assert!(!filter.matches("Bored Ape"));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ItemFilter::new("");
        assert!(filter.is_empty());
        assert!(filter.matches("anything"));
        assert!(filter.matches(""));
    }

    #[test]
    fn test_colon_prefix_is_stripped_from_both_sides() {
        let filter = ItemFilter::new("series: plush");
        assert!(filter.matches("Plush Bear"));
    }

    #[test]
    fn test_punctuation_collapses_to_token_breaks() {
        let filter = ItemFilter::new("plush #2");
        assert!(filter.matches("2023: Red Dragon Plush #2"));
    }
}
