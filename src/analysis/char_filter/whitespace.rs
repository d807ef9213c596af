//! Whitespace collapsing char filter.

use super::CharFilter;

/// Collapses runs of Unicode whitespace to one space and trims both ends.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceCollapseCharFilter;

impl WhitespaceCollapseCharFilter {
    pub fn new() -> Self {
        WhitespaceCollapseCharFilter
    }
}

impl CharFilter for WhitespaceCollapseCharFilter {
    fn filter(&self, input: &str) -> String {
        input.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn name(&self) -> &'static str {
        "whitespace_collapse"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_and_trim() {
        let filter = WhitespaceCollapseCharFilter::new();
        assert_eq!(filter.filter("  bagus \t\n banget  "), "bagus banget");
        assert_eq!(filter.filter("   "), "");
        assert_eq!(filter.filter("a\u{3000}b"), "a b");
    }
}
