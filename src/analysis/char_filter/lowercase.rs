//! Lowercase char filter.

use super::CharFilter;

/// Lowercases the entire text.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("Aplikasinya BAGUSSS"), "aplikasinya bagusss");
        assert_eq!(filter.filter("ÇA VA 😍"), "ça va 😍");
    }
}
