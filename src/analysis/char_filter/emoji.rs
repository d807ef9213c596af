//! Emoji char filters.

use std::sync::Arc;

use super::CharFilter;
use crate::analysis::emoji::{EmojiCatalog, collapse_glyph_runs};

/// Replaces emoji glyphs with their spelled-out names, no delimiters.
#[derive(Clone, Debug)]
pub struct EmojiSpellOutCharFilter {
    catalog: Arc<EmojiCatalog>,
}

impl EmojiSpellOutCharFilter {
    pub fn new(catalog: Arc<EmojiCatalog>) -> Self {
        EmojiSpellOutCharFilter { catalog }
    }
}

impl CharFilter for EmojiSpellOutCharFilter {
    fn filter(&self, input: &str) -> String {
        self.catalog.spell_out(input)
    }

    fn name(&self) -> &'static str {
        "emoji_spell_out"
    }
}

/// Collapses repeated emoji, both raw glyph runs and spelled-out name runs,
/// down to one occurrence each.
#[derive(Clone, Debug)]
pub struct RepeatedEmojiCharFilter {
    catalog: Arc<EmojiCatalog>,
}

impl RepeatedEmojiCharFilter {
    pub fn new(catalog: Arc<EmojiCatalog>) -> Self {
        RepeatedEmojiCharFilter { catalog }
    }
}

impl CharFilter for RepeatedEmojiCharFilter {
    fn filter(&self, input: &str) -> String {
        let glyphs_collapsed = collapse_glyph_runs(input);
        self.catalog.collapse_name_runs(&glyphs_collapsed)
    }

    fn name(&self) -> &'static str {
        "repeated_emoji"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Arc<EmojiCatalog> {
        Arc::new(EmojiCatalog::from_pairs([("😍", "smiling face with heart-eyes"), ("🔥", "fire")]).unwrap())
    }

    #[test]
    fn test_spell_out_then_collapse() {
        let catalog = catalog();
        let spell = EmojiSpellOutCharFilter::new(catalog.clone());
        let collapse = RepeatedEmojiCharFilter::new(catalog);

        let spelled = spell.filter("banget😍😍😍");
        assert_eq!(
            spelled,
            "bangetsmiling_face_with_heart_eyessmiling_face_with_heart_eyessmiling_face_with_heart_eyes"
        );
        assert_eq!(collapse.filter(&spelled), "bangetsmiling_face_with_heart_eyes");
    }

    #[test]
    fn test_collapse_raw_glyph_runs() {
        let collapse = RepeatedEmojiCharFilter::new(catalog());
        assert_eq!(collapse.filter("✨✨✨ mantap ✨"), "✨ mantap ✨");
    }

    #[test]
    fn test_distinct_glyphs_untouched() {
        let collapse = RepeatedEmojiCharFilter::new(catalog());
        assert_eq!(collapse.filter("fire smiling_face_with_heart_eyes fire"), "fire smiling_face_with_heart_eyes fire");
    }
}
