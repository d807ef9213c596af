//! The review normalizer.
//!
//! Turns a raw review into the canonical token string fed to the vectorizer.
//! The stages run strictly in this order:
//!
//! ```text
//!  1 lowercase            8 elongation
//!  2 emoji_spell_out      9 emoji_words
//!  3 url_strip           10 repeated_emoji
//!  4 digit_strip         11 whitespace (tokenize)
//!  5 punctuation_strip   12 stop
//!  6 whitespace_collapse 13 stem, then rejoin
//!  7 slang
//! ```
//!
//! # Examples
//!
//! ```
//! use ulasan::analysis::analyzer::review::ReviewNormalizer;
//!
//! let normalizer = ReviewNormalizer::builtin().unwrap();
//! let normalized = normalizer.process("Aplikasinya BAGUSSS, cek http://x.co 123").unwrap();
//! assert_eq!(normalized, "aplikasi bagus cek");
//! ```

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::elongation::ElongationCharFilter;
use crate::analysis::char_filter::emoji::{EmojiSpellOutCharFilter, RepeatedEmojiCharFilter};
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::mapping::MappingCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::char_filter::slang::SlangCharFilter;
use crate::analysis::char_filter::whitespace::WhitespaceCollapseCharFilter;
use crate::analysis::emoji::EmojiCatalog;
use crate::analysis::lexicon::LexicalResources;
use crate::analysis::token::{Token, TokenStream, join_tokens};
use crate::analysis::token_filter::stem::{IndonesianStemmer, StemFilter};
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// Text after one normalization stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutput {
    pub stage: String,
    pub text: String,
}

impl StageOutput {
    fn new(stage: &str, text: impl Into<String>) -> Self {
        StageOutput {
            stage: stage.to_string(),
            text: text.into(),
        }
    }
}

fn join_vec(tokens: &[Token]) -> String {
    join_tokens(Box::new(tokens.to_vec().into_iter()))
}

/// The fixed normalization pipeline for Indonesian app reviews.
#[derive(Clone, Debug)]
pub struct ReviewNormalizer {
    pipeline: PipelineAnalyzer,
}

impl ReviewNormalizer {
    /// Build the pipeline over the given resources and emoji catalog.
    pub fn new(resources: &LexicalResources, catalog: Arc<EmojiCatalog>) -> Result<Self> {
        let spelling = Arc::new(resources.spelling_lexicon());
        let stemmer = Arc::new(
            IndonesianStemmer::with_roots(resources.root_words.clone())
                .excluding(Arc::new(resources.unstable_words())),
        );

        let pipeline = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(EmojiSpellOutCharFilter::new(catalog.clone())))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::urls()?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::digits()?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::punctuation()?))
            .add_char_filter(Arc::new(WhitespaceCollapseCharFilter::new()))
            .add_char_filter(Arc::new(SlangCharFilter::new(resources.slang.clone())))
            .add_char_filter(Arc::new(
                ElongationCharFilter::new(spelling).with_emoji_catalog(catalog.clone()),
            ))
            .add_char_filter(Arc::new(
                MappingCharFilter::new(&resources.emoji_words)?.with_name("emoji_words"),
            ))
            .add_char_filter(Arc::new(RepeatedEmojiCharFilter::new(catalog)))
            .add_filter(Arc::new(StopFilter::with_stop_words(resources.stopwords.clone())))
            .add_filter(Arc::new(StemFilter::with_stemmer(stemmer)))
            .with_name("review");

        Ok(ReviewNormalizer { pipeline })
    }

    /// Build the pipeline over the compiled-in resources and the full emoji
    /// catalog.
    pub fn builtin() -> Result<Self> {
        Self::new(&LexicalResources::builtin(), Arc::new(EmojiCatalog::new()?))
    }

    /// Normalize one raw review.
    ///
    /// Empty or whitespace-only input normalizes to the empty string.
    pub fn process(&self, raw: &str) -> Result<String> {
        let normalized = self.pipeline.analyze_to_string(raw)?;
        debug!("normalized {:?} -> {:?}", raw, normalized);
        Ok(normalized)
    }

    /// Normalize one raw review, keeping the text after every stage. The last
    /// entry is the same string [`ReviewNormalizer::process`] returns.
    pub fn trace(&self, raw: &str) -> Result<Vec<StageOutput>> {
        let mut stages = Vec::new();

        let mut text = raw.to_string();
        for char_filter in self.pipeline.char_filters() {
            text = char_filter.filter(&text);
            stages.push(StageOutput::new(char_filter.name(), text.as_str()));
        }

        let tokenizer = self.pipeline.tokenizer();
        let mut tokens: Vec<Token> = tokenizer.tokenize(&text)?.collect();
        stages.push(StageOutput::new(tokenizer.name(), join_vec(&tokens)));

        for filter in self.pipeline.filters() {
            tokens = filter.filter(Box::new(tokens.into_iter()))?.collect();
            stages.push(StageOutput::new(filter.name(), join_vec(&tokens)));
        }

        Ok(stages)
    }

    /// Names of the stages, in order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.pipeline
            .char_filters()
            .iter()
            .map(|f| f.name())
            .chain(std::iter::once(self.pipeline.tokenizer().name()))
            .chain(self.pipeline.filters().iter().map(|f| f.name()))
            .collect()
    }
}

impl Analyzer for ReviewNormalizer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.pipeline.analyze(text)
    }

    fn name(&self) -> &'static str {
        "review"
    }
}
