//! Properties of the review normalizer over a spread of realistic reviews.

use std::sync::LazyLock;

use ulasan::analysis::analyzer::review::ReviewNormalizer;
use ulasan::analysis::emoji::canonical_name;
use ulasan::analysis::lexicon::{LexicalResources, ResourcePaths};

static NORMALIZER: LazyLock<ReviewNormalizer> =
    LazyLock::new(|| ReviewNormalizer::builtin().unwrap());

const REVIEWS: &[&str] = &[
    "Aplikasinya BAGUSSS banget😍😍😍 recommended!! http://x.co 123",
    "gk bisa login, udh 3x coba 😭😭😭 tolong diperbaiki",
    "Mantappp, pengiriman cepat dan aman 👍👍",
    "cek www.promo.id/diskon sekarang!!! diskon 50%",
    "Pelayanannya lambat sekali... mengecewakan 😡",
    "Makasih min, sangat membantu ❤️❤️",
    "   ",
    "",
    "🔥🔥🔥🔥🔥",
    "ok",
    "menggunakan aplikasi ini berguna adanya",
    "tidur dulu 💤💤💤",
];

#[test]
fn test_idempotent() {
    for review in REVIEWS {
        let once = NORMALIZER.process(review).unwrap();
        let twice = NORMALIZER.process(&once).unwrap();
        assert_eq!(once, twice, "review {review:?}");
    }
}

#[test]
fn test_no_urls_or_digits_survive() {
    for review in REVIEWS {
        let normalized = NORMALIZER.process(review).unwrap();
        for token in normalized.split(' ') {
            assert!(!token.starts_with("http"), "{normalized:?}");
            assert!(!token.starts_with("www"), "{normalized:?}");
        }
        assert!(!normalized.chars().any(|c| c.is_ascii_digit()), "{normalized:?}");
    }
}

#[test]
fn test_output_shape() {
    for review in REVIEWS {
        let normalized = NORMALIZER.process(review).unwrap();
        assert_eq!(normalized.trim(), normalized);
        assert!(!normalized.contains("  "));
        assert!(
            normalized
                .chars()
                .all(|c| c == ' ' || c == '_' || c.is_alphanumeric()),
            "{normalized:?}"
        );
    }
}

#[test]
fn test_repeated_glyph_leaves_one() {
    let fire = canonical_name(emojis::get("🔥").unwrap().name());
    let normalized = NORMALIZER.process("🔥🔥🔥🔥🔥").unwrap();
    assert_eq!(normalized, fire);

    let sob = canonical_name(emojis::get("😭").unwrap().name());
    let normalized = NORMALIZER.process(REVIEWS[1]).unwrap();
    assert_eq!(normalized.matches(sob.as_str()).count(), 1);
}

#[test]
fn test_examples() {
    assert_eq!(NORMALIZER.process("Mantappp").unwrap(), "mantap");
    assert_eq!(NORMALIZER.process("Mantul").unwrap(), "mantap betul");
    assert_eq!(
        NORMALIZER.process("Pelayanannya lambat, mengecewakan").unwrap(),
        "layan lambat kecewa"
    );
    assert_eq!(NORMALIZER.process("ok").unwrap(), "ok");
}

#[test]
fn test_resource_override() {
    let dir = tempfile::tempdir().unwrap();
    let slang = dir.path().join("slang.tsv");
    std::fs::write(&slang, "mantul\tluar biasa\n").unwrap();

    let resources = LexicalResources::load(&ResourcePaths {
        slang: Some(slang.as_path()),
        ..ResourcePaths::default()
    })
    .unwrap();
    let catalog = std::sync::Arc::new(ulasan::analysis::emoji::EmojiCatalog::new().unwrap());
    let normalizer = ReviewNormalizer::new(&resources, catalog).unwrap();

    assert_eq!(normalizer.process("mantul").unwrap(), "luar biasa");
}
