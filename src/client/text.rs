// File: ./src/client/text.rs
//! Verse text cleanup. Both APIs embed markup: Strong's numbers, footnote
//! markers and HTML entities.
use once_cell::sync::Lazy;
use regex::Regex;

static STRONGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<S>\s*\d+\s*</S>").expect("valid strongs regex"));
static NOTES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(sup|note|fn)\b[^>]*>.*?</(sup|note|fn)>").expect("valid footnote regex")
});
static TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid html tag regex"));
static BRACKET_REFS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d+\]").expect("valid bracket ref regex"));
static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|\d+);").expect("valid entity regex"));
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

fn decode_entities(text: &str) -> String {
    let named = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'");
    let numeric = NUMERIC_ENTITY.replace_all(&named, |caps: &regex::Captures| {
        let raw = &caps[1];
        let code = match raw.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => raw.parse().ok(),
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });
    // Last, so "&amp;lt;" stays literal.
    numeric.replace("&amp;", "&")
}

/// Plain verse text: markup removed, entities decoded, whitespace collapsed.
pub fn clean_text(raw: &str) -> String {
    let text = STRONGS.replace_all(raw, "");
    let text = NOTES.replace_all(&text, "");
    let text = TAGS.replace_all(&text, "");
    let text = BRACKET_REFS.replace_all(&text, "");
    let text = decode_entities(&text);
    SPACES.replace_all(&text, " ").trim().to_string()
}
