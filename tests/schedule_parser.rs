// Schedule lines as users type them.
use lectio::model::{VerseRange, parse_line, parse_text};

fn ids(line: &str) -> Vec<String> {
    parse_line(line).into_iter().map(|i| i.id).collect()
}

#[test]
fn test_chapter_range_yields_one_item_per_chapter() {
    for (a, b) in [(1u32, 1u32), (1, 3), (5, 12), (140, 150)] {
        let items = parse_line(&format!("詩篇 {}-{}", a, b));
        assert_eq!(items.len() as u32, b - a + 1, "詩篇 {}-{}", a, b);
        for (offset, item) in items.iter().enumerate() {
            assert_eq!(item.chapter, a + offset as u32);
            assert!(item.verses.is_none());
        }
    }
}

#[test]
fn test_verse_range_is_one_item() {
    let items = parse_line("詩 119:105-112");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].chapter, 119);
    assert_eq!(items[0].verses, Some(VerseRange { start: 105, end: 112 }));
    assert_eq!(items[0].id, "PSA119:105-112");
    assert_eq!(items[0].label, "詩篇 119:105-112");
}

#[test]
fn test_full_width_and_dash_variants() {
    assert_eq!(ids("創世記 １–３"), ["GEN1", "GEN2", "GEN3"]);
    assert_eq!(ids("約 3：16"), ["JHN3:16"]);
    assert_eq!(ids("羅 1至2"), ["ROM1", "ROM2"]);
}

#[test]
fn test_segments_can_switch_book() {
    assert_eq!(ids("太 1, 3；詩 23"), ["MAT1", "MAT3", "PSA23"]);
    assert_eq!(ids("Gen 1 2 3"), ["GEN1", "GEN2", "GEN3"]);
}

#[test]
fn test_invalid_input_is_dropped() {
    assert!(parse_line("").is_empty());
    assert!(parse_line("hello world").is_empty());
    // Obadiah has one chapter.
    assert_eq!(ids("俄 1 2"), ["OBA1"]);
    assert!(parse_line("詩 23:0").is_empty());
}

#[test]
fn test_multi_line_text() {
    let items = parse_text("馬太福音 1-3\n\n詩篇 1\n隨便寫寫");
    let got: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(got, ["MAT1", "MAT2", "MAT3", "PSA1"]);
}
