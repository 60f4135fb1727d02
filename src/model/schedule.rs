// File: src/model/schedule.rs
// Turns free-form schedule lines ("馬太福音 1-3", "詩 23:1-6") into reading items.
use crate::model::books::{Book, find_book};
use std::fmt;

/// Inclusive verse bounds within one chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerseRange {
    pub start: u32,
    pub end: u32,
}

impl VerseRange {
    /// Builds a range, swapping reversed bounds.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn single(verse: u32) -> Self {
        Self {
            start: verse,
            end: verse,
        }
    }

    pub fn contains(&self, verse: u32) -> bool {
        (self.start..=self.end).contains(&verse)
    }
}

impl fmt::Display for VerseRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// One resolved reading target. The id is the key stored in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleItem {
    pub id: String,
    pub label: String,
    pub book: &'static Book,
    pub chapter: u32,
    pub verses: Option<VerseRange>,
}

impl ScheduleItem {
    pub fn new(book: &'static Book, chapter: u32, verses: Option<VerseRange>) -> Self {
        let (id, label) = match verses {
            Some(range) => (
                format!("{}{}:{}", book.code, chapter, range),
                format!("{} {}:{}", book.zh, chapter, range),
            ),
            None => (
                format!("{}{}", book.code, chapter),
                format!("{} {}", book.zh, chapter),
            ),
        };
        Self {
            id,
            label,
            book,
            chapter,
            verses,
        }
    }

    pub fn book_code(&self) -> &'static str {
        self.book.code
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Num(u32),
    Colon,
    Dash,
}

const SEGMENT_SEPARATORS: &[char] = &[',', '，', '、', ';', '；'];

fn is_dash(c: char) -> bool {
    matches!(c, '-' | '–' | '—' | '~' | '～' | '至')
}

/// Maps full-width digits to ASCII so `１２` reads as 12.
fn ascii_digit(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        '０'..='９' => Some(c as u32 - '０' as u32),
        _ => None,
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current: Option<u32> = None;

    for c in text.chars() {
        if let Some(d) = ascii_digit(c) {
            current = Some(current.unwrap_or(0).saturating_mul(10).saturating_add(d));
            continue;
        }
        if let Some(n) = current.take() {
            tokens.push(Token::Num(n));
        }
        if c == ':' || c == '：' {
            tokens.push(Token::Colon);
        } else if is_dash(c) {
            tokens.push(Token::Dash);
        }
    }
    if let Some(n) = current {
        tokens.push(Token::Num(n));
    }
    tokens
}

fn numbers(tokens: &[Token]) -> Vec<u32> {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Num(n) => Some(*n),
            _ => None,
        })
        .collect()
}

fn parse_segment(book: &'static Book, text: &str) -> Vec<ScheduleItem> {
    let tokens = tokenize(text);

    if let Some(colon) = tokens.iter().position(|t| *t == Token::Colon) {
        let Some(chapter) = numbers(&tokens[..colon]).last().copied() else {
            return Vec::new();
        };
        let after = &tokens[colon + 1..];
        // `1:1-2:3` spans chapters, which one verse range cannot express.
        if after.contains(&Token::Colon) {
            return Vec::new();
        }
        let range = match after {
            [Token::Num(a), Token::Dash, Token::Num(b), ..] => VerseRange::new(*a, *b),
            [Token::Num(v), ..] => VerseRange::single(*v),
            _ => return Vec::new(),
        };
        if range.start == 0 || !book.has_chapter(chapter) {
            return Vec::new();
        }
        return vec![ScheduleItem::new(book, chapter, Some(range))];
    }

    // A dash joins only the numbers directly around it.
    let mut chapters = Vec::new();
    let mut rest = tokens.as_slice();
    while !rest.is_empty() {
        match rest {
            [Token::Num(a), Token::Dash, Token::Num(b), tail @ ..] => {
                let lo = (*a).min(*b).max(1);
                let hi = (*a).max(*b).min(book.chapters);
                chapters.extend(lo..=hi);
                rest = tail;
            }
            [Token::Num(n), tail @ ..] => {
                chapters.push(*n);
                rest = tail;
            }
            [_, tail @ ..] => rest = tail,
            [] => break,
        }
    }

    chapters
        .into_iter()
        .filter(|c| book.has_chapter(*c))
        .map(|c| ScheduleItem::new(book, c, None))
        .collect()
}

/// Parses one schedule line. Lines that do not start with a known book
/// yield nothing.
///
/// Separated segments keep the current book unless they name a new one,
/// so `太 1, 3；詩 23` gives Matthew 1, Matthew 3 and Psalm 23.
pub fn parse_line(line: &str) -> Vec<ScheduleItem> {
    let Some(first) = find_book(line) else {
        return Vec::new();
    };

    let mut items = Vec::new();
    let mut book = first.book;
    for (i, segment) in first.rest.split(SEGMENT_SEPARATORS).enumerate() {
        let body = if i == 0 {
            segment
        } else {
            match find_book(segment) {
                Some(m) => {
                    book = m.book;
                    m.rest
                }
                None => segment,
            }
        };
        items.extend(parse_segment(book, body));
    }
    items
}

/// Parses every non-blank line of a multi-line schedule.
pub fn parse_text(text: &str) -> Vec<ScheduleItem> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .flat_map(parse_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[ScheduleItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_chapter_range_expands() {
        let items = parse_line("馬太福音 1-3");
        assert_eq!(ids(&items), vec!["MAT1", "MAT2", "MAT3"]);
        assert_eq!(items[1].label, "馬太福音 2");
    }

    #[test]
    fn test_verse_range() {
        let items = parse_line("詩 23:1-6");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "PSA23:1-6");
        assert_eq!(items[0].label, "詩篇 23:1-6");
        assert_eq!(items[0].verses, Some(VerseRange::new(1, 6)));
    }

    #[test]
    fn test_single_verse() {
        let items = parse_line("約 3:16");
        assert_eq!(items[0].id, "JHN3:16");
        assert_eq!(items[0].label, "約翰福音 3:16");
    }

    #[test]
    fn test_full_width_and_alt_dashes() {
        assert_eq!(ids(&parse_line("創 １～２")), vec!["GEN1", "GEN2"]);
        assert_eq!(ids(&parse_line("Gen 4–5")), vec!["GEN4", "GEN5"]);
        assert_eq!(parse_line("詩 23：1至3")[0].id, "PSA23:1-3");
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        assert_eq!(ids(&parse_line("太 3-1")), vec!["MAT1", "MAT2", "MAT3"]);
        assert_eq!(parse_line("詩 23:6-1")[0].id, "PSA23:1-6");
    }

    #[test]
    fn test_out_of_range_chapters_dropped() {
        assert_eq!(ids(&parse_line("猶 1-3")), vec!["JUD1"]);
        assert!(parse_line("太 0").is_empty());
        assert!(parse_line("太 29").is_empty());
        assert!(parse_line("太 5:0").is_empty());
    }

    #[test]
    fn test_dash_pairs_only_its_neighbours() {
        assert_eq!(
            ids(&parse_line("太 1 3-5")),
            vec!["MAT1", "MAT3", "MAT4", "MAT5"]
        );
        assert_eq!(ids(&parse_line("太 1-2 5")), vec!["MAT1", "MAT2", "MAT5"]);
        assert_eq!(ids(&parse_line("太 4-")), vec!["MAT4"]);
    }

    #[test]
    fn test_cross_chapter_verse_range_rejected() {
        assert!(parse_line("創 1:1-2:3").is_empty());
        assert_eq!(ids(&parse_line("創 1:1-2:3, 5")), vec!["GEN5"]);
    }

    #[test]
    fn test_plain_numbers_are_chapters() {
        assert_eq!(ids(&parse_line("詩 1 3 5")), vec!["PSA1", "PSA3", "PSA5"]);
    }

    #[test]
    fn test_segments_can_switch_book() {
        assert_eq!(
            ids(&parse_line("太 1, 3；詩 23")),
            vec!["MAT1", "MAT3", "PSA23"]
        );
    }

    #[test]
    fn test_unknown_book_ignored() {
        assert!(parse_line("hello 1-3").is_empty());
        assert!(parse_line("").is_empty());
    }

    #[test]
    fn test_parse_text_skips_blank_lines() {
        let items = parse_text("馬太福音 1-3\n\n詩篇 1\n   \n");
        assert_eq!(ids(&items), vec!["MAT1", "MAT2", "MAT3", "PSA1"]);
    }

    #[test]
    fn test_book_only_line_is_empty() {
        assert!(parse_line("馬太福音").is_empty());
    }
}
