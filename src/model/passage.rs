// File: src/model/passage.rs
use crate::model::books::Book;
use crate::model::schedule::{ScheduleItem, VerseRange, parse_line};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibleVerse {
    pub verse: u32,
    pub text: String,
}

/// What the reader asked to see: a chapter, optionally narrowed to verses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassageRequest {
    pub book: &'static Book,
    pub chapter: u32,
    pub verses: Option<VerseRange>,
}

impl PassageRequest {
    pub fn chapter(book: &'static Book, chapter: u32) -> Self {
        Self {
            book,
            chapter: chapter.clamp(1, book.chapters),
            verses: None,
        }
    }

    pub fn from_item(item: &ScheduleItem) -> Self {
        Self {
            book: item.book,
            chapter: item.chapter,
            verses: item.verses,
        }
    }

    /// Search box input: the first reading target the line names.
    pub fn parse(input: &str) -> Option<Self> {
        parse_line(input).first().map(Self::from_item)
    }

    /// The whole previous chapter, staying on chapter 1 at the start of a book.
    pub fn prev_chapter(&self) -> Self {
        Self::chapter(self.book, self.chapter.saturating_sub(1))
    }

    pub fn next_chapter(&self) -> Self {
        Self::chapter(self.book, self.chapter.saturating_add(1))
    }

    pub fn reference(&self) -> String {
        ScheduleItem::new(self.book, self.chapter, self.verses).label
    }

    pub fn item_id(&self) -> String {
        ScheduleItem::new(self.book, self.chapter, self.verses).id
    }
}

/// A fetched passage in one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibleData {
    pub reference: String,
    pub book: &'static Book,
    pub chapter: u32,
    pub verses: Option<VerseRange>,
    pub lines: Vec<BibleVerse>,
}

impl BibleData {
    pub fn new(request: &PassageRequest, lines: Vec<BibleVerse>) -> Self {
        Self {
            reference: request.reference(),
            book: request.book,
            chapter: request.chapter,
            verses: request.verses,
            lines: filter_range(lines, request.verses),
        }
    }

    pub fn book_code(&self) -> &'static str {
        self.book.code
    }

    /// Same id the schedule uses for this target, so marking it read
    /// completes the matching plan item.
    pub fn item_id(&self) -> String {
        self.request().item_id()
    }

    pub fn request(&self) -> PassageRequest {
        PassageRequest {
            book: self.book,
            chapter: self.chapter,
            verses: self.verses,
        }
    }
}

/// Primary text plus an optional second version aligned by verse number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    pub data: BibleData,
    pub parallel: Option<Vec<BibleVerse>>,
}

impl Passage {
    /// Rows of (primary verse, matching parallel text).
    pub fn rows(&self) -> Vec<(&BibleVerse, Option<&str>)> {
        self.data
            .lines
            .iter()
            .map(|line| {
                let paired = self.parallel.as_ref().and_then(|p| {
                    p.iter()
                        .find(|v| v.verse == line.verse)
                        .map(|v| v.text.as_str())
                });
                (line, paired)
            })
            .collect()
    }
}

/// Keeps the verses inside `range`; `None` keeps everything.
pub fn filter_range(lines: Vec<BibleVerse>, range: Option<VerseRange>) -> Vec<BibleVerse> {
    match range {
        Some(r) => lines.into_iter().filter(|v| r.contains(v.verse)).collect(),
        None => lines,
    }
}
