// File: ./src/model/mod.rs
pub mod books;
pub mod passage;
pub mod plan;
pub mod schedule;

pub use books::{BOOKS, Book, BookMatch, book_by_code, book_by_number, find_book};
pub use passage::{BibleData, BibleVerse, Passage, PassageRequest, filter_range};
pub use plan::{DailyPlan, PlanNavigation, ScheduleMode, date_key, first_unread, resolve_day};
pub use schedule::{ScheduleItem, VerseRange, parse_line, parse_text};
