// Static book table and name/alias lookup.
use once_cell::sync::Lazy;

/// One canonical book of the 66-book Protestant canon.
#[derive(Debug, PartialEq, Eq)]
pub struct Book {
    /// 1-based canonical order; the Bolls API addresses books by it.
    pub number: u8,
    /// Stable code used in schedule item ids (`MAT`, `1JN`).
    pub code: &'static str,
    /// Full Traditional Chinese name, used in references.
    pub zh: &'static str,
    /// Short Chinese abbreviation; the FHL API addresses books by it.
    pub abbr: &'static str,
    pub en: &'static str,
    pub chapters: u32,
}

impl Book {
    pub fn label(&self) -> &'static str {
        self.zh
    }

    pub fn has_chapter(&self, chapter: u32) -> bool {
        (1..=self.chapters).contains(&chapter)
    }
}

const fn book(
    number: u8,
    code: &'static str,
    zh: &'static str,
    abbr: &'static str,
    en: &'static str,
    chapters: u32,
) -> Book {
    Book {
        number,
        code,
        zh,
        abbr,
        en,
        chapters,
    }
}

pub static BOOKS: [Book; 66] = [
    book(1, "GEN", "創世記", "創", "Genesis", 50),
    book(2, "EXO", "出埃及記", "出", "Exodus", 40),
    book(3, "LEV", "利未記", "利", "Leviticus", 27),
    book(4, "NUM", "民數記", "民", "Numbers", 36),
    book(5, "DEU", "申命記", "申", "Deuteronomy", 34),
    book(6, "JOS", "約書亞記", "書", "Joshua", 24),
    book(7, "JDG", "士師記", "士", "Judges", 21),
    book(8, "RUT", "路得記", "得", "Ruth", 4),
    book(9, "1SA", "撒母耳記上", "撒上", "1 Samuel", 31),
    book(10, "2SA", "撒母耳記下", "撒下", "2 Samuel", 24),
    book(11, "1KI", "列王紀上", "王上", "1 Kings", 22),
    book(12, "2KI", "列王紀下", "王下", "2 Kings", 25),
    book(13, "1CH", "歷代志上", "代上", "1 Chronicles", 29),
    book(14, "2CH", "歷代志下", "代下", "2 Chronicles", 36),
    book(15, "EZR", "以斯拉記", "拉", "Ezra", 10),
    book(16, "NEH", "尼希米記", "尼", "Nehemiah", 13),
    book(17, "EST", "以斯帖記", "斯", "Esther", 10),
    book(18, "JOB", "約伯記", "伯", "Job", 42),
    book(19, "PSA", "詩篇", "詩", "Psalms", 150),
    book(20, "PRO", "箴言", "箴", "Proverbs", 31),
    book(21, "ECC", "傳道書", "傳", "Ecclesiastes", 12),
    book(22, "SNG", "雅歌", "歌", "Song of Songs", 8),
    book(23, "ISA", "以賽亞書", "賽", "Isaiah", 66),
    book(24, "JER", "耶利米書", "耶", "Jeremiah", 52),
    book(25, "LAM", "耶利米哀歌", "哀", "Lamentations", 5),
    book(26, "EZK", "以西結書", "結", "Ezekiel", 48),
    book(27, "DAN", "但以理書", "但", "Daniel", 12),
    book(28, "HOS", "何西阿書", "何", "Hosea", 14),
    book(29, "JOL", "約珥書", "珥", "Joel", 3),
    book(30, "AMO", "阿摩司書", "摩", "Amos", 9),
    book(31, "OBA", "俄巴底亞書", "俄", "Obadiah", 1),
    book(32, "JON", "約拿書", "拿", "Jonah", 4),
    book(33, "MIC", "彌迦書", "彌", "Micah", 7),
    book(34, "NAM", "那鴻書", "鴻", "Nahum", 3),
    book(35, "HAB", "哈巴谷書", "哈", "Habakkuk", 3),
    book(36, "ZEP", "西番雅書", "番", "Zephaniah", 3),
    book(37, "HAG", "哈該書", "該", "Haggai", 2),
    book(38, "ZEC", "撒迦利亞書", "亞", "Zechariah", 14),
    book(39, "MAL", "瑪拉基書", "瑪", "Malachi", 4),
    book(40, "MAT", "馬太福音", "太", "Matthew", 28),
    book(41, "MRK", "馬可福音", "可", "Mark", 16),
    book(42, "LUK", "路加福音", "路", "Luke", 24),
    book(43, "JHN", "約翰福音", "約", "John", 21),
    book(44, "ACT", "使徒行傳", "徒", "Acts", 28),
    book(45, "ROM", "羅馬書", "羅", "Romans", 16),
    book(46, "1CO", "哥林多前書", "林前", "1 Corinthians", 16),
    book(47, "2CO", "哥林多後書", "林後", "2 Corinthians", 13),
    book(48, "GAL", "加拉太書", "加", "Galatians", 6),
    book(49, "EPH", "以弗所書", "弗", "Ephesians", 6),
    book(50, "PHP", "腓立比書", "腓", "Philippians", 4),
    book(51, "COL", "歌羅西書", "西", "Colossians", 4),
    book(52, "1TH", "帖撒羅尼迦前書", "帖前", "1 Thessalonians", 5),
    book(53, "2TH", "帖撒羅尼迦後書", "帖後", "2 Thessalonians", 3),
    book(54, "1TI", "提摩太前書", "提前", "1 Timothy", 6),
    book(55, "2TI", "提摩太後書", "提後", "2 Timothy", 4),
    book(56, "TIT", "提多書", "多", "Titus", 3),
    book(57, "PHM", "腓利門書", "門", "Philemon", 1),
    book(58, "HEB", "希伯來書", "來", "Hebrews", 13),
    book(59, "JAS", "雅各書", "雅", "James", 5),
    book(60, "1PE", "彼得前書", "彼前", "1 Peter", 5),
    book(61, "2PE", "彼得後書", "彼後", "2 Peter", 3),
    book(62, "1JN", "約翰一書", "約一", "1 John", 5),
    book(63, "2JN", "約翰二書", "約二", "2 John", 1),
    book(64, "3JN", "約翰三書", "約三", "3 John", 1),
    book(65, "JUD", "猶大書", "猶", "Jude", 1),
    book(66, "REV", "啟示錄", "啟", "Revelation", 22),
];

/// Extra spellings: short Traditional forms, Simplified names and common
/// English abbreviations, keyed to book codes.
static ALIASES: &[(&str, &str)] = &[
    // Traditional short forms
    ("創世", "GEN"),
    ("出埃及", "EXO"),
    ("撒母耳上", "1SA"),
    ("撒母耳下", "2SA"),
    ("列王上", "1KI"),
    ("列王下", "2KI"),
    ("歷代上", "1CH"),
    ("歷代下", "2CH"),
    ("詩篇", "PSA"),
    ("以賽亞", "ISA"),
    ("耶利米", "JER"),
    ("哀歌", "LAM"),
    ("以西結", "EZK"),
    ("但以理", "DAN"),
    ("撒迦利亞", "ZEC"),
    ("馬太", "MAT"),
    ("馬可", "MRK"),
    ("路加", "LUK"),
    ("約翰", "JHN"),
    ("使徒", "ACT"),
    ("行傳", "ACT"),
    ("羅馬", "ROM"),
    ("哥林多前", "1CO"),
    ("哥林多後", "2CO"),
    ("加拉太", "GAL"),
    ("以弗所", "EPH"),
    ("腓立比", "PHP"),
    ("歌羅西", "COL"),
    ("提摩太前", "1TI"),
    ("提摩太後", "2TI"),
    ("希伯來", "HEB"),
    ("雅各", "JAS"),
    ("彼得前", "1PE"),
    ("彼得後", "2PE"),
    ("啟示", "REV"),
    // Simplified
    ("创世记", "GEN"),
    ("创", "GEN"),
    ("出埃及记", "EXO"),
    ("利未记", "LEV"),
    ("民数记", "NUM"),
    ("申命记", "DEU"),
    ("约书亚记", "JOS"),
    ("书", "JOS"),
    ("士师记", "JDG"),
    ("路得记", "RUT"),
    ("撒母耳记上", "1SA"),
    ("撒母耳记下", "2SA"),
    ("列王纪上", "1KI"),
    ("列王纪下", "2KI"),
    ("历代志上", "1CH"),
    ("历代志下", "2CH"),
    ("代上", "1CH"),
    ("以斯拉记", "EZR"),
    ("尼希米记", "NEH"),
    ("以斯帖记", "EST"),
    ("约伯记", "JOB"),
    ("诗篇", "PSA"),
    ("诗", "PSA"),
    ("传道书", "ECC"),
    ("传", "ECC"),
    ("以赛亚书", "ISA"),
    ("赛", "ISA"),
    ("耶利米书", "JER"),
    ("以西结书", "EZK"),
    ("结", "EZK"),
    ("约珥书", "JOL"),
    ("俄巴底亚书", "OBA"),
    ("约拿书", "JON"),
    ("弥迦书", "MIC"),
    ("弥", "MIC"),
    ("那鸿书", "NAM"),
    ("鸿", "NAM"),
    ("哈该书", "HAG"),
    ("该", "HAG"),
    ("撒迦利亚书", "ZEC"),
    ("亚", "ZEC"),
    ("玛拉基书", "MAL"),
    ("玛", "MAL"),
    ("马太福音", "MAT"),
    ("马太", "MAT"),
    ("马可福音", "MRK"),
    ("马可", "MRK"),
    ("约翰福音", "JHN"),
    ("约翰", "JHN"),
    ("约", "JHN"),
    ("使徒行传", "ACT"),
    ("罗马书", "ROM"),
    ("罗", "ROM"),
    ("哥林多后书", "2CO"),
    ("林后", "2CO"),
    ("歌罗西书", "COL"),
    ("帖撒罗尼迦前书", "1TH"),
    ("帖撒罗尼迦后书", "2TH"),
    ("帖后", "2TH"),
    ("提摩太后书", "2TI"),
    ("提后", "2TI"),
    ("腓利门书", "PHM"),
    ("门", "PHM"),
    ("希伯来书", "HEB"),
    ("来", "HEB"),
    ("彼得后书", "2PE"),
    ("彼后", "2PE"),
    ("约翰一书", "1JN"),
    ("约一", "1JN"),
    ("约翰二书", "2JN"),
    ("约二", "2JN"),
    ("约翰三书", "3JN"),
    ("约三", "3JN"),
    ("犹大书", "JUD"),
    ("犹", "JUD"),
    ("启示录", "REV"),
    ("启", "REV"),
    // English abbreviations
    ("Gen", "GEN"),
    ("Ex", "EXO"),
    ("Exod", "EXO"),
    ("Lev", "LEV"),
    ("Num", "NUM"),
    ("Deut", "DEU"),
    ("Josh", "JOS"),
    ("Judg", "JDG"),
    ("1 Sam", "1SA"),
    ("2 Sam", "2SA"),
    ("1 Kgs", "1KI"),
    ("2 Kgs", "2KI"),
    ("1 Chr", "1CH"),
    ("2 Chr", "2CH"),
    ("Neh", "NEH"),
    ("Esth", "EST"),
    ("Ps", "PSA"),
    ("Psa", "PSA"),
    ("Psalm", "PSA"),
    ("Prov", "PRO"),
    ("Eccl", "ECC"),
    ("Song", "SNG"),
    ("Isa", "ISA"),
    ("Jer", "JER"),
    ("Lam", "LAM"),
    ("Ezek", "EZK"),
    ("Dan", "DAN"),
    ("Hos", "HOS"),
    ("Obad", "OBA"),
    ("Mic", "MIC"),
    ("Nah", "NAM"),
    ("Hab", "HAB"),
    ("Zeph", "ZEP"),
    ("Hag", "HAG"),
    ("Zech", "ZEC"),
    ("Mal", "MAL"),
    ("Matt", "MAT"),
    ("Mt", "MAT"),
    ("Mk", "MRK"),
    ("Lk", "LUK"),
    ("Jn", "JHN"),
    ("Rom", "ROM"),
    ("1 Cor", "1CO"),
    ("2 Cor", "2CO"),
    ("Gal", "GAL"),
    ("Eph", "EPH"),
    ("Phil", "PHP"),
    ("Col", "COL"),
    ("1 Thess", "1TH"),
    ("2 Thess", "2TH"),
    ("1 Tim", "1TI"),
    ("2 Tim", "2TI"),
    ("Phlm", "PHM"),
    ("Heb", "HEB"),
    ("Jas", "JAS"),
    ("1 Pet", "1PE"),
    ("2 Pet", "2PE"),
    ("1 Jn", "1JN"),
    ("2 Jn", "2JN"),
    ("3 Jn", "3JN"),
    ("Rev", "REV"),
];

/// Every recognized name, ASCII-lowercased, longest first so a prefix
/// scan picks the most specific name (`約翰一書` before `約`).
static NAMES: Lazy<Vec<(String, &'static Book)>> = Lazy::new(|| {
    let mut names: Vec<(String, &'static Book)> = Vec::new();
    for b in BOOKS.iter() {
        for name in [b.zh, b.abbr, b.en] {
            names.push((name.to_ascii_lowercase(), b));
        }
    }
    for (alias, code) in ALIASES {
        if let Some(b) = book_by_code(code) {
            names.push((alias.to_ascii_lowercase(), b));
        }
    }
    names.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.1.number.cmp(&b.1.number)));
    names
});

/// A recognized book at the start of a line plus the text after its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookMatch<'a> {
    pub book: &'static Book,
    /// Byte length of the matched name within the trimmed input.
    pub len: usize,
    pub rest: &'a str,
}

pub fn book_by_code(code: &str) -> Option<&'static Book> {
    BOOKS.iter().find(|b| b.code.eq_ignore_ascii_case(code))
}

pub fn book_by_number(number: u8) -> Option<&'static Book> {
    BOOKS.get(usize::from(number).checked_sub(1)?)
}

/// Finds the book named at the start of `text`.
///
/// Leading whitespace is skipped and ASCII letters compare case-insensitively.
/// A Latin name must not run into further letters (`Jn` does not match
/// `Jnh`), so English words that merely start like a book are rejected.
pub fn find_book(text: &str) -> Option<BookMatch<'_>> {
    let trimmed = text.trim_start();
    let folded = trimmed.to_ascii_lowercase();

    NAMES.iter().find_map(|(name, book)| {
        if !folded.starts_with(name.as_str()) {
            return None;
        }
        let rest = &trimmed[name.len()..];
        let ends_latin = name.chars().last().is_some_and(|c| c.is_ascii_alphabetic());
        let runs_on = rest.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if ends_latin && runs_on {
            return None;
        }
        Some(BookMatch {
            book,
            len: name.len(),
            rest,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_is_consistent() {
        let codes: HashSet<_> = BOOKS.iter().map(|b| b.code).collect();
        assert_eq!(codes.len(), 66);
        for (i, b) in BOOKS.iter().enumerate() {
            assert_eq!(usize::from(b.number), i + 1);
        }
        let total: u32 = BOOKS.iter().map(|b| b.chapters).sum();
        assert_eq!(total, 1189);
    }

    #[test]
    fn test_every_alias_points_at_a_book() {
        for (alias, code) in ALIASES {
            assert!(book_by_code(code).is_some(), "alias {} -> {}", alias, code);
        }
    }

    #[test]
    fn test_longest_name_wins() {
        assert_eq!(find_book("約翰一書 2").unwrap().book.code, "1JN");
        assert_eq!(find_book("約 3").unwrap().book.code, "JHN");
        assert_eq!(find_book("雅歌 1").unwrap().book.code, "SNG");
        assert_eq!(find_book("雅各書 1").unwrap().book.code, "JAS");
        assert_eq!(find_book("哈該書 1").unwrap().book.code, "HAG");
        assert_eq!(find_book("歌羅西書 1").unwrap().book.code, "COL");
    }

    #[test]
    fn test_rest_follows_name() {
        let m = find_book("  馬太 1-3").unwrap();
        assert_eq!(m.book.code, "MAT");
        assert_eq!(m.len, "馬太".len());
        assert_eq!(m.rest, " 1-3");
    }

    #[test]
    fn test_latin_names() {
        assert_eq!(find_book("1 John 3").unwrap().book.code, "1JN");
        assert_eq!(find_book("john 3").unwrap().book.code, "JHN");
        assert_eq!(find_book("PS 23").unwrap().book.code, "PSA");
        assert!(find_book("Psychology 101").is_none());
    }

    #[test]
    fn test_substring_is_not_a_match() {
        assert!(find_book("今天讀馬太福音 1").is_none());
        assert!(find_book("").is_none());
    }

    #[test]
    fn test_lookup_by_number() {
        assert_eq!(book_by_number(40).unwrap().code, "MAT");
        assert!(book_by_number(0).is_none());
        assert!(book_by_number(67).is_none());
    }
}
