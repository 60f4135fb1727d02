// File: ./src/help.rs
//! Localized help sections shared by the TUI help overlay and `--help`.
//!
//! Strings are produced at call time through `rust_i18n::t!()`, so the
//! content follows whatever locale is active.

#[derive(PartialEq, Clone, Copy, Debug, Default)]
pub enum HelpTab {
    #[default]
    Keyboard,
    Syntax,
}

impl HelpTab {
    pub fn toggled(self) -> Self {
        match self {
            HelpTab::Keyboard => HelpTab::Syntax,
            HelpTab::Syntax => HelpTab::Keyboard,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HelpItem {
    pub keys: String,
    pub desc: String,
    pub example: String,
}

#[derive(Clone, Debug)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<HelpItem>,
}

fn item(keys: &str, desc: std::borrow::Cow<'_, str>, example: &str) -> HelpItem {
    HelpItem {
        keys: keys.to_string(),
        desc: desc.to_string(),
        example: example.to_string(),
    }
}

/// Key bindings, grouped the way the footer hints are.
pub fn get_keyboard_help() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: rust_i18n::t!("help_section_navigation").to_string(),
            items: vec![
                item("Tab", rust_i18n::t!("help_focus"), ""),
                item("h j k l / ←↓↑→", rust_i18n::t!("help_calendar_move"), ""),
                item("[ / ]", rust_i18n::t!("help_calendar_month"), ""),
                item("t", rust_i18n::t!("help_calendar_today"), ""),
                item("Enter", rust_i18n::t!("help_open_day"), ""),
                item("/", rust_i18n::t!("help_search"), "詩 23:1-6"),
                item("PgUp / PgDn", rust_i18n::t!("help_scroll"), ""),
            ],
        },
        HelpSection {
            title: rust_i18n::t!("help_section_reading").to_string(),
            items: vec![
                item("Space", rust_i18n::t!("help_toggle_item"), ""),
                item("m", rust_i18n::t!("help_mark_read"), ""),
                item("n / p", rust_i18n::t!("help_next_prev"), ""),
                item("r", rust_i18n::t!("help_reload"), ""),
            ],
        },
        HelpSection {
            title: rust_i18n::t!("help_section_settings").to_string(),
            items: vec![
                item("v / V", rust_i18n::t!("help_versions"), ""),
                item("T", rust_i18n::t!("help_theme"), ""),
                item("+ / -", rust_i18n::t!("help_font"), ""),
                item("s", rust_i18n::t!("help_mode"), ""),
                item("e", rust_i18n::t!("help_edit"), ""),
                item("x / i", rust_i18n::t!("help_export_import"), ""),
                item("?", rust_i18n::t!("help_help"), ""),
                item("q", rust_i18n::t!("help_quit"), ""),
            ],
        },
    ]
}

/// How schedule lines are written.
pub fn get_syntax_help() -> Vec<HelpSection> {
    vec![HelpSection {
        title: rust_i18n::t!("help_section_syntax").to_string(),
        items: vec![
            item("<book> <a>-<b>", rust_i18n::t!("syntax_range"), "馬太福音 1-3"),
            item("<book> <c>:<v1>-<v2>", rust_i18n::t!("syntax_verses"), "詩 23:1-6"),
            item("<book> <a> <b> ...", rust_i18n::t!("syntax_chapters"), "Ps 1 3 5"),
            item("..., ...", rust_i18n::t!("syntax_segments"), "太 1, 3；詩 23"),
            item("{\"MM-DD\": \"...\"}", rust_i18n::t!("syntax_daily"), "{\"01-01\": \"太 1\\n詩 1\"}"),
        ],
    }]
}

pub fn sections(tab: HelpTab) -> Vec<HelpSection> {
    match tab {
        HelpTab::Keyboard => get_keyboard_help(),
        HelpTab::Syntax => get_syntax_help(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_have_items() {
        for tab in [HelpTab::Keyboard, HelpTab::Syntax] {
            let secs = sections(tab);
            assert!(!secs.is_empty());
            assert!(secs.iter().all(|s| !s.items.is_empty() && !s.title.is_empty()));
        }
        assert_eq!(HelpTab::Keyboard.toggled(), HelpTab::Syntax);
    }
}
