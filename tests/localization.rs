// The active locale is process-wide, so these tests run one at a time.
use lectio::help::{HelpTab, get_keyboard_help, sections};
use lectio::locale;
use serial_test::serial;

#[test]
#[serial]
fn test_help_follows_locale() {
    assert_eq!(locale::init(Some("zh-TW")), "zh-TW");
    let zh = get_keyboard_help();
    assert_eq!(zh[0].title, "瀏覽");

    assert_eq!(locale::init(Some("en")), "en");
    let en = get_keyboard_help();
    assert_eq!(en[0].title, "Navigation");
    assert_eq!(en.len(), zh.len());
}

#[test]
#[serial]
fn test_unknown_locale_falls_back_to_english() {
    assert_eq!(locale::init(Some("fr-FR")), "en");
    let syntax = sections(HelpTab::Syntax);
    assert_eq!(syntax[0].title, "Schedule lines");
}
