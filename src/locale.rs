//! UI language selection for `rust_i18n::t!`.

/// Locales shipped under `locales/`.
pub const AVAILABLE: &[&str] = &["en", "zh-TW"];

/// Maps a configured or system locale tag to one of the shipped locales.
/// Any Chinese tag (`zh`, `zh-Hant-TW`, `zh_CN`) selects `zh-TW`.
pub fn resolve(config_override: Option<&str>, system: Option<&str>) -> &'static str {
    let tag = config_override.or(system).unwrap_or("en").to_ascii_lowercase();
    if tag.starts_with("zh") { "zh-TW" } else { "en" }
}

pub fn init(config_override: Option<&str>) -> &'static str {
    let system = sys_locale::get_locale();
    let chosen = resolve(config_override, system.as_deref());
    rust_i18n::set_locale(chosen);
    log::debug!("UI locale: {} (system {:?})", chosen, system);
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_locale() {
        assert_eq!(resolve(None, Some("zh-Hant-TW")), "zh-TW");
        assert_eq!(resolve(None, Some("zh_CN")), "zh-TW");
        assert_eq!(resolve(Some("en"), Some("zh-TW")), "en");
        assert_eq!(resolve(None, Some("de-DE")), "en");
        assert_eq!(resolve(None, None), "en");
    }
}
