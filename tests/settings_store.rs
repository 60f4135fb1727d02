// Persisted settings and config files under an isolated root.
use lectio::client::{BOLLS_VERSIONS, FHL_VERSIONS};
use lectio::config::{Config, ProviderKind};
use lectio::context::{AppContext, TestContext};
use lectio::controller::ReadingController;
use lectio::model::ScheduleMode;
use lectio::settings::{FONT_MAX, FONT_MIN, Settings, Theme};
use std::sync::Arc;

#[test]
fn test_changes_survive_restart() {
    let ctx = Arc::new(TestContext::new());
    {
        let mut c = ReadingController::new(ctx.clone(), BOLLS_VERSIONS);
        c.toggle_item("MAT1").unwrap();
        c.set_secondary_version(Some("KJV")).unwrap();
        c.set_schedule_mode(ScheduleMode::Static).unwrap();
        c.cycle_theme().unwrap();
        c.save_schedule("約 1-3").unwrap();
    }

    let c = ReadingController::new(ctx.clone(), BOLLS_VERSIONS);
    assert!(c.is_done("MAT1"));
    assert_eq!(c.settings.secondary_version.as_deref(), Some("KJV"));
    assert_eq!(c.settings.schedule_mode, ScheduleMode::Static);
    assert_eq!(c.settings.theme, Theme::Light.next());
    assert_eq!(c.active_plan("01-01").len(), 3);
}

#[test]
fn test_font_size_stays_in_bounds() {
    let ctx = Arc::new(TestContext::new());
    let mut c = ReadingController::new(ctx, BOLLS_VERSIONS);
    assert_eq!(c.adjust_font_size(100).unwrap(), FONT_MAX);
    assert_eq!(c.adjust_font_size(-100).unwrap(), FONT_MIN);
}

#[test]
fn test_switching_provider_repairs_versions() {
    let ctx = TestContext::new();
    let mut s = Settings::default();
    s.primary_version = "CUNP".into();
    s.secondary_version = Some("KJV".into());
    s.save(&ctx).unwrap();

    // FHL ids are lower-case, so neither Bolls id survives.
    let loaded = Settings::load(&ctx, FHL_VERSIONS);
    assert_eq!(loaded.primary_version, FHL_VERSIONS[0].id);
    assert!(loaded.secondary_version.is_none());
}

#[test]
fn test_config_defaults_written_on_first_run() {
    let ctx = TestContext::new();
    let cfg = Config::load_or_init(&ctx).unwrap();
    assert_eq!(cfg.provider, ProviderKind::Bolls);
    assert!(ctx.get_config_file_path().unwrap().exists());

    let again = Config::load(&ctx).unwrap();
    assert_eq!(again.plan_year, cfg.plan_year);
}

#[test]
fn test_malformed_config_is_an_error() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    std::fs::write(&path, "provider = [broken").unwrap();

    let err = Config::load_or_init(&ctx).unwrap_err();
    assert!(!Config::is_missing_config_error(&err));
    // The broken file is left for the user to fix.
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "provider = [broken");
}

#[test]
fn test_partial_config_uses_defaults() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    std::fs::write(&path, "provider = \"fhl\"\nplan_year = 2027\n").unwrap();

    let cfg = Config::load(&ctx).unwrap();
    assert_eq!(cfg.provider, ProviderKind::Fhl);
    assert_eq!(cfg.plan_year, 2027);
    assert_eq!(cfg.provider_base_url(), "https://bible.fhl.net");
}
