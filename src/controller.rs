// File: src/controller.rs
//! Reading state and the operations the UI performs on it.
//! Every mutation goes through here and is persisted before returning, so
//! the TUI and the CLI subcommands behave the same way.
use crate::calendar::{MonthGrid, build_month};
use crate::client::VersionInfo;
use crate::context::SharedContext;
use crate::model::{
    BibleData, PassageRequest, PlanNavigation, ScheduleItem, ScheduleMode, first_unread,
    parse_text, resolve_day,
};
use crate::settings::{Settings, Theme};
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct ReadingController {
    pub settings: Settings,
    versions: &'static [VersionInfo],
    ctx: SharedContext,
}

impl ReadingController {
    pub fn new(ctx: SharedContext, versions: &'static [VersionInfo]) -> Self {
        let settings = Settings::load(ctx.as_ref(), versions);
        Self {
            settings,
            versions,
            ctx,
        }
    }

    pub fn versions(&self) -> &'static [VersionInfo] {
        self.versions
    }

    /// Applies `f` and writes the whole blob back.
    pub fn update<F, T>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Settings) -> T,
    {
        let out = f(&mut self.settings);
        self.settings.save(self.ctx.as_ref())?;
        Ok(out)
    }

    pub fn toggle_item(&mut self, id: &str) -> Result<bool> {
        let done = self.update(|s| s.completed_tasks.toggle(id))?;
        log::debug!("{} -> {}", id, if done { "done" } else { "open" });
        Ok(done)
    }

    /// Marks the displayed passage complete. Returns false if it already was.
    pub fn mark_read(&mut self, data: &BibleData) -> Result<bool> {
        let id = data.item_id();
        self.update(|s| s.completed_tasks.mark(&id))
    }

    pub fn is_done(&self, id: &str) -> bool {
        self.settings.completed_tasks.is_done(id)
    }

    /// Merges a pasted or loaded export. Nothing is written when the payload is malformed.
    pub fn import_progress(&mut self, payload: &str) -> Result<usize> {
        let mut merged = self.settings.completed_tasks.clone();
        let added = merged.import_json(payload)?;
        self.update(|s| s.completed_tasks = merged)?;
        log::info!("Imported {} new completed items", added);
        Ok(added)
    }

    pub fn export_progress(&self) -> String {
        self.settings.completed_tasks.export_json()
    }

    /// Where `x` in the TUI and `progress export --file` write by default.
    pub fn export_path(&self) -> Option<std::path::PathBuf> {
        self.ctx.get_progress_export_path()
    }

    pub fn set_primary_version(&mut self, id: &str) -> Result<()> {
        if !self.versions.iter().any(|v| v.id == id) {
            anyhow::bail!("Unknown version '{}'", id);
        }
        self.update(|s| s.primary_version = id.to_string())
    }

    pub fn set_secondary_version(&mut self, id: Option<&str>) -> Result<()> {
        if let Some(id) = id
            && !self.versions.iter().any(|v| v.id == id)
        {
            anyhow::bail!("Unknown version '{}'", id);
        }
        self.update(|s| s.secondary_version = id.map(str::to_string))
    }

    pub fn cycle_theme(&mut self) -> Result<Theme> {
        self.update(|s| {
            s.theme = s.theme.next();
            s.theme
        })
    }

    pub fn adjust_font_size(&mut self, steps: i32) -> Result<u16> {
        self.update(|s| s.adjust_font_size(steps))
    }

    pub fn set_schedule_mode(&mut self, mode: ScheduleMode) -> Result<()> {
        self.update(|s| s.schedule_mode = mode)
    }

    pub fn toggle_schedule_mode(&mut self) -> Result<ScheduleMode> {
        self.update(|s| {
            s.schedule_mode = s.schedule_mode.toggled();
            s.schedule_mode
        })
    }

    /// The editable source for the current mode: free text or plan JSON.
    pub fn schedule_source(&self) -> &str {
        match self.settings.schedule_mode {
            ScheduleMode::Static => &self.settings.schedule_text,
            ScheduleMode::Daily => &self.settings.daily_schedule_json,
        }
    }

    /// Stores an edited schedule for the current mode. The text is saved
    /// even when it does not parse; the return value says whether it did.
    pub fn save_schedule(&mut self, text: &str) -> Result<bool> {
        let valid = match self.settings.schedule_mode {
            ScheduleMode::Static => !parse_text(text).is_empty(),
            ScheduleMode::Daily => crate::model::DailyPlan::parse(text).is_ok(),
        };
        if !valid {
            log::warn!("Saved schedule does not parse; days will read as empty");
        }
        self.update(|s| match s.schedule_mode {
            ScheduleMode::Static => s.schedule_text = text.to_string(),
            ScheduleMode::Daily => s.daily_schedule_json = text.to_string(),
        })?;
        Ok(valid)
    }

    pub fn day_plan(&self, key: &str) -> Vec<ScheduleItem> {
        resolve_day(&self.settings.daily_schedule_json, key)
    }

    pub fn active_plan(&self, selected_key: &str) -> Vec<ScheduleItem> {
        match self.settings.schedule_mode {
            ScheduleMode::Static => parse_text(&self.settings.schedule_text),
            ScheduleMode::Daily => self.day_plan(selected_key),
        }
    }

    pub fn month(&self, year: i32, month: u32) -> MonthGrid {
        build_month(
            year,
            month,
            &self.settings.daily_schedule_json,
            &self.settings.completed_tasks,
        )
    }

    /// What to open when a day is picked: its first unread reading.
    pub fn select_day(&self, key: &str) -> Option<PassageRequest> {
        let plan = self.day_plan(key);
        first_unread(&plan, &self.settings.completed_tasks).map(PassageRequest::from_item)
    }

    pub fn navigation(&self, current: &BibleData, selected_key: &str) -> PlanNavigation {
        PlanNavigation::locate(&self.active_plan(selected_key), &current.item_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::BOLLS_VERSIONS;
    use crate::context::{AppContext, TestContext};
    use crate::model::BibleVerse;
    use std::sync::Arc;

    fn controller() -> (ReadingController, Arc<TestContext>) {
        let ctx = Arc::new(TestContext::new());
        let c = ReadingController::new(ctx.clone(), BOLLS_VERSIONS);
        (c, ctx)
    }

    #[test]
    fn test_toggle_persists() {
        let (mut c, ctx) = controller();
        assert!(c.toggle_item("MAT1").unwrap());

        let reloaded = Settings::load(ctx.as_ref(), BOLLS_VERSIONS);
        assert!(reloaded.completed_tasks.is_done("MAT1"));
    }

    #[test]
    fn test_select_day_skips_read_items() {
        let (mut c, _ctx) = controller();
        c.settings.daily_schedule_json = r#"{"01-01": "太 1-2"}"#.into();
        assert_eq!(c.select_day("01-01").unwrap().chapter, 1);
        c.toggle_item("MAT1").unwrap();
        assert_eq!(c.select_day("01-01").unwrap().chapter, 2);
        assert!(c.select_day("01-02").is_none());
    }

    #[test]
    fn test_mark_read_completes_plan_item() {
        let (mut c, _ctx) = controller();
        c.settings.daily_schedule_json = r#"{"01-01": "詩 23:1-6"}"#.into();
        let req = c.select_day("01-01").unwrap();
        let data = BibleData::new(
            &req,
            vec![BibleVerse {
                verse: 1,
                text: "耶和華是我的牧者".into(),
            }],
        );
        assert!(c.mark_read(&data).unwrap());
        assert!(!c.mark_read(&data).unwrap());
        assert!(c.month(2026, 1).day(1).unwrap().is_fully_completed);
    }

    #[test]
    fn test_static_mode_uses_schedule_text() {
        let (mut c, _ctx) = controller();
        c.set_schedule_mode(ScheduleMode::Static).unwrap();
        let plan = c.active_plan("05-05");
        assert_eq!(plan.len(), 4);
        assert_eq!(plan[3].id, "PSA1");
    }

    #[test]
    fn test_invalid_schedule_still_saved() {
        let (mut c, ctx) = controller();
        assert!(!c.save_schedule("{oops").unwrap());
        assert!(c.day_plan("01-01").is_empty());
        let raw = std::fs::read_to_string(ctx.get_settings_path().unwrap()).unwrap();
        assert!(raw.contains("{oops"));
    }

    #[test]
    fn test_import_rejects_bad_payload() {
        let (mut c, _ctx) = controller();
        c.toggle_item("MAT1").unwrap();
        assert!(c.import_progress("nope").is_err());
        assert_eq!(c.import_progress(r#"["MAT1","MAT2"]"#).unwrap(), 1);
        assert_eq!(c.export_progress(), r#"["MAT1","MAT2"]"#);
    }

    #[test]
    fn test_version_setters_validate() {
        let (mut c, _ctx) = controller();
        assert!(c.set_primary_version("NOPE").is_err());
        c.set_primary_version("KJV").unwrap();
        c.set_secondary_version(Some("CUNP")).unwrap();
        c.set_secondary_version(None).unwrap();
        assert_eq!(c.settings.primary_version, "KJV");
        assert!(c.settings.secondary_version.is_none());
    }
}
