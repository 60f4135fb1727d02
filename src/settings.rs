// File: ./src/settings.rs
// The persisted reader settings blob (schedule, progress, appearance, versions).
use crate::client::VersionInfo;
use crate::context::AppContext;
use crate::model::ScheduleMode;
use crate::progress::Progress;
use crate::storage::LocalStorage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

pub const FONT_MIN: u16 = 12;
pub const FONT_MAX: u16 = 32;
pub const FONT_STEP: u16 = 2;

pub const DEFAULT_SCHEDULE: &str = "馬太福音 1-3\n詩篇 1";
pub const DEFAULT_VERSION: &str = "CUNP";
/// Bundled one-year plan, keyed "MM-DD".
pub const DEFAULT_DAILY_PLAN: &str = include_str!("../assets/default_plan.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Sepia,
    Dark,
}

impl Theme {
    pub fn next(self) -> Self {
        Theme::iter()
            .cycle()
            .skip_while(|t| *t != self)
            .nth(1)
            .unwrap_or_default()
    }

    pub fn key(self) -> &'static str {
        match self {
            Theme::Light => "theme_light",
            Theme::Sepia => "theme_sepia",
            Theme::Dark => "theme_dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub schedule_text: String,
    pub daily_schedule_json: String,
    pub schedule_mode: ScheduleMode,
    pub completed_tasks: Progress,
    pub font_size: u16,
    pub theme: Theme,
    pub primary_version: String,
    pub secondary_version: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schedule_text: DEFAULT_SCHEDULE.to_string(),
            daily_schedule_json: DEFAULT_DAILY_PLAN.to_string(),
            schedule_mode: ScheduleMode::Daily,
            completed_tasks: Progress::default(),
            font_size: 18,
            theme: Theme::Light,
            primary_version: DEFAULT_VERSION.to_string(),
            secondary_version: None,
        }
    }
}

impl Settings {
    /// Loads the blob. A missing file gives defaults; an unreadable one is
    /// backed up, logged, and replaced by defaults on the next save.
    pub fn load(ctx: &dyn AppContext, versions: &[VersionInfo]) -> Self {
        let mut settings = match ctx.get_settings_path() {
            Ok(path) => match LocalStorage::read_json::<Settings>(&path) {
                Ok(Some(s)) => s,
                Ok(None) => Settings::default(),
                Err(e) => {
                    log::warn!("Settings unreadable, using defaults: {:#}", e);
                    if let Some(backup) = LocalStorage::backup_corrupt(&path) {
                        log::info!("Previous settings kept at {}", backup.display());
                    }
                    Settings::default()
                }
            },
            Err(e) => {
                log::warn!("No settings path: {:#}", e);
                Settings::default()
            }
        };
        settings.sanitize(versions);
        settings
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_settings_path()?;
        LocalStorage::write_json(&path, self)
    }

    /// Repairs values a hand-edited or older blob may carry.
    pub fn sanitize(&mut self, versions: &[VersionInfo]) {
        self.font_size = self.font_size.clamp(FONT_MIN, FONT_MAX);
        self.sanitize_versions(versions);
    }

    /// Unknown primary falls back to the provider's first version;
    /// unknown secondary is dropped.
    pub fn sanitize_versions(&mut self, versions: &[VersionInfo]) {
        let known = |id: &str| versions.iter().any(|v| v.id == id);
        if !known(&self.primary_version)
            && let Some(first) = versions.first()
        {
            log::info!(
                "Version '{}' not offered, using '{}'",
                self.primary_version,
                first.id
            );
            self.primary_version = first.id.to_string();
        }
        if let Some(sec) = &self.secondary_version
            && !known(sec)
        {
            log::info!("Dropping unknown parallel version '{}'", sec);
            self.secondary_version = None;
        }
    }

    /// Moves the font size by `steps` increments, staying within bounds.
    pub fn adjust_font_size(&mut self, steps: i32) -> u16 {
        let target = i32::from(self.font_size) + steps * i32::from(FONT_STEP);
        self.font_size = target.clamp(i32::from(FONT_MIN), i32::from(FONT_MAX)) as u16;
        self.font_size
    }
}
