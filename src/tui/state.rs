// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::calendar::{MonthGrid, days_in_month, initial_view, shift_month};
use crate::client::VersionInfo;
use crate::controller::ReadingController;
use crate::help::HelpTab;
use crate::model::{Passage, PassageRequest, PlanNavigation, ScheduleItem, date_key};
use crate::tui::action::Action;
use chrono::{Datelike, Duration as ChronoDuration, NaiveDate};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

/// How long a toast stays in the footer.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Focus {
    Calendar,
    Plan,
    Reader,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum VersionSlot {
    Primary,
    Secondary,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Searching,
    EditingSchedule,
    PickingVersion(VersionSlot),
    Importing,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub expires: Instant,
}

/// One row of the version picker. `None` is the "no parallel text" entry.
pub type VersionChoice = Option<&'static VersionInfo>;

pub struct AppState {
    pub controller: ReadingController,
    pub plan_year: i32,

    // Calendar
    pub today: NaiveDate,
    pub view_year: i32,
    pub view_month: u32,
    pub cursor_day: u32,
    pub selected_key: String,
    pub grid: MonthGrid,

    // Plan list
    pub plan: Vec<ScheduleItem>,
    pub plan_state: ListState,

    // Reader
    pub passage: Option<Passage>,
    pub requested: Option<PassageRequest>,
    pub loading: bool,
    pub error: Option<String>,
    pub reader_scroll: u16,
    pub fetch_generation: u64,

    // UI
    pub focus: Focus,
    pub mode: InputMode,
    pub toast: Option<Toast>,
    pub show_full_help: bool,
    pub help_tab: HelpTab,
    pub input_buffer: String,
    pub cursor_position: usize,
    pub version_state: ListState,
}

impl AppState {
    pub fn new(controller: ReadingController, plan_year: i32, today: NaiveDate) -> Self {
        let start = initial_view(today, plan_year);
        let grid = controller.month(start.year(), start.month());
        let mut state = Self {
            controller,
            plan_year,
            today,
            view_year: start.year(),
            view_month: start.month(),
            cursor_day: start.day(),
            selected_key: date_key(start),
            grid,
            plan: Vec::new(),
            plan_state: ListState::default(),
            passage: None,
            requested: None,
            loading: false,
            error: None,
            reader_scroll: 0,
            fetch_generation: 0,
            focus: Focus::Calendar,
            mode: InputMode::Normal,
            toast: None,
            show_full_help: false,
            help_tab: HelpTab::default(),
            input_buffer: String::new(),
            cursor_position: 0,
            version_state: ListState::default(),
        };
        state.refresh();
        state
    }

    /// Recomputes the calendar grid and the active plan after any change.
    pub fn refresh(&mut self) {
        self.grid = self.controller.month(self.view_year, self.view_month);
        self.plan = self.controller.active_plan(&self.selected_key);
        match self.plan_state.selected() {
            _ if self.plan.is_empty() => self.plan_state.select(None),
            Some(i) if i >= self.plan.len() => self.plan_state.select(Some(self.plan.len() - 1)),
            None => self.plan_state.select(Some(0)),
            _ => {}
        }
    }

    pub fn cursor_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.view_year, self.view_month, self.cursor_day)
    }

    // --- FETCHING ---

    /// Stamps a new generation and returns the request for the actor.
    pub fn begin_fetch(&mut self, request: PassageRequest) -> Action {
        self.fetch_generation += 1;
        self.loading = true;
        self.error = None;
        self.requested = Some(request);
        log::debug!("Fetch #{} {}", self.fetch_generation, request.reference());
        let settings = &self.controller.settings;
        Action::Fetch {
            generation: self.fetch_generation,
            request,
            primary: settings.primary_version.clone(),
            secondary: settings.secondary_version.clone(),
        }
    }

    /// Only the most recent request may update the reader.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.fetch_generation
    }

    /// Re-requests whatever is on screen (after a version change or `r`).
    pub fn reload(&mut self) -> Option<Action> {
        let request = self
            .requested
            .or_else(|| self.passage.as_ref().map(|p| p.data.request()))?;
        Some(self.begin_fetch(request))
    }

    /// Selects a calendar day and opens its first unread reading.
    pub fn open_day(&mut self, key: &str) -> Option<Action> {
        self.selected_key = key.to_string();
        self.plan_state.select(Some(0));
        self.refresh();
        match self.controller.select_day(key) {
            Some(request) => {
                if let Some(idx) = self.plan.iter().position(|i| i.id == request.item_id()) {
                    self.plan_state.select(Some(idx));
                }
                Some(self.begin_fetch(request))
            }
            None => {
                self.show_toast(rust_i18n::t!("no_plan_today").to_string());
                None
            }
        }
    }

    pub fn open_cursor_day(&mut self) -> Option<Action> {
        let key = date_key(self.cursor_date()?);
        self.open_day(&key)
    }

    pub fn open_plan_item(&mut self) -> Option<Action> {
        let item = self.plan.get(self.plan_state.selected()?)?;
        let request = PassageRequest::from_item(item);
        Some(self.begin_fetch(request))
    }

    pub fn navigation(&self) -> Option<PlanNavigation> {
        let passage = self.passage.as_ref()?;
        Some(self.controller.navigation(&passage.data, &self.selected_key))
    }

    /// `n`/`p`: next or previous plan item inside the plan, else the
    /// adjacent chapter.
    pub fn step_reading(&mut self, forward: bool) -> Option<Action> {
        let current = self.passage.as_ref()?.data.request();
        let nav = self.navigation()?;
        let target = if nav.in_plan {
            let item = if forward { nav.next } else { nav.prev };
            PassageRequest::from_item(&item?)
        } else if forward {
            current.next_chapter()
        } else {
            current.prev_chapter()
        };
        if target == current {
            return None;
        }
        if let Some(idx) = self.plan.iter().position(|i| i.id == target.item_id()) {
            self.plan_state.select(Some(idx));
        }
        Some(self.begin_fetch(target))
    }

    // --- CALENDAR NAVIGATION ---

    pub fn move_cursor_days(&mut self, delta: i64) {
        let Some(date) = self.cursor_date() else {
            return;
        };
        let Some(target) = date.checked_add_signed(ChronoDuration::days(delta)) else {
            return;
        };
        self.cursor_day = target.day();
        if (target.year(), target.month()) != (self.view_year, self.view_month) {
            self.view_year = target.year();
            self.view_month = target.month();
            self.refresh();
        }
    }

    pub fn shift_view_month(&mut self, delta: i32) {
        let (y, m) = shift_month(self.view_year, self.view_month, delta);
        self.view_year = y;
        self.view_month = m;
        self.cursor_day = self.cursor_day.min(days_in_month(y, m)).max(1);
        self.refresh();
    }

    pub fn go_today(&mut self) {
        let start = initial_view(self.today, self.plan_year);
        self.view_year = start.year();
        self.view_month = start.month();
        self.cursor_day = start.day();
        self.refresh();
    }

    // --- LISTS ---

    pub fn next_plan_item(&mut self) {
        step_list(&mut self.plan_state, self.plan.len(), true);
    }

    pub fn previous_plan_item(&mut self) {
        step_list(&mut self.plan_state, self.plan.len(), false);
    }

    pub fn selected_plan_item(&self) -> Option<&ScheduleItem> {
        self.plan.get(self.plan_state.selected()?)
    }

    /// Picker rows filtered by the typed query. The secondary slot gets a
    /// leading "none" row.
    pub fn version_choices(&self, slot: VersionSlot) -> Vec<VersionChoice> {
        let mut rows: Vec<VersionChoice> = Vec::new();
        if slot == VersionSlot::Secondary {
            rows.push(None);
        }
        rows.extend(
            self.controller
                .versions()
                .iter()
                .filter(|v| v.matches(&self.input_buffer))
                .map(Some),
        );
        rows
    }

    pub fn next_version(&mut self, slot: VersionSlot) {
        let len = self.version_choices(slot).len();
        step_list(&mut self.version_state, len, true);
    }

    pub fn previous_version(&mut self, slot: VersionSlot) {
        let len = self.version_choices(slot).len();
        step_list(&mut self.version_state, len, false);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Calendar => Focus::Plan,
            Focus::Plan => Focus::Reader,
            Focus::Reader => Focus::Calendar,
        };
    }

    pub fn scroll_reader(&mut self, delta: i32) {
        let target = i32::from(self.reader_scroll) + delta;
        self.reader_scroll = target.clamp(0, i32::from(u16::MAX)) as u16;
    }

    // --- TOASTS ---

    pub fn show_toast(&mut self, text: String) {
        self.toast = Some(Toast {
            text,
            expires: Instant::now() + TOAST_TTL,
        });
    }

    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires) {
            self.toast = None;
        }
    }

    // --- INPUT HELPERS ---
    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    pub fn enter_char(&mut self, new_char: char) {
        // Insert at a char boundary; the buffer is mostly CJK.
        let byte_index = self
            .input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len());

        self.input_buffer.insert(byte_index, new_char);
        self.move_cursor_right();
    }
    pub fn enter_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| *c != '\r') {
            self.enter_char(c);
        }
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let before = self.input_buffer.chars().take(current_index - 1);
            let after = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before.chain(after).collect();
            self.move_cursor_left();
        }
    }
    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
    /// Replaces the buffer and puts the cursor at its end.
    pub fn set_input(&mut self, text: &str) {
        self.input_buffer = text.to_string();
        self.cursor_position = self.input_buffer.chars().count();
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }
}

/// Moves a list selection by one, wrapping at both ends.
fn step_list(list: &mut ListState, len: usize, forward: bool) {
    if len == 0 {
        list.select(None);
        return;
    }
    let i = match list.selected() {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    list.select(Some(i));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::BOLLS_VERSIONS;
    use crate::context::TestContext;
    use std::sync::Arc;

    fn state_at(y: i32, m: u32, d: u32) -> (AppState, Arc<TestContext>) {
        let ctx = Arc::new(TestContext::new());
        let controller = ReadingController::new(ctx.clone(), BOLLS_VERSIONS);
        let today = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        (AppState::new(controller, 2026, today), ctx)
    }

    #[test]
    fn test_outside_plan_year_starts_on_jan_first() {
        let (state, _ctx) = state_at(2027, 5, 9);
        assert_eq!((state.view_year, state.view_month, state.cursor_day), (2026, 1, 1));
        assert_eq!(state.selected_key, "01-01");
    }

    #[test]
    fn test_cursor_crosses_month() {
        let (mut state, _ctx) = state_at(2026, 1, 31);
        state.move_cursor_days(1);
        assert_eq!((state.view_month, state.cursor_day), (2, 1));
        state.move_cursor_days(-7);
        assert_eq!((state.view_month, state.cursor_day), (1, 25));
    }

    #[test]
    fn test_month_shift_clamps_day() {
        let (mut state, _ctx) = state_at(2026, 1, 31);
        state.shift_view_month(1);
        assert_eq!((state.view_month, state.cursor_day), (2, 28));
    }

    #[test]
    fn test_generation_increments() {
        let (mut state, _ctx) = state_at(2026, 1, 1);
        let req = PassageRequest::parse("太 1").unwrap();
        state.begin_fetch(req);
        state.begin_fetch(req);
        assert!(state.is_current(2));
        assert!(!state.is_current(1));
        assert!(state.loading);
    }

    #[test]
    fn test_secondary_picker_has_none_row() {
        let (mut state, _ctx) = state_at(2026, 1, 1);
        let rows = state.version_choices(VersionSlot::Secondary);
        assert!(rows[0].is_none());
        assert_eq!(rows.len(), BOLLS_VERSIONS.len() + 1);

        state.set_input("esv");
        let rows = state.version_choices(VersionSlot::Primary);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_cursor_clamping() {
        let (mut state, _ctx) = state_at(2026, 1, 1);
        state.input_buffer = "詩篇".to_string();
        state.cursor_position = 0;

        state.move_cursor_right();
        state.move_cursor_right();
        state.move_cursor_right();
        assert_eq!(state.cursor_position, 2);

        state.enter_char('1');
        assert_eq!(state.input_buffer, "詩篇1");
        state.move_cursor_left();
        state.move_cursor_left();
        state.delete_char();
        assert_eq!(state.input_buffer, "篇1");
    }

    #[test]
    fn test_toast_expires() {
        let (mut state, _ctx) = state_at(2026, 1, 1);
        state.show_toast("hi".into());
        state.expire_toast(Instant::now());
        assert!(state.toast.is_some());
        state.expire_toast(Instant::now() + TOAST_TTL);
        assert!(state.toast.is_none());
    }
}
