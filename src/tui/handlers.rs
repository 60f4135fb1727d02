// File: src/tui/handlers.rs
// Handles keyboard input and network events for the TUI.
use crate::model::PassageRequest;
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::{AppState, Focus, InputMode, VersionSlot};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_app_event(state: &mut AppState, event: AppEvent) {
    if !state.is_current(event.generation()) {
        log::debug!(
            "Dropping stale reply #{} (current #{})",
            event.generation(),
            state.fetch_generation
        );
        return;
    }
    state.loading = false;
    match event {
        AppEvent::PassageLoaded { passage, .. } => {
            state.passage = Some(passage);
            state.error = None;
            state.reader_scroll = 0;
        }
        AppEvent::FetchFailed { message, .. } => {
            log::error!("Passage unavailable: {}", message);
            // Previous passage stays on screen under the banner.
            state.error = Some(rust_i18n::t!("fetch_failed").to_string());
        }
    }
}

/// Bracketed paste goes to whichever text field is open.
pub fn handle_paste(state: &mut AppState, text: &str) {
    match state.mode {
        InputMode::Searching | InputMode::Importing => {
            state.enter_str(text.lines().collect::<Vec<_>>().join(" ").as_str())
        }
        InputMode::EditingSchedule => state.enter_str(text),
        InputMode::PickingVersion(_) => {
            state.enter_str(text.trim());
            state.version_state.select(Some(0));
        }
        InputMode::Normal => {}
    }
}

fn report<T>(state: &mut AppState, result: anyhow::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            log::error!("Saving settings failed: {:#}", e);
            state.show_toast(rust_i18n::t!("save_failed", error = e.to_string()).to_string());
            None
        }
    }
}

fn export_progress(state: &mut AppState) {
    let json = state.controller.export_progress();
    let Some(path) = state.controller.export_path() else {
        state.show_toast(rust_i18n::t!("export_failed", error = "no data dir").to_string());
        return;
    };
    match crate::storage::LocalStorage::atomic_write(&path, &json) {
        Ok(()) => {
            log::info!("Progress exported to {}", path.display());
            state.show_toast(
                rust_i18n::t!("export_done", path = path.display().to_string()).to_string(),
            );
        }
        Err(e) => {
            log::error!("Export failed: {:#}", e);
            state.show_toast(rust_i18n::t!("export_failed", error = e.to_string()).to_string());
        }
    }
}

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    if state.show_full_help {
        match key.code {
            KeyCode::Tab => state.help_tab = state.help_tab.toggled(),
            _ => state.show_full_help = false,
        }
        return None;
    }

    match state.mode {
        InputMode::Searching => match key.code {
            KeyCode::Enter => {
                let query = state.input_buffer.trim().to_string();
                state.mode = InputMode::Normal;
                state.reset_input();
                match PassageRequest::parse(&query) {
                    Some(request) => return Some(state.begin_fetch(request)),
                    None if query.is_empty() => {}
                    None => state.show_toast(
                        rust_i18n::t!("search_not_found", query = query).to_string(),
                    ),
                }
            }
            KeyCode::Esc => {
                state.mode = InputMode::Normal;
                state.reset_input();
            }
            KeyCode::Char(c) => state.enter_char(c),
            KeyCode::Backspace => state.delete_char(),
            KeyCode::Left => state.move_cursor_left(),
            KeyCode::Right => state.move_cursor_right(),
            _ => {}
        },

        InputMode::EditingSchedule => match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let text = state.input_buffer.clone();
                let saved = state.controller.save_schedule(&text);
                if let Some(valid) = report(state, saved) {
                    let msg = if valid {
                        rust_i18n::t!("schedule_saved")
                    } else {
                        rust_i18n::t!("schedule_invalid")
                    };
                    state.show_toast(msg.to_string());
                    state.mode = InputMode::Normal;
                    state.reset_input();
                    state.refresh();
                }
            }
            KeyCode::Esc => {
                state.mode = InputMode::Normal;
                state.reset_input();
            }
            KeyCode::Enter => state.enter_char('\n'),
            KeyCode::Char(c) => state.enter_char(c),
            KeyCode::Backspace => state.delete_char(),
            KeyCode::Left => state.move_cursor_left(),
            KeyCode::Right => state.move_cursor_right(),
            _ => {}
        },

        InputMode::PickingVersion(slot) => match key.code {
            KeyCode::Enter => {
                let choices = state.version_choices(slot);
                let picked = state.version_state.selected().and_then(|i| choices.get(i)).copied();
                state.mode = InputMode::Normal;
                state.reset_input();
                let Some(choice) = picked else {
                    return None;
                };
                let result = match slot {
                    VersionSlot::Primary => match choice {
                        Some(v) => state.controller.set_primary_version(v.id),
                        None => Ok(()),
                    },
                    VersionSlot::Secondary => {
                        state.controller.set_secondary_version(choice.map(|v| v.id))
                    }
                };
                report(state, result)?;
                return state.reload();
            }
            KeyCode::Esc => {
                state.mode = InputMode::Normal;
                state.reset_input();
            }
            KeyCode::Down => state.next_version(slot),
            KeyCode::Up => state.previous_version(slot),
            KeyCode::Char(c) => {
                state.enter_char(c);
                state.version_state.select(Some(0));
            }
            KeyCode::Backspace => {
                state.delete_char();
                state.version_state.select(Some(0));
            }
            _ => {}
        },

        InputMode::Importing => match key.code {
            KeyCode::Enter => {
                let payload = state.input_buffer.clone();
                state.mode = InputMode::Normal;
                state.reset_input();
                match state.controller.import_progress(&payload) {
                    Ok(added) => {
                        state.show_toast(
                            rust_i18n::t!("import_done", count = added.to_string()).to_string(),
                        );
                        state.refresh();
                    }
                    Err(e) => {
                        log::warn!("Import rejected: {:#}", e);
                        state.show_toast(rust_i18n::t!("import_failed").to_string());
                    }
                }
            }
            KeyCode::Esc => {
                state.mode = InputMode::Normal;
                state.reset_input();
            }
            KeyCode::Char(c) => state.enter_char(c),
            KeyCode::Backspace => state.delete_char(),
            KeyCode::Left => state.move_cursor_left(),
            KeyCode::Right => state.move_cursor_right(),
            _ => {}
        },

        InputMode::Normal => return handle_normal_key(key, state),
    }
    None
}

fn handle_normal_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    // Focus-specific keys first.
    match (state.focus, key.code) {
        (Focus::Calendar, KeyCode::Char('h') | KeyCode::Left) => state.move_cursor_days(-1),
        (Focus::Calendar, KeyCode::Char('l') | KeyCode::Right) => state.move_cursor_days(1),
        (Focus::Calendar, KeyCode::Char('k') | KeyCode::Up) => state.move_cursor_days(-7),
        (Focus::Calendar, KeyCode::Char('j') | KeyCode::Down) => state.move_cursor_days(7),
        (Focus::Calendar, KeyCode::Enter) => return state.open_cursor_day(),

        (Focus::Plan, KeyCode::Char('j') | KeyCode::Down) => state.next_plan_item(),
        (Focus::Plan, KeyCode::Char('k') | KeyCode::Up) => state.previous_plan_item(),
        (Focus::Plan, KeyCode::Enter) => return state.open_plan_item(),
        (Focus::Plan, KeyCode::Char(' ')) => {
            let id = state.selected_plan_item()?.id.clone();
            let toggled = state.controller.toggle_item(&id);
            report(state, toggled)?;
            state.refresh();
        }

        (Focus::Reader, KeyCode::Char('j') | KeyCode::Down) => state.scroll_reader(1),
        (Focus::Reader, KeyCode::Char('k') | KeyCode::Up) => state.scroll_reader(-1),

        (_, code) => return handle_global_key(code, state),
    }
    None
}

fn handle_global_key(code: KeyCode, state: &mut AppState) -> Option<Action> {
    match code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('?') => state.show_full_help = true,
        KeyCode::Tab => state.toggle_focus(),
        KeyCode::Char('[') => state.shift_view_month(-1),
        KeyCode::Char(']') => state.shift_view_month(1),
        KeyCode::Char('t') => state.go_today(),
        KeyCode::PageDown => state.scroll_reader(10),
        KeyCode::PageUp => state.scroll_reader(-10),
        KeyCode::Char('/') => {
            state.mode = InputMode::Searching;
            state.reset_input();
        }
        KeyCode::Char('m') => {
            let data = state.passage.as_ref()?.data.clone();
            let marked = state.controller.mark_read(&data);
            let newly = report(state, marked)?;
            let msg = if newly {
                rust_i18n::t!("marked_read", reference = data.reference.as_str())
            } else {
                rust_i18n::t!("already_read")
            };
            state.show_toast(msg.to_string());
            state.refresh();
        }
        KeyCode::Char('n') => return state.step_reading(true),
        KeyCode::Char('p') => return state.step_reading(false),
        KeyCode::Char('r') => return state.reload(),
        KeyCode::Char('v') | KeyCode::Char('V') => {
            let slot = if code == KeyCode::Char('v') {
                VersionSlot::Primary
            } else {
                VersionSlot::Secondary
            };
            state.reset_input();
            state.version_state.select(Some(0));
            state.mode = InputMode::PickingVersion(slot);
        }
        KeyCode::Char('T') => {
            let theme = state.controller.cycle_theme();
            let theme = report(state, theme)?;
            state.show_toast(rust_i18n::t!(theme.key()).to_string());
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let size = state.controller.adjust_font_size(1);
            let size = report(state, size)?;
            state.show_toast(rust_i18n::t!("font_size", size = size.to_string()).to_string());
        }
        KeyCode::Char('-') => {
            let size = state.controller.adjust_font_size(-1);
            let size = report(state, size)?;
            state.show_toast(rust_i18n::t!("font_size", size = size.to_string()).to_string());
        }
        KeyCode::Char('s') => {
            let mode = state.controller.toggle_schedule_mode();
            let mode = report(state, mode)?;
            let label = match mode {
                crate::model::ScheduleMode::Static => rust_i18n::t!("mode_static"),
                crate::model::ScheduleMode::Daily => rust_i18n::t!("mode_daily"),
            };
            state.show_toast(label.to_string());
            state.refresh();
        }
        KeyCode::Char('e') => {
            let source = state.controller.schedule_source().to_string();
            state.set_input(&source);
            state.mode = InputMode::EditingSchedule;
        }
        KeyCode::Char('x') => export_progress(state),
        KeyCode::Char('i') => {
            state.reset_input();
            state.mode = InputMode::Importing;
        }
        _ => {}
    }
    None
}
