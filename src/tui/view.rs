// File: src/tui/view.rs
use crate::calendar::CalendarDay;
use crate::help;
use crate::settings::{FONT_MIN, Theme};
use crate::tui::state::{AppState, Focus, InputMode, VersionSlot};
use chrono::Datelike;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// Reader colors for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            fg: Color::Rgb(34, 34, 34),
            bg: Color::Rgb(250, 250, 250),
            muted: Color::Rgb(110, 110, 110),
            accent: Color::Rgb(37, 99, 235),
        },
        Theme::Sepia => Palette {
            fg: Color::Rgb(91, 70, 54),
            bg: Color::Rgb(244, 236, 216),
            muted: Color::Rgb(140, 115, 90),
            accent: Color::Rgb(160, 82, 45),
        },
        Theme::Dark => Palette {
            fg: Color::Rgb(209, 209, 209),
            bg: Color::Rgb(18, 18, 18),
            muted: Color::Rgb(128, 128, 128),
            accent: Color::Rgb(96, 165, 250),
        },
    }
}

/// Blank lines between verses. The terminal cannot scale glyphs, so the
/// font size setting is rendered as line spacing.
pub fn verse_spacing(font_size: u16) -> usize {
    usize::from(font_size.saturating_sub(FONT_MIN) / 8)
}

fn focus_style(state: &AppState, focus: Focus) -> Style {
    if state.focus == focus {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

/// Left-pads `s` to `width` terminal columns.
fn pad_left(s: &str, width: usize) -> String {
    let w = s.width();
    format!("{}{}", " ".repeat(width.saturating_sub(w)), s)
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(0)])
        .split(v_chunks[0]);

    // Calendar needs a header, up to six weeks and its borders.
    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(h_chunks[0]);

    draw_calendar(f, state, side_chunks[0]);
    draw_plan(f, state, side_chunks[1]);
    draw_reader(f, state, h_chunks[1]);
    draw_footer(f, state, v_chunks[1]);

    match state.mode {
        InputMode::PickingVersion(slot) => draw_version_picker(f, state, slot),
        InputMode::EditingSchedule => draw_schedule_editor(f, state),
        InputMode::Importing => draw_import(f, state),
        _ => {}
    }

    if state.show_full_help {
        draw_help(f, state);
    }
}

fn day_style(day: &CalendarDay) -> Style {
    if !day.has_plan {
        Style::default().fg(Color::DarkGray)
    } else if day.is_fully_completed {
        Style::default().fg(Color::Green)
    } else if day.completed > 0 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn draw_calendar(f: &mut Frame, state: &AppState, area: Rect) {
    let mut lines = Vec::new();

    let header: Vec<Span> = rust_i18n::t!("weekdays")
        .split_whitespace()
        .map(|d| Span::styled(pad_left(d, 4), Style::default().fg(Color::Cyan)))
        .collect();
    lines.push(Line::from(header));

    for week in state.grid.weeks() {
        let mut spans = Vec::with_capacity(7);
        for cell in week {
            let Some(day) = cell else {
                spans.push(Span::raw("    "));
                continue;
            };
            let mut style = day_style(day);
            if day.date_key == state.selected_key {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            let today = state.today;
            if (state.grid.year, state.grid.month, day.day)
                == (today.year(), today.month(), today.day())
            {
                style = style.fg(Color::Cyan);
            }
            spans.push(Span::raw(" "));
            let text = format!("{:>3}", day.day);
            if day.day == state.cursor_day {
                spans.push(Span::styled(text, style.add_modifier(Modifier::REVERSED)));
            } else {
                spans.push(Span::styled(text, style));
            }
        }
        lines.push(Line::from(spans));
    }

    let title = rust_i18n::t!(
        "month_title",
        year = state.view_year.to_string(),
        month = state.view_month.to_string()
    );
    let calendar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title))
            .border_style(focus_style(state, Focus::Calendar)),
    );
    f.render_widget(calendar, area);
}

fn draw_plan(f: &mut Frame, state: &mut AppState, area: Rect) {
    let items: Vec<ListItem> = state
        .plan
        .iter()
        .map(|item| {
            let done = state.controller.is_done(&item.id);
            let check = if done { "[x]" } else { "[ ]" };
            let style = if done {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", check)),
                Span::styled(item.label.clone(), style),
            ]))
        })
        .collect();

    let done = state.plan.iter().filter(|i| state.controller.is_done(&i.id)).count();
    let title = format!(
        " {} {} ({}/{}) ",
        rust_i18n::t!("plan_title"),
        state.selected_key,
        done,
        state.plan.len()
    );

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(focus_style(state, Focus::Plan)),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Blue),
        );
    f.render_stateful_widget(list, area, &mut state.plan_state);
}

fn draw_reader(f: &mut Frame, state: &AppState, area: Rect) {
    let colors = palette(state.controller.settings.theme);
    let base = Style::default().fg(colors.fg).bg(colors.bg);

    let mut title = format!(" {} ", rust_i18n::t!("reader_title"));
    if let Some(p) = &state.passage {
        title = format!(" {} ", p.data.reference);
    }
    let versions = match &state.controller.settings.secondary_version {
        Some(second) => format!(" {} | {} ", state.controller.settings.primary_version, second),
        None => format!(" {} ", state.controller.settings.primary_version),
    };
    if state.loading {
        title.push_str(&format!("({}) ", rust_i18n::t!("loading")));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(Line::from(versions).alignment(Alignment::Right))
        .border_style(focus_style(state, Focus::Reader))
        .style(base);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints = vec![Constraint::Min(0), Constraint::Length(1)];
    if state.error.is_some() {
        constraints.insert(0, Constraint::Length(1));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);
    let (body_area, nav_area) = if let Some(err) = &state.error {
        let banner = Paragraph::new(format!(" {} ", err)).style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(banner, chunks[0]);
        (chunks[1], chunks[2])
    } else {
        (chunks[0], chunks[1])
    };

    let Some(passage) = &state.passage else {
        let text = if state.loading {
            vec![Line::from(rust_i18n::t!("loading").to_string())]
        } else {
            vec![
                Line::from(Span::styled(
                    rust_i18n::t!("empty_title").to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(rust_i18n::t!("empty_body").to_string()),
            ]
        };
        let p = Paragraph::new(text)
            .style(base)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(p, body_area);
        return;
    };

    let spacing = verse_spacing(state.controller.settings.font_size);
    let mut lines: Vec<Line> = Vec::new();
    for (verse, parallel) in passage.rows() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>3} ", verse.verse),
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(verse.text.clone()),
        ]));
        if let Some(text) = parallel {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(text.to_string(), Style::default().fg(colors.muted)),
            ]));
        }
        for _ in 0..spacing {
            lines.push(Line::from(""));
        }
    }

    let body = Paragraph::new(lines)
        .style(base)
        .wrap(Wrap { trim: false })
        .scroll((state.reader_scroll, 0));
    f.render_widget(body, body_area);

    // Navigation hints under the text.
    let mut hints: Vec<Span> = Vec::new();
    let key_style = Style::default()
        .fg(colors.accent)
        .add_modifier(Modifier::BOLD);
    if state.controller.is_done(&passage.data.item_id()) {
        hints.push(Span::styled(
            format!("✓ {}", rust_i18n::t!("already_read")),
            Style::default().fg(Color::Green),
        ));
    } else {
        hints.push(Span::styled("m ", key_style));
        hints.push(Span::raw(rust_i18n::t!("mark_read").to_string()));
    }
    hints.push(Span::raw("   "));
    match state.navigation() {
        Some(nav) if nav.in_plan => {
            if let Some(next) = &nav.next {
                hints.push(Span::styled("n ", key_style));
                hints.push(Span::raw(format!(
                    "{}: {}",
                    rust_i18n::t!("continue_reading"),
                    next.label
                )));
            }
        }
        _ => {
            hints.push(Span::styled("p ", key_style));
            hints.push(Span::raw(rust_i18n::t!("prev_chapter").to_string()));
            hints.push(Span::raw("  "));
            hints.push(Span::styled("n ", key_style));
            hints.push(Span::raw(rust_i18n::t!("next_chapter").to_string()));
        }
    }
    f.render_widget(
        Paragraph::new(Line::from(hints))
            .style(base)
            .alignment(Alignment::Center),
        nav_area,
    );
}

fn draw_footer(f: &mut Frame, state: &AppState, area: Rect) {
    f.render_widget(Clear, area);

    if state.mode == InputMode::Searching {
        let prefix = "/ ";
        let content = if state.input_buffer.is_empty() {
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(Color::Green)),
                Span::styled(
                    rust_i18n::t!("search_placeholder").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        } else {
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(Color::Green)),
                Span::raw(state.input_buffer.as_str()),
            ])
        };
        let input = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", rust_i18n::t!("search_title"))),
        );
        f.render_widget(input, area);

        let before: String = state
            .input_buffer
            .chars()
            .take(state.cursor_position)
            .collect();
        let cursor_x = area.x + 1 + (prefix.width() + before.width()) as u16;
        f.set_cursor_position((
            cursor_x.min(area.x + area.width.saturating_sub(2)),
            area.y + 1,
        ));
        return;
    }

    let status_text = match &state.toast {
        Some(toast) => toast.text.clone(),
        None => rust_i18n::t!(
            "progress_summary",
            count = state.controller.settings.completed_tasks.len().to_string()
        )
        .to_string(),
    };
    let status = Paragraph::new(status_text)
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(format!(" {} ", rust_i18n::t!("status_title"))),
        );

    let help_str = match state.focus {
        Focus::Calendar => rust_i18n::t!("hint_calendar"),
        Focus::Plan => rust_i18n::t!("hint_plan"),
        Focus::Reader => rust_i18n::t!("hint_reader"),
    };
    let help = Paragraph::new(help_str.to_string())
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(format!(" {} ", rust_i18n::t!("actions_title"))),
        );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);
    f.render_widget(status, chunks[0]);
    f.render_widget(help, chunks[1]);
}

fn draw_version_picker(f: &mut Frame, state: &mut AppState, slot: VersionSlot) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let current = match slot {
        VersionSlot::Primary => Some(state.controller.settings.primary_version.as_str()),
        VersionSlot::Secondary => state.controller.settings.secondary_version.as_deref(),
    };
    let title = match slot {
        VersionSlot::Primary => rust_i18n::t!("pick_primary"),
        VersionSlot::Secondary => rust_i18n::t!("pick_secondary"),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let filter = Paragraph::new(format!("> {}", state.input_buffer)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title)),
    );
    f.render_widget(filter, chunks[0]);
    let before: String = state
        .input_buffer
        .chars()
        .take(state.cursor_position)
        .collect();
    f.set_cursor_position((
        chunks[0].x + 3 + before.width() as u16,
        chunks[0].y + 1,
    ));

    let items: Vec<ListItem> = state
        .version_choices(slot)
        .into_iter()
        .map(|choice| match choice {
            Some(v) => {
                let marker = if current == Some(v.id) { "* " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(
                        format!("{:<6}", v.id),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(" {} ", v.name)),
                    Span::styled(
                        format!("({})", v.language_name()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            }
            None => {
                let marker = if current.is_none() { "* " } else { "  " };
                ListItem::new(format!("{}{}", marker, rust_i18n::t!("version_none")))
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::Blue));
    f.render_stateful_widget(list, chunks[1], &mut state.version_state);
}

fn draw_schedule_editor(f: &mut Frame, state: &AppState) {
    let area = centered_rect(70, 70, f.area());
    f.render_widget(Clear, area);

    let title = match state.controller.settings.schedule_mode {
        crate::model::ScheduleMode::Static => rust_i18n::t!("edit_title_static"),
        crate::model::ScheduleMode::Daily => rust_i18n::t!("edit_title_daily"),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .title_bottom(Line::from(format!(" {} ", rust_i18n::t!("edit_hint"))).right_aligned())
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);

    // No wrapping so the cursor maps directly onto rows and columns.
    let before: String = state
        .input_buffer
        .chars()
        .take(state.cursor_position)
        .collect();
    let row = before.matches('\n').count() as u16;
    let col = before.rsplit('\n').next().unwrap_or("").width() as u16;
    let scroll = row.saturating_sub(inner.height.saturating_sub(1));

    let editor = Paragraph::new(state.input_buffer.as_str())
        .block(block)
        .scroll((scroll, 0));
    f.render_widget(editor, area);

    if inner.width > 0 && inner.height > 0 {
        f.set_cursor_position((
            inner.x + col.min(inner.width - 1),
            inner.y + row - scroll,
        ));
    }
}

fn draw_import(f: &mut Frame, state: &AppState) {
    let area = centered_rect(60, 20, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", rust_i18n::t!("import_title")))
        .title_bottom(Line::from(format!(" {} ", rust_i18n::t!("import_hint"))).right_aligned())
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    let p = Paragraph::new(state.input_buffer.as_str())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);

    if inner.width > 0 {
        let before: String = state
            .input_buffer
            .chars()
            .take(state.cursor_position)
            .collect();
        let w = before.width() as u16;
        f.set_cursor_position((
            inner.x + w % inner.width,
            inner.y + (w / inner.width).min(inner.height.saturating_sub(1)),
        ));
    }
}

fn draw_help(f: &mut Frame, state: &AppState) {
    let area = centered_rect(80, 80, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", rust_i18n::t!("help_title")))
        .title_bottom(Line::from(format!(" {} ", rust_i18n::t!("help_hint"))).right_aligned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let tabs = Tabs::new(vec![
        rust_i18n::t!("help_tab_keys").to_string(),
        rust_i18n::t!("help_tab_syntax").to_string(),
    ])
    .select(match state.help_tab {
        help::HelpTab::Keyboard => 0,
        help::HelpTab::Syntax => 1,
    })
    .highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(tabs, chunks[0]);

    let mut lines = Vec::new();
    for section in help::sections(state.help_tab) {
        lines.push(Line::from(Span::styled(
            format!(" {} ", section.title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for item in section.items {
            let mut spans = vec![
                Span::styled(
                    format!("  {:<22}", item.keys),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(item.desc),
            ];
            if !item.example.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", item.example),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[1]);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
