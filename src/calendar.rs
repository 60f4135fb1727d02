// File: ./src/calendar.rs
// Month grid with per-day plan completion.
use crate::model::plan::{DailyPlan, date_key};
use crate::progress::Progress;
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub day: u32,
    pub date_key: String,
    pub has_plan: bool,
    pub total: usize,
    pub completed: usize,
    pub is_fully_completed: bool,
    /// Completed share in 0.0..=1.0.
    pub progress: f32,
}

/// A month laid out Sunday-first; leading `None` cells pad the first week.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<Option<CalendarDay>>,
}

impl MonthGrid {
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<CalendarDay>]> {
        self.cells.chunks(7)
    }

    pub fn day(&self, day: u32) -> Option<&CalendarDay> {
        self.cells.iter().flatten().find(|d| d.day == day)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = shift_month(year, month, 1);
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(ny, nm, 1),
    ) {
        (Some(a), Some(b)) => (b - a).num_days() as u32,
        _ => 0,
    }
}

/// Moves `delta` months from (year, month), wrapping across years.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Date the calendar opens on: today inside the plan year, else Jan 1 of it.
pub fn initial_view(today: NaiveDate, plan_year: i32) -> NaiveDate {
    if today.year() == plan_year {
        today
    } else {
        NaiveDate::from_ymd_opt(plan_year, 1, 1).unwrap_or(today)
    }
}

pub fn build_month(year: i32, month: u32, plan_json: &str, done: &Progress) -> MonthGrid {
    let plan = DailyPlan::parse(plan_json).unwrap_or_else(|e| {
        log::debug!("Calendar without plan: {:#}", e);
        DailyPlan::default()
    });

    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return MonthGrid {
            year,
            month,
            cells: Vec::new(),
        };
    };
    let offset = first.weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<Option<CalendarDay>> = vec![None; offset];
    for day in 1..=days_in_month(year, month) {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        let key = date_key(date);
        let items = plan.items_for(&key);
        let total = items.len();
        let completed = done.count_done(&items);
        let has_plan = total > 0;
        cells.push(Some(CalendarDay {
            day,
            date_key: key,
            has_plan,
            total,
            completed,
            is_fully_completed: has_plan && completed == total,
            progress: if has_plan {
                completed as f32 / total as f32
            } else {
                0.0
            },
        }));
    }

    MonthGrid { year, month, cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_month_wraps() {
        assert_eq!(shift_month(2026, 1, -1), (2025, 12));
        assert_eq!(shift_month(2026, 12, 1), (2027, 1));
        assert_eq!(shift_month(2026, 5, 0), (2026, 5));
        assert_eq!(shift_month(2026, 3, -14), (2025, 1));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2026, 12), 31);
    }

    #[test]
    fn test_grid_offset() {
        // 2026-01-01 is a Thursday.
        let grid = build_month(2026, 1, "{}", &Progress::default());
        assert_eq!(grid.cells.iter().take_while(|c| c.is_none()).count(), 4);
        assert_eq!(grid.cells.iter().flatten().count(), 31);
    }

    #[test]
    fn test_completion_flags() {
        let json = r#"{"01-01": "太 1\n詩 1", "01-02": "太 2"}"#;
        let mut done = Progress::default();
        done.mark("MAT1");
        done.mark("MAT2");

        let grid = build_month(2026, 1, json, &done);
        let d1 = grid.day(1).unwrap();
        assert!(d1.has_plan);
        assert_eq!((d1.completed, d1.total), (1, 2));
        assert!(!d1.is_fully_completed);
        assert!((d1.progress - 0.5).abs() < f32::EPSILON);

        assert!(grid.day(2).unwrap().is_fully_completed);

        let d3 = grid.day(3).unwrap();
        assert!(!d3.has_plan);
        assert!(!d3.is_fully_completed);
        assert_eq!(d3.progress, 0.0);
    }

    #[test]
    fn test_initial_view() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        assert_eq!(initial_view(today, 2026), today);
        let other = NaiveDate::from_ymd_opt(2027, 6, 15).unwrap();
        assert_eq!(
            initial_view(other, 2026),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }
}
