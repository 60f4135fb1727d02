// File: src/model/plan.rs
// Daily plan lookup ("MM-DD" -> schedule text) and position inside a plan.
use crate::model::schedule::{ScheduleItem, parse_text};
use crate::progress::Progress;
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// "MM-DD" key shared by the plan JSON and the calendar.
pub fn date_key(date: NaiveDate) -> String {
    format!("{:02}-{:02}", date.month(), date.day())
}

/// Where the active plan comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    /// One free-form schedule used every day.
    Static,
    /// The day's entry from the daily plan JSON.
    #[default]
    Daily,
}

impl ScheduleMode {
    pub fn toggled(self) -> Self {
        match self {
            ScheduleMode::Static => ScheduleMode::Daily,
            ScheduleMode::Daily => ScheduleMode::Static,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyPlan {
    days: BTreeMap<String, String>,
}

impl DailyPlan {
    /// Parses the plan JSON object. Entries whose value is not a string are skipped.
    pub fn parse(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).context("Daily plan is not valid JSON")?;
        let obj = value
            .as_object()
            .ok_or_else(|| anyhow::anyhow!("Daily plan must be a JSON object"))?;

        let days = obj
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect();
        Ok(Self { days })
    }

    pub fn text_for(&self, key: &str) -> Option<&str> {
        self.days.get(key).map(String::as_str)
    }

    pub fn items_for(&self, key: &str) -> Vec<ScheduleItem> {
        self.text_for(key).map(parse_text).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Items for one day. A malformed plan reads as an empty day.
pub fn resolve_day(json: &str, key: &str) -> Vec<ScheduleItem> {
    match DailyPlan::parse(json) {
        Ok(plan) => plan.items_for(key),
        Err(e) => {
            log::warn!("Ignoring daily plan: {:#}", e);
            Vec::new()
        }
    }
}

/// Reader position relative to the active plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanNavigation {
    pub in_plan: bool,
    pub prev: Option<ScheduleItem>,
    pub next: Option<ScheduleItem>,
}

impl PlanNavigation {
    pub fn locate(plan: &[ScheduleItem], current_id: &str) -> Self {
        match plan.iter().position(|i| i.id == current_id) {
            Some(idx) => Self {
                in_plan: true,
                prev: idx.checked_sub(1).and_then(|p| plan.get(p)).cloned(),
                next: plan.get(idx + 1).cloned(),
            },
            None => Self {
                in_plan: false,
                prev: None,
                next: None,
            },
        }
    }
}

/// First item not yet completed, or the first item when all are done.
pub fn first_unread<'a>(plan: &'a [ScheduleItem], done: &Progress) -> Option<&'a ScheduleItem> {
    plan.iter()
        .find(|i| !done.is_done(&i.id))
        .or_else(|| plan.first())
}
