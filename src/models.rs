use crate::calculator::Profile;
use crate::date::date_key;
use crate::exercises::Exercise;
use crate::nutrition::Meal;
use crate::prayers::Prayer;
use crate::study::StudySession;
use crate::tasks::{Task, Template};
use crate::vocabulary::Word;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Everything recorded for one date key.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DayRecord {
    /// `None` until the day's prayers are first touched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prayers: Option<Vec<Prayer>>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub study: Vec<StudySession>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub applied_templates: BTreeSet<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub days: BTreeMap<String, DayRecord>,
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(default)]
    pub templates: Vec<Template>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

impl AppData {
    pub fn day(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.get(&date_key(date))
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> &mut DayRecord {
        self.days.entry(date_key(date)).or_default()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub selected: String,
    pub range_start: Option<String>,
    pub range_end: Option<String>,
    pub days_remaining: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TodayQuery {
    pub selected: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub selected: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub date: Option<String>,
}
