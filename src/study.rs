use crate::date::parse_clock;
use crate::errors::ValidationError;
use crate::records::{require, Form, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudySession {
    pub id: String,
    pub subject: String,
    /// Free text, counted by its leading number of minutes.
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub lessons: u32,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for StudySession {
    const KIND: &'static str = "study session";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StudyForm {
    pub subject: String,
    pub duration: String,
    pub pages: u32,
    pub lessons: u32,
    pub time: String,
    pub notes: String,
}

impl Form for StudyForm {
    type Output = StudySession;

    fn validate(&self) -> Result<(), ValidationError> {
        require("subject", &self.subject)?;
        require("time", &self.time)?;
        parse_clock(&self.time)?;
        Ok(())
    }

    fn build(self, id: String) -> StudySession {
        let notes = self.notes.trim();
        StudySession {
            id,
            subject: self.subject.trim().to_string(),
            duration: self.duration.trim().to_string(),
            pages: self.pages,
            lessons: self.lessons,
            time: self.time.trim().to_string(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StudyTotals {
    pub pages: u32,
    pub lessons: u32,
    pub minutes: u32,
}

#[derive(Debug, Serialize)]
pub struct StudySummary {
    pub date: String,
    pub sessions: Vec<StudySession>,
    pub totals: StudyTotals,
}

/// Leading integer of `raw` ("45 min" -> 45), zero when there is none.
pub fn leading_minutes(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let digits = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse().unwrap_or(0)
}

pub fn totals(sessions: &[StudySession]) -> StudyTotals {
    sessions.iter().fold(StudyTotals::default(), |acc, session| StudyTotals {
        pages: acc.pages.saturating_add(session.pages),
        lessons: acc.lessons.saturating_add(session.lessons),
        minutes: acc.minutes.saturating_add(leading_minutes(&session.duration)),
    })
}

pub fn summarize(date: String, sessions: &[StudySession]) -> StudySummary {
    StudySummary {
        date,
        totals: totals(sessions),
        sessions: sessions.to_vec(),
    }
}
