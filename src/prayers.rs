use crate::date::parse_clock;
use crate::errors::ValidationError;
use crate::records::percentage;
use serde::{Deserialize, Serialize};

const DEFAULT_SCHEDULE: [(&str, &str); 5] = [
    ("Fajr", "05:30"),
    ("Dhuhr", "12:15"),
    ("Asr", "15:45"),
    ("Maghrib", "18:20"),
    ("Isha", "19:45"),
];

const LATE_THRESHOLD_MINUTES: u32 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prayer {
    pub name: String,
    pub adhan_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prayed_time: Option<String>,
    #[serde(default)]
    pub is_prayed: bool,
    /// Minutes after the adhan.
    #[serde(default)]
    pub delay: u32,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DelayStatus {
    OnTime,
    Late,
    VeryLate,
}

impl DelayStatus {
    pub fn from_delay(delay: u32) -> Self {
        match delay {
            0 => Self::OnTime,
            d if d <= LATE_THRESHOLD_MINUTES => Self::Late,
            _ => Self::VeryLate,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PrayerTimeRequest {
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct PrayerView {
    #[serde(flatten)]
    pub prayer: Prayer,
    pub status: Option<DelayStatus>,
}

#[derive(Debug, Serialize)]
pub struct PrayerSummary {
    pub date: String,
    pub prayers: Vec<PrayerView>,
    pub completed: usize,
    pub total: usize,
    pub completion_percentage: u32,
}

pub fn default_prayers() -> Vec<Prayer> {
    DEFAULT_SCHEDULE
        .iter()
        .map(|(name, adhan)| Prayer {
            name: (*name).to_string(),
            adhan_time: (*adhan).to_string(),
            prayed_time: None,
            is_prayed: false,
            delay: 0,
        })
        .collect()
}

pub fn delay_minutes(adhan_time: &str, prayed_time: &str) -> Result<u32, ValidationError> {
    let adhan = parse_clock(adhan_time)?;
    let prayed = parse_clock(prayed_time)?;
    Ok(prayed.saturating_sub(adhan))
}

pub fn toggle(prayers: &mut [Prayer], index: usize) -> Result<&Prayer, ValidationError> {
    let prayer = prayers
        .get_mut(index)
        .ok_or(ValidationError::UnknownPrayer(index))?;
    prayer.is_prayed = !prayer.is_prayed;
    if !prayer.is_prayed {
        prayer.prayed_time = None;
        prayer.delay = 0;
    }
    Ok(prayer)
}

pub fn set_time<'a>(
    prayers: &'a mut [Prayer],
    index: usize,
    time: &str,
) -> Result<&'a Prayer, ValidationError> {
    let prayer = prayers
        .get_mut(index)
        .ok_or(ValidationError::UnknownPrayer(index))?;
    if !prayer.is_prayed {
        return Err(ValidationError::NotPrayed);
    }
    let time = time.trim();
    prayer.delay = delay_minutes(&prayer.adhan_time, time)?;
    prayer.prayed_time = Some(time.to_string());
    Ok(prayer)
}

pub fn summarize(date: String, prayers: &[Prayer]) -> PrayerSummary {
    let completed = prayers.iter().filter(|p| p.is_prayed).count();
    PrayerSummary {
        date,
        completed,
        total: prayers.len(),
        completion_percentage: percentage(completed, prayers.len()),
        prayers: prayers
            .iter()
            .map(|prayer| PrayerView {
                status: (prayer.is_prayed && prayer.prayed_time.is_some())
                    .then(|| DelayStatus::from_delay(prayer.delay)),
                prayer: prayer.clone(),
            })
            .collect(),
    }
}
