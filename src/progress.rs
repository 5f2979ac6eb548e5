use crate::date::{date_key, month_dates, week_dates};
use crate::models::AppData;
use crate::records::percentage;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct Ratio {
    pub completed: usize,
    pub total: usize,
}

impl Ratio {
    pub fn percentage(&self) -> u32 {
        percentage(self.completed, self.total)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct PeriodStats {
    pub prayers: Ratio,
    pub exercises: usize,
    pub meals: usize,
    pub study: usize,
    pub words: usize,
    pub tasks: Ratio,
}

impl PeriodStats {
    /// Exercise and study entries count as done; meals and words are informational.
    pub fn overall_percentage(&self) -> u32 {
        let total = self.prayers.total + self.exercises + self.study + self.tasks.total;
        let completed = self.prayers.completed + self.exercises + self.study + self.tasks.completed;
        percentage(completed, total)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellent,
    Great,
    VeryGood,
    Good,
    Average,
    FreshStart,
}

impl Tier {
    pub fn from_percentage(pct: u32) -> Self {
        match pct {
            90.. => Self::Excellent,
            80..=89 => Self::Great,
            70..=79 => Self::VeryGood,
            60..=69 => Self::Good,
            50..=59 => Self::Average,
            _ => Self::FreshStart,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent! You're leading the way.",
            Self::Great => "Great! Keep up this pace.",
            Self::VeryGood => "Very good! There's still room to improve.",
            Self::Good => "Good! A little more focus will help.",
            Self::Average => "Average. You can do better than this.",
            Self::FreshStart => "Start again! Every day is a new chance.",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PeriodReport {
    pub start_date: String,
    pub end_date: String,
    pub stats: PeriodStats,
    pub percentage: u32,
    pub prayers_percentage: u32,
    pub tasks_percentage: u32,
    pub tier: Tier,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProgressReport {
    pub date: String,
    pub weekly: PeriodReport,
    pub monthly: PeriodReport,
}

pub fn collect(data: &AppData, dates: &[NaiveDate]) -> PeriodStats {
    let mut stats = PeriodStats::default();

    for date in dates {
        let Some(day) = data.day(*date) else {
            continue;
        };
        if let Some(prayers) = &day.prayers {
            stats.prayers.total += prayers.len();
            stats.prayers.completed += prayers.iter().filter(|p| p.is_prayed).count();
        }
        stats.exercises += day.exercises.len();
        stats.meals += day.meals.len();
        stats.study += day.study.len();
        stats.tasks.total += day.tasks.len();
        stats.tasks.completed += day.tasks.iter().filter(|t| t.is_completed).count();
    }

    stats.words = data
        .words
        .iter()
        .filter(|word| dates.contains(&word.date))
        .count();

    stats
}

fn report(data: &AppData, dates: &[NaiveDate]) -> PeriodReport {
    let stats = collect(data, dates);
    let percentage = stats.overall_percentage();
    let tier = Tier::from_percentage(percentage);
    PeriodReport {
        start_date: dates.first().map(|d| date_key(*d)).unwrap_or_default(),
        end_date: dates.last().map(|d| date_key(*d)).unwrap_or_default(),
        prayers_percentage: stats.prayers.percentage(),
        tasks_percentage: stats.tasks.percentage(),
        stats,
        percentage,
        tier,
        message: tier.message(),
    }
}

pub fn build_progress(data: &AppData, date: NaiveDate) -> ProgressReport {
    ProgressReport {
        date: date_key(date),
        weekly: report(data, &week_dates(date)),
        monthly: report(data, &month_dates(date)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::Exercise;
    use crate::prayers::default_prayers;
    use crate::tasks::Task;
    use crate::vocabulary::Word;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn exercise(id: &str) -> Exercise {
        Exercise {
            id: id.into(),
            name: "Run".into(),
            kind: "Cardio".into(),
            sets: 1,
            reps: 1,
            weight: 0.0,
            time: "06:00".into(),
            notes: None,
        }
    }

    fn task(id: &str, done: bool) -> Task {
        Task {
            id: id.into(),
            title: "Task".into(),
            category: "Other".into(),
            description: String::new(),
            is_completed: done,
            is_recurring: false,
            template_id: None,
        }
    }

    fn word(id: &str, date: NaiveDate) -> Word {
        Word {
            id: id.into(),
            term: "Haus".into(),
            meaning: "house".into(),
            example: String::new(),
            date,
        }
    }

    fn seeded() -> AppData {
        let mut data = AppData::default();

        // Wednesday 2025-10-15: 3 of 5 prayers, one exercise, 1 of 2 tasks.
        let mut prayers = default_prayers();
        for prayer in prayers.iter_mut().take(3) {
            prayer.is_prayed = true;
        }
        let day = data.day_mut(d(10, 15));
        day.prayers = Some(prayers);
        day.exercises.push(exercise("e1"));
        day.tasks = vec![task("t1", true), task("t2", false)];

        // Outside the week, inside the month.
        data.day_mut(d(10, 2)).tasks.push(task("t3", true));

        // Outside the month.
        data.day_mut(d(9, 30)).exercises.push(exercise("e2"));

        data.words = vec![word("w1", d(10, 13)), word("w2", d(10, 2)), word("w3", d(9, 1))];
        data
    }

    #[test]
    fn weekly_fold_counts_only_the_week() {
        let report = build_progress(&seeded(), d(10, 15));
        let weekly = report.weekly.stats;
        assert_eq!(report.weekly.start_date, "2025-10-12");
        assert_eq!(report.weekly.end_date, "2025-10-18");
        assert_eq!(weekly.prayers, Ratio { completed: 3, total: 5 });
        assert_eq!(weekly.exercises, 1);
        assert_eq!(weekly.tasks, Ratio { completed: 1, total: 2 });
        assert_eq!(weekly.words, 1);
        // (3 + 1 + 0 + 1) / (5 + 1 + 0 + 2)
        assert_eq!(report.weekly.percentage, 63);
        assert_eq!(report.weekly.prayers_percentage, 60);
        assert_eq!(report.weekly.tasks_percentage, 50);
        assert_eq!(report.weekly.tier, Tier::Good);
    }

    #[test]
    fn monthly_fold_counts_the_month() {
        let report = build_progress(&seeded(), d(10, 15));
        let monthly = report.monthly.stats;
        assert_eq!(report.monthly.start_date, "2025-10-01");
        assert_eq!(report.monthly.end_date, "2025-10-31");
        assert_eq!(monthly.exercises, 1);
        assert_eq!(monthly.tasks, Ratio { completed: 2, total: 3 });
        assert_eq!(monthly.words, 2);
        // (3 + 1 + 0 + 2) / (5 + 1 + 0 + 3)
        assert_eq!(report.monthly.percentage, 67);
        assert_eq!(report.monthly.prayers_percentage, 60);
        assert_eq!(report.monthly.tasks_percentage, 67);
    }

    #[test]
    fn untouched_prayers_do_not_count() {
        let mut data = AppData::default();
        data.day_mut(d(10, 15)).exercises.push(exercise("e1"));
        let stats = collect(&data, &week_dates(d(10, 15)));
        assert_eq!(stats.prayers, Ratio::default());
        assert_eq!(stats.overall_percentage(), 100);
    }

    #[test]
    fn empty_period_is_zero() {
        let report = build_progress(&AppData::default(), d(10, 15));
        assert_eq!(report.weekly.percentage, 0);
        assert_eq!(report.weekly.prayers_percentage, 0);
        assert_eq!(report.weekly.tasks_percentage, 0);
        assert_eq!(report.weekly.tier, Tier::FreshStart);
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(Tier::from_percentage(100), Tier::Excellent);
        assert_eq!(Tier::from_percentage(90), Tier::Excellent);
        assert_eq!(Tier::from_percentage(89), Tier::Great);
        assert_eq!(Tier::from_percentage(70), Tier::VeryGood);
        assert_eq!(Tier::from_percentage(60), Tier::Good);
        assert_eq!(Tier::from_percentage(50), Tier::Average);
        assert_eq!(Tier::from_percentage(49), Tier::FreshStart);
    }
}
