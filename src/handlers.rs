use crate::calculator::{calculate, CalculatorResponse, Profile};
use crate::date::{calendar_month, date_key, days_remaining, parse_date_key, today, CalendarMonth};
use crate::errors::{AppError, ValidationError};
use crate::exercises::{self, Exercise, ExerciseForm, ExerciseSummary};
use crate::models::{AppData, CalendarQuery, DayRecord, SearchQuery, TodayQuery, TodayResponse};
use crate::nutrition::{self, Meal, MealForm, NutritionSummary};
use crate::prayers::{self, default_prayers, PrayerSummary, PrayerTimeRequest};
use crate::progress::{build_progress, ProgressReport};
use crate::records::{self, Form, Record};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::study::{self, StudyForm, StudySession, StudySummary};
use crate::tasks::{self, Task, TaskBoard, TaskForm, TaskSummary};
use crate::ui::render_index;
use crate::vocabulary::{self, VocabularySummary, Word, WordForm};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let date = state.range.clamp(today());
    Html(render_index(&date_key(date), &state.range))
}

pub async fn get_today(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<TodayResponse>, AppError> {
    let date = state.range.clamp(today());
    let selected = match query.selected.as_deref() {
        Some(raw) => parse_date_key(raw)?,
        None => date,
    };
    Ok(Json(TodayResponse {
        date: date_key(date),
        selected: date_key(selected),
        range_start: state.range.start.map(date_key),
        range_end: state.range.end.map(date_key),
        days_remaining: state.range.end.map(|end| days_remaining(selected, end)),
    }))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    let today = today();
    let selected = match query.selected.as_deref() {
        Some(raw) => parse_date_key(raw)?,
        None => state.range.clamp(today),
    };
    let year = query.year.unwrap_or(selected.year());
    let month = query.month.unwrap_or(selected.month());
    Ok(Json(calendar_month(year, month, selected, today, &state.range)?))
}

#[derive(Debug, Serialize)]
pub struct DayOverview {
    pub date: String,
    pub prayers: PrayerSummary,
    pub tasks: TaskSummary,
    pub exercises: ExerciseSummary,
    pub nutrition: NutritionSummary,
    pub vocabulary: VocabularySummary,
    pub study: StudySummary,
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayOverview>, AppError> {
    let date = resolve_date(&state, &date)?;
    apply_recurring(&state, date).await?;

    let overview = state
        .read(|data| {
            let key = date_key(date);
            let day = data.day(date).cloned().unwrap_or_default();
            DayOverview {
                prayers: prayers::summarize(key.clone(), &day.prayers.unwrap_or_else(default_prayers)),
                tasks: tasks::summarize(key.clone(), &day.tasks),
                exercises: exercises::summarize(key.clone(), &day.exercises),
                nutrition: nutrition::summarize(key.clone(), &day.meals),
                vocabulary: vocabulary::summarize(date, &data.words, ""),
                study: study::summarize(key.clone(), &day.study),
                date: key,
            }
        })
        .await;
    Ok(Json(overview))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<ProgressReport>, AppError> {
    let date = resolve_date(&state, &date)?;
    Ok(Json(state.read(|data| build_progress(data, date)).await))
}

// Prayers

pub async fn get_prayers(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<PrayerSummary>, AppError> {
    let date = resolve_date(&state, &date)?;
    let summary = state
        .read(|data| {
            let list = data
                .day(date)
                .and_then(|day| day.prayers.clone())
                .unwrap_or_else(default_prayers);
            prayers::summarize(date_key(date), &list)
        })
        .await;
    Ok(Json(summary))
}

pub async fn toggle_prayer(
    State(state): State<AppState>,
    Path((date, index)): Path<(String, usize)>,
) -> Result<Json<PrayerSummary>, AppError> {
    let date = resolve_date(&state, &date)?;
    let summary = state
        .update(|data| {
            let day = data.day_mut(date);
            let mut list = day.prayers.clone().unwrap_or_else(default_prayers);
            let prayer = prayers::toggle(&mut list, index)?;
            info!("prayer {} on {date} marked prayed={}", prayer.name, prayer.is_prayed);
            let summary = prayers::summarize(date_key(date), &list);
            day.prayers = Some(list);
            Ok::<_, AppError>(summary)
        })
        .await?;
    Ok(Json(summary))
}

pub async fn set_prayer_time(
    State(state): State<AppState>,
    Path((date, index)): Path<(String, usize)>,
    Json(payload): Json<PrayerTimeRequest>,
) -> Result<Json<PrayerSummary>, AppError> {
    let date = resolve_date(&state, &date)?;
    let summary = state
        .update(|data| {
            let day = data.day_mut(date);
            let mut list = day.prayers.clone().unwrap_or_else(default_prayers);
            let prayer = prayers::set_time(&mut list, index, &payload.time)?;
            info!("prayer {} on {date} prayed at {} ({} min late)", prayer.name, payload.time, prayer.delay);
            let summary = prayers::summarize(date_key(date), &list);
            day.prayers = Some(list);
            Ok::<_, AppError>(summary)
        })
        .await?;
    Ok(Json(summary))
}

// Exercises, meals and study sessions share the same list mechanics.

fn exercise_list(day: &mut DayRecord) -> &mut Vec<Exercise> {
    &mut day.exercises
}

fn meal_list(day: &mut DayRecord) -> &mut Vec<Meal> {
    &mut day.meals
}

fn study_list(day: &mut DayRecord) -> &mut Vec<StudySession> {
    &mut day.study
}

pub async fn list_exercises(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<ExerciseSummary>, AppError> {
    let date = resolve_date(&state, &date)?;
    let list = day_list(&state, date, |day| &day.exercises).await;
    Ok(Json(exercises::summarize(date_key(date), &list)))
}

pub async fn create_exercise(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(form): Json<ExerciseForm>,
) -> Result<(StatusCode, Json<Exercise>), AppError> {
    let date = resolve_date(&state, &date)?;
    let record = add_record(&state, date, form, exercise_list).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_exercise(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
    Json(form): Json<ExerciseForm>,
) -> Result<Json<Exercise>, AppError> {
    let date = resolve_date(&state, &date)?;
    Ok(Json(edit_record(&state, date, &id, form, exercise_list).await?))
}

pub async fn delete_exercise(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let date = resolve_date(&state, &date)?;
    delete_record(&state, date, &id, exercise_list).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_meals(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<NutritionSummary>, AppError> {
    let date = resolve_date(&state, &date)?;
    let list = day_list(&state, date, |day| &day.meals).await;
    Ok(Json(nutrition::summarize(date_key(date), &list)))
}

pub async fn create_meal(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(form): Json<MealForm>,
) -> Result<(StatusCode, Json<Meal>), AppError> {
    let date = resolve_date(&state, &date)?;
    let record = add_record(&state, date, form, meal_list).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_meal(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
    Json(form): Json<MealForm>,
) -> Result<Json<Meal>, AppError> {
    let date = resolve_date(&state, &date)?;
    Ok(Json(edit_record(&state, date, &id, form, meal_list).await?))
}

pub async fn delete_meal(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let date = resolve_date(&state, &date)?;
    delete_record(&state, date, &id, meal_list).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_study(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<StudySummary>, AppError> {
    let date = resolve_date(&state, &date)?;
    let list = day_list(&state, date, |day| &day.study).await;
    Ok(Json(study::summarize(date_key(date), &list)))
}

pub async fn create_study(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(form): Json<StudyForm>,
) -> Result<(StatusCode, Json<StudySession>), AppError> {
    let date = resolve_date(&state, &date)?;
    let record = add_record(&state, date, form, study_list).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_study(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
    Json(form): Json<StudyForm>,
) -> Result<Json<StudySession>, AppError> {
    let date = resolve_date(&state, &date)?;
    Ok(Json(edit_record(&state, date, &id, form, study_list).await?))
}

pub async fn delete_study(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let date = resolve_date(&state, &date)?;
    delete_record(&state, date, &id, study_list).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Tasks

pub async fn list_tasks(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<TaskSummary>, AppError> {
    let date = resolve_date(&state, &date)?;
    apply_recurring(&state, date).await?;
    let list = day_list(&state, date, |day| &day.tasks).await;
    Ok(Json(tasks::summarize(date_key(date), &list)))
}

pub async fn create_task(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(form): Json<TaskForm>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let date = resolve_date(&state, &date)?;
    let task = with_board(&state, date, |board| board.create(form)).await?;
    info!("added task {} on {date} (recurring={})", task.id, task.is_recurring);
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
    Json(form): Json<TaskForm>,
) -> Result<Json<Task>, AppError> {
    let date = resolve_date(&state, &date)?;
    let task = with_board(&state, date, |board| board.edit(&id, form)).await?;
    info!("updated task {id} on {date}");
    Ok(Json(task))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
) -> Result<Json<Task>, AppError> {
    let date = resolve_date(&state, &date)?;
    let task = with_board(&state, date, |board| board.toggle(&id)).await?;
    info!("task {id} on {date} completed={}", task.is_completed);
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let date = resolve_date(&state, &date)?;
    with_board(&state, date, |board| board.delete(&id)).await?;
    info!("deleted task {id} on {date}");
    Ok(StatusCode::NO_CONTENT)
}

// Vocabulary

pub async fn list_words(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<VocabularySummary>, AppError> {
    let date = resolve_date(&state, &date)?;
    let summary = state
        .read(|data| vocabulary::summarize(date, &data.words, ""))
        .await;
    Ok(Json(summary))
}

pub async fn search_words(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<VocabularySummary>, AppError> {
    let date = match query.date.as_deref() {
        Some(raw) => resolve_date(&state, raw)?,
        None => state.range.clamp(today()),
    };
    let summary = state
        .read(|data| vocabulary::summarize(date, &data.words, &query.q))
        .await;
    Ok(Json(summary))
}

pub async fn create_word(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(form): Json<WordForm>,
) -> Result<(StatusCode, Json<Word>), AppError> {
    let date = resolve_date(&state, &date)?;
    let word = state
        .update(|data| vocabulary::add(&mut data.words, form, date))
        .await?;
    info!("added word {} on {date}", word.id);
    Ok((StatusCode::CREATED, Json(word)))
}

pub async fn update_word(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<WordForm>,
) -> Result<Json<Word>, AppError> {
    let word = state
        .update(|data| vocabulary::edit(&mut data.words, &id, form))
        .await?;
    info!("updated word {id}");
    Ok(Json(word))
}

pub async fn delete_word(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .update(|data| records::remove(&mut data.words, &id))
        .await?;
    info!("deleted word {id}");
    Ok(StatusCode::NO_CONTENT)
}

// Calculator

pub async fn get_profile(State(state): State<AppState>) -> Json<CalculatorResponse> {
    let profile = state
        .read(|data| data.profile.clone().unwrap_or_default())
        .await;
    let results = calculate(&profile);
    Json(CalculatorResponse { profile, results })
}

pub async fn run_calculator(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<Json<CalculatorResponse>, AppError> {
    profile.validate()?;
    let results = calculate(&profile);
    let saved = profile.clone();
    state
        .update(|data| {
            data.profile = Some(saved);
            Ok::<_, AppError>(())
        })
        .await?;
    info!("calculator run: bmr={} tdee={}", results.bmr, results.tdee);
    Ok(Json(CalculatorResponse { profile, results }))
}

// Shared plumbing

fn resolve_date(state: &AppState, raw: &str) -> Result<NaiveDate, AppError> {
    let date = parse_date_key(raw)?;
    Ok(state.range.check(date)?)
}

async fn day_list<R: Clone>(
    state: &AppState,
    date: NaiveDate,
    list: impl FnOnce(&DayRecord) -> &Vec<R>,
) -> Vec<R> {
    state
        .read(|data| data.day(date).map(|day| list(day).clone()).unwrap_or_default())
        .await
}

async fn add_record<F>(
    state: &AppState,
    date: NaiveDate,
    form: F,
    list: fn(&mut DayRecord) -> &mut Vec<F::Output>,
) -> Result<F::Output, AppError>
where
    F: Form,
{
    let record = state
        .update(|data| records::add(list(data.day_mut(date)), form))
        .await?;
    info!("added {} {} on {date}", <F::Output as Record>::KIND, record.id());
    Ok(record)
}

async fn edit_record<F>(
    state: &AppState,
    date: NaiveDate,
    id: &str,
    form: F,
    list: fn(&mut DayRecord) -> &mut Vec<F::Output>,
) -> Result<F::Output, AppError>
where
    F: Form,
{
    let record = state
        .update(|data| records::edit(list(data.day_mut(date)), id, form))
        .await?;
    info!("updated {} {id} on {date}", <F::Output as Record>::KIND);
    Ok(record)
}

async fn delete_record<R: Record>(
    state: &AppState,
    date: NaiveDate,
    id: &str,
    list: fn(&mut DayRecord) -> &mut Vec<R>,
) -> Result<(), AppError> {
    state
        .update(|data| records::remove(list(data.day_mut(date)), id))
        .await?;
    info!("deleted {} {id} on {date}", R::KIND);
    Ok(())
}

fn board<'a>(data: &'a mut AppData, date: NaiveDate) -> TaskBoard<'a> {
    let AppData { days, templates, .. } = data;
    let day = days.entry(date_key(date)).or_default();
    TaskBoard {
        date,
        tasks: &mut day.tasks,
        applied: &mut day.applied_templates,
        templates,
    }
}

/// Clones pending recurring templates into `date`, persisting only when something changed.
async fn apply_recurring(state: &AppState, date: NaiveDate) -> Result<(), AppError> {
    let mut data = state.data.lock().await;
    if data.templates.is_empty() {
        return Ok(());
    }
    let added = board(&mut data, date).apply_templates();
    if added > 0 {
        persist_data(&state.data_path, &data).await?;
        info!("added {added} recurring tasks to {date}");
    }
    Ok(())
}

async fn with_board<T>(
    state: &AppState,
    date: NaiveDate,
    f: impl FnOnce(&mut TaskBoard<'_>) -> Result<T, ValidationError>,
) -> Result<T, AppError> {
    state
        .update(|data| {
            let mut board = board(data, date);
            board.apply_templates();
            f(&mut board)
        })
        .await
}
