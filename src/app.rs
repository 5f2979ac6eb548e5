use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/today", get(handlers::get_today))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/days/:date", get(handlers::get_day))
        .route("/api/days/:date/progress", get(handlers::get_progress))
        .route("/api/days/:date/prayers", get(handlers::get_prayers))
        .route(
            "/api/days/:date/prayers/:index/toggle",
            post(handlers::toggle_prayer),
        )
        .route(
            "/api/days/:date/prayers/:index/time",
            put(handlers::set_prayer_time),
        )
        .route(
            "/api/days/:date/exercises",
            get(handlers::list_exercises).post(handlers::create_exercise),
        )
        .route(
            "/api/days/:date/exercises/:id",
            put(handlers::update_exercise).delete(handlers::delete_exercise),
        )
        .route(
            "/api/days/:date/meals",
            get(handlers::list_meals).post(handlers::create_meal),
        )
        .route(
            "/api/days/:date/meals/:id",
            put(handlers::update_meal).delete(handlers::delete_meal),
        )
        .route(
            "/api/days/:date/study",
            get(handlers::list_study).post(handlers::create_study),
        )
        .route(
            "/api/days/:date/study/:id",
            put(handlers::update_study).delete(handlers::delete_study),
        )
        .route(
            "/api/days/:date/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/api/days/:date/tasks/:id",
            put(handlers::update_task).delete(handlers::delete_task),
        )
        .route(
            "/api/days/:date/tasks/:id/toggle",
            post(handlers::toggle_task),
        )
        .route(
            "/api/days/:date/words",
            get(handlers::list_words).post(handlers::create_word),
        )
        .route("/api/words", get(handlers::search_words))
        .route(
            "/api/words/:id",
            put(handlers::update_word).delete(handlers::delete_word),
        )
        .route("/api/profile", get(handlers::get_profile))
        .route("/api/calculator", post(handlers::run_calculator))
        .with_state(state)
}
