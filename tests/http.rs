use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const DAY: &str = "2025-10-15";

#[derive(Debug, Deserialize)]
struct TodayResponse {
    date: String,
    range_end: Option<String>,
    days_remaining: Option<i64>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("daily_dashboard_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_daily_dashboard"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("TRACKER_START", "2025-01-01")
        .env("TRACKER_END", "2025-12-31")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn get_json(client: &Client, url: String) -> Value {
    let response = client.get(url).send().await.unwrap();
    assert!(response.status().is_success(), "GET failed: {}", response.status());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_today_is_clamped_into_range() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let today: TodayResponse = client
        .get(server.url("/api/today"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(today.date.as_str() >= "2025-01-01" && today.date.as_str() <= "2025-12-31");
    assert_eq!(today.range_end.as_deref(), Some("2025-12-31"));

    let selected: TodayResponse = client
        .get(server.url("/api/today?selected=2025-12-01"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(selected.days_remaining, Some(30));

    let page = client.get(server.url("/")).send().await.unwrap();
    assert!(page.status().is_success());
    assert!(page.text().await.unwrap().contains("Daily Dashboard"));
}

#[tokio::test]
async fn http_rejects_bad_and_out_of_range_dates() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let bad = client.get(server.url("/api/days/not-a-date")).send().await.unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let outside = client.get(server.url("/api/days/2026-01-01/prayers")).send().await.unwrap();
    assert_eq!(outside.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_prayer_toggle_and_time() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let date = "2025-03-02";

    let rejected = client
        .put(server.url(&format!("/api/days/{date}/prayers/1/time")))
        .json(&json!({ "time": "12:30" }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let toggled = client
        .post(server.url(&format!("/api/days/{date}/prayers/1/toggle")))
        .send()
        .await
        .unwrap();
    assert!(toggled.status().is_success());

    let summary: Value = client
        .put(server.url(&format!("/api/days/{date}/prayers/1/time")))
        .json(&json!({ "time": "12:45" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(summary["completed"], 1);
    assert_eq!(summary["completion_percentage"], 20);
    assert_eq!(summary["prayers"][1]["delay"], 30);
    assert_eq!(summary["prayers"][1]["status"], "late");

    let missing = client
        .post(server.url(&format!("/api/days/{date}/prayers/9/toggle")))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_exercise_crud_replaces_day_list() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = server.url(&format!("/api/days/{DAY}/exercises"));

    let invalid = client
        .post(&base)
        .json(&json!({ "name": "Bench", "type": "Chest" }))
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let created = client
        .post(&base)
        .json(&json!({ "name": "Bench", "type": "Chest", "sets": 3, "reps": 10, "weight": 60, "time": "07:00" }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let updated = client
        .put(format!("{base}/{id}"))
        .json(&json!({ "name": "Bench", "type": "Chest", "sets": 4, "reps": 10, "weight": 60, "time": "07:30" }))
        .send()
        .await
        .unwrap();
    assert!(updated.status().is_success());

    let summary = get_json(&client, base.clone()).await;
    assert_eq!(summary["count"], 1);
    assert_eq!(summary["total_volume"], 2400.0);
    assert_eq!(summary["workout_minutes"], 30);

    let deleted = client.delete(format!("{base}/{id}")).send().await.unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let again = client.delete(format!("{base}/{id}")).send().await.unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let summary = get_json(&client, base).await;
    assert_eq!(summary["count"], 0);
}

#[tokio::test]
async fn http_recurring_task_reaches_next_day() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let created: Value = client
        .post(server.url("/api/days/2025-05-01/tasks"))
        .json(&json!({ "title": "Morning walk", "category": "Health", "is_recurring": true }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let template_id = created["template_id"].as_str().unwrap().to_string();

    let first_day = get_json(&client, server.url("/api/days/2025-05-01/tasks")).await;
    assert_eq!(first_day["tasks"].as_array().unwrap().len(), 1);

    let next_day = get_json(&client, server.url("/api/days/2025-05-02/tasks")).await;
    let tasks = next_day["tasks"].as_array().unwrap();
    let clone = tasks
        .iter()
        .find(|task| task["template_id"] == template_id.as_str())
        .expect("recurring clone");
    assert_eq!(clone["id"], format!("{template_id}-2025-05-02"));

    let toggled: Value = client
        .post(server.url(&format!(
            "/api/days/2025-05-02/tasks/{}/toggle",
            clone["id"].as_str().unwrap()
        )))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(toggled["is_completed"], true);

    // Deleting the original stops the template for days not yet visited.
    let deleted = client
        .delete(server.url(&format!(
            "/api/days/2025-05-01/tasks/{}",
            created["id"].as_str().unwrap()
        )))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let later = get_json(&client, server.url("/api/days/2025-05-03/tasks")).await;
    assert!(later["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .all(|task| task["template_id"] != template_id.as_str()));
}

#[tokio::test]
async fn http_words_and_progress() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let date = "2025-08-13";

    let created = client
        .post(server.url(&format!("/api/days/{date}/words")))
        .json(&json!({ "term": "Fenster", "meaning": "window", "example": "Das Fenster ist offen." }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let found = get_json(&client, server.url("/api/words?q=fenster&date=2025-08-01")).await;
    assert_eq!(found["words"][0]["term"], "Fenster");
    assert_eq!(found["words"][0]["date"], date);

    client
        .post(server.url(&format!("/api/days/{date}/study")))
        .json(&json!({ "subject": "German", "duration": "40", "pages": 5, "time": "20:00" }))
        .send()
        .await
        .unwrap();

    let progress = get_json(&client, server.url(&format!("/api/days/{date}/progress"))).await;
    assert_eq!(progress["weekly"]["stats"]["words"], 1);
    assert_eq!(progress["weekly"]["stats"]["study"], 1);
    assert_eq!(progress["weekly"]["start_date"], "2025-08-10");
    assert_eq!(progress["monthly"]["end_date"], "2025-08-31");
}

#[tokio::test]
async fn http_calculator_saves_profile() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response: Value = client
        .post(server.url("/api/calculator"))
        .json(&json!({
            "weight": 80, "height": 180, "age": 30,
            "gender": "male", "activity_level": "moderate"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(response["results"]["bmr"], 1780);
    assert_eq!(response["results"]["bulking"], 3059);

    let profile = get_json(&client, server.url("/api/profile")).await;
    assert_eq!(profile["profile"]["age"], 30);
    assert_eq!(profile["results"]["tdee"], 2759);
}

#[tokio::test]
async fn http_meal_word_and_task_edits_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let date = "2025-06-10";
    let meals = server.url(&format!("/api/days/{date}/meals"));

    let rejected = client
        .post(&meals)
        .json(&json!({ "name": "Oats", "type": "Brunch", "time": "08:00" }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let meal: Value = client
        .post(&meals)
        .json(&json!({ "name": "Oats", "type": "Breakfast", "time": "08:00", "calories": 300, "protein": 10 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let meal_id = meal["id"].as_str().unwrap().to_string();

    let updated = client
        .put(format!("{meals}/{meal_id}"))
        .json(&json!({ "name": "Oats", "type": "Breakfast", "time": "08:15", "calories": 350, "protein": 12 }))
        .send()
        .await
        .unwrap();
    assert!(updated.status().is_success());

    let overview = get_json(&client, server.url(&format!("/api/days/{date}"))).await;
    assert_eq!(overview["date"], date);
    assert_eq!(overview["nutrition"]["totals"]["calories"], 350.0);
    assert_eq!(overview["nutrition"]["meals"][0]["time"], "08:15");
    assert_eq!(overview["prayers"]["completed"], 0);

    let deleted = client.delete(format!("{meals}/{meal_id}")).send().await.unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let summary = get_json(&client, meals).await;
    assert!(summary["meals"].as_array().unwrap().is_empty());

    let word: Value = client
        .post(server.url(&format!("/api/days/{date}/words")))
        .json(&json!({ "term": "Apfel", "meaning": "apple" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let word_id = word["id"].as_str().unwrap().to_string();

    let edited: Value = client
        .put(server.url(&format!("/api/words/{word_id}")))
        .json(&json!({ "term": "Apfel", "meaning": "an apple" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(edited["meaning"], "an apple");
    assert_eq!(edited["date"], date);

    let removed = client.delete(server.url(&format!("/api/words/{word_id}"))).send().await.unwrap();
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);
    let missing = client.delete(server.url(&format!("/api/words/{word_id}"))).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let words = get_json(&client, server.url(&format!("/api/days/{date}/words"))).await;
    assert_eq!(words["today_count"], 0);

    let tasks = server.url(&format!("/api/days/{date}/tasks"));
    let task: Value = client
        .post(&tasks)
        .json(&json!({ "title": "Call home", "category": "Personal" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let task_id = task["id"].as_str().unwrap().to_string();
    client
        .post(format!("{tasks}/{task_id}/toggle"))
        .send()
        .await
        .unwrap();

    let renamed: Value = client
        .put(format!("{tasks}/{task_id}"))
        .json(&json!({ "title": "Call family", "category": "Personal" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(renamed["title"], "Call family");
    assert_eq!(renamed["is_completed"], true);
}

#[tokio::test]
async fn http_calendar_defaults_to_selected_month() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let month = get_json(&client, server.url("/api/calendar?selected=2025-06-10")).await;
    assert_eq!(month["year"], 2025);
    assert_eq!(month["month"], 6);
    // June 1st 2025 is a Sunday.
    assert_eq!(month["leading_blanks"], 0);
    assert_eq!(month["days"].as_array().unwrap().len(), 30);
    assert_eq!(month["days"][9]["selected"], true);
    assert_eq!(month["prev_day"], "2025-06-09");
    assert_eq!(month["next_day"], "2025-06-11");

    let first = get_json(&client, server.url("/api/calendar?selected=2025-01-01")).await;
    assert!(first["prev_day"].is_null());

    let invalid = client
        .get(server.url("/api/calendar?year=2025&month=13"))
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}
