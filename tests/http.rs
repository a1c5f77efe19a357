use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

struct TestServer {
    base_url: String,
    child: Child,
    data_path: String,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = std::fs::remove_file(&self.data_path);
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

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

fn fixture() -> Value {
    let mut flags: Vec<Value> = (1..=16)
        .map(|id| {
            json!({
                "id": id,
                "timestamp": format!("2024-01-10T15:{id:02}:00Z"),
                "flag_type": "Yellow Flag",
            })
        })
        .collect();
    // 02:30 UTC on the 11th is still the evening of the 10th locally.
    flags.push(json!({ "id": 17, "timestamp": "2024-01-11T02:30:00Z", "flag_type": "Red Flag" }));
    flags.push(json!({ "id": 18, "timestamp": "2024-01-20T18:00:00", "flagType": " yellow flag " }));
    flags.push(json!({ "id": 19, "timestamp": "bogus", "flag_type": "red flag" }));

    json!({ "tables": { "flags": flags, "weather": [] } })
}

fn write_fixture() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("flag_dashboard_http_{}_{}.json", std::process::id(), nanos));
    std::fs::write(&path, serde_json::to_vec(&fixture()).unwrap()).expect("write fixture");
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/tables")).send().await {
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
    let data_path = write_fixture();
    let child = Command::new(env!("CARGO_BIN_EXE_flag_dashboard"))
        .env("PORT", port.to_string())
        .env("FLAG_DATA_PATH", &data_path)
        .env("FLAG_PAGE_LIMIT", "5")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        child,
        data_path,
    }
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

async fn get(path: &str) -> (StatusCode, Option<Value>) {
    let server = shared_server().await;
    let response = Client::new()
        .get(format!("{}{path}", server.base_url))
        .send()
        .await
        .unwrap();
    let status = response.status();
    let body = if status.is_success() {
        Some(response.json().await.unwrap())
    } else {
        None
    };
    (status, body)
}

#[tokio::test]
async fn http_index_serves_dashboard() {
    let server = shared_server().await;
    let html = Client::new()
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Lifeguard Flags"));
    assert!(html.contains("const PAGE_LIMIT = 5;"));
}

#[tokio::test]
async fn http_lists_tables() {
    let (status, body) = get("/api/tables").await;
    assert!(status.is_success());
    assert_eq!(body.unwrap()["tables"], json!(["flags", "weather"]));
}

#[tokio::test]
async fn http_table_data_pages_most_recent_first() {
    let (_, body) = get("/api/table-data/flags").await;
    let body = body.unwrap();
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![19, 18, 17, 16, 15]);
    assert_eq!(body["data"][0]["local_time"], Value::Null);
    assert_eq!(body["data"][1]["local_time"], "January 20, 2024 12:00 PM CST");

    let pagination = &body["pagination"];
    assert_eq!(pagination["total_rows"], 19);
    assert_eq!(pagination["page"], 1);
    assert_eq!(pagination["next_offset"], 5);
    assert_eq!(pagination["previous_offset"], Value::Null);

    let (_, body) = get("/api/table-data/flags?limit=5&offset=7").await;
    let pagination = &body.unwrap()["pagination"];
    assert_eq!(pagination["offset"], 5);
    assert_eq!(pagination["page"], 2);
    assert_eq!(pagination["previous_offset"], 0);

    let (_, body) = get("/api/table-data/flags?limit=10&offset=10").await;
    let body = body.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 9);
    assert_eq!(body["pagination"]["has_next"], false);
    assert_eq!(body["pagination"]["next_offset"], Value::Null);
}

#[tokio::test]
async fn http_table_data_rejects_bad_requests() {
    let (status, _) = get("/api/table-data/bad-name").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get("/api/table-data/tides").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get("/api/table-data/flags?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_calendar_month_grid() {
    let (status, body) = get("/api/calendar/2024/1").await;
    assert!(status.is_success());
    let body = body.unwrap();

    assert_eq!(body["leading_padding"], 1);
    let cells = body["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 32);
    assert_eq!(cells[0]["date"], Value::Null);

    let tenth = &cells[10];
    assert_eq!(tenth["date"], "2024-01-10");
    assert_eq!(tenth["count"], 17);
    assert_eq!(tenth["badge"], "+17 flags");
    assert_eq!(tenth["latest_flag"], "red flag");
    assert_eq!(tenth["events"].as_array().unwrap().len(), 17);

    assert_eq!(cells[20]["count"], 1);
    assert_eq!(cells[20]["badge"], Value::Null);

    let skipped = body["skipped"].as_array().unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["id"], 19);
    assert!(skipped[0]["reason"].as_str().unwrap().contains("bogus"));

    assert_eq!(body["previous"], json!({ "year": 2023, "month": 12 }));
    assert_eq!(body["next"], json!({ "year": 2024, "month": 2 }));

    let (status, _) = get("/api/calendar/2024/13").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_day_events_sorted_by_local_time() {
    let (_, body) = get("/api/day/2024-01-10").await;
    let body = body.unwrap();
    assert_eq!(body["count"], 17);
    let events = body["events"].as_array().unwrap();
    assert_eq!(events[0]["time"], "9:01 AM");
    assert_eq!(events[16]["time"], "8:30 PM");
    assert_eq!(events[16]["id"], 17);
    assert_eq!(body["skipped"][0]["id"], 19);

    let (status, _) = get("/api/day/2024-02-30").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_distribution_counts_and_percentages() {
    let (_, body) = get("/api/distribution?periods=all").await;
    let body = body.unwrap();
    let period = &body["periods"][0];
    assert_eq!(period["period"], "all");
    assert_eq!(period["total"], 19);
    assert_eq!(
        period["categories"][0],
        json!({
            "label": "yellow flag",
            "count": 17,
            "color": "#f2c94c",
            "known": true,
            "percentage": "89%",
        })
    );
    assert_eq!(period["categories"][1]["label"], "red flag");
    assert_eq!(period["categories"][1]["percentage"], "11%");

    let (_, body) = get("/api/distribution").await;
    assert_eq!(body.unwrap()["periods"].as_array().unwrap().len(), 3);

    let (status, _) = get("/api/distribution?periods=today,week,month,all").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
