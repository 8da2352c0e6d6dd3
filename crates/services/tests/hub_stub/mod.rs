//! Minimal DataPath Hub over `tiny_http` for exercising `HttpBackend`.

use std::io::Read as _;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde_json::{Value, json};

pub const SESSION_ID: &str = "sid-123";
pub const TOKEN: &str = "tok-123";

pub struct HubStub {
    pub base_url: String,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl HubStub {
    pub fn spawn() -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start hub stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            let mut progress: Vec<Value> = Vec::new();
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let mut request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let method = request.method().clone();
                let path = request.url().to_string();
                let authed = header(&request, "Authorization").as_deref()
                    == Some(format!("Bearer {TOKEN}").as_str());

                let (status, body) = match (&method, path.as_str()) {
                    (tiny_http::Method::Get, "/api/auth/emergent/session") => {
                        if header(&request, "X-Session-ID").as_deref() == Some(SESSION_ID) {
                            (200, json!({ "user": user(), "session_token": TOKEN }))
                        } else {
                            (401, json!({ "detail": "Invalid session" }))
                        }
                    }
                    (tiny_http::Method::Get, "/api/auth/me") if authed => (200, user()),
                    (tiny_http::Method::Post, "/api/auth/logout") => {
                        (200, json!({ "message": "Logged out successfully" }))
                    }
                    (tiny_http::Method::Get, "/api/stats") if authed => (
                        200,
                        json!({
                            "total_topics": 1,
                            "total_projects": 0,
                            "completed_topics": 0,
                            "completed_projects": 0,
                            "in_progress_topics": progress.len(),
                            "in_progress_projects": 0,
                            "total_completed": 0,
                            "total_in_progress": progress.len()
                        }),
                    ),
                    (tiny_http::Method::Get, "/api/topics") => (200, json!([topic()])),
                    (tiny_http::Method::Get, "/api/topics/t-sql") => (200, topic()),
                    (tiny_http::Method::Get, "/api/topics/boom") => {
                        (500, json!({ "detail": "boom" }))
                    }
                    (tiny_http::Method::Get, "/api/topics/garbled") => {
                        (200, json!({ "unexpected": true }))
                    }
                    (tiny_http::Method::Get, "/api/progress") if authed => {
                        (200, Value::Array(progress.clone()))
                    }
                    (tiny_http::Method::Post, "/api/progress") if authed => {
                        let mut raw = String::new();
                        match request
                            .as_reader()
                            .read_to_string(&mut raw)
                            .ok()
                            .and_then(|_| serde_json::from_str::<Value>(&raw).ok())
                        {
                            Some(update) => {
                                let stored = store_progress(&mut progress, update);
                                (200, stored)
                            }
                            None => (422, json!({ "detail": "invalid body" })),
                        }
                    }
                    (_, p) if needs_auth(p) => (401, json!({ "detail": "Not authenticated" })),
                    _ => (404, json!({ "detail": "Not found" })),
                };

                let content_type = tiny_http::Header::from_bytes(
                    &b"Content-Type"[..],
                    &b"application/json"[..],
                )
                .expect("content-type header");
                let response = tiny_http::Response::from_string(body.to_string())
                    .with_status_code(status)
                    .with_header(content_type);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for HubStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn header(request: &tiny_http::Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_owned())
}

fn needs_auth(path: &str) -> bool {
    path.starts_with("/api/auth") || path.starts_with("/api/progress") || path == "/api/stats"
}

fn user() -> Value {
    json!({
        "id": "user-1",
        "email": "ada@example.com",
        "name": "Ada",
        "picture": null,
        "auth_provider": "emergent",
        "enrolled_paths": [],
        "created_at": "2023-11-14T22:13:20+00:00"
    })
}

fn topic() -> Value {
    json!({
        "id": "t-sql",
        "title": "SQL Fundamentals",
        "description": "Select, filter, join",
        "difficulty": "Beginner",
        "duration": "3 weeks",
        "prerequisites": [],
        "career_paths": ["Data Analyst", "Data Engineer"],
        "resources": [
            { "title": "SQL for Data Science", "url": "https://example.com/sql", "platform": "Coursera", "type": "FREE" }
        ],
        "order": 1
    })
}

fn store_progress(progress: &mut Vec<Value>, update: Value) -> Value {
    let mut record = update;
    record["user_id"] = json!("user-1");
    record["updated_at"] = json!("2023-11-14T22:13:20.000001+00:00");
    if record["status"] == "completed" {
        record["completed_at"] = json!("2023-11-14T22:13:20+00:00");
    }
    let item_id = record["item_id"].clone();
    progress.retain(|existing| existing["item_id"] != item_id);
    progress.push(record.clone());
    record
}
