//! In-process stand-in for the house points backend

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const HOUSES: [&str; 4] = ["Gryffindor", "Slytherin", "Hufflepuff", "Ravenclaw"];

#[derive(Debug, Clone)]
pub struct Student {
    pub name: String,
    pub email: String,
    pub house: Option<String>,
}

#[derive(Default)]
pub struct Backend {
    pub students: Mutex<HashMap<String, Student>>,
    pub admin_ready: AtomicBool,
    pub fail_overview: AtomicBool,
    /// When set, the overview answers 200 with a body of the wrong shape
    pub malformed_overview: AtomicBool,
    /// When set, quiz submissions are rejected with this detail
    pub reject_quiz: Mutex<Option<String>>,
    pub last_quiz: Mutex<Option<Value>>,
    pub dashboard_hits: AtomicUsize,
    pub overview_hits: AtomicUsize,
}

fn detail(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "detail": msg }))).into_response()
}

async fn signup(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default();

    if password.len() < 6 {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "detail": [
                    {"loc": ["body", "password"], "msg": "password must have at least 6 characters", "type": "value_error"}
                ]
            })),
        )
            .into_response();
    }

    let mut students = backend.students.lock().unwrap();
    if students.values().any(|s| s.email == email) {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }

    let user_id = format!("user-{}", students.len() + 1);
    students.insert(
        user_id.clone(),
        Student {
            name,
            email,
            house: None,
        },
    );
    Json(json!({ "user_id": user_id })).into_response()
}

async fn bootstrap(State(backend): State<Arc<Backend>>) -> Response {
    if backend.admin_ready.swap(true, Ordering::SeqCst) {
        return detail(StatusCode::CONFLICT, "Admin already exists");
    }
    Json(json!({ "status": "created" })).into_response()
}

async fn submit_quiz(
    State(backend): State<Arc<Backend>>,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    *backend.last_quiz.lock().unwrap() = Some(body.clone());

    if let Some(msg) = backend.reject_quiz.lock().unwrap().clone() {
        return detail(StatusCode::BAD_REQUEST, &msg);
    }

    let mut students = backend.students.lock().unwrap();
    let Some(student) = students.get_mut(&user_id) else {
        return detail(StatusCode::NOT_FOUND, "Student not found");
    };

    let answers = body["answers"].as_array().cloned().unwrap_or_default();
    if answers.len() != 3 {
        return detail(StatusCode::BAD_REQUEST, "Answer all questions");
    }

    let mut tally = [0usize; 4];
    for answer in &answers {
        let value = answer["answer_value"].as_u64().unwrap_or(0) as usize;
        tally[value.min(3)] += 1;
    }
    let best = (0..4).max_by_key(|i| (tally[*i], *i)).unwrap_or(0);
    let house = HOUSES[best].to_string();
    student.house = Some(house.clone());

    Json(json!({ "assigned_house": house })).into_response()
}

fn houses() -> Value {
    json!([
        {"name": "Gryffindor", "total_points": 120},
        {"name": "Slytherin", "total_points": null},
        {"name": "Hufflepuff", "total_points": 94.6},
        {"name": "Ravenclaw", "total_points": 130}
    ])
}

async fn dashboard(State(backend): State<Arc<Backend>>, Path(user_id): Path<String>) -> Response {
    backend.dashboard_hits.fetch_add(1, Ordering::SeqCst);

    let students = backend.students.lock().unwrap();
    let Some(student) = students.get(&user_id) else {
        return (StatusCode::NOT_FOUND, "no such student").into_response();
    };

    Json(json!({
        "student": {
            "id": user_id,
            "name": student.name,
            "assigned_house": student.house,
            "total_points": null
        },
        "houses": houses(),
        "transactions": [
            {"reason": "Sorting ceremony", "delta": 10.0},
            {"reason": "Late to Potions", "delta": -2}
        ]
    }))
    .into_response()
}

async fn overview(State(backend): State<Arc<Backend>>) -> Response {
    backend.overview_hits.fetch_add(1, Ordering::SeqCst);

    if backend.fail_overview.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    if backend.malformed_overview.load(Ordering::SeqCst) {
        return Json(json!({ "houses": "all of them" })).into_response();
    }

    Json(json!({
        "houses": houses(),
        "top": [
            {"id": "s-9", "name": "Hermione", "assigned_house": "Gryffindor", "total_points": 79.5},
            {"id": "s-4", "name": "Drifter", "assigned_house": null, "total_points": null}
        ]
    }))
    .into_response()
}

pub fn router(backend: Arc<Backend>) -> Router {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/admin/bootstrap", post(bootstrap))
        .route("/quiz/submit/{user_id}", post(submit_quiz))
        .route("/student/dashboard/{user_id}", get(dashboard))
        .route("/admin/overview", get(overview))
        .with_state(backend)
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Spawn the backend on a random port; returns its base URL
pub async fn spawn_backend() -> (String, Arc<Backend>) {
    let backend = Arc::new(Backend::default());
    let address = serve(router(backend.clone())).await;
    (address, backend)
}

/// Same backend, mounted below `/api`
pub async fn spawn_backend_under_api() -> (String, Arc<Backend>) {
    let backend = Arc::new(Backend::default());
    let address = serve(Router::new().nest("/api", router(backend.clone()))).await;
    (format!("{}/api/", address), backend)
}

/// A URL where nothing is listening
pub async fn dead_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    address
}

/// A server that answers 200 with a JSON body cut off mid-stream
pub async fn spawn_truncated_backend() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 200\r\n\r\n{\"houses\": [",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });

    address
}
