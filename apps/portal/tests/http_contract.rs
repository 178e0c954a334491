use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use job_portal::config::Config;
use job_portal::errors::{DEFAULT_ERROR_MESSAGE, NO_RESPONSE_MESSAGE};
use job_portal::models::{CompanyRef, NewJob, NewReview, Rating};
use job_portal::ApiClient;

#[derive(Clone, Default)]
struct Seen {
    bodies: Arc<Mutex<Vec<Value>>>,
    request_ids: Arc<Mutex<Vec<String>>>,
}

async fn list_jobs() -> Json<Value> {
    Json(json!([
        {"id": 1, "title": "Backend", "description": "APIs", "location": "Remote",
         "minSalary": 90000, "maxSalary": 120000, "company": {"id": 2, "name": "Tech Corp"}}
    ]))
}

async fn get_job(Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": format!("Job {id} not found"), "errors": {"id": "unknown"}})),
    )
}

async fn create_job(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> &'static str {
    seen.bodies.lock().unwrap().push(body);
    if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        seen.request_ids.lock().unwrap().push(id.to_string());
    }
    "Job added successfully"
}

async fn update_job(Path(_id): Path<i64>, Json(_body): Json<Value>) -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn delete_job(Path(_id): Path<i64>) -> &'static str {
    "Job deleted successfully"
}

async fn list_employees() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "")
}

async fn can_review(Path((employee_id, _job_id)): Path<(i64, i64)>) -> Json<bool> {
    Json(employee_id == 1)
}

async fn create_review(State(seen): State<Seen>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    seen.bodies.lock().unwrap().push(body.clone());
    let mut created = body;
    created["id"] = json!(10);
    (StatusCode::CREATED, Json(created))
}

async fn spawn_api(seen: Seen) -> String {
    let app = Router::new()
        .route("/api/jobs", get(list_jobs).post(create_job))
        .route(
            "/api/jobs/:id",
            get(get_job).put(update_job).delete(delete_job),
        )
        .route("/api/employees", get(list_employees))
        .route(
            "/api/employees/:employee_id/can-review/:job_id",
            get(can_review),
        )
        .route("/api/reviews", post(create_review))
        .with_state(seen);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve app");
    });
    format!("http://{addr}/api")
}

fn client_for(base_url: &str) -> ApiClient {
    let config = Config {
        api_base_url: base_url.to_string(),
        rust_log: "info".to_string(),
    };
    ApiClient::from_config(&config).expect("api client")
}

#[tokio::test]
async fn test_list_jobs_decodes_canonical_schema() {
    let base = spawn_api(Seen::default()).await;
    let jobs = client_for(&base).list_jobs().await.expect("jobs");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].max_salary, Some(120000.0));
    assert_eq!(jobs[0].company.as_ref().unwrap().name.as_deref(), Some("Tech Corp"));
}

#[tokio::test]
async fn test_error_payload_is_normalized() {
    let base = spawn_api(Seen::default()).await;
    let err = client_for(&base).get_job(9).await.unwrap_err();
    assert_eq!(err.status, 404);
    assert_eq!(err.message, "Job 9 not found");
    assert_eq!(err.errors.unwrap()["id"], "unknown");
}

#[tokio::test]
async fn test_error_without_payload_gets_default_message() {
    let base = spawn_api(Seen::default()).await;
    let err = client_for(&base).list_employees().await.unwrap_err();
    assert_eq!(err.status, 500);
    assert_eq!(err.message, DEFAULT_ERROR_MESSAGE);
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn test_text_acknowledgements_are_success() {
    let seen = Seen::default();
    let base = spawn_api(seen.clone()).await;
    let client = client_for(&base);

    let new_job = NewJob {
        title: "QA".into(),
        description: "Testing".into(),
        location: "Oslo".into(),
        min_salary: 50000.0,
        max_salary: 60000.0,
        company: CompanyRef::id(3),
        requirements: None,
    };
    assert_eq!(client.create_job(&new_job).await.unwrap(), None);
    client.delete_job(1).await.unwrap();

    let bodies = seen.bodies.lock().unwrap().clone();
    assert_eq!(bodies[0]["company"], json!({"id": 3}));
    assert_eq!(seen.request_ids.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_not_found_has_status() {
    let base = spawn_api(Seen::default()).await;
    let client = client_for(&base);
    let mut job = client.list_jobs().await.unwrap().remove(0);
    job.id = 77;
    let err = client.update_job(&job).await.unwrap_err();
    assert_eq!(err.status, 404);
}

#[tokio::test]
async fn test_review_round_trip_over_http() {
    let seen = Seen::default();
    let base = spawn_api(seen.clone()).await;
    let client = client_for(&base);

    assert!(client.can_review(1, 5).await.unwrap());
    assert!(!client.can_review(2, 5).await.unwrap());

    let review = client
        .create_review(&NewReview {
            job_id: 5,
            employee_id: 1,
            rating: Rating::new(3).unwrap(),
            text: "Great job".into(),
        })
        .await
        .unwrap();
    assert_eq!(review.id, 10);
    assert_eq!(
        seen.bodies.lock().unwrap()[0],
        json!({"jobId": 5, "employeeId": 1, "rating": 3, "text": "Great job"})
    );
}

#[tokio::test]
async fn test_refused_connection_is_status_zero() {
    // grab a free port, then close it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(&format!("http://{addr}/api"))
        .list_jobs()
        .await
        .unwrap_err();
    assert_eq!(err.status, 0);
    assert_eq!(err.message, NO_RESPONSE_MESSAGE);
}
