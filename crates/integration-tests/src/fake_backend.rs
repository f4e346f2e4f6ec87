//! In-memory stand-in for the REST backend.
//!
//! Entities are kept as raw JSON so tests assert on exactly what the
//! console sent. Every request is recorded before it is handled.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde::Deserialize;
use serde_json::{Value, json};

/// A request the fake backend received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
}

#[derive(Default)]
struct Store {
    branches: Vec<Value>,
    staff: Vec<Value>,
    schedules: Vec<Value>,
    requests: Vec<RecordedRequest>,
    /// Message for the next rejected write, if one is armed.
    reject_next_write: Option<String>,
}

/// Shared handle to the fake backend's state.
#[derive(Clone, Default)]
pub struct FakeBackend {
    store: Arc<Mutex<Store>>,
}

fn id_of(value: &Value) -> Option<i64> {
    value.get("id").and_then(Value::as_i64)
}

fn branch_of(value: &Value) -> Option<i64> {
    value.get("sucursalId").and_then(Value::as_i64)
}

fn next_id(list: &[Value]) -> i64 {
    list.iter().filter_map(id_of).max().unwrap_or(0) + 1
}

fn insert(list: &mut Vec<Value>, mut value: Value) -> Value {
    if id_of(&value).is_none() {
        value["id"] = json!(next_id(list));
    }
    list.push(value.clone());
    value
}

/// Shallow merge: every key of `patch` replaces the stored one.
fn merge(target: &mut Value, patch: Value) {
    if let (Some(target), Value::Object(patch)) = (target.as_object_mut(), patch) {
        for (key, value) in patch {
            if key != "id" {
                target.insert(key, value);
            }
        }
    }
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{what} no encontrado") })),
    )
        .into_response()
}

impl FakeBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Add a branch; `activa` defaults to `true`. Returns its id.
    pub fn seed_branch(&self, mut branch: Value) -> i64 {
        if branch.get("activa").is_none() {
            branch["activa"] = json!(true);
        }
        let mut store = self.lock();
        id_of(&insert(&mut store.branches, branch)).unwrap_or_default()
    }

    /// Add a staff member. Returns its id.
    pub fn seed_staff(&self, staff: Value) -> i64 {
        let mut store = self.lock();
        id_of(&insert(&mut store.staff, staff)).unwrap_or_default()
    }

    /// Add a schedule. Returns its id.
    pub fn seed_schedule(&self, schedule: Value) -> i64 {
        let mut store = self.lock();
        id_of(&insert(&mut store.schedules, schedule)).unwrap_or_default()
    }

    /// Make the next POST, PUT or DELETE fail with
    /// `400 {"message": message}` without touching the store.
    pub fn reject_next_write(&self, message: &str) {
        self.lock().reject_next_write = Some(message.to_owned());
    }

    #[must_use]
    pub fn branch(&self, id: i64) -> Option<Value> {
        self.lock().branches.iter().find(|b| id_of(b) == Some(id)).cloned()
    }

    #[must_use]
    pub fn staff(&self) -> Vec<Value> {
        self.lock().staff.clone()
    }

    #[must_use]
    pub fn schedules(&self) -> Vec<Value> {
        self.lock().schedules.clone()
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests with `method` whose path starts with `path_prefix`.
    #[must_use]
    pub fn count(&self, method: &Method, path_prefix: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == *method && r.path.starts_with(path_prefix))
            .count()
    }

    /// Routes mounted under `/api`.
    pub fn router(&self) -> Router {
        let api = Router::new()
            .route("/sucursales", get(list_branches).post(create_branch))
            .route(
                "/sucursales/{id}",
                get(get_branch).put(update_branch).delete(delete_branch),
            )
            .route("/sucursales/{id}/estado", put(toggle_branch))
            .route("/personal", get(list_staff))
            .route(
                "/personal/{id}",
                get(get_staff)
                    .post(create_staff)
                    .put(update_staff)
                    .delete(delete_staff),
            )
            .route("/personal/{id}/asignar", put(assign_staff))
            .route("/personal/{id}/reasignar", put(reassign_staff))
            .route("/horarios", get(list_schedules))
            .route(
                "/horarios/{id}",
                get(get_schedule)
                    .post(create_schedule)
                    .put(update_schedule)
                    .delete(delete_schedule),
            )
            .route("/horarios/sucursal/{id}", get(schedules_by_branch));

        Router::new()
            .nest("/api", api)
            .layer(middleware::from_fn_with_state(self.clone(), record))
            .with_state(self.clone())
    }

    /// Serve on an ephemeral port and return the API base URL.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Fake backend has no address");
        let app = self.router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        format!("http://{addr}/api/")
    }
}

async fn record(State(backend): State<FakeBackend>, request: Request, next: Next) -> Response {
    let rejection = {
        let mut store = backend.lock();
        store.requests.push(RecordedRequest {
            method: request.method().clone(),
            path: request.uri().path().to_owned(),
            query: request.uri().query().map(str::to_owned),
        });
        if request.method() == Method::GET {
            None
        } else {
            store.reject_next_write.take()
        }
    };

    match rejection {
        Some(message) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
        }
        None => next.run(request).await,
    }
}

// ----------------------------------------------------------------------------
// Branches
// ----------------------------------------------------------------------------

async fn list_branches(State(backend): State<FakeBackend>) -> Json<Vec<Value>> {
    Json(backend.lock().branches.clone())
}

/// Detail embeds the branch's schedules and its staff as `personalVisible`.
async fn get_branch(State(backend): State<FakeBackend>, Path(id): Path<i64>) -> Response {
    let store = backend.lock();
    let Some(mut branch) = store.branches.iter().find(|b| id_of(b) == Some(id)).cloned() else {
        return not_found("Sucursal");
    };
    branch["horarios"] = json!(
        store
            .schedules
            .iter()
            .filter(|s| branch_of(s) == Some(id))
            .collect::<Vec<_>>()
    );
    branch["personalVisible"] = json!(
        store
            .staff
            .iter()
            .filter(|s| branch_of(s) == Some(id))
            .map(|s| json!({ "id": s["id"], "nombreCompleto": s["nombreCompleto"] }))
            .collect::<Vec<_>>()
    );
    Json(branch).into_response()
}

async fn create_branch(State(backend): State<FakeBackend>, Json(mut body): Json<Value>) -> Json<Value> {
    body["activa"] = json!(true);
    let mut store = backend.lock();
    Json(insert(&mut store.branches, body))
}

async fn update_branch(
    State(backend): State<FakeBackend>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = backend.lock();
    let Some(branch) = store.branches.iter_mut().find(|b| id_of(b) == Some(id)) else {
        return not_found("Sucursal");
    };
    merge(branch, body);
    Json(branch.clone()).into_response()
}

#[derive(Deserialize)]
struct ActiveQuery {
    activa: bool,
}

async fn toggle_branch(
    State(backend): State<FakeBackend>,
    Path(id): Path<i64>,
    Query(query): Query<ActiveQuery>,
) -> Response {
    let mut store = backend.lock();
    let Some(branch) = store.branches.iter_mut().find(|b| id_of(b) == Some(id)) else {
        return not_found("Sucursal");
    };
    branch["activa"] = json!(query.activa);
    Json(branch.clone()).into_response()
}

async fn delete_branch(State(backend): State<FakeBackend>, Path(id): Path<i64>) -> StatusCode {
    backend.lock().branches.retain(|b| id_of(b) != Some(id));
    StatusCode::NO_CONTENT
}

// ----------------------------------------------------------------------------
// Staff
// ----------------------------------------------------------------------------

async fn list_staff(State(backend): State<FakeBackend>) -> Json<Vec<Value>> {
    Json(backend.lock().staff.clone())
}

async fn get_staff(State(backend): State<FakeBackend>, Path(id): Path<i64>) -> Response {
    match backend.lock().staff.iter().find(|s| id_of(s) == Some(id)) {
        Some(staff) => Json(staff.clone()).into_response(),
        None => not_found("Personal"),
    }
}

/// `POST /personal/{sucursalId}`.
async fn create_staff(
    State(backend): State<FakeBackend>,
    Path(branch_id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Json<Value> {
    body["sucursalId"] = json!(branch_id);
    let mut store = backend.lock();
    Json(insert(&mut store.staff, body))
}

async fn update_staff(
    State(backend): State<FakeBackend>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = backend.lock();
    let Some(staff) = store.staff.iter_mut().find(|s| id_of(s) == Some(id)) else {
        return not_found("Personal");
    };
    merge(staff, body);
    Json(staff.clone()).into_response()
}

#[derive(Deserialize)]
struct AssignQuery {
    #[serde(rename = "sucursalId")]
    branch_id: i64,
}

async fn assign_staff(
    State(backend): State<FakeBackend>,
    Path(id): Path<i64>,
    Query(query): Query<AssignQuery>,
) -> Response {
    let mut store = backend.lock();
    let Some(staff) = store.staff.iter_mut().find(|s| id_of(s) == Some(id)) else {
        return not_found("Personal");
    };
    staff["sucursalId"] = json!(query.branch_id);
    Json(staff.clone()).into_response()
}

#[derive(Deserialize)]
struct ReassignQuery {
    #[serde(rename = "nuevaSucursalId")]
    branch_id: i64,
}

/// Moves the staff member and clears the corporate number.
async fn reassign_staff(
    State(backend): State<FakeBackend>,
    Path(id): Path<i64>,
    Query(query): Query<ReassignQuery>,
) -> Response {
    let mut store = backend.lock();
    let Some(staff) = store.staff.iter_mut().find(|s| id_of(s) == Some(id)) else {
        return not_found("Personal");
    };
    staff["sucursalId"] = json!(query.branch_id);
    staff["numeroCorporativo"] = Value::Null;
    Json(staff.clone()).into_response()
}

async fn delete_staff(State(backend): State<FakeBackend>, Path(id): Path<i64>) -> StatusCode {
    backend.lock().staff.retain(|s| id_of(s) != Some(id));
    StatusCode::NO_CONTENT
}

// ----------------------------------------------------------------------------
// Schedules
// ----------------------------------------------------------------------------

async fn list_schedules(State(backend): State<FakeBackend>) -> Json<Vec<Value>> {
    Json(backend.lock().schedules.clone())
}

async fn schedules_by_branch(
    State(backend): State<FakeBackend>,
    Path(branch_id): Path<i64>,
) -> Json<Vec<Value>> {
    Json(
        backend
            .lock()
            .schedules
            .iter()
            .filter(|s| branch_of(s) == Some(branch_id))
            .cloned()
            .collect(),
    )
}

async fn get_schedule(State(backend): State<FakeBackend>, Path(id): Path<i64>) -> Response {
    match backend.lock().schedules.iter().find(|s| id_of(s) == Some(id)) {
        Some(schedule) => Json(schedule.clone()).into_response(),
        None => not_found("Horario"),
    }
}

/// `POST /horarios/{sucursalId}`.
async fn create_schedule(
    State(backend): State<FakeBackend>,
    Path(branch_id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Json<Value> {
    body["sucursalId"] = json!(branch_id);
    let mut store = backend.lock();
    Json(insert(&mut store.schedules, body))
}

async fn update_schedule(
    State(backend): State<FakeBackend>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut store = backend.lock();
    let Some(schedule) = store.schedules.iter_mut().find(|s| id_of(s) == Some(id)) else {
        return not_found("Horario");
    };
    merge(schedule, body);
    Json(schedule.clone()).into_response()
}

async fn delete_schedule(State(backend): State<FakeBackend>, Path(id): Path<i64>) -> StatusCode {
    backend.lock().schedules.retain(|s| id_of(s) != Some(id));
    StatusCode::NO_CONTENT
}
