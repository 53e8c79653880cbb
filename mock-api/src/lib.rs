//! In-memory stand-in for the todo/user service.
//!
//! Serves the same JSON shapes as the public placeholder API: integer ids,
//! camelCase `userId`, users with extra profile fields. Ids for new todos are
//! assigned sequentially after the highest seeded id.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub completed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub user_id: u64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub completed: Option<bool>,
}

/// Initial contents of the service.
#[derive(Clone, Debug, Default)]
pub struct Seed {
    pub users: Vec<User>,
    pub todos: Vec<Todo>,
}

impl Seed {
    /// Two users and a few todos, enough to click around in.
    pub fn sample() -> Self {
        let user = |id: u64, name: &str, username: &str| User {
            id,
            name: name.to_string(),
            username: username.to_string(),
            email: format!("{}@example.com", username.to_lowercase()),
        };
        let todo = |id: u64, user_id: u64, title: &str, completed: bool| Todo {
            id,
            user_id,
            title: title.to_string(),
            completed,
        };
        Seed {
            users: vec![user(1, "Ann Lee", "ann"), user(2, "Bob Stone", "bob")],
            todos: vec![
                todo(1, 1, "Buy milk", false),
                todo(2, 1, "Pay rent", true),
                todo(3, 2, "Fix bike", false),
            ],
        }
    }
}

#[derive(Debug)]
pub struct Store {
    todos: BTreeMap<u64, Todo>,
    users: Vec<User>,
    next_id: u64,
}

impl From<Seed> for Store {
    fn from(seed: Seed) -> Self {
        let next_id = seed.todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Store {
            todos: seed.todos.into_iter().map(|t| (t.id, t)).collect(),
            users: seed.users,
            next_id,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Seed::sample())
}

pub fn app_with(seed: Seed) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::from(seed)));
    Router::new()
        .route("/users", get(list_users))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).patch(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, seed: Seed) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(seed)).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    Json(db.read().await.users.clone())
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.values().cloned().collect())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let mut store = db.write().await;
    let todo = Todo {
        id: store.next_id,
        user_id: input.user_id,
        title: input.title,
        completed: input.completed,
    };
    store.next_id += 1;
    store.todos.insert(todo.id, todo.clone());
    info!(id = todo.id, user_id = todo.user_id, "todo created");
    (StatusCode::CREATED, Json(todo))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Todo>, StatusCode> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    debug!(id, completed = todo.completed, "todo updated");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let removed = store.todos.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    info!(id = removed.id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
