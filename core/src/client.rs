//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Any 2xx status is accepted; the public service answers creates with 201
//! and patches/deletes with 200, while other deployments answer deletes
//! with 204.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CompletionPatch, Todo, TodoDraft, TodoId, User};

/// Synchronous, stateless client for the todo/user API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/todos")
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/users")
    }

    pub fn build_get_todo(&self, id: TodoId) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/todos/{id}"))
    }

    pub fn build_create_todo(&self, draft: &TodoDraft) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/todos", draft)
    }

    pub fn build_set_completed(&self, id: TodoId, completed: bool) -> Result<HttpRequest, ApiError> {
        self.json_request(
            HttpMethod::Patch,
            &format!("/todos/{id}"),
            &CompletionPatch { completed },
        )
    }

    pub fn build_delete_todo(&self, id: TodoId) -> HttpRequest {
        let mut req = self.request(HttpMethod::Delete, &format!("/todos/{id}"));
        req.headers.push(json_content_type());
        req
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    /// The body of a successful patch is not needed; only the status counts.
    pub fn parse_set_completed(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_mutation(&response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_mutation(&response)
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut req = self.request(method, path);
        req.headers.push(json_content_type());
        req.body = Some(body);
        Ok(req)
    }
}

fn json_content_type() -> (String, String) {
    ("content-type".to_string(), "application/json".to_string())
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Patches and deletes report every rejection the same way.
fn check_mutation(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(ApiError::Server {
            status: response.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_requests() {
        let todos = client().build_list_todos();
        assert_eq!(todos.method, HttpMethod::Get);
        assert_eq!(todos.path, "http://localhost:3000/todos");
        assert!(todos.body.is_none());
        assert!(todos.headers.is_empty());

        let users = client().build_list_users();
        assert_eq!(users.method, HttpMethod::Get);
        assert_eq!(users.path, "http://localhost:3000/users");
    }

    #[test]
    fn build_create_todo_produces_correct_request() {
        let req = client().build_create_todo(&TodoDraft::new(1, "Walk dog")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert_eq!(req.headers, vec![json_content_type()]);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"userId": 1, "title": "Walk dog", "completed": false})
        );
    }

    #[test]
    fn build_set_completed_sends_only_the_flag() {
        let req = client().build_set_completed(5, true).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, "http://localhost:3000/todos/5");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"completed": true}));
    }

    #[test]
    fn build_delete_todo_has_no_body() {
        let req = client().build_delete_todo(5);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/todos/5");
        assert_eq!(req.headers, vec![json_content_type()]);
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_todos_success() {
        let todos = client()
            .parse_list_todos(response(
                200,
                r#"[{"userId":1,"id":1,"title":"delectus aut autem","completed":false}]"#,
            ))
            .unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].user_id, 1);
        assert_eq!(todos[0].title, "delectus aut autem");
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client().parse_list_todos(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_list_users_rejects_server_error() {
        let err = client().parse_list_users(response(503, "down")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 503, .. }));
    }

    #[test]
    fn parse_get_todo_not_found() {
        let err = client().parse_get_todo(response(404, "{}")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_todo_accepts_201() {
        let todo = client()
            .parse_create_todo(response(
                201,
                r#"{"userId":1,"title":"Walk dog","completed":false,"id":201}"#,
            ))
            .unwrap();
        assert_eq!(todo.id, 201);
        assert_eq!(todo.title, "Walk dog");
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client().parse_create_todo(response(500, "internal error")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_mutations_accept_any_2xx() {
        assert!(client().parse_set_completed(response(200, "{}")).is_ok());
        assert!(client().parse_delete_todo(response(200, "{}")).is_ok());
        assert!(client().parse_delete_todo(response(204, "")).is_ok());
    }

    #[test]
    fn parse_mutation_failure_has_fixed_message() {
        let err = client().parse_set_completed(response(500, "boom")).unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500 }));
        assert_eq!(err.to_string(), "server error");

        let err = client().parse_delete_todo(response(404, "")).unwrap_err();
        assert_eq!(err.to_string(), "server error");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("https://jsonplaceholder.typicode.com/");
        let req = client.build_list_users();
        assert_eq!(req.path, "https://jsonplaceholder.typicode.com/users");
    }
}
