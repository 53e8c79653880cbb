//! Remote calls with the client's failure policy applied.
//!
//! List operations fail open: any transport, status or decode failure is
//! logged and becomes an empty list so startup degrades instead of stopping.
//! Mutations return their error to the caller.

use std::thread;

use tracing::{debug, error, instrument, warn};

use crate::client::TodoClient;
use crate::error::{ApiError, AppError};
use crate::transport::Transport;
use crate::types::{Todo, TodoDraft, TodoId, User};

/// Pairs the request codec with a transport.
pub struct DataFetcher<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> DataFetcher<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_todos(&self) -> Vec<Todo> {
        let result = self
            .transport
            .execute(&self.client.build_list_todos())
            .and_then(|response| self.client.parse_list_todos(response));
        match result {
            Ok(todos) => {
                debug!(count = todos.len(), "fetched todos");
                todos
            }
            Err(err) => {
                warn!(error = %err, "an error occurred while fetching todos");
                Vec::new()
            }
        }
    }

    pub fn list_users(&self) -> Vec<User> {
        let result = self
            .transport
            .execute(&self.client.build_list_users())
            .and_then(|response| self.client.parse_list_users(response));
        match result {
            Ok(users) => {
                debug!(count = users.len(), "fetched users");
                users
            }
            Err(err) => {
                warn!(error = %err, "an error occurred while fetching users");
                Vec::new()
            }
        }
    }

    /// Fetches todos and users concurrently and waits for both.
    ///
    /// Each side keeps its own fail-open fallback, so one failing never
    /// cancels the other. Only a worker that dies outright is an error.
    pub fn fetch_initial(&self) -> Result<(Vec<Todo>, Vec<User>), AppError> {
        thread::scope(|scope| -> Result<_, AppError> {
            let users = scope.spawn(|| self.list_users());
            let todos = scope.spawn(|| self.list_todos());
            let todos = todos.join().map_err(|_| AppError::Startup("todos"))?;
            let users = users.join().map_err(|_| AppError::Startup("users"))?;
            Ok((todos, users))
        })
    }

    #[instrument(skip(self, draft), fields(user_id = draft.user_id))]
    pub fn create_todo(&self, draft: &TodoDraft) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(draft)?;
        let result = self
            .transport
            .execute(&request)
            .and_then(|response| self.client.parse_create_todo(response));
        if let Err(err) = &result {
            error!(error = %err, "failed to create todo");
        }
        result
    }

    #[instrument(skip(self))]
    pub fn set_completed(&self, id: TodoId, completed: bool) -> Result<(), ApiError> {
        let request = self.client.build_set_completed(id, completed)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_set_completed(response)
    }

    #[instrument(skip(self))]
    pub fn delete_todo(&self, id: TodoId) -> Result<(), ApiError> {
        let response = self.transport.execute(&self.client.build_delete_todo(id))?;
        self.client.parse_delete_todo(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::transport::scripted::ScriptedTransport;

    const TODOS: &str = r#"[{"id":1,"userId":1,"title":"Buy milk","completed":false}]"#;
    const USERS: &str = r#"[{"id":1,"name":"Ann"}]"#;

    fn fetcher(transport: ScriptedTransport) -> DataFetcher<ScriptedTransport> {
        DataFetcher::new(TodoClient::new("http://api.test"), transport)
    }

    #[test]
    fn list_todos_fails_open_on_transport_error() {
        let f = fetcher(ScriptedTransport::new().fail(HttpMethod::Get, "/todos", "connection refused"));
        assert!(f.list_todos().is_empty());
    }

    #[test]
    fn list_users_fails_open_on_bad_body() {
        let f = fetcher(ScriptedTransport::new().reply(HttpMethod::Get, "/users", 200, "<html>"));
        assert!(f.list_users().is_empty());
    }

    #[test]
    fn fetch_initial_issues_both_requests() {
        let f = fetcher(
            ScriptedTransport::new()
                .reply(HttpMethod::Get, "/todos", 200, TODOS)
                .reply(HttpMethod::Get, "/users", 200, USERS),
        );
        let (todos, users) = f.fetch_initial().unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(users[0].name, "Ann");
        assert_eq!(f.transport().requests().len(), 2);
    }

    #[test]
    fn fetch_initial_keeps_users_when_todos_fail() {
        let f = fetcher(
            ScriptedTransport::new()
                .reply(HttpMethod::Get, "/todos", 500, "oops")
                .reply(HttpMethod::Get, "/users", 200, USERS),
        );
        let (todos, users) = f.fetch_initial().unwrap();
        assert!(todos.is_empty());
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn fetch_initial_reports_dead_worker() {
        let f = fetcher(
            ScriptedTransport::new()
                .reply(HttpMethod::Get, "/todos", 200, TODOS)
                .panic_on(HttpMethod::Get, "/users"),
        );
        let err = f.fetch_initial().unwrap_err();
        assert!(matches!(err, AppError::Startup("users")));
        assert_eq!(err.to_string(), "startup fetch of users aborted");
    }

    #[test]
    fn create_todo_returns_no_record_on_failure() {
        let f = fetcher(ScriptedTransport::new().reply(HttpMethod::Post, "/todos", 500, "nope"));
        let err = f.create_todo(&TodoDraft::new(1, "Walk dog")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn set_completed_signals_server_error() {
        let f = fetcher(ScriptedTransport::new().reply(HttpMethod::Patch, "/todos/3", 500, ""));
        let err = f.set_completed(3, true).unwrap_err();
        assert_eq!(err.to_string(), "server error");
    }

    #[test]
    fn delete_todo_propagates_transport_error() {
        let f = fetcher(ScriptedTransport::new().fail(HttpMethod::Delete, "/todos/3", "reset"));
        let err = f.delete_todo(3).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
