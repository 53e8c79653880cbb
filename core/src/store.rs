//! Session-local copy of the remote todos and users.

use crate::types::{Todo, TodoId, User, UserId};

/// In-memory state for one session.
///
/// `users` is written once by [`StateStore::populate`] and never touched
/// again; `todos` follows create/toggle/delete as they succeed remotely.
/// Updates and removals apply to every entry with the id, since the service
/// may assign one id to several creates.
#[derive(Debug, Default, Clone)]
pub struct StateStore {
    todos: Vec<Todo>,
    users: Vec<User>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn populate(&mut self, todos: Vec<Todo>, users: Vec<User>) {
        self.todos = todos;
        self.users = users;
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.todo(id).is_some()
    }

    /// First user with a matching id.
    pub fn user_name(&self, user_id: UserId) -> Option<&str> {
        self.users
            .iter()
            .find(|user| user.id == user_id)
            .map(|user| user.name.as_str())
    }

    pub fn insert(&mut self, todo: Todo) {
        self.todos.push(todo);
    }

    /// Returns how many todos carry this id.
    pub fn set_completed(&mut self, id: TodoId, completed: bool) -> usize {
        let mut count = 0;
        for todo in self.todos.iter_mut().filter(|todo| todo.id == id) {
            todo.completed = completed;
            count += 1;
        }
        count
    }

    /// Drops every todo with this id and reports how many were removed.
    pub fn remove(&mut self, id: TodoId) -> usize {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        before - self.todos.len()
    }
}
