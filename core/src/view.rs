//! DOM-equivalent page model.
//!
//! # Design
//! The page is plain data: a user select, a list of todo items kept
//! most-recent-first, and an alert area. Interactive elements get their ids
//! from the [`Dispatcher`], so the page is the only owner of handler
//! bindings and removing an item is what releases them. `to_html` renders
//! the same structure a browser would show.
//!
//! Items are addressed by todo id. The service may hand out the same id
//! twice, so removal and check-state changes apply to every item carrying
//! the id, the same rule the store follows.

use std::collections::VecDeque;

use crate::dispatch::{Dispatcher, ElementId, Handler};
use crate::error::ViewError;
use crate::types::{Todo, TodoId, User, UserId};

/// One rendered list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItemView {
    pub todo_id: TodoId,
    pub title: String,
    pub owner: String,
    pub checked: bool,
    pub checkbox: ElementId,
    pub close: ElementId,
}

impl TodoItemView {
    /// The item's text content, e.g. `Buy milk by Ann`.
    pub fn label(&self) -> String {
        format!("{} by {}", self.title, self.owner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOption {
    pub value: UserId,
    pub label: String,
}

#[derive(Debug, Default)]
pub struct PageView {
    items: VecDeque<TodoItemView>,
    user_options: Vec<UserOption>,
    alerts: Vec<String>,
    dispatcher: Dispatcher,
}

impl PageView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `todo` at the front of the list, owned by the first user
    /// whose id matches.
    pub fn render_todo(&mut self, todo: &Todo, users: &[User]) -> Result<&TodoItemView, ViewError> {
        let owner = users
            .iter()
            .find(|user| user.id == todo.user_id)
            .ok_or(ViewError::UnknownUser {
                todo_id: todo.id,
                user_id: todo.user_id,
            })?;

        let item = TodoItemView {
            todo_id: todo.id,
            title: todo.title.clone(),
            owner: owner.name.clone(),
            checked: todo.completed,
            checkbox: self.dispatcher.bind(todo.id, Handler::ToggleCompleted),
            close: self.dispatcher.bind(todo.id, Handler::DeleteTodo),
        };
        self.items.push_front(item);
        Ok(&self.items[0])
    }

    /// Detaches every item tagged `id` and releases their bindings.
    pub fn remove_todo_view(&mut self, id: TodoId) -> Vec<TodoItemView> {
        let (removed, kept): (Vec<_>, Vec<_>) =
            self.items.drain(..).partition(|item| item.todo_id == id);
        self.items = kept.into();
        for item in &removed {
            self.dispatcher.unbind(item.checkbox);
            self.dispatcher.unbind(item.close);
        }
        removed
    }

    pub fn render_user_option(&mut self, user: &User) {
        self.user_options.push(UserOption {
            value: user.id,
            label: user.name.clone(),
        });
    }

    /// Sets the checkbox of every item tagged `id`; returns how many changed.
    pub fn set_checked(&mut self, id: TodoId, checked: bool) -> usize {
        let mut count = 0;
        for item in self.items.iter_mut().filter(|item| item.todo_id == id) {
            item.checked = checked;
            count += 1;
        }
        count
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn item(&self, id: TodoId) -> Option<&TodoItemView> {
        self.items.iter().find(|item| item.todo_id == id)
    }

    pub fn items(&self) -> impl Iterator<Item = &TodoItemView> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn user_options(&self) -> &[UserOption] {
        &self.user_options
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<form>\n  <select name=\"user\" id=\"user-todo\">\n");
        for option in &self.user_options {
            html.push_str(&format!(
                "    <option value=\"{}\">{}</option>\n",
                option.value,
                escape(&option.label)
            ));
        }
        html.push_str("  </select>\n  <input type=\"text\" name=\"todo\">\n  <button type=\"submit\">Add</button>\n</form>\n");

        for alert in &self.alerts {
            html.push_str(&format!("<p class=\"alert\">{}</p>\n", escape(alert)));
        }

        html.push_str("<ul id=\"todo-list\">\n");
        for item in &self.items {
            html.push_str(&format!(
                "  <li class=\"todo-item\" data-id=\"{}\"><input type=\"checkbox\"{}><span>{} <i>by</i> <b>{}</b></span><span class=\"close\">&times;</span></li>\n",
                item.todo_id,
                if item.checked { " checked" } else { "" },
                escape(&item.title),
                escape(&item.owner),
            ));
        }
        html.push_str("</ul>\n");
        html
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
