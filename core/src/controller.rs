//! Routes page events to remote calls and applies the results.
//!
//! # Design
//! The controller owns the store and the page, so there is exactly one
//! writer for each. Every remote call blocks the event that issued it and
//! the store changes only after the call has resolved. Failures are
//! returned to the caller after being logged and posted to the page's alert
//! area.

use tracing::{debug, error, info, warn};

use crate::client::TodoClient;
use crate::config::Config;
use crate::dispatch::{Handler, UiEvent};
use crate::error::AppError;
use crate::fetcher::DataFetcher;
use crate::store::StateStore;
use crate::transport::Transport;
use crate::types::{TodoDraft, TodoId, UserId};
use crate::view::PageView;

pub struct Controller<T> {
    fetcher: DataFetcher<T>,
    store: StateStore,
    view: PageView,
    revert_on_failure: bool,
}

impl<T: Transport> Controller<T> {
    pub fn new(fetcher: DataFetcher<T>) -> Self {
        Self {
            fetcher,
            store: StateStore::new(),
            view: PageView::new(),
            revert_on_failure: false,
        }
    }

    pub fn from_config(config: &Config, transport: T) -> Self {
        let fetcher = DataFetcher::new(TodoClient::new(&config.api_url), transport);
        Self::new(fetcher).with_revert_on_failure(config.revert_on_failure)
    }

    /// Restore the checkbox to the stored state when a toggle is rejected.
    pub fn with_revert_on_failure(mut self, revert: bool) -> Self {
        self.revert_on_failure = revert;
        self
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    pub fn fetcher(&self) -> &DataFetcher<T> {
        &self.fetcher
    }

    /// Loads todos and users, then renders every todo followed by every
    /// user option. A failed render stops the pass.
    pub fn startup(&mut self) -> Result<(), AppError> {
        let result = self.load_and_render();
        match &result {
            Ok(()) => info!(
                todos = self.store.todos().len(),
                users = self.store.users().len(),
                "app initialized"
            ),
            Err(err) => error!(error = %err, "an error occurred while initializing the app"),
        }
        result
    }

    fn load_and_render(&mut self) -> Result<(), AppError> {
        let (todos, users) = self.fetcher.fetch_initial()?;
        self.store.populate(todos, users);
        for todo in self.store.todos() {
            self.view.render_todo(todo, self.store.users())?;
        }
        for user in self.store.users() {
            self.view.render_user_option(user);
        }
        Ok(())
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Result<(), AppError> {
        match event {
            UiEvent::Submit { user_id, title } => self.submit(user_id, title).map(|_| ()),
            UiEvent::Change { target, checked } => {
                let binding = self.view.dispatcher().resolve(target);
                match binding {
                    Some(binding) if binding.handler == Handler::ToggleCompleted => {
                        self.toggle(binding.todo_id, checked)
                    }
                    _ => {
                        debug!(%target, "change on unbound element ignored");
                        Ok(())
                    }
                }
            }
            UiEvent::Click { target } => {
                let binding = self.view.dispatcher().resolve(target);
                match binding {
                    Some(binding) if binding.handler == Handler::DeleteTodo => self.delete(binding.todo_id),
                    _ => {
                        debug!(%target, "click on unbound element ignored");
                        Ok(())
                    }
                }
            }
        }
    }

    /// Creates a todo remotely and renders what the service returned.
    pub fn submit(&mut self, user_id: UserId, title: impl Into<String>) -> Result<TodoId, AppError> {
        let todo = self.fetcher.create_todo(&TodoDraft::new(user_id, title))?;
        let id = todo.id;
        self.view.render_todo(&todo, self.store.users())?;
        self.store.insert(todo);
        Ok(id)
    }

    /// The checkbox shows `completed` as soon as the user changes it; the
    /// store follows only once the service accepts the update. Every entry
    /// sharing the id moves together in both.
    pub fn toggle(&mut self, id: TodoId, completed: bool) -> Result<(), AppError> {
        let previous = self
            .view
            .item(id)
            .map(|item| item.checked)
            .or_else(|| self.store.todo(id).map(|todo| todo.completed));
        self.view.set_checked(id, completed);

        match self.fetcher.set_completed(id, completed) {
            Ok(()) => {
                if self.store.set_completed(id, completed) == 0 {
                    warn!(todo_id = id, "updated todo is not in the store");
                }
                Ok(())
            }
            Err(err) => {
                error!(todo_id = id, completed, error = %err, "failed to update todo");
                if let (true, Some(previous)) = (self.revert_on_failure, previous) {
                    self.view.set_checked(id, previous);
                }
                self.view.alert(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Removes every entry sharing the id from both store and page once the
    /// service accepts the delete.
    pub fn delete(&mut self, id: TodoId) -> Result<(), AppError> {
        match self.fetcher.delete_todo(id) {
            Ok(()) => {
                let stored = self.store.remove(id);
                let shown = self.view.remove_todo_view(id).len();
                debug!(todo_id = id, stored, shown, "todo removed");
                Ok(())
            }
            Err(err) => {
                error!(todo_id = id, error = %err, "failed to delete todo");
                self.view.alert(err.to_string());
                Err(err.into())
            }
        }
    }
}
