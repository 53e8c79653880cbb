//! Element-to-handler bindings for rendered items.
//!
//! Rendering an item acquires one binding per interactive element and
//! removing the item releases them. An event aimed at an element with no
//! binding has nowhere to go and is dropped by the controller.

use std::collections::HashMap;
use std::fmt;

use crate::types::{TodoId, UserId};

/// Identifies an interactive element of the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el-{}", self.0)
    }
}

/// What an element does when the user interacts with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Checkbox change: set the todo's completion flag.
    ToggleCompleted,
    /// Close click: delete the todo.
    DeleteTodo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub todo_id: TodoId,
    pub handler: Handler,
}

/// A user-initiated event as the page reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The form was submitted with the selected user and typed title.
    Submit { user_id: UserId, title: String },
    /// A checkbox changed; `checked` is its new state.
    Change { target: ElementId, checked: bool },
    /// A close control was clicked.
    Click { target: ElementId },
}

#[derive(Debug, Default)]
pub struct Dispatcher {
    next_id: u64,
    bindings: HashMap<ElementId, Binding>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, todo_id: TodoId, handler: Handler) -> ElementId {
        self.next_id += 1;
        let element = ElementId(self.next_id);
        self.bindings.insert(element, Binding { todo_id, handler });
        element
    }

    pub fn unbind(&mut self, element: ElementId) -> Option<Binding> {
        self.bindings.remove(&element)
    }

    pub fn resolve(&self, element: ElementId) -> Option<Binding> {
        self.bindings.get(&element).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
