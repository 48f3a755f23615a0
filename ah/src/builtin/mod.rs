//! Built-in action handlers
//!
//! In-memory implementations of the calendar, notes, todo, and clock
//! actions. State lives behind `tokio::sync::Mutex` and is scoped to the
//! registry instance; durable storage is deliberately out of scope here.

mod calendar;
mod clock;
mod notes;
mod todo;

pub use calendar::{CalendarStore, CreateEventHandler, Event, GetEventsHandler};
pub use clock::{GetDateHandler, GetDayHandler, GetTimeHandler};
pub use notes::{
    CreateNoteHandler, DeleteNoteHandler, EditNoteHandler, ListNotesHandler, NoteStore, ReadNoteHandler,
};
pub use todo::{AddTodoHandler, ClearTodoHandler, RemoveTodoItemHandler, ShowTodoHandler, TodoStore};

use crate::registry::ActionRegistry;

/// Assemble a registry with the full built-in catalog
pub fn builtin_registry() -> ActionRegistry {
    let calendar = CalendarStore::default();
    let notes = NoteStore::default();
    let todos = TodoStore::default();

    let mut registry = ActionRegistry::new();

    registry.register(Box::new(CreateEventHandler::new(calendar.clone())));
    registry.register(Box::new(GetEventsHandler::new(calendar)));

    registry.register(Box::new(CreateNoteHandler::new(notes.clone())));
    registry.register(Box::new(ReadNoteHandler::new(notes.clone())));
    registry.register(Box::new(EditNoteHandler::new(notes.clone())));
    registry.register(Box::new(DeleteNoteHandler::new(notes.clone())));
    registry.register(Box::new(ListNotesHandler::new(notes)));

    registry.register(Box::new(AddTodoHandler::new(todos.clone())));
    registry.register(Box::new(ShowTodoHandler::new(todos.clone())));
    registry.register(Box::new(ClearTodoHandler::new(todos.clone())));
    registry.register(Box::new(RemoveTodoItemHandler::new(todos)));

    registry.register(Box::new(GetTimeHandler));
    registry.register(Box::new(GetDateHandler));
    registry.register(Box::new(GetDayHandler));

    registry
}
