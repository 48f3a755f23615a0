//! Notes actions
//!
//! Notes are identified by title, matched case-insensitively.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::gateway::{ActionError, Arguments, require_str};
use crate::registry::ActionHandler;

#[derive(Debug, Clone)]
struct Note {
    title: String,
    content: String,
}

/// Shared in-memory note collection
#[derive(Debug, Clone, Default)]
pub struct NoteStore {
    notes: Arc<Mutex<Vec<Note>>>,
}

impl NoteStore {
    /// Seed the store with a note (used by tests and demos)
    pub async fn add(&self, title: impl Into<String>, content: impl Into<String>) {
        self.notes.lock().await.push(Note {
            title: title.into(),
            content: content.into(),
        });
    }

    pub async fn len(&self) -> usize {
        self.notes.lock().await.len()
    }
}

fn find_note(notes: &[Note], title: &str) -> Option<usize> {
    notes.iter().position(|n| n.title.eq_ignore_ascii_case(title))
}

/// Create a new note
pub struct CreateNoteHandler {
    store: NoteStore,
}

impl CreateNoteHandler {
    pub fn new(store: NoteStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for CreateNoteHandler {
    fn name(&self) -> &'static str {
        "create_note"
    }

    fn description(&self) -> &'static str {
        "Create a new note with a specific title and content. Notes are for \
         storing information, ideas, or reminders that are not part of your todo list."
    }

    fn required_args(&self) -> &'static [&'static str] {
        &["title", "content"]
    }

    async fn execute(&self, arguments: &Arguments) -> Result<String, ActionError> {
        let title = require_str(self.name(), arguments, "title")?;
        let content = require_str(self.name(), arguments, "content")?;

        let mut notes = self.store.notes.lock().await;
        if find_note(&notes, title).is_some() {
            return Err(ActionError::Handler(format!("A note titled '{}' already exists", title)));
        }

        notes.push(Note {
            title: title.to_string(),
            content: content.to_string(),
        });
        Ok(format!("Created note '{}'.", title))
    }
}

/// Read a note's content by title
pub struct ReadNoteHandler {
    store: NoteStore,
}

impl ReadNoteHandler {
    pub fn new(store: NoteStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for ReadNoteHandler {
    fn name(&self) -> &'static str {
        "read_note"
    }

    fn description(&self) -> &'static str {
        "Display the content of a specific note by its title."
    }

    fn required_args(&self) -> &'static [&'static str] {
        &["title"]
    }

    async fn execute(&self, arguments: &Arguments) -> Result<String, ActionError> {
        let title = require_str(self.name(), arguments, "title")?;
        let notes = self.store.notes.lock().await;

        match find_note(&notes, title) {
            Some(idx) => Ok(notes[idx].content.clone()),
            None => Err(ActionError::Handler(format!("No note titled '{}'", title))),
        }
    }
}

/// Replace a note's content
pub struct EditNoteHandler {
    store: NoteStore,
}

impl EditNoteHandler {
    pub fn new(store: NoteStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for EditNoteHandler {
    fn name(&self) -> &'static str {
        "edit_note"
    }

    fn description(&self) -> &'static str {
        "Edit the content of an existing personal note, identified by its \
         title. Notes are for information, not tasks."
    }

    fn required_args(&self) -> &'static [&'static str] {
        &["title", "content"]
    }

    async fn execute(&self, arguments: &Arguments) -> Result<String, ActionError> {
        let title = require_str(self.name(), arguments, "title")?;
        let content = require_str(self.name(), arguments, "content")?;

        let mut notes = self.store.notes.lock().await;
        match find_note(&notes, title) {
            Some(idx) => {
                notes[idx].content = content.to_string();
                Ok(format!("Updated note '{}'.", title))
            }
            None => Err(ActionError::Handler(format!("No note titled '{}'", title))),
        }
    }
}

/// Delete a note by title
pub struct DeleteNoteHandler {
    store: NoteStore,
}

impl DeleteNoteHandler {
    pub fn new(store: NoteStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for DeleteNoteHandler {
    fn name(&self) -> &'static str {
        "delete_note"
    }

    fn description(&self) -> &'static str {
        "Delete a personal note from your collection, identified by its \
         title. Notes are not your todo list."
    }

    fn required_args(&self) -> &'static [&'static str] {
        &["title"]
    }

    async fn execute(&self, arguments: &Arguments) -> Result<String, ActionError> {
        let title = require_str(self.name(), arguments, "title")?;

        let mut notes = self.store.notes.lock().await;
        match find_note(&notes, title) {
            Some(idx) => {
                notes.remove(idx);
                Ok(format!("Deleted note '{}'.", title))
            }
            None => Err(ActionError::Handler(format!("No note titled '{}'", title))),
        }
    }
}

/// List note titles as a numbered list
pub struct ListNotesHandler {
    store: NoteStore,
}

impl ListNotesHandler {
    pub fn new(store: NoteStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for ListNotesHandler {
    fn name(&self) -> &'static str {
        "list_notes"
    }

    fn description(&self) -> &'static str {
        "List all personal notes you have created. Returns a numbered list \
         of note titles, not their content."
    }

    async fn execute(&self, _arguments: &Arguments) -> Result<String, ActionError> {
        let notes = self.store.notes.lock().await;
        if notes.is_empty() {
            return Ok("You have no notes.".to_string());
        }

        let listing = notes
            .iter()
            .enumerate()
            .map(|(i, n)| format!("{}. {}", i + 1, n.title))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(pairs: &[(&str, &str)]) -> Arguments {
        pairs.iter().map(|(k, v)| (k.to_string(), json!(v))).collect()
    }

    #[tokio::test]
    async fn test_note_lifecycle() {
        let store = NoteStore::default();

        let create = CreateNoteHandler::new(store.clone());
        create
            .execute(&args(&[("title", "homework"), ("content", "math chapter 3")]))
            .await
            .unwrap();

        let read = ReadNoteHandler::new(store.clone());
        let content = read.execute(&args(&[("title", "homework")])).await.unwrap();
        assert_eq!(content, "math chapter 3");

        let edit = EditNoteHandler::new(store.clone());
        edit.execute(&args(&[("title", "homework"), ("content", "physics lab")]))
            .await
            .unwrap();
        let content = read.execute(&args(&[("title", "homework")])).await.unwrap();
        assert_eq!(content, "physics lab");

        let delete = DeleteNoteHandler::new(store.clone());
        delete.execute(&args(&[("title", "homework")])).await.unwrap();
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_read_note_title_case_insensitive() {
        let store = NoteStore::default();
        store.add("Homework", "math").await;

        let read = ReadNoteHandler::new(store);
        let content = read.execute(&args(&[("title", "homework")])).await.unwrap();
        assert_eq!(content, "math");
    }

    #[tokio::test]
    async fn test_create_duplicate_note_fails() {
        let store = NoteStore::default();
        store.add("homework", "math").await;

        let create = CreateNoteHandler::new(store);
        let err = create
            .execute(&args(&[("title", "homework"), ("content", "other")]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_list_notes_numbered() {
        let store = NoteStore::default();
        store.add("homework", "math").await;
        store.add("club things", "bring snacks").await;

        let list = ListNotesHandler::new(store);
        let listing = list.execute(&Arguments::new()).await.unwrap();
        assert_eq!(listing, "1. homework\n2. club things");
    }

    #[tokio::test]
    async fn test_read_missing_note() {
        let read = ReadNoteHandler::new(NoteStore::default());
        let err = read.execute(&args(&[("title", "nope")])).await.unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
