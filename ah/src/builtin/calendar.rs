//! Calendar actions

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::gateway::{ActionError, Arguments, optional_str, require_str};
use crate::registry::ActionHandler;

/// One calendar entry
#[derive(Debug, Clone)]
pub struct Event {
    pub title: String,
    pub start_time: String,
    pub date: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
}

/// Shared in-memory event list
#[derive(Debug, Clone, Default)]
pub struct CalendarStore {
    events: Arc<Mutex<Vec<Event>>>,
}

impl CalendarStore {
    /// Seed the store with events (used by tests and demos)
    pub async fn add(&self, event: Event) {
        self.events.lock().await.push(event);
    }

    pub async fn len(&self) -> usize {
        self.events.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.lock().await.is_empty()
    }
}

/// Create a new calendar event
pub struct CreateEventHandler {
    store: CalendarStore,
}

impl CreateEventHandler {
    pub fn new(store: CalendarStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for CreateEventHandler {
    fn name(&self) -> &'static str {
        "create_event"
    }

    fn description(&self) -> &'static str {
        "Create a new calendar event with a specific title and start time. \
         Optionally include duration, description, location, or date."
    }

    fn required_args(&self) -> &'static [&'static str] {
        &["title", "start_time"]
    }

    fn optional_args(&self) -> &'static [&'static str] {
        &["duration", "description", "location", "date"]
    }

    async fn execute(&self, arguments: &Arguments) -> Result<String, ActionError> {
        let title = require_str(self.name(), arguments, "title")?;
        let start_time = require_str(self.name(), arguments, "start_time")?;

        let event = Event {
            title: title.to_string(),
            start_time: start_time.to_string(),
            date: optional_str(arguments, "date").map(String::from),
            duration: optional_str(arguments, "duration").map(String::from),
            location: optional_str(arguments, "location").map(String::from),
        };

        let mut summary = format!("Created event '{}' at {}", event.title, event.start_time);
        if let Some(date) = &event.date {
            summary.push_str(&format!(" on {}", date));
        }
        summary.push('.');

        self.store.events.lock().await.push(event);
        Ok(summary)
    }
}

/// List calendar events
pub struct GetEventsHandler {
    store: CalendarStore,
}

impl GetEventsHandler {
    pub fn new(store: CalendarStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for GetEventsHandler {
    fn name(&self) -> &'static str {
        "get_events"
    }

    fn description(&self) -> &'static str {
        "Show the user's calendar events, optionally filtered by date, \
         upcoming only, or a limit on the number of events."
    }

    fn optional_args(&self) -> &'static [&'static str] {
        &["date", "upcoming_only", "limit"]
    }

    async fn execute(&self, arguments: &Arguments) -> Result<String, ActionError> {
        let events = self.store.events.lock().await;

        let date_filter = optional_str(arguments, "date");
        let mut matching: Vec<&Event> = events
            .iter()
            .filter(|e| match date_filter {
                Some(date) => e.date.as_deref() == Some(date),
                None => true,
            })
            .collect();

        if let Some(limit) = arguments.get("limit") {
            let limit = limit
                .as_u64()
                .or_else(|| limit.as_str().and_then(|s| s.parse().ok()))
                .ok_or_else(|| ActionError::InvalidArgument {
                    action: self.name().to_string(),
                    arg: "limit".to_string(),
                    reason: "expected a number".to_string(),
                })?;
            matching.truncate(limit as usize);
        }

        if matching.is_empty() {
            return Ok("No events scheduled.".to_string());
        }

        let listing = matching
            .iter()
            .map(|e| match &e.date {
                Some(date) => format!("{} at {} on {}", e.title, e.start_time, date),
                None => format!("{} at {}", e.title, e.start_time),
            })
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("You have {} event(s): {}.", matching.len(), listing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(pairs: &[(&str, serde_json::Value)]) -> Arguments {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[tokio::test]
    async fn test_create_event() {
        let store = CalendarStore::default();
        let handler = CreateEventHandler::new(store.clone());

        let result = handler
            .execute(&args(&[("title", json!("dinner")), ("start_time", json!("7:00 PM"))]))
            .await
            .unwrap();

        assert!(result.contains("dinner"));
        assert!(result.contains("7:00 PM"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_events_empty() {
        let handler = GetEventsHandler::new(CalendarStore::default());
        let result = handler.execute(&Arguments::new()).await.unwrap();
        assert_eq!(result, "No events scheduled.");
    }

    #[tokio::test]
    async fn test_get_events_with_date_filter() {
        let store = CalendarStore::default();
        store
            .add(Event {
                title: "Gym".to_string(),
                start_time: "8:00 PM".to_string(),
                date: Some("today".to_string()),
                duration: None,
                location: None,
            })
            .await;
        store
            .add(Event {
                title: "Dentist".to_string(),
                start_time: "9:00 AM".to_string(),
                date: Some("tomorrow".to_string()),
                duration: None,
                location: None,
            })
            .await;

        let handler = GetEventsHandler::new(store);
        let result = handler.execute(&args(&[("date", json!("today"))])).await.unwrap();

        assert!(result.contains("Gym"));
        assert!(!result.contains("Dentist"));
    }

    #[tokio::test]
    async fn test_get_events_limit() {
        let store = CalendarStore::default();
        for i in 0..5 {
            store
                .add(Event {
                    title: format!("Event {i}"),
                    start_time: "noon".to_string(),
                    date: None,
                    duration: None,
                    location: None,
                })
                .await;
        }

        let handler = GetEventsHandler::new(store);
        let result = handler.execute(&args(&[("limit", json!(2))])).await.unwrap();
        assert!(result.contains("2 event(s)"));
    }
}
