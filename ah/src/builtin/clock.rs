//! Clock actions

use async_trait::async_trait;
use chrono::Local;

use crate::gateway::{ActionError, Arguments};
use crate::registry::ActionHandler;

/// Tell the current time
pub struct GetTimeHandler;

#[async_trait]
impl ActionHandler for GetTimeHandler {
    fn name(&self) -> &'static str {
        "get_time"
    }

    fn description(&self) -> &'static str {
        "Tell the user the current time."
    }

    async fn execute(&self, _arguments: &Arguments) -> Result<String, ActionError> {
        Ok(format!("It's {}.", Local::now().format("%-I:%M %p")))
    }
}

/// Tell today's date
pub struct GetDateHandler;

#[async_trait]
impl ActionHandler for GetDateHandler {
    fn name(&self) -> &'static str {
        "get_date"
    }

    fn description(&self) -> &'static str {
        "Tell the user today's date."
    }

    async fn execute(&self, _arguments: &Arguments) -> Result<String, ActionError> {
        Ok(format!("Today is {}.", Local::now().format("%B %-d, %Y")))
    }
}

/// Tell the day of the week
pub struct GetDayHandler;

#[async_trait]
impl ActionHandler for GetDayHandler {
    fn name(&self) -> &'static str {
        "get_day"
    }

    fn description(&self) -> &'static str {
        "Tell the user the current day of the week."
    }

    async fn execute(&self, _arguments: &Arguments) -> Result<String, ActionError> {
        Ok(format!("It's {}.", Local::now().format("%A")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_time_format() {
        let result = GetTimeHandler.execute(&Arguments::new()).await.unwrap();
        assert!(result.starts_with("It's "));
        assert!(result.contains('M')); // AM or PM
    }

    #[tokio::test]
    async fn test_get_date_format() {
        let result = GetDateHandler.execute(&Arguments::new()).await.unwrap();
        assert!(result.starts_with("Today is "));
        assert!(result.ends_with('.'));
    }

    #[tokio::test]
    async fn test_get_day_names_a_weekday() {
        let result = GetDayHandler.execute(&Arguments::new()).await.unwrap();
        let is_weekday = [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ]
        .iter()
        .any(|d| result.contains(d));
        assert!(is_weekday);
    }
}
