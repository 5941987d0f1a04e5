// src/core/types/task.rs

//! Task records and the query vector used for best-match lookups.

use super::ancestry::Ancestry;
use super::dimension::Coordinates;
use crate::core::common::TaskTreeError;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TaskId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A task owned by one user, optionally stamped with its position in that
/// user's index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub user: String,
    pub time: f64,
    pub mood: f64,
    pub energy: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Root-to-node id path; `None` until the index builder has run.
    #[serde(default)]
    pub ancestry: Option<Ancestry>,
}

impl Task {
    pub fn is_stamped(&self) -> bool {
        self.ancestry.is_some()
    }
}

impl Coordinates for Task {
    fn time(&self) -> f64 {
        self.time
    }
    fn mood(&self) -> f64 {
        self.mood
    }
    fn energy(&self) -> f64 {
        self.energy
    }
    fn latitude(&self) -> f64 {
        self.latitude
    }
    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A submitted task that has no id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub user: String,
    pub time: f64,
    pub mood: f64,
    pub energy: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewTask {
    /// Rejects an empty owner and any non-finite attribute.
    ///
    /// # Errors
    ///
    /// Returns `TaskTreeError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<(), TaskTreeError> {
        if self.user.trim().is_empty() {
            return Err(TaskTreeError::invalid_input("user must not be empty"));
        }
        ensure_finite(&[
            ("time", self.time),
            ("mood", self.mood),
            ("energy", self.energy),
            ("latitude", self.latitude),
            ("longitude", self.longitude),
        ])
    }

    /// Attaches a store-assigned id. The result is unstamped.
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            user: self.user,
            time: self.time,
            mood: self.mood,
            energy: self.energy,
            latitude: self.latitude,
            longitude: self.longitude,
            ancestry: None,
        }
    }
}

/// Target context for a best-match lookup.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskQuery {
    pub time: f64,
    pub mood: f64,
    pub energy: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl TaskQuery {
    /// Rejects any non-finite attribute.
    ///
    /// # Errors
    ///
    /// Returns `TaskTreeError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<(), TaskTreeError> {
        ensure_finite(&[
            ("time", self.time),
            ("mood", self.mood),
            ("energy", self.energy),
            ("latitude", self.latitude),
            ("longitude", self.longitude),
        ])
    }
}

fn ensure_finite(fields: &[(&str, f64)]) -> Result<(), TaskTreeError> {
    match fields.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, value)) => Err(TaskTreeError::invalid_input(format!(
            "{name} must be a finite number, got {value}"
        ))),
        None => Ok(()),
    }
}

impl Coordinates for TaskQuery {
    fn time(&self) -> f64 {
        self.time
    }
    fn mood(&self) -> f64 {
        self.mood
    }
    fn energy(&self) -> f64 {
        self.energy
    }
    fn latitude(&self) -> f64 {
        self.latitude
    }
    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Parses a time-of-day value.
///
/// Plain numbers are taken as-is. `HH:MM` and `HH:MM:SS` are converted to
/// minutes since midnight.
///
/// # Errors
///
/// Returns `TaskTreeError::InvalidInput` if the text is neither form.
pub fn parse_time_of_day(text: &str) -> Result<f64, TaskTreeError> {
    let text = text.trim();
    if let Ok(value) = text.parse::<f64>() {
        if value.is_finite() {
            return Ok(value);
        }
    }
    let parsed = NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .map_err(|e| TaskTreeError::invalid_input(format!("invalid time of day '{text}': {e}")))?;
    Ok(f64::from(parsed.num_seconds_from_midnight()) / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task() -> NewTask {
        NewTask {
            user: "alice".to_string(),
            time: 540.0,
            mood: 3.0,
            energy: 4.0,
            latitude: 51.5,
            longitude: -0.12,
        }
    }

    #[test]
    fn test_validate_accepts_finite_values() {
        assert!(new_task().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nan_and_empty_user() {
        let mut task = new_task();
        task.energy = f64::NAN;
        let err = task.validate().unwrap_err();
        assert!(err.to_string().contains("energy"));

        let mut task = new_task();
        task.user = "  ".to_string();
        assert!(matches!(task.validate(), Err(TaskTreeError::InvalidInput(_))));
    }

    #[test]
    fn test_query_validate_rejects_infinite_target() {
        let mut query = TaskQuery { time: 600.0, mood: 3.0, ..TaskQuery::default() };
        assert!(query.validate().is_ok());
        query.longitude = f64::INFINITY;
        let err = query.validate().unwrap_err();
        assert!(err.to_string().contains("longitude"));
    }

    #[test]
    fn test_into_task_is_unstamped() {
        let task = new_task().into_task(TaskId(9));
        assert_eq!(task.id, TaskId(9));
        assert!(!task.is_stamped());
    }

    #[test]
    fn test_task_json_shape() {
        let mut task = new_task().into_task(TaskId(7));
        task.ancestry = Some(Ancestry::root(TaskId(3)).child(TaskId(7)));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["ancestry"], "3.7.");

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("5").unwrap(), 5.0);
        assert_eq!(parse_time_of_day("14:30").unwrap(), 870.0);
        assert_eq!(parse_time_of_day("00:00:30").unwrap(), 0.5);
        assert!(parse_time_of_day("noonish").is_err());
        assert!(parse_time_of_day("25:00").is_err());
    }
}
