//! User and exercise models for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// User document stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier (also used as document ID)
    pub id: String,
    /// Display name; free text, duplicates allowed
    pub username: String,
    /// Embedded exercise log, in insertion order
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// A single logged activity, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// What was done
    pub description: String,
    /// Duration in whole minutes
    pub duration_minutes: u32,
    /// Calendar date of the exercise (no time component)
    pub date: NaiveDate,
}
