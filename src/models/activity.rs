// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Name length bounds, in characters.
pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 62;
/// Description length cap, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 2048;

/// Stored activity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Store-assigned ID
    pub id: i64,
    /// Activity name/title
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Whether completing it through "repeat" spawns a fresh copy
    pub repeatable: bool,
    /// Completion time; `None` means the activity is still active
    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,
    /// Whether this is the one currently-selected activity
    pub selected: bool,
}

/// Counts reported by `GET /activities/count`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActivityCounts {
    pub total: i64,
    pub active: i64,
    pub done: i64,
}

/// Creation payload for `POST /activities`.
///
/// Both text fields deserialize as optional so their absence surfaces as a
/// field-scoped validation error instead of a body-rejection.
#[derive(Debug, Deserialize)]
pub struct NewActivity {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub repeatable: bool,
}

/// A creation payload that passed validation.
#[derive(Debug, Clone, Copy)]
pub struct ActivityDraft<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub repeatable: bool,
}

impl NewActivity {
    /// Check the payload against the field constraints.
    ///
    /// Stops at the first failing check, so each bad request gets exactly
    /// one field-scoped error. Lengths are counted in characters.
    pub fn validate(&self) -> Result<ActivityDraft<'_>, AppError> {
        let name = self.name.as_deref().unwrap_or("");
        if name.is_empty() {
            return Err(AppError::InvalidInput {
                field: "name",
                message: "Un nom doit être fourni",
            });
        }
        if name.chars().count() < NAME_MIN_LEN {
            return Err(AppError::InvalidInput {
                field: "name",
                message: "Le nom doit contenir au moins 3 charactères",
            });
        }
        if name.chars().count() > NAME_MAX_LEN {
            return Err(AppError::InvalidInput {
                field: "name",
                message: "Le nom doit contenir au maximum 62 charactères",
            });
        }

        let Some(description) = self.description.as_deref() else {
            return Err(AppError::InvalidInput {
                field: "description",
                message: "Une description doit être fournie",
            });
        };
        if description.chars().count() > DESCRIPTION_MAX_LEN {
            return Err(AppError::InvalidInput {
                field: "description",
                message: "La description doit contenir au maximum 2048 charactères",
            });
        }

        Ok(ActivityDraft {
            name,
            description,
            repeatable: self.repeatable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, description: &str) -> NewActivity {
        NewActivity {
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            repeatable: false,
        }
    }

    fn failed_field(payload: &NewActivity) -> &'static str {
        match payload.validate() {
            Err(AppError::InvalidInput { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_name_length_bounds() {
        assert_eq!(failed_field(&payload("ab", "ok")), "name");
        assert!(payload("abc", "ok").validate().is_ok());
        assert!(payload(&"x".repeat(62), "ok").validate().is_ok());
        assert_eq!(failed_field(&payload(&"x".repeat(63), "ok")), "name");
    }

    #[test]
    fn test_name_length_counts_characters_not_bytes() {
        // Two characters but four bytes; still under the minimum.
        assert_eq!(failed_field(&payload("éé", "ok")), "name");
        assert!(payload("ééé", "ok").validate().is_ok());
    }

    #[test]
    fn test_missing_name_fails_presence_check_only() {
        let missing = NewActivity {
            name: None,
            description: Some("ok".to_string()),
            repeatable: false,
        };
        let err = missing.validate().unwrap_err();
        match err {
            AppError::InvalidInput { field, message } => {
                assert_eq!(field, "name");
                assert_eq!(message, "Un nom doit être fourni");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_description_length_cap() {
        assert!(payload("abc", &"d".repeat(2048)).validate().is_ok());
        assert_eq!(
            failed_field(&payload("abc", &"d".repeat(2049))),
            "description"
        );
    }

    #[test]
    fn test_missing_description_rejected() {
        let missing = NewActivity {
            name: Some("abc".to_string()),
            description: None,
            repeatable: false,
        };
        assert_eq!(failed_field(&missing), "description");
    }

    #[test]
    fn test_repeatable_defaults_to_false() {
        let parsed: NewActivity =
            serde_json::from_str(r#"{"name": "abc", "description": "ok"}"#).unwrap();
        assert!(!parsed.repeatable);
        assert!(parsed.validate().is_ok());
    }
}
