//! Property-based tests for the wire types.
//!
//! Uses proptest to verify:
//! 1. Any 24-hex-digit string parses as a `TaskId` and round-trips through
//!    `Display` in canonical lowercase.
//! 2. Strings of the wrong length or alphabet are always rejected.
//! 3. Any valid `Task` survives a JSON round-trip unchanged.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use taskboard_proto::task::{TASK_ID_LENGTH, Task, TaskId};

// --- Strategies for wire types ---

/// Strategy for canonical identifier text (24 hex digits, mixed case).
fn arb_id_text() -> impl Strategy<Value = String> {
    "[0-9a-fA-F]{24}"
}

/// Strategy for arbitrary `TaskId` values built from raw parts.
fn arb_task_id() -> impl Strategy<Value = TaskId> {
    (any::<u32>(), any::<[u8; 8]>()).prop_map(|(secs, random)| TaskId::from_parts(secs, random))
}

/// Strategy for whole-second UTC timestamps (the wire format is RFC 3339;
/// sub-second precision is not required to survive).
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..=4_102_444_800).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

/// Strategy for arbitrary `Task` values.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        arb_task_id(),
        "[^\x00]{1,64}",
        "[^\x00]{0,256}",
        any::<bool>(),
        arb_timestamp(),
        arb_timestamp(),
    )
        .prop_map(|(id, title, description, completed, created_at, updated_at)| Task {
            id,
            title,
            description,
            completed,
            created_at,
            updated_at,
        })
}

proptest! {
    /// Every 24-hex-digit string is accepted and canonicalized to lowercase.
    #[test]
    fn hex24_always_parses_and_round_trips(text in arb_id_text()) {
        let id: TaskId = text.parse().unwrap();
        let rendered = id.to_string();
        prop_assert_eq!(rendered.len(), TASK_ID_LENGTH);
        prop_assert_eq!(&rendered, &text.to_ascii_lowercase());
        // Canonical text parses back to the same identifier.
        let reparsed: TaskId = rendered.parse().unwrap();
        prop_assert_eq!(reparsed, id);
    }

    /// Valid-length strings with any non-hex character are rejected.
    #[test]
    fn hex24_with_foreign_characters_is_rejected(
        text in "[0-9a-f]{0,23}",
        bad in "[g-zG-Z!@#$%^&*_\\- ]",
    ) {
        let mut candidate = text;
        candidate.push_str(&bad);
        while candidate.len() < TASK_ID_LENGTH {
            candidate.push('0');
        }
        candidate.truncate(TASK_ID_LENGTH);
        prop_assert!(candidate.parse::<TaskId>().is_err());
    }

    /// Anything that is not exactly 24 characters is rejected.
    #[test]
    fn wrong_length_is_rejected(text in "[0-9a-f]{0,48}") {
        if text.len() != TASK_ID_LENGTH {
            prop_assert!(text.parse::<TaskId>().is_err());
        }
    }

    /// `from_parts` always produces a parseable canonical identifier.
    #[test]
    fn constructed_ids_are_always_canonical(id in arb_task_id()) {
        let text = id.to_string();
        prop_assert_eq!(text.len(), TASK_ID_LENGTH);
        prop_assert!(text.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
        prop_assert_eq!(text.parse::<TaskId>().unwrap(), id);
    }

    /// Any valid task survives serialize → deserialize unchanged.
    #[test]
    fn task_json_round_trip(task in arb_task()) {
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, task);
    }

    /// Malformed identifiers are rejected during deserialization, not later.
    #[test]
    fn task_json_with_bad_id_fails_to_deserialize(bad_id in "[g-z]{24}") {
        let json = format!(
            r#"{{"id":"{bad_id}","title":"t","description":"","completed":false,
                "createdAt":"2026-01-01T00:00:00Z","updatedAt":"2026-01-01T00:00:00Z"}}"#
        );
        prop_assert!(serde_json::from_str::<Task>(&json).is_err());
    }
}
