//! ID generation utilities.

use uuid::Uuid;

/// Generates a new time-ordered identifier (UUID v7) as a string.
///
/// Used for history entries and anything else that is persisted.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}
