//! Identifier generation for tasks and projects.

use uuid::Uuid;

/// Generate a random 128-bit identifier in hyphenated form.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
