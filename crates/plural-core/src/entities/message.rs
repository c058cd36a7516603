//! Message entity - one line of the system's chat log

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::MemberId;

/// Chat message attributed to a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub member_id: MemberId,
    pub text: String,
    /// Display timestamp (`HH:MM` local time unless the caller supplied one)
    pub timestamp: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Display timestamp for a message written now
    pub fn display_timestamp() -> String {
        Local::now().format("%H:%M").to_string()
    }

    /// Get a truncated preview of the message
    pub fn preview(&self, max_len: usize) -> &str {
        if self.text.len() <= max_len {
            &self.text
        } else {
            let mut end = max_len;
            while !self.text.is_char_boundary(end) {
                end -= 1;
            }
            &self.text[..end]
        }
    }
}
