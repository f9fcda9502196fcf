use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const CREATED_SHORT_FORMAT: &str = "[%d/%m %H:%M]";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    /// Full creation timestamp, `YYYY-MM-DD HH:MM` local time.
    pub created: String,
    /// Display form of the same instant, `[DD/MM HH:MM]`.
    #[serde(default)]
    pub created_short: String,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    pub fn new(text: impl Into<String>, now: DateTime<Local>) -> Self {
        Self {
            text: text.into(),
            created: now.format(CREATED_FORMAT).to_string(),
            created_short: now.format(CREATED_SHORT_FORMAT).to_string(),
            done: false,
        }
    }
}

pub type TaskList = Vec<Task>;

/// Root of the persisted state: list name -> tasks, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub lists: IndexMap<String, TaskList>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, name: &str) -> Option<&TaskList> {
        self.lists.get(name)
    }

    pub fn list_mut(&mut self, name: &str) -> Option<&mut TaskList> {
        self.lists.get_mut(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_task_stamps_both_formats_from_one_instant() {
        let now = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
        let task = Task::new("buy milk", now);
        assert_eq!(task.text, "buy milk");
        assert_eq!(task.created, "2024-03-07 09:05");
        assert_eq!(task.created_short, "[07/03 09:05]");
        assert!(!task.done);
    }
}
