use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use crate::error::TasklineError;
use crate::lists::validate_list_name;
use crate::task::{Document, Task, TaskList};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// 1-based position of the new task.
    pub position: usize,
    pub list_created: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTask {
    pub position: usize,
    pub timestamp: String,
    pub text: String,
    pub done: bool,
}

pub fn append(doc: &mut Document, list: &str, text: &str) -> Result<AppendOutcome, TasklineError> {
    append_at(doc, list, text, Local::now())
}

/// Appends a task stamped with `now`, creating the list if needed.
pub fn append_at(
    doc: &mut Document,
    list: &str,
    text: &str,
    now: DateTime<Local>,
) -> Result<AppendOutcome, TasklineError> {
    validate_list_name(list)?;
    if text.trim().is_empty() {
        return Err(TasklineError::invalid("Task text is required."));
    }
    let list_created = !doc.lists.contains_key(list);
    if list_created {
        info!(list, "list did not exist; creating it");
    }
    let tasks = doc.lists.entry(list.to_string()).or_default();
    tasks.push(Task::new(text, now));
    Ok(AppendOutcome {
        position: tasks.len(),
        list_created,
    })
}

pub fn remove(doc: &mut Document, list: &str, position: i64) -> Result<Task, TasklineError> {
    let tasks = existing_list_mut(doc, list)?;
    let index = checked_index(tasks, position)?;
    Ok(tasks.remove(index))
}

/// Marking an already-done task is a no-op.
pub fn mark_done(doc: &mut Document, list: &str, position: i64) -> Result<(), TasklineError> {
    let tasks = existing_list_mut(doc, list)?;
    let index = checked_index(tasks, position)?;
    tasks[index].done = true;
    Ok(())
}

pub fn render(doc: &Document, list: &str) -> Result<Vec<RenderedTask>, TasklineError> {
    let tasks = doc
        .list(list)
        .ok_or_else(|| TasklineError::NotFound(list.to_string()))?;
    Ok(tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| RenderedTask {
            position: idx + 1,
            timestamp: task.created_short.clone(),
            text: task.text.clone(),
            done: task.done,
        })
        .collect())
}

pub fn render_task_line(task: &RenderedTask) -> String {
    let mut line = format!("{}.", task.position);
    if task.done {
        line.push_str(" [DONE]");
    }
    for part in [task.timestamp.as_str(), task.text.as_str()] {
        if !part.is_empty() {
            line.push(' ');
            line.push_str(part);
        }
    }
    line
}

pub fn parse_position(value: &str) -> Result<i64, TasklineError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| TasklineError::invalid("Invalid number."))
}

fn existing_list_mut<'a>(
    doc: &'a mut Document,
    list: &str,
) -> Result<&'a mut TaskList, TasklineError> {
    doc.list_mut(list)
        .ok_or_else(|| TasklineError::NotFound(list.to_string()))
}

fn checked_index(tasks: &TaskList, position: i64) -> Result<usize, TasklineError> {
    if position <= 0 {
        return Err(TasklineError::invalid("Invalid number."));
    }
    let len = tasks.len();
    match usize::try_from(position) {
        Ok(pos) if pos <= len => Ok(pos - 1),
        _ => Err(TasklineError::OutOfRange { position, len }),
    }
}
