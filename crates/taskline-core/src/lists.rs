use crate::error::TasklineError;
use crate::task::{Document, TaskList};

pub fn validate_list_name(name: &str) -> Result<(), TasklineError> {
    if name.is_empty() {
        return Err(TasklineError::invalid("List name cannot be empty."));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(TasklineError::invalid(format!(
            "List name '{name}' cannot contain spaces (use underscores if needed)."
        )));
    }
    Ok(())
}

pub fn create_list(doc: &mut Document, name: &str) -> Result<(), TasklineError> {
    validate_list_name(name)?;
    if doc.lists.contains_key(name) {
        return Err(TasklineError::AlreadyExists(name.to_string()));
    }
    doc.lists.insert(name.to_string(), TaskList::new());
    Ok(())
}

/// Removes the list and every task in it.
pub fn delete_list(doc: &mut Document, name: &str) -> Result<TaskList, TasklineError> {
    doc.lists
        .shift_remove(name)
        .ok_or_else(|| TasklineError::NotFound(name.to_string()))
}

pub fn list_names(doc: &Document) -> Vec<String> {
    doc.lists.keys().cloned().collect()
}
