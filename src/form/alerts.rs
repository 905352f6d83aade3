//! Alert email rows on the infrastructure step
//!
//! The list always keeps at least one row; removing the last row is a no-op.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertEmailCommand {
    /// Append an empty row
    Add,
    /// Replace the text of one row
    Update { index: usize, value: String },
    /// Remove one row, blocked below one row
    Remove { index: usize },
}

impl AlertEmailCommand {
    pub fn apply(self, emails: &[String]) -> Vec<String> {
        match self {
            Self::Add => add_row(emails),
            Self::Update { index, value } => update_row(emails, index, value),
            Self::Remove { index } => remove_row(emails, index),
        }
    }
}

pub fn add_row(emails: &[String]) -> Vec<String> {
    let mut rows = emails.to_vec();
    rows.push(String::new());
    rows
}

pub fn update_row(emails: &[String], index: usize, value: String) -> Vec<String> {
    let mut rows = emails.to_vec();
    match rows.get_mut(index) {
        Some(row) => *row = value,
        None => log::warn!("Ignoring update of alert email row {} (have {})", index, rows.len()),
    }
    rows
}

pub fn remove_row(emails: &[String], index: usize) -> Vec<String> {
    if emails.len() <= 1 {
        log::warn!("Refusing to remove the last alert email row");
        return normalize(emails.to_vec());
    }
    if index >= emails.len() {
        return emails.to_vec();
    }

    let mut rows = emails.to_vec();
    rows.remove(index);
    rows
}

/// Ensure at least one row is present
pub fn normalize(mut emails: Vec<String>) -> Vec<String> {
    if emails.is_empty() {
        emails.push(String::new());
    }
    emails
}

/// Rows with non-blank text, in order
pub fn active(emails: &[String]) -> Vec<&str> {
    emails
        .iter()
        .filter(|email| !email.trim().is_empty())
        .map(|email| email.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_add_and_update() {
        let emails = add_row(&rows(&["a@x.com"]));
        assert_eq!(emails, rows(&["a@x.com", ""]));

        let emails = update_row(&emails, 1, "b@x.com".to_string());
        assert_eq!(emails, rows(&["a@x.com", "b@x.com"]));
    }

    #[test]
    fn test_remove_blocked_on_last_row() {
        let emails = remove_row(&rows(&["a@x.com"]), 0);
        assert_eq!(emails, rows(&["a@x.com"]));

        let emails = remove_row(&rows(&["a@x.com", "b@x.com"]), 0);
        assert_eq!(emails, rows(&["b@x.com"]));
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let emails = rows(&["a@x.com", "b@x.com"]);
        assert_eq!(remove_row(&emails, 5), emails);
        assert_eq!(update_row(&emails, 5, "c@x.com".to_string()), emails);
    }

    #[test]
    fn test_active_filters_blank() {
        let emails = rows(&["a@x.com", "", "  ", "b@x.com"]);
        assert_eq!(active(&emails), vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(Vec::new()), rows(&[""]));
    }
}
