use std::cmp::Ordering;

use client_core::TableUtility;
use shared::domain::{TableState, UserRecord};

/// Sorts by a named column; sorting the same column again flips direction.
pub struct ColumnSorter;

impl TableUtility for ColumnSorter {
    fn sort_table(&self, table: &mut TableState, column: &str, users: &mut Vec<UserRecord>) {
        if table.sort_column.as_deref() == Some(column) {
            table.reverse = !table.reverse;
        } else {
            table.sort_column = Some(column.to_string());
            table.reverse = false;
        }

        users.sort_by(|a, b| {
            let ordering = compare_column(a, b, column);
            if table.reverse {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}

fn compare_column(a: &UserRecord, b: &UserRecord, column: &str) -> Ordering {
    match column {
        "name" => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        "email" => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
        "role" => a.role.cmp(&b.role),
        other => column_text(a, other).cmp(&column_text(b, other)),
    }
}

fn column_text(user: &UserRecord, column: &str) -> String {
    match user.extra.get(column) {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(users: &[UserRecord]) -> Vec<&str> {
        users.iter().map(|user| user.name.as_str()).collect()
    }

    #[test]
    fn sorting_same_column_twice_reverses() {
        let mut table = TableState::default();
        let mut users = vec![
            UserRecord::new("corwin", "c@amber.com"),
            UserRecord::new("Bleys", "b@amber.com"),
            UserRecord::new("eric", "e@amber.com"),
        ];

        ColumnSorter.sort_table(&mut table, "name", &mut users);
        assert_eq!(names(&users), ["Bleys", "corwin", "eric"]);
        assert!(!table.reverse);

        ColumnSorter.sort_table(&mut table, "name", &mut users);
        assert_eq!(names(&users), ["eric", "corwin", "Bleys"]);
        assert!(table.reverse);

        ColumnSorter.sort_table(&mut table, "role", &mut users);
        assert_eq!(table.sort_column.as_deref(), Some("role"));
        assert!(!table.reverse);
    }

    #[test]
    fn unknown_columns_sort_by_extra_fields() {
        let mut table = TableState::default();
        let mut late = UserRecord::new("fiona", "");
        late.extra.insert("joined".into(), serde_json::json!("2024"));
        let mut early = UserRecord::new("gerard", "");
        early.extra.insert("joined".into(), serde_json::json!("2019"));
        let mut users = vec![late, early];

        ColumnSorter.sort_table(&mut table, "joined", &mut users);
        assert_eq!(names(&users), ["gerard", "fiona"]);
    }
}
