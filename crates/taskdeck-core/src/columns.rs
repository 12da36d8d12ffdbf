//! Task-table column configuration
//!
//! The table ships with a standard column set and lets users add custom
//! columns, hide columns, and remove the ones they added. Column ids are
//! slugs derived from labels; required columns can never be removed.

use serde::{Deserialize, Serialize};

/// Errors from column-set mutations
#[derive(Debug, thiserror::Error)]
pub enum ColumnError {
    /// A column with the same id already exists
    #[error("column '{0}' already exists")]
    Duplicate(String),

    /// The column is part of the required set
    #[error("column '{0}' is required and cannot be removed")]
    Required(String),

    /// No column with this id
    #[error("column '{0}' does not exist")]
    Unknown(String),

    /// The label slugs down to nothing
    #[error("column label cannot be empty")]
    EmptyLabel,
}

/// Rendering and editing behavior of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text
    Text,
    /// Numeric input
    Number,
    /// Date input
    Date,
    /// Fixed choice list
    Select,
    /// Numeric input rendered as a percentage
    Percentage,
    /// Derived value, never edited directly
    Calculated,
}

/// One column of the task table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Stable identifier (slug for custom columns)
    pub id: String,
    /// Header text
    pub label: String,
    /// Rendering and editing behavior
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Required columns cannot be removed
    pub required: bool,
    /// Whether cells in this column accept inline edits
    pub editable: bool,
    /// Hidden columns stay configured but are not rendered
    pub hidden: bool,
    /// Whether a user added this column
    pub custom: bool,
}

/// Derive a column id from its label: lowercased, whitespace to underscores
#[must_use]
pub fn slugify(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Ordered set of table columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl ColumnSet {
    /// The built-in columns every task table starts with
    #[must_use]
    pub fn standard() -> Self {
        let fixed = |id: &str, label: &str, column_type, required, editable| Column {
            id: id.to_string(),
            label: label.to_string(),
            column_type,
            required,
            editable,
            hidden: false,
            custom: false,
        };
        Self {
            columns: vec![
                fixed("name", "Task Name", ColumnType::Text, true, true),
                fixed("assignee", "Assignee", ColumnType::Text, false, true),
                fixed("dueDate", "Due Date", ColumnType::Date, false, true),
                fixed("storyPoints", "Story Points", ColumnType::Number, false, true),
                fixed("riskScore", "Risk Score", ColumnType::Calculated, false, false),
                fixed("status", "Status", ColumnType::Select, false, true),
            ],
        }
    }

    /// All columns, configuration order
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns that should be rendered
    pub fn visible(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.hidden)
    }

    /// Look up a column by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Add a user-defined column; the id is slugged from the label
    pub fn add_custom(
        &mut self,
        label: impl Into<String>,
        column_type: ColumnType,
    ) -> Result<Column, ColumnError> {
        let label = label.into();
        let id = slugify(&label);
        if id.is_empty() {
            return Err(ColumnError::EmptyLabel);
        }
        if self.get(&id).is_some() {
            return Err(ColumnError::Duplicate(id));
        }

        let column = Column {
            id,
            label,
            column_type,
            required: false,
            editable: true,
            hidden: false,
            custom: true,
        };
        self.columns.push(column.clone());
        Ok(column)
    }

    /// Remove a column; required columns are refused
    pub fn remove(&mut self, id: &str) -> Result<Column, ColumnError> {
        let index = self
            .columns
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ColumnError::Unknown(id.to_string()))?;
        if self.columns[index].required {
            return Err(ColumnError::Required(id.to_string()));
        }
        Ok(self.columns.remove(index))
    }

    /// Show or hide a column without removing it
    pub fn set_hidden(&mut self, id: &str, hidden: bool) -> Result<(), ColumnError> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ColumnError::Unknown(id.to_string()))?;
        column.hidden = hidden;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_joins() {
        assert_eq!(slugify("Sprint Goal"), "sprint_goal");
        assert_eq!(slugify("  QA   Owner "), "qa_owner");
        assert_eq!(slugify("Budget"), "budget");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn standard_set_has_the_builtin_columns() {
        let set = ColumnSet::standard();
        let ids: Vec<&str> = set.columns().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            ["name", "assignee", "dueDate", "storyPoints", "riskScore", "status"]
        );
        assert!(set.get("name").unwrap().required);
        assert!(!set.get("riskScore").unwrap().editable);
    }

    #[test]
    fn add_custom_slugs_the_label() {
        let mut set = ColumnSet::standard();
        let column = set.add_custom("Sprint Goal", ColumnType::Text).unwrap();
        assert_eq!(column.id, "sprint_goal");
        assert!(column.custom);
        assert!(column.editable);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut set = ColumnSet::standard();
        set.add_custom("Budget", ColumnType::Number).unwrap();
        let err = set.add_custom("budget", ColumnType::Text).unwrap_err();
        assert!(matches!(err, ColumnError::Duplicate(id) if id == "budget"));
    }

    #[test]
    fn empty_labels_are_rejected() {
        let mut set = ColumnSet::standard();
        assert!(matches!(
            set.add_custom("   ", ColumnType::Text),
            Err(ColumnError::EmptyLabel)
        ));
    }

    #[test]
    fn required_columns_cannot_be_removed() {
        let mut set = ColumnSet::standard();
        let err = set.remove("name").unwrap_err();
        assert!(matches!(err, ColumnError::Required(_)));
        assert!(set.get("name").is_some());
    }

    #[test]
    fn custom_columns_can_be_removed() {
        let mut set = ColumnSet::standard();
        set.add_custom("Budget", ColumnType::Percentage).unwrap();
        let removed = set.remove("budget").unwrap();
        assert_eq!(removed.label, "Budget");
        assert!(set.get("budget").is_none());
    }

    #[test]
    fn removing_unknown_column_errors() {
        let mut set = ColumnSet::standard();
        assert!(matches!(set.remove("ghost"), Err(ColumnError::Unknown(_))));
    }

    #[test]
    fn hiding_keeps_the_column_configured() {
        let mut set = ColumnSet::standard();
        set.set_hidden("assignee", true).unwrap();

        assert!(set.get("assignee").unwrap().hidden);
        let visible: Vec<&str> = set.visible().map(|c| c.id.as_str()).collect();
        assert!(!visible.contains(&"assignee"));

        set.set_hidden("assignee", false).unwrap();
        assert!(!set.get("assignee").unwrap().hidden);
    }

    #[test]
    fn column_type_wire_names_are_lowercase() {
        let json = serde_json::to_string(&ColumnType::Percentage).unwrap();
        assert_eq!(json, "\"percentage\"");
    }
}
