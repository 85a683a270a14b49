use rusqlite::Row;

use crate::sqlite::{ColumnConstraint, ColumnDefinition, DataType, Schema, TableDefinition};

/// A validated submission, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub age: Option<i64>,
    pub email: String,
    pub other_data: Option<String>,
}

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub email: String,
    pub other_data: Option<String>,
}

impl UserRecord {
    /// Expects columns in the order `id, name, age, email, other_data`.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            email: row.get(3)?,
            other_data: row.get(4)?,
        })
    }
}

pub fn users_table() -> TableDefinition {
    TableDefinition::new("users")
        .with_column(
            ColumnDefinition::new("id", DataType::Integer)
                .with_constraint(ColumnConstraint::PrimaryKey)
                .with_constraint(ColumnConstraint::AutoIncrement),
        )
        .with_column(
            ColumnDefinition::new("name", DataType::Text).with_constraint(ColumnConstraint::NotNull),
        )
        .with_column(ColumnDefinition::new("age", DataType::Integer))
        .with_column(
            ColumnDefinition::new("email", DataType::Text)
                .with_constraint(ColumnConstraint::NotNull)
                .with_constraint(ColumnConstraint::Unique),
        )
        .with_column(ColumnDefinition::new("other_data", DataType::Text))
}

pub fn users_schema() -> Schema {
    Schema::new().add_table(users_table())
}
